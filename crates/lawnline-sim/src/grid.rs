//! Lane grid. Owns defender placement.
//!
//! Each cell holds at most one defender entity. Entities carry their own
//! `GridCell`, and the grid is the only place that maps a cell back to an
//! entity, so there are no references between entities.

use hecs::Entity;

use lawnline_core::constants::SWEEPER_COLUMN;
use lawnline_core::error::{CommandError, PlacementRejection};
use lawnline_core::types::GridCell;

#[derive(Debug, Clone)]
pub struct LaneGrid {
    rows: usize,
    cols: usize,
    cells: Vec<Option<Entity>>,
}

impl LaneGrid {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![None; rows * cols],
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Playfield width in lane units.
    pub fn width(&self) -> f64 {
        self.cols as f64
    }

    /// Validate signed coordinates coming from the presentation layer.
    pub fn cell(&self, row: i64, col: i64) -> Result<GridCell, CommandError> {
        if row < 0 || col < 0 || row as usize >= self.rows || col as usize >= self.cols {
            return Err(CommandError::InvalidCell { row, col });
        }
        Ok(GridCell::new(row as usize, col as usize))
    }

    /// Translate a pointer position in lane units to the cell under it.
    pub fn cell_at(&self, x: f64, y: f64) -> Result<GridCell, CommandError> {
        if !x.is_finite() || !y.is_finite() {
            return Err(CommandError::InvalidCell { row: -1, col: -1 });
        }
        self.cell(y.floor() as i64, x.floor() as i64)
    }

    /// Like `cell`, additionally rejecting the sweeper column.
    pub fn plantable(&self, row: i64, col: i64) -> Result<GridCell, CommandError> {
        let cell = self.cell(row, col)?;
        if cell.col == SWEEPER_COLUMN {
            return Err(PlacementRejection::InvalidColumn.into());
        }
        Ok(cell)
    }

    pub fn get(&self, cell: GridCell) -> Option<Entity> {
        self.index(cell).and_then(|i| self.cells[i])
    }

    pub fn is_empty(&self, cell: GridCell) -> bool {
        self.get(cell).is_none()
    }

    /// Install a defender in an empty cell.
    pub fn install(&mut self, cell: GridCell, entity: Entity) -> Result<(), PlacementRejection> {
        let i = self.index(cell).ok_or(PlacementRejection::InvalidColumn)?;
        if self.cells[i].is_some() {
            return Err(PlacementRejection::CellOccupied);
        }
        self.cells[i] = Some(entity);
        Ok(())
    }

    /// Clear a cell, returning what was there.
    pub fn vacate(&mut self, cell: GridCell) -> Option<Entity> {
        self.index(cell).and_then(|i| self.cells[i].take())
    }

    /// Clear a cell only if it still holds `entity`.
    pub fn vacate_if(&mut self, cell: GridCell, entity: Entity) -> bool {
        match self.index(cell) {
            Some(i) if self.cells[i] == Some(entity) => {
                self.cells[i] = None;
                true
            }
            _ => false,
        }
    }

    /// Occupied cells of one lane in column order.
    pub fn row_occupants(&self, row: usize) -> impl Iterator<Item = (GridCell, Entity)> + '_ {
        let start = row * self.cols;
        let slice = if row < self.rows {
            &self.cells[start..start + self.cols]
        } else {
            &self.cells[0..0]
        };
        slice
            .iter()
            .enumerate()
            .filter_map(move |(col, slot)| slot.map(|e| (GridCell::new(row, col), e)))
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    fn index(&self, cell: GridCell) -> Option<usize> {
        (cell.row < self.rows && cell.col < self.cols).then(|| cell.row * self.cols + cell.col)
    }
}

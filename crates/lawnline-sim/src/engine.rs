//! Simulation engine: the core of the game.
//!
//! `SimulationEngine` owns the hecs ECS world, the lane grid, the economy,
//! the wave scheduler and the deferred timers. It applies player commands,
//! runs all systems once per tick and produces `GameStateSnapshot`s. It has
//! no clock of its own: every tick and command is handed `now_ms` by the
//! caller, so a virtual clock reproduces a run exactly.

use std::collections::VecDeque;

use hecs::World;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use lawnline_core::commands::PlayerCommand;
use lawnline_core::components::{Defender, Pickup};
use lawnline_core::constants::*;
use lawnline_core::enums::*;
use lawnline_core::error::{CommandError, PlacementRejection, RemovalRejection};
use lawnline_core::events::SimEvent;
use lawnline_core::state::{ButtonState, GameStateSnapshot};
use lawnline_core::types::{Position, SimTime};
use lawnline_waves::fsm::WaveState;

use crate::economy::Economy;
use crate::grid::LaneGrid;
use crate::systems;
use crate::timers::DeferredTimer;
use crate::world_setup;

/// Configuration for starting a new simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    pub rows: usize,
    pub cols: usize,
    pub starting_balance: u32,
    /// Delay between start and the first wave callback.
    pub first_wave_delay_ms: u64,
    /// Whether resource drops fall from the sky on their own.
    pub ambient_drops: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            starting_balance: STARTING_BALANCE,
            first_wave_delay_ms: FIRST_WAVE_DELAY_MS,
            ambient_drops: true,
        }
    }
}

/// What a click on a cell ended up doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    Placed(DefenderKind),
    Removed(DefenderKind),
    /// Nothing was selected.
    Ignored,
}

/// The simulation engine. Owns the ECS world and all sim state.
pub struct SimulationEngine {
    config: SimConfig,
    world: World,
    grid: LaneGrid,
    economy: Economy,
    time: SimTime,
    phase: GamePhase,
    selection: Selection,
    rng: ChaCha8Rng,
    waves: WaveState,
    wave_timer: DeferredTimer,
    drop_timer: DeferredTimer,
    next_entity_id: u32,
    command_queue: VecDeque<PlayerCommand>,
    despawn_buffer: Vec<hecs::Entity>,
    events: Vec<SimEvent>,
}

impl SimulationEngine {
    /// Create a new simulation engine with the given config. The game is
    /// constructed in `Waiting` and does nothing until started.
    pub fn new(config: SimConfig) -> Self {
        let rows = config.rows.max(1);
        let cols = config.cols.max(2);
        Self {
            world: World::new(),
            grid: LaneGrid::new(rows, cols),
            economy: Economy::new(config.starting_balance),
            time: SimTime::default(),
            phase: GamePhase::default(),
            selection: Selection::None,
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            waves: WaveState::default(),
            wave_timer: DeferredTimer::default(),
            drop_timer: DeferredTimer::default(),
            next_entity_id: 0,
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            events: Vec::new(),
            config,
        }
    }

    /// Throw away all state and return to `Waiting` with the same config.
    pub fn reset(&mut self) {
        *self = Self::new(self.config.clone());
    }

    /// Start the game clock: park the sweepers and arm the wave and drop timers.
    pub fn start(&mut self, now_ms: u64) {
        if self.phase != GamePhase::Waiting {
            return;
        }
        self.phase = GamePhase::Active;
        self.time = SimTime::started_at(now_ms);
        world_setup::spawn_sweepers(&mut self.world, self.grid.rows());
        self.wave_timer.arm(now_ms + self.config.first_wave_delay_ms);
        if self.config.ambient_drops {
            let delay = systems::ambient::next_delay_ms(&mut self.rng);
            self.drop_timer.arm(now_ms + delay);
        }
        info!(
            seed = self.config.seed,
            rows = self.grid.rows(),
            cols = self.grid.cols(),
            "game started"
        );
        self.events.push(SimEvent::GameStarted);
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the simulation by one tick and return the resulting snapshot.
    pub fn tick(&mut self, now_ms: u64) -> GameStateSnapshot {
        self.process_commands(now_ms);

        if self.phase == GamePhase::Active {
            self.time.advance(now_ms);
            self.run_systems();
        }

        self.refresh_selection();

        let events = std::mem::take(&mut self.events);
        systems::snapshot::build_snapshot(
            &self.world,
            &self.time,
            self.phase,
            &self.economy,
            self.selection,
            &self.waves,
            events,
        )
    }

    /// Place a defender. Checks run in a fixed order and nothing changes
    /// unless every check passes.
    pub fn place_defender(
        &mut self,
        row: usize,
        col: usize,
        kind: DefenderKind,
        now_ms: u64,
    ) -> Result<(), CommandError> {
        self.ensure_running()?;
        let cell = self.grid.plantable(row as i64, col as i64)?;
        self.economy.check(kind, now_ms)?;
        if !self.grid.is_empty(cell) {
            return Err(PlacementRejection::CellOccupied.into());
        }

        let entity = world_setup::spawn_defender(&mut self.world, kind, cell, now_ms);
        if let Err(rejection) = self.grid.install(cell, entity) {
            let _ = self.world.despawn(entity);
            return Err(rejection.into());
        }
        self.economy.commit(kind, now_ms);

        debug!(?kind, row, col, balance = self.economy.balance(), "defender placed");
        self.events.push(SimEvent::DefenderPlaced { kind, row, col });
        Ok(())
    }

    /// Dig up whatever occupies a cell.
    pub fn remove_defender(&mut self, row: usize, col: usize) -> Result<DefenderKind, CommandError> {
        self.ensure_running()?;
        let cell = self.grid.cell(row as i64, col as i64)?;
        let entity = self
            .grid
            .vacate(cell)
            .ok_or(RemovalRejection::NothingToRemove)?;
        let kind = self
            .world
            .get::<&Defender>(entity)
            .map(|d| d.kind)
            .map_err(|_| RemovalRejection::NothingToRemove)?;
        let _ = self.world.despawn(entity);

        debug!(?kind, row, col, "defender removed");
        self.events.push(SimEvent::DefenderRemoved { kind, row, col });
        Ok(kind)
    }

    /// Collect a pickup by id, crediting its value.
    pub fn collect_pickup(&mut self, id: u32) -> Result<u32, CommandError> {
        self.ensure_running()?;
        let value = self
            .world
            .query_mut::<&mut Pickup>()
            .into_iter()
            .find(|(_, p)| p.id == id)
            .and_then(|(_, p)| systems::pickups::collect(p))
            .ok_or(CommandError::UnknownPickup(id))?;
        self.credit_pickup(id, value);
        Ok(value)
    }

    /// Collect the lowest-id collectable pickup within reach of a pointer
    /// position in lane units.
    pub fn collect_pickup_at(&mut self, x: f64, y: f64) -> Result<u32, CommandError> {
        self.ensure_running()?;
        let pointer = Position::new(x, y);
        let hit = self
            .world
            .query::<(&Pickup, &Position)>()
            .iter()
            .filter(|(_, (p, pos))| {
                p.phase.is_collectable() && pos.distance_to(&pointer) <= PICKUP_RADIUS
            })
            .map(|(_, (p, _))| p.id)
            .min();
        match hit {
            Some(id) => self.collect_pickup(id),
            None => Err(CommandError::NoPickupAt { x, y }),
        }
    }

    /// Availability of a defender type at `now_ms`.
    pub fn button_state(&self, kind: DefenderKind, now_ms: u64) -> ButtonState {
        self.economy.button_state(kind, now_ms)
    }

    /// Arm a selection for the next click. Selecting the armed defender
    /// type again clears it.
    pub fn select(&mut self, selection: Selection, now_ms: u64) -> Result<Selection, CommandError> {
        self.selection = match selection {
            Selection::Defender(_) if self.selection == selection => Selection::None,
            Selection::Defender(kind) => {
                if self.economy.button_state(kind, now_ms).disabled {
                    return Err(CommandError::SelectionDisabled);
                }
                selection
            }
            Selection::Shovel | Selection::None => selection,
        };
        Ok(self.selection)
    }

    /// Apply the armed selection to a cell.
    pub fn click_cell(&mut self, row: usize, col: usize, now_ms: u64) -> Result<ClickOutcome, CommandError> {
        match self.selection {
            Selection::None => Ok(ClickOutcome::Ignored),
            Selection::Shovel if col == SWEEPER_COLUMN => Ok(ClickOutcome::Ignored),
            Selection::Shovel => {
                let result = self.remove_defender(row, col);
                self.selection = Selection::None;
                result.map(ClickOutcome::Removed)
            }
            Selection::Defender(kind) => {
                self.place_defender(row, col, kind, now_ms)?;
                self.selection = Selection::None;
                Ok(ClickOutcome::Placed(kind))
            }
        }
    }

    /// Get the current game phase.
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    pub fn balance(&self) -> u32 {
        self.economy.balance()
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn grid(&self) -> &LaneGrid {
        &self.grid
    }

    pub fn waves(&self) -> &WaveState {
        &self.waves
    }

    /// Spawn an attacker at an exact spot (for testing).
    #[cfg(test)]
    pub fn spawn_test_attacker(&mut self, row: usize, x: f64, kind: AttackerKind) -> hecs::Entity {
        let id = self.next_entity_id;
        self.next_entity_id += 1;
        world_setup::spawn_attacker(&mut self.world, id, kind, row, x)
    }

    /// Drop a pickup at an exact spot (for testing).
    #[cfg(test)]
    pub fn spawn_test_pickup(&mut self, x: f64, y: f64) -> u32 {
        let id = self.next_entity_id;
        self.next_entity_id += 1;
        world_setup::spawn_pickup(&mut self.world, id, PickupSource::Ambient, Position::new(x, y));
        id
    }

    #[cfg(test)]
    pub fn set_balance(&mut self, balance: u32) {
        self.economy.set_balance(balance);
    }

    #[cfg(test)]
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    #[cfg(test)]
    pub fn waves_mut(&mut self) -> &mut WaveState {
        &mut self.waves
    }

    fn ensure_running(&self) -> Result<(), CommandError> {
        if self.phase == GamePhase::Active {
            Ok(())
        } else {
            Err(CommandError::NotRunning)
        }
    }

    fn credit_pickup(&mut self, id: u32, value: u32) {
        self.economy.credit(value);
        debug!(id, value, balance = self.economy.balance(), "pickup collected");
        self.events.push(SimEvent::PickupCollected { id, value });
    }

    /// Drop a defender selection that can no longer be afforded or is cooling down.
    fn refresh_selection(&mut self) {
        if let Selection::Defender(kind) = self.selection {
            if self.economy.button_state(kind, self.time.now_ms).disabled {
                self.selection = Selection::None;
            }
        }
    }

    /// Process all queued commands.
    fn process_commands(&mut self, now_ms: u64) {
        while let Some(command) = self.command_queue.pop_front() {
            if let Err(error) = self.handle_command(command, now_ms) {
                warn!(%error, "command rejected");
                self.events.push(SimEvent::CommandRejected { error });
            }
        }
    }

    /// Handle a single player command.
    fn handle_command(&mut self, command: PlayerCommand, now_ms: u64) -> Result<(), CommandError> {
        match command {
            PlayerCommand::StartGame => {
                if self.phase == GamePhase::GameOver {
                    self.reset();
                }
                self.start(now_ms);
            }
            PlayerCommand::Select { selection } => {
                self.select(selection, now_ms)?;
            }
            PlayerCommand::ClickCell { row, col } => {
                self.click_cell(row, col, now_ms)?;
            }
            PlayerCommand::PlaceDefender { row, col, kind } => {
                self.place_defender(row, col, kind, now_ms)?;
            }
            PlayerCommand::RemoveDefender { row, col } => {
                self.remove_defender(row, col)?;
            }
            PlayerCommand::CollectPickup { id } => {
                self.collect_pickup(id)?;
            }
            PlayerCommand::CollectAt { x, y } => {
                self.collect_pickup_at(x, y)?;
            }
        }
        Ok(())
    }

    /// Raise the loss condition and freeze the simulation.
    fn end_game(&mut self, row: usize) {
        self.phase = GamePhase::GameOver;
        self.wave_timer.disarm();
        self.drop_timer.disarm();
        info!(row, tick = self.time.tick, wave = self.waves.wave, "game over");
        self.events.push(SimEvent::GameOver { row });
    }

    /// Run all systems in order.
    fn run_systems(&mut self) {
        let now_ms = self.time.now_ms;
        let width = self.grid.width();

        // 0. Deferred callbacks: wave scheduler and ambient drops
        systems::wave_spawner::run(
            &mut self.world,
            &self.grid,
            &mut self.waves,
            &mut self.wave_timer,
            &mut self.rng,
            &self.time,
            &mut self.next_entity_id,
            &mut self.events,
        );
        systems::ambient::run(
            &mut self.world,
            &mut self.drop_timer,
            &mut self.rng,
            width,
            now_ms,
            &mut self.next_entity_id,
            &mut self.events,
        );
        // 1. Sweepers (motion + contact kills)
        systems::sweepers::run(&mut self.world, width, &mut self.events);
        // 2. Pickups
        systems::pickups::run(&mut self.world, now_ms, &mut self.events);
        // 3. Defenders (fire, yield, fuse)
        systems::defenders::run(
            &mut self.world,
            &mut self.grid,
            now_ms,
            &mut self.next_entity_id,
            &mut self.events,
        );
        // 4. Projectile flight, out-of-bounds pruning
        systems::projectiles::run(&mut self.world, width, &mut self.despawn_buffer);
        // 5. Loss check before attackers move
        if let Some(row) = systems::attackers::breached_row(&self.world) {
            self.end_game(row);
            return;
        }
        // 6. Attackers (melee or advance)
        systems::attackers::run(&mut self.world, &mut self.grid, now_ms, &mut self.events);
        // 7. Projectile hits, sweeper triggers
        systems::combat::resolve_projectiles(&mut self.world, now_ms, &mut self.events);
        systems::combat::trigger_sweepers(&mut self.world, &mut self.events);
        // 8. Cleanup (dead, spent, finished)
        systems::cleanup::run(&mut self.world, &mut self.waves, &mut self.despawn_buffer);
        // 9. Loss check after attackers moved
        if let Some(row) = systems::attackers::breached_row(&self.world) {
            self.end_game(row);
        }
    }
}

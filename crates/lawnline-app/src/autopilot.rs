//! A naive player used for demo and soak runs.
//!
//! Reads a snapshot and answers with the commands a cautious human would
//! issue: start the game, grab every pickup, plant producers early and a
//! shooter in each lane that has an attacker in it.

use lawnline_core::commands::PlayerCommand;
use lawnline_core::enums::{DefenderKind, GamePhase};
use lawnline_core::state::GameStateSnapshot;

/// Columns the autopilot plants shooters in, back to front.
const SHOOTER_COLUMNS: [usize; 3] = [2, 3, 4];

/// Column reserved for producers.
const PRODUCER_COLUMN: usize = 1;

fn ready(snapshot: &GameStateSnapshot, kind: DefenderKind) -> bool {
    snapshot
        .buttons
        .iter()
        .any(|b| b.kind == kind && !b.disabled)
}

fn occupied(snapshot: &GameStateSnapshot, row: usize, col: usize) -> bool {
    snapshot.defenders.iter().any(|d| d.row == row && d.col == col)
}

/// Commands to issue in response to `snapshot`, in order.
pub fn plan(snapshot: &GameStateSnapshot, rows: usize) -> Vec<PlayerCommand> {
    let mut commands = Vec::new();

    match snapshot.phase {
        GamePhase::Waiting => {
            commands.push(PlayerCommand::StartGame);
            return commands;
        }
        GamePhase::GameOver => return commands,
        GamePhase::Active => {}
    }

    commands.extend(
        snapshot
            .pickups
            .iter()
            .map(|p| PlayerCommand::CollectPickup { id: p.id }),
    );

    let threatened = (0..rows).find(|&row| {
        snapshot.attackers.iter().any(|a| a.row == row)
            && !snapshot
                .defenders
                .iter()
                .any(|d| d.row == row && d.kind.is_shooter())
    });

    if let Some(row) = threatened {
        if ready(snapshot, DefenderKind::Shooter) {
            if let Some(&col) = SHOOTER_COLUMNS.iter().find(|&&col| !occupied(snapshot, row, col)) {
                commands.push(PlayerCommand::PlaceDefender {
                    row,
                    col,
                    kind: DefenderKind::Shooter,
                });
            }
        }
        return commands;
    }

    if ready(snapshot, DefenderKind::SunProducer) {
        if let Some(row) = (0..rows).find(|&row| !occupied(snapshot, row, PRODUCER_COLUMN)) {
            commands.push(PlayerCommand::PlaceDefender {
                row,
                col: PRODUCER_COLUMN,
                kind: DefenderKind::SunProducer,
            });
        }
    }

    commands
}

#[cfg(test)]
mod tests {
    use super::*;
    use lawnline_core::state::{AttackerView, ButtonState, PickupView};
    use lawnline_core::enums::*;
    use lawnline_core::types::Position;

    fn active() -> GameStateSnapshot {
        GameStateSnapshot {
            phase: GamePhase::Active,
            buttons: DefenderKind::ALL
                .iter()
                .map(|&kind| ButtonState {
                    kind,
                    disabled: false,
                    cooldown_percent: 0.0,
                })
                .collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_waiting_starts_game() {
        let commands = plan(&GameStateSnapshot::default(), 5);
        assert!(matches!(commands.as_slice(), [PlayerCommand::StartGame]));
    }

    #[test]
    fn test_game_over_does_nothing() {
        let snapshot = GameStateSnapshot {
            phase: GamePhase::GameOver,
            ..active()
        };
        assert!(plan(&snapshot, 5).is_empty());
    }

    #[test]
    fn test_collects_pickups_and_defends_threatened_lane() {
        let mut snapshot = active();
        snapshot.pickups.push(PickupView {
            id: 4,
            position: Position::new(2.0, 1.0),
            phase: PickupPhase::Resting,
            opacity: 1.0,
        });
        snapshot.attackers.push(AttackerView {
            id: 9,
            kind: AttackerKind::Basic,
            row: 3,
            position: Position::new(8.0, 4.0),
            health: 100.0,
            max_health: 100.0,
            health_ratio: 1.0,
            slowed: false,
        });

        let commands = plan(&snapshot, 5);
        assert!(matches!(commands[0], PlayerCommand::CollectPickup { id: 4 }));
        assert!(matches!(
            commands[1],
            PlayerCommand::PlaceDefender {
                row: 3,
                col: 2,
                kind: DefenderKind::Shooter
            }
        ));
    }

    #[test]
    fn test_plants_producer_when_quiet() {
        let commands = plan(&active(), 5);
        assert!(matches!(
            commands.as_slice(),
            [PlayerCommand::PlaceDefender {
                row: 0,
                col: PRODUCER_COLUMN,
                kind: DefenderKind::SunProducer
            }]
        ));
    }
}

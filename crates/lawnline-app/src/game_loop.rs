//! Game loop: runs the simulation engine at 60Hz.
//!
//! The real-time loop owns its engine on a dedicated thread. Commands arrive
//! via an `mpsc` channel and the latest snapshot is stored in shared state
//! for polling. The headless runner drives an engine on a virtual clock and
//! runs as fast as the CPU allows.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use anyhow::Context;
use tracing::{debug, info};

use lawnline_core::commands::PlayerCommand;
use lawnline_core::constants::TICK_RATE;
use lawnline_core::enums::GamePhase;
use lawnline_core::state::GameStateSnapshot;
use lawnline_sim::{SimConfig, SimulationEngine};

use crate::autopilot;
use crate::state::GameLoopCommand;

/// Nominal duration of one tick.
pub const TICK_DURATION: Duration = Duration::from_nanos(1_000_000_000 / TICK_RATE as u64);

/// Clock reading of tick `n` on the virtual clock, in milliseconds.
pub fn virtual_now_ms(tick: u64) -> u64 {
    tick * 1000 / TICK_RATE as u64
}

/// Spawns the game loop in a new thread.
///
/// Returns the command sender and the thread handle.
pub fn spawn_game_loop(
    config: SimConfig,
    latest_snapshot: Arc<Mutex<Option<GameStateSnapshot>>>,
) -> anyhow::Result<(mpsc::Sender<GameLoopCommand>, JoinHandle<()>)> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();

    let handle = std::thread::Builder::new()
        .name("lawnline-game-loop".into())
        .spawn(move || {
            run_game_loop(config, cmd_rx, &latest_snapshot);
        })
        .context("failed to spawn game loop thread")?;

    Ok((cmd_tx, handle))
}

/// The game loop. Runs until Shutdown command or channel disconnect.
fn run_game_loop(
    config: SimConfig,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    latest_snapshot: &Mutex<Option<GameStateSnapshot>>,
) {
    let mut engine = SimulationEngine::new(config);
    let epoch = Instant::now();
    let mut next_tick_time = epoch;

    loop {
        // 1. Drain all pending commands
        loop {
            match cmd_rx.try_recv() {
                Ok(GameLoopCommand::PlayerCommand(cmd)) => {
                    engine.queue_command(cmd);
                }
                Ok(GameLoopCommand::Shutdown) => return,
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => return,
            }
        }

        // 2. Advance one tick against the wall clock
        let now_ms = epoch.elapsed().as_millis() as u64;
        let snapshot = engine.tick(now_ms);

        // 3. Store latest snapshot for polling
        if let Ok(mut lock) = latest_snapshot.lock() {
            *lock = Some(snapshot);
        }

        // 4. Sleep until next tick
        next_tick_time += TICK_DURATION;
        let now = Instant::now();
        if next_tick_time > now {
            std::thread::sleep(next_tick_time - now);
        } else if now - next_tick_time > TICK_DURATION * 2 {
            // Too far behind, reset to avoid a catch-up spiral
            next_tick_time = now;
        }
    }
}

/// Summary of a headless run.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub ticks: u64,
    pub final_snapshot: GameStateSnapshot,
    pub commands_issued: usize,
    pub rejections: usize,
}

/// Run an engine on the virtual clock for up to `max_ticks`, stopping early
/// on game over. With `autopilot` the naive player feeds commands back each
/// tick; otherwise only the start command is issued.
pub fn run_headless(config: SimConfig, max_ticks: u64, use_autopilot: bool) -> RunReport {
    let rows = config.rows;
    let mut engine = SimulationEngine::new(config);
    engine.queue_command(PlayerCommand::StartGame);

    let mut final_snapshot = GameStateSnapshot::default();
    let mut commands_issued = 0;
    let mut rejections = 0;
    let mut ticks = 0;

    while ticks < max_ticks {
        let snapshot = engine.tick(virtual_now_ms(ticks));
        ticks += 1;

        rejections += snapshot
            .events
            .iter()
            .filter(|e| matches!(e, lawnline_core::events::SimEvent::CommandRejected { .. }))
            .count();

        if use_autopilot {
            let commands = autopilot::plan(&snapshot, rows);
            commands_issued += commands.len();
            engine.queue_commands(commands);
        }

        let over = snapshot.phase == GamePhase::GameOver;
        final_snapshot = snapshot;
        if over {
            info!(ticks, "run ended in game over");
            break;
        }
    }

    debug!(ticks, commands_issued, rejections, "headless run finished");
    RunReport {
        ticks,
        final_snapshot,
        commands_issued,
        rejections,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_channel_round_trip() {
        let (tx, rx) = mpsc::channel::<GameLoopCommand>();

        tx.send(GameLoopCommand::PlayerCommand(PlayerCommand::StartGame))
            .unwrap();
        tx.send(GameLoopCommand::PlayerCommand(PlayerCommand::CollectPickup { id: 3 }))
            .unwrap();
        tx.send(GameLoopCommand::Shutdown).unwrap();

        let mut commands = Vec::new();
        while let Ok(cmd) = rx.try_recv() {
            commands.push(cmd);
        }

        assert_eq!(commands.len(), 3);
        assert!(matches!(
            commands[0],
            GameLoopCommand::PlayerCommand(PlayerCommand::StartGame)
        ));
        assert!(matches!(
            commands[1],
            GameLoopCommand::PlayerCommand(PlayerCommand::CollectPickup { id: 3 })
        ));
        assert!(matches!(commands[2], GameLoopCommand::Shutdown));
    }

    #[test]
    fn test_tick_duration_constant() {
        // 60Hz = 16.666ms per tick
        let expected_nanos = 1_000_000_000u64 / 60;
        assert_eq!(TICK_DURATION.as_nanos(), expected_nanos as u128);
        assert_eq!(virtual_now_ms(60), 1000);
        assert_eq!(virtual_now_ms(90), 1500);
    }

    #[test]
    fn test_spawned_loop_starts_and_shuts_down() {
        let latest = Arc::new(Mutex::new(None));
        let (tx, handle) = spawn_game_loop(SimConfig::default(), latest.clone()).unwrap();
        tx.send(GameLoopCommand::PlayerCommand(PlayerCommand::StartGame))
            .unwrap();

        let deadline = Instant::now() + Duration::from_secs(2);
        let mut phase = GamePhase::Waiting;
        while Instant::now() < deadline {
            if let Some(snap) = latest.lock().unwrap().as_ref() {
                phase = snap.phase;
            }
            if phase == GamePhase::Active {
                break;
            }
            std::thread::sleep(Duration::from_millis(5));
        }
        assert_eq!(phase, GamePhase::Active);

        tx.send(GameLoopCommand::Shutdown).unwrap();
        handle.join().unwrap();
    }

    #[test]
    fn test_headless_without_player_is_overrun() {
        let report = run_headless(SimConfig::default(), 60 * 60 * 10, false);
        assert_eq!(report.final_snapshot.phase, GamePhase::GameOver);
        assert!(report.ticks < 60 * 60 * 10);
        assert_eq!(report.commands_issued, 0);
    }

    #[test]
    fn test_headless_autopilot_holds_the_opening() {
        let report = run_headless(SimConfig::default(), 60 * 60, true);
        assert_eq!(report.ticks, 60 * 60);
        assert_eq!(report.final_snapshot.phase, GamePhase::Active);
        assert!(report.commands_issued > 0);
        assert!(!report.final_snapshot.defenders.is_empty());
    }

    #[test]
    fn test_snapshot_serialization_under_3ms() {
        let report = run_headless(SimConfig::default(), 60 * 30, true);
        let start = Instant::now();
        let json = serde_json::to_string(&report.final_snapshot).unwrap();
        let elapsed = start.elapsed();

        assert!(
            elapsed < Duration::from_millis(3),
            "Snapshot serialization took {:?}, should be <3ms",
            elapsed
        );
        assert!(!json.is_empty());
    }
}

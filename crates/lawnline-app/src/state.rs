//! State shared between the runner and the game loop thread.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};

use lawnline_core::commands::PlayerCommand;
use lawnline_core::state::GameStateSnapshot;

/// Commands sent to the game loop thread.
#[derive(Debug)]
pub enum GameLoopCommand {
    /// A player command to forward to the simulation engine.
    PlayerCommand(PlayerCommand),
    /// Shut down the game loop thread gracefully.
    Shutdown,
}

/// Handles to a running game loop.
pub struct AppState {
    /// Channel sender to forward commands to the game loop thread.
    /// `None` until the loop is spawned.
    pub command_tx: Mutex<Option<mpsc::Sender<GameLoopCommand>>>,
    /// Latest snapshot, updated by the game loop thread after each tick.
    pub latest_snapshot: Arc<Mutex<Option<GameStateSnapshot>>>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            command_tx: Mutex::new(None),
            latest_snapshot: Arc::new(Mutex::new(None)),
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forward a player command to the running loop.
    pub fn send(&self, command: PlayerCommand) -> anyhow::Result<()> {
        let lock = self
            .command_tx
            .lock()
            .map_err(|e| anyhow::anyhow!("command channel poisoned: {e}"))?;
        match lock.as_ref() {
            Some(tx) => tx
                .send(GameLoopCommand::PlayerCommand(command))
                .map_err(|e| anyhow::anyhow!("failed to send command: {e}")),
            None => anyhow::bail!("game loop not started"),
        }
    }

    /// Clone of the most recent snapshot, if any tick has run.
    pub fn snapshot(&self) -> Option<GameStateSnapshot> {
        self.latest_snapshot.lock().ok().and_then(|lock| lock.clone())
    }

    /// Ask the loop to stop. Safe to call when it already stopped.
    pub fn shutdown(&self) {
        if let Ok(lock) = self.command_tx.lock() {
            if let Some(tx) = lock.as_ref() {
                let _ = tx.send(GameLoopCommand::Shutdown);
            }
        }
    }
}

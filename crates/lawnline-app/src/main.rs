use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use lawnline_app::autopilot;
use lawnline_app::config::load_config;
use lawnline_app::game_loop::{self, RunReport};
use lawnline_app::state::AppState;
use lawnline_core::commands::PlayerCommand;
use lawnline_core::enums::GamePhase;
use lawnline_core::state::GameStateSnapshot;
use lawnline_sim::SimConfig;

/// Headless LAWNLINE runner.
#[derive(Debug, Parser)]
#[command(name = "lawnline", version, about)]
struct Args {
    /// JSON file with simulation settings. Missing fields use defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the RNG seed from the config.
    #[arg(long)]
    seed: Option<u64>,

    /// Number of ticks to simulate on the virtual clock.
    #[arg(long, default_value_t = 60 * 60 * 5)]
    ticks: u64,

    /// Run on the wall clock for this many seconds instead of the virtual clock.
    #[arg(long)]
    realtime: Option<u64>,

    /// Only start the game; do not play it.
    #[arg(long)]
    no_autopilot: bool,

    /// Print the final snapshot as JSON on stdout.
    #[arg(long)]
    json: bool,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_names(true)
        .compact()
        .init();
}

fn run_realtime(
    config: SimConfig,
    seconds: u64,
    use_autopilot: bool,
) -> anyhow::Result<GameStateSnapshot> {
    let rows = config.rows;
    let state = AppState::new();
    let (tx, handle) = game_loop::spawn_game_loop(config, state.latest_snapshot.clone())?;
    if let Ok(mut lock) = state.command_tx.lock() {
        *lock = Some(tx);
    }
    state.send(PlayerCommand::StartGame)?;

    let deadline = Instant::now() + Duration::from_secs(seconds);
    let mut last_tick = None;
    while Instant::now() < deadline {
        std::thread::sleep(game_loop::TICK_DURATION);
        let Some(snapshot) = state.snapshot() else {
            continue;
        };
        if snapshot.phase == GamePhase::GameOver {
            break;
        }
        if use_autopilot && last_tick != Some(snapshot.time.tick) {
            last_tick = Some(snapshot.time.tick);
            for command in autopilot::plan(&snapshot, rows) {
                state.send(command)?;
            }
        }
    }

    state.shutdown();
    handle
        .join()
        .map_err(|_| anyhow::anyhow!("game loop thread panicked"))?;
    state
        .snapshot()
        .ok_or_else(|| anyhow::anyhow!("game loop produced no snapshot"))
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let args = Args::parse();

    let mut config = load_config(args.config.as_deref())?;
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    info!(seed = config.seed, rows = config.rows, cols = config.cols, "loaded config");

    let use_autopilot = !args.no_autopilot;
    let snapshot = match args.realtime {
        Some(seconds) => run_realtime(config, seconds, use_autopilot)?,
        None => {
            let RunReport {
                ticks,
                final_snapshot,
                commands_issued,
                rejections,
            } = game_loop::run_headless(config, args.ticks, use_autopilot);
            info!(ticks, commands_issued, rejections, "headless run complete");
            final_snapshot
        }
    };

    info!(
        phase = ?snapshot.phase,
        wave = snapshot.wave.wave,
        endless = snapshot.wave.in_endless_mode,
        balance = snapshot.balance,
        defenders = snapshot.defenders.len(),
        attackers = snapshot.attackers.len(),
        "final state"
    );

    if args.json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    }
    Ok(())
}

//! Simulation config loading.

use std::fs;
use std::path::Path;

use anyhow::Context;

use lawnline_sim::SimConfig;

/// Load a `SimConfig` from a JSON file. Missing fields take their defaults;
/// no path means all defaults.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<SimConfig> {
    let Some(path) = path else {
        return Ok(SimConfig::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading config file {}", path.display()))?;
    parse_config(&text).with_context(|| format!("parsing config file {}", path.display()))
}

/// Parse and sanity-check a JSON config.
pub fn parse_config(text: &str) -> anyhow::Result<SimConfig> {
    let config: SimConfig = serde_json::from_str(text)?;
    anyhow::ensure!(config.rows >= 1, "rows must be at least 1");
    anyhow::ensure!(
        config.cols >= 2,
        "cols must be at least 2 (column 0 belongs to the sweepers)"
    );
    Ok(config)
}

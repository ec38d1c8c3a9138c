//! CLI command implementations

pub mod backup;
pub mod habit;
pub mod init;
pub mod status;

use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use std::path::Path;

use levelup::config::Config;
use levelup::{JsonFileStorage, PlayerState, Tracker};

/// Load the config and open the tracker on its data directory
pub fn open_tracker(
    config_path: Option<&Path>,
    data_dir_override: Option<&Path>,
) -> Result<Tracker<JsonFileStorage>> {
    let config = Config::load(config_path)?;
    let data_dir = data_dir_override
        .map(Path::to_path_buf)
        .unwrap_or_else(|| config.data_dir());
    tracing::debug!("Using data dir {}", data_dir.display());

    Tracker::open(JsonFileStorage::new(&data_dir), config.settings.leveling)
        .with_context(|| format!("Failed to load habit data from {}", data_dir.display()))
}

/// Ask a yes/no question on the terminal (default: no)
pub fn confirm(prompt: &str) -> Result<bool> {
    print!("{prompt} [y/N] ");
    std::io::stdout().flush()?;

    let mut answer = String::new();
    std::io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}

/// Text meter like `[██████░░░░░░░░░░░░░░]`
pub fn xp_bar(player: &PlayerState, width: usize) -> String {
    let filled = ((player.progress() * width as f32).round() as usize).min(width);
    format!("[{}{}]", "█".repeat(filled), "░".repeat(width - filled))
}

/// First eight characters of an id, enough to type as a prefix
pub fn short_id(id: &str) -> &str {
    id.char_indices().nth(8).map_or(id, |(end, _)| &id[..end])
}

//! Backup commands: export, import, reset

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::info;

use levelup::backup::default_file_name;
use levelup::{Confirmation, Day, JsonFileStorage, Tracker};

use super::confirm;

pub async fn export_command(tracker: &Tracker<JsonFileStorage>, output: Option<PathBuf>) -> Result<()> {
    let path = output.unwrap_or_else(|| PathBuf::from(default_file_name(Day::today())));
    let content = tracker.export(chrono::Utc::now()).to_json()?;

    std::fs::write(&path, content)
        .with_context(|| format!("Failed to write backup: {}", path.display()))?;
    info!("Exported {} habits", tracker.store().habits().len());
    println!("Backup written to {}", path.display());
    Ok(())
}

pub async fn import_command(tracker: &mut Tracker<JsonFileStorage>, file: &Path) -> Result<()> {
    let content = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read backup: {}", file.display()))?;

    let store = tracker
        .import_json(&content)
        .with_context(|| format!("Failed to import {}", file.display()))?;
    println!(
        "Data imported successfully! 📥 {} habits, level {}",
        store.habits().len(),
        store.player().level
    );
    Ok(())
}

pub async fn reset_command(tracker: &mut Tracker<JsonFileStorage>, yes: bool) -> Result<()> {
    let confirmed = yes || confirm("Reset all data? This cannot be undone.")?;
    if !confirmed {
        println!("Cancelled.");
        return Ok(());
    }

    tracker.reset(Confirmation::from(confirmed))?;
    println!("All data has been reset.");
    Ok(())
}

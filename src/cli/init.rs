//! Init command implementation

use anyhow::Result;
use std::path::Path;
use tracing::info;

use levelup::config::Config;

/// Write the default config file
pub async fn init_command(path: &Path, force: bool) -> Result<()> {
    Config::write_default(path, force)?;
    info!("Created {}", path.display());
    println!("Configuration written to {}", path.display());
    Ok(())
}

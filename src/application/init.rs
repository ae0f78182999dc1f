//! Initialize journal use case

use crate::error::Result;
use crate::infrastructure::{Config, FileSystemRepository, JournalRepository};
use std::path::Path;
use tracing::info;

/// Initialize a new journal root at the specified path.
///
/// Writes a default `journal-bot.toml` and a README. Fails if the root
/// already has a config file.
pub fn init(path: &Path) -> Result<()> {
    let repo = FileSystemRepository::new(path.to_path_buf());

    repo.initialize()?;
    repo.save_config(&Config::default())?;

    info!("Initialized journal root at {}", path.display());
    println!("Initialized journal-bot journal at {}", path.display());

    Ok(())
}

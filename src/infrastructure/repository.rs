//! File system repository

use crate::error::{JournalBotError, Result};
use crate::infrastructure::config::CONFIG_FILE;
use crate::infrastructure::Config;
use std::fs;
use std::path::{Path, PathBuf};

pub const README_FILE: &str = "README.md";
pub const LOG_FILE: &str = "journal_bot.log";

const README_CONTENT: &str = "# Daily Journal\n\nThis repository contains my daily journal entries, automatically committed by my journal bot.\n";

/// Abstract repository for the local journal tree
pub trait JournalRepository {
    /// Get the root directory of this repository
    fn root(&self) -> &Path;

    /// Load configuration from journal-bot.toml
    fn load_config(&self) -> Result<Config>;

    /// Save configuration to journal-bot.toml
    fn save_config(&self, config: &Config) -> Result<()>;

    /// Check if journal-bot.toml exists
    fn is_initialized(&self) -> bool;

    /// Create the root directory and its README
    fn initialize(&self) -> Result<()>;
}

/// File system implementation of JournalRepository
#[derive(Debug, Clone)]
pub struct FileSystemRepository {
    pub root: PathBuf,
}

impl FileSystemRepository {
    /// Create a new repository with the given root directory
    pub fn new(root: PathBuf) -> Self {
        FileSystemRepository { root }
    }

    /// Path of the log file kept next to the journal
    pub fn log_path(&self) -> PathBuf {
        self.root.join(LOG_FILE)
    }

    /// Write entry content, creating parent directories as needed.
    /// Overwrites an existing file. Returns the absolute path written.
    pub fn write_entry(&self, relative: &str, content: &str) -> Result<PathBuf> {
        let path = self.root.join(relative);
        let local_write = |source| JournalBotError::LocalWrite {
            path: path.clone(),
            source,
        };

        if let Some(parent) = path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent).map_err(local_write)?;
            }
        }

        fs::write(&path, content).map_err(local_write)?;
        Ok(path)
    }
}

impl JournalRepository for FileSystemRepository {
    fn root(&self) -> &Path {
        &self.root
    }

    fn load_config(&self) -> Result<Config> {
        Config::load_from_dir(&self.root)
    }

    fn save_config(&self, config: &Config) -> Result<()> {
        config.save_to_dir(&self.root)
    }

    fn is_initialized(&self) -> bool {
        self.root.join(CONFIG_FILE).is_file()
    }

    fn initialize(&self) -> Result<()> {
        if self.is_initialized() {
            return Err(JournalBotError::Configuration(format!(
                "Directory already initialized: {}",
                self.root.display()
            )));
        }

        fs::create_dir_all(&self.root)?;

        let readme = self.root.join(README_FILE);
        if !readme.exists() {
            fs::write(readme, README_CONTENT)?;
        }

        Ok(())
    }
}

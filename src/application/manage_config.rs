//! Config management use case

use crate::error::{JournalBotError, Result};
use crate::infrastructure::{Config, FileSystemRepository, JournalRepository};

pub const KEYS: [&str; 5] = ["repository", "branch", "journal_dir", "schedule", "api_url"];

/// Service for managing journal configuration
pub struct ConfigService {
    repository: FileSystemRepository,
}

impl ConfigService {
    /// Create a new config service
    pub fn new(repository: FileSystemRepository) -> Self {
        ConfigService { repository }
    }

    fn read(&self) -> Result<Config> {
        Config::read_file(self.repository.root())
    }

    /// Get a single config value as written in the file
    pub fn get(&self, key: &str) -> Result<String> {
        let config = self.read()?;

        match key {
            "repository" => Ok(config.repository),
            "branch" => Ok(config.branch),
            "journal_dir" => Ok(config.journal_dir),
            "schedule" => Ok(config.schedule),
            "api_url" => Ok(config.api_url),
            _ => Err(unknown_key(key)),
        }
    }

    /// Set a config value. The updated config is validated before saving.
    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut config = self.read()?;
        let value = value.trim().to_string();

        match key {
            "repository" => config.repository = value,
            "branch" => config.branch = value,
            "journal_dir" => config.journal_dir = value,
            "schedule" => config.schedule = value,
            "api_url" => config.api_url = value,
            _ => return Err(unknown_key(key)),
        }

        config.validate()?;
        self.repository.save_config(&config)
    }

    /// List all config values
    pub fn list(&self) -> Result<Config> {
        self.read()
    }
}

fn unknown_key(key: &str) -> JournalBotError {
    JournalBotError::Configuration(format!(
        "Unknown config key: '{}'. Valid keys are: {}",
        key,
        KEYS.join(", ")
    ))
}

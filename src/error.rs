//! Error types for journal-bot

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for journal-bot
#[derive(Debug, Error)]
pub enum JournalBotError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Invalid schedule time: {0}")]
    InvalidScheduleTime(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Failed to write {}: {source}", .path.display())]
    LocalWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Remote write rejected: {0}")]
    RemoteWrite(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML deserialization error: {0}")]
    TomlDeserialize(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

impl JournalBotError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            JournalBotError::Configuration(_)
            | JournalBotError::InvalidScheduleTime(_)
            | JournalBotError::InvalidDate(_) => 2,
            JournalBotError::Authentication(_) => 3,
            JournalBotError::Network(_) => 4,
            JournalBotError::RemoteWrite(_) => 5,
            JournalBotError::LocalWrite { .. } => 6,
            _ => 1,
        }
    }

    /// Get a user-friendly error message with suggestions
    pub fn display_with_suggestions(&self) -> String {
        match self {
            JournalBotError::Configuration(msg) if msg.contains("environment variable") => {
                format!(
                    "{}\n\n\
                    Suggestions:\n\
                    • Export GITHUB_TOKEN, GITHUB_USERNAME and GITHUB_EMAIL\n\
                    • The token needs write access to the journal repository's contents",
                    self
                )
            }
            JournalBotError::Configuration(msg) if msg.contains("prompt") => {
                format!(
                    "{}\n\n\
                    Suggestions:\n\
                    • Add at least one entry to `prompts` in journal-bot.toml\n\
                    • Remove the `prompts` key to use the built-in list",
                    self
                )
            }
            JournalBotError::InvalidScheduleTime(value) => {
                format!(
                    "Invalid schedule time: '{}'\n\n\
                    Expected a 24-hour time in HH:MM form.\n\n\
                    Examples:\n\
                    journal-bot schedule --at 09:00\n\
                    journal-bot schedule --at 21:30",
                    value
                )
            }
            JournalBotError::InvalidDate(value) => {
                format!(
                    "Invalid date: '{}'\n\n\
                    Expected format: YYYY-MM-DD\n\
                    Example: journal-bot run --date 2024-03-01",
                    value
                )
            }
            JournalBotError::Authentication(_) => {
                format!(
                    "{}\n\n\
                    Suggestions:\n\
                    • Check that GITHUB_TOKEN is valid and has not expired\n\
                    • Check that GITHUB_USERNAME owns the journal repository",
                    self
                )
            }
            JournalBotError::Network(_) => {
                format!(
                    "{}\n\n\
                    Suggestions:\n\
                    • Check your network connection\n\
                    • Check the `api_url` setting: journal-bot config api_url",
                    self
                )
            }
            _ => self.to_string(),
        }
    }
}

/// Result type using JournalBotError
pub type Result<T> = std::result::Result<T, JournalBotError>;

//! Configuration management

use crate::domain::{default_prompts, ScheduleTime};
use crate::error::{JournalBotError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Component, Path};

pub const CONFIG_FILE: &str = "journal-bot.toml";
pub const DEFAULT_API_URL: &str = "https://api.github.com";

pub const TOKEN_VAR: &str = "GITHUB_TOKEN";
pub const ACCOUNT_VAR: &str = "GITHUB_USERNAME";
pub const EMAIL_VAR: &str = "GITHUB_EMAIL";
pub const REPOSITORY_VAR: &str = "JOURNAL_BOT_REPOSITORY";
pub const API_URL_VAR: &str = "JOURNAL_BOT_API_URL";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub repository: String,
    pub branch: String,
    pub journal_dir: String,
    pub schedule: String,
    pub api_url: String,
    pub prompts: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            repository: "daily-journal".to_string(),
            branch: "main".to_string(),
            journal_dir: "journals".to_string(),
            schedule: "09:00".to_string(),
            api_url: DEFAULT_API_URL.to_string(),
            prompts: default_prompts(),
        }
    }
}

impl Config {
    /// Load `journal-bot.toml` from `path`, falling back to defaults when
    /// the file is absent. Environment overrides are applied afterwards.
    pub fn load_from_dir(path: &Path) -> Result<Self> {
        let mut config = Self::read_file(path)?;
        config.apply_env_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Read the file as written, without environment overrides.
    pub fn read_file(path: &Path) -> Result<Self> {
        let config_path = path.join(CONFIG_FILE);

        let contents = match fs::read_to_string(&config_path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Config::default()),
            Err(e) => return Err(JournalBotError::Io(e)),
        };

        let mut config: Config = toml::from_str(&contents).map_err(|e| {
            JournalBotError::Configuration(format!("Failed to parse {}: {}", CONFIG_FILE, e))
        })?;
        // Surrounding whitespace from multi-line TOML strings is not part of
        // the prompt.
        for prompt in &mut config.prompts {
            *prompt = prompt.trim().to_string();
        }
        Ok(config)
    }

    /// Save config to `journal-bot.toml` in the given directory
    pub fn save_to_dir(&self, path: &Path) -> Result<()> {
        let contents = toml::to_string_pretty(self)?;
        fs::write(path.join(CONFIG_FILE), contents)?;
        Ok(())
    }

    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(repo) = lookup(REPOSITORY_VAR).filter(|v| !v.trim().is_empty()) {
            self.repository = repo.trim().to_string();
        }
        if let Some(url) = lookup(API_URL_VAR).filter(|v| !v.trim().is_empty()) {
            self.api_url = url.trim().to_string();
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.prompts.is_empty() {
            return Err(JournalBotError::Configuration(
                "no prompts configured".to_string(),
            ));
        }
        if self.prompts.iter().any(|p| p.trim().is_empty()) {
            return Err(JournalBotError::Configuration(
                "blank prompt in prompt list".to_string(),
            ));
        }
        if self.repository.trim().is_empty() || self.repository.contains('/') {
            return Err(JournalBotError::Configuration(format!(
                "Invalid repository name: '{}'",
                self.repository
            )));
        }
        if self.branch.trim().is_empty() {
            return Err(JournalBotError::Configuration(
                "branch must not be empty".to_string(),
            ));
        }

        let dir = Path::new(&self.journal_dir);
        let relative = !self.journal_dir.trim().is_empty()
            && dir
                .components()
                .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));
        if !relative {
            return Err(JournalBotError::Configuration(format!(
                "journal_dir must be a relative path inside the journal root: '{}'",
                self.journal_dir
            )));
        }

        self.schedule_time().map_err(|_| {
            JournalBotError::Configuration(format!(
                "Invalid schedule '{}' in {}: expected HH:MM",
                self.schedule, CONFIG_FILE
            ))
        })?;

        Ok(())
    }

    pub fn schedule_time(&self) -> Result<ScheduleTime> {
        self.schedule.parse()
    }
}

/// Access credentials for the hosted repository
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub token: String,
    pub account: String,
    pub email: String,
}

impl Credentials {
    /// Read credentials from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| -> Result<String> {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or_else(|| {
                    JournalBotError::Configuration(format!(
                        "missing required environment variable {}",
                        key
                    ))
                })
        };

        Ok(Credentials {
            token: required(TOKEN_VAR)?,
            account: required(ACCOUNT_VAR)?,
            email: required(EMAIL_VAR)?,
        })
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("token", &"<redacted>")
            .field("account", &self.account)
            .field("email", &self.email)
            .finish()
    }
}

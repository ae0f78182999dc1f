//! CLI command definitions

use crate::domain::ScheduleTime;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "journal-bot")]
#[command(about = "Daily journal entries committed to a hosted repository", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Journal root holding journal-bot.toml and the local entries
    #[arg(long, global = true, env = "JOURNAL_BOT_ROOT", default_value = ".")]
    pub root: PathBuf,

    /// Log debug events
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create and publish one entry now
    Run {
        /// Entry date instead of today (YYYY-MM-DD)
        #[arg(long, value_parser = parse_date)]
        date: Option<NaiveDate>,
    },

    /// Create and publish an entry every day at a fixed time
    Schedule {
        /// Local time of day in 24-hour HH:MM form (default: config `schedule`)
        #[arg(long, value_parser = parse_schedule_time)]
        at: Option<ScheduleTime>,
    },

    /// Initialize a journal root with a default config and README
    Init,

    /// List the configured prompts
    Prompts,

    /// View or modify configuration
    Config {
        /// Config key to get or set
        key: Option<String>,

        /// Value to set (if provided, sets the key)
        value: Option<String>,

        /// List all configuration
        #[arg(short, long)]
        list: bool,
    },
}

fn parse_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| format!("expected YYYY-MM-DD, got '{}'", value))
}

fn parse_schedule_time(value: &str) -> Result<ScheduleTime, String> {
    value
        .parse::<ScheduleTime>()
        .map_err(|_| format!("expected 24-hour HH:MM, got '{}'", value))
}

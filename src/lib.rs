//! journal-bot - Daily journal entries committed to a hosted repository
//!
//! Picks a writing prompt, renders a dated Markdown entry, keeps a local
//! copy and creates or updates the same path in a remote repository through
//! its contents API, either once or every day at a fixed time.

pub mod application;
pub mod cli;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod logging;

pub use error::JournalBotError;

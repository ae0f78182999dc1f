//! Domain layer - Entry composition, prompts and scheduling rules

pub mod entry;
pub mod prompt;
pub mod schedule;

pub use entry::{compose, JournalEntry};
pub use prompt::{default_prompts, select_prompt, DEFAULT_PROMPTS};
pub use schedule::ScheduleTime;

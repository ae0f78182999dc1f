//! Writing prompts and random selection

use crate::error::{JournalBotError, Result};
use rand::Rng;

/// Prompts used when the config file does not list its own
pub const DEFAULT_PROMPTS: [&str; 10] = [
    "What went well today?",
    "What could have gone better?",
    "What am I grateful for today?",
    "What did I learn today?",
    "What's one thing I want to focus on tomorrow?",
    "What was the best part of my day?",
    "What challenged me today?",
    "How did I take care of myself today?",
    "What's something I accomplished today?",
    "What's something I'm looking forward to?",
];

/// Built-in prompt list as owned strings
pub fn default_prompts() -> Vec<String> {
    DEFAULT_PROMPTS.iter().map(|p| p.to_string()).collect()
}

/// Pick one prompt uniformly at random.
///
/// Fails with a configuration error when `prompts` is empty.
pub fn select_prompt<'a, R>(prompts: &'a [String], rng: &mut R) -> Result<&'a str>
where
    R: Rng + ?Sized,
{
    if prompts.is_empty() {
        return Err(JournalBotError::Configuration(
            "no prompts configured".to_string(),
        ));
    }

    let index = rng.random_range(0..prompts.len());
    Ok(prompts[index].as_str())
}

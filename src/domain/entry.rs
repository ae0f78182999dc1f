//! Journal entry composition

use crate::error::{JournalBotError, Result};
use chrono::{Datelike, NaiveDate};

const ENTRY_TEMPLATE: &str = "# Journal Entry: {ISO_DATE}\n\n_{LONG_DATE}_\n\n## {PROMPT}\n\n_Write your thoughts here..._\n\n---\n\nCreated automatically by Journal Bot for {ISO_DATE}\n";

/// One day's generated journal document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JournalEntry {
    pub date: NaiveDate,
    pub prompt: String,
    pub body: String,
    /// Date-derived path segment, relative to the journal directory
    pub filename: String,
}

/// Build the entry for `date` around `prompt`, which is inserted verbatim.
pub fn compose(date: NaiveDate, prompt: &str) -> Result<JournalEntry> {
    if prompt.trim().is_empty() {
        return Err(JournalBotError::Configuration(
            "cannot compose an entry from a blank prompt".to_string(),
        ));
    }

    Ok(JournalEntry {
        date,
        prompt: prompt.to_string(),
        body: render(date, prompt),
        filename: filename_for_date(date),
    })
}

/// Path segment for a date, e.g. `march-2024/01/2024-03-01.md`
pub fn filename_for_date(date: NaiveDate) -> String {
    format!(
        "{}-{}/{:02}/{}.md",
        date.format("%B").to_string().to_lowercase(),
        date.year(),
        date.day(),
        date.format("%Y-%m-%d")
    )
}

fn render(date: NaiveDate, prompt: &str) -> String {
    ENTRY_TEMPLATE
        .replace("{ISO_DATE}", &date.format("%Y-%m-%d").to_string())
        .replace("{LONG_DATE}", &date.format("%A, %B %d, %Y").to_string())
        .replace("{PROMPT}", prompt)
}

//! Output formatting utilities

use crate::application::{PublishAction, PublishResult};
use crate::infrastructure::Config;

/// Format the outcome of a publish for display
pub fn format_publish_result(result: &PublishResult) -> String {
    let verb = match result.action {
        PublishAction::Created => "Created",
        PublishAction::Updated => "Updated",
    };

    let mut output = format!(
        "{} {} (commit {})\nLocal copy: {}\n",
        verb,
        result.remote_path,
        result.commit.sha,
        result.local_path.display()
    );
    if let Some(url) = &result.commit.url {
        output.push_str(&format!("Commit URL: {}\n", url));
    }
    output
}

/// Format a numbered list of prompts for display.
pub fn format_prompt_list(prompts: &[String]) -> String {
    let mut output = String::new();
    for (i, prompt) in prompts.iter().enumerate() {
        output.push_str(&format!("{}. {}\n", i + 1, prompt));
    }

    output
}

pub fn format_config(config: &Config) -> String {
    format!(
        "repository = {}\nbranch = {}\njournal_dir = {}\nschedule = {}\napi_url = {}\nprompts = {} configured\n",
        config.repository,
        config.branch,
        config.journal_dir,
        config.schedule,
        config.api_url,
        config.prompts.len()
    )
}

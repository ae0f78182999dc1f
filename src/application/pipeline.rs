//! One journal cycle: select a prompt, compose the entry, publish it

use crate::application::publish::{PublishResult, PublishService};
use crate::domain::{compose, select_prompt};
use crate::error::Result;
use crate::infrastructure::RemoteContents;
use chrono::NaiveDate;
use rand::Rng;
use tracing::info;

/// A unit of work the scheduler can trigger for a date
pub trait EntryPipeline {
    fn run(&mut self, date: NaiveDate) -> Result<PublishResult>;
}

pub struct JournalPipeline<R, G> {
    prompts: Vec<String>,
    publisher: PublishService<R>,
    rng: G,
}

impl<R: RemoteContents, G: Rng> JournalPipeline<R, G> {
    pub fn new(prompts: Vec<String>, publisher: PublishService<R>, rng: G) -> Self {
        JournalPipeline {
            prompts,
            publisher,
            rng,
        }
    }

    pub fn publisher(&self) -> &PublishService<R> {
        &self.publisher
    }
}

impl<R: RemoteContents, G: Rng> EntryPipeline for JournalPipeline<R, G> {
    fn run(&mut self, date: NaiveDate) -> Result<PublishResult> {
        info!("Creating journal entry for {}", date.format("%Y-%m-%d"));

        let prompt = select_prompt(&self.prompts, &mut self.rng)?;
        info!("Selected prompt: {}", prompt);

        let entry = compose(date, prompt)?;
        self.publisher.publish(&entry)
    }
}

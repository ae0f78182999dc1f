//! Application layer - Use cases and orchestration

pub mod init;
pub mod manage_config;
pub mod pipeline;
pub mod publish;
pub mod scheduler;

pub use manage_config::ConfigService;
pub use pipeline::{EntryPipeline, JournalPipeline};
pub use publish::{PublishAction, PublishResult, PublishService};
pub use scheduler::{Clock, CycleReport, Scheduler, SchedulerState, SystemClock};

//! Infrastructure layer - External I/O and persistence

pub mod config;
pub mod remote;
pub mod repository;

pub use config::{Config, Credentials};
pub use remote::{CommitRef, GitHubContents, PutRequest, RemoteContents, RemoteObject};
pub use repository::{FileSystemRepository, JournalRepository};

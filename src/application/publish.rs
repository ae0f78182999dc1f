//! Publish use case: local write followed by remote create-or-update

use crate::domain::JournalEntry;
use crate::error::Result;
use crate::infrastructure::{CommitRef, FileSystemRepository, PutRequest, RemoteContents};
use std::path::PathBuf;
use tracing::info;

/// Whether the remote object was created or replaced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishAction {
    Created,
    Updated,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishResult {
    pub action: PublishAction,
    pub commit: CommitRef,
    pub local_path: PathBuf,
    pub remote_path: String,
}

/// Service that persists an entry locally and commits it remotely
pub struct PublishService<R> {
    local: FileSystemRepository,
    remote: R,
    journal_dir: String,
}

impl<R: RemoteContents> PublishService<R> {
    pub fn new(local: FileSystemRepository, remote: R, journal_dir: impl Into<String>) -> Self {
        PublishService {
            local,
            remote,
            journal_dir: journal_dir.into(),
        }
    }

    pub fn remote(&self) -> &R {
        &self.remote
    }

    /// Repository-relative path an entry is stored under, locally and remotely
    pub fn entry_path(&self, entry: &JournalEntry) -> String {
        self.journal_dir
            .split('/')
            .filter(|segment| !segment.is_empty() && *segment != ".")
            .chain(std::iter::once(entry.filename.as_str()))
            .collect::<Vec<_>>()
            .join("/")
    }

    /// Write the entry locally, then create or update it remotely.
    ///
    /// The local write always happens first; remote failures leave the
    /// local file in place. Nothing is retried.
    pub fn publish(&self, entry: &JournalEntry) -> Result<PublishResult> {
        let path = self.entry_path(entry);

        let local_path = self.local.write_entry(&path, &entry.body)?;
        info!("Wrote journal entry: {}", local_path.display());

        let existing = self.remote.lookup(&path)?;
        let (action, verb) = match existing {
            Some(_) => (PublishAction::Updated, "Update"),
            None => (PublishAction::Created, "Add"),
        };
        let message = format!("{} journal entry for {}", verb, entry.date.format("%Y-%m-%d"));

        let commit = self.remote.put(&PutRequest {
            path: &path,
            content: &entry.body,
            message: &message,
            sha: existing.as_ref().map(|obj| obj.sha.as_str()),
        })?;
        info!("{} {} in commit {}", verb, path, commit.sha);

        Ok(PublishResult {
            action,
            commit,
            local_path,
            remote_path: path,
        })
    }
}

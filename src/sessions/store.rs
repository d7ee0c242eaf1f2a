//! Session store mapping client tokens to claimable archives.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tempfile::TempDir;
use tracing::debug;
use uuid::Uuid;

/// One session's claimable archive.
///
/// The record owns the scratch directory holding the archive and its chunk
/// files; dropping the record deletes the directory and everything in it.
#[derive(Debug)]
pub struct ArchiveRecord {
    scratch: TempDir,
    archive_path: PathBuf,
    pub chunk_count: usize,
    pub created_at: DateTime<Utc>,
}

impl ArchiveRecord {
    /// Create a record owning `scratch`, serving the archive at `archive_path`.
    pub fn new(scratch: TempDir, archive_path: PathBuf, chunk_count: usize) -> Self {
        Self {
            scratch,
            archive_path,
            chunk_count,
            created_at: Utc::now(),
        }
    }

    /// Path of the archive inside the scratch directory.
    pub fn archive_path(&self) -> &Path {
        &self.archive_path
    }

    /// Root of the owned scratch directory.
    pub fn scratch_path(&self) -> &Path {
        self.scratch.path()
    }
}

/// In-memory store of pending archives, keyed by session token.
pub struct SessionStore {
    records: HashMap<Uuid, ArchiveRecord>,
}

impl SessionStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            records: HashMap::new(),
        }
    }

    /// Register a session's archive, replacing any pending one.
    ///
    /// The replaced record is dropped, which deletes its scratch directory.
    pub fn record_archive(&mut self, session: Uuid, record: ArchiveRecord) {
        if self.records.insert(session, record).is_some() {
            debug!(session = %session, "replaced pending archive");
        }
    }

    /// Get a session's pending archive, if any.
    pub fn get(&self, session: Uuid) -> Option<&ArchiveRecord> {
        self.records.get(&session)
    }

    /// Claim a session's archive, removing it from the store.
    pub fn take(&mut self, session: Uuid) -> Option<ArchiveRecord> {
        self.records.remove(&session)
    }

    /// Drop records older than `ttl`, returning how many were removed.
    pub fn cleanup_expired(&mut self, ttl: chrono::Duration) -> usize {
        let cutoff = Utc::now() - ttl;
        let before = self.records.len();
        self.records.retain(|_, record| record.created_at > cutoff);
        before - self.records.len()
    }

    /// Number of pending archives.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if no archives are pending.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

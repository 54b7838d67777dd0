//! Invite link storage implementation
//!
//! This module keeps the per-group invite link records in memory and
//! persists them to a single JSON document. The in-memory map is
//! authoritative; the document is rewritten wholesale after each mutation.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};
use chrono::Utc;
use tokio::fs;
use tokio::sync::Mutex;
use tracing::{debug, warn, error, info};
use crate::models::InviteLinkRecord;
use crate::utils::errors::Result;
use crate::utils::helpers::unix_millis;

/// File-backed store of the active invite link per private group
#[derive(Debug)]
pub struct InviteLinkStore {
    /// Location of the persisted document
    path: PathBuf,
    /// Records keyed by private group chat id
    records: RwLock<HashMap<i64, InviteLinkRecord>>,
    /// Serialises writers so snapshots never interleave on disk
    writer: Mutex<()>,
}

impl InviteLinkStore {
    /// Load the store from `path`.
    ///
    /// A missing document is created empty. A malformed one is renamed to
    /// `<file>.<unix-millis>` and replaced by an empty store.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let aside = aside_path(&path);
        Self::open_with_aside(path, aside).await
    }

    async fn open_with_aside(path: PathBuf, aside: PathBuf) -> Result<Self> {
        let mut target = path.clone();

        let loaded = match fs::read(&path).await {
            Ok(content) => match serde_json::from_slice::<HashMap<i64, InviteLinkRecord>>(&content) {
                Ok(records) => {
                    info!(path = %path.display(), records = records.len(), "Invite link store loaded");
                    Some(records)
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Invite link store is malformed, starting fresh");
                    if !quarantine(&path, &aside, &content).await {
                        // Never overwrite a document that could not be preserved
                        target = fresh_path(&path);
                        error!(path = %target.display(), "Persisting invite links to an alternative file");
                    }
                    None
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!(path = %path.display(), "Invite link store not found, creating it");
                None
            }
            Err(e) => return Err(e.into()),
        };

        let fresh = loaded.is_none();
        let store = Self {
            path: target,
            records: RwLock::new(loaded.unwrap_or_default()),
            writer: Mutex::new(()),
        };

        if fresh {
            store.try_flush().await?;
        }

        Ok(store)
    }

    /// Get the record for a group
    pub fn get(&self, group_id: i64) -> Option<InviteLinkRecord> {
        self.records
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&group_id)
            .cloned()
    }

    /// Insert or replace the record for a group
    pub fn put(&self, group_id: i64, record: InviteLinkRecord) {
        debug!(group_id = group_id, expired_at = ?record.expired_at, "Storing invite link record");
        self.records
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(group_id, record);
    }

    /// Remove the record for a group, returning it
    pub fn remove(&self, group_id: i64) -> Option<InviteLinkRecord> {
        debug!(group_id = group_id, "Removing invite link record");
        self.records
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&group_id)
    }

    /// Copy of every record currently held
    pub fn snapshot(&self) -> HashMap<i64, InviteLinkRecord> {
        self.records
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Persist the current state; failures are logged and swallowed
    pub async fn flush(&self) {
        if let Err(e) = self.try_flush().await {
            error!(path = %self.path.display(), error = %e, "Failed to persist invite link store");
        }
    }

    /// Persist the current state, reporting failures
    pub async fn try_flush(&self) -> Result<()> {
        let _writer = self.writer.lock().await;

        // Taken under the writer lock so the last writer always sees the latest state
        let snapshot: BTreeMap<i64, InviteLinkRecord> = self.snapshot().into_iter().collect();
        let serialized = serde_json::to_string_pretty(&snapshot)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }

        let tmp_path = self.path.with_extension("tmp");
        fs::write(&tmp_path, serialized).await?;
        fs::rename(&tmp_path, &self.path).await?;

        debug!(path = %self.path.display(), records = snapshot.len(), "Invite link store persisted");
        Ok(())
    }
}

/// `<file>.<unix-millis>` next to the store document
fn aside_path(path: &Path) -> PathBuf {
    let mut aside = path.as_os_str().to_owned();
    aside.push(format!(".{}", unix_millis(Utc::now())));
    PathBuf::from(aside)
}

/// `<file>.fresh`, used when a corrupt document could not be moved aside
fn fresh_path(path: &Path) -> PathBuf {
    let mut fresh = path.as_os_str().to_owned();
    fresh.push(".fresh");
    PathBuf::from(fresh)
}

/// Move a corrupt document aside, falling back to copying its bytes.
/// Returns whether the content is preserved at `aside`.
async fn quarantine(path: &Path, aside: &Path, content: &[u8]) -> bool {
    match fs::rename(path, aside).await {
        Ok(()) => {
            warn!(from = %path.display(), to = %aside.display(), "Corrupt invite link store moved aside");
            return true;
        }
        Err(e) => warn!(path = %path.display(), error = %e, "Failed to move corrupt invite link store aside, copying it"),
    }

    match fs::write(aside, content).await {
        Ok(()) => {
            warn!(from = %path.display(), to = %aside.display(), "Corrupt invite link store copied aside");
            true
        }
        Err(e) => {
            error!(path = %path.display(), error = %e, "Failed to preserve corrupt invite link store");
            false
        }
    }
}

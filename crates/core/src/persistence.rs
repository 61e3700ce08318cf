//! JSON snapshot persistence shared by the stores
//!
//! A store's backing file holds a single JSON array with every entity of
//! that store. Each mutation rewrites the whole array: it is written to a
//! temporary sibling first and then renamed over the backing file, so a
//! crash mid-write leaves the previous snapshot in place. A snapshot that
//! cannot be parsed is moved aside rather than overwritten.

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::io::AsyncWriteExt;
use tracing::{debug, error, warn};
use uuid::Uuid;

use crate::{Error, Result};

/// Where a store keeps its durable copy
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageMode {
    /// No backing file; state lives as long as the store
    Memory,
    /// Mirror every mutation to the JSON file at this path
    File(PathBuf),
}

impl StorageMode {
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Memory => None,
            Self::File(path) => Some(path),
        }
    }

    /// Load the snapshot for a store, or an empty one.
    ///
    /// A missing file is a fresh store. An unreadable or malformed file is
    /// logged and treated as empty; a malformed one is first renamed to
    /// `<name>.corrupt-<uuid>`.
    pub(crate) async fn load<T: DeserializeOwned>(&self, label: &str) -> Vec<T> {
        match self {
            Self::Memory => Vec::new(),
            Self::File(path) => read_snapshot(path, label).await,
        }
    }

    /// Write the full snapshot. Failures are logged and swallowed: the
    /// in-memory state stays authoritative and is not rolled back.
    pub(crate) async fn flush<T: Serialize>(&self, items: &[T], label: &str) {
        let Self::File(path) = self else {
            return;
        };

        match write_snapshot(path, items).await {
            Ok(()) => debug!(path = %path.display(), count = items.len(), "persisted {}", label),
            Err(err) => error!(
                path = %path.display(),
                error = %err,
                "failed to persist {}; changes are held in memory only",
                label
            ),
        }
    }
}

async fn read_snapshot<T: DeserializeOwned>(path: &Path, label: &str) -> Vec<T> {
    let bytes = match tokio::fs::read(path).await {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "no {} file yet, starting empty", label);
            return Vec::new();
        }
        Err(err) => {
            warn!(
                path = %path.display(),
                error = %err,
                "failed to read {} file, starting with an empty store",
                label
            );
            return Vec::new();
        }
    };

    match serde_json::from_slice::<Vec<T>>(&bytes) {
        Ok(items) => items,
        Err(err) => {
            let kept = quarantine(path).await;
            warn!(
                path = %path.display(),
                kept_as = ?kept.as_ref().map(|p| p.display().to_string()),
                error = %err,
                "failed to parse {} file, starting with an empty store",
                label
            );
            Vec::new()
        }
    }
}

/// Move an unparseable snapshot to `<name>.corrupt-<uuid>` next to it so the
/// next flush does not destroy it.
async fn quarantine(path: &Path) -> Option<PathBuf> {
    let file_name = path.file_name()?.to_string_lossy();
    let target = path.with_file_name(format!(
        "{}.corrupt-{}",
        file_name,
        Uuid::new_v4().as_hyphenated()
    ));

    match tokio::fs::rename(path, &target).await {
        Ok(()) => Some(target),
        Err(err) => {
            error!(
                path = %path.display(),
                error = %err,
                "failed to move malformed snapshot aside; it will be overwritten"
            );
            None
        }
    }
}

/// Atomically replace the file at `path` with `items` as pretty JSON.
pub(crate) async fn write_snapshot<T: Serialize>(path: &Path, items: &[T]) -> Result<()> {
    let content = serde_json::to_vec_pretty(items)?;

    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    tokio::fs::create_dir_all(parent)
        .await
        .map_err(|e| Error::Storage(format!("Failed to create directory: {}", e)))?;

    let temp_path = parent.join(format!(".{}.tmp", Uuid::new_v4().as_hyphenated()));
    if let Err(err) = write_synced(&temp_path, &content).await {
        let _ = tokio::fs::remove_file(&temp_path).await;
        return Err(err.into());
    }

    if let Err(err) = tokio::fs::rename(&temp_path, path).await {
        let _ = tokio::fs::remove_file(&temp_path).await;
        return Err(Error::Storage(format!(
            "Failed to replace {}: {}",
            path.display(),
            err
        )));
    }

    Ok(())
}

async fn write_synced(path: &Path, content: &[u8]) -> std::io::Result<()> {
    let mut file = tokio::fs::File::create(path).await?;
    file.write_all(content).await?;
    file.sync_all().await
}

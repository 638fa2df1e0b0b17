//! Ledger file store.
//!
//! This module provides the `LedgerStore` for loading and persisting the entry ledger as a
//! flat JSON object. Writes follow write-new-then-replace: the snapshot is written and
//! synced to a sibling temporary file which is then renamed over the ledger file, so a crash
//! mid-write leaves the previous snapshot intact.

use std::path::{Path, PathBuf};

use tokio::io::AsyncWriteExt;

use crate::{error::AppError, model::ledger::Ledger};

/// Store providing file operations for the entry ledger.
#[derive(Debug, Clone)]
pub struct LedgerStore {
    path: PathBuf,
}

impl LedgerStore {
    /// Creates a new LedgerStore for the given file path.
    ///
    /// The file does not need to exist yet.
    ///
    /// # Arguments
    /// - `path` - Location of the ledger JSON file
    ///
    /// # Returns
    /// - `LedgerStore` - New store instance
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the ledger from disk.
    ///
    /// A missing file is the pristine state and yields an empty ledger. Zero counts left in
    /// a hand-edited file are dropped with a warning so the in-memory ledger never holds a
    /// present-with-zero entry.
    ///
    /// # Returns
    /// - `Ok(Ledger)` - Loaded ledger, empty if the file does not exist
    /// - `Err(AppError::IoErr)` - The file exists but could not be read
    /// - `Err(AppError::JsonErr)` - The file is not a map of ids to non-negative integers
    pub async fn load(&self) -> Result<Ledger, AppError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(
                    "No ledger found at {}, starting empty",
                    self.path.display()
                );
                return Ok(Ledger::new());
            }
            Err(e) => return Err(e.into()),
        };

        let mut ledger: Ledger = serde_json::from_slice(&bytes)?;

        let dropped = ledger.prune_empty();
        if dropped > 0 {
            tracing::warn!(
                "Dropped {} zero-entry records while loading {}",
                dropped,
                self.path.display()
            );
        }

        tracing::debug!(
            "Loaded {} participants from {}",
            ledger.len(),
            self.path.display()
        );

        Ok(ledger)
    }

    /// Durably overwrites the ledger file with `ledger`.
    ///
    /// # Arguments
    /// - `ledger` - Full snapshot to persist
    ///
    /// # Returns
    /// - `Ok(())` - Snapshot written, synced and moved into place
    /// - `Err(AppError)` - Serialization or I/O failure; the previous file is untouched
    pub async fn save(&self, ledger: &Ledger) -> Result<(), AppError> {
        let contents = serde_json::to_vec_pretty(ledger)?;
        let tmp_path = self.tmp_path();

        if let Err(e) = self.replace_with(&tmp_path, &contents).await {
            let _ = tokio::fs::remove_file(&tmp_path).await;
            return Err(e);
        }

        self.sync_parent().await;

        tracing::debug!(
            "Persisted {} participants to {}",
            ledger.len(),
            self.path.display()
        );

        Ok(())
    }

    async fn replace_with(&self, tmp_path: &Path, contents: &[u8]) -> Result<(), AppError> {
        let mut file = tokio::fs::File::create(tmp_path).await?;
        file.write_all(contents).await?;
        file.sync_all().await?;
        drop(file);

        tokio::fs::rename(tmp_path, &self.path).await?;

        Ok(())
    }

    /// Syncs the ledger's directory so the rename itself is durable.
    ///
    /// The new snapshot is already in place at this point, so a failure is only logged.
    #[cfg(unix)]
    async fn sync_parent(&self) {
        let parent = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let result = match tokio::fs::File::open(parent).await {
            Ok(dir) => dir.sync_all().await,
            Err(e) => Err(e),
        };
        if let Err(e) = result {
            tracing::warn!("Failed to sync directory {}: {}", parent.display(), e);
        }
    }

    #[cfg(not(unix))]
    async fn sync_parent(&self) {}

    /// Deletes the ledger file, returning the store to the never-used state.
    ///
    /// Missing files are not an error. Any temporary file left by an interrupted write is
    /// removed as well.
    ///
    /// # Returns
    /// - `Ok(())` - No ledger file remains
    /// - `Err(AppError::IoErr)` - The file exists but could not be removed
    pub async fn delete(&self) -> Result<(), AppError> {
        for path in [self.path.clone(), self.tmp_path()] {
            match tokio::fs::remove_file(&path).await {
                Ok(()) => {}
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => return Err(e.into()),
            }
        }

        Ok(())
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|name| name.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

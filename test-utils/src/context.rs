use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::error::TestError;

/// File name used for the ledger inside every scratch directory.
pub const LEDGER_FILE_NAME: &str = "participaciones.json";

/// Test context owning an isolated scratch directory for ledger files.
///
/// Every context gets its own directory under the system temp dir so tests can run in
/// parallel without sharing ledger state. The directory and everything in it is removed
/// when the context is dropped.
pub struct TestContext {
    dir: TempDir,
}

impl TestContext {
    /// Creates a new test context with a freshly created scratch directory.
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Context with an empty scratch directory
    /// - `Err(TestError::Io)` - Failed to create the directory
    pub async fn new() -> Result<Self, TestError> {
        let dir = tempfile::Builder::new().prefix("rafflebot-test-").tempdir()?;

        Ok(Self { dir })
    }

    /// Scratch directory owned by this context.
    pub fn dir(&self) -> &Path {
        self.dir.path()
    }

    /// Path of the ledger file inside the scratch directory.
    ///
    /// The file only exists if the builder seeded entries or the code under test wrote it.
    pub fn ledger_path(&self) -> PathBuf {
        self.dir.path().join(LEDGER_FILE_NAME)
    }

    /// Writes a ledger snapshot in the on-disk format (string id keys, integer counts).
    ///
    /// # Arguments
    /// - `entries` - `(user_id, count)` pairs to write
    ///
    /// # Returns
    /// - `Ok(())` - File written
    /// - `Err(TestError)` - Serialization or write failure
    pub async fn write_ledger(&self, entries: &[(u64, u32)]) -> Result<(), TestError> {
        let map: serde_json::Map<String, serde_json::Value> = entries
            .iter()
            .map(|(id, count)| (id.to_string(), serde_json::Value::from(*count)))
            .collect();

        let contents = serde_json::to_vec_pretty(&serde_json::Value::Object(map))?;
        tokio::fs::write(self.ledger_path(), contents).await?;

        Ok(())
    }

    /// Writes raw bytes to the ledger path, for malformed-file scenarios.
    pub async fn write_raw(&self, contents: &str) -> Result<(), TestError> {
        tokio::fs::write(self.ledger_path(), contents).await?;
        Ok(())
    }

    /// Reads the ledger file back as a JSON value, or `None` if it does not exist.
    pub async fn read_ledger(&self) -> Result<Option<serde_json::Value>, TestError> {
        match tokio::fs::read(self.ledger_path()).await {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Returns whether the ledger file currently exists on disk.
    pub fn ledger_exists(&self) -> bool {
        self.ledger_path().exists()
    }
}

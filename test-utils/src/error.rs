use thiserror::Error;

/// Errors that can occur while preparing a test context.
#[derive(Error, Debug)]
pub enum TestError {
    /// Creating the scratch directory or seeding the ledger file failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// The seeded ledger could not be serialized.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

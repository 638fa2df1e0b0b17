use crate::{context::TestContext, error::TestError};

/// Builder for creating test contexts with a pre-seeded ledger file.
///
/// Provides a fluent interface for configuring the on-disk ledger a test starts from.
/// Without any entries the ledger file is left absent, which is the "never used" state.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::builder::TestBuilder;
///
/// let test = TestBuilder::new()
///     .with_entries(&[(111, 3)])
///     .with_entries(&[(222, 1)])
///     .build()
///     .await?;
/// ```
pub struct TestBuilder {
    /// Entries written to the ledger file during `build()`, in insertion order.
    entries: Vec<(u64, u32)>,
}

impl TestBuilder {
    /// Creates a new test builder with no seeded entries.
    ///
    /// # Returns
    /// - New `TestBuilder` instance
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Adds `(user_id, count)` pairs to the seeded ledger.
    ///
    /// # Arguments
    /// - `entries` - Pairs to seed; later pairs for the same id overwrite earlier ones
    ///
    /// # Returns
    /// - `Self` - Builder instance for method chaining
    pub fn with_entries(mut self, entries: &[(u64, u32)]) -> Self {
        self.entries.extend_from_slice(entries);
        self
    }

    /// Builds the test context, creating the scratch directory and the ledger file.
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Initialized context
    /// - `Err(TestError)` - Directory creation or ledger write failed
    pub async fn build(self) -> Result<TestContext, TestError> {
        let context = TestContext::new().await?;

        if !self.entries.is_empty() {
            context.write_ledger(&self.entries).await?;
        }

        Ok(context)
    }
}

impl Default for TestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//! Shared test helpers for the raffle bot.
//!
//! Ledger tests need a real file on disk that no other test touches. `TestBuilder` seeds
//! such a file inside a fresh scratch directory and hands back a `TestContext`, which
//! removes the directory again when dropped. The `serenity` module builds cached-guild
//! objects from JSON for the bot's directory adapter.
//!
//! ```rust,ignore
//! use test_utils::builder::TestBuilder;
//!
//! #[tokio::test]
//! async fn loads_seeded_entries() -> Result<(), TestError> {
//!     let test = TestBuilder::new()
//!         .with_entries(&[(111, 3), (222, 1)])
//!         .build()
//!         .await?;
//!
//!     let store = LedgerStore::new(test.ledger_path());
//!     // ...
//!
//!     Ok(())
//! }
//! ```

pub mod builder;
pub mod context;
pub mod error;
pub mod serenity;

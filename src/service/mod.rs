//! Service layer for business logic and orchestration.
//!
//! This module sits between the bot's command handlers and the data layer. Services are
//! responsible for:
//!
//! - **Ledger**: invariant-preserving entry mutations, serialized and persisted
//! - **Identity**: resolving a typed name to a guild member
//! - **Room**: resolving the voice channel that gates draws and grants
//! - **Draw**: candidate pool validation, weighted selection, reveal and commit

pub mod draw;
pub mod identity;
pub mod ledger;
pub mod room;

#[cfg(test)]
mod test;

//! Domain models shared by the data, service and bot layers.

pub mod directory;
pub mod draw;
pub mod ledger;

//! Persistence layer.
//!
//! Stores hold the durable copy of domain state. The ledger is a single JSON file that is
//! fully rewritten on every mutation; there is no database.

pub mod ledger;

#[cfg(test)]
mod test;

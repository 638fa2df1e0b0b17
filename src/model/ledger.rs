//! In-memory weighted-entry ledger.
//!
//! `Ledger` is the pure data structure behind the raffle: a map from Discord user id to a
//! strictly positive entry count. It enforces the absence-means-zero invariant on every
//! mutation but knows nothing about locking or persistence, which live in
//! `service::ledger::LedgerService` and `data::ledger::LedgerStore`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{command::ArgumentError, AppError};

/// Discord user id (snowflake) used as the ledger key.
pub type UserId = u64;

/// Mapping of user id to entry count.
///
/// Serializes as a flat JSON object with decimal-string keys, e.g.
/// `{"123456789012345678": 4}`. No stored value is ever zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ledger {
    entries: BTreeMap<UserId, u32>,
}

impl Ledger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Entries held by `user_id`, 0 when absent.
    pub fn lookup(&self, user_id: UserId) -> u32 {
        self.entries.get(&user_id).copied().unwrap_or(0)
    }

    /// Adds `count` entries to `user_id`, inserting the user if absent.
    ///
    /// # Arguments
    /// - `user_id` - User receiving the entries
    /// - `count` - Entries to add, must be positive
    ///
    /// # Returns
    /// - `Ok(u32)` - The user's new total
    /// - `Err(AppError::ArgumentErr)` - `count` is not positive or the total would overflow
    pub fn add(&mut self, user_id: UserId, count: i64) -> Result<u32, AppError> {
        let count = positive_count(count)?;
        let current = self.lookup(user_id);
        let total = current
            .checked_add(count)
            .ok_or(ArgumentError::CountTooLarge(i64::from(count)))?;

        self.entries.insert(user_id, total);

        Ok(total)
    }

    /// Removes `count` entries from `user_id`, deleting the key when the total reaches zero.
    ///
    /// The ledger is left untouched on failure.
    ///
    /// # Arguments
    /// - `user_id` - User losing the entries
    /// - `count` - Entries to remove, must be positive
    ///
    /// # Returns
    /// - `Ok(u32)` - The user's new total (0 means the user was removed)
    /// - `Err(AppError::ArgumentErr)` - `count` is not positive
    /// - `Err(AppError::InsufficientEntries)` - The user holds fewer than `count` entries
    pub fn remove(&mut self, user_id: UserId, count: i64) -> Result<u32, AppError> {
        let count = positive_count(count)?;
        let held = self.lookup(user_id);

        if held < count {
            return Err(AppError::InsufficientEntries {
                held,
                requested: count,
            });
        }

        let total = held - count;
        if total == 0 {
            self.entries.remove(&user_id);
        } else {
            self.entries.insert(user_id, total);
        }

        Ok(total)
    }

    /// Adds exactly one entry to every id yielded, absent ids becoming 1.
    ///
    /// # Returns
    /// - `usize` - Number of users that received an entry
    pub fn grant_one<I>(&mut self, user_ids: I) -> usize
    where
        I: IntoIterator<Item = UserId>,
    {
        let mut granted = 0;

        for user_id in user_ids {
            let slot = self.entries.entry(user_id).or_insert(0);
            *slot = slot.saturating_add(1);
            granted += 1;
        }

        granted
    }

    /// Iterates over `(user_id, count)` pairs in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = (UserId, u32)> + '_ {
        self.entries.iter().map(|(id, count)| (*id, *count))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drops any zero-valued entries, returning how many were removed.
    ///
    /// Only needed after deserializing a file that was edited by hand.
    pub(crate) fn prune_empty(&mut self) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, count| *count > 0);
        before - self.entries.len()
    }
}

impl FromIterator<(UserId, u32)> for Ledger {
    fn from_iter<T: IntoIterator<Item = (UserId, u32)>>(iter: T) -> Self {
        let mut ledger = Self {
            entries: iter.into_iter().collect(),
        };
        ledger.prune_empty();
        ledger
    }
}

fn positive_count(count: i64) -> Result<u32, ArgumentError> {
    if count <= 0 {
        return Err(ArgumentError::InvalidCount(count));
    }

    u32::try_from(count).map_err(|_| ArgumentError::CountTooLarge(count))
}

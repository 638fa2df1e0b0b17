//! Ledger service owning the single in-memory ledger and its durable copy.
//!
//! `LedgerService` is constructed once at startup from the ledger file and shared by every
//! handler through `AppState`. All mutations are serialized behind one write guard which is
//! held across the persistence write, so add, remove, grant, clear and draw commit can never
//! interleave. Each mutation is applied to a copy first and only swapped in once the copy has
//! been written to disk, leaving memory and file untouched when the write fails.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::{
    data::ledger::LedgerStore,
    error::AppError,
    model::{
        directory::{DirectoryMember, MemberDirectory},
        ledger::{Ledger, UserId},
    },
};

#[derive(Clone)]
pub struct LedgerService {
    ledger: Arc<RwLock<Ledger>>,
    store: LedgerStore,
}

impl LedgerService {
    /// Loads the ledger from `store` and wraps it in a shareable service.
    ///
    /// # Arguments
    /// - `store` - File store holding the durable ledger
    ///
    /// # Returns
    /// - `Ok(LedgerService)` - Service ready for use, empty if no file existed
    /// - `Err(AppError)` - The ledger file exists but could not be read or parsed
    pub async fn open(store: LedgerStore) -> Result<Self, AppError> {
        let ledger = store.load().await?;

        tracing::info!(
            "Loaded ledger with {} participants from {}",
            ledger.len(),
            store.path().display()
        );

        Ok(Self {
            ledger: Arc::new(RwLock::new(ledger)),
            store,
        })
    }

    /// Entries held by `user_id`, 0 when absent.
    pub async fn lookup(&self, user_id: UserId) -> u32 {
        self.ledger.read().await.lookup(user_id)
    }

    /// Consistent copy of the whole ledger.
    pub async fn snapshot(&self) -> Ledger {
        self.ledger.read().await.clone()
    }

    /// Adds `count` entries to `user_id` and persists.
    ///
    /// # Returns
    /// - `Ok(u32)` - The user's new total
    /// - `Err(AppError::ArgumentErr)` - `count` is not positive
    /// - `Err(AppError)` - Persisting failed; nothing was changed
    pub async fn add(&self, user_id: UserId, count: i64) -> Result<u32, AppError> {
        let total = self.mutate(|ledger| ledger.add(user_id, count)).await?;

        tracing::info!("Added {} entries to {} (total {})", count, user_id, total);

        Ok(total)
    }

    /// Removes `count` entries from `user_id` and persists.
    ///
    /// # Returns
    /// - `Ok(u32)` - The user's new total, 0 meaning the user was removed
    /// - `Err(AppError::ArgumentErr)` - `count` is not positive
    /// - `Err(AppError::InsufficientEntries)` - The user holds fewer than `count` entries
    /// - `Err(AppError)` - Persisting failed; nothing was changed
    pub async fn remove(&self, user_id: UserId, count: i64) -> Result<u32, AppError> {
        let total = self.mutate(|ledger| ledger.remove(user_id, count)).await?;

        tracing::info!(
            "Removed {} entries from {} (total {})",
            count,
            user_id,
            total
        );

        Ok(total)
    }

    /// Removes every entry `user_id` holds and persists.
    ///
    /// Used by draw commit. The holding is read under the same write guard as the removal,
    /// so entries added after the draw was validated are removed too.
    ///
    /// # Returns
    /// - `Ok(u32)` - Entries removed, 0 when the user held none (nothing is written)
    /// - `Err(AppError)` - Persisting failed; nothing was changed
    pub async fn remove_all(&self, user_id: UserId) -> Result<u32, AppError> {
        let removed = self
            .mutate(|ledger| {
                let held = ledger.lookup(user_id);
                if held > 0 {
                    ledger.remove(user_id, i64::from(held))?;
                }
                Ok(held)
            })
            .await?;

        tracing::info!("Removed all {} entries from {}", removed, user_id);

        Ok(removed)
    }

    /// Adds one entry to every non-bot member yielded and persists once.
    ///
    /// # Arguments
    /// - `members` - Members present in the grant room
    ///
    /// # Returns
    /// - `Ok(usize)` - Number of members that received an entry
    /// - `Err(AppError)` - Persisting failed; nothing was changed
    pub async fn grant_room<'a, I>(&self, members: I) -> Result<usize, AppError>
    where
        I: IntoIterator<Item = &'a DirectoryMember>,
    {
        let user_ids: Vec<UserId> = members
            .into_iter()
            .filter(|member| !member.bot)
            .map(|member| member.id)
            .collect();

        let granted = self
            .mutate(move |ledger| Ok(ledger.grant_one(user_ids)))
            .await?;

        tracing::info!("Granted one entry to {} members", granted);

        Ok(granted)
    }

    /// Empties the ledger and deletes its file.
    ///
    /// # Returns
    /// - `Ok(())` - Ledger empty and no file on disk
    /// - `Err(AppError::IoErr)` - The file could not be removed; memory is left untouched
    pub async fn clear_all(&self) -> Result<(), AppError> {
        let mut ledger = self.ledger.write().await;

        self.store.delete().await?;
        *ledger = Ledger::new();

        tracing::info!("Cleared all entries");

        Ok(())
    }

    /// Lists `(display_name, count)` for every participant still in the guild.
    ///
    /// Sorted by display name ascending, compared case-insensitively. Participants the
    /// directory no longer knows are omitted.
    pub async fn list_all<D>(&self, directory: &D) -> Vec<(String, u32)>
    where
        D: MemberDirectory + ?Sized,
    {
        let ledger = self.ledger.read().await;

        let mut listing: Vec<(String, u32)> = ledger
            .iter()
            .filter_map(|(user_id, count)| {
                directory
                    .display_name(user_id)
                    .map(|name| (name.to_string(), count))
            })
            .collect();

        listing.sort_by(|(a, _), (b, _)| a.to_lowercase().cmp(&b.to_lowercase()).then(a.cmp(b)));

        listing
    }

    /// Writes the current ledger to disk, used for the final flush on shutdown.
    ///
    /// Skips the write when the ledger is empty so a cleared ledger stays deleted.
    pub async fn flush(&self) -> Result<(), AppError> {
        let ledger = self.ledger.read().await;

        if ledger.is_empty() {
            return Ok(());
        }

        self.store.save(&ledger).await
    }

    async fn mutate<T, F>(&self, f: F) -> Result<T, AppError>
    where
        F: FnOnce(&mut Ledger) -> Result<T, AppError>,
    {
        let mut ledger = self.ledger.write().await;

        let mut next = ledger.clone();
        let output = f(&mut next)?;

        if next != *ledger {
            self.store.save(&next).await?;
            *ledger = next;
        }

        Ok(output)
    }
}

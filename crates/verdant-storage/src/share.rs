//! Share storage - persisted role grants with atomic uniqueness.
//!
//! Shares are scanned, not indexed: grants per user number in the tens,
//! not the millions, and redb iteration over a single table is cheap at
//! that scale.

use anyhow::Result;
use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition};
use std::sync::Arc;
use verdant_models::Share;
use verdant_traits::ShareStore;

pub const SHARE_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("shares");

/// Typed share storage.
#[derive(Debug, Clone)]
pub struct ShareStorage {
    db: Arc<Database>,
}

impl ShareStorage {
    pub fn new(db: Arc<Database>) -> Result<Self> {
        let write_txn = db.begin_write()?;
        write_txn.open_table(SHARE_TABLE)?;
        write_txn.commit()?;

        Ok(Self { db })
    }

    pub fn get(&self, id: &str) -> Result<Option<Share>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(SHARE_TABLE)?;

        if let Some(value) = table.get(id)? {
            Ok(Some(serde_json::from_slice(value.value())?))
        } else {
            Ok(None)
        }
    }

    /// Insert unless a share for the same (owner, grantee, entity)
    /// triple exists. The duplicate scan and the insert run inside one
    /// write transaction; redb serializes writers, so two racing
    /// creates cannot both pass the scan. Returns false on duplicate.
    pub fn insert_unique(&self, share: &Share) -> Result<bool> {
        let write_txn = self.db.begin_write()?;
        let inserted = {
            let mut table = write_txn.open_table(SHARE_TABLE)?;

            let mut duplicate = false;
            for item in table.iter()? {
                let (_, value) = item?;
                let existing: Share = serde_json::from_slice(value.value())?;
                if existing.duplicates(share) {
                    duplicate = true;
                    break;
                }
            }

            if duplicate {
                false
            } else {
                let bytes = serde_json::to_vec(share)?;
                table.insert(share.id.as_str(), bytes.as_slice())?;
                true
            }
        };
        write_txn.commit()?;
        Ok(inserted)
    }

    pub fn update(&self, share: &Share) -> Result<()> {
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(SHARE_TABLE)?;
            let bytes = serde_json::to_vec(share)?;
            table.insert(share.id.as_str(), bytes.as_slice())?;
        }
        write_txn.commit()?;
        Ok(())
    }

    pub fn delete(&self, id: &str) -> Result<bool> {
        let write_txn = self.db.begin_write()?;
        let existed = {
            let mut table = write_txn.open_table(SHARE_TABLE)?;
            table.remove(id)?.is_some()
        };
        write_txn.commit()?;
        Ok(existed)
    }

    fn scan<F>(&self, mut keep: F) -> Result<Vec<Share>>
    where
        F: FnMut(&Share) -> bool,
    {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(SHARE_TABLE)?;

        let mut shares = Vec::new();
        for item in table.iter()? {
            let (_, value) = item?;
            let share: Share = serde_json::from_slice(value.value())?;
            if keep(&share) {
                shares.push(share);
            }
        }
        Ok(shares)
    }

    /// Delete every share matching the predicate, in one transaction.
    fn delete_where<F>(&self, keep: F) -> Result<usize>
    where
        F: Fn(&Share) -> bool,
    {
        let write_txn = self.db.begin_write()?;
        let removed = {
            let mut table = write_txn.open_table(SHARE_TABLE)?;

            let mut doomed = Vec::new();
            for item in table.iter()? {
                let (key, value) = item?;
                let share: Share = serde_json::from_slice(value.value())?;
                if keep(&share) {
                    doomed.push(key.value().to_string());
                }
            }

            for id in &doomed {
                table.remove(id.as_str())?;
            }
            doomed.len()
        };
        write_txn.commit()?;
        Ok(removed)
    }
}

impl ShareStore for ShareStorage {
    fn get_share(&self, id: &str) -> Result<Option<Share>> {
        self.get(id)
    }

    fn insert_share_unique(&self, share: &Share) -> Result<bool> {
        self.insert_unique(share)
    }

    fn update_share(&self, share: &Share) -> Result<()> {
        self.update(share)
    }

    fn delete_share(&self, id: &str) -> Result<bool> {
        self.delete(id)
    }

    fn list_shares_by_owner(&self, owner_id: &str) -> Result<Vec<Share>> {
        self.scan(|share| share.owner_id == owner_id)
    }

    fn list_shares_by_grantee(&self, user_id: &str) -> Result<Vec<Share>> {
        self.scan(|share| share.shared_with_user_id == user_id)
    }

    fn find_plant_share(&self, plant_id: &str, user_id: &str) -> Result<Option<Share>> {
        Ok(self
            .scan(|share| {
                share.shared_with_user_id == user_id && share.plant_id.as_deref() == Some(plant_id)
            })?
            .into_iter()
            .next())
    }

    fn find_location_share(&self, location_id: &str, user_id: &str) -> Result<Option<Share>> {
        Ok(self
            .scan(|share| {
                share.shared_with_user_id == user_id
                    && share.location_id.as_deref() == Some(location_id)
            })?
            .into_iter()
            .next())
    }

    fn find_collection_share(&self, owner_id: &str, user_id: &str) -> Result<Option<Share>> {
        Ok(self
            .scan(|share| {
                share.owner_id == owner_id
                    && share.shared_with_user_id == user_id
                    && share.plant_id.is_none()
                    && share.location_id.is_none()
            })?
            .into_iter()
            .next())
    }

    fn delete_shares_for_plant(&self, plant_id: &str) -> Result<usize> {
        self.delete_where(|share| share.plant_id.as_deref() == Some(plant_id))
    }

    fn delete_shares_for_location(&self, location_id: &str) -> Result<usize> {
        self.delete_where(|share| share.location_id.as_deref() == Some(location_id))
    }
}

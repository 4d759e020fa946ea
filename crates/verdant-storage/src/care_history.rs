//! Care history storage - append-only watering/fertilization events and
//! pictures.
//!
//! Keys are `{plant_id}:{zero-padded millis}:{record_id}`, so prefix
//! iteration over a plant id yields its history already ordered by
//! time. Appends never overwrite: the record id suffix keeps two events
//! in the same millisecond distinct.

use anyhow::Result;
use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition};
use std::sync::Arc;
use verdant_models::{CareEvent, Picture};
use verdant_traits::CareHistoryStore;

pub const CARE_EVENT_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("care_events");
pub const PICTURE_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("pictures");

fn history_key(plant_id: &str, timestamp: i64, record_id: &str) -> String {
    format!("{}:{:020}:{}", plant_id, timestamp, record_id)
}

fn plant_prefix(plant_id: &str) -> String {
    format!("{}:", plant_id)
}

/// Typed care history storage.
#[derive(Debug, Clone)]
pub struct CareHistoryStorage {
    db: Arc<Database>,
}

impl CareHistoryStorage {
    pub fn new(db: Arc<Database>) -> Result<Self> {
        let write_txn = db.begin_write()?;
        write_txn.open_table(CARE_EVENT_TABLE)?;
        write_txn.open_table(PICTURE_TABLE)?;
        write_txn.commit()?;

        Ok(Self { db })
    }

    fn append(
        &self,
        table_def: TableDefinition<&str, &[u8]>,
        key: &str,
        bytes: &[u8],
    ) -> Result<()> {
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(table_def)?;
            table.insert(key, bytes)?;
        }
        write_txn.commit()?;
        Ok(())
    }

    fn list_bytes(
        &self,
        table_def: TableDefinition<&str, &[u8]>,
        plant_id: &str,
    ) -> Result<Vec<Vec<u8>>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(table_def)?;
        let prefix = plant_prefix(plant_id);

        let mut items = Vec::new();
        for item in table.iter()? {
            let (key, value) = item?;
            if key.value().starts_with(&prefix) {
                items.push(value.value().to_vec());
            }
        }
        Ok(items)
    }

    fn delete_prefixed(
        &self,
        table_def: TableDefinition<&str, &[u8]>,
        plant_id: &str,
    ) -> Result<usize> {
        let write_txn = self.db.begin_write()?;
        let removed = {
            let mut table = write_txn.open_table(table_def)?;
            let prefix = plant_prefix(plant_id);

            let mut doomed = Vec::new();
            for item in table.iter()? {
                let (key, _) = item?;
                if key.value().starts_with(&prefix) {
                    doomed.push(key.value().to_string());
                }
            }

            for key in &doomed {
                table.remove(key.as_str())?;
            }
            doomed.len()
        };
        write_txn.commit()?;
        Ok(removed)
    }
}

impl CareHistoryStore for CareHistoryStorage {
    fn append_event(&self, event: &CareEvent) -> Result<()> {
        let key = history_key(&event.plant_id, event.timestamp, &event.id);
        let bytes = serde_json::to_vec(event)?;
        self.append(CARE_EVENT_TABLE, &key, &bytes)
    }

    fn list_events(&self, plant_id: &str) -> Result<Vec<CareEvent>> {
        let mut events = Vec::new();
        for bytes in self.list_bytes(CARE_EVENT_TABLE, plant_id)? {
            events.push(serde_json::from_slice(&bytes)?);
        }
        Ok(events)
    }

    fn append_picture(&self, picture: &Picture) -> Result<()> {
        let key = history_key(&picture.plant_id, picture.timestamp, &picture.id);
        let bytes = serde_json::to_vec(picture)?;
        self.append(PICTURE_TABLE, &key, &bytes)
    }

    fn list_pictures(&self, plant_id: &str) -> Result<Vec<Picture>> {
        let mut pictures = Vec::new();
        for bytes in self.list_bytes(PICTURE_TABLE, plant_id)? {
            pictures.push(serde_json::from_slice(&bytes)?);
        }
        Ok(pictures)
    }

    fn latest_picture(&self, plant_id: &str) -> Result<Option<Picture>> {
        // Keys are time-ordered within the plant prefix, so the last
        // entry is the newest.
        Ok(self.list_pictures(plant_id)?.pop())
    }

    fn delete_history_for_plant(&self, plant_id: &str) -> Result<usize> {
        let events = self.delete_prefixed(CARE_EVENT_TABLE, plant_id)?;
        let pictures = self.delete_prefixed(PICTURE_TABLE, plant_id)?;
        Ok(events + pictures)
    }
}

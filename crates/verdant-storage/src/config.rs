//! System configuration storage.

use anyhow::Result;
use redb::{Database, ReadableDatabase, TableDefinition};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

const CONFIG_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("system_config");

// Default configuration constants
const DEFAULT_TODO_HORIZON_HOURS: u32 = 24;
const DEFAULT_LOCATION_NAME: &str = "Home";
const MIN_HORIZON_HOURS: u32 = 1;
const MAX_HORIZON_HOURS: u32 = 24 * 365; // a year out is already noise

/// System configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemConfig {
    /// Horizon applied when a todo query does not name one.
    pub default_todo_horizon_hours: u32,
    /// Name given to the default location created for new users.
    pub default_location_name: String,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            default_todo_horizon_hours: DEFAULT_TODO_HORIZON_HOURS,
            default_location_name: DEFAULT_LOCATION_NAME.to_string(),
        }
    }
}

impl SystemConfig {
    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.default_todo_horizon_hours < MIN_HORIZON_HOURS {
            return Err(anyhow::anyhow!(
                "Todo horizon must be at least {} hour",
                MIN_HORIZON_HOURS
            ));
        }

        if self.default_todo_horizon_hours > MAX_HORIZON_HOURS {
            return Err(anyhow::anyhow!(
                "Todo horizon must be at most {} hours",
                MAX_HORIZON_HOURS
            ));
        }

        if self.default_location_name.trim().is_empty() {
            return Err(anyhow::anyhow!("Default location name must not be empty"));
        }

        Ok(())
    }
}

const CONFIG_KEY: &str = "system";

/// Storage for the single system configuration record.
#[derive(Debug, Clone)]
pub struct ConfigStorage {
    db: Arc<Database>,
}

impl ConfigStorage {
    pub fn new(db: Arc<Database>) -> Result<Self> {
        let write_txn = db.begin_write()?;
        write_txn.open_table(CONFIG_TABLE)?;
        write_txn.commit()?;

        Ok(Self { db })
    }

    /// Load the stored config, falling back to defaults when unset.
    pub fn get(&self) -> Result<SystemConfig> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(CONFIG_TABLE)?;

        if let Some(value) = table.get(CONFIG_KEY)? {
            Ok(serde_json::from_slice(value.value())?)
        } else {
            Ok(SystemConfig::default())
        }
    }

    /// Validate and persist a new config.
    pub fn set(&self, config: &SystemConfig) -> Result<()> {
        config.validate()?;

        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(CONFIG_TABLE)?;
            let bytes = serde_json::to_vec(config)?;
            table.insert(CONFIG_KEY, bytes.as_slice())?;
        }
        write_txn.commit()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults_when_unset() {
        let temp_dir = tempdir().unwrap();
        let db = Arc::new(Database::create(temp_dir.path().join("test.db")).unwrap());
        let storage = ConfigStorage::new(db).unwrap();

        let config = storage.get().unwrap();
        assert_eq!(config.default_todo_horizon_hours, 24);
    }

    #[test]
    fn test_set_rejects_invalid() {
        let temp_dir = tempdir().unwrap();
        let db = Arc::new(Database::create(temp_dir.path().join("test.db")).unwrap());
        let storage = ConfigStorage::new(db).unwrap();

        let mut config = SystemConfig::default();
        config.default_todo_horizon_hours = 0;
        assert!(storage.set(&config).is_err());

        config.default_todo_horizon_hours = 48;
        storage.set(&config).unwrap();
        assert_eq!(storage.get().unwrap().default_todo_horizon_hours, 48);
    }
}

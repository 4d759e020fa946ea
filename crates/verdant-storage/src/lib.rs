//! Verdant Storage - Embedded persistence layer
//!
//! This crate provides the persistence layer for Verdant, using redb as
//! the embedded database. Each entity type gets its own table; records
//! are serde_json-encoded models from verdant-models, and every storage
//! type implements the corresponding verdant-traits store trait.
//!
//! # Tables
//!
//! - `plants` - Plant records
//! - `locations` - Location records
//! - `species` - Species and their care intervals
//! - `users` - User identities
//! - `shares` - Role grants (uniqueness enforced in-transaction)
//! - `care_events` / `pictures` - Append-only care history
//! - `system_config` - System configuration

pub mod care_history;
pub mod config;
pub mod location;
pub mod plant;
pub mod share;
pub mod species;
pub mod user;

mod table_storage;

use anyhow::Result;
use redb::Database;
use std::sync::Arc;

pub use care_history::CareHistoryStorage;
pub use config::{ConfigStorage, SystemConfig};
pub use location::LocationStorage;
pub use plant::PlantStorage;
pub use share::ShareStorage;
pub use species::SpeciesStorage;
pub use table_storage::TableStorage;
pub use user::UserStorage;

/// Central storage manager that initializes all storage subsystems
pub struct Storage {
    db: Arc<Database>,
    pub plants: PlantStorage,
    pub locations: LocationStorage,
    pub species: SpeciesStorage,
    pub users: UserStorage,
    pub shares: ShareStorage,
    pub care_history: CareHistoryStorage,
    pub config: ConfigStorage,
}

impl Storage {
    /// Create a new storage instance at the given path.
    ///
    /// This will create the database file if it doesn't exist and
    /// initialize all required tables.
    pub fn new(path: &str) -> Result<Self> {
        let db = Arc::new(Database::create(path)?);
        tracing::debug!(path, "Opened storage database");

        let plants = PlantStorage::new(db.clone())?;
        let locations = LocationStorage::new(db.clone())?;
        let species = SpeciesStorage::new(db.clone())?;
        let users = UserStorage::new(db.clone())?;
        let shares = ShareStorage::new(db.clone())?;
        let care_history = CareHistoryStorage::new(db.clone())?;
        let config = ConfigStorage::new(db.clone())?;

        Ok(Self {
            db,
            plants,
            locations,
            species,
            users,
            shares,
            care_history,
            config,
        })
    }

    /// Get a reference to the underlying database
    pub fn get_db(&self) -> Arc<Database> {
        self.db.clone()
    }
}

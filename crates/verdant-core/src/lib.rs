//! Verdant Core - Access-control resolution and care scheduling.
//!
//! The engine behind a multi-user plant-care tracker: it decides what
//! an authenticated caller may do with a plant or location once
//! ownership, per-entity shares and location-level shares are combined,
//! and computes when each plant's next care action falls due.
//!
//! Transport, authentication and blob storage live elsewhere; every
//! operation here takes an already-authenticated caller id and returns
//! either a result or a [`verdant_traits::CoreError`].

pub mod services;

use std::sync::Arc;
use tracing::info;
use verdant_storage::Storage;

/// Shared application state handed to every service function.
pub struct AppCore {
    pub storage: Arc<Storage>,
}

impl AppCore {
    pub async fn new(db_path: &str) -> anyhow::Result<Self> {
        let storage = Arc::new(Storage::new(db_path)?);

        // Surface a corrupt stored config at startup instead of on the
        // first todo query.
        storage.config.get()?.validate()?;

        info!("Initializing Verdant");

        Ok(Self { storage })
    }
}

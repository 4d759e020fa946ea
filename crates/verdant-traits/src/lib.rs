//! Verdant Traits - Shared trait definitions and core abstractions.
//!
//! This crate provides the interfaces used across the Verdant workspace:
//! - CoreError and the caller-visible error taxonomy
//! - Store traits (PlantStore, LocationStore, SpeciesStore, UserStore,
//!   ShareStore, CareHistoryStore)
//!
//! The engine consumes stores through these traits; implementations are
//! provided by downstream crates (e.g., verdant-storage).

pub mod error;
pub mod store;

// ── Top-level re-exports ─────────────────────────────────────────────

pub use error::{CoreError, Result};
pub use store::{
    CareHistoryStore, LocationStore, PlantStore, ShareStore, SpeciesStore, UserStore,
};

//! Verdant Models - Shared domain model primitives.
//!
//! This crate provides the data types used across the Verdant workspace:
//! - Role and Capability (the permission lattice)
//! - Share, ShareView and the share lifecycle request structs
//! - Plant, Location, Species, User
//! - Care history records (watering, fertilization, pictures)
//! - TodoItem and its sharing annotation
//!
//! Ids are UUIDv4 strings; timestamps are Unix milliseconds (i64).

pub mod care;
pub mod location;
pub mod plant;
pub mod role;
pub mod share;
pub mod species;
pub mod todo;
pub mod user;

// ── Top-level re-exports ─────────────────────────────────────────────

pub use care::{CareEvent, CareEventKind, Picture};
pub use location::Location;
pub use plant::Plant;
pub use role::{Capability, Role};
pub use share::{CreateShareRequest, Share, ShareTargetKind, ShareView, UpdateShareRequest};
pub use species::Species;
pub use todo::{SharingContext, TodoItem};
pub use user::{User, UserSummary};

/// Current time as Unix milliseconds.
pub fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Milliseconds in one day, used for interval arithmetic.
pub const MS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Milliseconds in one hour, used for todo horizons.
pub const MS_PER_HOUR: i64 = 60 * 60 * 1000;

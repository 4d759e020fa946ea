//! Store trait abstractions for the engine.
//!
//! These traits define the persistence interfaces the engine requires.
//! Implementations are provided by downstream crates (e.g.,
//! verdant-storage). They return `anyhow::Result`: a failing store call
//! is a storage fault, not part of the caller-visible taxonomy — the
//! service layer translates.
//!
//! All reads are point queries or owner/grantee scans; there is no
//! cross-call ordering guarantee. `ShareStore::insert_unique` is the
//! one atomic compound operation (see its docs).

use anyhow::Result;

use verdant_models::{CareEvent, Location, Picture, Plant, Share, Species, User};

// ── PlantStore ───────────────────────────────────────────────────────

pub trait PlantStore: Send + Sync {
    fn get_plant(&self, id: &str) -> Result<Option<Plant>>;
    fn list_plants_by_owner(&self, owner_id: &str) -> Result<Vec<Plant>>;
    fn list_plants_in_location(&self, location_id: &str) -> Result<Vec<Plant>>;
    fn put_plant(&self, plant: &Plant) -> Result<()>;
    /// Returns false if the plant did not exist.
    fn delete_plant(&self, id: &str) -> Result<bool>;
}

// ── LocationStore ────────────────────────────────────────────────────

pub trait LocationStore: Send + Sync {
    fn get_location(&self, id: &str) -> Result<Option<Location>>;
    fn list_locations_by_owner(&self, owner_id: &str) -> Result<Vec<Location>>;
    fn find_default_location(&self, owner_id: &str) -> Result<Option<Location>>;
    fn put_location(&self, location: &Location) -> Result<()>;
    fn delete_location(&self, id: &str) -> Result<bool>;
}

// ── SpeciesStore ─────────────────────────────────────────────────────

pub trait SpeciesStore: Send + Sync {
    fn get_species(&self, id: &str) -> Result<Option<Species>>;
    fn list_species_by_owner(&self, owner_id: &str) -> Result<Vec<Species>>;
    fn put_species(&self, species: &Species) -> Result<()>;
    fn delete_species(&self, id: &str) -> Result<bool>;
}

// ── UserStore ────────────────────────────────────────────────────────

/// Identity lookups. The engine never authenticates; it resolves users
/// for grantee lookup and display annotation only.
pub trait UserStore: Send + Sync {
    fn get_user(&self, id: &str) -> Result<Option<User>>;
    fn find_user_by_email(&self, email: &str) -> Result<Option<User>>;
    fn put_user(&self, user: &User) -> Result<()>;
}

// ── ShareStore ───────────────────────────────────────────────────────

pub trait ShareStore: Send + Sync {
    fn get_share(&self, id: &str) -> Result<Option<Share>>;

    /// Insert unless an equivalent share (same owner, grantee, entity)
    /// already exists. Returns false on duplicate, in which case
    /// nothing was written. The check and the insert must be atomic
    /// with respect to concurrent inserts: this is the enforcement
    /// point for share uniqueness, the service-level duplicate check is
    /// only a fast path.
    fn insert_share_unique(&self, share: &Share) -> Result<bool>;

    fn update_share(&self, share: &Share) -> Result<()>;
    fn delete_share(&self, id: &str) -> Result<bool>;

    fn list_shares_by_owner(&self, owner_id: &str) -> Result<Vec<Share>>;
    fn list_shares_by_grantee(&self, user_id: &str) -> Result<Vec<Share>>;

    /// Direct plant share received by `user_id`, if any.
    fn find_plant_share(&self, plant_id: &str, user_id: &str) -> Result<Option<Share>>;
    /// Direct location share received by `user_id`, if any.
    fn find_location_share(&self, location_id: &str, user_id: &str) -> Result<Option<Share>>;
    /// Collection-level share from `owner_id` to `user_id`, if any.
    fn find_collection_share(&self, owner_id: &str, user_id: &str) -> Result<Option<Share>>;

    /// Cascade helpers for entity deletion. Return the number removed.
    fn delete_shares_for_plant(&self, plant_id: &str) -> Result<usize>;
    fn delete_shares_for_location(&self, location_id: &str) -> Result<usize>;
}

// ── CareHistoryStore ─────────────────────────────────────────────────

/// Append-only care history. Events and pictures are separate records;
/// both are returned ordered by timestamp ascending.
pub trait CareHistoryStore: Send + Sync {
    fn append_event(&self, event: &CareEvent) -> Result<()>;
    fn list_events(&self, plant_id: &str) -> Result<Vec<CareEvent>>;

    fn append_picture(&self, picture: &Picture) -> Result<()>;
    fn list_pictures(&self, plant_id: &str) -> Result<Vec<Picture>>;
    fn latest_picture(&self, plant_id: &str) -> Result<Option<Picture>>;

    /// Cascade helper for plant deletion. Returns the number removed.
    fn delete_history_for_plant(&self, plant_id: &str) -> Result<usize>;
}

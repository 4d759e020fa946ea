use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A place holding zero or more plants, owned by exactly one user.
///
/// Exactly one location per user carries `is_default`; it cannot be
/// deleted, and plants losing their location on a cascade become
/// location-less rather than orphaned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Location {
    pub id: String,
    pub owner_id: String,
    pub name: String,
    #[serde(default)]
    pub is_default: bool,
    pub created_at: i64,
}

impl Location {
    pub fn new(owner_id: String, name: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            owner_id,
            name,
            is_default: false,
            created_at: crate::now_ms(),
        }
    }

    pub fn new_default(owner_id: String, name: String) -> Self {
        let mut location = Self::new(owner_id, name);
        location.is_default = true;
        location
    }
}

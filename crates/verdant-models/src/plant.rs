use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A plant owned by exactly one user.
///
/// `location_id`, when set, must point at a location owned by the same
/// user. `added_at` is the acquisition date and anchors the first due
/// date of a never-cared-for plant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Plant {
    pub id: String,
    pub owner_id: String,
    pub name: String,
    #[serde(default)]
    pub species_id: Option<String>,
    #[serde(default)]
    pub location_id: Option<String>,
    pub added_at: i64,
    pub created_at: i64,
}

impl Plant {
    pub fn new(
        owner_id: String,
        name: String,
        species_id: Option<String>,
        location_id: Option<String>,
    ) -> Self {
        let now = crate::now_ms();
        Self {
            id: Uuid::new_v4().to_string(),
            owner_id,
            name,
            species_id,
            location_id,
            added_at: now,
            created_at: now,
        }
    }

    /// Backdate the acquisition timestamp (plants are often recorded
    /// some time after they were actually acquired).
    pub fn with_added_at(mut self, added_at: i64) -> Self {
        self.added_at = added_at;
        self
    }
}

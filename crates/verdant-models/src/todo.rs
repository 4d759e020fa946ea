use crate::care::CareEventKind;
use crate::role::Role;
use serde::{Deserialize, Serialize};

/// Why a plant someone else owns shows up in the caller's todo list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SharingContext {
    /// The caller's resolved role on the plant.
    pub role: Role,
    pub owner_id: String,
    pub owner_name: String,
}

/// One due or overdue care action, surfaced across owned and shared
/// plants. A plant contributes zero, one or two of these depending on
/// which schedules its species defines.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TodoItem {
    pub plant_id: String,
    pub plant_name: String,
    pub species_name: String,
    pub action: CareEventKind,
    pub due_at: i64,
    #[serde(default)]
    pub latest_picture: Option<String>,
    /// Present only for plants the caller does not own.
    #[serde(default)]
    pub sharing: Option<SharingContext>,
}

impl TodoItem {
    pub fn is_shared(&self) -> bool {
        self.sharing.is_some()
    }

    /// Overdue relative to the supplied clock.
    pub fn is_overdue(&self, now_ms: i64) -> bool {
        self.due_at < now_ms
    }
}

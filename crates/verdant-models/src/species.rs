use crate::care::CareEventKind;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A species defines the care schedule for the plants assigned to it.
///
/// Either interval may be absent, meaning the species has no schedule
/// for that action and the action is never "due".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Species {
    pub id: String,
    pub owner_id: String,
    pub name: String,
    #[serde(default)]
    pub watering_interval_days: Option<u32>,
    #[serde(default)]
    pub fertilization_interval_days: Option<u32>,
    pub created_at: i64,
}

impl Species {
    pub fn new(
        owner_id: String,
        name: String,
        watering_interval_days: Option<u32>,
        fertilization_interval_days: Option<u32>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            owner_id,
            name,
            watering_interval_days,
            fertilization_interval_days,
            created_at: crate::now_ms(),
        }
    }

    /// The configured interval for a care action, if any.
    pub fn interval_days_for(&self, kind: CareEventKind) -> Option<u32> {
        match kind {
            CareEventKind::Watering => self.watering_interval_days,
            CareEventKind::Fertilization => self.fertilization_interval_days,
        }
    }
}

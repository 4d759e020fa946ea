use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The two scheduled care actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CareEventKind {
    Watering,
    Fertilization,
}

impl CareEventKind {
    pub fn as_str(self) -> &'static str {
        match self {
            CareEventKind::Watering => "watering",
            CareEventKind::Fertilization => "fertilization",
        }
    }
}

impl std::fmt::Display for CareEventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One recorded watering or fertilization. History is append-only;
/// each event is a distinct fact, concurrent carers both persist.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CareEvent {
    pub id: String,
    pub plant_id: String,
    pub kind: CareEventKind,
    pub performed_by: String,
    pub timestamp: i64,
}

impl CareEvent {
    pub fn new(plant_id: String, kind: CareEventKind, performed_by: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            plant_id,
            kind,
            performed_by,
            timestamp: crate::now_ms(),
        }
    }

    pub fn at(mut self, timestamp: i64) -> Self {
        self.timestamp = timestamp;
        self
    }
}

/// A photograph attached to a plant's history. The blob itself lives in
/// external storage; `reference` is the opaque pointer to it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Picture {
    pub id: String,
    pub plant_id: String,
    pub taken_by: String,
    pub reference: String,
    pub timestamp: i64,
}

impl Picture {
    pub fn new(plant_id: String, taken_by: String, reference: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            plant_id,
            taken_by,
            reference,
            timestamp: crate::now_ms(),
        }
    }
}

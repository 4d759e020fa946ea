use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An account known to the engine. Authentication happens elsewhere;
/// the engine only ever sees opaque, already-authenticated caller ids.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub created_at: i64,
}

impl User {
    pub fn new(name: String, email: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name,
            email,
            created_at: crate::now_ms(),
        }
    }
}

/// Display info embedded in hydrated responses (share views, todos).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: String,
    pub name: String,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            name: user.name.clone(),
        }
    }
}

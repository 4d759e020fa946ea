use crate::role::Role;
use crate::user::UserSummary;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// What a share grants access to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShareTargetKind {
    /// A single plant.
    Plant,
    /// A location and, transitively, the plants inside it.
    Location,
    /// Everything the granting user owns.
    Collection,
}

/// A persisted grant of a role from an owner to another user.
///
/// Invariants enforced by the lifecycle manager and the store:
/// - `plant_id` is set iff `target_kind == Plant`, `location_id` iff
///   `target_kind == Location`.
/// - grantor != grantee.
/// - at most one share per (owner, grantee, entity) triple; a second
///   create is a conflict, never a silent update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Share {
    pub id: String,
    pub owner_id: String,
    pub shared_with_user_id: String,
    pub target_kind: ShareTargetKind,
    #[serde(default)]
    pub plant_id: Option<String>,
    #[serde(default)]
    pub location_id: Option<String>,
    pub role: Role,
    pub created_at: i64,
}

impl Share {
    fn new(
        owner_id: String,
        shared_with_user_id: String,
        target_kind: ShareTargetKind,
        plant_id: Option<String>,
        location_id: Option<String>,
        role: Role,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            owner_id,
            shared_with_user_id,
            target_kind,
            plant_id,
            location_id,
            role,
            created_at: crate::now_ms(),
        }
    }

    pub fn for_plant(
        owner_id: String,
        shared_with_user_id: String,
        plant_id: String,
        role: Role,
    ) -> Self {
        Self::new(
            owner_id,
            shared_with_user_id,
            ShareTargetKind::Plant,
            Some(plant_id),
            None,
            role,
        )
    }

    pub fn for_location(
        owner_id: String,
        shared_with_user_id: String,
        location_id: String,
        role: Role,
    ) -> Self {
        Self::new(
            owner_id,
            shared_with_user_id,
            ShareTargetKind::Location,
            None,
            Some(location_id),
            role,
        )
    }

    pub fn for_collection(owner_id: String, shared_with_user_id: String, role: Role) -> Self {
        Self::new(
            owner_id,
            shared_with_user_id,
            ShareTargetKind::Collection,
            None,
            None,
            role,
        )
    }

    /// Whether this share and `other` name the same (grantee, entity)
    /// pair for the same grantor. Used for the duplicate-share check.
    pub fn duplicates(&self, other: &Share) -> bool {
        self.owner_id == other.owner_id
            && self.shared_with_user_id == other.shared_with_user_id
            && self.target_kind == other.target_kind
            && self.plant_id == other.plant_id
            && self.location_id == other.location_id
    }
}

/// A hydrated share, with grantor/grantee display info resolved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShareView {
    pub id: String,
    pub target_kind: ShareTargetKind,
    #[serde(default)]
    pub plant_id: Option<String>,
    #[serde(default)]
    pub location_id: Option<String>,
    pub role: Role,
    pub owner: UserSummary,
    pub shared_with: UserSummary,
    pub created_at: i64,
}

impl ShareView {
    pub fn hydrate(share: &Share, owner: UserSummary, shared_with: UserSummary) -> Self {
        Self {
            id: share.id.clone(),
            target_kind: share.target_kind,
            plant_id: share.plant_id.clone(),
            location_id: share.location_id.clone(),
            role: share.role,
            owner,
            shared_with,
            created_at: share.created_at,
        }
    }
}

/// Input to `create_share`. The grantee is named by email; the grantor
/// is the authenticated caller, not part of the payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateShareRequest {
    pub target_kind: ShareTargetKind,
    #[serde(default)]
    pub plant_id: Option<String>,
    #[serde(default)]
    pub location_id: Option<String>,
    pub shared_with_email: String,
    pub role: Role,
}

/// Input to `update_share`. Only the role can change; retargeting a
/// share means deleting and recreating it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateShareRequest {
    pub role: Role,
}

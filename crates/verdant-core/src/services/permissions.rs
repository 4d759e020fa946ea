//! Permission gate: role-threshold checks in front of every mutating
//! or care-related operation.
//!
//! The gate fails closed: no resolved role, or a role below the
//! required threshold, is `Forbidden` and nothing downstream runs.

use crate::AppCore;
use crate::services::roles;
use std::sync::Arc;
use verdant_models::{Capability, Role};
use verdant_traits::{CoreError, Result};

/// Resolve the caller's role on a plant and require `capability`.
pub async fn require_plant_role(
    core: &Arc<AppCore>,
    plant_id: &str,
    user_id: &str,
    capability: Capability,
) -> Result<Role> {
    let role = roles::resolve_plant_role(core, plant_id, user_id).await?;
    gate(role, capability, "plant", plant_id)
}

/// Resolve the caller's role on a location and require `capability`.
pub async fn require_location_role(
    core: &Arc<AppCore>,
    location_id: &str,
    user_id: &str,
    capability: Capability,
) -> Result<Role> {
    let role = roles::resolve_location_role(core, location_id, user_id).await?;
    gate(role, capability, "location", location_id)
}

/// Boolean form of the plant gate, for read paths that render rather
/// than reject.
pub async fn check_plant_capability(
    core: &Arc<AppCore>,
    plant_id: &str,
    user_id: &str,
    capability: Capability,
) -> Result<bool> {
    let role = roles::resolve_plant_role(core, plant_id, user_id).await?;
    Ok(role.is_some_and(|role| role.allows(capability)))
}

fn gate(role: Option<Role>, capability: Capability, entity: &'static str, id: &str) -> Result<Role> {
    match role {
        Some(role) if role.allows(capability) => Ok(role),
        Some(role) => Err(CoreError::forbidden(format!(
            "role {} on {} {} does not allow {:?}",
            role, entity, id, capability
        ))),
        None => Err(CoreError::forbidden(format!(
            "no access to {} {}",
            entity, id
        ))),
    }
}

//! Role resolution: the single effective role a user holds over a
//! plant or location.
//!
//! Resolution walks one priority chain and stops at the first match —
//! roles from different paths are never combined, so a more specific
//! grant is never weakened by a broader one:
//!
//! 1. ownership
//! 2. direct plant share
//! 3. share on the plant's location
//! 4. collection-level share from the plant's owner
//!
//! Locations skip step 2's plant variant; there is no hierarchy above
//! a location.

use crate::AppCore;
use std::sync::Arc;
use verdant_models::{Location, Plant, Role};
use verdant_traits::{CoreError, Result, ShareStore};

/// Resolve the caller's role on a plant. `Ok(None)` means no access at
/// all; a missing plant is `NotFound`.
pub async fn resolve_plant_role(
    core: &Arc<AppCore>,
    plant_id: &str,
    user_id: &str,
) -> Result<Option<Role>> {
    let plant = core
        .storage
        .plants
        .get(plant_id)?
        .ok_or_else(|| CoreError::not_found("plant", plant_id))?;

    plant_role(core, &plant, user_id)
}

/// Resolve the caller's role on a location.
pub async fn resolve_location_role(
    core: &Arc<AppCore>,
    location_id: &str,
    user_id: &str,
) -> Result<Option<Role>> {
    let location = core
        .storage
        .locations
        .get(location_id)?
        .ok_or_else(|| CoreError::not_found("location", location_id))?;

    location_role(core, &location, user_id)
}

/// Priority-chain resolution over an already-loaded plant. Used by the
/// todo aggregator to avoid refetching.
pub(crate) fn plant_role(
    core: &Arc<AppCore>,
    plant: &Plant,
    user_id: &str,
) -> Result<Option<Role>> {
    if plant.owner_id == user_id {
        return Ok(Some(Role::Owner));
    }

    if let Some(share) = core.storage.shares.find_plant_share(&plant.id, user_id)? {
        return Ok(Some(share.role));
    }

    if let Some(location_id) = plant.location_id.as_deref()
        && let Some(share) = core.storage.shares.find_location_share(location_id, user_id)?
    {
        return Ok(Some(share.role));
    }

    if let Some(share) = core
        .storage
        .shares
        .find_collection_share(&plant.owner_id, user_id)?
    {
        return Ok(Some(share.role));
    }

    Ok(None)
}

pub(crate) fn location_role(
    core: &Arc<AppCore>,
    location: &Location,
    user_id: &str,
) -> Result<Option<Role>> {
    if location.owner_id == user_id {
        return Ok(Some(Role::Owner));
    }

    if let Some(share) = core
        .storage
        .shares
        .find_location_share(&location.id, user_id)?
    {
        return Ok(Some(share.role));
    }

    if let Some(share) = core
        .storage
        .shares
        .find_collection_share(&location.owner_id, user_id)?
    {
        return Ok(Some(share.role));
    }

    Ok(None)
}

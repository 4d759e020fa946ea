//! Plant mutations, gated, with explicit cascades.

use crate::AppCore;
use crate::services::permissions;
use std::sync::Arc;
use tracing::info;
use verdant_models::{Capability, Plant};
use verdant_traits::{CareHistoryStore, CoreError, Result, ShareStore};

/// Create a plant owned by the caller. The species, if named, must
/// exist; the location, if named, must exist and belong to the caller.
pub async fn create_plant(
    core: &Arc<AppCore>,
    owner_id: &str,
    name: String,
    species_id: Option<String>,
    location_id: Option<String>,
) -> Result<Plant> {
    if name.trim().is_empty() {
        return Err(CoreError::validation("plant name must not be empty"));
    }

    if let Some(species_id) = species_id.as_deref() {
        core.storage
            .species
            .get(species_id)?
            .ok_or_else(|| CoreError::not_found("species", species_id))?;
    }
    if let Some(location_id) = location_id.as_deref() {
        check_location_owner(core, location_id, owner_id)?;
    }

    let plant = Plant::new(owner_id.to_string(), name, species_id, location_id);
    core.storage.plants.put(&plant)?;

    info!(plant_id = %plant.id, owner_id, "Created plant");
    Ok(plant)
}

/// View-gated read.
pub async fn get_plant_for(
    core: &Arc<AppCore>,
    plant_id: &str,
    caller_id: &str,
) -> Result<Plant> {
    permissions::require_plant_role(core, plant_id, caller_id, Capability::View).await?;

    core.storage
        .plants
        .get(plant_id)?
        .ok_or_else(|| CoreError::not_found("plant", plant_id))
}

/// Rename, reassign species or move between locations. Requires
/// `can_edit`. Absent fields are left unchanged; a new location must
/// belong to the plant's owner, not the caller.
pub async fn update_plant(
    core: &Arc<AppCore>,
    plant_id: &str,
    caller_id: &str,
    name: Option<String>,
    species_id: Option<String>,
    location_id: Option<String>,
) -> Result<Plant> {
    permissions::require_plant_role(core, plant_id, caller_id, Capability::Edit).await?;

    let mut plant = core
        .storage
        .plants
        .get(plant_id)?
        .ok_or_else(|| CoreError::not_found("plant", plant_id))?;

    if let Some(name) = name {
        if name.trim().is_empty() {
            return Err(CoreError::validation("plant name must not be empty"));
        }
        plant.name = name;
    }
    if let Some(species_id) = species_id {
        core.storage
            .species
            .get(&species_id)?
            .ok_or_else(|| CoreError::not_found("species", species_id.clone()))?;
        plant.species_id = Some(species_id);
    }
    if let Some(location_id) = location_id {
        check_location_owner(core, &location_id, &plant.owner_id)?;
        plant.location_id = Some(location_id);
    }

    core.storage.plants.put(&plant)?;
    info!(plant_id = %plant.id, edited_by = caller_id, "Updated plant");
    Ok(plant)
}

/// Delete a plant. Owner-role only. Shares and care history referring
/// to the plant are removed explicitly, not left to storage magic.
pub async fn delete_plant(core: &Arc<AppCore>, plant_id: &str, caller_id: &str) -> Result<()> {
    permissions::require_plant_role(core, plant_id, caller_id, Capability::Delete).await?;

    let shares = core.storage.shares.delete_shares_for_plant(plant_id)?;
    let history = core.storage.care_history.delete_history_for_plant(plant_id)?;
    core.storage.plants.delete_raw(plant_id)?;

    info!(plant_id, shares, history, "Deleted plant with cascades");
    Ok(())
}

fn check_location_owner(core: &Arc<AppCore>, location_id: &str, owner_id: &str) -> Result<()> {
    let location = core
        .storage
        .locations
        .get(location_id)?
        .ok_or_else(|| CoreError::not_found("location", location_id))?;

    if location.owner_id != owner_id {
        return Err(CoreError::validation(
            "plant and location must have the same owner",
        ));
    }
    Ok(())
}

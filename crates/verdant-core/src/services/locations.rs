//! Location mutations, gated, with explicit cascades.
//!
//! Deleting a location detaches its plants instead of orphaning them,
//! and the per-user default location can never be deleted.

use crate::AppCore;
use crate::services::permissions;
use std::sync::Arc;
use tracing::info;
use verdant_models::{Capability, Location};
use verdant_traits::{CoreError, Result, ShareStore};

/// Create a location owned by the caller.
pub async fn create_location(
    core: &Arc<AppCore>,
    owner_id: &str,
    name: String,
) -> Result<Location> {
    if name.trim().is_empty() {
        return Err(CoreError::validation("location name must not be empty"));
    }

    let location = Location::new(owner_id.to_string(), name);
    core.storage.locations.put(&location)?;

    info!(location_id = %location.id, owner_id, "Created location");
    Ok(location)
}

/// The caller's default location, created on first use. Exactly one
/// location per user carries the default flag.
pub async fn ensure_default_location(core: &Arc<AppCore>, user_id: &str) -> Result<Location> {
    if let Some(existing) = core.storage.locations.find_default(user_id)? {
        return Ok(existing);
    }

    let config = core.storage.config.get()?;
    let location = Location::new_default(user_id.to_string(), config.default_location_name);
    core.storage.locations.put(&location)?;

    info!(location_id = %location.id, user_id, "Created default location");
    Ok(location)
}

/// Locations owned by the caller.
pub async fn list_locations(core: &Arc<AppCore>, owner_id: &str) -> Result<Vec<Location>> {
    Ok(core.storage.locations.list_by_owner(owner_id)?)
}

/// Delete a location. Owner-role only; the default location is
/// refused. Contained plants are detached (they become location-less,
/// not orphaned) and the location's shares are removed.
pub async fn delete_location(
    core: &Arc<AppCore>,
    location_id: &str,
    caller_id: &str,
) -> Result<()> {
    permissions::require_location_role(core, location_id, caller_id, Capability::Delete).await?;

    let location = core
        .storage
        .locations
        .get(location_id)?
        .ok_or_else(|| CoreError::not_found("location", location_id))?;

    if location.is_default {
        return Err(CoreError::validation("the default location cannot be deleted"));
    }

    let plants = core.storage.plants.list_in_location(location_id)?;
    let detached = plants.len();
    for mut plant in plants {
        plant.location_id = None;
        core.storage.plants.put(&plant)?;
    }

    let shares = core.storage.shares.delete_shares_for_location(location_id)?;
    core.storage.locations.delete_raw(location_id)?;

    info!(location_id, detached, shares, "Deleted location with cascades");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_support::{seed_user, test_core};
    use verdant_models::{Plant, Role, Share};

    #[tokio::test(flavor = "current_thread")]
    async fn test_ensure_default_location_is_idempotent() {
        let (_dir, core) = test_core().await;
        let user = seed_user(&core, "Olive");

        let first = ensure_default_location(&core, &user.id).await.unwrap();
        assert!(first.is_default);

        let second = ensure_default_location(&core, &user.id).await.unwrap();
        assert_eq!(first.id, second.id);
        assert_eq!(core.storage.locations.list_by_owner(&user.id).unwrap().len(), 1);
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_default_location_cannot_be_deleted() {
        let (_dir, core) = test_core().await;
        let user = seed_user(&core, "Olive");

        let default = ensure_default_location(&core, &user.id).await.unwrap();
        let err = delete_location(&core, &default.id, &user.id).await.unwrap_err();
        assert!(err.is_validation());
        assert!(core.storage.locations.get(&default.id).unwrap().is_some());
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_delete_detaches_plants_and_cascades_shares() {
        let (_dir, core) = test_core().await;
        let owner = seed_user(&core, "Olive");
        let grantee = seed_user(&core, "Vic");

        let location = create_location(&core, &owner.id, "Balcony".into())
            .await
            .unwrap();
        let plant = Plant::new(
            owner.id.clone(),
            "Fern".into(),
            None,
            Some(location.id.clone()),
        );
        core.storage.plants.put(&plant).unwrap();
        core.storage
            .shares
            .insert_unique(&Share::for_location(
                owner.id.clone(),
                grantee.id.clone(),
                location.id.clone(),
                Role::Viewer,
            ))
            .unwrap();

        delete_location(&core, &location.id, &owner.id).await.unwrap();

        // The plant survives, detached.
        let survivor = core.storage.plants.get(&plant.id).unwrap().unwrap();
        assert_eq!(survivor.location_id, None);
        assert!(
            core.storage
                .shares
                .find_location_share(&location.id, &grantee.id)
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_only_owner_deletes() {
        let (_dir, core) = test_core().await;
        let owner = seed_user(&core, "Olive");
        let editor = seed_user(&core, "Ed");

        let location = create_location(&core, &owner.id, "Balcony".into())
            .await
            .unwrap();
        core.storage
            .shares
            .insert_unique(&Share::for_location(
                owner.id.clone(),
                editor.id.clone(),
                location.id.clone(),
                Role::Editor,
            ))
            .unwrap();

        let err = delete_location(&core, &location.id, &editor.id)
            .await
            .unwrap_err();
        assert!(err.is_forbidden());
    }
}

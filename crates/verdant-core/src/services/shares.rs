//! Share lifecycle: create, update, revoke and list role grants.
//!
//! Mutation is owner-only, and the distinction matters: a share that
//! exists but belongs to someone else is `Forbidden`, never `NotFound`.

use crate::AppCore;
use crate::services::permissions;
use std::sync::Arc;
use tracing::info;
use verdant_models::{
    Capability, CreateShareRequest, Share, ShareTargetKind, ShareView, UpdateShareRequest,
};
use verdant_traits::{CoreError, Result, ShareStore, UserStore};

/// Create a share from `owner_id` (the authenticated caller) per the
/// request. The caller must currently own the named entity; holding a
/// lesser inherited role on it is not enough to re-share it.
pub async fn create_share(
    core: &Arc<AppCore>,
    owner_id: &str,
    request: CreateShareRequest,
) -> Result<ShareView> {
    validate_target(&request)?;

    let grantee = core
        .storage
        .users
        .find_user_by_email(&request.shared_with_email)?
        .ok_or_else(|| CoreError::not_found("user", request.shared_with_email.clone()))?;

    if grantee.id == owner_id {
        return Err(CoreError::conflict("cannot share with yourself"));
    }

    let share = match request.target_kind {
        ShareTargetKind::Plant => {
            let plant_id = request.plant_id.as_deref().unwrap_or_default();
            permissions::require_plant_role(core, plant_id, owner_id, Capability::Share).await?;
            Share::for_plant(
                owner_id.to_string(),
                grantee.id.clone(),
                plant_id.to_string(),
                request.role,
            )
        }
        ShareTargetKind::Location => {
            let location_id = request.location_id.as_deref().unwrap_or_default();
            permissions::require_location_role(core, location_id, owner_id, Capability::Share)
                .await?;
            Share::for_location(
                owner_id.to_string(),
                grantee.id.clone(),
                location_id.to_string(),
                request.role,
            )
        }
        // No entity-existence check: a collection share targets
        // "everything this owner owns", present and future.
        ShareTargetKind::Collection => {
            Share::for_collection(owner_id.to_string(), grantee.id.clone(), request.role)
        }
    };

    // The store re-checks inside the write transaction; this insert is
    // the enforcement point for the uniqueness invariant.
    if !core.storage.shares.insert_share_unique(&share)? {
        return Err(CoreError::conflict(format!(
            "share already exists for {}",
            grantee.email
        )));
    }

    info!(
        share_id = %share.id,
        grantee = %grantee.id,
        role = %share.role,
        "Created share"
    );

    hydrate(core, &share)
}

/// Change a share's role. Only the share's owner may do this.
pub async fn update_share(
    core: &Arc<AppCore>,
    share_id: &str,
    caller_id: &str,
    request: UpdateShareRequest,
) -> Result<ShareView> {
    let mut share = owned_share(core, share_id, caller_id)?;

    share.role = request.role;
    core.storage.shares.update_share(&share)?;

    info!(share_id = %share.id, role = %share.role, "Updated share role");

    hydrate(core, &share)
}

/// Revoke a share. Only the share's owner may do this. Deleting an
/// already-deleted share reports `NotFound`; retrying callers may
/// treat that as success.
pub async fn delete_share(core: &Arc<AppCore>, share_id: &str, caller_id: &str) -> Result<()> {
    let share = owned_share(core, share_id, caller_id)?;

    core.storage.shares.delete_share(&share.id)?;
    info!(share_id = %share.id, "Deleted share");
    Ok(())
}

/// Shares this user has granted, hydrated.
pub async fn list_shares_granted(core: &Arc<AppCore>, owner_id: &str) -> Result<Vec<ShareView>> {
    let shares = core.storage.shares.list_shares_by_owner(owner_id)?;
    shares.iter().map(|share| hydrate(core, share)).collect()
}

/// Shares this user has received, hydrated.
pub async fn list_shares_received(core: &Arc<AppCore>, user_id: &str) -> Result<Vec<ShareView>> {
    let shares = core.storage.shares.list_shares_by_grantee(user_id)?;
    shares.iter().map(|share| hydrate(core, share)).collect()
}

fn validate_target(request: &CreateShareRequest) -> Result<()> {
    match request.target_kind {
        ShareTargetKind::Plant => {
            if request.plant_id.is_none() {
                return Err(CoreError::validation("plant share requires plant_id"));
            }
            if request.location_id.is_some() {
                return Err(CoreError::validation(
                    "plant share must not carry location_id",
                ));
            }
        }
        ShareTargetKind::Location => {
            if request.location_id.is_none() {
                return Err(CoreError::validation("location share requires location_id"));
            }
            if request.plant_id.is_some() {
                return Err(CoreError::validation(
                    "location share must not carry plant_id",
                ));
            }
        }
        ShareTargetKind::Collection => {
            if request.plant_id.is_some() || request.location_id.is_some() {
                return Err(CoreError::validation(
                    "collection share must not name an entity",
                ));
            }
        }
    }
    Ok(())
}

/// Fetch a share and require that `caller_id` owns it.
fn owned_share(core: &Arc<AppCore>, share_id: &str, caller_id: &str) -> Result<Share> {
    let share = core
        .storage
        .shares
        .get_share(share_id)?
        .ok_or_else(|| CoreError::not_found("share", share_id))?;

    if share.owner_id != caller_id {
        return Err(CoreError::forbidden(format!(
            "share {} belongs to another user",
            share_id
        )));
    }

    Ok(share)
}

fn hydrate(core: &Arc<AppCore>, share: &Share) -> Result<ShareView> {
    let owner = core
        .storage
        .users
        .get_user(&share.owner_id)?
        .ok_or_else(|| CoreError::not_found("user", share.owner_id.clone()))?;
    let grantee = core
        .storage
        .users
        .get_user(&share.shared_with_user_id)?
        .ok_or_else(|| CoreError::not_found("user", share.shared_with_user_id.clone()))?;

    Ok(ShareView::hydrate(share, (&owner).into(), (&grantee).into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_support::{seed_user, test_core};
    use verdant_models::{Location, Plant, Role};

    fn plant_request(plant_id: &str, email: &str, role: Role) -> CreateShareRequest {
        CreateShareRequest {
            target_kind: ShareTargetKind::Plant,
            plant_id: Some(plant_id.to_string()),
            location_id: None,
            shared_with_email: email.to_string(),
            role,
        }
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_create_share_happy_path_hydrates() {
        let (_dir, core) = test_core().await;
        let owner = seed_user(&core, "Olive");
        let grantee = seed_user(&core, "Vic");

        let plant = Plant::new(owner.id.clone(), "Fern".into(), None, None);
        core.storage.plants.put(&plant).unwrap();

        let view = create_share(
            &core,
            &owner.id,
            plant_request(&plant.id, &grantee.email, Role::Viewer),
        )
        .await
        .unwrap();

        assert_eq!(view.role, Role::Viewer);
        assert_eq!(view.owner.name, "Olive");
        assert_eq!(view.shared_with.name, "Vic");
        assert_eq!(view.plant_id.as_deref(), Some(plant.id.as_str()));
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_duplicate_share_is_conflict() {
        let (_dir, core) = test_core().await;
        let owner = seed_user(&core, "Olive");
        let grantee = seed_user(&core, "Vic");

        let plant = Plant::new(owner.id.clone(), "Fern".into(), None, None);
        core.storage.plants.put(&plant).unwrap();

        create_share(
            &core,
            &owner.id,
            plant_request(&plant.id, &grantee.email, Role::Viewer),
        )
        .await
        .unwrap();

        let err = create_share(
            &core,
            &owner.id,
            plant_request(&plant.id, &grantee.email, Role::Editor),
        )
        .await
        .unwrap_err();
        assert!(err.is_conflict());
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_self_share_is_conflict() {
        let (_dir, core) = test_core().await;
        let owner = seed_user(&core, "Olive");

        let plant = Plant::new(owner.id.clone(), "Fern".into(), None, None);
        core.storage.plants.put(&plant).unwrap();

        let err = create_share(
            &core,
            &owner.id,
            plant_request(&plant.id, &owner.email, Role::Viewer),
        )
        .await
        .unwrap_err();
        assert!(err.is_conflict());
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_unknown_grantee_is_not_found() {
        let (_dir, core) = test_core().await;
        let owner = seed_user(&core, "Olive");

        let plant = Plant::new(owner.id.clone(), "Fern".into(), None, None);
        core.storage.plants.put(&plant).unwrap();

        let err = create_share(
            &core,
            &owner.id,
            plant_request(&plant.id, "nobody@example.com", Role::Viewer),
        )
        .await
        .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_non_owner_cannot_share_even_with_editor_role() {
        let (_dir, core) = test_core().await;
        let owner = seed_user(&core, "Olive");
        let editor = seed_user(&core, "Ed");
        let third = seed_user(&core, "Tess");

        let plant = Plant::new(owner.id.clone(), "Fern".into(), None, None);
        core.storage.plants.put(&plant).unwrap();
        create_share(
            &core,
            &owner.id,
            plant_request(&plant.id, &editor.email, Role::Editor),
        )
        .await
        .unwrap();

        // Editor role on the plant does not grant the right to re-share
        // something the caller does not own.
        let err = create_share(
            &core,
            &editor.id,
            plant_request(&plant.id, &third.email, Role::Viewer),
        )
        .await
        .unwrap_err();
        assert!(err.is_forbidden());
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_plant_share_without_plant_id_is_validation() {
        let (_dir, core) = test_core().await;
        let owner = seed_user(&core, "Olive");
        let grantee = seed_user(&core, "Vic");

        let request = CreateShareRequest {
            target_kind: ShareTargetKind::Plant,
            plant_id: None,
            location_id: None,
            shared_with_email: grantee.email.clone(),
            role: Role::Viewer,
        };
        let err = create_share(&core, &owner.id, request).await.unwrap_err();
        assert!(err.is_validation());
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_duplicate_collection_share_is_conflict() {
        let (_dir, core) = test_core().await;
        let owner = seed_user(&core, "Olive");
        let grantee = seed_user(&core, "Vic");

        let request = CreateShareRequest {
            target_kind: ShareTargetKind::Collection,
            plant_id: None,
            location_id: None,
            shared_with_email: grantee.email.clone(),
            role: Role::Viewer,
        };
        create_share(&core, &owner.id, request.clone()).await.unwrap();
        let err = create_share(&core, &owner.id, request).await.unwrap_err();
        assert!(err.is_conflict());
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_update_by_non_owner_is_forbidden_not_not_found() {
        let (_dir, core) = test_core().await;
        let owner = seed_user(&core, "Olive");
        let grantee = seed_user(&core, "Vic");

        let plant = Plant::new(owner.id.clone(), "Fern".into(), None, None);
        core.storage.plants.put(&plant).unwrap();
        let view = create_share(
            &core,
            &owner.id,
            plant_request(&plant.id, &grantee.email, Role::Viewer),
        )
        .await
        .unwrap();

        // Not even the grantee may touch the share.
        let err = update_share(
            &core,
            &view.id,
            &grantee.id,
            UpdateShareRequest { role: Role::Owner },
        )
        .await
        .unwrap_err();
        assert!(err.is_forbidden());

        let updated = update_share(
            &core,
            &view.id,
            &owner.id,
            UpdateShareRequest { role: Role::Carer },
        )
        .await
        .unwrap();
        assert_eq!(updated.role, Role::Carer);
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_delete_share_then_delete_again_is_not_found() {
        let (_dir, core) = test_core().await;
        let owner = seed_user(&core, "Olive");
        let grantee = seed_user(&core, "Vic");

        let plant = Plant::new(owner.id.clone(), "Fern".into(), None, None);
        core.storage.plants.put(&plant).unwrap();
        let view = create_share(
            &core,
            &owner.id,
            plant_request(&plant.id, &grantee.email, Role::Viewer),
        )
        .await
        .unwrap();

        delete_share(&core, &view.id, &owner.id).await.unwrap();
        let err = delete_share(&core, &view.id, &owner.id).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_listing_granted_and_received() {
        let (_dir, core) = test_core().await;
        let owner = seed_user(&core, "Olive");
        let grantee = seed_user(&core, "Vic");

        let location = Location::new(owner.id.clone(), "Balcony".into());
        core.storage.locations.put(&location).unwrap();

        let request = CreateShareRequest {
            target_kind: ShareTargetKind::Location,
            plant_id: None,
            location_id: Some(location.id.clone()),
            shared_with_email: grantee.email.clone(),
            role: Role::Carer,
        };
        create_share(&core, &owner.id, request).await.unwrap();

        let granted = list_shares_granted(&core, &owner.id).await.unwrap();
        assert_eq!(granted.len(), 1);
        assert_eq!(granted[0].shared_with.id, grantee.id);

        let received = list_shares_received(&core, &grantee.id).await.unwrap();
        assert_eq!(received.len(), 1);
        assert_eq!(received[0].owner.id, owner.id);

        assert!(list_shares_received(&core, &owner.id).await.unwrap().is_empty());
    }
}

//! Todo aggregation: due and overdue care actions across a user's
//! owned and shared plants.

use crate::AppCore;
use crate::services::{care, roles};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::warn;
use verdant_models::{CareEventKind, MS_PER_HOUR, Plant, SharingContext, TodoItem, now_ms};
use verdant_traits::{CareHistoryStore, CoreError, Result, ShareStore, UserStore};

/// Due/overdue care actions for `user_id` within `horizon_hours` of
/// now, most urgent first.
pub async fn list_todos(
    core: &Arc<AppCore>,
    user_id: &str,
    horizon_hours: i64,
) -> Result<Vec<TodoItem>> {
    list_todos_at(core, user_id, horizon_hours, now_ms()).await
}

/// As [`list_todos`], with the configured default horizon.
pub async fn list_todos_default_horizon(
    core: &Arc<AppCore>,
    user_id: &str,
) -> Result<Vec<TodoItem>> {
    let config = core.storage.config.get()?;
    list_todos(core, user_id, config.default_todo_horizon_hours as i64).await
}

/// Deterministic variant with an explicit clock, used by the wrapper
/// above and by tests.
pub async fn list_todos_at(
    core: &Arc<AppCore>,
    user_id: &str,
    horizon_hours: i64,
    now_ms: i64,
) -> Result<Vec<TodoItem>> {
    // An absurd horizon saturates to "everything" instead of
    // overflowing.
    let cutoff = now_ms.saturating_add(horizon_hours.saturating_mul(MS_PER_HOUR));

    // Owned plants seed the set; share-reachable plants join unless
    // already present. Ownership takes precedence and is never
    // duplicated.
    let mut candidates: HashMap<String, Plant> = HashMap::new();
    for plant in core.storage.plants.list_by_owner(user_id)? {
        candidates.insert(plant.id.clone(), plant);
    }

    for share in core.storage.shares.list_shares_by_grantee(user_id)? {
        let reachable: Vec<Plant> = if let Some(plant_id) = share.plant_id.as_deref() {
            core.storage.plants.get(plant_id)?.into_iter().collect()
        } else if let Some(location_id) = share.location_id.as_deref() {
            core.storage.plants.list_in_location(location_id)?
        } else {
            core.storage.plants.list_by_owner(&share.owner_id)?
        };

        for plant in reachable {
            candidates.entry(plant.id.clone()).or_insert(plant);
        }
    }

    let mut todos = Vec::new();
    for plant in candidates.values() {
        // No species means no schedule information at all; skip the
        // plant entirely.
        let Some(species_id) = plant.species_id.as_deref() else {
            continue;
        };
        let Some(species) = core.storage.species.get(species_id)? else {
            warn!(plant_id = %plant.id, species_id, "Plant references missing species");
            continue;
        };

        let sharing = if plant.owner_id == user_id {
            None
        } else {
            let Some(role) = roles::plant_role(core, plant, user_id)? else {
                // Reachable through a share that no longer grants a
                // role; treat as no access.
                continue;
            };
            let owner = core
                .storage
                .users
                .get_user(&plant.owner_id)?
                .ok_or_else(|| CoreError::not_found("user", plant.owner_id.clone()))?;
            Some(SharingContext {
                role,
                owner_id: owner.id,
                owner_name: owner.name,
            })
        };

        let events = core.storage.care_history.list_events(&plant.id)?;
        let latest_picture = core
            .storage
            .care_history
            .latest_picture(&plant.id)?
            .map(|picture| picture.reference);

        for kind in [CareEventKind::Watering, CareEventKind::Fertilization] {
            let Some(due_at) = care::next_due(plant, &species, &events, kind) else {
                continue;
            };
            if due_at <= cutoff {
                todos.push(TodoItem {
                    plant_id: plant.id.clone(),
                    plant_name: plant.name.clone(),
                    species_name: species.name.clone(),
                    action: kind,
                    due_at,
                    latest_picture: latest_picture.clone(),
                    sharing: sharing.clone(),
                });
            }
        }
    }

    // Ascending by due date; past-due items naturally sort first. The
    // plant-id tiebreak keeps the order stable across runs.
    todos.sort_by(|a, b| {
        a.due_at
            .cmp(&b.due_at)
            .then_with(|| a.plant_id.cmp(&b.plant_id))
    });

    Ok(todos)
}

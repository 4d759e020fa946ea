//! Care ledger: when is a care action next due, and recording care.
//!
//! Due dates are computed on demand, never precomputed or cached.

use crate::AppCore;
use crate::services::permissions;
use std::sync::Arc;
use tracing::info;
use verdant_models::{
    Capability, CareEvent, CareEventKind, MS_PER_DAY, Picture, Plant, Species,
};
use verdant_traits::{CareHistoryStore, CoreError, Result};

/// When the given care action next falls due, as Unix milliseconds.
///
/// `None` when the species defines no interval for the action — no
/// schedule, never "due". A never-cared-for plant anchors its first
/// due date to its acquisition date, so every plant with an interval
/// has a deterministic due date from the moment it is added.
pub fn next_due(
    plant: &Plant,
    species: &Species,
    events: &[CareEvent],
    kind: CareEventKind,
) -> Option<i64> {
    let interval_days = species.interval_days_for(kind)? as i64;

    let last_done = events
        .iter()
        .filter(|event| event.kind == kind)
        .map(|event| event.timestamp)
        .max();

    let anchor = last_done.unwrap_or(plant.added_at);
    Some(anchor + interval_days * MS_PER_DAY)
}

/// `next_due` over stored state. `Ok(None)` when the plant has no
/// species or the species has no interval for the action.
pub async fn next_due_for(
    core: &Arc<AppCore>,
    plant_id: &str,
    kind: CareEventKind,
) -> Result<Option<i64>> {
    let plant = core
        .storage
        .plants
        .get(plant_id)?
        .ok_or_else(|| CoreError::not_found("plant", plant_id))?;

    let Some(species_id) = plant.species_id.as_deref() else {
        return Ok(None);
    };
    let species = core
        .storage
        .species
        .get(species_id)?
        .ok_or_else(|| CoreError::not_found("species", species_id))?;

    let events = core.storage.care_history.list_events(plant_id)?;
    Ok(next_due(&plant, &species, &events, kind))
}

/// Record a watering performed by the caller. Requires `can_care`.
pub async fn record_watering(
    core: &Arc<AppCore>,
    plant_id: &str,
    caller_id: &str,
) -> Result<CareEvent> {
    record_care(core, plant_id, caller_id, CareEventKind::Watering).await
}

/// Record a fertilization performed by the caller. Requires `can_care`.
pub async fn record_fertilization(
    core: &Arc<AppCore>,
    plant_id: &str,
    caller_id: &str,
) -> Result<CareEvent> {
    record_care(core, plant_id, caller_id, CareEventKind::Fertilization).await
}

async fn record_care(
    core: &Arc<AppCore>,
    plant_id: &str,
    caller_id: &str,
    kind: CareEventKind,
) -> Result<CareEvent> {
    permissions::require_plant_role(core, plant_id, caller_id, Capability::Care).await?;

    // Pure append: concurrent care by different permitted users is
    // expected, and every event persists as its own fact.
    let event = CareEvent::new(plant_id.to_string(), kind, caller_id.to_string());
    core.storage.care_history.append_event(&event)?;

    info!(plant_id, kind = %kind, performed_by = caller_id, "Recorded care event");
    Ok(event)
}

/// Attach a picture reference to a plant's history. Requires `can_care`.
pub async fn record_picture(
    core: &Arc<AppCore>,
    plant_id: &str,
    caller_id: &str,
    reference: String,
) -> Result<Picture> {
    permissions::require_plant_role(core, plant_id, caller_id, Capability::Care).await?;

    let picture = Picture::new(plant_id.to_string(), caller_id.to_string(), reference);
    core.storage.care_history.append_picture(&picture)?;

    info!(plant_id, picture_id = %picture.id, "Recorded picture");
    Ok(picture)
}

/// A plant's care events, time-ordered. Any resolved role may read.
pub async fn care_history(
    core: &Arc<AppCore>,
    plant_id: &str,
    caller_id: &str,
) -> Result<Vec<CareEvent>> {
    permissions::require_plant_role(core, plant_id, caller_id, Capability::View).await?;
    Ok(core.storage.care_history.list_events(plant_id)?)
}

/// The newest picture on a plant, if any. Any resolved role may read.
pub async fn latest_picture(
    core: &Arc<AppCore>,
    plant_id: &str,
    caller_id: &str,
) -> Result<Option<Picture>> {
    permissions::require_plant_role(core, plant_id, caller_id, Capability::View).await?;
    Ok(core.storage.care_history.latest_picture(plant_id)?)
}

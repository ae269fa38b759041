//! Transition planner for single-asset edits.
//!
//! Given the stored state of an asset and a fully resolved proposed change,
//! [`plan_transition`] decides which history records the edit must produce
//! and whether it is valid at all. The caller commits the resulting
//! [`TransitionPlan`] as one unit of work; nothing here touches storage.

use crate::error::CoreError;
use crate::types::DbId;

/// The stored fields a transition is diffed against. Fetched fresh
/// immediately before planning.
#[derive(Debug, Clone, Copy)]
pub struct StoredState {
    pub location_id: DbId,
    pub condition_id: DbId,
}

/// A proposed edit with category/location names already resolved to ids.
#[derive(Debug, Clone)]
pub struct ProposedTransition {
    pub name: String,
    pub category_id: DbId,
    pub location_id: DbId,
    pub condition_id: DbId,
    /// `generates_fault` flag of the proposed condition.
    pub condition_generates_fault: bool,
    pub fault_description: Option<String>,
}

/// A movement record staged by a location change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StagedMovement {
    pub previous_location_id: DbId,
    pub new_location_id: DbId,
}

/// The validated outcome of planning: the final field values plus the
/// history rows the commit must write alongside them.
#[derive(Debug, Clone)]
pub struct TransitionPlan {
    pub name: String,
    pub category_id: DbId,
    pub location_id: DbId,
    pub condition_id: DbId,
    pub movement: Option<StagedMovement>,
    pub fault_description: Option<String>,
}

/// Plan a single-asset transition.
///
/// Rules:
/// - the asset name must be non-empty;
/// - a movement is staged if and only if the resolved location differs
///   from the stored one (identity edits produce no movement);
/// - entering a fault-generating condition (condition changed AND the new
///   condition generates faults) requires a non-empty fault description and
///   stages exactly one unresolved fault. The requirement is one-directional:
///   leaving or staying in a degraded condition never requires a description;
/// - an edit that changes nothing is still a valid plan ("I checked,
///   nothing changed") -- the commit bumps `last_verified_at` regardless.
pub fn plan_transition(
    current: StoredState,
    proposed: ProposedTransition,
) -> Result<TransitionPlan, CoreError> {
    if proposed.name.trim().is_empty() {
        return Err(CoreError::Validation("Asset name must not be empty".into()));
    }

    let condition_changed = proposed.condition_id != current.condition_id;
    let entering_fault_condition = condition_changed && proposed.condition_generates_fault;

    let fault_description = match proposed.fault_description.as_deref().map(str::trim) {
        Some(desc) if !desc.is_empty() => Some(desc.to_string()),
        _ => None,
    };

    if entering_fault_condition && fault_description.is_none() {
        return Err(CoreError::Validation(
            "A fault description is required when moving an asset into a fault-generating condition"
                .into(),
        ));
    }

    let movement = (proposed.location_id != current.location_id).then_some(StagedMovement {
        previous_location_id: current.location_id,
        new_location_id: proposed.location_id,
    });

    Ok(TransitionPlan {
        name: proposed.name.trim().to_string(),
        category_id: proposed.category_id,
        location_id: proposed.location_id,
        condition_id: proposed.condition_id,
        movement,
        // A description only becomes a fault record on the condition-entry
        // path; otherwise it is ignored.
        fault_description: entering_fault_condition
            .then_some(fault_description)
            .flatten(),
    })
}

//! Lot intake rules: spec validation, per-unit naming, and the
//! batch-originated fault tag.

use crate::error::CoreError;

/// Prefix applied to fault descriptions reported against a whole lot,
/// so per-unit faults and batch-originated faults stay distinguishable.
pub const LOT_FAULT_PREFIX: &str = "[LOT-WIDE] ";

/// Tag a description as batch-originated.
pub fn lot_fault_description(description: &str) -> String {
    format!("{LOT_FAULT_PREFIX}{}", description.trim())
}

/// Name for the `ordinal`-th unit (1-indexed) of a lot of `quantity`.
///
/// The ordinal position is embedded in the name for human traceability:
/// `"Monitor 2/3"`.
pub fn unit_name(base_name: &str, ordinal: u32, quantity: u32) -> String {
    format!("{} {ordinal}/{quantity}", base_name.trim())
}

/// Expand a lot spec into its per-unit asset names, in ordinal order.
pub fn expand_unit_names(base_name: &str, quantity: u32) -> Vec<String> {
    (1..=quantity)
        .map(|i| unit_name(base_name, i, quantity))
        .collect()
}

/// Validate a lot spec before any write.
///
/// Rejects a quantity below 1, an empty base name, and a missing shared
/// fault description when the chosen condition generates faults.
pub fn validate_lot_spec(
    base_name: &str,
    quantity: i32,
    condition_generates_fault: bool,
    shared_fault_description: Option<&str>,
) -> Result<(), CoreError> {
    if base_name.trim().is_empty() {
        return Err(CoreError::Validation("Base name must not be empty".into()));
    }
    if quantity < 1 {
        return Err(CoreError::Validation(format!(
            "Lot quantity must be at least 1, got {quantity}"
        )));
    }
    if condition_generates_fault
        && shared_fault_description
            .map(str::trim)
            .is_none_or(str::is_empty)
    {
        return Err(CoreError::Validation(
            "A shared fault description is required when the lot condition generates faults"
                .into(),
        ));
    }
    Ok(())
}

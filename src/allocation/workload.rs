//! Workload accounting.
//!
//! Assignments add an order's `workload_impact` to its holder and releases
//! subtract it. The running value is clamped to `0..=100`, so after an
//! assignment that hit the ceiling, releasing the same order subtracts the
//! nominal impact and can leave the holder below their earlier workload.

use tracing::debug;

use crate::error::AllocationResult;
use crate::models::MAX_WORKLOAD;
use crate::registry::CraftspersonRegistry;

/// Computes `clamp(current + delta, 0, 100)`.
///
/// # Example
///
/// ```
/// use workshop_allocator::allocation::clamp_workload;
///
/// assert_eq!(clamp_workload(70, 20), 90);
/// assert_eq!(clamp_workload(90, 25), 100);
/// assert_eq!(clamp_workload(10, -40), 0);
/// ```
pub fn clamp_workload(current: u8, delta: i64) -> u8 {
    let raw = i64::from(current).saturating_add(delta);
    // The clamp bounds the value to 0..=100, which always fits in u8.
    raw.clamp(0, i64::from(MAX_WORKLOAD)) as u8
}

/// Applies a workload delta to one craftsperson and returns the new value.
///
/// The sign of `delta` is the caller's business: positive on assignment,
/// negative on release. Nothing but the one record changes.
pub fn apply_delta(
    craftspeople: &mut CraftspersonRegistry,
    craftsperson_id: &str,
    delta: i64,
) -> AllocationResult<u8> {
    let current = craftspeople.get(craftsperson_id)?.current_workload;
    let updated = clamp_workload(current, delta);
    craftspeople.set_workload(craftsperson_id, updated)?;

    debug!(
        craftsperson_id = %craftsperson_id,
        delta,
        workload_before = current,
        workload_after = updated,
        "Applied workload delta"
    );

    Ok(updated)
}

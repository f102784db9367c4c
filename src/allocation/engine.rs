//! Manual assignment and release of work orders.
//!
//! These are the only functions that change the order/craftsperson link.
//! Each one updates the order, the holder's `assigned_orders` and the
//! holder's workload together, so the two registries never disagree.

use tracing::debug;

use crate::config::Thresholds;
use crate::error::AllocationResult;
use crate::models::{Assignment, AssignmentWarnings, Unassignment};
use crate::registry::Registries;

use super::workload::apply_delta;

/// Assigns a work order to a craftsperson.
///
/// If another craftsperson holds the order it is released from them first,
/// so this call reassigns rather than rejecting. Skill and overload checks
/// only produce [`AssignmentWarnings`]; an explicit manual assignment is
/// always honoured.
///
/// # Errors
///
/// `WorkOrderNotFound` or `CraftspersonNotFound` for unknown ids. Both ids
/// are checked before anything changes.
///
/// # Example
///
/// ```
/// use workshop_allocator::allocation::assign;
/// use workshop_allocator::config::Thresholds;
/// use workshop_allocator::models::{Craftsperson, Priority, Skill, WorkOrder};
/// use workshop_allocator::registry::Registries;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let mut registries = Registries::from_records(
///     vec![Craftsperson {
///         id: "cp_1".to_string(),
///         name: "Mara Okafor".to_string(),
///         skills: vec![Skill::new("StoneSetting", 2)],
///         current_workload: 70,
///         efficiency_rating: Decimal::ONE,
///         quality_rating: Decimal::ONE,
///         absences: vec![],
///         assigned_orders: vec![],
///     }],
///     vec![WorkOrder {
///         id: "wo_1".to_string(),
///         item_description: "Set emerald ring".to_string(),
///         required_skill: "StoneSetting".to_string(),
///         priority: Priority::High,
///         due_date: NaiveDate::from_ymd_opt(2026, 11, 2).unwrap(),
///         estimated_hours: Decimal::new(4, 0),
///         workload_impact: 20,
///         assigned_to: None,
///     }],
/// );
///
/// let assignment = assign(&mut registries, "wo_1", "cp_1", &Thresholds::default()).unwrap();
/// assert_eq!(assignment.workload_after, 90);
/// assert!(assignment.warnings.overloaded);
/// assert!(!assignment.warnings.skill_mismatch);
/// ```
pub fn assign(
    registries: &mut Registries,
    work_order_id: &str,
    craftsperson_id: &str,
    thresholds: &Thresholds,
) -> AllocationResult<Assignment> {
    let order = registries.work_orders.get(work_order_id)?;
    let impact = i64::from(order.workload_impact);
    let required_skill = order.required_skill.clone();
    let previous_holder = order.assigned_to.clone();
    registries.craftspeople.get(craftsperson_id)?;

    if let Some(previous) = previous_holder.as_deref() {
        release(registries, work_order_id, previous, impact)?;
    }

    let craftsperson = registries.craftspeople.get(craftsperson_id)?;
    let workload_before = craftsperson.current_workload;
    let skill_mismatch = !craftsperson.has_skill(&required_skill);

    registries
        .work_orders
        .set_assignment(work_order_id, Some(craftsperson_id.to_string()))?;
    registries
        .craftspeople
        .add_assigned_order(craftsperson_id, work_order_id)?;
    let workload_after = apply_delta(&mut registries.craftspeople, craftsperson_id, impact)?;

    let warnings = AssignmentWarnings {
        skill_mismatch,
        overloaded: workload_after >= thresholds.overload_warning,
    };

    debug!(
        work_order_id = %work_order_id,
        craftsperson_id = %craftsperson_id,
        previous_craftsperson_id = ?previous_holder,
        workload_before,
        workload_after,
        skill_mismatch = warnings.skill_mismatch,
        overloaded = warnings.overloaded,
        "Assigned work order"
    );

    Ok(Assignment {
        work_order_id: work_order_id.to_string(),
        craftsperson_id: craftsperson_id.to_string(),
        previous_craftsperson_id: previous_holder,
        workload_before,
        workload_after,
        warnings,
    })
}

/// Releases a work order from whoever currently holds it.
///
/// The holder is read from the order itself. Releasing an unassigned order
/// succeeds and returns `None`.
///
/// # Errors
///
/// `WorkOrderNotFound` for an unknown id.
pub fn unassign(
    registries: &mut Registries,
    work_order_id: &str,
) -> AllocationResult<Option<Unassignment>> {
    let order = registries.work_orders.get(work_order_id)?;
    let Some(holder) = order.assigned_to.clone() else {
        debug!(work_order_id = %work_order_id, "Work order already unassigned");
        return Ok(None);
    };
    let impact = i64::from(order.workload_impact);

    let workload_after = release(registries, work_order_id, &holder, impact)?;

    debug!(
        work_order_id = %work_order_id,
        craftsperson_id = %holder,
        workload_after,
        "Unassigned work order"
    );

    Ok(Some(Unassignment {
        work_order_id: work_order_id.to_string(),
        craftsperson_id: holder,
        workload_after,
    }))
}

fn release(
    registries: &mut Registries,
    work_order_id: &str,
    holder: &str,
    impact: i64,
) -> AllocationResult<u8> {
    registries.work_orders.set_assignment(work_order_id, None)?;
    registries
        .craftspeople
        .remove_assigned_order(holder, work_order_id)?;
    apply_delta(&mut registries.craftspeople, holder, -impact)
}

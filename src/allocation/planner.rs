//! Batch auto-assignment.
//!
//! The planner takes every unassigned work order, highest priority first,
//! and places each one with the first craftsperson that matches the
//! earliest tier:
//!
//! 1. has the required skill and workload below the tier-one threshold
//! 2. has the required skill
//! 3. lowest workload of anyone, skill ignored
//!
//! Only craftspeople available on the planning date are considered, and
//! each placement changes workloads before the next order is evaluated.
//! Candidates are taken in roster order; the first eligible one wins.

use std::cmp::Reverse;

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use crate::config::Thresholds;
use crate::models::{AutoAssignPlan, Craftsperson, MatchTier, Placement, WorkOrder};
use crate::registry::Registries;

use super::availability::is_available;
use super::engine::assign;

/// Picks a craftsperson for an order from an already-filtered pool.
///
/// Returns `None` only for an empty pool.
pub fn select_candidate<'a>(
    pool: &[&'a Craftsperson],
    required_skill: &str,
    thresholds: &Thresholds,
) -> Option<(&'a Craftsperson, MatchTier)> {
    let skilled_with_capacity = pool.iter().find(|c| {
        c.has_skill(required_skill) && c.current_workload < thresholds.tier_one_max_workload
    });
    if let Some(c) = skilled_with_capacity {
        return Some((*c, MatchTier::SkilledWithCapacity));
    }

    if let Some(c) = pool.iter().find(|c| c.has_skill(required_skill)) {
        return Some((*c, MatchTier::Skilled));
    }

    // min_by_key keeps the first of equal minima.
    pool.iter()
        .min_by_key(|c| c.current_workload)
        .map(|c| (*c, MatchTier::LeastLoaded))
}

/// Orders unassigned work by priority weight, highest first.
///
/// The sort is stable: orders of equal priority keep their intake order.
pub fn priority_queue<'a>(orders: &[&'a WorkOrder]) -> Vec<&'a WorkOrder> {
    let mut queue = orders.to_vec();
    queue.sort_by_key(|o| Reverse(o.priority.weight()));
    queue
}

/// Runs auto-assignment in place and returns the resulting plan.
///
/// Never fails: orders with no available craftsperson are reported in
/// `unplaced_order_ids`.
pub fn run_auto_assign(
    registries: &mut Registries,
    today: NaiveDate,
    thresholds: &Thresholds,
) -> AutoAssignPlan {
    let queue: Vec<String> = priority_queue(&registries.work_orders.list_unassigned())
        .into_iter()
        .map(|o| o.id.clone())
        .collect();

    let mut placements = Vec::new();
    let mut unplaced_order_ids = Vec::new();

    for order_id in queue {
        let Ok(order) = registries.work_orders.get(&order_id) else {
            continue;
        };
        let required_skill = order.required_skill.clone();

        let pool = registries
            .craftspeople
            .list_by(|c| is_available(c, today));
        let Some((candidate, tier)) = select_candidate(&pool, &required_skill, thresholds) else {
            debug!(work_order_id = %order_id, "No available craftsperson");
            unplaced_order_ids.push(order_id);
            continue;
        };
        let candidate_id = candidate.id.clone();
        let reasoning = explain(candidate, &required_skill, tier, thresholds);

        match assign(registries, &order_id, &candidate_id, thresholds) {
            Ok(_) => {
                debug!(
                    work_order_id = %order_id,
                    craftsperson_id = %candidate_id,
                    tier = tier.number(),
                    "Placed work order"
                );
                placements.push(Placement {
                    work_order_id: order_id,
                    craftsperson_id: candidate_id,
                    tier,
                    reasoning,
                });
            }
            Err(err) => {
                warn!(work_order_id = %order_id, error = %err, "Failed to place work order");
                unplaced_order_ids.push(order_id);
            }
        }
    }

    info!(
        placed = placements.len(),
        unplaced = unplaced_order_ids.len(),
        planning_date = %today,
        "Auto-assign run completed"
    );

    AutoAssignPlan {
        updated_orders: registries.work_orders.iter().cloned().collect(),
        updated_craftspeople: registries.craftspeople.iter().cloned().collect(),
        unplaced_order_ids,
        placements,
    }
}

/// Plans auto-assignment against a snapshot, leaving the input untouched.
pub fn plan_auto_assignment(
    snapshot: &Registries,
    today: NaiveDate,
    thresholds: &Thresholds,
) -> AutoAssignPlan {
    let mut working = snapshot.clone();
    run_auto_assign(&mut working, today, thresholds)
}

fn explain(
    craftsperson: &Craftsperson,
    required_skill: &str,
    tier: MatchTier,
    thresholds: &Thresholds,
) -> String {
    match tier {
        MatchTier::SkilledWithCapacity => format!(
            "Tier 1: {} has {} (level {}) at {}% workload, below {}%",
            craftsperson.name,
            required_skill,
            craftsperson.skill_level(required_skill).unwrap_or_default(),
            craftsperson.current_workload,
            thresholds.tier_one_max_workload
        ),
        MatchTier::Skilled => format!(
            "Tier 2: {} has {} but is at {}% workload",
            craftsperson.name, required_skill, craftsperson.current_workload
        ),
        MatchTier::LeastLoaded => format!(
            "Tier 3: nobody available has {}; {} has the lowest workload ({}%)",
            required_skill, craftsperson.name, craftsperson.current_workload
        ),
    }
}

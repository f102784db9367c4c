//! Assignment and planning result models.
//!
//! This module contains the values returned by manual assignment
//! ([`Assignment`], [`Unassignment`]) and by a batch planning run
//! ([`AutoAssignPlan`]), including the per-order [`Placement`] trace.

use serde::{Deserialize, Serialize};

use super::{Craftsperson, WorkOrder};

/// Advisory flags computed for a manual assignment.
///
/// Neither flag blocks or rolls back the assignment; they exist for display.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentWarnings {
    /// The craftsperson does not list the order's required skill.
    pub skill_mismatch: bool,
    /// The craftsperson's workload reached the overload threshold.
    pub overloaded: bool,
}

impl AssignmentWarnings {
    /// Returns true if any advisory flag is raised.
    pub fn any(&self) -> bool {
        self.skill_mismatch || self.overloaded
    }
}

/// The outcome of a successful manual assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    /// The work order that was assigned.
    pub work_order_id: String,
    /// The craftsperson now holding the order.
    pub craftsperson_id: String,
    /// The craftsperson that held the order before, if it was reassigned.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_craftsperson_id: Option<String>,
    /// Workload of the new holder before the order was added.
    pub workload_before: u8,
    /// Workload of the new holder after the order was added.
    pub workload_after: u8,
    /// Advisory warnings for display.
    pub warnings: AssignmentWarnings,
}

/// The outcome of removing an order from its holder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unassignment {
    /// The work order that was released.
    pub work_order_id: String,
    /// The craftsperson that held it.
    pub craftsperson_id: String,
    /// Workload of that craftsperson after the release.
    pub workload_after: u8,
}

/// Which fallback rule selected a craftsperson during auto-assign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchTier {
    /// Has the skill and is under the tier-one workload threshold.
    SkilledWithCapacity,
    /// Has the skill, workload ignored.
    Skilled,
    /// Lowest workload in the pool, skill ignored.
    LeastLoaded,
}

impl MatchTier {
    /// Returns the tier number, 1 to 3.
    pub fn number(self) -> u8 {
        match self {
            MatchTier::SkilledWithCapacity => 1,
            MatchTier::Skilled => 2,
            MatchTier::LeastLoaded => 3,
        }
    }
}

/// One decision made by the planner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    /// The order that was placed.
    pub work_order_id: String,
    /// The craftsperson it was placed with.
    pub craftsperson_id: String,
    /// The rule that selected the craftsperson.
    pub tier: MatchTier,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// The result of a batch auto-assign run.
///
/// `updated_orders` and `updated_craftspeople` are the complete post-run
/// snapshot in registry order, not only the records that changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutoAssignPlan {
    /// Every work order after the run.
    pub updated_orders: Vec<WorkOrder>,
    /// Every craftsperson after the run.
    pub updated_craftspeople: Vec<Craftsperson>,
    /// Orders that stayed unassigned, in the order they were considered.
    pub unplaced_order_ids: Vec<String>,
    /// Placement decisions in the order they were made.
    pub placements: Vec<Placement>,
}

impl AutoAssignPlan {
    /// Returns the number of orders placed in this run.
    pub fn placed_count(&self) -> usize {
        self.placements.len()
    }
}

//! Core data models for the workshop allocator.
//!
//! This module contains all the domain models used throughout the engine.

mod assignment;
mod craftsperson;
mod work_order;

pub use assignment::{
    Assignment, AssignmentWarnings, AutoAssignPlan, MatchTier, Placement, Unassignment,
};
pub use craftsperson::{Absence, Craftsperson, MAX_WORKLOAD, ON_LEAVE_ABSENCE_ID, Skill};
pub use work_order::{Priority, WorkOrder};

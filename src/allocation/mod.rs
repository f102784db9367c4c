//! Allocation logic for the workshop allocator.
//!
//! This module contains availability resolution from absences, clamped
//! workload accounting, manual assign/unassign operations that keep both
//! registries in step, and the greedy priority-ordered auto-assign planner.

mod availability;
mod engine;
mod planner;
mod workload;

pub use availability::{active_absence, is_available, is_on_leave_now, next_available_date};
pub use engine::{assign, unassign};
pub use planner::{plan_auto_assignment, priority_queue, run_auto_assign, select_candidate};
pub use workload::{apply_delta, clamp_workload};

//! Work order model and related types.
//!
//! This module defines the [`WorkOrder`] struct and the [`Priority`] enum
//! used to order pending production work.

use std::cmp::Ordering;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The urgency of a work order.
///
/// Priorities compare by their explicit weight, so `High > Medium > Low`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    /// Rush jobs and promised pickups.
    High,
    /// Standard production work.
    Medium,
    /// Work that can wait for spare capacity.
    Low,
}

impl Priority {
    /// Returns the sort weight: high=3, medium=2, low=1.
    ///
    /// # Example
    ///
    /// ```
    /// use workshop_allocator::models::Priority;
    ///
    /// assert_eq!(Priority::High.weight(), 3);
    /// assert!(Priority::High > Priority::Low);
    /// ```
    pub fn weight(self) -> u8 {
        match self {
            Priority::High => 3,
            Priority::Medium => 2,
            Priority::Low => 1,
        }
    }
}

impl PartialOrd for Priority {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Priority {
    fn cmp(&self, other: &Self) -> Ordering {
        self.weight().cmp(&other.weight())
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Priority::High => write!(f, "high"),
            Priority::Medium => write!(f, "medium"),
            Priority::Low => write!(f, "low"),
        }
    }
}

/// A unit of production work requiring one named skill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkOrder {
    /// Unique identifier for the work order.
    pub id: String,
    /// What is being made or repaired (e.g., "Platinum solitaire ring").
    pub item_description: String,
    /// The skill a craftsperson needs for this order (e.g., "StoneSetting").
    pub required_skill: String,
    /// How urgent the order is.
    pub priority: Priority,
    /// The promised completion date.
    pub due_date: NaiveDate,
    /// Estimated bench hours.
    pub estimated_hours: Decimal,
    /// Percentage of a craftsperson's capacity this order consumes (0-100).
    pub workload_impact: u8,
    /// The craftsperson currently holding this order, if any.
    #[serde(default)]
    pub assigned_to: Option<String>,
}

impl WorkOrder {
    /// Returns true if no craftsperson holds this order.
    pub fn is_unassigned(&self) -> bool {
        self.assigned_to.is_none()
    }

    /// Returns true if the order is held by the given craftsperson.
    pub fn is_assigned_to(&self, craftsperson_id: &str) -> bool {
        self.assigned_to.as_deref() == Some(craftsperson_id)
    }

    /// Checks that `workload_impact` is a percentage (0-100).
    pub fn validate(&self) -> Result<(), String> {
        if self.workload_impact > 100 {
            return Err(format!(
                "work order {}: workload_impact {} exceeds 100",
                self.id, self.workload_impact
            ));
        }
        Ok(())
    }
}

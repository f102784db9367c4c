//! Configuration types for the allocator.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration and seed files.

use serde::{Deserialize, Serialize};

use crate::models::{Craftsperson, WorkOrder};

/// Workload thresholds, in percent of capacity.
///
/// Any field missing from `allocation.yaml` takes its default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    /// Tier 1 auto-assign only picks craftspeople strictly below this.
    pub tier_one_max_workload: u8,
    /// Manual assignment raises the `overloaded` warning at or above this.
    pub overload_warning: u8,
    /// The `overloaded` filter matches workloads strictly above this.
    pub overloaded_filter: u8,
    /// The `available` filter matches workloads strictly below this.
    pub available_filter: u8,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            tier_one_max_workload: 80,
            overload_warning: 90,
            overloaded_filter: 90,
            available_filter: 50,
        }
    }
}

/// The allocation settings loaded from `allocation.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationConfig {
    /// Workload thresholds.
    #[serde(default)]
    pub thresholds: Thresholds,
}

/// Structure of `craftspeople.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct CraftspeopleSeed {
    /// Craftsperson records in roster order.
    pub craftspeople: Vec<Craftsperson>,
}

/// Structure of `work_orders.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct WorkOrdersSeed {
    /// Work order records in intake order.
    pub work_orders: Vec<WorkOrder>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_thresholds() {
        let thresholds = Thresholds::default();
        assert_eq!(thresholds.tier_one_max_workload, 80);
        assert_eq!(thresholds.overload_warning, 90);
        assert_eq!(thresholds.overloaded_filter, 90);
        assert_eq!(thresholds.available_filter, 50);
    }

    #[test]
    fn test_partial_yaml_keeps_remaining_defaults() {
        let yaml = "thresholds:\n  tier_one_max_workload: 70\n";
        let config: AllocationConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.thresholds.tier_one_max_workload, 70);
        assert_eq!(config.thresholds.overload_warning, 90);
    }

    #[test]
    fn test_empty_mapping_uses_defaults() {
        let config: AllocationConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config, AllocationConfig::default());
    }
}

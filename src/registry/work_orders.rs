//! Work order registry.
//!
//! Owns every [`WorkOrder`] keyed by id and remembers intake order so that
//! listings and planning runs are deterministic.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{AllocationError, AllocationResult};
use crate::models::{Priority, WorkOrder};

/// Selects which work orders a listing returns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkOrderFilter {
    /// Every order.
    #[default]
    All,
    /// Orders nobody holds.
    Unassigned,
    /// Orders held by someone.
    Assigned,
    /// Orders held by the given craftsperson.
    AssignedTo(String),
    /// Orders with the given priority.
    WithPriority(Priority),
}

impl WorkOrderFilter {
    /// Returns true if the order passes this filter.
    pub fn matches(&self, order: &WorkOrder) -> bool {
        match self {
            WorkOrderFilter::All => true,
            WorkOrderFilter::Unassigned => order.is_unassigned(),
            WorkOrderFilter::Assigned => !order.is_unassigned(),
            WorkOrderFilter::AssignedTo(id) => order.is_assigned_to(id),
            WorkOrderFilter::WithPriority(priority) => order.priority == *priority,
        }
    }
}

/// Arena of work orders in intake order.
#[derive(Debug, Clone, Default)]
pub struct WorkOrderRegistry {
    orders: Vec<WorkOrder>,
    index: HashMap<String, usize>,
}

impl WorkOrderRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an order, replacing (in place) any record with the same id.
    ///
    /// Returns the replaced record, if there was one.
    pub(crate) fn insert(&mut self, order: WorkOrder) -> Option<WorkOrder> {
        match self.index.get(&order.id) {
            Some(&slot) => Some(std::mem::replace(&mut self.orders[slot], order)),
            None => {
                self.index.insert(order.id.clone(), self.orders.len());
                self.orders.push(order);
                None
            }
        }
    }

    /// Looks up an order by id.
    pub fn get(&self, id: &str) -> AllocationResult<&WorkOrder> {
        self.index
            .get(id)
            .map(|&slot| &self.orders[slot])
            .ok_or_else(|| AllocationError::WorkOrderNotFound { id: id.to_string() })
    }

    /// Returns true if an order with this id exists.
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Returns the orders nobody holds, in intake order.
    pub fn list_unassigned(&self) -> Vec<&WorkOrder> {
        self.list(&WorkOrderFilter::Unassigned)
    }

    /// Returns the orders passing `filter`, in intake order.
    pub fn list(&self, filter: &WorkOrderFilter) -> Vec<&WorkOrder> {
        self.orders.iter().filter(|o| filter.matches(o)).collect()
    }

    /// Iterates over every order in intake order.
    pub fn iter(&self) -> impl Iterator<Item = &WorkOrder> {
        self.orders.iter()
    }

    /// Number of orders.
    pub fn len(&self) -> usize {
        self.orders.len()
    }

    /// Returns true if the registry holds no orders.
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// Records who holds the order. Touches nothing else.
    ///
    /// Only the assignment engine calls this, so that both sides of the
    /// order/craftsperson link change together.
    pub(crate) fn set_assignment(
        &mut self,
        id: &str,
        craftsperson_id: Option<String>,
    ) -> AllocationResult<()> {
        let slot = *self
            .index
            .get(id)
            .ok_or_else(|| AllocationError::WorkOrderNotFound { id: id.to_string() })?;
        self.orders[slot].assigned_to = craftsperson_id;
        Ok(())
    }

    pub(crate) fn into_vec(self) -> Vec<WorkOrder> {
        self.orders
    }
}

impl FromIterator<WorkOrder> for WorkOrderRegistry {
    fn from_iter<I: IntoIterator<Item = WorkOrder>>(iter: I) -> Self {
        let mut registry = Self::new();
        for order in iter {
            registry.insert(order);
        }
        registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn order(id: &str, priority: Priority, assigned_to: Option<&str>) -> WorkOrder {
        WorkOrder {
            id: id.to_string(),
            item_description: format!("Item {}", id),
            required_skill: "Polishing".to_string(),
            priority,
            due_date: NaiveDate::from_ymd_opt(2026, 12, 1).unwrap(),
            estimated_hours: Decimal::new(2, 0),
            workload_impact: 10,
            assigned_to: assigned_to.map(str::to_string),
        }
    }

    fn registry() -> WorkOrderRegistry {
        [
            order("wo_1", Priority::Low, None),
            order("wo_2", Priority::High, Some("cp_1")),
            order("wo_3", Priority::Medium, None),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_get_existing_order() {
        let registry = registry();
        assert_eq!(registry.get("wo_2").unwrap().priority, Priority::High);
    }

    #[test]
    fn test_get_unknown_order_returns_not_found() {
        let registry = registry();
        match registry.get("wo_9") {
            Err(AllocationError::WorkOrderNotFound { id }) => assert_eq!(id, "wo_9"),
            other => panic!("Expected WorkOrderNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_list_unassigned_keeps_intake_order() {
        let registry = registry();
        let ids: Vec<&str> = registry
            .list_unassigned()
            .iter()
            .map(|o| o.id.as_str())
            .collect();
        assert_eq!(ids, vec!["wo_1", "wo_3"]);
    }

    #[test]
    fn test_list_filters() {
        let registry = registry();
        assert_eq!(registry.list(&WorkOrderFilter::All).len(), 3);
        assert_eq!(registry.list(&WorkOrderFilter::Assigned).len(), 1);
        assert_eq!(
            registry
                .list(&WorkOrderFilter::AssignedTo("cp_1".to_string()))
                .len(),
            1
        );
        assert_eq!(
            registry
                .list(&WorkOrderFilter::WithPriority(Priority::Medium))[0]
                .id,
            "wo_3"
        );
    }

    #[test]
    fn test_insert_replaces_in_place() {
        let mut registry = registry();
        let replaced = registry.insert(order("wo_1", Priority::High, None));
        assert_eq!(replaced.unwrap().priority, Priority::Low);
        assert_eq!(registry.len(), 3);
        assert_eq!(registry.iter().next().unwrap().priority, Priority::High);
    }

    #[test]
    fn test_set_assignment_only_changes_the_order() {
        let mut registry = registry();
        registry
            .set_assignment("wo_1", Some("cp_7".to_string()))
            .unwrap();
        assert!(registry.get("wo_1").unwrap().is_assigned_to("cp_7"));

        registry.set_assignment("wo_1", None).unwrap();
        assert!(registry.get("wo_1").unwrap().is_unassigned());
    }

    #[test]
    fn test_set_assignment_unknown_order() {
        let mut registry = registry();
        assert!(registry.set_assignment("missing", None).is_err());
    }

    #[test]
    fn test_filter_deserializes_from_snake_case() {
        let filter: WorkOrderFilter = serde_json::from_str("\"unassigned\"").unwrap();
        assert_eq!(filter, WorkOrderFilter::Unassigned);
    }
}

//! Registries owning the work order and craftsperson records.
//!
//! The two registries are always held together in [`Registries`] so that a
//! single lock or owner guards the order/craftsperson link. Outside this
//! crate the registries are read-only; records enter through
//! [`Registries::from_records`] or the `insert_*` methods, which keep the
//! link consistent.

mod craftspeople;
mod work_orders;

pub use craftspeople::{CraftspersonFilter, CraftspersonRegistry};
pub use work_orders::{WorkOrderFilter, WorkOrderRegistry};

use tracing::warn;

use crate::models::{Craftsperson, WorkOrder};

/// Both registries, owned together.
#[derive(Debug, Clone, Default)]
pub struct Registries {
    pub(crate) work_orders: WorkOrderRegistry,
    pub(crate) craftspeople: CraftspersonRegistry,
}

impl Registries {
    /// Builds registries from externally supplied records.
    ///
    /// The order side is authoritative for the link: each craftsperson's
    /// `assigned_orders` is rebuilt from the orders' `assigned_to`, and an
    /// order pointing at an unknown craftsperson is released. Workloads are
    /// taken as supplied (clamped to 100).
    pub fn from_records(craftspeople: Vec<Craftsperson>, work_orders: Vec<WorkOrder>) -> Self {
        let mut craftspeople: CraftspersonRegistry = craftspeople
            .into_iter()
            .map(|mut c| {
                c.assigned_orders.clear();
                c
            })
            .collect();

        let work_orders: WorkOrderRegistry = work_orders
            .into_iter()
            .map(|mut order| {
                if let Some(holder) = order.assigned_to.as_deref() {
                    if craftspeople.add_assigned_order(holder, &order.id).is_err() {
                        warn!(
                            work_order_id = %order.id,
                            craftsperson_id = %holder,
                            "Releasing work order held by unknown craftsperson"
                        );
                        order.assigned_to = None;
                    }
                }
                order
            })
            .collect();

        Self {
            work_orders,
            craftspeople,
        }
    }

    /// Work orders in intake order.
    pub fn work_orders(&self) -> &WorkOrderRegistry {
        &self.work_orders
    }

    /// Craftspeople in roster order.
    pub fn craftspeople(&self) -> &CraftspersonRegistry {
        &self.craftspeople
    }

    /// Adds or replaces a craftsperson record.
    ///
    /// The incoming `assigned_orders` is ignored and rebuilt from the orders
    /// that name this craftsperson, so replacing a record never strands an
    /// order. The workload is taken as supplied (clamped to 100).
    pub fn insert_craftsperson(&mut self, mut craftsperson: Craftsperson) -> Option<Craftsperson> {
        craftsperson.assigned_orders = self
            .work_orders
            .list(&WorkOrderFilter::AssignedTo(craftsperson.id.clone()))
            .into_iter()
            .map(|order| order.id.clone())
            .collect();
        self.craftspeople.insert(craftsperson)
    }

    /// Adds or replaces a work order record.
    ///
    /// A replaced order is first unlinked from its previous holder. The new
    /// record's `assigned_to` is then linked, or cleared when it names an
    /// unknown craftsperson. Workloads are not adjusted: like
    /// [`Registries::from_records`], intake takes workloads as supplied.
    pub fn insert_work_order(&mut self, mut order: WorkOrder) -> Option<WorkOrder> {
        if let Ok(existing) = self.work_orders.get(&order.id) {
            if let Some(previous) = existing.assigned_to.clone() {
                self.craftspeople
                    .remove_assigned_order(&previous, &order.id)
                    .ok();
            }
        }
        if let Some(holder) = order.assigned_to.as_deref() {
            if self.craftspeople.add_assigned_order(holder, &order.id).is_err() {
                warn!(
                    work_order_id = %order.id,
                    craftsperson_id = %holder,
                    "Releasing work order held by unknown craftsperson"
                );
                order.assigned_to = None;
            }
        }
        self.work_orders.insert(order)
    }

    /// Consumes the registries, returning the records in registry order.
    pub fn into_records(self) -> (Vec<WorkOrder>, Vec<Craftsperson>) {
        (self.work_orders.into_vec(), self.craftspeople.into_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Priority, Skill};
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn person(id: &str, held: &[&str]) -> Craftsperson {
        Craftsperson {
            id: id.to_string(),
            name: id.to_string(),
            skills: vec![Skill::new("Repair", 2)],
            current_workload: 20,
            efficiency_rating: Decimal::ONE,
            quality_rating: Decimal::ONE,
            absences: vec![],
            assigned_orders: held.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn order(id: &str, assigned_to: Option<&str>) -> WorkOrder {
        WorkOrder {
            id: id.to_string(),
            item_description: "Clasp repair".to_string(),
            required_skill: "Repair".to_string(),
            priority: Priority::Medium,
            due_date: NaiveDate::from_ymd_opt(2026, 11, 1).unwrap(),
            estimated_hours: Decimal::ONE,
            workload_impact: 10,
            assigned_to: assigned_to.map(str::to_string),
        }
    }

    #[test]
    fn test_from_records_rebuilds_links_from_orders() {
        let registries = Registries::from_records(
            vec![person("cp_1", &["stale_order"]), person("cp_2", &[])],
            vec![order("wo_1", Some("cp_2")), order("wo_2", None)],
        );

        assert!(registries.craftspeople.get("cp_1").unwrap().assigned_orders.is_empty());
        assert_eq!(
            registries.craftspeople.get("cp_2").unwrap().assigned_orders,
            vec!["wo_1"]
        );
    }

    #[test]
    fn test_from_records_releases_orders_of_unknown_holders() {
        let registries =
            Registries::from_records(vec![person("cp_1", &[])], vec![order("wo_1", Some("ghost"))]);
        assert!(registries.work_orders.get("wo_1").unwrap().is_unassigned());
    }

    #[test]
    fn test_replacing_craftsperson_keeps_held_orders() {
        let mut registries = Registries::from_records(
            vec![person("cp_1", &[])],
            vec![order("wo_1", Some("cp_1")), order("wo_2", None)],
        );

        let replaced = registries.insert_craftsperson(person("cp_1", &[]));

        assert!(replaced.is_some());
        assert_eq!(
            registries.craftspeople().get("cp_1").unwrap().assigned_orders,
            vec!["wo_1"]
        );
        assert!(registries.work_orders().get("wo_1").unwrap().is_assigned_to("cp_1"));
    }

    #[test]
    fn test_inserting_assigned_order_links_holder() {
        let mut registries = Registries::from_records(
            vec![person("cp_1", &[]), person("cp_2", &[])],
            vec![order("wo_1", Some("cp_1"))],
        );

        registries.insert_work_order(order("wo_9", Some("cp_1")));
        registries.insert_work_order(order("wo_1", Some("cp_2")));
        registries.insert_work_order(order("wo_5", Some("ghost")));

        let cp_1 = registries.craftspeople().get("cp_1").unwrap();
        assert_eq!(cp_1.assigned_orders, vec!["wo_9"]);
        assert_eq!(cp_1.current_workload, 20);
        assert_eq!(
            registries.craftspeople().get("cp_2").unwrap().assigned_orders,
            vec!["wo_1"]
        );
        assert!(registries.work_orders().get("wo_5").unwrap().is_unassigned());
    }

    #[test]
    fn test_into_records_preserves_order() {
        let registries = Registries::from_records(
            vec![person("cp_b", &[]), person("cp_a", &[])],
            vec![order("wo_2", None), order("wo_1", None)],
        );
        let (orders, people) = registries.into_records();
        assert_eq!(orders[0].id, "wo_2");
        assert_eq!(people[0].id, "cp_b");
    }
}

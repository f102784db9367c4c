//! The allocation facade.
//!
//! [`Workshop`] owns both registries and the thresholds, and exposes the
//! operations callers use through the [`AllocationService`] trait. Adapters
//! (the HTTP API, a gesture handler) talk to the trait and hold no business
//! logic of their own.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::allocation::{assign, is_on_leave_now, run_auto_assign, unassign};
use crate::config::{AllocationConfig, Thresholds};
use crate::error::AllocationResult;
use crate::models::{
    Absence, Assignment, AutoAssignPlan, Craftsperson, Unassignment, WorkOrder,
};
use crate::registry::{CraftspersonFilter, Registries, WorkOrderFilter};

/// The operations offered to adapters.
///
/// Mutating methods take `&mut self`: whoever shares an implementation
/// across threads must serialize them behind one lock covering both
/// registries.
pub trait AllocationService {
    /// Lists craftspeople passing `filter` on `today`.
    fn list_craftspeople(&self, filter: CraftspersonFilter, today: NaiveDate)
    -> Vec<Craftsperson>;

    /// Lists work orders passing `filter`.
    fn list_work_orders(&self, filter: &WorkOrderFilter) -> Vec<WorkOrder>;

    /// Assigns (or reassigns) an order to a craftsperson.
    fn assign(&mut self, work_order_id: &str, craftsperson_id: &str)
    -> AllocationResult<Assignment>;

    /// Releases an order from its current holder; a no-op when unassigned.
    fn unassign(&mut self, work_order_id: &str) -> AllocationResult<Option<Unassignment>>;

    /// Runs the batch planner for `today` and commits its result.
    fn auto_assign(&mut self, today: NaiveDate) -> AutoAssignPlan;

    /// Records an absence and returns its id.
    fn add_absence(
        &mut self,
        craftsperson_id: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
        reason: String,
    ) -> AllocationResult<String>;

    /// Deletes an absence.
    fn remove_absence(&mut self, craftsperson_id: &str, absence_id: &str)
    -> AllocationResult<Absence>;
}

/// Counts shown on the production dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkshopSummary {
    /// Total number of work orders.
    pub total_orders: usize,
    /// Orders someone holds.
    pub assigned_orders: usize,
    /// Orders nobody holds.
    pub unassigned_orders: usize,
    /// Total number of craftspeople.
    pub total_craftspeople: usize,
    /// Craftspeople above the overloaded threshold.
    pub overloaded: usize,
    /// Craftspeople matching the available filter.
    pub available: usize,
    /// Craftspeople away on the summary date.
    pub on_leave: usize,
    /// Mean workload across the roster, one decimal place.
    pub average_workload: Decimal,
}

/// Both registries plus the allocation settings.
#[derive(Debug, Clone, Default)]
pub struct Workshop {
    registries: Registries,
    config: AllocationConfig,
}

impl Workshop {
    /// Creates a workshop over existing registries.
    pub fn new(registries: Registries, config: AllocationConfig) -> Self {
        Self { registries, config }
    }

    /// Creates a workshop from external records.
    ///
    /// See [`Registries::from_records`] for how the links are reconciled.
    pub fn from_records(
        craftspeople: Vec<Craftsperson>,
        work_orders: Vec<WorkOrder>,
        config: AllocationConfig,
    ) -> Self {
        Self::new(Registries::from_records(craftspeople, work_orders), config)
    }

    /// Read access to both registries.
    pub fn registries(&self) -> &Registries {
        &self.registries
    }

    /// The workload thresholds in force.
    pub fn thresholds(&self) -> &Thresholds {
        &self.config.thresholds
    }

    /// Dashboard counts for `today`.
    pub fn summary(&self, today: NaiveDate) -> WorkshopSummary {
        let orders = &self.registries.work_orders;
        let people = &self.registries.craftspeople;
        let thresholds = self.thresholds();
        let count = |filter: CraftspersonFilter| people.list(filter, today, thresholds).len();

        let total_workload: i64 = people.iter().map(|c| i64::from(c.current_workload)).sum();
        let average_workload = if people.is_empty() {
            Decimal::ZERO
        } else {
            (Decimal::from(total_workload) / Decimal::from(people.len())).round_dp(1)
        };
        let assigned_orders = orders.list(&WorkOrderFilter::Assigned).len();

        WorkshopSummary {
            total_orders: orders.len(),
            assigned_orders,
            unassigned_orders: orders.len() - assigned_orders,
            total_craftspeople: people.len(),
            overloaded: count(CraftspersonFilter::Overloaded),
            available: count(CraftspersonFilter::Available),
            on_leave: people.iter().filter(|c| is_on_leave_now(c, today)).count(),
            average_workload,
        }
    }
}

impl AllocationService for Workshop {
    fn list_craftspeople(
        &self,
        filter: CraftspersonFilter,
        today: NaiveDate,
    ) -> Vec<Craftsperson> {
        self.registries
            .craftspeople
            .list(filter, today, self.thresholds())
            .into_iter()
            .cloned()
            .collect()
    }

    fn list_work_orders(&self, filter: &WorkOrderFilter) -> Vec<WorkOrder> {
        self.registries
            .work_orders
            .list(filter)
            .into_iter()
            .cloned()
            .collect()
    }

    fn assign(
        &mut self,
        work_order_id: &str,
        craftsperson_id: &str,
    ) -> AllocationResult<Assignment> {
        let thresholds = self.config.thresholds;
        let assignment = assign(
            &mut self.registries,
            work_order_id,
            craftsperson_id,
            &thresholds,
        )?;

        info!(
            work_order_id = %assignment.work_order_id,
            craftsperson_id = %assignment.craftsperson_id,
            workload_after = assignment.workload_after,
            skill_mismatch = assignment.warnings.skill_mismatch,
            overloaded = assignment.warnings.overloaded,
            "Work order assigned"
        );

        Ok(assignment)
    }

    fn unassign(&mut self, work_order_id: &str) -> AllocationResult<Option<Unassignment>> {
        let released = unassign(&mut self.registries, work_order_id)?;
        if let Some(released) = &released {
            info!(
                work_order_id = %released.work_order_id,
                craftsperson_id = %released.craftsperson_id,
                workload_after = released.workload_after,
                "Work order unassigned"
            );
        }
        Ok(released)
    }

    fn auto_assign(&mut self, today: NaiveDate) -> AutoAssignPlan {
        let thresholds = self.config.thresholds;
        run_auto_assign(&mut self.registries, today, &thresholds)
    }

    fn add_absence(
        &mut self,
        craftsperson_id: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
        reason: String,
    ) -> AllocationResult<String> {
        let absence_id =
            self.registries
                .craftspeople
                .add_absence(craftsperson_id, start_date, end_date, reason)?;

        info!(
            craftsperson_id = %craftsperson_id,
            absence_id = %absence_id,
            start_date = %start_date,
            end_date = %end_date,
            "Absence added"
        );

        Ok(absence_id)
    }

    fn remove_absence(
        &mut self,
        craftsperson_id: &str,
        absence_id: &str,
    ) -> AllocationResult<Absence> {
        let removed = self
            .registries
            .craftspeople
            .remove_absence(craftsperson_id, absence_id)?;
        info!(craftsperson_id = %craftsperson_id, absence_id = %absence_id, "Absence removed");
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bootstrap::{sample_craftspeople, sample_work_orders};
    use crate::error::AllocationError;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
    }

    fn workshop() -> Workshop {
        Workshop::from_records(
            sample_craftspeople(),
            sample_work_orders(today()),
            AllocationConfig::default(),
        )
    }

    #[test]
    fn test_summary_of_sample_workshop() {
        let summary = workshop().summary(today());
        assert_eq!(summary.total_orders, 6);
        assert_eq!(summary.unassigned_orders, 6);
        assert_eq!(summary.total_craftspeople, 8);
        // Lena Hoffmann at 92%.
        assert_eq!(summary.overloaded, 1);
        // 45, 30, 20, 10.
        assert_eq!(summary.available, 4);
        assert_eq!(summary.on_leave, 0);
        // (45+30+65+80+20+55+92+10) / 8 = 49.625
        assert_eq!(summary.average_workload, Decimal::new(496, 1));
    }

    #[test]
    fn test_summary_of_empty_workshop() {
        let summary = Workshop::default().summary(today());
        assert_eq!(summary.total_craftspeople, 0);
        assert_eq!(summary.average_workload, Decimal::ZERO);
    }

    #[test]
    fn test_absence_round_trip_changes_on_leave_listing() {
        let mut workshop = workshop();
        let absence_id = workshop
            .add_absence("cp_002", today(), today(), "Trade fair".to_string())
            .unwrap();

        let on_leave = workshop.list_craftspeople(CraftspersonFilter::OnLeave, today());
        assert_eq!(on_leave.len(), 1);
        assert_eq!(on_leave[0].id, "cp_002");

        let removed = workshop.remove_absence("cp_002", &absence_id).unwrap();
        assert_eq!(removed.reason, "Trade fair");
        assert!(
            workshop
                .list_craftspeople(CraftspersonFilter::OnLeave, today())
                .is_empty()
        );
    }

    #[test]
    fn test_absent_craftsperson_is_skipped_by_auto_assign() {
        let mut workshop = workshop();
        // cp_001 is the first StoneSetting specialist in the roster.
        workshop
            .add_absence("cp_001", today(), today(), "Vacation".to_string())
            .unwrap();
        let plan = workshop.auto_assign(today());

        assert!(plan.placements.iter().all(|p| p.craftsperson_id != "cp_001"));
        assert!(plan.unplaced_order_ids.is_empty());
    }

    #[test]
    fn test_auto_assign_commits_plan() {
        let mut workshop = workshop();
        let plan = workshop.auto_assign(today());

        assert_eq!(plan.placed_count(), 6);
        assert!(
            workshop
                .list_work_orders(&WorkOrderFilter::Unassigned)
                .is_empty()
        );
        assert_eq!(
            plan.updated_orders,
            workshop.list_work_orders(&WorkOrderFilter::All)
        );
    }

    #[test]
    fn test_assign_and_unassign_through_service() {
        let mut workshop = workshop();
        let assignment = workshop.assign("wo_1002", "cp_002").unwrap();
        assert_eq!(assignment.workload_after, 50);

        let listed = workshop.list_work_orders(&WorkOrderFilter::AssignedTo("cp_002".to_string()));
        assert_eq!(listed.len(), 1);

        let released = workshop.unassign("wo_1002").unwrap().unwrap();
        assert_eq!(released.workload_after, 30);
        assert_eq!(workshop.unassign("wo_1002").unwrap(), None);
    }

    #[test]
    fn test_service_propagates_not_found() {
        let mut workshop = workshop();
        assert!(matches!(
            workshop.assign("wo_missing", "cp_001"),
            Err(AllocationError::WorkOrderNotFound { .. })
        ));
        assert!(matches!(
            workshop.remove_absence("cp_missing", "abs"),
            Err(AllocationError::CraftspersonNotFound { .. })
        ));
    }
}

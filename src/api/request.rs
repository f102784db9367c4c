//! Request types for the allocator API.
//!
//! This module defines the JSON bodies and query strings accepted by the
//! endpoints.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::Priority;
use crate::registry::{CraftspersonFilter, WorkOrderFilter};

/// Body of `POST /work-orders/{id}/assignment`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignRequest {
    /// The craftsperson to give the order to.
    pub craftsperson_id: String,
}

/// Body of `POST /craftspeople/{id}/absences`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AbsenceRequest {
    /// First day away (inclusive).
    pub start_date: NaiveDate,
    /// Last day away (inclusive).
    pub end_date: NaiveDate,
    /// Why the craftsperson is away.
    #[serde(default)]
    pub reason: String,
}

/// Query string of `GET /craftspeople`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CraftspeopleQuery {
    /// Which listing to return; all craftspeople when omitted.
    #[serde(default)]
    pub filter: CraftspersonFilter,
}

/// Assignment status accepted by `GET /work-orders?filter=`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Every order.
    #[default]
    All,
    /// Orders nobody holds.
    Unassigned,
    /// Orders someone holds.
    Assigned,
}

/// Query string of `GET /work-orders`.
///
/// At most one criterion applies: `craftsperson_id` wins over `priority`,
/// which wins over `filter`. Unknown keys are rejected.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WorkOrdersQuery {
    /// Filter by assignment status.
    #[serde(default)]
    pub filter: OrderStatus,
    /// Only orders held by this craftsperson.
    pub craftsperson_id: Option<String>,
    /// Only orders of this priority.
    pub priority: Option<Priority>,
}

impl WorkOrdersQuery {
    /// Converts the query into a registry filter.
    pub fn into_filter(self) -> WorkOrderFilter {
        if let Some(id) = self.craftsperson_id {
            return WorkOrderFilter::AssignedTo(id);
        }
        if let Some(priority) = self.priority {
            return WorkOrderFilter::WithPriority(priority);
        }
        match self.filter {
            OrderStatus::All => WorkOrderFilter::All,
            OrderStatus::Unassigned => WorkOrderFilter::Unassigned,
            OrderStatus::Assigned => WorkOrderFilter::Assigned,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_absence_request_without_reason() {
        let json = r#"{"start_date": "2026-12-22", "end_date": "2026-12-31"}"#;
        let request: AbsenceRequest = serde_json::from_str(json).unwrap();
        assert_eq!(
            request.start_date,
            NaiveDate::from_ymd_opt(2026, 12, 22).unwrap()
        );
        assert!(request.reason.is_empty());
    }

    #[test]
    fn test_work_orders_query_defaults_to_all() {
        assert_eq!(WorkOrdersQuery::default().into_filter(), WorkOrderFilter::All);
    }

    #[test]
    fn test_work_orders_query_precedence() {
        let query = WorkOrdersQuery {
            filter: OrderStatus::Unassigned,
            craftsperson_id: Some("cp_001".to_string()),
            priority: Some(Priority::High),
        };
        assert_eq!(
            query.into_filter(),
            WorkOrderFilter::AssignedTo("cp_001".to_string())
        );

        let query = WorkOrdersQuery {
            filter: OrderStatus::Unassigned,
            craftsperson_id: None,
            priority: Some(Priority::High),
        };
        assert_eq!(
            query.into_filter(),
            WorkOrderFilter::WithPriority(Priority::High)
        );
    }

    #[test]
    fn test_work_orders_query_rejects_unknown_keys() {
        let result: Result<WorkOrdersQuery, _> =
            serde_json::from_str(r#"{"status": "unassigned"}"#);
        assert!(result.is_err());

        let query: WorkOrdersQuery = serde_json::from_str(r#"{"filter": "unassigned"}"#).unwrap();
        assert_eq!(query.into_filter(), WorkOrderFilter::Unassigned);
    }

    #[test]
    fn test_status_maps_to_filter() {
        let query = WorkOrdersQuery {
            filter: OrderStatus::Assigned,
            ..Default::default()
        };
        assert_eq!(query.into_filter(), WorkOrderFilter::Assigned);
    }
}

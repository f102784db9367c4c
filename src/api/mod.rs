//! HTTP API module for the workshop allocator.
//!
//! This module provides the REST endpoints for listing craftspeople and
//! work orders, manual assignment, auto-assignment and absence editing.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{AbsenceRequest, AssignRequest, CraftspeopleQuery, OrderStatus, WorkOrdersQuery};
pub use response::{AbsenceCreated, ApiError, ApiErrorResponse, CraftspersonView, UnassignResponse};
pub use state::AppState;

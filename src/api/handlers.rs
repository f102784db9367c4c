//! HTTP request handlers for the allocator API.
//!
//! This module contains the handler functions for all API endpoints. Each
//! handler translates one request into one [`AllocationService`] call.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::AllocationError;
use crate::workshop::AllocationService;

use super::request::{AbsenceRequest, AssignRequest, CraftspeopleQuery, WorkOrdersQuery};
use super::response::{
    AbsenceCreated, ApiError, ApiErrorResponse, CraftspersonView, UnassignResponse,
};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/craftspeople", get(list_craftspeople_handler))
        .route("/craftspeople/:id/absences", post(add_absence_handler))
        .route(
            "/craftspeople/:id/absences/:absence_id",
            delete(remove_absence_handler),
        )
        .route("/work-orders", get(list_work_orders_handler))
        .route(
            "/work-orders/:id/assignment",
            post(assign_handler).delete(unassign_handler),
        )
        .route("/auto-assign", post(auto_assign_handler))
        .route("/summary", get(summary_handler))
        .with_state(state)
}

/// Handler for GET /craftspeople.
async fn list_craftspeople_handler(
    State(state): State<AppState>,
    query: Result<Query<CraftspeopleQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let Query(query) = match query {
        Ok(query) => query,
        Err(rejection) => return query_rejection(rejection, correlation_id),
    };

    let today = state.today();
    let craftspeople = state.read().await.list_craftspeople(query.filter, today);
    info!(
        correlation_id = %correlation_id,
        filter = ?query.filter,
        count = craftspeople.len(),
        "Listed craftspeople"
    );

    let views: Vec<CraftspersonView> = craftspeople
        .into_iter()
        .map(|c| CraftspersonView::new(c, today))
        .collect();
    (StatusCode::OK, Json(views)).into_response()
}

/// Handler for GET /work-orders.
async fn list_work_orders_handler(
    State(state): State<AppState>,
    query: Result<Query<WorkOrdersQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let Query(query) = match query {
        Ok(query) => query,
        Err(rejection) => return query_rejection(rejection, correlation_id),
    };

    let filter = query.into_filter();
    let orders = state.read().await.list_work_orders(&filter);
    info!(
        correlation_id = %correlation_id,
        filter = ?filter,
        count = orders.len(),
        "Listed work orders"
    );

    (StatusCode::OK, Json(orders)).into_response()
}

/// Handler for POST /work-orders/{id}/assignment.
///
/// Returns the assignment with its advisory warnings. A skill mismatch or
/// overload never turns into an error status.
async fn assign_handler(
    State(state): State<AppState>,
    Path(work_order_id): Path<String>,
    payload: Result<Json<AssignRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return json_rejection(rejection, correlation_id),
    };

    let result = state
        .write()
        .await
        .assign(&work_order_id, &request.craftsperson_id);
    match result {
        Ok(assignment) => {
            info!(
                correlation_id = %correlation_id,
                work_order_id = %work_order_id,
                craftsperson_id = %assignment.craftsperson_id,
                warnings = assignment.warnings.any(),
                "Assignment request completed"
            );
            (StatusCode::OK, Json(assignment)).into_response()
        }
        Err(err) => error_response(err, correlation_id),
    }
}

/// Handler for DELETE /work-orders/{id}/assignment.
async fn unassign_handler(
    State(state): State<AppState>,
    Path(work_order_id): Path<String>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let result = state.write().await.unassign(&work_order_id);
    match result {
        Ok(released) => {
            info!(
                correlation_id = %correlation_id,
                work_order_id = %work_order_id,
                released = released.is_some(),
                "Unassignment request completed"
            );
            (StatusCode::OK, Json(UnassignResponse { released })).into_response()
        }
        Err(err) => error_response(err, correlation_id),
    }
}

/// Handler for POST /auto-assign.
///
/// Planning and committing happen under one write lock, so no manual
/// assignment can interleave with the run.
async fn auto_assign_handler(State(state): State<AppState>) -> Response {
    let correlation_id = Uuid::new_v4();
    let today = state.today();

    let start_time = Instant::now();
    let plan = state.write().await.auto_assign(today);
    info!(
        correlation_id = %correlation_id,
        placed = plan.placed_count(),
        unplaced = plan.unplaced_order_ids.len(),
        duration_us = start_time.elapsed().as_micros(),
        "Auto-assign request completed"
    );

    (StatusCode::OK, Json(plan)).into_response()
}

/// Handler for POST /craftspeople/{id}/absences.
async fn add_absence_handler(
    State(state): State<AppState>,
    Path(craftsperson_id): Path<String>,
    payload: Result<Json<AbsenceRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return json_rejection(rejection, correlation_id),
    };

    let result = state.write().await.add_absence(
        &craftsperson_id,
        request.start_date,
        request.end_date,
        request.reason,
    );
    match result {
        Ok(absence_id) => (StatusCode::CREATED, Json(AbsenceCreated { absence_id })).into_response(),
        Err(err) => error_response(err, correlation_id),
    }
}

/// Handler for DELETE /craftspeople/{id}/absences/{absence_id}.
async fn remove_absence_handler(
    State(state): State<AppState>,
    Path((craftsperson_id, absence_id)): Path<(String, String)>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let result = state
        .write()
        .await
        .remove_absence(&craftsperson_id, &absence_id);
    match result {
        Ok(_) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => error_response(err, correlation_id),
    }
}

/// Handler for GET /summary.
async fn summary_handler(State(state): State<AppState>) -> Response {
    let summary = state.read().await.summary(state.today());
    (StatusCode::OK, Json(summary)).into_response()
}

fn error_response(err: AllocationError, correlation_id: Uuid) -> Response {
    warn!(correlation_id = %correlation_id, error = %err, "Request failed");
    ApiErrorResponse::from(err).into_response()
}

fn json_rejection(rejection: JsonRejection, correlation_id: Uuid) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    ApiErrorResponse::bad_request(error).into_response()
}

fn query_rejection(rejection: QueryRejection, correlation_id: Uuid) -> Response {
    let body_text = rejection.body_text();
    warn!(
        correlation_id = %correlation_id,
        error = %body_text,
        "Invalid query string"
    );
    ApiErrorResponse::bad_request(ApiError::validation_error(body_text)).into_response()
}

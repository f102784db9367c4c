//! Response types for the allocator API.
//!
//! This module defines the error body, the mapping from
//! [`AllocationError`] to HTTP status codes, and the views returned by the
//! listing endpoints.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::allocation::{active_absence, next_available_date};
use crate::error::AllocationError;
use crate::models::{Absence, Craftsperson, Unassignment};

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }
}

/// API error with HTTP status code.
#[derive(Debug)]
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// A 400 response with the given body.
    pub fn bad_request(error: ApiError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error,
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<AllocationError> for ApiErrorResponse {
    fn from(error: AllocationError) -> Self {
        let message = error.to_string();
        match error {
            AllocationError::WorkOrderNotFound { .. } => ApiErrorResponse {
                status: StatusCode::NOT_FOUND,
                error: ApiError::new("WORK_ORDER_NOT_FOUND", message),
            },
            AllocationError::CraftspersonNotFound { .. } => ApiErrorResponse {
                status: StatusCode::NOT_FOUND,
                error: ApiError::new("CRAFTSPERSON_NOT_FOUND", message),
            },
            AllocationError::AbsenceNotFound { .. } => ApiErrorResponse {
                status: StatusCode::NOT_FOUND,
                error: ApiError::new("ABSENCE_NOT_FOUND", message),
            },
            AllocationError::InvalidAbsence { .. } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "INVALID_ABSENCE",
                    message,
                    "An absence must end on or after the day it starts",
                ),
            },
            AllocationError::ConfigNotFound { .. } | AllocationError::ConfigParseError { .. } => {
                ApiErrorResponse {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    error: ApiError::with_details("CONFIG_ERROR", "Configuration error", message),
                }
            }
        }
    }
}

/// A craftsperson together with their availability on the request date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CraftspersonView {
    /// The stored record.
    #[serde(flatten)]
    pub craftsperson: Craftsperson,
    /// Away on the request date.
    pub on_leave: bool,
    /// The absence covering the request date, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_absence: Option<Absence>,
    /// First day on or after the request date with no absence.
    pub available_from: NaiveDate,
}

impl CraftspersonView {
    /// Derives availability for `today`.
    pub fn new(craftsperson: Craftsperson, today: NaiveDate) -> Self {
        let current_absence = active_absence(&craftsperson, today).cloned();
        let available_from = next_available_date(&craftsperson, today);
        Self {
            on_leave: current_absence.is_some(),
            current_absence,
            available_from,
            craftsperson,
        }
    }
}

/// Body returned when an absence is created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AbsenceCreated {
    /// The generated absence id.
    pub absence_id: String,
}

/// Body returned by `DELETE /work-orders/{id}/assignment`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnassignResponse {
    /// The release that happened, or `null` if the order was not held.
    pub released: Option<Unassignment>,
}

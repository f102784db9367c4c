//! Error types for the workshop allocator.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while allocating work.

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for the workshop allocator.
///
/// Allocation itself only fails on unknown ids; the remaining variants
/// cover absence validation and configuration or seed loading.
///
/// # Example
///
/// ```
/// use workshop_allocator::error::AllocationError;
///
/// let error = AllocationError::WorkOrderNotFound {
///     id: "wo_404".to_string(),
/// };
/// assert_eq!(error.to_string(), "Work order not found: wo_404");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AllocationError {
    /// No work order with the given id exists in the registry.
    #[error("Work order not found: {id}")]
    WorkOrderNotFound {
        /// The id that was not found.
        id: String,
    },

    /// No craftsperson with the given id exists in the registry.
    #[error("Craftsperson not found: {id}")]
    CraftspersonNotFound {
        /// The id that was not found.
        id: String,
    },

    /// The craftsperson has no absence with the given id.
    #[error("Absence '{absence_id}' not found for craftsperson '{craftsperson_id}'")]
    AbsenceNotFound {
        /// The craftsperson whose calendar was searched.
        craftsperson_id: String,
        /// The absence id that was not found.
        absence_id: String,
    },

    /// An absence interval ends before it starts.
    #[error("Invalid absence: end date {end_date} is before start date {start_date}")]
    InvalidAbsence {
        /// First day of the requested absence.
        start_date: NaiveDate,
        /// Last day of the requested absence.
        end_date: NaiveDate,
    },

    /// Configuration or seed file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration or seed file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },
}

impl AllocationError {
    /// Returns true for the not-found family of errors.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            AllocationError::WorkOrderNotFound { .. }
                | AllocationError::CraftspersonNotFound { .. }
                | AllocationError::AbsenceNotFound { .. }
        )
    }
}

/// A type alias for Results that return AllocationError.
pub type AllocationResult<T> = Result<T, AllocationError>;

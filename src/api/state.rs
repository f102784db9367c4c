//! Application state for the allocator API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::workshop::Workshop;

/// Shared application state.
///
/// Both registries live inside one [`Workshop`] behind a single lock, so
/// a reader never sees an order linked to a craftsperson whose list has
/// not caught up. Mutations take the write half; listings share the read
/// half.
#[derive(Clone)]
pub struct AppState {
    workshop: Arc<RwLock<Workshop>>,
    planning_date: Option<NaiveDate>,
}

impl AppState {
    /// Creates a new application state around the given workshop.
    pub fn new(workshop: Workshop) -> Self {
        Self {
            workshop: Arc::new(RwLock::new(workshop)),
            planning_date: None,
        }
    }

    /// Pins "today" to a fixed date instead of the current UTC date.
    pub fn with_planning_date(mut self, date: NaiveDate) -> Self {
        self.planning_date = Some(date);
        self
    }

    /// The date used for availability checks and planning.
    pub fn today(&self) -> NaiveDate {
        self.planning_date
            .unwrap_or_else(|| Utc::now().date_naive())
    }

    /// Shared access for listings.
    pub async fn read(&self) -> RwLockReadGuard<'_, Workshop> {
        self.workshop.read().await
    }

    /// Exclusive access for mutations.
    pub async fn write(&self) -> RwLockWriteGuard<'_, Workshop> {
        self.workshop.write().await
    }
}

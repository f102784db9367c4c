//! Craftsperson registry.
//!
//! Owns every [`Craftsperson`] keyed by id, in roster order. Workload and
//! held-order mutators are crate-private: only the workload accountant and
//! the assignment engine change them.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::allocation::is_available;
use crate::config::Thresholds;
use crate::error::{AllocationError, AllocationResult};
use crate::models::{Absence, Craftsperson, MAX_WORKLOAD};

/// The standard craftsperson listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CraftspersonFilter {
    /// Everyone.
    #[default]
    All,
    /// Workload above the overloaded threshold (default 90).
    Overloaded,
    /// Workload below the available threshold (default 50) and not away today.
    Available,
    /// Away today according to their absences.
    OnLeave,
}

impl CraftspersonFilter {
    /// Returns true if the craftsperson passes this filter on `today`.
    pub fn matches(
        &self,
        craftsperson: &Craftsperson,
        today: NaiveDate,
        thresholds: &Thresholds,
    ) -> bool {
        match self {
            CraftspersonFilter::All => true,
            CraftspersonFilter::Overloaded => {
                craftsperson.current_workload > thresholds.overloaded_filter
            }
            CraftspersonFilter::Available => {
                craftsperson.current_workload < thresholds.available_filter
                    && is_available(craftsperson, today)
            }
            CraftspersonFilter::OnLeave => !is_available(craftsperson, today),
        }
    }
}

/// Arena of craftspeople in roster order.
#[derive(Debug, Clone, Default)]
pub struct CraftspersonRegistry {
    people: Vec<Craftsperson>,
    index: HashMap<String, usize>,
}

impl CraftspersonRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a craftsperson, replacing (in place) any record with the same id.
    ///
    /// Workloads above 100 are clamped on the way in.
    pub(crate) fn insert(&mut self, mut craftsperson: Craftsperson) -> Option<Craftsperson> {
        craftsperson.current_workload = craftsperson.current_workload.min(MAX_WORKLOAD);
        match self.index.get(&craftsperson.id) {
            Some(&slot) => Some(std::mem::replace(&mut self.people[slot], craftsperson)),
            None => {
                self.index
                    .insert(craftsperson.id.clone(), self.people.len());
                self.people.push(craftsperson);
                None
            }
        }
    }

    /// Looks up a craftsperson by id.
    pub fn get(&self, id: &str) -> AllocationResult<&Craftsperson> {
        self.slot(id).map(|slot| &self.people[slot])
    }

    /// Returns true if a craftsperson with this id exists.
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Returns everyone passing `predicate`, in roster order.
    pub fn list_by<F>(&self, predicate: F) -> Vec<&Craftsperson>
    where
        F: Fn(&Craftsperson) -> bool,
    {
        self.people.iter().filter(|c| predicate(c)).collect()
    }

    /// Returns everyone passing one of the standard filters on `today`.
    pub fn list(
        &self,
        filter: CraftspersonFilter,
        today: NaiveDate,
        thresholds: &Thresholds,
    ) -> Vec<&Craftsperson> {
        self.list_by(|c| filter.matches(c, today, thresholds))
    }

    /// Iterates over everyone in roster order.
    pub fn iter(&self) -> impl Iterator<Item = &Craftsperson> {
        self.people.iter()
    }

    /// Number of craftspeople.
    pub fn len(&self) -> usize {
        self.people.len()
    }

    /// Returns true if the roster is empty.
    pub fn is_empty(&self) -> bool {
        self.people.is_empty()
    }

    /// Records an absence and returns its generated id.
    ///
    /// The interval is inclusive; a single-day absence has equal dates.
    pub fn add_absence(
        &mut self,
        id: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
        reason: impl Into<String>,
    ) -> AllocationResult<String> {
        if end_date < start_date {
            return Err(AllocationError::InvalidAbsence {
                start_date,
                end_date,
            });
        }
        let slot = self.slot(id)?;
        let absence_id = Uuid::new_v4().to_string();
        self.people[slot].absences.push(Absence {
            id: absence_id.clone(),
            start_date,
            end_date,
            reason: reason.into(),
        });
        Ok(absence_id)
    }

    /// Removes an absence and returns it.
    pub fn remove_absence(&mut self, id: &str, absence_id: &str) -> AllocationResult<Absence> {
        let slot = self.slot(id)?;
        let absences = &mut self.people[slot].absences;
        let position = absences
            .iter()
            .position(|a| a.id == absence_id)
            .ok_or_else(|| AllocationError::AbsenceNotFound {
                craftsperson_id: id.to_string(),
                absence_id: absence_id.to_string(),
            })?;
        Ok(absences.remove(position))
    }

    pub(crate) fn add_assigned_order(&mut self, id: &str, order_id: &str) -> AllocationResult<()> {
        let slot = self.slot(id)?;
        let held = &mut self.people[slot].assigned_orders;
        if !held.iter().any(|o| o == order_id) {
            held.push(order_id.to_string());
        }
        Ok(())
    }

    pub(crate) fn remove_assigned_order(
        &mut self,
        id: &str,
        order_id: &str,
    ) -> AllocationResult<()> {
        let slot = self.slot(id)?;
        self.people[slot].assigned_orders.retain(|o| o != order_id);
        Ok(())
    }

    pub(crate) fn set_workload(&mut self, id: &str, value: u8) -> AllocationResult<()> {
        let slot = self.slot(id)?;
        self.people[slot].current_workload = value.min(MAX_WORKLOAD);
        Ok(())
    }

    pub(crate) fn into_vec(self) -> Vec<Craftsperson> {
        self.people
    }

    fn slot(&self, id: &str) -> AllocationResult<usize> {
        self.index
            .get(id)
            .copied()
            .ok_or_else(|| AllocationError::CraftspersonNotFound { id: id.to_string() })
    }
}

impl FromIterator<Craftsperson> for CraftspersonRegistry {
    fn from_iter<I: IntoIterator<Item = Craftsperson>>(iter: I) -> Self {
        let mut registry = Self::new();
        for craftsperson in iter {
            registry.insert(craftsperson);
        }
        registry
    }
}

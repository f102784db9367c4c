//! Availability resolution from absence intervals.
//!
//! These functions are the only place availability is decided. On-leave
//! status is always derived from the absences for the date in question,
//! never cached on the record.

use chrono::NaiveDate;

use crate::models::{Absence, Craftsperson};

/// Checks whether a craftsperson can take work on `date`.
///
/// Returns `false` iff any absence interval (inclusive, day granularity)
/// contains `date`.
///
/// # Example
///
/// ```
/// use workshop_allocator::allocation::is_available;
/// use workshop_allocator::models::{Absence, Craftsperson};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let mut craftsperson = Craftsperson {
///     id: "cp_001".to_string(),
///     name: "Mara Okafor".to_string(),
///     skills: vec![],
///     current_workload: 0,
///     efficiency_rating: Decimal::ONE,
///     quality_rating: Decimal::ONE,
///     absences: vec![],
///     assigned_orders: vec![],
/// };
/// let day = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
/// assert!(is_available(&craftsperson, day));
///
/// craftsperson.absences.push(Absence {
///     id: "abs_1".to_string(),
///     start_date: day,
///     end_date: day,
///     reason: "Doctor".to_string(),
/// });
/// assert!(!is_available(&craftsperson, day));
/// ```
pub fn is_available(craftsperson: &Craftsperson, date: NaiveDate) -> bool {
    active_absence(craftsperson, date).is_none()
}

/// Returns true if the craftsperson is away on `today`.
pub fn is_on_leave_now(craftsperson: &Craftsperson, today: NaiveDate) -> bool {
    !is_available(craftsperson, today)
}

/// Returns the first absence (in calendar-entry order) covering `date`.
pub fn active_absence(craftsperson: &Craftsperson, date: NaiveDate) -> Option<&Absence> {
    craftsperson.absences.iter().find(|a| a.contains(date))
}

/// Returns the first day on or after `from` with no absence.
///
/// Overlapping and back-to-back absences are skipped as one block.
pub fn next_available_date(craftsperson: &Craftsperson, from: NaiveDate) -> NaiveDate {
    let mut date = from;
    while let Some(end) = craftsperson
        .absences
        .iter()
        .filter(|a| a.contains(date))
        .map(|a| a.end_date)
        .max()
    {
        match end.succ_opt() {
            Some(next) => date = next,
            None => return NaiveDate::MAX,
        }
    }
    date
}

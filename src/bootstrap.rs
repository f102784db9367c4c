//! Seeding the registries at startup.
//!
//! Craftsperson records come from an external source. When that source
//! fails or returns nothing, the registries are seeded with a generated
//! sample roster instead and a non-fatal warning is handed back to the
//! caller for display.

use std::fmt::Display;

use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;
use tracing::warn;

use crate::models::{Craftsperson, Priority, Skill, WorkOrder};

/// Records to seed a registry with, plus a warning if they are sample data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Seeded<T> {
    /// The records to load.
    pub records: Vec<T>,
    /// Set when the fetched records were unusable and samples were used.
    pub warning: Option<String>,
}

impl<T> Seeded<T> {
    /// Returns true if the records are generated sample data.
    pub fn is_sample(&self) -> bool {
        self.warning.is_some()
    }
}

/// Uses fetched craftspeople, or the sample roster on failure or empty result.
///
/// # Example
///
/// ```
/// use workshop_allocator::bootstrap::seed_craftspeople;
///
/// let seeded = seed_craftspeople(Err::<Vec<_>, _>("connection refused"));
/// assert!(seeded.is_sample());
/// assert!(!seeded.records.is_empty());
/// ```
pub fn seed_craftspeople<E: Display>(
    fetched: Result<Vec<Craftsperson>, E>,
) -> Seeded<Craftsperson> {
    fallback_to_sample(fetched, sample_craftspeople, "craftspeople")
}

/// Uses fetched work orders, or sample orders due from `today` on failure or empty result.
pub fn seed_work_orders<E: Display>(
    fetched: Result<Vec<WorkOrder>, E>,
    today: NaiveDate,
) -> Seeded<WorkOrder> {
    fallback_to_sample(fetched, || sample_work_orders(today), "work orders")
}

fn fallback_to_sample<T, E, F>(fetched: Result<Vec<T>, E>, sample: F, what: &str) -> Seeded<T>
where
    E: Display,
    F: FnOnce() -> Vec<T>,
{
    let warning = match fetched {
        Ok(records) if !records.is_empty() => {
            return Seeded {
                records,
                warning: None,
            };
        }
        Ok(_) => format!("No {} were returned; using generated sample data", what),
        Err(err) => format!("Failed to load {} ({}); using generated sample data", what, err),
    };

    warn!(records = what, "{}", warning);

    Seeded {
        records: sample(),
        warning: Some(warning),
    }
}

const SAMPLE_ROSTER: [(&str, &[(&str, u8)], u8, i64, i64); 8] = [
    ("Mara Okafor", &[("StoneSetting", 3), ("Polishing", 2)], 45, 94, 49),
    ("Tomasz Wierzbicki", &[("Casting", 3), ("Soldering", 2)], 30, 88, 46),
    ("Aiko Tanabe", &[("Engraving", 3), ("Repair", 1)], 65, 91, 48),
    ("Rafael Mendes", &[("Repair", 3), ("Soldering", 3)], 80, 85, 44),
    ("Ines Duarte", &[("StoneSetting", 2), ("Engraving", 1)], 20, 79, 42),
    ("Kwame Asante", &[("Polishing", 3), ("Casting", 1)], 55, 90, 45),
    ("Lena Hoffmann", &[("Soldering", 2), ("Repair", 2)], 92, 83, 47),
    ("Priya Raman", &[("Casting", 2), ("StoneSetting", 1)], 10, 76, 41),
];

/// A fixed jewelry-workshop roster covering every sample skill.
pub fn sample_craftspeople() -> Vec<Craftsperson> {
    SAMPLE_ROSTER
        .iter()
        .enumerate()
        .map(
            |(i, (name, skills, workload, efficiency, quality))| Craftsperson {
                id: format!("cp_{:03}", i + 1),
                name: name.to_string(),
                skills: skills
                    .iter()
                    .map(|(skill, level)| Skill::new(*skill, *level))
                    .collect(),
                current_workload: *workload,
                efficiency_rating: Decimal::new(*efficiency, 2),
                quality_rating: Decimal::new(*quality, 1),
                absences: vec![],
                assigned_orders: vec![],
            },
        )
        .collect()
}

const SAMPLE_ORDERS: [(&str, &str, Priority, u64, i64, u8); 6] = [
    ("Platinum solitaire engagement ring", "StoneSetting", Priority::High, 5, 65, 30),
    ("Cast signet ring blank", "Casting", Priority::Medium, 10, 30, 20),
    ("Engrave anniversary date on band", "Engraving", Priority::Low, 14, 15, 10),
    ("Repair broken clasp on pearl necklace", "Repair", Priority::High, 3, 10, 10),
    ("Solder chain link", "Soldering", Priority::Medium, 7, 10, 5),
    ("Restore vintage brooch finish", "Polishing", Priority::Low, 21, 40, 25),
];

/// Unassigned sample orders due within three weeks of `today`.
pub fn sample_work_orders(today: NaiveDate) -> Vec<WorkOrder> {
    SAMPLE_ORDERS
        .iter()
        .enumerate()
        .map(
            |(i, (description, skill, priority, due_in_days, tenths_of_hours, impact))| WorkOrder {
                id: format!("wo_{:04}", 1001 + i),
                item_description: description.to_string(),
                required_skill: skill.to_string(),
                priority: *priority,
                due_date: today
                    .checked_add_days(Days::new(*due_in_days))
                    .unwrap_or(today),
                estimated_hours: Decimal::new(*tenths_of_hours, 1),
                workload_impact: *impact,
                assigned_to: None,
            },
        )
        .collect()
}

//! Craftsperson model and related types.
//!
//! This module defines the [`Craftsperson`] struct along with the
//! [`Skill`] and [`Absence`] records attached to it.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Upper bound of a craftsperson's workload percentage.
pub const MAX_WORKLOAD: u8 = 100;

/// Id of the open-ended absence created for records flagged `on_leave`.
pub const ON_LEAVE_ABSENCE_ID: &str = "on_leave";

/// A named skill with a proficiency level from 1 (apprentice) to 3 (master).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    /// Skill name (e.g., "StoneSetting", "Casting").
    pub name: String,
    /// Proficiency level, 1 to 3.
    pub level: u8,
}

impl Skill {
    /// Creates a skill, clamping the level into 1..=3.
    ///
    /// # Example
    ///
    /// ```
    /// use workshop_allocator::models::Skill;
    ///
    /// assert_eq!(Skill::new("Casting", 7).level, 3);
    /// assert_eq!(Skill::new("Casting", 0).level, 1);
    /// ```
    pub fn new(name: impl Into<String>, level: u8) -> Self {
        Self {
            name: name.into(),
            level: level.clamp(1, 3),
        }
    }

    /// Checks that the level is within 1..=3.
    ///
    /// Records built with [`Skill::new`] always pass; this guards
    /// deserialized input.
    pub fn validate(&self) -> Result<(), String> {
        if !(1..=3).contains(&self.level) {
            return Err(format!(
                "skill {} has level {}, expected 1 to 3",
                self.name, self.level
            ));
        }
        Ok(())
    }
}

/// A dated interval during which a craftsperson cannot take work.
///
/// Both `start_date` and `end_date` are inclusive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Absence {
    /// Unique identifier of the absence.
    pub id: String,
    /// First day away (inclusive).
    pub start_date: NaiveDate,
    /// Last day away (inclusive).
    pub end_date: NaiveDate,
    /// Free-text reason (e.g., "Vacation", "Trade fair").
    pub reason: String,
}

impl Absence {
    /// Checks whether the given day falls inside this absence.
    ///
    /// # Example
    ///
    /// ```
    /// use workshop_allocator::models::Absence;
    /// use chrono::NaiveDate;
    ///
    /// let absence = Absence {
    ///     id: "abs_1".to_string(),
    ///     start_date: NaiveDate::from_ymd_opt(2026, 8, 3).unwrap(),
    ///     end_date: NaiveDate::from_ymd_opt(2026, 8, 7).unwrap(),
    ///     reason: "Vacation".to_string(),
    /// };
    ///
    /// assert!(absence.contains(NaiveDate::from_ymd_opt(2026, 8, 3).unwrap())); // first day
    /// assert!(absence.contains(NaiveDate::from_ymd_opt(2026, 8, 7).unwrap())); // last day
    /// assert!(!absence.contains(NaiveDate::from_ymd_opt(2026, 8, 8).unwrap()));
    /// ```
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }
}

/// A skilled worker with a finite capacity expressed as a workload percentage.
///
/// Records may arrive with an `on_leave: true` flag. It is not kept as a
/// field: loading turns it into an open-ended absence with id
/// [`ON_LEAVE_ABSENCE_ID`], so the craftsperson stays unavailable until that
/// absence is removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "CraftspersonRecord")]
pub struct Craftsperson {
    /// Unique identifier for the craftsperson.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Skills with proficiency levels.
    #[serde(default)]
    pub skills: Vec<Skill>,
    /// Capacity in use, 0 to 100.
    #[serde(default)]
    pub current_workload: u8,
    /// Informational efficiency rating; not used for matching.
    pub efficiency_rating: Decimal,
    /// Informational quality rating; not used for matching.
    pub quality_rating: Decimal,
    /// Calendar absences.
    #[serde(default)]
    pub absences: Vec<Absence>,
    /// Ids of the work orders currently held.
    #[serde(default)]
    pub assigned_orders: Vec<String>,
}

impl Craftsperson {
    /// Returns true if the craftsperson lists the named skill at any level.
    pub fn has_skill(&self, skill: &str) -> bool {
        self.skills.iter().any(|s| s.name == skill)
    }

    /// Returns the proficiency level for the named skill, if present.
    pub fn skill_level(&self, skill: &str) -> Option<u8> {
        self.skills.iter().find(|s| s.name == skill).map(|s| s.level)
    }

    /// Returns true if the work order id is in this craftsperson's list.
    pub fn holds_order(&self, order_id: &str) -> bool {
        self.assigned_orders.iter().any(|id| id == order_id)
    }

    /// Checks skill levels and absence intervals of a loaded record.
    ///
    /// `current_workload` is not checked here; the registry clamps it.
    pub fn validate(&self) -> Result<(), String> {
        for skill in &self.skills {
            skill
                .validate()
                .map_err(|e| format!("craftsperson {}: {}", self.id, e))?;
        }
        if let Some(absence) = self.absences.iter().find(|a| a.end_date < a.start_date) {
            return Err(format!(
                "craftsperson {}: absence {} ends {} before it starts {}",
                self.id, absence.id, absence.end_date, absence.start_date
            ));
        }
        Ok(())
    }
}

/// Wire shape of a craftsperson record, including the legacy `on_leave` flag.
#[derive(Deserialize)]
struct CraftspersonRecord {
    id: String,
    name: String,
    #[serde(default)]
    skills: Vec<Skill>,
    #[serde(default)]
    current_workload: u8,
    efficiency_rating: Decimal,
    quality_rating: Decimal,
    #[serde(default)]
    absences: Vec<Absence>,
    #[serde(default)]
    assigned_orders: Vec<String>,
    #[serde(default)]
    on_leave: bool,
}

impl From<CraftspersonRecord> for Craftsperson {
    fn from(record: CraftspersonRecord) -> Self {
        let mut absences = record.absences;
        if record.on_leave && !absences.iter().any(|a| a.id == ON_LEAVE_ABSENCE_ID) {
            absences.push(Absence {
                id: ON_LEAVE_ABSENCE_ID.to_string(),
                start_date: NaiveDate::MIN,
                end_date: NaiveDate::MAX,
                reason: "On leave".to_string(),
            });
        }
        Self {
            id: record.id,
            name: record.name,
            skills: record.skills,
            current_workload: record.current_workload,
            efficiency_rating: record.efficiency_rating,
            quality_rating: record.quality_rating,
            absences,
            assigned_orders: record.assigned_orders,
        }
    }
}

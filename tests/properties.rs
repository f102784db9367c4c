//! Property tests for the allocation core.
//!
//! These check the invariants that must hold for any input: workload stays
//! within 0..=100, availability matches absence intervals exactly, release
//! undoes an unclamped assignment, and auto-assign keeps both registries
//! linked while never reducing the number of assigned orders.

use chrono::{Days, NaiveDate};
use proptest::prelude::*;
use rust_decimal::Decimal;

use workshop_allocator::allocation::{
    assign, clamp_workload, is_available, run_auto_assign, unassign,
};
use workshop_allocator::config::Thresholds;
use workshop_allocator::models::{Absence, Craftsperson, Priority, Skill, WorkOrder};
use workshop_allocator::registry::Registries;

const SKILLS: [&str; 4] = ["StoneSetting", "Casting", "Polishing", "Engraving"];

fn base_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()
}

fn day(offset: u64) -> NaiveDate {
    base_date().checked_add_days(Days::new(offset)).unwrap()
}

fn priority_strategy() -> impl Strategy<Value = Priority> {
    prop_oneof![
        Just(Priority::High),
        Just(Priority::Medium),
        Just(Priority::Low)
    ]
}

fn absence_strategy() -> impl Strategy<Value = (u64, u64)> {
    (0u64..60, 0u64..10).prop_map(|(start, len)| (start, start + len))
}

fn craftsperson_strategy() -> impl Strategy<Value = (Vec<usize>, u8, Vec<(u64, u64)>)> {
    (
        prop::collection::vec(0..SKILLS.len(), 0..3),
        0u8..=100,
        prop::collection::vec(absence_strategy(), 0..3),
    )
}

fn order_strategy() -> impl Strategy<Value = (Priority, usize, u8, Option<usize>)> {
    (
        priority_strategy(),
        0..SKILLS.len(),
        0u8..=60,
        prop::option::of(0usize..6),
    )
}

fn build_craftspeople(specs: Vec<(Vec<usize>, u8, Vec<(u64, u64)>)>) -> Vec<Craftsperson> {
    specs
        .into_iter()
        .enumerate()
        .map(|(i, (skills, workload, absences))| Craftsperson {
            id: format!("cp_{}", i),
            name: format!("Craftsperson {}", i),
            skills: skills.into_iter().map(|s| Skill::new(SKILLS[s], 2)).collect(),
            current_workload: workload,
            efficiency_rating: Decimal::ONE,
            quality_rating: Decimal::ONE,
            absences: absences
                .into_iter()
                .enumerate()
                .map(|(j, (start, end))| Absence {
                    id: format!("abs_{}_{}", i, j),
                    start_date: day(start),
                    end_date: day(end),
                    reason: "Leave".to_string(),
                })
                .collect(),
            assigned_orders: vec![],
        })
        .collect()
}

fn build_orders(specs: Vec<(Priority, usize, u8, Option<usize>)>) -> Vec<WorkOrder> {
    specs
        .into_iter()
        .enumerate()
        .map(|(i, (priority, skill, impact, holder))| WorkOrder {
            id: format!("wo_{}", i),
            item_description: format!("Piece {}", i),
            required_skill: SKILLS[skill].to_string(),
            priority,
            due_date: day(90),
            estimated_hours: Decimal::ONE,
            workload_impact: impact,
            assigned_to: holder.map(|h| format!("cp_{}", h)),
        })
        .collect()
}

fn assert_linked(registries: &Registries) {
    for order in registries.work_orders().iter() {
        if let Some(holder) = &order.assigned_to {
            let craftsperson = registries.craftspeople().get(holder).unwrap();
            assert!(craftsperson.holds_order(&order.id));
        }
    }
    for craftsperson in registries.craftspeople().iter() {
        assert!(craftsperson.current_workload <= 100);
        for order_id in &craftsperson.assigned_orders {
            let order = registries.work_orders().get(order_id).unwrap();
            assert!(order.is_assigned_to(&craftsperson.id));
        }
    }
}

proptest! {
    #[test]
    fn prop_clamp_stays_in_range(current in 0u8..=100, delta in any::<i64>()) {
        let updated = clamp_workload(current, delta);
        prop_assert!(updated <= 100);
        if let Ok(small) = i16::try_from(delta) {
            let exact = i64::from(current) + i64::from(small);
            if (0..=100).contains(&exact) {
                prop_assert_eq!(i64::from(updated), exact);
            }
        }
    }

    #[test]
    fn prop_availability_matches_intervals(spec in craftsperson_strategy(), offset in 0u64..80) {
        let craftspeople = build_craftspeople(vec![spec]);
        let craftsperson = &craftspeople[0];
        let date = day(offset);
        let covered = craftsperson
            .absences
            .iter()
            .any(|a| a.start_date <= date && date <= a.end_date);
        prop_assert_eq!(is_available(craftsperson, date), !covered);
    }

    #[test]
    fn prop_unassign_undoes_unclamped_assign(
        workload in 0u8..=100,
        impact in 0u8..=100,
        skill in 0..SKILLS.len(),
    ) {
        prop_assume!(u16::from(workload) + u16::from(impact) <= 100);
        let mut registries = Registries::from_records(
            build_craftspeople(vec![(vec![skill], workload, vec![])]),
            build_orders(vec![(Priority::Medium, skill, impact, None)]),
        );

        let assignment = assign(&mut registries, "wo_0", "cp_0", &Thresholds::default()).unwrap();
        prop_assert_eq!(assignment.workload_after, workload + impact);
        prop_assert!(registries.work_orders().get("wo_0").unwrap().is_assigned_to("cp_0"));

        unassign(&mut registries, "wo_0").unwrap();
        prop_assert_eq!(registries.craftspeople().get("cp_0").unwrap().current_workload, workload);
        prop_assert!(registries.work_orders().get("wo_0").unwrap().is_unassigned());
        prop_assert_eq!(unassign(&mut registries, "wo_0").unwrap(), None);
    }

    #[test]
    fn prop_auto_assign_is_monotonic_and_linked(
        people in prop::collection::vec(craftsperson_strategy(), 0..6),
        orders in prop::collection::vec(order_strategy(), 0..12),
        offset in 0u64..80,
    ) {
        let mut registries =
            Registries::from_records(build_craftspeople(people), build_orders(orders));
        let held_before: Vec<(String, String)> = registries
            .work_orders()
            .iter()
            .filter_map(|o| o.assigned_to.clone().map(|h| (o.id.clone(), h)))
            .collect();
        let before = held_before.len();
        assert_linked(&registries);

        let today = day(offset);
        let anyone_available = registries.craftspeople().iter().any(|c| is_available(c, today));
        let plan = run_auto_assign(&mut registries, today, &Thresholds::default());
        let after = registries.work_orders().len() - registries.work_orders().list_unassigned().len();

        prop_assert!(after >= before);
        for (order_id, holder) in &held_before {
            prop_assert!(registries.work_orders().get(order_id).unwrap().is_assigned_to(holder));
        }
        assert_linked(&registries);
        if anyone_available {
            prop_assert!(plan.unplaced_order_ids.is_empty());
        } else {
            prop_assert_eq!(plan.placements.len(), 0);
        }
        for placement in &plan.placements {
            let craftsperson = registries.craftspeople().get(&placement.craftsperson_id).unwrap();
            prop_assert!(is_available(craftsperson, today));
        }
    }
}

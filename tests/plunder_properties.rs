//! Property tests for the transfer arithmetic
//!
//! Every transfer conserves what it moves: nothing minted, nothing burned,
//! and the attacker's limits hold no matter what the manifests look like.

use std::collections::HashMap;

use proptest::prelude::*;

use corsair::board::transfer::{
    precondition, transfer_cargo, transfer_credits, transfer_equipment, transfer_fuel, StealKind,
};
use corsair::core::types::{Commodity, EquipmentKind, PilotId};
use corsair::ship::{CargoHold, EquipmentBay, Pilot};

fn any_commodity() -> impl Strategy<Value = Commodity> {
    prop::sample::select(vec![
        Commodity::Ore,
        Commodity::Food,
        Commodity::Medicine,
        Commodity::Industrial,
        Commodity::Luxury,
    ])
}

fn any_equipment() -> impl Strategy<Value = EquipmentKind> {
    prop::sample::select(vec![
        EquipmentKind::LaserCannon,
        EquipmentKind::IonCannon,
        EquipmentKind::ShieldBooster,
        EquipmentKind::ArmorPlating,
        EquipmentKind::CargoPod,
        EquipmentKind::FuelPod,
        EquipmentKind::Afterburner,
    ])
}

fn manifest() -> impl Strategy<Value = Vec<(Commodity, u32)>> {
    prop::collection::vec((any_commodity(), 1u32..=60), 0..5)
}

fn freighter(id: u32, capacity: u32, manifest: &[(Commodity, u32)]) -> Pilot {
    let mut pilot = Pilot::new(PilotId(id), "hull");
    pilot.cargo = CargoHold::new(capacity);
    for &(commodity, quantity) in manifest {
        pilot.cargo.add(commodity, quantity);
    }
    pilot
}

/// Tons aboard both ships, keyed by commodity
fn commodity_totals(a: &Pilot, b: &Pilot) -> HashMap<Commodity, u32> {
    let mut totals = HashMap::new();
    for entry in a.cargo.entries().iter().chain(b.cargo.entries()) {
        *totals.entry(entry.commodity).or_insert(0) += entry.quantity;
    }
    totals
}

proptest! {
    #[test]
    fn test_credit_transfer_balances(
        att_credits in 0u64..=u64::MAX / 2,
        def_credits in 0u64..=u64::MAX / 2,
    ) {
        let mut attacker = Pilot::new(PilotId(1), "attacker");
        let mut defender = Pilot::new(PilotId(2), "defender");
        attacker.credits = att_credits;
        defender.credits = def_credits;

        prop_assert_eq!(
            precondition(StealKind::Credits, &attacker, &defender).is_ok(),
            def_credits > 0
        );

        let amount = transfer_credits(&mut attacker, &mut defender);

        prop_assert_eq!(amount, def_credits);
        prop_assert_eq!(defender.credits, 0);
        prop_assert_eq!(attacker.credits, att_credits + def_credits);
    }

    #[test]
    fn test_cargo_transfer_conserves_every_commodity(
        def_capacity in 0u32..=300,
        def_manifest in manifest(),
        att_capacity in 0u32..=200,
        att_manifest in manifest(),
    ) {
        let mut attacker = freighter(1, att_capacity, &att_manifest);
        let mut defender = freighter(2, def_capacity, &def_manifest);

        // The holds cap what they accept, so read the true state back
        let totals_before = commodity_totals(&attacker, &defender);
        let att_used_before = attacker.cargo.used();
        let att_free_before = attacker.cargo.free();
        let def_used_before = defender.cargo.used();

        prop_assert_eq!(
            precondition(StealKind::Cargo, &attacker, &defender).is_ok(),
            def_used_before > 0 && att_free_before > 0
        );

        let moved = transfer_cargo(&mut attacker, &mut defender);
        let moved_total: u32 = moved.iter().map(|&(_, q)| q).sum();

        // Exactly min(free space, target's tonnage) moves, head first
        prop_assert_eq!(moved_total, att_free_before.min(def_used_before));
        prop_assert_eq!(attacker.cargo.used(), att_used_before + moved_total);
        prop_assert_eq!(defender.cargo.used(), def_used_before - moved_total);
        prop_assert!(attacker.cargo.used() <= att_capacity);

        // Per-commodity books balance
        let totals_after = commodity_totals(&attacker, &defender);
        prop_assert_eq!(totals_before, totals_after);

        // The run only stops against a full hold or an empty manifest
        prop_assert!(attacker.cargo.free() == 0 || defender.cargo.is_empty());
    }

    #[test]
    fn test_equipment_strips_whole_and_ignores_tonnage(
        fitted in prop::collection::vec(any_equipment(), 0..8),
        locker_before in prop::collection::vec(any_equipment(), 0..4),
    ) {
        let mut attacker = Pilot::new(PilotId(1), "attacker");
        let mut defender = Pilot::new(PilotId(2), "defender");
        // A packed zero-ton hold must not matter to an equipment grab
        attacker.cargo = CargoHold::new(0);
        attacker.locker = locker_before.clone();
        defender.equipment = EquipmentBay::with_fitted(&fitted);
        let slots_before = defender.equipment.slot_count();

        prop_assert_eq!(
            precondition(StealKind::Equipment, &attacker, &defender).is_ok(),
            !fitted.is_empty()
        );

        let taken = transfer_equipment(&mut attacker, &mut defender);

        // Everything comes off, in slot order, into the locker
        prop_assert_eq!(&taken, &fitted);
        prop_assert!(!defender.equipment.has_fitted());
        prop_assert_eq!(defender.equipment.slot_count(), slots_before);

        let mut expected_locker = locker_before;
        expected_locker.extend(fitted);
        prop_assert_eq!(&attacker.locker, &expected_locker);
    }

    #[test]
    fn test_fuel_transfer_conserves_and_clamps(
        att_max in 1.0f32..5e5,
        att_frac in 0.0f32..=1.0,
        def_fuel in 0.0f32..5e5,
    ) {
        let mut attacker = Pilot::new(PilotId(1), "attacker");
        let mut defender = Pilot::new(PilotId(2), "defender");
        attacker.fuel_max = att_max;
        attacker.fuel = att_max * att_frac;
        defender.fuel = def_fuel;
        defender.fuel_max = def_fuel.max(100.0);

        let att_before = attacker.fuel;
        let total_before = att_before + def_fuel;

        let (gained, returned) = transfer_fuel(&mut attacker, &mut defender);

        // Tank ceiling holds
        prop_assert!(attacker.fuel <= attacker.fuel_max);
        prop_assert!(gained >= -1e-3);
        prop_assert!(returned >= 0.0);

        // Whatever was siphoned is accounted for, kept or handed back
        prop_assert!((gained + returned - def_fuel).abs() <= def_fuel.abs() * 1e-5 + 1e-3);
        let total_after = attacker.fuel + defender.fuel;
        prop_assert!((total_after - total_before).abs() <= total_before.abs() * 1e-5 + 1e-3);

        // When it all fits, the target is drained dry
        if att_before + def_fuel - att_max <= 0.0 {
            prop_assert_eq!(defender.fuel, 0.0);
        }
    }
}

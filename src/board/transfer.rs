//! Resource transfers - what actually moves after a successful steal
//!
//! Four operations, each with its own gate. The gates run before any risk
//! roll; a roll is only spent when there is something to move. Transfers
//! never roll back: a cargo run that fills the hold mid-manifest stands.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::types::{Commodity, EquipmentKind};
use crate::ship::pilot::Pilot;

/// The four things a boarding party can go after
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StealKind {
    Credits,
    Cargo,
    Equipment,
    Fuel,
}

/// Why a steal was refused before any roll was made
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransferBlock {
    #[error("the target is broke")]
    NoCredits,
    #[error("the target's hold is empty")]
    NoCargo,
    #[error("your cargo hold has no room")]
    CargoHoldFull,
    #[error("the target carries no equipment")]
    NoEquipment,
    #[error("the target's tanks are dry")]
    NoFuel,
    #[error("your fuel tank is already full")]
    FuelFull,
}

/// What a successful steal actually moved
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Plunder {
    Credits {
        amount: u64,
    },
    Cargo {
        moved: Vec<(Commodity, u32)>,
    },
    Equipment {
        taken: Vec<EquipmentKind>,
    },
    Fuel {
        /// Units the attacker kept
        gained: f32,
        /// Overflow handed back to the target
        returned: f32,
    },
}

/// Check the resource gate for `kind` without rolling any dice
pub fn precondition(
    kind: StealKind,
    attacker: &Pilot,
    defender: &Pilot,
) -> Result<(), TransferBlock> {
    match kind {
        StealKind::Credits => {
            if defender.credits == 0 {
                return Err(TransferBlock::NoCredits);
            }
        }
        StealKind::Cargo => {
            if defender.cargo.is_empty() {
                return Err(TransferBlock::NoCargo);
            }
            if attacker.cargo.free() == 0 {
                return Err(TransferBlock::CargoHoldFull);
            }
        }
        StealKind::Equipment => {
            if !defender.equipment.has_fitted() {
                return Err(TransferBlock::NoEquipment);
            }
        }
        StealKind::Fuel => {
            if defender.fuel <= 0.0 {
                return Err(TransferBlock::NoFuel);
            }
            if attacker.fuel >= attacker.fuel_max {
                return Err(TransferBlock::FuelFull);
            }
        }
    }
    Ok(())
}

/// Run the transfer for `kind`; call only after a successful resolution
pub fn execute(kind: StealKind, attacker: &mut Pilot, defender: &mut Pilot) -> Plunder {
    match kind {
        StealKind::Credits => Plunder::Credits {
            amount: transfer_credits(attacker, defender),
        },
        StealKind::Cargo => Plunder::Cargo {
            moved: transfer_cargo(attacker, defender),
        },
        StealKind::Equipment => Plunder::Equipment {
            taken: transfer_equipment(attacker, defender),
        },
        StealKind::Fuel => {
            let (gained, returned) = transfer_fuel(attacker, defender);
            Plunder::Fuel { gained, returned }
        }
    }
}

/// Move the target's entire balance. All or nothing; returns the amount.
pub fn transfer_credits(attacker: &mut Pilot, defender: &mut Pilot) -> u64 {
    let amount = defender.credits;
    attacker.credits += amount;
    defender.credits = 0;
    amount
}

/// Drain the target's manifest from the head in hold-limited batches
///
/// Stops when the manifest empties or the attacker's hold fills. A single
/// manifest line may move partially; nothing is rolled back.
pub fn transfer_cargo(attacker: &mut Pilot, defender: &mut Pilot) -> Vec<(Commodity, u32)> {
    let mut moved: Vec<(Commodity, u32)> = Vec::new();
    loop {
        let free = attacker.cargo.free();
        if free == 0 {
            break;
        }
        let Some((commodity, taken)) = defender.cargo.take_first(free) else {
            break;
        };
        attacker.cargo.add(commodity, taken);
        match moved.last_mut() {
            Some((c, q)) if *c == commodity => *q += taken,
            _ => moved.push((commodity, taken)),
        }
    }
    moved
}

/// Strip every fitted slot into the attacker's locker, in slot order
///
/// The locker has no tonnage budget, so unlike cargo there is no capacity
/// gate on this path.
pub fn transfer_equipment(attacker: &mut Pilot, defender: &mut Pilot) -> Vec<EquipmentKind> {
    let taken = defender.equipment.strip();
    attacker.locker.extend(taken.iter().copied());
    taken
}

/// Siphon the target's fuel, handing any overflow straight back
///
/// Returns (gained, returned). The attacker never ends above its tank
/// ceiling; the target keeps whatever would not fit.
pub fn transfer_fuel(attacker: &mut Pilot, defender: &mut Pilot) -> (f32, f32) {
    let taken = defender.fuel;
    attacker.fuel += taken;
    defender.fuel = 0.0;

    let overflow = attacker.fuel - attacker.fuel_max;
    if overflow > 0.0 {
        attacker.fuel = attacker.fuel_max;
        defender.fuel = overflow;
        (taken - overflow, overflow)
    } else {
        (taken, 0.0)
    }
}

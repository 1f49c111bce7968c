//! Presentation helpers - formatted balances and boarding-window data
//!
//! Everything here is read-only: the boarding window and the scripting
//! layer render from these snapshots and strings, never from live state.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::board::session::StealOutcome;
use crate::board::transfer::Plunder;
use crate::core::types::{Commodity, EquipmentKind, PilotId};
use crate::world::World;

/// Format a credit balance with a magnitude suffix
///
/// `format_credits(2_500_000, 2)` renders as "2.50M". Balances under a
/// thousand render plain.
pub fn format_credits(credits: u64, decimals: usize) -> String {
    const SCALES: [(u64, &str); 4] = [
        (1_000_000_000_000, "T"),
        (1_000_000_000, "B"),
        (1_000_000, "M"),
        (1_000, "K"),
    ];
    for (scale, suffix) in SCALES {
        if credits >= scale {
            return format!("{:.*}{}", decimals, credits as f64 / scale as f64, suffix);
        }
    }
    credits.to_string()
}

/// Read-only snapshot of what a boarded ship is carrying
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlunderView {
    pub target: PilotId,
    pub name: String,
    pub credits: u64,
    pub cargo: Vec<(Commodity, u32)>,
    pub equipment: Vec<EquipmentKind>,
    pub fuel: f32,
}

impl PlunderView {
    /// Multi-line summary for the boarding window
    pub fn summary(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("Boarding {}\n", self.name));
        out.push_str(&format!("  Credits: {}\n", format_credits(self.credits, 2)));
        if self.cargo.is_empty() {
            out.push_str("  Cargo: none\n");
        } else {
            out.push_str("  Cargo:\n");
            for (commodity, quantity) in &self.cargo {
                out.push_str(&format!("    {:?}: {} t\n", commodity, quantity));
            }
        }
        if self.equipment.is_empty() {
            out.push_str("  Equipment: none\n");
        } else {
            out.push_str("  Equipment:\n");
            for kind in &self.equipment {
                out.push_str(&format!("    {:?}\n", kind));
            }
        }
        out.push_str(&format!("  Fuel: {:.0} units\n", self.fuel));
        out
    }
}

/// Snapshot a target for the boarding window; `None` if it no longer exists
pub fn plunder_view(world: &World, target: PilotId) -> Option<PlunderView> {
    let pilot = world.pilot(target).ok()?;
    Some(PlunderView {
        target,
        name: pilot.name.clone(),
        credits: pilot.credits,
        cargo: pilot
            .cargo
            .entries()
            .iter()
            .map(|e| (e.commodity, e.quantity))
            .collect(),
        equipment: pilot.equipment.fitted().collect(),
        fuel: pilot.fuel,
    })
}

impl fmt::Display for Plunder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Plunder::Credits { amount } => {
                write!(f, "You loot {} credits.", format_credits(*amount, 2))
            }
            Plunder::Cargo { moved } => {
                let tons: u32 = moved.iter().map(|(_, q)| q).sum();
                write!(f, "You make off with {} tons of cargo.", tons)
            }
            Plunder::Equipment { taken } => {
                write!(f, "You strip {} pieces of equipment from the hull.", taken.len())
            }
            Plunder::Fuel { gained, .. } => {
                write!(f, "You siphon {:.0} units of fuel.", gained)
            }
        }
    }
}

/// Line shown when the defenders seal the ship
///
/// A crewed boarder sends a party; a lone pilot goes in alone. The message
/// tracks which one just got thrown out.
pub fn lockout_line(boarder_crew: u32) -> &'static str {
    if boarder_crew > 0 {
        "The crew repels your boarding party and seals the airlocks."
    } else {
        "You are thrown back and the ship seals its airlocks."
    }
}

/// Line shown when the prize trips its destruct charge
pub fn counter_attack_line() -> &'static str {
    "A destruct mechanism fires as you torch through the airlock."
}

/// One-line account of a steal action for the boarding window
pub fn steal_outcome_line(outcome: &StealOutcome, boarder_crew: u32) -> String {
    match outcome {
        StealOutcome::Plundered(plunder) => plunder.to_string(),
        StealOutcome::Blocked(block) => format!("Nothing doing: {}.", block),
        StealOutcome::LockedOut => lockout_line(boarder_crew).to_string(),
        StealOutcome::CounterAttacked { damage } => {
            format!("{} The hull takes {:.0} damage.", counter_attack_line(), damage)
        }
        StealOutcome::TargetLost => "The ship breaks apart around you.".to_string(),
    }
}

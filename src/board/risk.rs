//! Steal resolution - the crew-ratio risk model behind every plunder attempt
//!
//! The model's shape lives in the constants here; ship-to-ship variation
//! enters only through the two crew complements.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::types::PilotId;
use crate::ship::pilot::Pilot;

/// Base factor on the defender/attacker crew ratio
///
/// At equal crews the threshold sits at 0.5: even odds per attempt.
pub const STEAL_BASE_FACTOR: f32 = 0.5;

/// Virtual crew added to both complements
///
/// Softens the ratio at the small end so a two-hand fighter against a lone
/// pilot is not a foregone conclusion either way.
pub const CREW_SOFTENING: f32 = 10.0;

/// Chance that a repelled attempt turns into a counter-attack instead of a
/// plain lockout
pub const COUNTER_ATTACK_CHANCE: f32 = 0.4;

/// Kinetic damage a counter-attack delivers to the boarded ship
pub const COUNTER_ATTACK_DAMAGE: f32 = 100.0;

/// Armor the boarded ship is left hanging at after its counter-attack
pub const COUNTER_ATTACK_ARMOR_FLOOR: f32 = 1.0;

/// How a single steal attempt resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskOutcome {
    /// The boarding party got through; the transfer may proceed
    Success,
    /// The defenders sealed the ship; the boarding is over
    Lockout,
    /// The defenders sealed the ship and hit back; the boarding is over
    CounterAttack,
}

/// Difficulty threshold the first roll must beat
///
/// Deliberately not clamped to [0, 1]: a big enough defender crew pushes
/// the threshold past 1 and makes success outright impossible.
pub fn steal_threshold(attacker_crew: u32, defender_crew: u32) -> f32 {
    STEAL_BASE_FACTOR * (CREW_SOFTENING + defender_crew as f32)
        / (CREW_SOFTENING + attacker_crew as f32)
}

/// Pure classification for known rolls
///
/// `first` decides success; `second` only matters on failure, where it
/// splits counter-attack from lockout.
pub fn outcome_for_rolls(threshold: f32, first: f32, second: f32) -> RiskOutcome {
    if first > threshold {
        RiskOutcome::Success
    } else if second < COUNTER_ATTACK_CHANCE {
        RiskOutcome::CounterAttack
    } else {
        RiskOutcome::Lockout
    }
}

/// Resolve one steal attempt, drawing a second roll only on failure
pub fn resolve<R: Rng>(rng: &mut R, attacker_crew: u32, defender_crew: u32) -> RiskOutcome {
    let threshold = steal_threshold(attacker_crew, defender_crew);
    if rng.gen::<f32>() > threshold {
        return RiskOutcome::Success;
    }
    if rng.gen::<f32>() < COUNTER_ATTACK_CHANCE {
        RiskOutcome::CounterAttack
    } else {
        RiskOutcome::Lockout
    }
}

/// A tripped destruct charge: the blast lands on the boarded hull itself,
/// attributed to the boarder, and the hull ends pinned at the armor floor
/// rather than destroyed.
pub fn apply_counter_attack(defender: &mut Pilot, attacker: PilotId) {
    defender.apply_hit(COUNTER_ATTACK_DAMAGE, Some(attacker));
    defender.armor = COUNTER_ATTACK_ARMOR_FLOOR;
}

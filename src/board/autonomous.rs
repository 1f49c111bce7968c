//! Autonomous boarding - fire-and-forget piracy for crewed-by-AI ships
//!
//! Start schedules a deferred completion; the world's tick driver fires it
//! once the boarding party is through the hull. The completion is a single
//! credits-only resolution and never opens an interactive session.

use serde::{Deserialize, Serialize};

use crate::board::eligibility::boarding_eligibility;
use crate::board::risk::{self, RiskOutcome, COUNTER_ATTACK_DAMAGE};
use crate::board::transfer;
use crate::core::error::{CorsairError, Result};
use crate::core::types::PilotId;
use crate::world::events::BoardingEvent;
use crate::world::World;

/// How a deferred completion resolved
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CompletionOutcome {
    /// Purse emptied; zero if the target was already broke
    Looted { credits: u64 },
    /// Boarding party repelled with the hatches sealed
    LockedOut,
    /// Boarding party repelled and the prize tripped its destruct charge
    CounterAttacked { damage: f32 },
    /// A participant no longer resolves; nothing happened
    TargetVanished,
}

/// Begin an autonomous boarding
///
/// On acceptance the target is marked boarded, the boarder marked busy, and
/// the completion queued on the world's schedule. No resources move yet.
/// One action per boarder at a time: the busy flag tracks a single attempt,
/// so callers start the next only after this one resolves.
pub fn start_boarding(world: &mut World, boarder: PilotId, target: PilotId) -> Result<()> {
    if boarder == target {
        return Err(CorsairError::SamePilot(boarder));
    }

    let boarder_ref = world.pilot(boarder)?;
    let target_ref = world.pilot(target)?;
    boarding_eligibility(boarder_ref, target_ref, &world.config)?;

    world.pilot_mut(target)?.boarded = true;
    world.pilot_mut(boarder)?.boarding = true;
    world.schedule_boarding(boarder, target);
    world.record(BoardingEvent::BoardingStarted { boarder, target });
    tracing::debug!("Autonomous boarding: {:?} breaching {:?}", boarder, target);
    Ok(())
}

/// Resolve a due boarding: one risk roll, credits only
///
/// Fired by the world's tick driver. The boarder's in-progress flag is
/// cleared whatever happens; a vanished participant abandons the attempt
/// with no transfer and no roll.
pub fn complete_boarding(world: &mut World, boarder: PilotId, target: PilotId) -> CompletionOutcome {
    if let Ok(b) = world.pilot_mut(boarder) {
        b.boarding = false;
    }

    let (attacker_crew, defender_crew) = match world.pilot_pair_mut(boarder, target) {
        Ok((a, d)) => (a.crew, d.crew),
        Err(_) => {
            world.record(BoardingEvent::BoardingAbandoned { boarder, target });
            tracing::debug!("Boarding of {:?} abandoned, participant gone", target);
            return CompletionOutcome::TargetVanished;
        }
    };

    match risk::resolve(&mut world.rng, attacker_crew, defender_crew) {
        RiskOutcome::Success => {
            let credits = match world.pilot_pair_mut(boarder, target) {
                Ok((attacker, defender)) => transfer::transfer_credits(attacker, defender),
                Err(_) => return CompletionOutcome::TargetVanished,
            };
            world.record(BoardingEvent::Looted {
                boarder,
                target,
                credits,
            });
            tracing::debug!("{:?} looted {} credits from {:?}", boarder, credits, target);
            CompletionOutcome::Looted { credits }
        }
        RiskOutcome::Lockout => {
            world.record(BoardingEvent::LockedOut {
                session: None,
                boarder,
                target,
            });
            CompletionOutcome::LockedOut
        }
        RiskOutcome::CounterAttack => {
            if let Ok(defender) = world.pilot_mut(target) {
                risk::apply_counter_attack(defender, boarder);
            }
            world.record(BoardingEvent::CounterAttacked {
                session: None,
                boarder,
                target,
                damage: COUNTER_ATTACK_DAMAGE,
            });
            CompletionOutcome::CounterAttacked {
                damage: COUNTER_ATTACK_DAMAGE,
            }
        }
    }
}

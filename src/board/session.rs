//! Interactive boarding sessions - open, steal repeatedly, walk away
//!
//! A session is an explicit record owning its (boarder, target) pair; there
//! is no world-level "current target". Risk is paid per steal action, and a
//! repelled action ends the session on the spot.

use serde::{Deserialize, Serialize};

use crate::board::eligibility::boarding_eligibility;
use crate::board::risk::{self, RiskOutcome, COUNTER_ATTACK_DAMAGE};
use crate::board::transfer::{self, Plunder, StealKind, TransferBlock};
use crate::core::error::{CorsairError, Result};
use crate::core::types::{PilotId, SessionId};
use crate::world::events::BoardingEvent;
use crate::world::World;

/// An open boarding: who is aboard whom
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardingSession {
    pub id: SessionId,
    pub boarder: PilotId,
    pub target: PilotId,
    open: bool,
}

impl BoardingSession {
    pub fn is_open(&self) -> bool {
        self.open
    }
}

/// What an interactive initiate produced
#[derive(Debug)]
pub enum BoardingStart {
    /// Session is open; steal away
    Session(BoardingSession),
    /// The target was the boarder's own deployed escort and was taken back
    /// aboard instead of boarded
    EscortRecovered,
}

/// How a single steal action landed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StealOutcome {
    /// Transfer went through; the session stays open
    Plundered(Plunder),
    /// Nothing to take, or nowhere to put it; no roll was spent and the
    /// session stays open
    Blocked(TransferBlock),
    /// Defenders sealed the ship; session closed
    LockedOut,
    /// Defenders sealed the ship and tripped a destruct charge; session closed
    CounterAttacked { damage: f32 },
    /// The boarded ship ceased to exist; session closed
    TargetLost,
}

/// Begin an interactive boarding
///
/// Runs the same checks and sets the same flags as an autonomous start, but
/// yields an open session instead of scheduling a timed completion. A
/// disabled escort of the boarder's own is recovered rather than boarded.
/// One action per boarder at a time: callers open the next session only
/// after the current one closes.
pub fn open_boarding(world: &mut World, boarder: PilotId, target: PilotId) -> Result<BoardingStart> {
    if boarder == target {
        return Err(CorsairError::SamePilot(boarder));
    }

    let boarder_ref = world.pilot(boarder)?;
    let target_ref = world.pilot(target)?;
    boarding_eligibility(boarder_ref, target_ref, &world.config)?;
    let recover = target_ref.parent == Some(boarder);

    if recover {
        world.remove_pilot(target)?;
        world.record(BoardingEvent::EscortRecovered {
            carrier: boarder,
            escort: target,
        });
        tracing::info!("Escort {:?} recovered by carrier {:?}", target, boarder);
        return Ok(BoardingStart::EscortRecovered);
    }

    world.pilot_mut(target)?.boarded = true;
    world.pilot_mut(boarder)?.boarding = true;

    let session = BoardingSession {
        id: SessionId::new(),
        boarder,
        target,
        open: true,
    };
    world.record(BoardingEvent::SessionOpened {
        session: session.id,
        boarder,
        target,
    });
    tracing::info!("Boarding session opened: {:?} aboard {:?}", boarder, target);
    Ok(BoardingStart::Session(session))
}

/// Attempt one steal action against the boarded ship
///
/// The resource gate runs first and costs nothing. Past the gate, one risk
/// resolution decides whether the transfer runs or the session ends.
pub fn steal(
    world: &mut World,
    session: &mut BoardingSession,
    kind: StealKind,
) -> Result<StealOutcome> {
    if !session.open {
        return Err(CorsairError::SessionClosed);
    }

    if world.pilot(session.target).is_err() {
        end_session(world, session);
        world.record(BoardingEvent::TargetLost {
            session: session.id,
            boarder: session.boarder,
            target: session.target,
        });
        tracing::debug!("Boarding target {:?} lost mid-session", session.target);
        return Ok(StealOutcome::TargetLost);
    }

    let attacker = world.pilot(session.boarder)?;
    let defender = world.pilot(session.target)?;
    if let Err(block) = transfer::precondition(kind, attacker, defender) {
        return Ok(StealOutcome::Blocked(block));
    }
    let attacker_crew = attacker.crew;
    let defender_crew = defender.crew;

    match risk::resolve(&mut world.rng, attacker_crew, defender_crew) {
        RiskOutcome::Success => {
            let (attacker, defender) = world.pilot_pair_mut(session.boarder, session.target)?;
            let plunder = transfer::execute(kind, attacker, defender);
            world.record(BoardingEvent::Plundered {
                session: session.id,
                boarder: session.boarder,
                target: session.target,
                plunder: plunder.clone(),
            });
            Ok(StealOutcome::Plundered(plunder))
        }
        RiskOutcome::Lockout => {
            end_session(world, session);
            world.record(BoardingEvent::LockedOut {
                session: Some(session.id),
                boarder: session.boarder,
                target: session.target,
            });
            tracing::debug!("Boarding party locked out of {:?}", session.target);
            Ok(StealOutcome::LockedOut)
        }
        RiskOutcome::CounterAttack => {
            let boarder = session.boarder;
            if let Ok(defender) = world.pilot_mut(session.target) {
                risk::apply_counter_attack(defender, boarder);
            }
            end_session(world, session);
            world.record(BoardingEvent::CounterAttacked {
                session: Some(session.id),
                boarder: session.boarder,
                target: session.target,
                damage: COUNTER_ATTACK_DAMAGE,
            });
            tracing::debug!("Counter-attack tripped aboard {:?}", session.target);
            Ok(StealOutcome::CounterAttacked {
                damage: COUNTER_ATTACK_DAMAGE,
            })
        }
    }
}

/// Close the session and clear the boarder's in-progress flag
///
/// Idempotent, and fine to call on a scripted collaborator's behalf; the
/// target's boarded flag stays set forever either way.
pub fn close_boarding(world: &mut World, session: &mut BoardingSession) {
    if !session.open {
        return;
    }
    end_session(world, session);
    world.record(BoardingEvent::SessionClosed {
        session: session.id,
        boarder: session.boarder,
        target: session.target,
    });
    tracing::debug!("Boarding session closed: {:?} off {:?}", session.boarder, session.target);
}

/// Mark the session over and drop the aggressor flag if the pilot survives
fn end_session(world: &mut World, session: &mut BoardingSession) {
    session.open = false;
    if let Ok(boarder) = world.pilot_mut(session.boarder) {
        boarder.boarding = false;
    }
}

//! Boarding events and the append-only log
//!
//! The log is the seam scripted collaborators watch instead of a callback
//! hook: a script that wants to force a boarder off reacts to
//! `SessionOpened` and closes the session itself.

use serde::{Deserialize, Serialize};

use crate::board::transfer::Plunder;
use crate::core::types::{PilotId, SessionId, Tick};

/// A logged boarding event
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EventRecord {
    pub id: u32,
    pub tick: Tick,
    pub event: BoardingEvent,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum BoardingEvent {
    // Autonomous protocol
    BoardingStarted { boarder: PilotId, target: PilotId },
    /// A pending completion was cancelled by a destruction
    BoardingCancelled { boarder: PilotId, target: PilotId },
    /// Completion fired but a participant could no longer be resolved
    BoardingAbandoned { boarder: PilotId, target: PilotId },
    /// Completion emptied the target's purse
    Looted { boarder: PilotId, target: PilotId, credits: u64 },

    // Interactive protocol
    SessionOpened { session: SessionId, boarder: PilotId, target: PilotId },
    Plundered { session: SessionId, boarder: PilotId, target: PilotId, plunder: Plunder },
    /// Session ended without a repelled steal: walked away or forced off
    SessionClosed { session: SessionId, boarder: PilotId, target: PilotId },
    /// The boarded ship ceased to exist mid-session
    TargetLost { session: SessionId, boarder: PilotId, target: PilotId },

    // Either protocol
    LockedOut { session: Option<SessionId>, boarder: PilotId, target: PilotId },
    CounterAttacked { session: Option<SessionId>, boarder: PilotId, target: PilotId, damage: f32 },

    // Fleet handling
    EscortRecovered { carrier: PilotId, escort: PilotId },
}

impl BoardingEvent {
    /// Pilots this event touches, for per-pilot filtering
    pub fn participants(&self) -> [PilotId; 2] {
        match *self {
            BoardingEvent::BoardingStarted { boarder, target }
            | BoardingEvent::BoardingCancelled { boarder, target }
            | BoardingEvent::BoardingAbandoned { boarder, target }
            | BoardingEvent::Looted { boarder, target, .. }
            | BoardingEvent::SessionOpened { boarder, target, .. }
            | BoardingEvent::Plundered { boarder, target, .. }
            | BoardingEvent::SessionClosed { boarder, target, .. }
            | BoardingEvent::TargetLost { boarder, target, .. }
            | BoardingEvent::LockedOut { boarder, target, .. }
            | BoardingEvent::CounterAttacked { boarder, target, .. } => [boarder, target],
            BoardingEvent::EscortRecovered { carrier, escort } => [carrier, escort],
        }
    }
}

/// The complete boarding log
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct EventLog {
    pub records: Vec<EventRecord>,
    next_event_id: u32,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_event(&mut self, event: BoardingEvent, tick: Tick) -> u32 {
        let id = self.next_event_id;
        self.next_event_id += 1;

        self.records.push(EventRecord { id, tick, event });

        id
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn events_for_pilot(&self, pilot: PilotId) -> impl Iterator<Item = &EventRecord> {
        self.records
            .iter()
            .filter(move |r| r.event.participants().contains(&pilot))
    }

    pub fn events_since(&self, tick: Tick) -> impl Iterator<Item = &EventRecord> {
        self.records.iter().filter(move |r| r.tick >= tick)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_ids_increment() {
        let mut log = EventLog::new();
        let a = log.add_event(
            BoardingEvent::BoardingStarted { boarder: PilotId(1), target: PilotId(2) },
            10,
        );
        let b = log.add_event(
            BoardingEvent::LockedOut { session: None, boarder: PilotId(1), target: PilotId(2) },
            12,
        );
        assert_eq!(a, 0);
        assert_eq!(b, 1);
        assert_eq!(log.len(), 2);
    }

    #[test]
    fn test_filter_by_pilot() {
        let mut log = EventLog::new();
        log.add_event(
            BoardingEvent::BoardingStarted { boarder: PilotId(1), target: PilotId(2) },
            1,
        );
        log.add_event(
            BoardingEvent::EscortRecovered { carrier: PilotId(3), escort: PilotId(4) },
            2,
        );

        assert_eq!(log.events_for_pilot(PilotId(2)).count(), 1);
        assert_eq!(log.events_for_pilot(PilotId(3)).count(), 1);
        assert_eq!(log.events_for_pilot(PilotId(9)).count(), 0);
    }

    #[test]
    fn test_filter_by_tick() {
        let mut log = EventLog::new();
        for tick in 0..5 {
            log.add_event(
                BoardingEvent::BoardingStarted { boarder: PilotId(1), target: PilotId(2) },
                tick,
            );
        }
        assert_eq!(log.events_since(3).count(), 2);
    }
}

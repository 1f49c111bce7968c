//! World - pilot registry, boarding scheduler, and the tick driver

pub mod events;

use ahash::AHashMap;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::board::autonomous::{complete_boarding, CompletionOutcome};
use crate::core::config::BoardingConfig;
use crate::core::error::{CorsairError, Result};
use crate::core::types::{PilotId, Tick};
use crate::ship::pilot::Pilot;
use events::{BoardingEvent, EventLog};

/// A scheduled autonomous boarding completion
///
/// Owned by the world, not the pilot, so destroying either ship can cancel
/// it without leaving a stale countdown behind.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PendingBoarding {
    pub boarder: PilotId,
    pub target: PilotId,
    /// Seconds until the boarding party finishes breaking in
    pub remaining: f32,
}

/// One completion that fired during an update step
#[derive(Debug, Clone)]
pub struct CompletedBoarding {
    pub boarder: PilotId,
    pub target: PilotId,
    pub outcome: CompletionOutcome,
}

/// The simulation state boarding runs against
pub struct World {
    pilots: Vec<Pilot>,
    index: AHashMap<PilotId, usize>,
    pending: Vec<PendingBoarding>,
    /// Random number generator (deterministic)
    pub rng: ChaCha8Rng,
    pub config: BoardingConfig,
    pub events: EventLog,
    /// Current simulation tick
    pub tick: Tick,
    next_pilot_id: u32,
}

impl World {
    pub fn new(seed: u64) -> Self {
        Self::with_config(BoardingConfig::default(), seed)
    }

    pub fn with_config(config: BoardingConfig, seed: u64) -> Self {
        Self {
            pilots: Vec::new(),
            index: AHashMap::new(),
            pending: Vec::new(),
            rng: ChaCha8Rng::seed_from_u64(seed),
            config,
            events: EventLog::new(),
            tick: 0,
            next_pilot_id: 1,
        }
    }

    /// Generate a new unique PilotId
    fn next_pilot_id(&mut self) -> PilotId {
        let id = PilotId(self.next_pilot_id);
        self.next_pilot_id += 1;
        id
    }

    /// Add a fresh pilot and return its id; set its stats through `pilot_mut`
    pub fn spawn(&mut self, name: impl Into<String>) -> PilotId {
        let id = self.next_pilot_id();
        self.index.insert(id, self.pilots.len());
        self.pilots.push(Pilot::new(id, name));
        id
    }

    pub fn pilot(&self, id: PilotId) -> Result<&Pilot> {
        self.index
            .get(&id)
            .map(|&i| &self.pilots[i])
            .ok_or(CorsairError::PilotNotFound(id))
    }

    pub fn pilot_mut(&mut self, id: PilotId) -> Result<&mut Pilot> {
        match self.index.get(&id) {
            Some(&i) => Ok(&mut self.pilots[i]),
            None => Err(CorsairError::PilotNotFound(id)),
        }
    }

    /// Disjoint mutable access to two different pilots
    pub fn pilot_pair_mut(&mut self, a: PilotId, b: PilotId) -> Result<(&mut Pilot, &mut Pilot)> {
        if a == b {
            return Err(CorsairError::SamePilot(a));
        }
        let ia = *self.index.get(&a).ok_or(CorsairError::PilotNotFound(a))?;
        let ib = *self.index.get(&b).ok_or(CorsairError::PilotNotFound(b))?;
        if ia < ib {
            let (left, right) = self.pilots.split_at_mut(ib);
            Ok((&mut left[ia], &mut right[0]))
        } else {
            let (left, right) = self.pilots.split_at_mut(ia);
            Ok((&mut right[0], &mut left[ib]))
        }
    }

    pub fn pilots(&self) -> &[Pilot] {
        &self.pilots
    }

    pub fn contains(&self, id: PilotId) -> bool {
        self.index.contains_key(&id)
    }

    /// Remove a pilot from play
    ///
    /// Pending boardings it was part of are cancelled, and a surviving
    /// boarder gets its in-progress flag cleared. Open interactive sessions
    /// against it resolve as lost on their next steal.
    pub fn remove_pilot(&mut self, id: PilotId) -> Result<Pilot> {
        let idx = match self.index.get(&id) {
            Some(&i) => i,
            None => return Err(CorsairError::PilotNotFound(id)),
        };

        let mut cancelled = Vec::new();
        self.pending.retain(|p| {
            if p.boarder == id || p.target == id {
                cancelled.push(*p);
                false
            } else {
                true
            }
        });
        for p in cancelled {
            if p.target == id {
                if let Some(&bi) = self.index.get(&p.boarder) {
                    self.pilots[bi].boarding = false;
                }
            }
            self.events.add_event(
                BoardingEvent::BoardingCancelled {
                    boarder: p.boarder,
                    target: p.target,
                },
                self.tick,
            );
            tracing::debug!(
                "Pending boarding of {:?} by {:?} cancelled by destruction",
                p.target,
                p.boarder
            );
        }

        self.index.remove(&id);
        let pilot = self.pilots.swap_remove(idx);
        if let Some(moved) = self.pilots.get(idx) {
            self.index.insert(moved.id, idx);
        }
        Ok(pilot)
    }

    /// Queue the deferred completion for an accepted autonomous boarding
    pub fn schedule_boarding(&mut self, boarder: PilotId, target: PilotId) {
        self.pending.push(PendingBoarding {
            boarder,
            target,
            remaining: self.config.boarding_delay,
        });
    }

    pub fn pending_boardings(&self) -> &[PendingBoarding] {
        &self.pending
    }

    /// Append an event stamped with the current tick
    pub fn record(&mut self, event: BoardingEvent) {
        self.events.add_event(event, self.tick);
    }

    /// Advance one tick of `dt` seconds
    ///
    /// Pending boardings count down and fire their completion exactly once
    /// when due. Entries cancelled by destruction never fire at all.
    pub fn update(&mut self, dt: f32) -> Vec<CompletedBoarding> {
        self.tick += 1;

        for p in &mut self.pending {
            p.remaining -= dt;
        }
        let mut due = Vec::new();
        self.pending.retain(|p| {
            if p.remaining <= 0.0 {
                due.push(*p);
                false
            } else {
                true
            }
        });

        due.into_iter()
            .map(|p| CompletedBoarding {
                boarder: p.boarder,
                target: p.target,
                outcome: complete_boarding(self, p.boarder, p.target),
            })
            .collect()
    }
}

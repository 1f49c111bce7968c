//! Boarding - eligibility, risk, transfers, and the two protocols

pub mod autonomous;
pub mod display;
pub mod eligibility;
pub mod risk;
pub mod session;
pub mod transfer;

pub use autonomous::{complete_boarding, start_boarding, CompletionOutcome};
pub use display::{format_credits, plunder_view, steal_outcome_line, PlunderView};
pub use eligibility::{boarding_eligibility, IneligibleReason};
pub use risk::{outcome_for_rolls, resolve, steal_threshold, RiskOutcome};
pub use session::{close_boarding, open_boarding, steal, BoardingSession, BoardingStart, StealOutcome};
pub use transfer::{Plunder, StealKind, TransferBlock};

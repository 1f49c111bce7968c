//! Boarding eligibility - the gate in front of every attempt
//!
//! A pure predicate over two pilot snapshots. The checks run in a fixed
//! order and the first failure is the one reported, so callers always get
//! the most fundamental objection: a ship that is still fighting is "not
//! disabled", not "too far away".

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::config::BoardingConfig;
use crate::ship::pilot::Pilot;

/// Why a boarding attempt was refused
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IneligibleReason {
    #[error("target ship is still fighting")]
    NotDisabled,
    #[error("too far from target to dock")]
    TooFar,
    #[error("relative speed too high to engage docking clamps")]
    TooFast,
    #[error("target ship cannot be boarded")]
    NotBoardable,
    #[error("target ship has already been picked clean")]
    AlreadyBoarded,
}

/// Check whether `boarder` may begin boarding `target`
///
/// Touches no state and can be re-run freely. Conditions, in order:
/// disabled, in docking range, matched velocity, boardable, not yet boarded.
pub fn boarding_eligibility(
    boarder: &Pilot,
    target: &Pilot,
    config: &BoardingConfig,
) -> Result<(), IneligibleReason> {
    if !target.disabled {
        return Err(IneligibleReason::NotDisabled);
    }

    let reach = target.size_radius * config.proximity_factor;
    if boarder.position.distance(&target.position) > reach {
        return Err(IneligibleReason::TooFar);
    }

    let max_speed = config.max_boarding_speed;
    if boarder.relative_speed_squared(target) > max_speed * max_speed {
        return Err(IneligibleReason::TooFast);
    }

    if target.no_board {
        return Err(IneligibleReason::NotBoardable);
    }

    if target.boarded {
        return Err(IneligibleReason::AlreadyBoarded);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{PilotId, Vec2};

    fn boardable_pair() -> (Pilot, Pilot) {
        let boarder = Pilot::new(PilotId(1), "Reaver");
        let mut target = Pilot::new(PilotId(2), "Mule");
        target.disabled = true;
        target.size_radius = 20.0;
        (boarder, target)
    }

    #[test]
    fn test_clean_pair_is_eligible() {
        let (boarder, target) = boardable_pair();
        let config = BoardingConfig::default();
        assert_eq!(boarding_eligibility(&boarder, &target, &config), Ok(()));
    }

    #[test]
    fn test_not_disabled_reported_first() {
        let (mut boarder, mut target) = boardable_pair();
        let config = BoardingConfig::default();

        // Fail every later check too; the disabled check still wins
        target.disabled = false;
        target.no_board = true;
        target.boarded = true;
        boarder.position = Vec2::new(500.0, 0.0);
        boarder.velocity = Vec2::new(100.0, 0.0);

        assert_eq!(
            boarding_eligibility(&boarder, &target, &config),
            Err(IneligibleReason::NotDisabled)
        );
    }

    #[test]
    fn test_distance_window_uses_target_footprint() {
        let (mut boarder, target) = boardable_pair();
        let config = BoardingConfig::default();

        // Reach is 20.0 * 0.8 = 16.0; sitting exactly on it still docks
        boarder.position = Vec2::new(16.0, 0.0);
        assert_eq!(boarding_eligibility(&boarder, &target, &config), Ok(()));

        boarder.position = Vec2::new(16.1, 0.0);
        assert_eq!(
            boarding_eligibility(&boarder, &target, &config),
            Err(IneligibleReason::TooFar)
        );
    }

    #[test]
    fn test_relative_speed_window() {
        let (mut boarder, mut target) = boardable_pair();
        let config = BoardingConfig::default();

        // Same drift on both ships cancels out
        boarder.velocity = Vec2::new(60.0, 0.0);
        target.velocity = Vec2::new(60.0, 0.0);
        assert_eq!(boarding_eligibility(&boarder, &target, &config), Ok(()));

        // 25.0 relative is the last speed that still docks
        target.velocity = Vec2::new(35.0, 0.0);
        assert_eq!(boarding_eligibility(&boarder, &target, &config), Ok(()));

        target.velocity = Vec2::new(34.0, 0.0);
        assert_eq!(
            boarding_eligibility(&boarder, &target, &config),
            Err(IneligibleReason::TooFast)
        );
    }

    #[test]
    fn test_flag_checks_come_last() {
        let (boarder, mut target) = boardable_pair();
        let config = BoardingConfig::default();

        target.no_board = true;
        target.boarded = true;
        assert_eq!(
            boarding_eligibility(&boarder, &target, &config),
            Err(IneligibleReason::NotBoardable)
        );

        target.no_board = false;
        assert_eq!(
            boarding_eligibility(&boarder, &target, &config),
            Err(IneligibleReason::AlreadyBoarded)
        );
    }
}

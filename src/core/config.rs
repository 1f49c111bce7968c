//! Boarding configuration with documented constants
//!
//! The tunable values that shape when a boarding may begin and how long an
//! autonomous one takes. The risk model's own constants live next to the
//! risk engine; these are the world-level knobs.

use serde::{Deserialize, Serialize};

/// Configuration for the boarding systems
///
/// These values have been tuned against fleet-scale play. Changing them
/// shifts how aggressively disabled ships get picked clean.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardingConfig {
    /// Fraction of the target's footprint radius that counts as docking range
    ///
    /// At 0.8, a boarder must sit well inside the target's silhouette before
    /// the clamps can engage. Raising this makes drive-by boarding possible;
    /// lowering it forces a dead stop on top of the hull.
    pub proximity_factor: f32,

    /// Maximum relative speed (world units/s) at which clamps can engage
    ///
    /// Compared against the magnitude of the velocity difference between the
    /// two ships. 25.0 matches the fastest speed ships can still maneuver at.
    pub max_boarding_speed: f32,

    /// Seconds an autonomous boarding party needs to break in
    ///
    /// The completion fires this long after the attempt starts. Destroying
    /// either ship in the window cancels the attempt outright.
    pub boarding_delay: f32,
}

impl Default for BoardingConfig {
    fn default() -> Self {
        Self {
            proximity_factor: 0.8,
            max_boarding_speed: 25.0,
            boarding_delay: 3.0,
        }
    }
}

impl BoardingConfig {
    /// Create a config with the tuned defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Check the knobs for values that would break the boarding rules
    pub fn validate(&self) -> Result<(), String> {
        if self.proximity_factor <= 0.0 {
            return Err(format!(
                "proximity_factor ({}) must be positive",
                self.proximity_factor
            ));
        }

        if self.max_boarding_speed <= 0.0 {
            return Err(format!(
                "max_boarding_speed ({}) must be positive",
                self.max_boarding_speed
            ));
        }

        if self.boarding_delay < 0.0 {
            return Err(format!(
                "boarding_delay ({}) must not be negative",
                self.boarding_delay
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(BoardingConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = BoardingConfig::default();
        config.proximity_factor = 0.0;
        assert!(config.validate().is_err());

        let mut config = BoardingConfig::default();
        config.max_boarding_speed = -1.0;
        assert!(config.validate().is_err());

        let mut config = BoardingConfig::default();
        config.boarding_delay = -0.5;
        assert!(config.validate().is_err());
    }
}

//! Pilot state - the ship, its stores, and its boarding flags

use serde::{Deserialize, Serialize};

use crate::core::types::{EquipmentKind, PilotId, Vec2};
use crate::ship::cargo::CargoHold;
use crate::ship::equipment::EquipmentBay;

/// One ship and everything boarding cares about
///
/// Two of these participate in every boarding: the boarder and the target.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pilot {
    pub id: PilotId,
    pub name: String,

    /// Currency balance
    pub credits: u64,
    pub cargo: CargoHold,
    pub equipment: EquipmentBay,
    /// Uninstalled equipment this pilot owns; plundered gear lands here
    pub locker: Vec<EquipmentKind>,
    pub fuel: f32,
    pub fuel_max: f32,

    /// Crew complement; drives resistance to boarding parties
    pub crew: u32,
    pub armor: f32,
    /// Ablative layer that soaks hits before armor
    pub shield: f32,

    pub position: Vec2,
    pub velocity: Vec2,
    /// Hull footprint radius, sets the boarding proximity window
    pub size_radius: f32,

    /// Ship can no longer act; prerequisite for being boarded
    pub disabled: bool,
    /// Ship refuses boarders outright (mission-protected and similar)
    pub no_board: bool,
    /// Set the first time the ship is boarded; never cleared
    pub boarded: bool,
    /// Set on the aggressor while its boarding action is in flight
    pub boarding: bool,

    /// Carrier that deployed this ship, if any
    pub parent: Option<PilotId>,
    /// Most recent damage source, for downstream faction fallout
    pub last_hit_by: Option<PilotId>,
}

impl Pilot {
    pub fn new(id: PilotId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            credits: 0,
            cargo: CargoHold::new(0),
            equipment: EquipmentBay::new(0),
            locker: Vec::new(),
            fuel: 0.0,
            fuel_max: 100.0,
            crew: 0,
            armor: 100.0,
            shield: 50.0,
            position: Vec2::default(),
            velocity: Vec2::default(),
            size_radius: 20.0,
            disabled: false,
            no_board: false,
            boarded: false,
            boarding: false,
            parent: None,
            last_hit_by: None,
        }
    }

    /// Apply a damaging hit: shield soaks what it can, the rest comes off
    /// armor. Armor floors at zero; the source is recorded for attribution.
    pub fn apply_hit(&mut self, damage: f32, source: Option<PilotId>) {
        let absorbed = self.shield.min(damage);
        self.shield -= absorbed;
        self.armor = (self.armor - (damage - absorbed)).max(0.0);
        if source.is_some() {
            self.last_hit_by = source;
        }
    }

    /// Squared magnitude of the velocity difference between two ships
    pub fn relative_speed_squared(&self, other: &Pilot) -> f32 {
        (self.velocity - other.velocity).length_squared()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shield_absorbs_before_armor() {
        let mut pilot = Pilot::new(PilotId(1), "Mule");
        pilot.shield = 30.0;
        pilot.armor = 250.0;

        pilot.apply_hit(100.0, Some(PilotId(2)));

        assert_eq!(pilot.shield, 0.0);
        assert!((pilot.armor - 180.0).abs() < 1e-4);
        assert_eq!(pilot.last_hit_by, Some(PilotId(2)));
    }

    #[test]
    fn test_hit_within_shield_leaves_armor_alone() {
        let mut pilot = Pilot::new(PilotId(1), "Mule");
        pilot.shield = 80.0;
        pilot.armor = 100.0;

        pilot.apply_hit(50.0, None);

        assert!((pilot.shield - 30.0).abs() < 1e-4);
        assert_eq!(pilot.armor, 100.0);
        assert_eq!(pilot.last_hit_by, None);
    }

    #[test]
    fn test_armor_floors_at_zero() {
        let mut pilot = Pilot::new(PilotId(1), "Mule");
        pilot.shield = 0.0;
        pilot.armor = 40.0;

        pilot.apply_hit(100.0, Some(PilotId(3)));

        assert_eq!(pilot.armor, 0.0);
    }

    #[test]
    fn test_relative_speed() {
        let mut a = Pilot::new(PilotId(1), "A");
        let mut b = Pilot::new(PilotId(2), "B");
        a.velocity = Vec2::new(30.0, 0.0);
        b.velocity = Vec2::new(10.0, 0.0);

        assert!((a.relative_speed_squared(&b) - 400.0).abs() < 1e-4);
    }
}

//! Tunables for behavior execution.

use crate::{ActionError, ActionResult, Behavior};

/// Speeds, ranges and per-second rates used by the executor.
///
/// Rates are in whole units per second before personality efficiency is
/// applied: one unit is one arrow, bandage, plank of lumber, bucket of water,
/// or one gathered item.
#[derive(Clone, Debug, PartialEq)]
pub struct ActionConfig {
    /// Tiles per second.
    pub walk_speed: f32,
    /// A walk ends once this close to its destination.
    pub arrive_radius: f32,
    /// Reach for buildings and fires.
    pub interact_range: f32,
    pub shoot_range: f32,
    pub heal_range: f32,

    /// Most of each resource an agent can hold.
    pub carry_capacity: u32,
    pub gather_rate: f32,

    pub shoot_rate: f32,
    pub shoot_damage: f32,
    pub heal_rate: f32,
    pub heal_per_bandage: f32,
    pub repair_rate: f32,
    pub repair_per_lumber: f32,
    pub extinguish_rate: f32,
    pub extinguish_per_water: f32,
}

impl Default for ActionConfig {
    fn default() -> Self {
        Self {
            walk_speed: 3.0,
            arrive_radius: 0.1,
            interact_range: 1.5,
            shoot_range: 6.0,
            heal_range: 1.5,
            carry_capacity: 5,
            gather_rate: 2.0,
            shoot_rate: 1.0,
            shoot_damage: 20.0,
            heal_rate: 1.0,
            heal_per_bandage: 25.0,
            repair_rate: 1.0,
            repair_per_lumber: 20.0,
            extinguish_rate: 2.0,
            extinguish_per_water: 1.0,
        }
    }
}

impl ActionConfig {
    /// How close an agent must stand to perform `behavior`.
    pub fn reach(&self, behavior: Behavior) -> f32 {
        match behavior {
            Behavior::MoveTo { stop_within } => stop_within.max(self.arrive_radius),
            Behavior::Gather(_) | Behavior::Repair | Behavior::Extinguish => self.interact_range,
            Behavior::Shoot => self.shoot_range,
            Behavior::Heal => self.heal_range,
        }
    }

    pub fn validate(&self) -> ActionResult<()> {
        if !(self.walk_speed > 0.0) {
            return Err(ActionError::Config(format!("walk_speed must be > 0, got {}", self.walk_speed)));
        }
        if self.carry_capacity == 0 {
            return Err(ActionError::Config("carry_capacity must be >= 1".into()));
        }
        let rates = [
            ("gather_rate", self.gather_rate),
            ("shoot_rate", self.shoot_rate),
            ("heal_rate", self.heal_rate),
            ("repair_rate", self.repair_rate),
            ("extinguish_rate", self.extinguish_rate),
        ];
        for (name, rate) in rates {
            if !(rate > 0.0) {
                return Err(ActionError::Config(format!("{name} must be > 0, got {rate}")));
            }
        }
        Ok(())
    }
}

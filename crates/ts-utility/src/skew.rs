//! Hysteresis bias toward the plan an agent is already executing.

/// `score * multiplier + additive`, with `additive` optionally scaled by the
/// agent's personality bias for the plan.
///
/// Configured per plan category in [`PlannerConfig`][crate::PlannerConfig].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Skew {
    pub additive: f32,
    pub multiplier: f32,
    pub personality_scaled: bool,
}

impl Default for Skew {
    fn default() -> Self {
        Self { additive: 0.05, multiplier: 1.0, personality_scaled: false }
    }
}

impl Skew {
    pub const NONE: Skew = Skew { additive: 0.0, multiplier: 1.0, personality_scaled: false };

    pub fn additive(amount: f32) -> Self {
        Self { additive: amount, ..Self::NONE }
    }

    pub fn multiplicative(factor: f32) -> Self {
        Self { multiplier: factor, ..Self::NONE }
    }

    pub fn apply(self, score: f32, bias: f32) -> f32 {
        let add = if self.personality_scaled { self.additive * bias } else { self.additive };
        score * self.multiplier + add
    }
}

use ts_core::PlanKind;

use crate::{PlanningResult, Skew, UtilityError};

#[derive(Clone, Debug, PartialEq)]
pub struct PlannerConfig {
    /// Score of the idle plan.  Anything else must beat it strictly to win.
    pub idle_threshold: f32,
    /// Hysteresis skew per plan category, indexed by `PlanKind::index`.
    pub skew: [Skew; PlanKind::COUNT],
    /// Buckets per factor memo.
    pub memo_divisions: usize,
    /// Enemies farther than this are ignored by the shoot scorer.
    pub threat_horizon: f32,
    /// Injured allies farther than this are ignored by the heal scorer.
    pub heal_horizon: f32,
    /// Fire intensity that counts as a full blaze.
    pub max_fire_intensity: f32,
    /// Walks stop at this fraction of the behavior's reach.
    pub approach_margin: f32,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            idle_threshold: 0.05,
            skew: [Skew::default(); PlanKind::COUNT],
            memo_divisions: 64,
            threat_horizon: 12.0,
            heal_horizon: 10.0,
            max_fire_intensity: 10.0,
            approach_margin: 0.9,
        }
    }
}

impl PlannerConfig {
    #[inline]
    pub fn skew(&self, plan: PlanKind) -> Skew {
        self.skew[plan.index()]
    }

    pub fn with_skew(mut self, plan: PlanKind, skew: Skew) -> Self {
        self.skew[plan.index()] = skew;
        self
    }

    /// Same skew for every category.
    pub fn with_uniform_skew(mut self, skew: Skew) -> Self {
        self.skew = [skew; PlanKind::COUNT];
        self
    }

    pub fn validate(&self) -> PlanningResult<()> {
        if self.memo_divisions == 0 {
            return Err(UtilityError::NoDivisions);
        }
        if !(self.idle_threshold >= 0.0) {
            return Err(UtilityError::Config(format!("idle_threshold must be >= 0, got {}", self.idle_threshold)));
        }
        for (name, v) in [
            ("threat_horizon", self.threat_horizon),
            ("heal_horizon", self.heal_horizon),
            ("max_fire_intensity", self.max_fire_intensity),
        ] {
            if !(v > 0.0) {
                return Err(UtilityError::Config(format!("{name} must be > 0, got {v}")));
            }
        }
        if !(self.approach_margin > 0.0 && self.approach_margin <= 1.0) {
            return Err(UtilityError::Config(format!(
                "approach_margin must be in (0, 1], got {}",
                self.approach_margin
            )));
        }
        Ok(())
    }
}

use crate::{ScheduleError, ScheduleResult};

#[derive(Clone, Debug, PartialEq)]
pub struct SchedulerConfig {
    /// Microseconds per frame for full updates, before subtracting overhead.
    pub frame_budget_us: u64,
    /// Hard cap on full updates per frame regardless of time left.
    pub max_full_updates: Option<usize>,
    /// Full updates granted even when the budget is already spent.
    pub min_full_updates: usize,
    /// Added to a skipped agent's priority each frame.
    pub priority_increment: u32,
    /// Frames between resorts of the three orderings.
    pub resort_interval: u32,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            frame_budget_us: 4_000,
            max_full_updates: None,
            min_full_updates: 1,
            priority_increment: 1,
            resort_interval: 10,
        }
    }
}

impl SchedulerConfig {
    /// Exactly `k` full updates per frame (budget permitting), resorting
    /// every frame.  Useful for deterministic runs with a `FrozenClock`.
    pub fn fixed(k: usize) -> Self {
        Self {
            max_full_updates: Some(k),
            min_full_updates: k.min(1),
            resort_interval: 1,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> ScheduleResult<()> {
        if self.priority_increment == 0 {
            return Err(ScheduleError::Config("priority_increment must be >= 1".into()));
        }
        if self.resort_interval == 0 {
            return Err(ScheduleError::Config("resort_interval must be >= 1".into()));
        }
        if let Some(max) = self.max_full_updates {
            if self.min_full_updates > max {
                return Err(ScheduleError::Config(format!(
                    "min_full_updates ({}) exceeds max_full_updates ({max})",
                    self.min_full_updates
                )));
            }
        }
        Ok(())
    }
}

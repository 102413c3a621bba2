use thiserror::Error;
use ts_action::ActionError;
use ts_core::TsError;
use ts_schedule::ScheduleError;
use ts_spatial::SpatialError;
use ts_utility::UtilityError;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error("{what} length {got} does not match agent count {expected}")]
    AgentCountMismatch {
        expected: usize,
        got:      usize,
        what:     &'static str,
    },

    #[error(transparent)]
    Core(#[from] TsError),

    #[error("map error: {0}")]
    Spatial(#[from] SpatialError),

    #[error(transparent)]
    Action(#[from] ActionError),

    #[error(transparent)]
    Utility(#[from] UtilityError),

    #[error(transparent)]
    Schedule(#[from] ScheduleError),
}

pub type SimResult<T> = Result<T, SimError>;

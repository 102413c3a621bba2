use thiserror::Error;

use ts_core::AgentId;

#[derive(Debug, Error)]
pub enum UtilityError {
    #[error("memo domain [{min}, {max}] is empty")]
    InvalidDomain { min: f32, max: f32 },

    #[error("memo needs at least one division")]
    NoDivisions,

    #[error("agent {0} still has queued actions")]
    StackNotEmpty(AgentId),

    #[error("planner configuration error: {0}")]
    Config(String),
}

pub type PlanningResult<T> = Result<T, UtilityError>;

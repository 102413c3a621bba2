use thiserror::Error;

#[derive(Debug, Error)]
pub enum ActionError {
    #[error("action configuration error: {0}")]
    Config(String),
}

pub type ActionResult<T> = Result<T, ActionError>;

/// Why a step could not make progress.  Never escalated past the executor:
/// the stack is cleared and the agent re-plans.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Error)]
pub enum ActionFailure {
    #[error("destination unreachable")]
    Unreachable,
    #[error("step has no target of the right kind")]
    MissingTarget,
    #[error("target no longer exists")]
    TargetGone,
    #[error("target out of range")]
    OutOfRange,
    #[error("nothing left to use")]
    OutOfSupply,
    #[error("actor is dead")]
    ActorDead,
}

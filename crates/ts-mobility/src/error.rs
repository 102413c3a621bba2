use thiserror::Error;

use ts_core::{AgentId, TileCoord};
use ts_spatial::SpatialError;

#[derive(Debug, Error)]
pub enum MobilityError {
    #[error("agent {0} is dead")]
    Dead(AgentId),

    #[error("agent {agent} cannot reach {goal}: {source}")]
    Unreachable {
        agent:  AgentId,
        goal:   TileCoord,
        #[source]
        source: SpatialError,
    },
}

pub type MobilityResult<T> = Result<T, MobilityError>;

//! Board error type.

use thiserror::Error;

use haul_core::{CoreError, EdgeId, NodeId, ParcelId, TruckId};
use haul_score::ScoreError;

#[derive(Debug, Error)]
pub enum BoardError {
    #[error("no node named {0:?}")]
    UnknownNode(String),

    #[error("node name {0:?} used twice")]
    DuplicateNode(String),

    #[error("node {0} not found")]
    NodeNotFound(NodeId),

    #[error("edge {0} not found")]
    EdgeNotFound(EdgeId),

    #[error("parcel {0} not found")]
    ParcelNotFound(ParcelId),

    #[error("edge would connect {0} to itself")]
    SelfLoop(NodeId),

    #[error("{a} and {b} are already connected")]
    DuplicateEdge { a: NodeId, b: NodeId },

    #[error("edge length must be positive")]
    ZeroLength,

    #[error("edge {0} still has no length")]
    PendingLength(EdgeId),

    #[error("parcel origin and destination are both {0}")]
    SameOriginDestination(NodeId),

    #[error("no depot node was set")]
    NoDepot,

    #[error("board has no nodes")]
    Empty,

    #[error("too many {0} for 32-bit ids")]
    TooMany(&'static str),

    #[error("parcel {parcel} is not resting at {node}")]
    ParcelNotHere { parcel: ParcelId, node: NodeId },

    #[error("parcel {parcel} is not held by {truck}")]
    ParcelNotHeld { parcel: ParcelId, truck: TruckId },

    #[error(transparent)]
    Score(#[from] ScoreError),

    #[error(transparent)]
    Core(#[from] CoreError),
}

pub type BoardResult<T> = Result<T, BoardError>;

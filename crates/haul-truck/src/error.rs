use thiserror::Error;

use haul_board::BoardError;
use haul_core::{EdgeId, NodeId, ParcelId, TruckId};
use haul_score::ScoreError;

use crate::Status;

#[derive(Debug, Error)]
pub enum TruckError {
    #[error("{truck} cannot do that while {status}")]
    IllegalState { truck: TruckId, status: Status },

    #[error("{truck} cannot travel {edge} from {from}")]
    IllegalTravel { truck: TruckId, edge: EdgeId, from: NodeId },

    #[error("no edge joins {a} and {b}")]
    NoEdge { a: NodeId, b: NodeId },

    #[error("travel path must start at {expected}, not {got}")]
    PathStart { expected: NodeId, got: NodeId },

    #[error("edge {0} is not on the board")]
    UnknownEdge(EdgeId),

    #[error("{truck} already holds {held}")]
    AlreadyLoaded { truck: TruckId, held: ParcelId },

    #[error("{0} is not holding a parcel")]
    NotHolding(TruckId),

    #[error(transparent)]
    Board(#[from] BoardError),

    #[error(transparent)]
    Score(#[from] ScoreError),
}

pub type TruckResult<T> = Result<T, TruckError>;

use thiserror::Error;

use haul_board::BoardError;
use haul_truck::TruckError;

#[derive(Debug, Error)]
pub enum ManagerError {
    #[error("truck command failed: {0}")]
    Truck(#[from] TruckError),

    #[error("board query failed: {0}")]
    Board(#[from] BoardError),

    #[error("strategy error: {0}")]
    Strategy(String),
}

pub type ManagerResult<T> = Result<T, ManagerError>;

use haul_board::BoardError;
use haul_core::{CoreError, SessionStatus};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("session configuration error: {0}")]
    Config(#[from] CoreError),

    #[error("board error: {0}")]
    Board(#[from] BoardError),

    #[error("fleet index {0} does not fit a 32-bit truck id")]
    FleetTooLarge(usize),

    #[error("session cannot start from status {0}")]
    NotReady(SessionStatus),

    #[error("could not spawn worker thread: {0}")]
    Spawn(#[from] std::io::Error),
}

pub type SimResult<T> = Result<T, SimError>;

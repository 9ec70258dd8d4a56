use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScoreError {
    #[error("speed {0} is outside [{min}, {max}]", min = crate::MIN_SPEED, max = crate::MAX_SPEED)]
    SpeedOutOfRange(u32),

    #[error("progress {units} exceeds speed {speed}")]
    ProgressExceedsSpeed { units: u32, speed: u32 },

    #[error("invalid coefficient: {0}")]
    Coefficient(String),
}

pub type ScoreResult<T> = Result<T, ScoreError>;

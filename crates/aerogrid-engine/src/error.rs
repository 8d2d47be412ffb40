use aerogrid_core::CoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Geometry(#[from] CoreError),

    #[error("cannot summarise an empty prediction set")]
    EmptyPrediction,

    #[error("invalid breakpoint table: {reason}")]
    InvalidBreakpoints { reason: String },

    #[error("unknown breakpoint scale: {0}")]
    UnknownScale(String),
}

impl EngineError {
    /// `true` for errors caused by caller input rather than engine state.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            EngineError::Geometry(_) | EngineError::UnknownScale(_)
        )
    }
}

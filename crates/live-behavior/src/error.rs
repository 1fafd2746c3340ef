use live_core::{BehaviorId, LiveError};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum BehaviorError {
    #[error("behavior {0} not found")]
    NotFound(BehaviorId),

    #[error("behavior {id} failed: {message}")]
    Failed {
        id:      BehaviorId,
        message: String,
    },

    #[error(transparent)]
    Core(#[from] LiveError),
}

impl BehaviorError {
    /// Shorthand for a runtime failure reported from inside `tick`.
    pub fn failed(id: BehaviorId, message: impl Into<String>) -> Self {
        BehaviorError::Failed { id, message: message.into() }
    }
}

pub type BehaviorResult<T> = Result<T, BehaviorError>;

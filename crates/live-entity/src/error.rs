use live_behavior::BehaviorError;
use live_core::{EntityId, LiveError};
use thiserror::Error;

/// Rejected `move_to` arguments.  Raised when the behavior is built, never
/// while it runs.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MotionError {
    #[error("`{key}` is not a valid option in {mode} mode")]
    InvalidOption {
        key:  &'static str,
        mode: &'static str,
    },

    #[error("one of `time`, `speed`, or `accel` must be given")]
    MissingMode,

    #[error("`{key}` must be finite, got {value}")]
    NonFinite {
        key:   &'static str,
        value: f32,
    },

    #[error("`{key}` must not be negative, got {value}")]
    Negative {
        key:   &'static str,
        value: f32,
    },

    #[error("`time` must be greater than zero, got {0}")]
    NonPositiveTime(f32),
}

pub type MotionResult<T> = Result<T, MotionError>;

#[derive(Debug, Error)]
pub enum EntityError {
    #[error("entity {0} does not track contacts")]
    ContactsDisabled(EntityId),

    #[error(transparent)]
    Motion(#[from] MotionError),

    #[error(transparent)]
    Behavior(#[from] BehaviorError),

    #[error(transparent)]
    Core(#[from] LiveError),
}

pub type EntityResult<T> = Result<T, EntityError>;

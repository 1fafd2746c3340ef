//! Framework error type.
//!
//! Sub-crates define their own error enums and wrap `LiveError` as one
//! variant via `From`, so `?` works across crate boundaries.

use thiserror::Error;

/// The top-level error type for `live-core` and a common base for sub-crates.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum LiveError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("invalid tick rate {0}: must be finite and greater than zero")]
    InvalidTickRate(f32),
}

/// Shorthand result type for all `live-*` crates.
pub type LiveResult<T> = Result<T, LiveError>;

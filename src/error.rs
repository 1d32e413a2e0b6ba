//! Error types for the Stonehenge crate.

use thiserror::Error;

use crate::state::Move;

/// Main error type for the Stonehenge crate.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("invalid move: {mv} is not an unclaimed cell")]
    InvalidMove { mv: Move },

    #[error("unsupported side length {side_length} (expected 1 to 5)")]
    UnsupportedSideLength { side_length: usize },

    #[error("failed to read move: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

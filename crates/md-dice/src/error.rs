//! Error types for the dice engine.

/// Errors that can occur while building or resolving a dice pool.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DiceError {
    /// A face value outside 1-6 was supplied.
    #[error("invalid d6 face: {0}")]
    InvalidFace(u8),

    /// A pool size outside the allowed range was requested.
    #[error("cannot roll {requested} dice (allowed: 1 to {max})")]
    PoolSize {
        /// The number of dice requested.
        requested: u32,
        /// The largest pool that may be rolled.
        max: u32,
    },

    /// An obstacle of zero was requested.
    #[error("invalid obstacle: {0}")]
    InvalidObstacle(u32),
}

/// Convenience result type for dice operations.
pub type DiceResult<T> = Result<T, DiceError>;

//! Error types for the game simulation.

use thiserror::Error;

/// Result type alias using [`GameError`].
pub type Result<T> = std::result::Result<T, GameError>;

/// Top-level error type for all game simulation errors.
#[derive(Debug, Error)]
pub enum GameError {
    /// A kind tag at the parse boundary did not name a known entity kind.
    ///
    /// This is never swallowed: an engine handed an unknown kind indicates a
    /// programming defect, not a runtime condition.
    #[error("unknown entity kind: '{0}'")]
    UnknownEntityKind(String),

    /// The bullet-processing step of a tick detected corrupted state.
    ///
    /// Recoverable by policy: the engine reports the fault, abandons the
    /// bullet step for the tick, and keeps running.
    #[error("simulation fault at tick {tick}: {message}")]
    TickFault {
        /// Tick during which the fault was detected.
        tick: u64,
        /// Description of the violated invariant.
        message: String,
    },

    /// An operation was requested in a phase that does not permit it.
    #[error("invalid game state: {0}")]
    InvalidState(String),
}

//! Engine errors.
//!
//! Capacity problems (full hand, full field, empty deck) are not errors:
//! the affected sub-operation becomes a no-op. What remains falls into
//! three groups, see [`ErrorCategory`].

use super::entity::InstanceId;

/// Coarse classification used by hosts to decide how to react.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Static card data is wrong. Unrecoverable; fix the data.
    DataIntegrity,
    /// The step budget ran out before the game finished.
    Runaway,
    /// The caller drove the engine incorrectly.
    Usage,
}

/// Errors surfaced by the simulation engine.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error("unknown card template `{0}`")]
    UnknownCard(String),

    #[error("card template `{0}` is registered twice")]
    DuplicateTemplate(String),

    #[error("malformed effect on `{card}`: {reason}")]
    MalformedEffect { card: String, reason: String },

    #[error("invalid deck for {player}: {reason}")]
    InvalidDeck { player: String, reason: String },

    #[error("no card instance {0} in play")]
    UnknownInstance(InstanceId),

    #[error("game is already decided; no further steps are allowed")]
    GameOver,

    #[error("game did not finish within {limit} steps")]
    StepLimitExceeded { limit: usize },

    #[error("snapshot codec failed: {0}")]
    Snapshot(String),
}

impl EngineError {
    /// Classify this error.
    #[must_use]
    pub fn category(&self) -> ErrorCategory {
        match self {
            EngineError::UnknownCard(_)
            | EngineError::DuplicateTemplate(_)
            | EngineError::MalformedEffect { .. }
            | EngineError::InvalidDeck { .. }
            | EngineError::UnknownInstance(_) => ErrorCategory::DataIntegrity,
            EngineError::StepLimitExceeded { .. } => ErrorCategory::Runaway,
            EngineError::GameOver | EngineError::Snapshot(_) => ErrorCategory::Usage,
        }
    }

    pub(crate) fn malformed(card: impl Into<String>, reason: impl Into<String>) -> Self {
        EngineError::MalformedEffect {
            card: card.into(),
            reason: reason.into(),
        }
    }
}

impl From<bincode::Error> for EngineError {
    fn from(err: bincode::Error) -> Self {
        EngineError::Snapshot(err.to_string())
    }
}

/// Engine result type.
pub type Result<T> = std::result::Result<T, EngineError>;

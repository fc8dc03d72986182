//! Session error types.
//!
//! These errors represent rejected operations on an assessment session.
//! All of them are local and synchronous: a rejected call leaves the
//! session exactly as it was.

use thiserror::Error;

use crate::ladder::DifficultyTier;

/// Errors that can occur when driving an assessment session.
#[derive(Debug, Error)]
pub enum SessionError {
    /// No question exists at a tier where one is mandatory (session start).
    #[error("no questions available at tier '{tier}'")]
    ExhaustedPool { tier: DifficultyTier },

    /// A submission referenced a question other than the pending one.
    #[error("stale submission for question '{submitted}', expected '{expected}'")]
    StaleSubmission { submitted: String, expected: String },

    /// An operation was attempted on an already-completed session.
    #[error("session is already completed")]
    SessionCompleted,

    /// The question repository failed to answer a lookup.
    #[error(transparent)]
    Repository(#[from] anyhow::Error),
}

impl SessionError {
    /// Returns `true` if this error was caused by invalid caller input
    /// rather than by the question pool or a collaborator.
    pub fn is_caller_error(&self) -> bool {
        matches!(
            self,
            SessionError::StaleSubmission { .. } | SessionError::SessionCompleted
        )
    }
}

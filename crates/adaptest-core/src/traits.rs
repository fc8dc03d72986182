//! Collaborator trait definitions for the assessment engine.
//!
//! The engine talks to the surrounding system only through these async
//! traits: a read-only question repository, a result store that persists
//! finished sessions, and an optional narrative summarizer. Concrete
//! implementations live in the `adaptest-store` crate.

use async_trait::async_trait;

use crate::ladder::DifficultyTier;
use crate::model::Question;
use crate::report::SessionReport;

/// Read-only source of questions, keyed by difficulty tier.
///
/// The advertised pool is assumed large enough that an empty result is
/// exceptional rather than the normal path.
#[async_trait]
pub trait QuestionRepository: Send + Sync {
    /// Fetch the candidate pool for a tier.
    async fn get_by_tier(&self, tier: DifficultyTier) -> anyhow::Result<Vec<Question>>;
}

/// Sink for finished session reports.
///
/// A failed save is reported upward but never rolls back session
/// completion; the session's terminal state is reached regardless.
#[async_trait]
pub trait ResultStore: Send + Sync {
    /// Persist a finished session report.
    async fn save(&self, report: &SessionReport) -> anyhow::Result<()>;
}

/// Produces free-text analysis of a finished session.
///
/// Entirely optional; invoked only after persistence and never affecting
/// engine correctness.
#[async_trait]
pub trait NarrativeSummarizer: Send + Sync {
    /// Summarize a finished session report as prose.
    async fn summarize(&self, report: &SessionReport) -> anyhow::Result<String>;
}

//! Session state and the difficulty progression policy.
//!
//! The progression rule is a pure function over (tier, streak counters,
//! outcome); [`SessionState`] applies it together with the transcript append
//! as one atomic step per submission.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::ladder::DifficultyTier;
use crate::model::{AnswerEvent, Question};

/// Hard cap on questions per session.
pub const MAX_QUESTIONS: usize = 30;

/// Consecutive same-outcome answers required to trigger a tier change.
pub const STREAK_WINDOW: u32 = 2;

/// Whether a session can still accept submissions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    Active,
    Completed,
}

/// Direction of a tier change triggered by the progression rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TierChange {
    Advanced,
    Regressed,
}

/// Result of applying the progression rule to one answer outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progression {
    pub tier: DifficultyTier,
    pub consecutive_correct: u32,
    pub consecutive_wrong: u32,
    pub tier_change: Option<TierChange>,
}

/// Apply the difficulty progression rule to a single answer outcome.
///
/// A correct answer clears the wrong streak and extends the correct streak;
/// at exactly [`STREAK_WINDOW`] the tier advances one step (clamped at the
/// top) and both counters reset. A wrong answer mirrors this downward. A
/// tier change consumes the streak that triggered it, so changes only ever
/// happen on the threshold itself.
pub fn apply_outcome(
    tier: DifficultyTier,
    consecutive_correct: u32,
    consecutive_wrong: u32,
    correct: bool,
) -> Progression {
    if correct {
        let streak = consecutive_correct + 1;
        if streak == STREAK_WINDOW {
            Progression {
                tier: tier.next(),
                consecutive_correct: 0,
                consecutive_wrong: 0,
                tier_change: Some(TierChange::Advanced),
            }
        } else {
            Progression {
                tier,
                consecutive_correct: streak,
                consecutive_wrong: 0,
                tier_change: None,
            }
        }
    } else {
        let streak = consecutive_wrong + 1;
        if streak == STREAK_WINDOW {
            Progression {
                tier: tier.previous(),
                consecutive_correct: 0,
                consecutive_wrong: 0,
                tier_change: Some(TierChange::Regressed),
            }
        } else {
            Progression {
                tier,
                consecutive_correct: 0,
                consecutive_wrong: streak,
                tier_change: None,
            }
        }
    }
}

/// Mutable state of one in-flight assessment run.
///
/// Owned by exactly one caller; the engine takes it by `&mut`, so two
/// submissions for the same session cannot race.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionState {
    /// Session identifier.
    pub id: Uuid,
    /// Tier the next question will be drawn from.
    pub current_tier: DifficultyTier,
    /// Current run of consecutive correct answers.
    pub consecutive_correct: u32,
    /// Current run of consecutive wrong answers.
    pub consecutive_wrong: u32,
    /// Identifiers of every question already presented. Never shrinks.
    pub asked_ids: HashSet<String>,
    /// Ordered record of every answered question. Append-only.
    pub transcript: Vec<AnswerEvent>,
    /// Whether the session still accepts submissions.
    pub status: SessionStatus,
    /// The question awaiting an answer, if any.
    pub pending: Option<Question>,
    /// When the session started.
    pub started_at: DateTime<Utc>,
}

impl SessionState {
    /// Create a fresh active session at the easiest tier.
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            current_tier: DifficultyTier::VeryEasy,
            consecutive_correct: 0,
            consecutive_wrong: 0,
            asked_ids: HashSet::new(),
            transcript: Vec::new(),
            status: SessionStatus::Active,
            pending: None,
            started_at: Utc::now(),
        }
    }

    /// Whether the session still accepts submissions.
    pub fn is_active(&self) -> bool {
        self.status == SessionStatus::Active
    }

    /// Whether the transcript has reached the hard cap.
    pub fn is_full(&self) -> bool {
        self.transcript.len() >= MAX_QUESTIONS
    }

    /// 1-based ordinal for the next answer.
    pub fn next_ordinal(&self) -> u32 {
        self.transcript.len() as u32 + 1
    }

    /// Append an answer and apply the progression rule in one step.
    ///
    /// Returns the progression so callers can report tier changes.
    pub fn record_answer(&mut self, event: AnswerEvent) -> Progression {
        let progression = apply_outcome(
            self.current_tier,
            self.consecutive_correct,
            self.consecutive_wrong,
            event.correct,
        );

        self.asked_ids.insert(event.question_id.clone());
        self.transcript.push(event);
        self.current_tier = progression.tier;
        self.consecutive_correct = progression.consecutive_correct;
        self.consecutive_wrong = progression.consecutive_wrong;

        debug_assert!(
            self.consecutive_correct == 0 || self.consecutive_wrong == 0,
            "streak counters must never both be nonzero"
        );
        debug_assert_eq!(self.asked_ids.len(), self.transcript.len());
        debug_assert!(self.transcript.len() <= MAX_QUESTIONS);

        progression
    }

    /// Mark the session completed. Terminal; clears any pending question.
    pub fn complete(&mut self) {
        self.status = SessionStatus::Completed;
        self.pending = None;
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

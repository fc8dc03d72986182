//! Core data model types for adaptest.
//!
//! These are the fundamental types the entire adaptest system uses to
//! represent questions, question banks, and answered-question events.

use serde::{Deserialize, Serialize};

use crate::ladder::DifficultyTier;

/// A single multiple-choice question.
///
/// Owned by the question repository; the engine only ever reads it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    /// Unique identifier for this question.
    pub id: String,
    /// The prompt shown to the candidate.
    pub prompt: String,
    /// Answer options in presentation order. At least two.
    pub options: Vec<String>,
    /// Index into `options` of the correct answer.
    pub correct_index: usize,
    /// Explanation shown after answering.
    #[serde(default)]
    pub explanation: String,
    /// Concept tags for filtering and reporting.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Difficulty tier this question belongs to.
    pub tier: DifficultyTier,
}

impl Question {
    /// Whether the given option index is the correct answer.
    pub fn is_correct(&self, selected: usize) -> bool {
        selected == self.correct_index
    }
}

/// A named collection of questions loaded from a bank file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionBank {
    /// Unique identifier for this bank.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Description of what this bank covers.
    #[serde(default)]
    pub description: String,
    /// The questions in this bank.
    #[serde(default)]
    pub questions: Vec<Question>,
}

impl QuestionBank {
    /// Count of questions at the given tier.
    pub fn count_at(&self, tier: DifficultyTier) -> usize {
        self.questions.iter().filter(|q| q.tier == tier).count()
    }
}

/// One answered question, recorded immediately after a submission.
///
/// Immutable once appended to a session transcript.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerEvent {
    /// Identifier of the question that was answered.
    pub question_id: String,
    /// Tier the session was at when the question was presented.
    pub tier: DifficultyTier,
    /// Option index the candidate selected.
    pub selected: usize,
    /// Whether the selected option was the correct one.
    pub correct: bool,
    /// Time taken to answer, in milliseconds.
    pub time_taken_ms: u64,
    /// 1-based position of this answer within the session.
    pub ordinal: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_question(id: &str, tier: DifficultyTier) -> Question {
        Question {
            id: id.into(),
            prompt: "What is 2 + 2?".into(),
            options: vec!["3".into(), "4".into(), "5".into()],
            correct_index: 1,
            explanation: "Basic addition.".into(),
            tags: vec!["arithmetic".into()],
            tier,
        }
    }

    #[test]
    fn correctness_compares_to_correct_index() {
        let q = make_question("q1", DifficultyTier::Easy);
        assert!(q.is_correct(1));
        assert!(!q.is_correct(0));
        // An index past the options is simply not the correct answer.
        assert!(!q.is_correct(99));
    }

    #[test]
    fn bank_counts_per_tier() {
        let bank = QuestionBank {
            id: "b1".into(),
            name: "Bank".into(),
            description: String::new(),
            questions: vec![
                make_question("q1", DifficultyTier::VeryEasy),
                make_question("q2", DifficultyTier::VeryEasy),
                make_question("q3", DifficultyTier::Difficult),
            ],
        };
        assert_eq!(bank.count_at(DifficultyTier::VeryEasy), 2);
        assert_eq!(bank.count_at(DifficultyTier::Easy), 0);
        assert_eq!(bank.count_at(DifficultyTier::Difficult), 1);
    }

    #[test]
    fn question_serde_roundtrip() {
        let q = make_question("q1", DifficultyTier::Moderate);
        let json = serde_json::to_string(&q).unwrap();
        let back: Question = serde_json::from_str(&json).unwrap();
        assert_eq!(back.id, "q1");
        assert_eq!(back.tier, DifficultyTier::Moderate);
        assert_eq!(back.options.len(), 3);
    }
}

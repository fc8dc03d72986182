//! Transcript statistics.
//!
//! Aggregates a finished session's transcript into overall and per-tier
//! accuracy figures for the report and the summarizer.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::ladder::DifficultyTier;
use crate::model::AnswerEvent;

/// Aggregate statistics for one session transcript.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionStats {
    /// Number of questions answered.
    pub total_answered: usize,
    /// Number answered correctly.
    pub total_correct: usize,
    /// Overall accuracy in [0, 1]; 0 for an empty transcript.
    pub accuracy: f64,
    /// Mean time per answer in milliseconds.
    pub avg_time_ms: u64,
    /// Per-tier breakdown, keyed by the tier questions were presented at.
    pub per_tier: HashMap<DifficultyTier, TierStats>,
    /// Hardest tier at which a question was presented, if any were.
    pub highest_tier: Option<DifficultyTier>,
}

/// Statistics for the questions presented at a single tier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TierStats {
    /// Questions presented at this tier.
    pub presented: usize,
    /// Questions answered correctly at this tier.
    pub correct: usize,
    /// Accuracy at this tier in [0, 1].
    pub accuracy: f64,
}

/// Compute aggregate statistics from a session transcript.
pub fn compute_session_stats(transcript: &[AnswerEvent]) -> SessionStats {
    let total_answered = transcript.len();
    let total_correct = transcript.iter().filter(|e| e.correct).count();
    let accuracy = if total_answered == 0 {
        0.0
    } else {
        total_correct as f64 / total_answered as f64
    };

    let avg_time_ms = if total_answered == 0 {
        0
    } else {
        transcript.iter().map(|e| e.time_taken_ms).sum::<u64>() / total_answered as u64
    };

    let mut per_tier: HashMap<DifficultyTier, TierStats> = HashMap::new();
    for event in transcript {
        let entry = per_tier.entry(event.tier).or_insert(TierStats {
            presented: 0,
            correct: 0,
            accuracy: 0.0,
        });
        entry.presented += 1;
        if event.correct {
            entry.correct += 1;
        }
    }
    for stats in per_tier.values_mut() {
        stats.accuracy = stats.correct as f64 / stats.presented as f64;
    }

    let highest_tier = transcript.iter().map(|e| e.tier).max();

    SessionStats {
        total_answered,
        total_correct,
        accuracy,
        avg_time_ms,
        per_tier,
        highest_tier,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_event(tier: DifficultyTier, correct: bool, time_ms: u64, ordinal: u32) -> AnswerEvent {
        AnswerEvent {
            question_id: format!("q{ordinal}"),
            tier,
            selected: 0,
            correct,
            time_taken_ms: time_ms,
            ordinal,
        }
    }

    #[test]
    fn empty_transcript() {
        let stats = compute_session_stats(&[]);
        assert_eq!(stats.total_answered, 0);
        assert_eq!(stats.accuracy, 0.0);
        assert_eq!(stats.avg_time_ms, 0);
        assert!(stats.per_tier.is_empty());
        assert!(stats.highest_tier.is_none());
    }

    #[test]
    fn overall_accuracy_and_timing() {
        let transcript = vec![
            make_event(DifficultyTier::VeryEasy, true, 1000, 1),
            make_event(DifficultyTier::VeryEasy, true, 2000, 2),
            make_event(DifficultyTier::Easy, false, 3000, 3),
            make_event(DifficultyTier::Easy, true, 2000, 4),
        ];
        let stats = compute_session_stats(&transcript);
        assert_eq!(stats.total_answered, 4);
        assert_eq!(stats.total_correct, 3);
        assert!((stats.accuracy - 0.75).abs() < f64::EPSILON);
        assert_eq!(stats.avg_time_ms, 2000);
    }

    #[test]
    fn per_tier_breakdown() {
        let transcript = vec![
            make_event(DifficultyTier::VeryEasy, true, 500, 1),
            make_event(DifficultyTier::Easy, false, 500, 2),
            make_event(DifficultyTier::Easy, true, 500, 3),
            make_event(DifficultyTier::Moderate, false, 500, 4),
        ];
        let stats = compute_session_stats(&transcript);

        let easy = &stats.per_tier[&DifficultyTier::Easy];
        assert_eq!(easy.presented, 2);
        assert_eq!(easy.correct, 1);
        assert!((easy.accuracy - 0.5).abs() < f64::EPSILON);

        let moderate = &stats.per_tier[&DifficultyTier::Moderate];
        assert_eq!(moderate.presented, 1);
        assert_eq!(moderate.correct, 0);
        assert_eq!(stats.highest_tier, Some(DifficultyTier::Moderate));
        assert!(!stats.per_tier.contains_key(&DifficultyTier::Difficult));
    }
}

//! Deterministic template summarizer.
//!
//! Builds a short prose analysis of a finished session from its
//! statistics. Stands in for the product's narrative service behind the
//! same trait.

use async_trait::async_trait;

use adaptest_core::ladder::DifficultyTier;
use adaptest_core::report::{EndReason, SessionReport};
use adaptest_core::traits::NarrativeSummarizer;

/// Summarizer producing fixed-template prose from session statistics.
#[derive(Debug, Default)]
pub struct TemplateSummarizer;

impl TemplateSummarizer {
    pub fn new() -> Self {
        Self
    }

    fn accuracy_band(accuracy: f64) -> &'static str {
        if accuracy >= 0.9 {
            "excellent"
        } else if accuracy >= 0.75 {
            "strong"
        } else if accuracy >= 0.5 {
            "mixed"
        } else {
            "struggling"
        }
    }

    fn render(report: &SessionReport) -> String {
        let stats = &report.stats;

        if stats.total_answered == 0 {
            return "The session ended before any questions were answered.".to_string();
        }

        let mut text = format!(
            "Answered {} of {} questions correctly ({:.0}% accuracy) — {} performance overall. ",
            stats.total_correct,
            stats.total_answered,
            stats.accuracy * 100.0,
            Self::accuracy_band(stats.accuracy),
        );

        if let Some(highest) = stats.highest_tier {
            text.push_str(&format!(
                "The highest difficulty reached was '{highest}', finishing at '{}'. ",
                report.final_tier
            ));
        }

        let weak: Vec<String> = DifficultyTier::ALL
            .iter()
            .filter_map(|tier| {
                stats.per_tier.get(tier).and_then(|t| {
                    if t.presented >= 2 && t.accuracy < 0.5 {
                        Some(tier.to_string())
                    } else {
                        None
                    }
                })
            })
            .collect();
        if !weak.is_empty() {
            text.push_str(&format!(
                "Accuracy fell below half at: {}. ",
                weak.join(", ")
            ));
        }

        match report.end_reason {
            EndReason::CapReached => {
                text.push_str("The full question allocation was used.");
            }
            EndReason::PoolExhausted => {
                text.push_str("The session ended once no fresh questions remained at the working difficulty.");
            }
            EndReason::EndedEarly => {
                text.push_str("The session was ended before the question allocation ran out.");
            }
        }

        text
    }
}

#[async_trait]
impl NarrativeSummarizer for TemplateSummarizer {
    async fn summarize(&self, report: &SessionReport) -> anyhow::Result<String> {
        Ok(Self::render(report))
    }
}

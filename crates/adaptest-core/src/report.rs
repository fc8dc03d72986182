//! Session report types with JSON persistence.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::ladder::DifficultyTier;
use crate::model::AnswerEvent;
use crate::statistics::{compute_session_stats, SessionStats};

/// Why a session reached its terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndReason {
    /// The transcript reached the hard question cap.
    CapReached,
    /// No unseen question remained at the current tier.
    PoolExhausted,
    /// The caller ended the session before the cap.
    EndedEarly,
}

/// A finished session, packaged for persistence and summarization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionReport {
    /// Unique report identifier.
    pub id: Uuid,
    /// The session this report describes.
    pub session_id: Uuid,
    /// When the report was created.
    pub created_at: DateTime<Utc>,
    /// Why the session ended.
    pub end_reason: EndReason,
    /// Tier the session finished at.
    pub final_tier: DifficultyTier,
    /// The full ordered transcript.
    pub transcript: Vec<AnswerEvent>,
    /// Aggregate statistics over the transcript.
    pub stats: SessionStats,
    /// Free-text analysis, if a summarizer produced one.
    #[serde(default)]
    pub narrative: Option<String>,
    /// Wall-clock session duration in milliseconds.
    pub duration_ms: u64,
}

impl SessionReport {
    /// Build a report from a finished session's transcript.
    pub fn new(
        session_id: Uuid,
        end_reason: EndReason,
        final_tier: DifficultyTier,
        transcript: Vec<AnswerEvent>,
        duration_ms: u64,
    ) -> Self {
        let stats = compute_session_stats(&transcript);
        Self {
            id: Uuid::new_v4(),
            session_id,
            created_at: Utc::now(),
            end_reason,
            final_tier,
            transcript,
            stats,
            narrative: None,
            duration_ms,
        }
    }

    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        let report: SessionReport =
            serde_json::from_str(&content).context("failed to parse report JSON")?;
        Ok(report)
    }
}

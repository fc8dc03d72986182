//! The assessment engine — public orchestrator for assessment sessions.
//!
//! Starts sessions, accepts answer submissions, applies the difficulty
//! progression, and hands finished transcripts to the result store.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use chrono::Utc;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::error::SessionError;
use crate::model::{AnswerEvent, Question};
use crate::report::{EndReason, SessionReport};
use crate::selector;
use crate::session::{apply_outcome, SessionState, MAX_QUESTIONS};
use crate::traits::{NarrativeSummarizer, QuestionRepository, ResultStore};

/// Outcome of a successful answer submission.
#[derive(Debug)]
pub enum SubmitOutcome {
    /// The session continues with this question.
    NextQuestion(Question),
    /// The session reached a terminal state; the report is final.
    Complete(SessionReport),
}

/// The assessment engine.
///
/// One engine serves any number of independent sessions. Session state is
/// passed in by `&mut`, so submissions for a single session are serialized
/// by ownership while distinct sessions proceed in parallel.
pub struct AssessmentEngine {
    repository: Arc<dyn QuestionRepository>,
    result_store: Arc<dyn ResultStore>,
    summarizer: Option<Arc<dyn NarrativeSummarizer>>,
    rng: Mutex<StdRng>,
}

impl AssessmentEngine {
    /// Create an engine with an entropy-seeded random source.
    pub fn new(repository: Arc<dyn QuestionRepository>, result_store: Arc<dyn ResultStore>) -> Self {
        Self {
            repository,
            result_store,
            summarizer: None,
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Create an engine with a specific seed for deterministic selection.
    pub fn with_seed(
        repository: Arc<dyn QuestionRepository>,
        result_store: Arc<dyn ResultStore>,
        seed: u64,
    ) -> Self {
        Self {
            repository,
            result_store,
            summarizer: None,
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    /// Attach a narrative summarizer, invoked after each report is persisted.
    #[must_use]
    pub fn summarizer(mut self, summarizer: Arc<dyn NarrativeSummarizer>) -> Self {
        self.summarizer = Some(summarizer);
        self
    }

    /// Start a fresh session and present its first question.
    ///
    /// Fails with [`SessionError::ExhaustedPool`] when the easiest tier has
    /// no questions at all, which is a bank configuration error.
    pub async fn start(&self) -> Result<(SessionState, Question), SessionError> {
        let mut session = SessionState::new();
        let pool = self.repository.get_by_tier(session.current_tier).await?;

        let question = self
            .draw(&pool, &session)
            .ok_or(SessionError::ExhaustedPool {
                tier: session.current_tier,
            })?;

        session.pending = Some(question.clone());
        tracing::info!(session = %session.id, "assessment session started");
        Ok((session, question))
    }

    /// Submit the answer for the currently pending question.
    ///
    /// Rejects submissions for any other question id (stale or replayed)
    /// without touching session state. On acceptance the transcript append,
    /// counter update, and tier transition are applied as one step, and the
    /// session either continues with a fresh question or completes: at the
    /// question cap, or early when the current tier has no unseen question
    /// left.
    pub async fn submit_answer(
        &self,
        session: &mut SessionState,
        question_id: &str,
        selected: usize,
        time_taken: Duration,
    ) -> Result<SubmitOutcome, SessionError> {
        if !session.is_active() {
            return Err(SessionError::SessionCompleted);
        }
        let event = {
            let Some(pending) = session.pending.as_ref() else {
                return Err(SessionError::SessionCompleted);
            };
            if pending.id != question_id {
                return Err(SessionError::StaleSubmission {
                    submitted: question_id.to_string(),
                    expected: pending.id.clone(),
                });
            }
            AnswerEvent {
                question_id: pending.id.clone(),
                tier: session.current_tier,
                selected,
                correct: pending.is_correct(selected),
                time_taken_ms: time_taken.as_millis() as u64,
                ordinal: session.next_ordinal(),
            }
        };

        // Fetch the follow-up pool before mutating anything, so a repository
        // failure leaves the session exactly as it was.
        let reaches_cap = session.transcript.len() + 1 >= MAX_QUESTIONS;
        let next_tier = apply_outcome(
            session.current_tier,
            session.consecutive_correct,
            session.consecutive_wrong,
            event.correct,
        )
        .tier;
        let pool = if reaches_cap {
            Vec::new()
        } else {
            self.repository.get_by_tier(next_tier).await?
        };

        let progression = session.record_answer(event);
        if let Some(change) = progression.tier_change {
            tracing::debug!(
                session = %session.id,
                tier = %progression.tier,
                ?change,
                "difficulty tier changed"
            );
        }

        if session.is_full() {
            let report = self.finish(session, EndReason::CapReached).await;
            return Ok(SubmitOutcome::Complete(report));
        }

        match self.draw(&pool, session) {
            Some(question) => {
                session.pending = Some(question.clone());
                Ok(SubmitOutcome::NextQuestion(question))
            }
            None => {
                tracing::info!(
                    session = %session.id,
                    tier = %session.current_tier,
                    answered = session.transcript.len(),
                    "no unseen question at current tier, ending session"
                );
                let report = self.finish(session, EndReason::PoolExhausted).await;
                Ok(SubmitOutcome::Complete(report))
            }
        }
    }

    /// End an active session immediately, keeping whatever transcript exists.
    pub async fn end_early(&self, session: &mut SessionState) -> Result<SessionReport, SessionError> {
        if !session.is_active() {
            return Err(SessionError::SessionCompleted);
        }
        tracing::info!(
            session = %session.id,
            answered = session.transcript.len(),
            "session ended early by caller"
        );
        Ok(self.finish(session, EndReason::EndedEarly).await)
    }

    /// Draw one unseen question from a pool snapshot.
    fn draw(&self, pool: &[Question], session: &SessionState) -> Option<Question> {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        selector::select(pool, &session.asked_ids, &mut *rng).cloned()
    }

    /// Complete the session, persist the report, and optionally summarize.
    ///
    /// A store or summarizer failure is logged and never rolls the session
    /// back; the terminal state is reached regardless.
    async fn finish(&self, session: &mut SessionState, end_reason: EndReason) -> SessionReport {
        session.complete();
        let duration_ms = (Utc::now() - session.started_at).num_milliseconds().max(0) as u64;
        let mut report = SessionReport::new(
            session.id,
            end_reason,
            session.current_tier,
            session.transcript.clone(),
            duration_ms,
        );

        if let Err(e) = self.result_store.save(&report).await {
            tracing::warn!(session = %session.id, error = %e, "failed to persist session report");
        }

        if let Some(summarizer) = &self.summarizer {
            match summarizer.summarize(&report).await {
                Ok(text) => report.narrative = Some(text),
                Err(e) => {
                    tracing::warn!(session = %session.id, error = %e, "summarizer failed");
                }
            }
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ladder::DifficultyTier;
    use crate::session::SessionStatus;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicU32, Ordering};

    /// Fixed in-memory pool for engine tests.
    struct StaticRepository {
        questions: Vec<Question>,
    }

    #[async_trait]
    impl QuestionRepository for StaticRepository {
        async fn get_by_tier(&self, tier: DifficultyTier) -> anyhow::Result<Vec<Question>> {
            Ok(self
                .questions
                .iter()
                .filter(|q| q.tier == tier)
                .cloned()
                .collect())
        }
    }

    struct NullStore;

    #[async_trait]
    impl ResultStore for NullStore {
        async fn save(&self, _report: &SessionReport) -> anyhow::Result<()> {
            Ok(())
        }
    }

    struct FailingStore {
        attempts: AtomicU32,
    }

    #[async_trait]
    impl ResultStore for FailingStore {
        async fn save(&self, _report: &SessionReport) -> anyhow::Result<()> {
            self.attempts.fetch_add(1, Ordering::Relaxed);
            anyhow::bail!("store unavailable")
        }
    }

    fn make_question(id: &str, tier: DifficultyTier) -> Question {
        Question {
            id: id.into(),
            prompt: format!("prompt {id}"),
            options: vec!["a".into(), "b".into(), "c".into()],
            correct_index: 1,
            explanation: String::new(),
            tags: vec![],
            tier,
        }
    }

    /// Enough questions at every tier to run to the cap on any trajectory.
    fn big_bank() -> Vec<Question> {
        let mut questions = Vec::new();
        for tier in DifficultyTier::ALL {
            for i in 0..40 {
                questions.push(make_question(&format!("{tier}-{i}"), tier));
            }
        }
        questions
    }

    fn engine_with(questions: Vec<Question>) -> AssessmentEngine {
        AssessmentEngine::with_seed(
            Arc::new(StaticRepository { questions }),
            Arc::new(NullStore),
            11,
        )
    }

    async fn answer(
        engine: &AssessmentEngine,
        session: &mut SessionState,
        question: &Question,
        correct: bool,
    ) -> SubmitOutcome {
        let selected = if correct {
            question.correct_index
        } else {
            (question.correct_index + 1) % question.options.len()
        };
        engine
            .submit_answer(session, &question.id, selected, Duration::from_secs(2))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn start_presents_easiest_tier_first() {
        let engine = engine_with(big_bank());
        let (session, question) = engine.start().await.unwrap();

        assert_eq!(session.current_tier, DifficultyTier::VeryEasy);
        assert_eq!(question.tier, DifficultyTier::VeryEasy);
        assert!(session.transcript.is_empty());
        assert_eq!(session.pending.as_ref().unwrap().id, question.id);
    }

    #[tokio::test]
    async fn start_fails_on_empty_bank() {
        let engine = engine_with(vec![]);
        let err = engine.start().await.unwrap_err();
        assert!(matches!(
            err,
            SessionError::ExhaustedPool {
                tier: DifficultyTier::VeryEasy
            }
        ));
    }

    #[tokio::test]
    async fn two_corrects_move_next_question_up_a_tier() {
        let engine = engine_with(big_bank());
        let (mut session, q1) = engine.start().await.unwrap();

        let outcome = answer(&engine, &mut session, &q1, true).await;
        let SubmitOutcome::NextQuestion(q2) = outcome else {
            panic!("expected a next question");
        };
        assert_eq!(q2.tier, DifficultyTier::VeryEasy);

        let outcome = answer(&engine, &mut session, &q2, true).await;
        let SubmitOutcome::NextQuestion(q3) = outcome else {
            panic!("expected a next question");
        };
        assert_eq!(session.current_tier, DifficultyTier::Easy);
        assert_eq!(q3.tier, DifficultyTier::Easy);
    }

    #[tokio::test]
    async fn stale_submission_rejected_without_state_change() {
        let engine = engine_with(big_bank());
        let (mut session, question) = engine.start().await.unwrap();

        let err = engine
            .submit_answer(&mut session, "not-the-pending-one", 0, Duration::from_secs(1))
            .await
            .unwrap_err();

        match err {
            SessionError::StaleSubmission { submitted, expected } => {
                assert_eq!(submitted, "not-the-pending-one");
                assert_eq!(expected, question.id);
            }
            other => panic!("expected StaleSubmission, got {other:?}"),
        }
        assert!(session.transcript.is_empty());
        assert!(session.asked_ids.is_empty());
        assert_eq!(session.pending.as_ref().unwrap().id, question.id);

        // The genuine submission still goes through afterwards.
        let outcome = answer(&engine, &mut session, &question, true).await;
        assert!(matches!(outcome, SubmitOutcome::NextQuestion(_)));
        assert_eq!(session.transcript.len(), 1);
    }

    #[tokio::test]
    async fn runs_to_the_cap_with_unique_questions() {
        let engine = engine_with(big_bank());
        let (mut session, mut question) = engine.start().await.unwrap();

        let mut completions = 0;
        for i in 0..MAX_QUESTIONS {
            match answer(&engine, &mut session, &question, true).await {
                SubmitOutcome::NextQuestion(q) => {
                    assert!(i + 1 < MAX_QUESTIONS, "continued past the cap");
                    question = q;
                }
                SubmitOutcome::Complete(report) => {
                    completions += 1;
                    assert_eq!(i + 1, MAX_QUESTIONS, "completed before the cap");
                    assert_eq!(report.end_reason, EndReason::CapReached);
                    assert_eq!(report.transcript.len(), MAX_QUESTIONS);
                }
            }
        }
        assert_eq!(completions, 1);
        assert_eq!(session.status, SessionStatus::Completed);

        // Every question id in the transcript is unique.
        let ids: std::collections::HashSet<_> =
            session.transcript.iter().map(|e| e.question_id.clone()).collect();
        assert_eq!(ids.len(), MAX_QUESTIONS);
    }

    #[tokio::test]
    async fn all_correct_climbs_to_difficult_and_stays() {
        let engine = engine_with(big_bank());
        let (mut session, mut question) = engine.start().await.unwrap();

        loop {
            match answer(&engine, &mut session, &question, true).await {
                SubmitOutcome::NextQuestion(q) => question = q,
                SubmitOutcome::Complete(report) => {
                    assert_eq!(report.final_tier, DifficultyTier::Difficult);
                    break;
                }
            }
        }
        // very_easy x2, easy x2, moderate x2, the rest at difficult.
        let tiers: Vec<_> = session.transcript.iter().map(|e| e.tier).collect();
        assert_eq!(tiers[0], DifficultyTier::VeryEasy);
        assert_eq!(tiers[2], DifficultyTier::Easy);
        assert_eq!(tiers[4], DifficultyTier::Moderate);
        assert!(tiers[6..].iter().all(|t| *t == DifficultyTier::Difficult));
    }

    #[tokio::test]
    async fn pool_exhaustion_mid_session_completes_gracefully() {
        // Only three questions exist in total, all at the starting tier.
        let bank = vec![
            make_question("q1", DifficultyTier::VeryEasy),
            make_question("q2", DifficultyTier::VeryEasy),
            make_question("q3", DifficultyTier::VeryEasy),
        ];
        let engine = engine_with(bank);
        let (mut session, mut question) = engine.start().await.unwrap();

        // Wrong answers keep the session clamped at very_easy.
        let mut answered = 0;
        let report = loop {
            match answer(&engine, &mut session, &question, false).await {
                SubmitOutcome::NextQuestion(q) => {
                    answered += 1;
                    question = q;
                }
                SubmitOutcome::Complete(report) => {
                    answered += 1;
                    break report;
                }
            }
        };

        assert_eq!(answered, 3);
        assert_eq!(report.end_reason, EndReason::PoolExhausted);
        assert_eq!(report.transcript.len(), 3);
        assert_eq!(session.status, SessionStatus::Completed);
    }

    #[tokio::test]
    async fn completed_session_rejects_all_operations() {
        let engine = engine_with(big_bank());
        let (mut session, question) = engine.start().await.unwrap();

        engine.end_early(&mut session).await.unwrap();

        let err = engine
            .submit_answer(&mut session, &question.id, 0, Duration::from_secs(1))
            .await
            .unwrap_err();
        assert!(matches!(err, SessionError::SessionCompleted));

        let err = engine.end_early(&mut session).await.unwrap_err();
        assert!(matches!(err, SessionError::SessionCompleted));
    }

    #[tokio::test]
    async fn end_early_with_empty_transcript() {
        let engine = engine_with(big_bank());
        let (mut session, _question) = engine.start().await.unwrap();

        let report = engine.end_early(&mut session).await.unwrap();
        assert_eq!(report.end_reason, EndReason::EndedEarly);
        assert!(report.transcript.is_empty());
        assert_eq!(report.stats.total_answered, 0);
    }

    #[tokio::test]
    async fn store_failure_does_not_roll_back_completion() {
        let store = Arc::new(FailingStore {
            attempts: AtomicU32::new(0),
        });
        let engine = AssessmentEngine::with_seed(
            Arc::new(StaticRepository {
                questions: big_bank(),
            }),
            store.clone(),
            3,
        );

        let (mut session, _question) = engine.start().await.unwrap();
        let report = engine.end_early(&mut session).await.unwrap();

        assert_eq!(store.attempts.load(Ordering::Relaxed), 1);
        assert_eq!(session.status, SessionStatus::Completed);
        assert_eq!(report.end_reason, EndReason::EndedEarly);
    }

    #[tokio::test]
    async fn seeded_engines_present_identical_sessions() {
        let a = engine_with(big_bank());
        let b = engine_with(big_bank());

        let (mut sa, mut qa) = a.start().await.unwrap();
        let (mut sb, mut qb) = b.start().await.unwrap();

        for _ in 0..10 {
            assert_eq!(qa.id, qb.id);
            let SubmitOutcome::NextQuestion(na) = answer(&a, &mut sa, &qa, true).await else {
                break;
            };
            let SubmitOutcome::NextQuestion(nb) = answer(&b, &mut sb, &qb, true).await else {
                break;
            };
            qa = na;
            qb = nb;
        }
    }
}

//! In-memory question repository.

use std::collections::HashMap;

use async_trait::async_trait;

use adaptest_core::ladder::DifficultyTier;
use adaptest_core::model::{Question, QuestionBank};
use adaptest_core::traits::QuestionRepository;

/// A question repository backed by an in-memory index.
///
/// The bank is indexed by tier once at construction and never mutated
/// afterwards, so concurrent session reads need no locking.
pub struct InMemoryRepository {
    by_tier: HashMap<DifficultyTier, Vec<Question>>,
}

impl InMemoryRepository {
    /// Build a repository from a parsed question bank.
    pub fn new(bank: QuestionBank) -> Self {
        Self::from_questions(bank.questions)
    }

    /// Build a repository from a flat list of questions.
    pub fn from_questions(questions: Vec<Question>) -> Self {
        let mut by_tier: HashMap<DifficultyTier, Vec<Question>> = HashMap::new();
        for question in questions {
            by_tier.entry(question.tier).or_default().push(question);
        }
        Self { by_tier }
    }

    /// Total number of questions across all tiers.
    pub fn len(&self) -> usize {
        self.by_tier.values().map(Vec::len).sum()
    }

    /// Whether the repository holds no questions at all.
    pub fn is_empty(&self) -> bool {
        self.by_tier.is_empty()
    }
}

#[async_trait]
impl QuestionRepository for InMemoryRepository {
    async fn get_by_tier(&self, tier: DifficultyTier) -> anyhow::Result<Vec<Question>> {
        Ok(self.by_tier.get(&tier).cloned().unwrap_or_default())
    }
}

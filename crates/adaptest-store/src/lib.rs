//! adaptest-store — collaborator implementations for the assessment engine.
//!
//! Implements the `QuestionRepository`, `ResultStore`, and
//! `NarrativeSummarizer` traits: an in-memory question repository, a
//! JSON-file result store, a deterministic template summarizer, and mock
//! collaborators for tests.

pub mod config;
pub mod json;
pub mod memory;
pub mod mock;
pub mod summary;

pub use config::{load_config, load_config_from, AdaptestConfig};
pub use json::JsonResultStore;
pub use memory::InMemoryRepository;
pub use summary::TemplateSummarizer;

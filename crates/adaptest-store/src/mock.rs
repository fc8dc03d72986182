//! Mock collaborators for testing.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use adaptest_core::report::SessionReport;
use adaptest_core::traits::{NarrativeSummarizer, ResultStore};

/// A result store that records every save in memory.
///
/// Can be configured to fail, for exercising the engine's
/// persistence-failure path.
#[derive(Default)]
pub struct MockResultStore {
    /// Reports received, in save order.
    saved: Mutex<Vec<SessionReport>>,
    /// Number of save attempts, including failed ones.
    save_count: AtomicU32,
    /// When true, every save fails.
    fail: bool,
}

impl MockResultStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store whose saves always fail.
    pub fn failing() -> Self {
        Self {
            saved: Mutex::new(Vec::new()),
            save_count: AtomicU32::new(0),
            fail: true,
        }
    }

    /// Number of save attempts made.
    pub fn save_count(&self) -> u32 {
        self.save_count.load(Ordering::Relaxed)
    }

    /// Reports successfully saved so far.
    pub fn saved(&self) -> Vec<SessionReport> {
        self.saved.lock().unwrap().clone()
    }
}

#[async_trait]
impl ResultStore for MockResultStore {
    async fn save(&self, report: &SessionReport) -> anyhow::Result<()> {
        self.save_count.fetch_add(1, Ordering::Relaxed);
        if self.fail {
            anyhow::bail!("mock store configured to fail");
        }
        self.saved.lock().unwrap().push(report.clone());
        Ok(())
    }
}

/// A summarizer returning a fixed string, or failing on demand.
pub struct MockSummarizer {
    response: String,
    fail: bool,
    call_count: AtomicU32,
}

impl MockSummarizer {
    pub fn new(response: &str) -> Self {
        Self {
            response: response.to_string(),
            fail: false,
            call_count: AtomicU32::new(0),
        }
    }

    /// Create a summarizer whose calls always fail.
    pub fn failing() -> Self {
        Self {
            response: String::new(),
            fail: true,
            call_count: AtomicU32::new(0),
        }
    }

    /// Number of summarize calls made.
    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl NarrativeSummarizer for MockSummarizer {
    async fn summarize(&self, _report: &SessionReport) -> anyhow::Result<String> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        if self.fail {
            anyhow::bail!("mock summarizer configured to fail");
        }
        Ok(self.response.clone())
    }
}

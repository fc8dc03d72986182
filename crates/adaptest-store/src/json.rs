//! JSON-file result store.

use std::path::PathBuf;

use async_trait::async_trait;

use adaptest_core::report::SessionReport;
use adaptest_core::traits::ResultStore;

/// Persists each finished session as `report-<id>.json` under a directory.
pub struct JsonResultStore {
    output_dir: PathBuf,
}

impl JsonResultStore {
    /// Create a store writing into `output_dir`; created on first save.
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// The path a given report would be written to.
    pub fn path_for(&self, report: &SessionReport) -> PathBuf {
        self.output_dir.join(format!("report-{}.json", report.id))
    }
}

#[async_trait]
impl ResultStore for JsonResultStore {
    async fn save(&self, report: &SessionReport) -> anyhow::Result<()> {
        let path = self.path_for(report);
        report.save_json(&path)?;
        tracing::debug!(path = %path.display(), "session report persisted");
        Ok(())
    }
}

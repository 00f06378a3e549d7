use std::sync::Arc;

use chrono::{DateTime, Utc};
use crowdmap_core::CrowdLevel;
use serde::Serialize;
use tokio::sync::Mutex;

/// A business-owner record captured from the map form.
#[derive(Debug, Clone, Serialize)]
pub struct Submission {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub business_type: String,
    pub crowd_intensity: CrowdLevel,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub created_at: DateTime<Utc>,
}

/// In-memory submission log with explicit shared ownership; handlers reach
/// it through `AppState` rather than ambient module state.
#[derive(Debug, Clone, Default)]
pub struct SubmissionStore {
    inner: Arc<Mutex<Vec<Submission>>>,
}

impl SubmissionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn append(&self, submission: Submission) {
        self.inner.lock().await.push(submission);
    }

    pub async fn len(&self) -> usize {
        self.inner.lock().await.len()
    }

    /// Snapshot of all submissions, oldest first.
    pub async fn snapshot(&self) -> Vec<Submission> {
        self.inner.lock().await.clone()
    }
}

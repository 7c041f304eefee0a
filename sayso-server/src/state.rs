//! Shared application state for the sayso server

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use sayso_core::{AssessmentService, DEFAULT_ASSESS_TIMEOUT, RecordStore, SpeechAssessor};

use crate::staging::Staging;

/// Shared state accessible by all handlers
#[derive(Clone)]
pub struct AppState {
    /// Ingestion, retrieval, and aggregation operations
    pub service: AssessmentService,
    /// Speech collaborator used by the assess endpoint
    pub assessor: Arc<dyn SpeechAssessor>,
    /// Spool area for uploaded audio
    pub staging: Staging,
    /// Bound applied to each recognition call
    pub assess_timeout: Duration,
    /// When the server started
    pub started_at: DateTime<Utc>,
}

impl AppState {
    /// Create state over explicit collaborators.
    pub fn new(
        store: Arc<dyn RecordStore>,
        assessor: Arc<dyn SpeechAssessor>,
        staging: Staging,
    ) -> Self {
        Self {
            service: AssessmentService::new(store),
            assessor,
            staging,
            assess_timeout: DEFAULT_ASSESS_TIMEOUT,
            started_at: Utc::now(),
        }
    }

    /// Override the recognition-call bound.
    #[must_use]
    pub fn with_assess_timeout(mut self, timeout: Duration) -> Self {
        self.assess_timeout = timeout;
        self
    }

    /// Returns how long the server has been running
    pub fn uptime_seconds(&self) -> i64 {
        (Utc::now() - self.started_at).num_seconds()
    }
}

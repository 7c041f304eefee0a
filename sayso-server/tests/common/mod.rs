//! Shared helpers for server integration tests

use std::collections::VecDeque;
use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum_test::TestServer;
use sayso_core::{AssessError, MemoryRecordStore, SpeechAssessor};
use tempfile::TempDir;

use sayso_server::{AppState, Staging, create_router};

/// Assessor that replays a scripted sequence of outcomes, one per call.
pub struct QueueAssessor {
    outcomes: Mutex<VecDeque<Result<String, AssessError>>>,
}

impl QueueAssessor {
    pub fn new(outcomes: Vec<Result<String, AssessError>>) -> Self {
        Self {
            outcomes: Mutex::new(outcomes.into()),
        }
    }
}

#[async_trait]
impl SpeechAssessor for QueueAssessor {
    async fn assess(&self, _: &Path, _: &str) -> Result<String, AssessError> {
        self.outcomes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(AssessError::Service("no scripted outcome left".to_string())))
    }
}

/// Assessor that never completes; exercises the timeout bound.
pub struct StalledAssessor;

#[async_trait]
impl SpeechAssessor for StalledAssessor {
    async fn assess(&self, _: &Path, _: &str) -> Result<String, AssessError> {
        tokio::time::sleep(std::time::Duration::from_secs(3600)).await;
        Ok(String::new())
    }
}

/// A usable service payload with the given pronunciation score.
pub fn assessment_payload(pron: f64) -> String {
    format!(
        r#"{{
            "RecognitionStatus": "Success",
            "Offset": 700000,
            "NBest": [{{
                "PronunciationAssessment": {{
                    "PronScore": {pron},
                    "FluencyScore": 90.0,
                    "AccuracyScore": 85.0,
                    "CompletenessScore": 100.0
                }}
            }}]
        }}"#
    )
}

/// A payload whose hypothesis list is empty: stored fine, unusable on read.
pub fn empty_nbest_payload() -> String {
    r#"{"RecognitionStatus": "Success", "NBest": []}"#.to_string()
}

/// Spin up a test server around the given assessor.
pub fn spawn_server(
    tmp: &TempDir,
    assessor: impl SpeechAssessor + 'static,
) -> (TestServer, Arc<AppState>) {
    spawn_server_with_timeout(tmp, assessor, sayso_core::DEFAULT_ASSESS_TIMEOUT)
}

/// Spin up a test server with an explicit recognition-call bound.
pub fn spawn_server_with_timeout(
    tmp: &TempDir,
    assessor: impl SpeechAssessor + 'static,
    timeout: std::time::Duration,
) -> (TestServer, Arc<AppState>) {
    let state = Arc::new(
        AppState::new(
            Arc::new(MemoryRecordStore::new()),
            Arc::new(assessor),
            Staging::new(tmp.path().join("spool")).unwrap(),
        )
        .with_assess_timeout(timeout),
    );
    let server = TestServer::new(create_router(Arc::clone(&state))).unwrap();
    (server, state)
}

pub const BOUNDARY: &str = "Boundary-sayso-test";

/// Hand-rolled multipart body, shaped the way the mobile client builds it.
pub fn multipart_body(uid: &str, reference_text: &str, file_bytes: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
    body.extend_from_slice(b"Content-Disposition: form-data; name=\"uid\"\r\n\r\n");
    body.extend_from_slice(uid.as_bytes());
    body.extend_from_slice(b"\r\n");
    body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
    body.extend_from_slice(b"Content-Disposition: form-data; name=\"referenceText\"\r\n\r\n");
    body.extend_from_slice(reference_text.as_bytes());
    body.extend_from_slice(b"\r\n");
    body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
    body.extend_from_slice(
        b"Content-Disposition: form-data; name=\"file\"; filename=\"clip.wav\"\r\n\
          Content-Type: audio/wav\r\n\r\n",
    );
    body.extend_from_slice(file_bytes);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
    body
}

pub fn multipart_content_type() -> String {
    format!("multipart/form-data; boundary={BOUNDARY}")
}

//! Boundary to the external speech-assessment service
//!
//! The recognition call is long-running and owned by a collaborator, not by
//! this crate: callers hand staged audio to a [`SpeechAssessor`] and get
//! back either the raw result payload or a failure, always under an
//! explicit bound via [`assess_with_timeout`].

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

/// Default bound on one recognition call.
pub const DEFAULT_ASSESS_TIMEOUT: Duration = Duration::from_secs(30);

/// Error type for speech-collaborator calls
#[derive(Debug, Error)]
pub enum AssessError {
    /// The call did not complete within the allowed time
    #[error("speech service did not respond within {0:?}")]
    Timeout(Duration),

    /// Speech in the audio could not be recognized
    #[error("speech could not be recognized")]
    NoMatch,

    /// The service rejected or failed the request
    #[error("speech service error: {0}")]
    Service(String),

    /// Reading the staged audio failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A collaborator that turns audio plus a reference text into a raw
/// assessment payload.
#[async_trait]
pub trait SpeechAssessor: Send + Sync {
    /// Run one assessment and return the service's JSON payload verbatim.
    async fn assess(&self, audio: &Path, reference_text: &str) -> Result<String, AssessError>;
}

/// Run `assessor.assess` with an explicit upper bound on wall time.
///
/// This is the single place the long-running collaborator call is bounded;
/// nothing else in the crate blocks on anything beyond store I/O.
pub async fn assess_with_timeout(
    assessor: &dyn SpeechAssessor,
    audio: &Path,
    reference_text: &str,
    timeout: Duration,
) -> Result<String, AssessError> {
    tokio::time::timeout(timeout, assessor.assess(audio, reference_text))
        .await
        .map_err(|_| AssessError::Timeout(timeout))?
}

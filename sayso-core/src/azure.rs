//! Azure Speech pronunciation-assessment client
//!
//! Implements [`SpeechAssessor`] against the Azure Speech REST endpoint.
//! Assessment parameters ride in the `Pronunciation-Assessment` header as
//! base64-encoded JSON; the response body is returned verbatim so the
//! parser owns all interpretation.

use std::env;
use std::path::Path;

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde_json::json;
use tracing::debug;

use crate::speech::{AssessError, SpeechAssessor};

/// Pronunciation-assessment client for the Azure Speech REST endpoint.
pub struct AzureSpeechClient {
    region: String,
    key: String,
    language: String,
    http: reqwest::Client,
}

impl AzureSpeechClient {
    /// Create a client for the given region and subscription key.
    pub fn new(region: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            region: region.into(),
            key: key.into(),
            language: "en-US".to_string(),
            http: reqwest::Client::new(),
        }
    }

    /// Build a client from `AZURE_SPEECH_REGION` / `AZURE_SPEECH_KEY`.
    pub fn from_env() -> Result<Self, AssessError> {
        let region = env::var("AZURE_SPEECH_REGION")
            .map_err(|_| AssessError::Service("AZURE_SPEECH_REGION is not set".to_string()))?;
        let key = env::var("AZURE_SPEECH_KEY")
            .map_err(|_| AssessError::Service("AZURE_SPEECH_KEY is not set".to_string()))?;
        Ok(Self::new(region, key))
    }

    /// Override the recognition language (default `en-US`).
    #[must_use]
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    fn endpoint(&self) -> String {
        format!(
            "https://{}.stt.speech.microsoft.com/speech/recognition/conversation/cognitiveservices/v1?language={}&format=detailed",
            self.region, self.language
        )
    }

    /// Assessment parameters header: hundred-mark grading, phoneme
    /// granularity, miscue detection on.
    fn assessment_header(reference_text: &str) -> String {
        let params = json!({
            "ReferenceText": reference_text,
            "GradingSystem": "HundredMark",
            "Granularity": "Phoneme",
            "EnableMiscue": true,
        });
        STANDARD.encode(params.to_string())
    }
}

#[async_trait]
impl SpeechAssessor for AzureSpeechClient {
    async fn assess(&self, audio: &Path, reference_text: &str) -> Result<String, AssessError> {
        let body = tokio::fs::read(audio).await?;
        debug!(audio = %audio.display(), bytes = body.len(), "submitting audio for assessment");

        let response = self
            .http
            .post(self.endpoint())
            .header("Ocp-Apim-Subscription-Key", &self.key)
            .header(
                "Pronunciation-Assessment",
                Self::assessment_header(reference_text),
            )
            .header(
                "Content-Type",
                "audio/wav; codecs=audio/pcm; samplerate=16000",
            )
            .header("Accept", "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| AssessError::Service(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| AssessError::Service(e.to_string()))?;

        if !status.is_success() {
            return Err(AssessError::Service(format!(
                "speech endpoint returned {status}: {text}"
            )));
        }

        // A 200 can still carry a failed recognition.
        if let Ok(doc) = serde_json::from_str::<serde_json::Value>(&text) {
            let recognition = doc.get("RecognitionStatus").and_then(|s| s.as_str());
            if recognition == Some("NoMatch") || recognition == Some("InitialSilenceTimeout") {
                return Err(AssessError::NoMatch);
            }
        }

        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_includes_region_and_language() {
        let client = AzureSpeechClient::new("westus2", "key").with_language("en-GB");
        let endpoint = client.endpoint();

        assert!(endpoint.starts_with("https://westus2.stt.speech.microsoft.com/"));
        assert!(endpoint.contains("language=en-GB"));
        assert!(endpoint.contains("format=detailed"));
    }

    #[test]
    fn assessment_header_decodes_to_expected_config() {
        let header = AzureSpeechClient::assessment_header("the quick brown fox");
        let decoded = STANDARD.decode(header).unwrap();
        let config: serde_json::Value = serde_json::from_slice(&decoded).unwrap();

        assert_eq!(config["ReferenceText"], "the quick brown fox");
        assert_eq!(config["GradingSystem"], "HundredMark");
        assert_eq!(config["Granularity"], "Phoneme");
        assert_eq!(config["EnableMiscue"], true);
    }

    #[tokio::test]
    async fn missing_audio_file_is_an_io_error() {
        let client = AzureSpeechClient::new("westus2", "key");

        let result = client
            .assess(Path::new("/nonexistent/audio.wav"), "hello")
            .await;
        assert!(matches!(result, Err(AssessError::Io(_))));
    }
}

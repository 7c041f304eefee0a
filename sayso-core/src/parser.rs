//! Defensive parser for speech-service assessment payloads
//!
//! Payloads arrive from an upstream service whose schema is not fully under
//! our control: the hypothesis list may be missing or empty, and the first
//! hypothesis shows up either as a nested object or as a JSON string that
//! itself needs decoding. This module normalizes that variance so the
//! aggregation fold only ever sees one shape.

use serde_json::Value;
use thiserror::Error;

use crate::types::ParsedAssessment;

/// Why a payload could not be turned into a usable assessment
#[derive(Debug, Error)]
pub enum ParseError {
    /// Payload is not valid JSON at all
    #[error("payload is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The hypothesis list ("NBest") is missing or empty
    #[error("payload has no recognition hypotheses")]
    NoHypotheses,

    /// First hypothesis is neither an object nor embedded JSON text
    #[error("first hypothesis has an unrecognized shape")]
    HypothesisShape,

    /// Hypothesis carries no pronunciation sub-scores
    #[error("hypothesis has no pronunciation scores")]
    NoScores,

    /// A required numeric score is absent or non-numeric
    #[error("missing numeric field: {0}")]
    MissingScore(&'static str),
}

/// Parse a raw payload into a [`ParsedAssessment`].
///
/// Never panics and never defaults a missing score to zero — a record with
/// an absent score is unusable, not a zero-scoring one.
pub fn parse(raw: &str) -> Result<ParsedAssessment, ParseError> {
    let doc: Value = serde_json::from_str(raw)?;

    let hypotheses = doc
        .get("NBest")
        .and_then(Value::as_array)
        .filter(|list| !list.is_empty())
        .ok_or(ParseError::NoHypotheses)?;

    // Only the first (best) hypothesis is used.
    let first = normalize_hypothesis(&hypotheses[0])?;

    let scores = first
        .get("PronunciationAssessment")
        .and_then(Value::as_object)
        .ok_or(ParseError::NoScores)?;

    Ok(ParsedAssessment {
        reference_text: doc
            .get("ReferenceText")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        pron_score: score(scores, "PronScore")?,
        fluency_score: score(scores, "FluencyScore")?,
        accuracy_score: score(scores, "AccuracyScore")?,
        completeness_score: score(scores, "CompletenessScore")?,
        position_marker: doc.get("Offset").cloned().unwrap_or(Value::Null),
    })
}

/// Accept a hypothesis in either of its two known encodings.
///
/// The service sometimes double-encodes the first hypothesis as a JSON
/// string instead of a nested object. That looks like an upstream bug, but
/// stored payloads keep whichever shape they arrived with, so both are
/// decoded here.
fn normalize_hypothesis(value: &Value) -> Result<Value, ParseError> {
    match value {
        Value::Object(_) => Ok(value.clone()),
        Value::String(embedded) => match serde_json::from_str::<Value>(embedded) {
            Ok(decoded @ Value::Object(_)) => Ok(decoded),
            _ => Err(ParseError::HypothesisShape),
        },
        _ => Err(ParseError::HypothesisShape),
    }
}

fn score(
    scores: &serde_json::Map<String, Value>,
    field: &'static str,
) -> Result<f64, ParseError> {
    scores
        .get(field)
        .and_then(Value::as_f64)
        .ok_or(ParseError::MissingScore(field))
}

//! Assessment data model
//!
//! Records store the upstream payload verbatim (schema-on-read); the parsed
//! and aggregated shapes below are what the read views serve. Wire field
//! names are camelCase to match the existing dashboard clients.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Identifier assigned by the record store. Opaque, unique, never reused.
pub type RecordId = String;

/// A persisted assessment: the raw service payload plus ownership metadata.
///
/// `raw_payload` is stored exactly as it arrived and is only interpreted at
/// read time, never validated at write time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentRecord {
    /// Store-generated identifier
    pub id: RecordId,
    /// Owner of the assessment
    pub user_id: String,
    /// Verbatim service payload
    pub raw_payload: String,
    /// When the record was ingested
    pub ingested_at: DateTime<Utc>,
}

/// The usable core of one assessment payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedAssessment {
    /// Text the speaker was asked to read
    pub reference_text: String,
    /// Overall pronunciation score
    pub pron_score: f64,
    /// Fluency score
    pub fluency_score: f64,
    /// Accuracy score
    pub accuracy_score: f64,
    /// Completeness score
    pub completeness_score: f64,
    /// Upstream "Offset" field, carried through opaquely. Not a verified timestamp.
    pub position_marker: Value,
}

/// One usable record as it appears in the dashboard history list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentSummary {
    pub reference_text: String,
    pub pronunciation_score: f64,
    pub fluency_score: f64,
    pub accuracy_score: f64,
    pub completeness_score: f64,
    /// Position marker of the source payload; stands in for a date
    pub date: Value,
}

impl From<ParsedAssessment> for AssessmentSummary {
    fn from(parsed: ParsedAssessment) -> Self {
        Self {
            reference_text: parsed.reference_text,
            pronunciation_score: parsed.pron_score,
            fluency_score: parsed.fluency_score,
            accuracy_score: parsed.accuracy_score,
            completeness_score: parsed.completeness_score,
            date: parsed.position_marker,
        }
    }
}

/// Averaged scores across all of a user's usable assessments.
///
/// Only produced when at least one record parsed; the no-data case is `None`
/// at the service layer rather than a zero-filled summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateSummary {
    pub user_id: String,
    /// Count of usable records only
    pub total_assessments: usize,
    pub average_pronunciation_score: f64,
    pub average_fluency_score: f64,
    pub average_accuracy_score: f64,
    pub average_completeness_score: f64,
    /// Usable records in the order the store returned them
    pub assessments: Vec<AssessmentSummary>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_parsed() -> ParsedAssessment {
        ParsedAssessment {
            reference_text: "the quick brown fox".to_string(),
            pron_score: 87.5,
            fluency_score: 90.0,
            accuracy_score: 85.0,
            completeness_score: 100.0,
            position_marker: json!(700000),
        }
    }

    #[test]
    fn parsed_assessment_uses_camel_case_on_the_wire() {
        let value = serde_json::to_value(sample_parsed()).unwrap();

        assert_eq!(value["referenceText"], json!("the quick brown fox"));
        assert_eq!(value["pronScore"], json!(87.5));
        assert_eq!(value["fluencyScore"], json!(90.0));
        assert_eq!(value["accuracyScore"], json!(85.0));
        assert_eq!(value["completenessScore"], json!(100.0));
        assert_eq!(value["positionMarker"], json!(700000));
    }

    #[test]
    fn summary_from_parsed_preserves_scores_and_marker() {
        let summary = AssessmentSummary::from(sample_parsed());

        assert_eq!(summary.pronunciation_score, 87.5);
        assert_eq!(summary.fluency_score, 90.0);
        assert_eq!(summary.date, json!(700000));
    }

    #[test]
    fn aggregate_summary_matches_dashboard_field_names() {
        let summary = AggregateSummary {
            user_id: "u1".to_string(),
            total_assessments: 1,
            average_pronunciation_score: 87.5,
            average_fluency_score: 90.0,
            average_accuracy_score: 85.0,
            average_completeness_score: 100.0,
            assessments: vec![AssessmentSummary::from(sample_parsed())],
        };

        let value = serde_json::to_value(&summary).unwrap();
        assert_eq!(value["userId"], json!("u1"));
        assert_eq!(value["totalAssessments"], json!(1));
        assert_eq!(value["averagePronunciationScore"], json!(87.5));
        assert_eq!(value["assessments"][0]["pronunciationScore"], json!(87.5));
        assert_eq!(value["assessments"][0]["date"], json!(700000));
    }

    #[test]
    fn record_serialization_roundtrip() {
        let record = AssessmentRecord {
            id: "rec-1".to_string(),
            user_id: "u1".to_string(),
            raw_payload: r#"{"NBest": []}"#.to_string(),
            ingested_at: Utc::now(),
        };

        let encoded = serde_json::to_string(&record).unwrap();
        let decoded: AssessmentRecord = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, record);
    }
}

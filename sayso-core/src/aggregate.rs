//! Running-total fold over usable assessments
//!
//! Aggregation is a pure fold: records that failed to parse never reach it,
//! so averages are always taken over exactly the usable set.

use crate::types::{AggregateSummary, AssessmentSummary, ParsedAssessment};

/// Accumulates score sums over the usable records of one user.
#[derive(Debug, Default)]
pub struct ScoreTotals {
    pron: f64,
    fluency: f64,
    accuracy: f64,
    completeness: f64,
    summaries: Vec<AssessmentSummary>,
}

impl ScoreTotals {
    /// Create an empty accumulator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one usable assessment into the running totals.
    pub fn add(&mut self, parsed: ParsedAssessment) {
        self.pron += parsed.pron_score;
        self.fluency += parsed.fluency_score;
        self.accuracy += parsed.accuracy_score;
        self.completeness += parsed.completeness_score;
        self.summaries.push(parsed.into());
    }

    /// Number of usable records folded so far.
    #[must_use]
    pub fn count(&self) -> usize {
        self.summaries.len()
    }

    /// Produce the summary, or `None` when nothing usable was folded.
    ///
    /// A zero-filled summary would be indistinguishable from a user who
    /// really scored zero, so the empty case stays a distinct outcome.
    #[must_use]
    pub fn finish(self, user_id: &str) -> Option<AggregateSummary> {
        let count = self.summaries.len();
        if count == 0 {
            return None;
        }

        let n = count as f64;
        Some(AggregateSummary {
            user_id: user_id.to_string(),
            total_assessments: count,
            average_pronunciation_score: self.pron / n,
            average_fluency_score: self.fluency / n,
            average_accuracy_score: self.accuracy / n,
            average_completeness_score: self.completeness / n,
            assessments: self.summaries,
        })
    }
}

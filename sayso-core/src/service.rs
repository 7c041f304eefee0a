//! Assessment operations over an injected record store

use std::sync::Arc;

use tracing::debug;

use crate::aggregate::ScoreTotals;
use crate::error::{Result, SaysoError};
use crate::parser;
use crate::store::RecordStore;
use crate::types::{AggregateSummary, ParsedAssessment, RecordId};

/// Ingestion, retrieval, and aggregation over a [`RecordStore`].
///
/// The store handle is injected at construction; nothing here owns global
/// state, so tests run against [`crate::MemoryRecordStore`] directly.
#[derive(Clone)]
pub struct AssessmentService {
    store: Arc<dyn RecordStore>,
}

impl AssessmentService {
    /// Create a service over the given store.
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Persist a raw payload for a user and return the generated id.
    ///
    /// The payload is accepted verbatim — malformed content is rejected
    /// lazily, at read time, never here.
    pub async fn ingest(&self, raw_payload: &str, user_id: &str) -> Result<RecordId> {
        if user_id.is_empty() {
            return Err(SaysoError::InvalidInput("userId is required".to_string()));
        }

        let id = self.store.insert(user_id, raw_payload).await?;
        debug!(user_id, record_id = %id, "assessment ingested");
        Ok(id)
    }

    /// Fetch one record and parse it.
    ///
    /// `Ok(None)` when the id was never issued. A record that exists but
    /// cannot be parsed surfaces [`SaysoError::MalformedPayload`] — the
    /// single-record path reports what aggregation silently skips.
    pub async fn get(&self, id: &str) -> Result<Option<ParsedAssessment>> {
        let Some(record) = self.store.find_by_id(id).await? else {
            return Ok(None);
        };

        match parser::parse(&record.raw_payload) {
            Ok(parsed) => Ok(Some(parsed)),
            Err(source) => Err(SaysoError::MalformedPayload {
                id: record.id,
                source,
            }),
        }
    }

    /// Average the scores across all of a user's usable assessments.
    ///
    /// Unusable records are skipped without aborting the fold. `Ok(None)`
    /// when the user has no usable records at all — whether none exist or
    /// none parsed.
    pub async fn aggregate(&self, user_id: &str) -> Result<Option<AggregateSummary>> {
        if user_id.is_empty() {
            return Err(SaysoError::InvalidInput("userId is required".to_string()));
        }

        let records = self.store.find_by_user(user_id).await?;
        let mut totals = ScoreTotals::new();
        for record in records {
            match parser::parse(&record.raw_payload) {
                Ok(parsed) => totals.add(parsed),
                Err(reason) => {
                    debug!(record_id = %record.id, %reason, "skipping unusable record");
                }
            }
        }

        Ok(totals.finish(user_id))
    }
}

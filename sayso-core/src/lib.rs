//! sayso-core: ingestion, parsing, and aggregation for pronunciation assessments
//!
//! This crate provides the foundational components for sayso:
//!
//! - **Record store** - [`RecordStore`] trait and [`MemoryRecordStore`] for persisting
//!   raw assessment payloads per user
//! - **Parser** - [`parser::parse`] for turning loosely-structured service payloads
//!   into a [`ParsedAssessment`] without letting one bad record poison an aggregate
//! - **Service** - [`AssessmentService`] for the ingest/get/aggregate operations
//! - **Speech boundary** - [`SpeechAssessor`] trait, [`assess_with_timeout`], and the
//!   [`AzureSpeechClient`] implementation
//!
//! # Quick Start
//!
//! ```
//! use std::sync::Arc;
//! use sayso_core::{AssessmentService, MemoryRecordStore};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> sayso_core::Result<()> {
//! let service = AssessmentService::new(Arc::new(MemoryRecordStore::new()));
//! let id = service.ingest(r#"{"NBest": []}"#, "user-1").await?;
//! assert!(service.get(&id).await.is_err()); // empty hypothesis list is unusable
//! # Ok(())
//! # }
//! ```

pub mod aggregate;
pub mod azure;
pub mod error;
pub mod parser;
pub mod service;
pub mod speech;
pub mod store;
pub mod types;

// Re-export key types for convenience
pub use aggregate::ScoreTotals;
pub use azure::AzureSpeechClient;
pub use error::{Result, SaysoError};
pub use parser::ParseError;
pub use service::AssessmentService;
pub use speech::{AssessError, DEFAULT_ASSESS_TIMEOUT, SpeechAssessor, assess_with_timeout};
pub use store::{MemoryRecordStore, RecordStore};
pub use types::{
    AggregateSummary, AssessmentRecord, AssessmentSummary, ParsedAssessment, RecordId,
};

//! REST API handlers

use std::sync::Arc;

use axum::{
    Json,
    extract::{Multipart, Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use sayso_core::{AggregateSummary, AssessError, ParsedAssessment, SaysoError, assess_with_timeout};

use crate::AppState;

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status of the server
    pub status: String,
    /// Server version
    pub version: String,
    /// Seconds since server started
    pub uptime_seconds: i64,
}

/// Body returned by the assess endpoint
#[derive(Debug, Serialize, Deserialize)]
pub struct UploadResponse {
    /// "success" on the happy path
    pub status: String,
    /// Human-readable outcome
    pub message: String,
    /// Store-generated record id
    pub id: String,
}

/// Error body for non-2xx responses
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable error message
    pub error: String,
    /// Stable machine-readable code
    pub code: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn api_error(status: StatusCode, code: &str, message: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
            code: code.to_string(),
        }),
    )
}

/// Health check endpoint
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.uptime_seconds(),
    })
}

/// GET /api/result/:id - Fetch one assessment in parsed form
pub async fn get_result(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ParsedAssessment>, ApiError> {
    match state.service.get(&id).await {
        Ok(Some(parsed)) => Ok(Json(parsed)),
        Ok(None) => Err(api_error(
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            format!("No assessment found for id: {id}"),
        )),
        Err(SaysoError::MalformedPayload { id, source }) => Err(api_error(
            StatusCode::UNPROCESSABLE_ENTITY,
            "MALFORMED_PAYLOAD",
            format!("Assessment {id} is stored but not usable: {source}"),
        )),
        Err(err) => Err(internal(err)),
    }
}

/// GET /api/assessments/:user_id - Per-user aggregate dashboard
pub async fn get_user_dashboard(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<Json<AggregateSummary>, ApiError> {
    match state.service.aggregate(&user_id).await {
        Ok(Some(summary)) => Ok(Json(summary)),
        Ok(None) => Err(api_error(
            StatusCode::NOT_FOUND,
            "NO_DATA",
            format!("No assessments found for userId: {user_id}"),
        )),
        Err(SaysoError::InvalidInput(msg)) => {
            Err(api_error(StatusCode::BAD_REQUEST, "INVALID_INPUT", msg))
        }
        Err(err) => Err(internal(err)),
    }
}

/// POST /api/assess - Upload audio, run the speech assessment, persist the
/// result
///
/// Multipart fields: `file` (the wav clip), `referenceText`, `uid`.
pub async fn assess(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    let mut uid = None;
    let mut reference_text = None;
    let mut file = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| api_error(StatusCode::BAD_REQUEST, "BAD_MULTIPART", e.to_string()))?
    {
        let name = field.name().map(ToString::to_string);
        match name.as_deref() {
            Some("uid") => {
                uid = Some(field.text().await.map_err(bad_field)?);
            }
            Some("referenceText") => {
                reference_text = Some(field.text().await.map_err(bad_field)?);
            }
            Some("file") => {
                let filename = field
                    .file_name()
                    .unwrap_or("upload.wav")
                    .to_string();
                let bytes = field.bytes().await.map_err(bad_field)?;
                file = Some((filename, bytes));
            }
            _ => {}
        }
    }

    let uid = uid.filter(|u| !u.is_empty()).ok_or_else(|| {
        api_error(StatusCode::BAD_REQUEST, "INVALID_INPUT", "uid field is required")
    })?;
    let reference_text = reference_text.ok_or_else(|| {
        api_error(
            StatusCode::BAD_REQUEST,
            "INVALID_INPUT",
            "referenceText field is required",
        )
    })?;
    let (filename, bytes) = file.ok_or_else(|| {
        api_error(StatusCode::BAD_REQUEST, "INVALID_INPUT", "file field is required")
    })?;

    let staged = state
        .staging
        .stage(&filename, &bytes)
        .await
        .map_err(internal)?;

    let outcome = assess_with_timeout(
        state.assessor.as_ref(),
        &staged,
        &reference_text,
        state.assess_timeout,
    )
    .await;
    state.staging.discard(&staged).await;

    let payload = outcome.map_err(|err| match err {
        AssessError::Timeout(bound) => api_error(
            StatusCode::GATEWAY_TIMEOUT,
            "SPEECH_TIMEOUT",
            format!("speech service did not respond within {bound:?}"),
        ),
        AssessError::NoMatch => api_error(
            StatusCode::UNPROCESSABLE_ENTITY,
            "NO_MATCH",
            "speech could not be recognized",
        ),
        other => api_error(StatusCode::BAD_GATEWAY, "SPEECH_FAILED", other.to_string()),
    })?;

    let annotated = annotate_payload(&payload, &reference_text, &uid);

    match state.service.ingest(&annotated, &uid).await {
        Ok(id) => Ok(Json(UploadResponse {
            status: "success".to_string(),
            message: "File uploaded.".to_string(),
            id,
        })),
        Err(SaysoError::InvalidInput(msg)) => {
            Err(api_error(StatusCode::BAD_REQUEST, "INVALID_INPUT", msg))
        }
        Err(err) => Err(internal(err)),
    }
}

fn bad_field(err: axum::extract::multipart::MultipartError) -> ApiError {
    api_error(StatusCode::BAD_REQUEST, "BAD_MULTIPART", err.to_string())
}

fn internal(err: impl std::fmt::Display) -> ApiError {
    api_error(
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL",
        err.to_string(),
    )
}

/// Merge the reference text and user id into the payload as extra top-level
/// fields when it is a JSON object. Anything else is stored verbatim —
/// content problems are a read-time concern.
fn annotate_payload(raw: &str, reference_text: &str, user_id: &str) -> String {
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(mut map)) => {
            map.insert(
                "ReferenceText".to_string(),
                Value::String(reference_text.to_string()),
            );
            map.insert("UserID".to_string(), Value::String(user_id.to_string()));
            Value::Object(map).to_string()
        }
        _ => raw.to_string(),
    }
}

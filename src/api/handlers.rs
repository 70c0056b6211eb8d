use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use tracing::{debug, info};
use utoipa::OpenApi;

use super::{
    dto::{RecordDto, TestingRecordRequest},
    errors::AppError,
    AppState,
};
use crate::records::{SensorRecord, SensorType};

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// Return a fixed example record, as XML when the `Accept` header asks for
/// it and as JSON otherwise.
#[utoipa::path(
    get,
    path = "/service/",
    responses(
        (status = 200, description = "Example record (JSON, or XML rooted at <Record>)", body = RecordDto),
    ),
    tag = "service"
)]
pub async fn get_example(headers: HeaderMap) -> Response {
    debug!("get invoked");
    let dto = RecordDto::from(example_record());

    let wants_xml = headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|accept| accept.contains("xml"));

    if wants_xml {
        ([(header::CONTENT_TYPE, "application/xml")], dto.to_xml()).into_response()
    } else {
        Json(dto).into_response()
    }
}

/// Ingest a raw Proximus-Enco payload.
///
/// Payloads that cannot be converted are answered with `400` and a JSON
/// error message; storage is not touched for them.
#[utoipa::path(
    post,
    path = "/service/",
    request_body(content = String, description = "Raw gateway JSON payload"),
    responses(
        (status = 200, description = "Record stored"),
        (status = 400, description = "Payload could not be converted"),
        (status = 500, description = "Storage failure"),
    ),
    tag = "service"
)]
pub async fn ingest(State(state): State<AppState>, body: String) -> Result<StatusCode, AppError> {
    debug!(data = %body, "post invoked");
    let record = state.translator.parse_reading(&body)?;
    store(&state, record).await
}

/// Store a record supplied directly, for testing the storage path.
/// A body without `type` is rejected with `500` before storage is touched.
#[utoipa::path(
    post,
    path = "/service/testing",
    request_body = TestingRecordRequest,
    responses(
        (status = 200, description = "Record stored"),
        (status = 500, description = "Missing sensor type or storage failure"),
    ),
    tag = "service"
)]
pub async fn ingest_testing(
    State(state): State<AppState>,
    Json(request): Json<TestingRecordRequest>,
) -> Result<StatusCode, AppError> {
    info!(data = ?request, "testing post invoked");
    let record = request.into_record().ok_or(AppError::MissingType)?;
    store(&state, record).await
}

async fn store(state: &AppState, record: SensorRecord) -> Result<StatusCode, AppError> {
    let summary = record.summary();
    state.repo.save(record).await?;
    info!(record = %summary, "Sensor record stored");
    Ok(StatusCode::OK)
}

fn example_record() -> SensorRecord {
    SensorRecord {
        device_id: "x".to_owned(),
        owner: "x".to_owned(),
        stream_id: "1".to_owned(),
        stream_unit: "x".to_owned(),
        stream_value_time: Utc::now().timestamp_millis(),
        sensor_value: 20.0,
        sensor_type: SensorType::Light,
    }
}

// ---------------------------------------------------------------------------
// Health check
// ---------------------------------------------------------------------------

/// Returns `200 OK` with `{"status":"ok"}` when the server is running.
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy"),
    ),
    tag = "system"
)]
pub async fn health() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({ "status": "ok" }))
}

// ---------------------------------------------------------------------------
// OpenAPI spec
// ---------------------------------------------------------------------------

#[derive(OpenApi)]
#[openapi(
    paths(get_example, ingest, ingest_testing, health),
    components(schemas(RecordDto, TestingRecordRequest, SensorType)),
    tags(
        (name = "service", description = "LoRa sensor ingestion endpoints"),
        (name = "system",  description = "System endpoints"),
    ),
    info(
        title = "LoRa Ingest Service API",
        version = "0.1.0",
        description = "REST ingestion endpoint for Proximus-Enco LoRa sensor telemetry"
    )
)]
pub struct ApiDoc;

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

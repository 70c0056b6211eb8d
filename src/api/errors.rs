use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

use crate::{db::RepositoryError, records::translator::TranslateError};

#[derive(Debug, Error)]
pub enum AppError {
    /// The gateway payload could not be converted.
    #[error(transparent)]
    BadPayload(#[from] TranslateError),

    /// A testing record arrived without a sensor type.
    #[error("record has no sensor type")]
    MissingType,

    #[error(transparent)]
    Storage(#[from] RepositoryError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::BadPayload(e) => {
                warn!(error = %e, "Rejected gateway payload");
                let body = Json(json!({ "error": e.to_string() }));
                (StatusCode::BAD_REQUEST, body).into_response()
            }
            AppError::MissingType => {
                warn!("Testing record has no sensor type");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
            AppError::Storage(e) => {
                error!(error = %e, "Failed to store sensor record");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}

pub mod dto;
pub mod errors;
pub mod handlers;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;

use crate::{db::RecordRepository, records::translator::PayloadTranslator};
use handlers::ApiDoc;

/// Shared by every handler. Cloned per request.
#[derive(Clone)]
pub struct AppState {
    pub translator: PayloadTranslator,
    pub repo: Arc<dyn RecordRepository>,
}

impl AppState {
    pub fn new(repo: Arc<dyn RecordRepository>) -> Self {
        Self {
            translator: PayloadTranslator::new(),
            repo,
        }
    }
}

pub fn router(state: AppState) -> Router {
    let (router, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .route(
            "/service/",
            get(handlers::get_example).post(handlers::ingest),
        )
        .route(
            "/service",
            get(handlers::get_example).post(handlers::ingest),
        )
        .route(
            "/service/testing",
            post(handlers::ingest_testing),
        )
        .with_state(state)
        .split_for_parts();

    router
        .route("/health", get(handlers::health))
        .route(
            "/api-docs/openapi.json",
            get(move || async move { axum::Json(api) }),
        )
}

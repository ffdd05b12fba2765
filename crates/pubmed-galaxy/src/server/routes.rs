//! HTTP routes for the research network API.

use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    response::IntoResponse,
    routing::{get, post},
};
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::error::{ApiError, ApiResult};
use crate::models::{DoiRequest, DoiToPmidResponse, ResearchNetwork};
use crate::network::{NetworkBuilder, RecordSource};

/// Message for a DOI that resolved to nothing usable.
pub const NETWORK_NOT_FOUND: &str = "Could not fetch research data for this DOI";

/// Message for a DOI with no matching PMID.
pub const PMID_NOT_FOUND: &str = "Could not find PMID for this DOI";

/// Message for an unexpected failure while building a network.
pub const NETWORK_INTERNAL: &str = "Internal server error while fetching research data";

/// Shared state for HTTP handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    pub builder: NetworkBuilder,
}

/// Create the HTTP router.
///
/// When `static_dir` is set, unmatched paths are served from that directory.
pub fn create_router(builder: NetworkBuilder, static_dir: Option<PathBuf>) -> Router {
    let state = Arc::new(AppState { builder });

    let router = Router::new()
        .route("/api/health", get(health_check))
        .route("/api/research-network", post(handle_research_network))
        .route("/api/doi-to-pmid", post(handle_doi_to_pmid));

    let router = match static_dir {
        Some(dir) => router.fallback_service(ServeDir::new(dir)),
        None => router,
    };

    router.layer(CorsLayer::permissive()).layer(TraceLayer::new_for_http()).with_state(state)
}

async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "service": "pubmed-galaxy",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Pull a usable DOI out of the request body.
fn require_doi(body: Result<Json<DoiRequest>, JsonRejection>) -> ApiResult<String> {
    let Json(req) = body.map_err(|rejection| {
        tracing::debug!(error = %rejection, "Rejected request body");
        ApiError::missing_doi()
    })?;
    req.normalized_doi().ok_or_else(ApiError::missing_doi)
}

/// `POST /api/research-network`
async fn handle_research_network(
    State(state): State<Arc<AppState>>,
    body: Result<Json<DoiRequest>, JsonRejection>,
) -> ApiResult<Json<ResearchNetwork>> {
    let doi = require_doi(body)?;
    tracing::info!(%doi, "Fetching research network");

    // Runs on its own task: a dropped connection does not abort in-flight lookups.
    let builder = state.builder.clone();
    let task_doi = doi.clone();
    let network = tokio::spawn(async move { builder.build(&task_doi).await })
        .await
        .map_err(|e| {
            tracing::error!(%doi, error = %e, "Research network task failed");
            ApiError::internal(NETWORK_INTERNAL)
        })?;

    network.map(Json).ok_or_else(|| ApiError::not_found(NETWORK_NOT_FOUND))
}

/// `POST /api/doi-to-pmid`
async fn handle_doi_to_pmid(
    State(state): State<Arc<AppState>>,
    body: Result<Json<DoiRequest>, JsonRejection>,
) -> ApiResult<Json<DoiToPmidResponse>> {
    let doi = require_doi(body)?;

    let pmid = state
        .builder
        .source()
        .resolve_doi(&doi)
        .await
        .ok_or_else(|| ApiError::not_found(PMID_NOT_FOUND))?;

    Ok(Json(DoiToPmidResponse { doi, pmid }))
}

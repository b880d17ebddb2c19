mod credentials;
mod guides;
mod map;
mod restaurants;

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, HeaderName, Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};
use barbometro_core::{AppConfig, Guide};
use barbometro_map::ScriptLoader;
use barbometro_sheets::{SourceChain, StageFailure};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::RwLock;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::catalog::Catalog;
use crate::middleware::{request_id, RequestId};

#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<RwLock<Catalog>>,
    pub chain: Arc<SourceChain>,
    pub guides: Arc<Vec<Guide>>,
    pub config: Arc<AppConfig>,
    pub map_loader: Arc<ScriptLoader>,
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize, M: Serialize = ResponseMeta> {
    pub data: T,
    pub meta: M,
}

#[derive(Debug, Serialize)]
pub struct ResponseMeta {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: ErrorBody,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

/// Summary of the served catalog, shared by health and refresh.
#[derive(Debug, Serialize)]
pub(super) struct CatalogStatus {
    status: &'static str,
    restaurants: usize,
    source: Option<&'static str>,
    diagnostic: Option<&'static str>,
    failures: Vec<StageFailure>,
    loaded_at: DateTime<Utc>,
}

impl CatalogStatus {
    pub(super) fn of(catalog: &Catalog) -> Self {
        Self {
            status: if catalog.restaurants.is_empty() {
                "degraded"
            } else {
                "ok"
            },
            restaurants: catalog.restaurants.len(),
            source: catalog.source,
            diagnostic: catalog.diagnostic(),
            failures: catalog.failures.clone(),
            loaded_at: catalog.loaded_at,
        }
    }
}

impl ResponseMeta {
    pub(super) fn new(request_id: String) -> Self {
        Self {
            request_id,
            timestamp: Utc::now(),
        }
    }
}

impl ApiError {
    pub fn new(
        request_id: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            error: ErrorBody {
                code: code.into(),
                message: message.into(),
            },
            meta: ResponseMeta::new(request_id.into()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match self.error.code.as_str() {
            "not_found" => StatusCode::NOT_FOUND,
            "bad_request" | "validation_error" => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(self)).into_response()
    }
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([
            header::CONTENT_TYPE,
            HeaderName::from_static("x-request-id"),
        ])
}

fn api_router() -> Router<AppState> {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/sheets-key", get(credentials::sheets_key))
        .route("/api/maps", get(credentials::maps_key))
        .route("/api/restaurants", get(restaurants::list_restaurants))
        .route("/api/restaurants/facets", get(restaurants::list_facets))
        .route(
            "/api/restaurants/refresh",
            post(restaurants::refresh_restaurants),
        )
        .route("/api/map/markers", get(map::map_markers))
        .route("/api/guides", get(guides::list_guides))
        .route("/api/guides/{route}", get(guides::get_guide))
}

pub fn build_app(state: AppState) -> Router {
    api_router()
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

async fn health(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> impl IntoResponse {
    let status = CatalogStatus::of(&*state.catalog.read().await);
    Json(ApiResponse {
        data: status,
        meta: ResponseMeta::new(req_id.0),
    })
}

#[cfg(test)]
#[path = "api_test.rs"]
mod tests;

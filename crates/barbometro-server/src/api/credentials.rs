//! Hand configured API keys to trusted callers.
//!
//! Contract: `200 { "apiKey": "..." }` or `500 { "error": "..." }`.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use barbometro_sheets::types::{KeyErrorResponse, KeyResponse};

use super::AppState;

pub(super) async fn sheets_key(State(state): State<AppState>) -> Response {
    key_response("Google Sheets", state.config.sheets_api_key.as_deref())
}

pub(super) async fn maps_key(State(state): State<AppState>) -> Response {
    key_response("Google Maps", state.config.maps_api_key.as_deref())
}

fn key_response(service: &'static str, key: Option<&str>) -> Response {
    match key {
        Some(key) => Json(KeyResponse {
            api_key: key.to_owned(),
        })
        .into_response(),
        None => {
            tracing::error!(service, "API key not found in environment variables");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(KeyErrorResponse {
                    error: format!("{service} API key not configured on the server"),
                }),
            )
                .into_response()
        }
    }
}

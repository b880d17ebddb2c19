use axum::{
    extract::{Path, State},
    Extension, Json,
};
use barbometro_core::Guide;

use crate::middleware::RequestId;

use super::{ApiError, ApiResponse, AppState, ResponseMeta};

pub(super) async fn list_guides(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Json<ApiResponse<Vec<Guide>>> {
    Json(ApiResponse {
        data: state.guides.as_ref().clone(),
        meta: ResponseMeta::new(req_id.0),
    })
}

pub(super) async fn get_guide(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(route): Path<String>,
) -> Result<Json<ApiResponse<Guide>>, ApiError> {
    let guide = state
        .guides
        .iter()
        .find(|g| g.route == route)
        .cloned()
        .ok_or_else(|| {
            ApiError::new(
                req_id.0.clone(),
                "not_found",
                format!("guide {route} not found"),
            )
        })?;

    Ok(Json(ApiResponse {
        data: guide,
        meta: ResponseMeta::new(req_id.0),
    }))
}

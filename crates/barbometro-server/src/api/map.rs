//! Marker scene for the map view.
//!
//! The widget script itself is fetched by the browser. Here the loader only
//! checks that a maps key is configured and that the script URL can be built;
//! no request is made, so the loader's timeout never fires on this path. Any
//! failure offers the list presentation instead of the map.

use axum::{
    extract::{Query, State},
    Extension, Json,
};
use barbometro_core::explore;
use barbometro_map::{script_url, MapLoadFailure, MapScene};
use serde::{Deserialize, Serialize};

use crate::middleware::RequestId;

use super::restaurants::{validation_error, RestaurantsQuery};
use super::{ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Deserialize)]
pub(super) struct MarkersQuery {
    #[serde(flatten)]
    filters: RestaurantsQuery,
    /// Id of the record the user picked, as text.
    selected: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
enum Presentation {
    Map,
    /// The map could not be brought up; show the list instead.
    List,
}

#[derive(Debug, Serialize)]
pub(super) struct MapView {
    presentation: Presentation,
    map_error: Option<String>,
    scene: MapScene,
}

pub(super) async fn map_markers(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<MarkersQuery>,
) -> Result<Json<ApiResponse<MapView>>, ApiError> {
    let criteria = query
        .filters
        .criteria()
        .map_err(|e| validation_error(req_id.0.clone(), &e))?;

    let selected_id = match query.selected.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(raw) => Some(raw.parse::<u32>().map_err(|_| {
            ApiError::new(
                req_id.0.clone(),
                "validation_error",
                format!("invalid selected value: {raw:?}"),
            )
        })?),
    };

    let scene = {
        let catalog = state.catalog.read().await;
        let visible = explore(&catalog.restaurants, &criteria);
        let selected = selected_id.and_then(|id| catalog.find(id));
        MapScene::capture(&visible, selected)
    };

    let maps_key = state.config.maps_api_key.clone();
    let loaded = state
        .map_loader
        .ensure_loaded(|| async move {
            let key = maps_key.ok_or_else(|| {
                MapLoadFailure::MissingKey(
                    "Google Maps API key not configured on the server".to_string(),
                )
            })?;
            script_url(&key).map(|_| ())
        })
        .await;

    let (presentation, map_error) = match loaded {
        Ok(()) => (Presentation::Map, None),
        Err(e) => {
            tracing::warn!(error = %e, "map unavailable; offering list view");
            (Presentation::List, Some(e.to_string()))
        }
    };

    Ok(Json(ApiResponse {
        data: MapView {
            presentation,
            map_error,
            scene,
        },
        meta: ResponseMeta::new(req_id.0),
    }))
}

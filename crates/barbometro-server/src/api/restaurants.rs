use axum::{
    extract::{Query, State},
    Extension, Json,
};
use barbometro_core::{
    explore, explorer::parse_min_rating, Criteria, CriteriaError, Facets, Restaurant,
};
use serde::{Deserialize, Serialize};

use crate::catalog;
use crate::middleware::RequestId;

use super::{ApiError, ApiResponse, AppState, CatalogStatus, ResponseMeta};

/// Filter and sort parameters, all optional and all as raw text.
#[derive(Debug, Default, Deserialize)]
pub(super) struct RestaurantsQuery {
    pub search: Option<String>,
    pub locality: Option<String>,
    /// Comma-separated cuisine tags.
    pub cuisines: Option<String>,
    pub visited: Option<String>,
    pub price: Option<String>,
    pub min_rating: Option<String>,
    pub sort: Option<String>,
}

impl RestaurantsQuery {
    pub(super) fn criteria(&self) -> Result<Criteria, CriteriaError> {
        Ok(Criteria {
            search: present(self.search.as_deref()).map(str::to_owned),
            locality: present(self.locality.as_deref()).map(str::to_owned),
            cuisines: present(self.cuisines.as_deref())
                .map(|raw| {
                    raw.split(',')
                        .map(str::trim)
                        .filter(|c| !c.is_empty())
                        .map(str::to_owned)
                        .collect()
                })
                .unwrap_or_default(),
            visited: present(self.visited.as_deref())
                .map(str::parse)
                .transpose()?
                .unwrap_or_default(),
            price: present(self.price.as_deref())
                .map(str::parse)
                .transpose()?
                .unwrap_or_default(),
            min_curator_rating: present(self.min_rating.as_deref())
                .map(parse_min_rating)
                .transpose()?,
            sort: present(self.sort.as_deref())
                .map(str::parse)
                .transpose()?
                .unwrap_or_default(),
        })
    }
}

fn present(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|s| !s.is_empty())
}

pub(super) fn validation_error(request_id: String, error: &CriteriaError) -> ApiError {
    ApiError::new(request_id, "validation_error", error.to_string())
}

#[derive(Debug, Serialize)]
pub(super) struct CatalogMeta {
    #[serde(flatten)]
    base: ResponseMeta,
    total: usize,
    matched: usize,
    source: Option<&'static str>,
    diagnostic: Option<&'static str>,
}

pub(super) async fn list_restaurants(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<RestaurantsQuery>,
) -> Result<Json<ApiResponse<Vec<Restaurant>, CatalogMeta>>, ApiError> {
    let criteria = query
        .criteria()
        .map_err(|e| validation_error(req_id.0.clone(), &e))?;

    let catalog = state.catalog.read().await;
    let data = explore(&catalog.restaurants, &criteria);
    let meta = CatalogMeta {
        base: ResponseMeta::new(req_id.0),
        total: catalog.restaurants.len(),
        matched: data.len(),
        source: catalog.source,
        diagnostic: catalog.diagnostic(),
    };

    Ok(Json(ApiResponse { data, meta }))
}

pub(super) async fn list_facets(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Json<ApiResponse<Facets>> {
    let facets = state.catalog.read().await.facets();
    Json(ApiResponse {
        data: facets,
        meta: ResponseMeta::new(req_id.0),
    })
}

pub(super) async fn refresh_restaurants(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Json<ApiResponse<CatalogStatus>> {
    let fresh = catalog::refresh(&state.chain, &state.catalog).await;
    Json(ApiResponse {
        data: CatalogStatus::of(&fresh),
        meta: ResponseMeta::new(req_id.0),
    })
}

#[cfg(test)]
mod tests {
    use barbometro_core::{PriceBracket, SortKey, VisitedFilter};

    use super::*;

    #[test]
    fn empty_query_is_default_criteria() {
        let criteria = RestaurantsQuery::default().criteria().expect("valid");
        assert_eq!(criteria, Criteria::default());
    }

    #[test]
    fn query_values_are_parsed() {
        let query = RestaurantsQuery {
            search: Some("  bacalhau ".to_string()),
            locality: Some("Porto".to_string()),
            cuisines: Some("Portuguesa, ,Petiscos".to_string()),
            visited: Some("not-visited".to_string()),
            price: Some("under50".to_string()),
            min_rating: Some("7,5".to_string()),
            sort: Some("price-desc".to_string()),
        };
        let criteria = query.criteria().expect("valid");
        assert_eq!(criteria.search.as_deref(), Some("bacalhau"));
        assert_eq!(criteria.cuisines, vec!["Portuguesa", "Petiscos"]);
        assert_eq!(criteria.visited, VisitedFilter::NotVisited);
        assert_eq!(criteria.price, PriceBracket::Under50);
        assert_eq!(criteria.min_curator_rating, Some(7.5));
        assert_eq!(criteria.sort, SortKey::PriceDesc);
    }

    #[test]
    fn blank_values_are_ignored() {
        let query = RestaurantsQuery {
            visited: Some(String::new()),
            min_rating: Some("  ".to_string()),
            ..RestaurantsQuery::default()
        };
        assert_eq!(query.criteria().expect("valid"), Criteria::default());
    }

    #[test]
    fn unknown_sort_is_rejected() {
        let query = RestaurantsQuery {
            sort: Some("stars".to_string()),
            ..RestaurantsQuery::default()
        };
        assert!(matches!(
            query.criteria(),
            Err(CriteriaError::InvalidValue { field: "sort", .. })
        ));
    }
}

//! The currently served restaurant set and how it was obtained.

use barbometro_core::{Facets, Restaurant};
use barbometro_sheets::{FetchOutcome, SourceChain, StageFailure};
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

/// Shown when every source failed and nothing could be listed.
pub const EMPTY_DIAGNOSTIC: &str = "Não foram encontrados restaurantes. Verifique se a fonte de dados está configurada corretamente.";

#[derive(Debug, Clone)]
pub struct Catalog {
    pub restaurants: Vec<Restaurant>,
    pub source: Option<&'static str>,
    pub failures: Vec<StageFailure>,
    pub loaded_at: DateTime<Utc>,
}

impl Catalog {
    #[must_use]
    pub fn from_outcome(outcome: FetchOutcome) -> Self {
        Self {
            restaurants: outcome.restaurants,
            source: outcome.source,
            failures: outcome.failures,
            loaded_at: Utc::now(),
        }
    }

    #[must_use]
    pub fn diagnostic(&self) -> Option<&'static str> {
        self.restaurants.is_empty().then_some(EMPTY_DIAGNOSTIC)
    }

    #[must_use]
    pub fn facets(&self) -> Facets {
        Facets::from_records(&self.restaurants)
    }

    #[must_use]
    pub fn find(&self, id: u32) -> Option<&Restaurant> {
        self.restaurants.iter().find(|r| r.id == id)
    }
}

/// Re-run the whole chain from its first stage and swap the result in.
///
/// The previous set is replaced wholesale, never merged.
pub async fn refresh(chain: &SourceChain, catalog: &RwLock<Catalog>) -> Catalog {
    let fresh = Catalog::from_outcome(chain.fetch_restaurants().await);
    tracing::info!(
        count = fresh.restaurants.len(),
        source = fresh.source.unwrap_or("none"),
        "catalog refreshed"
    );
    *catalog.write().await = fresh.clone();
    fresh
}

//! Domain model and pure logic for the barbometro restaurant directory.
//!
//! Holds the [`Restaurant`] record, the Portuguese collation used for every
//! name-ordered listing, the filter/sort engine in [`explorer`], facet
//! extraction, editorial guides, and environment configuration.

pub mod app_config;
pub mod collation;
pub mod config;
pub mod error;
pub mod explorer;
pub mod facets;
pub mod guides;
pub mod restaurant;

pub use app_config::{AppConfig, Environment};
pub use collation::{pt_cmp, sort_by_name};
pub use config::{load_app_config, load_app_config_from_env};
pub use error::ConfigError;
pub use explorer::{
    explore, extract_price, Criteria, CriteriaError, PriceBracket, SortKey, VisitedFilter,
};
pub use facets::{cuisines, locations, Facets};
pub use guides::{load_guides, parse_guides, Guide, GuideSection};
pub use restaurant::Restaurant;

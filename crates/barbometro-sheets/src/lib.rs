//! Restaurant data source adapter.
//!
//! Loads the directory from the backing spreadsheet through an ordered chain
//! of strategies: the structured values API, then the public CSV export, then
//! a small built-in data set. Each stage is only attempted when the previous
//! one failed, and the chain as a whole never returns an error to its caller.

pub mod chain;
pub mod client;
pub mod credential;
pub mod error;
pub mod fallback;
pub mod parse;
pub mod types;

pub use chain::{
    first_success, FetchOutcome, PublicCsvSource, SourceChain, SourceStrategy, StageFailure,
    StaticSource, StructuredApiSource,
};
pub use client::SheetsClient;
pub use credential::CredentialSource;
pub use error::{SourceError, SourceErrorKind};
pub use fallback::static_restaurants;
pub use parse::{parse_csv, parse_values};

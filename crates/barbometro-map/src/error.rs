use thiserror::Error;

/// The map widget could not be brought up. Never fatal: the list view stays usable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MapLoadFailure {
    #[error("timed out after {waited_ms} ms waiting for the map script")]
    Timeout { waited_ms: u64 },

    #[error("map API key is missing: {0}")]
    MissingKey(String),

    #[error("map script failed to load: {0}")]
    Script(String),
}

//! Wire types for the spreadsheet values API and the key endpoints.

use serde::{Deserialize, Serialize};

/// Body of `GET /v4/spreadsheets/{id}/values/{range}`.
///
/// Cells are kept as raw JSON: the API sends strings by default but may send
/// booleans and numbers depending on the render option.
#[derive(Debug, Deserialize)]
pub struct ValuesResponse {
    #[serde(default)]
    pub values: Vec<Vec<serde_json::Value>>,
}

/// Success body of a key endpoint: `{ "apiKey": "..." }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyResponse {
    #[serde(rename = "apiKey")]
    pub api_key: String,
}

/// Failure body of a key endpoint: `{ "error": "..." }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyErrorResponse {
    pub error: String,
}

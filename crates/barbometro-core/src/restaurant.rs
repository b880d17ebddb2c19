use serde::{Deserialize, Serialize};

use crate::explorer::extract_price;

/// One curated restaurant row from the directory spreadsheet.
///
/// Records are created fresh on every fetch and never mutated afterwards;
/// `id` is the 1-based position of the row in the batch it came from and is
/// not stable across fetches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Restaurant {
    pub id: u32,
    pub name: String,
    pub locality: String,
    /// Raw `"lat,lng"` text as typed in the sheet.
    pub gps_coordinates: Option<String>,
    pub maps_link: String,
    /// Comma-separated cuisine tags; see [`Restaurant::cuisine_tags`].
    pub cuisine_types: String,
    pub visited: bool,
    pub rating: f64,
    pub quality_price_ratio: f64,
    /// Free text such as `"20€"` or `"20€-30€"`.
    pub price_per_person: String,
    pub website_or_instagram: Option<String>,
    /// The site's own 0–10 rating.
    pub curator_rating: Option<f64>,
    pub notes: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
}

impl Restaurant {
    /// Cuisine tags split on comma and trimmed, empty tags dropped.
    pub fn cuisine_tags(&self) -> impl Iterator<Item = &str> {
        self.cuisine_types
            .split(',')
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
    }

    /// Numeric price per person (first integer in the price text, 0 if none).
    #[must_use]
    pub fn price_value(&self) -> u64 {
        extract_price(&self.price_per_person)
    }

    /// Whether the record can be placed on a map.
    ///
    /// A zero latitude or longitude is how the sheet encodes "unknown".
    #[must_use]
    pub fn has_coordinates(&self) -> bool {
        self.latitude != 0.0 && self.longitude != 0.0
    }
}

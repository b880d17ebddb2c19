//! Filter/sort engine behind the restaurant list and map.
//!
//! [`explore`] is a pure function of the full record set and a [`Criteria`]
//! value. It never mutates its input and always returns a new vector, so
//! callers can re-run it on every criteria change and simply keep the latest
//! result. An empty result is a normal outcome, not an error.

use std::cmp::Ordering;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::collation::pt_cmp;
use crate::restaurant::Restaurant;

/// Sentinel accepted by the locality and cuisine filters meaning "no restriction".
pub const ALL: &str = "all";

static FIRST_INTEGER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]+").expect("valid regex"));

/// Extract the numeric price from free text such as `"20€"` or `"20€-30€"`.
///
/// Returns the first run of ASCII digits, or `0` when there is none (or it
/// does not fit in a `u64`).
#[must_use]
pub fn extract_price(text: &str) -> u64 {
    FIRST_INTEGER
        .find(text)
        .and_then(|m| m.as_str().parse::<u64>().ok())
        .unwrap_or(0)
}

#[derive(Debug, Error, PartialEq)]
pub enum CriteriaError {
    #[error("invalid {field} value: {value:?}")]
    InvalidValue { field: &'static str, value: String },

    #[error("minimum rating must be between 0 and 10, got {0}")]
    RatingOutOfRange(f64),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VisitedFilter {
    #[default]
    All,
    Visited,
    NotVisited,
}

impl FromStr for VisitedFilter {
    type Err = CriteriaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(Self::All),
            "visited" => Ok(Self::Visited),
            "not-visited" => Ok(Self::NotVisited),
            other => Err(CriteriaError::InvalidValue {
                field: "visited",
                value: other.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PriceBracket {
    #[default]
    All,
    Under30,
    Under50,
    Under100,
}

impl PriceBracket {
    /// Exclusive upper bound of the bracket, `None` for [`PriceBracket::All`].
    #[must_use]
    pub fn limit(self) -> Option<u64> {
        match self {
            Self::All => None,
            Self::Under30 => Some(30),
            Self::Under50 => Some(50),
            Self::Under100 => Some(100),
        }
    }
}

impl FromStr for PriceBracket {
    type Err = CriteriaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(Self::All),
            "under30" => Ok(Self::Under30),
            "under50" => Ok(Self::Under50),
            "under100" => Ok(Self::Under100),
            other => Err(CriteriaError::InvalidValue {
                field: "price",
                value: other.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    #[default]
    Name,
    Rating,
    PriceAsc,
    PriceDesc,
}

impl FromStr for SortKey {
    type Err = CriteriaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(Self::Name),
            "rating" => Ok(Self::Rating),
            "price-asc" => Ok(Self::PriceAsc),
            "price-desc" => Ok(Self::PriceDesc),
            other => Err(CriteriaError::InvalidValue {
                field: "sort",
                value: other.to_string(),
            }),
        }
    }
}

/// Parse and range-check a minimum curator rating (0–10).
///
/// # Errors
///
/// Returns [`CriteriaError::InvalidValue`] if `raw` is not a number and
/// [`CriteriaError::RatingOutOfRange`] if it falls outside `0..=10`.
pub fn parse_min_rating(raw: &str) -> Result<f64, CriteriaError> {
    let value = raw
        .trim()
        .replace(',', ".")
        .parse::<f64>()
        .map_err(|_| CriteriaError::InvalidValue {
            field: "min_rating",
            value: raw.to_string(),
        })?;
    if !(0.0..=10.0).contains(&value) {
        return Err(CriteriaError::RatingOutOfRange(value));
    }
    Ok(value)
}

/// Everything the user can narrow or reorder the directory by.
///
/// Every field is optional in effect: the [`Default`] value matches every
/// record and sorts by name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Criteria {
    /// Case-insensitive substring searched in name, cuisine, notes and locality.
    pub search: Option<String>,
    /// Exact (case-insensitive) locality, or [`ALL`].
    pub locality: Option<String>,
    /// Selected cuisine tags; empty or containing [`ALL`] disables the filter.
    pub cuisines: Vec<String>,
    pub visited: VisitedFilter,
    pub price: PriceBracket,
    pub min_curator_rating: Option<f64>,
    pub sort: SortKey,
}

/// Filter `records` by `criteria` and order the survivors by `criteria.sort`.
#[must_use]
pub fn explore(records: &[Restaurant], criteria: &Criteria) -> Vec<Restaurant> {
    let predicate = Predicate::compile(criteria);
    let mut matched: Vec<Restaurant> = records
        .iter()
        .filter(|r| predicate.matches(r))
        .cloned()
        .collect();
    sort_in_place(&mut matched, criteria.sort);
    matched
}

/// Return a copy of `records` ordered by `key`. Ties keep their input order.
#[cfg(test)]
fn sort(records: &[Restaurant], key: SortKey) -> Vec<Restaurant> {
    let mut sorted = records.to_vec();
    sort_in_place(&mut sorted, key);
    sorted
}

fn sort_in_place(records: &mut [Restaurant], key: SortKey) {
    match key {
        SortKey::Name => records.sort_by(|a, b| pt_cmp(&a.name, &b.name)),
        SortKey::Rating => records.sort_by(|a, b| cmp_curator(b, a)),
        SortKey::PriceAsc => records.sort_by_key(Restaurant::price_value),
        SortKey::PriceDesc => records.sort_by_key(|r| std::cmp::Reverse(r.price_value())),
    }
}

/// Unrated records order below every rated one.
fn cmp_curator(a: &Restaurant, b: &Restaurant) -> Ordering {
    match (a.curator_rating, b.curator_rating) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        (Some(_), None) => Ordering::Greater,
        (None, Some(_)) => Ordering::Less,
        (None, None) => Ordering::Equal,
    }
}

/// Criteria with the string comparisons lowered once up front.
struct Predicate {
    search: Option<String>,
    locality: Option<String>,
    cuisines: Vec<String>,
    visited: Option<bool>,
    price_limit: Option<u64>,
    min_curator_rating: Option<f64>,
}

impl Predicate {
    fn compile(criteria: &Criteria) -> Self {
        let search = criteria
            .search
            .as_deref()
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase);

        let locality = criteria
            .locality
            .as_deref()
            .filter(|l| !l.is_empty() && !l.eq_ignore_ascii_case(ALL))
            .map(str::to_lowercase);

        let cuisines = if criteria.cuisines.iter().any(|c| c.eq_ignore_ascii_case(ALL)) {
            Vec::new()
        } else {
            criteria
                .cuisines
                .iter()
                .map(|c| c.trim().to_lowercase())
                .filter(|c| !c.is_empty())
                .collect()
        };

        let visited = match criteria.visited {
            VisitedFilter::All => None,
            VisitedFilter::Visited => Some(true),
            VisitedFilter::NotVisited => Some(false),
        };

        Self {
            search,
            locality,
            cuisines,
            visited,
            price_limit: criteria.price.limit(),
            min_curator_rating: criteria.min_curator_rating,
        }
    }

    fn matches(&self, r: &Restaurant) -> bool {
        self.matches_search(r)
            && self.matches_locality(r)
            && self.matches_cuisine(r)
            && self.visited.is_none_or(|v| r.visited == v)
            && self.price_limit.is_none_or(|limit| r.price_value() < limit)
            && self
                .min_curator_rating
                .is_none_or(|min| r.curator_rating.is_some_and(|rating| rating >= min))
    }

    fn matches_search(&self, r: &Restaurant) -> bool {
        let Some(term) = &self.search else {
            return true;
        };
        let contains = |field: &str| field.to_lowercase().contains(term.as_str());
        contains(&r.name)
            || contains(&r.cuisine_types)
            || r.notes.as_deref().is_some_and(contains)
            || contains(&r.locality)
    }

    fn matches_locality(&self, r: &Restaurant) -> bool {
        self.locality
            .as_ref()
            .is_none_or(|wanted| r.locality.to_lowercase() == *wanted)
    }

    fn matches_cuisine(&self, r: &Restaurant) -> bool {
        if self.cuisines.is_empty() {
            return true;
        }
        r.cuisine_tags().any(|tag| {
            let tag = tag.to_lowercase();
            self.cuisines
                .iter()
                .any(|selected| tag.contains(selected.as_str()))
        })
    }
}

#[cfg(test)]
#[path = "explorer_test.rs"]
mod tests;

//! Distinct filter options offered to the user, derived from the loaded records.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::collation::pt_cmp;
use crate::restaurant::Restaurant;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Facets {
    pub locations: Vec<String>,
    pub cuisines: Vec<String>,
}

impl Facets {
    #[must_use]
    pub fn from_records(records: &[Restaurant]) -> Self {
        Self {
            locations: locations(records),
            cuisines: cuisines(records),
        }
    }
}

/// Distinct localities in Portuguese alphabetical order.
#[must_use]
pub fn locations(records: &[Restaurant]) -> Vec<String> {
    collate(records.iter().map(|r| r.locality.trim()))
}

/// Distinct cuisine tags across every record in Portuguese alphabetical order.
#[must_use]
pub fn cuisines(records: &[Restaurant]) -> Vec<String> {
    collate(records.iter().flat_map(Restaurant::cuisine_tags))
}

fn collate<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let unique: BTreeSet<&str> = values.filter(|v| !v.is_empty()).collect();
    let mut out: Vec<String> = unique.into_iter().map(str::to_owned).collect();
    out.sort_by(|a, b| pt_cmp(a, b));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(locality: &str, cuisine: &str) -> Restaurant {
        Restaurant {
            id: 1,
            name: "x".to_owned(),
            locality: locality.to_owned(),
            gps_coordinates: None,
            maps_link: String::new(),
            cuisine_types: cuisine.to_owned(),
            visited: false,
            rating: 0.0,
            quality_price_ratio: 0.0,
            price_per_person: String::new(),
            website_or_instagram: None,
            curator_rating: None,
            notes: None,
            latitude: 0.0,
            longitude: 0.0,
        }
    }

    #[test]
    fn locations_are_unique_and_collated() {
        let records = vec![
            rec("Porto", ""),
            rec("Évora", ""),
            rec("Porto", ""),
            rec("Braga", ""),
            rec("", ""),
        ];
        assert_eq!(locations(&records), vec!["Braga", "Évora", "Porto"]);
    }

    #[test]
    fn cuisines_are_split_trimmed_and_unique() {
        let records = vec![
            rec("Porto", "Portuguesa, Petiscos"),
            rec("Lisboa", "Japonesa ,Portuguesa"),
            rec("Faro", ""),
        ];
        assert_eq!(
            cuisines(&records),
            vec!["Japonesa", "Petiscos", "Portuguesa"]
        );
    }

    #[test]
    fn facets_of_empty_set_are_empty() {
        let facets = Facets::from_records(&[]);
        assert!(facets.locations.is_empty());
        assert!(facets.cuisines.is_empty());
    }
}

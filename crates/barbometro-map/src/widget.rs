//! The narrow interface to the third-party mapping widget.

use barbometro_core::Restaurant;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    #[must_use]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Smallest box containing a set of points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bounds {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

impl Bounds {
    /// `None` when `points` is empty.
    pub fn from_points(points: impl IntoIterator<Item = LatLng>) -> Option<Self> {
        points.into_iter().fold(None, |acc, p| {
            Some(match acc {
                None => Self {
                    south: p.lat,
                    west: p.lng,
                    north: p.lat,
                    east: p.lng,
                },
                Some(b) => Self {
                    south: b.south.min(p.lat),
                    west: b.west.min(p.lng),
                    north: b.north.max(p.lat),
                    east: b.east.max(p.lng),
                },
            })
        })
    }
}

/// What a marker looks like. The fill color encodes the visited flag.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkerSpec {
    pub restaurant_id: u32,
    pub position: LatLng,
    pub title: String,
    pub fill_color: &'static str,
    /// The marker of the currently selected record.
    pub highlighted: bool,
}

/// Content of the info panel opened for a marker.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InfoPanel {
    pub name: String,
    pub locality: String,
    /// General rating with one decimal, e.g. `"4.5"`.
    pub rating: String,
    pub cuisine: Option<String>,
    pub price: Option<String>,
    pub maps_link: String,
}

impl InfoPanel {
    #[must_use]
    pub fn for_restaurant(r: &Restaurant) -> Self {
        let non_empty = |s: &str| Some(s.trim()).filter(|s| !s.is_empty()).map(str::to_owned);
        Self {
            name: r.name.clone(),
            locality: r.locality.clone(),
            rating: format!("{:.1}", r.rating),
            cuisine: non_empty(&r.cuisine_types),
            price: non_empty(&r.price_per_person),
            maps_link: r.maps_link.clone(),
        }
    }
}

/// Primitives the presenter needs from a mapping widget.
///
/// Handles are opaque to the presenter; an implementation may use indices,
/// JS object references, or anything else.
pub trait MapWidget {
    type Marker;
    type Panel;

    fn create_map(&mut self, center: LatLng, zoom: u8);

    fn create_marker(&mut self, spec: MarkerSpec) -> Self::Marker;

    fn create_info_window(&mut self) -> Self::Panel;

    fn open_info_window(&mut self, panel: &Self::Panel, marker: &Self::Marker, content: &InfoPanel);

    fn fit_bounds(&mut self, bounds: Bounds);

    fn set_center(&mut self, center: LatLng, zoom: u8);

    /// Register the click behaviour of a marker: select `restaurant_id` and
    /// open the panel with `content`.
    fn on_marker_click(&mut self, marker: &Self::Marker, restaurant_id: u32, content: InfoPanel);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_cover_all_points() {
        let b = Bounds::from_points([
            LatLng::new(41.15, -8.61),
            LatLng::new(37.01, -7.93),
            LatLng::new(38.72, -9.14),
        ])
        .expect("non-empty");
        assert_eq!(
            b,
            Bounds {
                south: 37.01,
                west: -9.14,
                north: 41.15,
                east: -7.93
            }
        );
    }

    #[test]
    fn bounds_of_nothing_is_none() {
        assert!(Bounds::from_points(std::iter::empty()).is_none());
    }
}

//! Turns a filtered record set and an optional selection into widget calls.

use barbometro_core::Restaurant;

use crate::widget::{Bounds, InfoPanel, LatLng, MapWidget, MarkerSpec};

pub const VISITED_COLOR: &str = "#10b981";
pub const NOT_VISITED_COLOR: &str = "#f59e0b";

/// Mainland Portugal.
pub const DEFAULT_CENTER: LatLng = LatLng::new(39.5, -8.0);
pub const DEFAULT_ZOOM: u8 = 7;
pub const SELECTED_ZOOM: u8 = 14;

/// Drives a [`MapWidget`] from the filtered record set and the current selection.
pub struct MapPresenter;

impl MapPresenter {
    /// Draw `restaurants` on `widget`.
    ///
    /// Records without coordinates get no marker. With a placeable `selected`
    /// record the map centers on it and opens its panel; otherwise it fits the
    /// view to every placed marker, or stays on the default view if none.
    pub fn render<W: MapWidget>(
        widget: &mut W,
        restaurants: &[Restaurant],
        selected: Option<&Restaurant>,
    ) {
        widget.create_map(DEFAULT_CENTER, DEFAULT_ZOOM);
        let panel = widget.create_info_window();

        let selected_id = selected.map(|r| r.id);
        let mut placed = Vec::new();

        for restaurant in restaurants.iter().filter(|r| r.has_coordinates()) {
            let position = LatLng::new(restaurant.latitude, restaurant.longitude);
            let marker = widget.create_marker(MarkerSpec {
                restaurant_id: restaurant.id,
                position,
                title: restaurant.name.clone(),
                fill_color: marker_color(restaurant),
                highlighted: selected_id == Some(restaurant.id),
            });
            widget.on_marker_click(&marker, restaurant.id, InfoPanel::for_restaurant(restaurant));
            placed.push((restaurant.id, position, marker));
        }

        if let Some(selected) = selected.filter(|r| r.has_coordinates()) {
            widget.set_center(
                LatLng::new(selected.latitude, selected.longitude),
                SELECTED_ZOOM,
            );
            if let Some((_, _, marker)) = placed.iter().find(|(id, _, _)| *id == selected.id) {
                widget.open_info_window(&panel, marker, &InfoPanel::for_restaurant(selected));
            }
        } else if let Some(bounds) = Bounds::from_points(placed.iter().map(|(_, p, _)| *p)) {
            widget.fit_bounds(bounds);
        }
    }
}

#[must_use]
pub fn marker_color(restaurant: &Restaurant) -> &'static str {
    if restaurant.visited {
        VISITED_COLOR
    } else {
        NOT_VISITED_COLOR
    }
}

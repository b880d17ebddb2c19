//! A [`MapWidget`] that records what it was asked to draw.
//!
//! The recorded [`MapScene`] is what the server hands to clients that render
//! the map themselves.

use barbometro_core::Restaurant;
use serde::Serialize;

use crate::presenter::{MapPresenter, DEFAULT_CENTER, DEFAULT_ZOOM};
use crate::widget::{Bounds, InfoPanel, LatLng, MapWidget, MarkerSpec};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordedMarker {
    #[serde(flatten)]
    pub spec: MarkerSpec,
    /// Panel shown when the marker is clicked.
    pub on_click: Option<InfoPanel>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenPanel {
    pub restaurant_id: u32,
    pub content: InfoPanel,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Viewport {
    Default { center: LatLng, zoom: u8 },
    FitBounds { bounds: Bounds },
    Centered { center: LatLng, zoom: u8 },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapScene {
    pub viewport: Viewport,
    pub markers: Vec<RecordedMarker>,
    pub open_panel: Option<OpenPanel>,
}

impl MapScene {
    /// Render `restaurants` through a fresh [`SceneRecorder`].
    #[must_use]
    pub fn capture(restaurants: &[Restaurant], selected: Option<&Restaurant>) -> Self {
        let mut recorder = SceneRecorder::default();
        MapPresenter::render(&mut recorder, restaurants, selected);
        recorder.into_scene()
    }
}

#[derive(Debug, Default)]
pub struct SceneRecorder {
    viewport: Option<Viewport>,
    markers: Vec<RecordedMarker>,
    open_panel: Option<OpenPanel>,
}

impl SceneRecorder {
    #[must_use]
    pub fn into_scene(self) -> MapScene {
        MapScene {
            viewport: self.viewport.unwrap_or(Viewport::Default {
                center: DEFAULT_CENTER,
                zoom: DEFAULT_ZOOM,
            }),
            markers: self.markers,
            open_panel: self.open_panel,
        }
    }
}

impl MapWidget for SceneRecorder {
    type Marker = usize;
    type Panel = ();

    fn create_map(&mut self, center: LatLng, zoom: u8) {
        self.viewport = Some(Viewport::Default { center, zoom });
        self.markers.clear();
        self.open_panel = None;
    }

    fn create_marker(&mut self, spec: MarkerSpec) -> usize {
        self.markers.push(RecordedMarker {
            spec,
            on_click: None,
        });
        self.markers.len() - 1
    }

    fn create_info_window(&mut self) {}

    fn open_info_window(&mut self, _panel: &(), marker: &usize, content: &InfoPanel) {
        if let Some(recorded) = self.markers.get(*marker) {
            self.open_panel = Some(OpenPanel {
                restaurant_id: recorded.spec.restaurant_id,
                content: content.clone(),
            });
        }
    }

    fn fit_bounds(&mut self, bounds: Bounds) {
        self.viewport = Some(Viewport::FitBounds { bounds });
    }

    fn set_center(&mut self, center: LatLng, zoom: u8) {
        self.viewport = Some(Viewport::Centered { center, zoom });
    }

    fn on_marker_click(&mut self, marker: &usize, _restaurant_id: u32, content: InfoPanel) {
        if let Some(recorded) = self.markers.get_mut(*marker) {
            recorded.on_click = Some(content);
        }
    }
}

//! Map presentation adapter.
//!
//! The mapping widget is an external collaborator reached only through the
//! narrow [`MapWidget`] trait. [`MapPresenter`] decides what the widget should
//! show for a filtered record set; [`ScriptLoader`] makes sure the widget's
//! script is loaded at most once per loader lifetime.

pub mod error;
pub mod loader;
pub mod presenter;
pub mod recorder;
pub mod widget;

pub use error::MapLoadFailure;
pub use loader::{script_url, LoadState, ScriptLoader};
pub use presenter::{
    MapPresenter, DEFAULT_CENTER, DEFAULT_ZOOM, NOT_VISITED_COLOR, SELECTED_ZOOM, VISITED_COLOR,
};
pub use recorder::{MapScene, OpenPanel, RecordedMarker, SceneRecorder, Viewport};
pub use widget::{Bounds, InfoPanel, LatLng, MapWidget, MarkerSpec};

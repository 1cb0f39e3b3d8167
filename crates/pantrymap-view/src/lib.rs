//! Pantry map view: filtering, list and map rendering, geolocation, and the
//! controller that ties them together.

pub mod controller;
pub mod engine;
pub mod geolocation;
pub mod list;
pub mod loader;
pub mod map;
pub mod time_ago;

pub use controller::{PantryView, ViewState};
pub use engine::{compute_visible, sort_visible, VisiblePantry};
pub use geolocation::{
    locate, GeolocationError, GeolocationProvider, LocateOutcome, LocateTrigger, LocationNotice,
    StaticLocation, LOCATION_NOTICE,
};
pub use list::{render_list, EmptyState, ListEntry, ListView};
pub use loader::{JsonFileSource, LoadError, PantrySource};
pub use map::{
    build_scene, place_view, MapOp, MapRenderer, MapScene, MapSurface, PlaceGeometry,
    RecordingSurface, Viewport,
};

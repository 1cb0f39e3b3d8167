//! Map renderer.
//!
//! The mapping SDK sits behind [`MapSurface`]. Scene construction is pure
//! ([`build_scene`]); [`MapRenderer`] applies a scene to a surface and owns
//! the marker set, which it tears down and rebuilds on every render.

mod icon;
mod recording;
mod scene;

pub use icon::{marker_icon, MarkerIcon};
pub use recording::{MapOp, RecordingSurface};
pub use scene::{build_scene, place_view, PlaceGeometry, PopupContent};

use pantrymap_core::{miles_to_meters, Coordinate, LatLngBounds};
use serde::Serialize;

/// Radius of the accuracy ring drawn around the user marker.
const USER_ACCURACY_METERS: f64 = 100.0;
const USER_COLOR: &str = "#4285F4";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct MarkerId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct OverlayId(pub u64);

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkerSpec {
    pub pantry_id: i64,
    pub position: Coordinate,
    pub title: String,
    pub color: String,
    pub icon: MarkerIcon,
    pub popup: PopupContent,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Viewport {
    /// Frame `bounds`, never zooming in past `max_zoom` when set.
    Fit {
        bounds: LatLngBounds,
        max_zoom: Option<u8>,
    },
    Center { center: Coordinate, zoom: u8 },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CircleOverlay {
    pub center: Coordinate,
    pub radius_meters: f64,
    pub color: &'static str,
    pub fill_opacity: f64,
}

/// Markers plus the viewport that frames them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapScene {
    pub markers: Vec<MarkerSpec>,
    /// `None` leaves the current viewport alone.
    pub viewport: Option<Viewport>,
}

/// Capabilities consumed from the mapping SDK.
pub trait MapSurface {
    fn add_marker(&mut self, marker: &MarkerSpec) -> MarkerId;
    fn remove_marker(&mut self, id: MarkerId);
    fn open_popup(&mut self, id: MarkerId);
    fn close_popup(&mut self, id: MarkerId);
    fn set_view(&mut self, viewport: &Viewport);
    fn add_circle(&mut self, circle: &CircleOverlay) -> OverlayId;
    fn remove_overlay(&mut self, id: OverlayId);
    fn add_user_marker(&mut self, at: Coordinate) -> MarkerId;
}

#[derive(Debug, Clone, Copy)]
struct PlacedMarker {
    pantry_id: i64,
    id: MarkerId,
    position: Coordinate,
}

/// Owns every marker and overlay this crate has placed on a surface.
///
/// At most one popup is open at a time: opening one closes the previous.
#[derive(Debug, Default)]
pub struct MapRenderer {
    markers: Vec<PlacedMarker>,
    open_popup: Option<MarkerId>,
    user_marker: Option<MarkerId>,
    user_overlays: Vec<OverlayId>,
}

impl MapRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }

    #[must_use]
    pub fn open_popup_pantry(&self) -> Option<i64> {
        let open = self.open_popup?;
        self.markers
            .iter()
            .find(|m| m.id == open)
            .map(|m| m.pantry_id)
    }

    /// Replace every pantry marker with the scene's markers, then frame.
    pub fn render<S: MapSurface>(&mut self, surface: &mut S, scene: &MapScene) {
        if let Some(open) = self.open_popup.take() {
            surface.close_popup(open);
        }
        for marker in self.markers.drain(..) {
            surface.remove_marker(marker.id);
        }

        self.markers = scene
            .markers
            .iter()
            .map(|spec| PlacedMarker {
                pantry_id: spec.pantry_id,
                id: surface.add_marker(spec),
                position: spec.position,
            })
            .collect();

        if let Some(viewport) = &scene.viewport {
            surface.set_view(viewport);
        }

        tracing::debug!(markers = self.markers.len(), "rendered map markers");
    }

    /// Open the popup of a pantry's marker, as a marker click would.
    ///
    /// Returns `false` when the pantry has no marker.
    pub fn open_popup<S: MapSurface>(&mut self, surface: &mut S, pantry_id: i64) -> bool {
        let Some(marker) = self.markers.iter().find(|m| m.pantry_id == pantry_id) else {
            return false;
        };
        let id = marker.id;

        match self.open_popup {
            Some(open) if open == id => return true,
            Some(open) => surface.close_popup(open),
            None => {}
        }
        surface.open_popup(id);
        self.open_popup = Some(id);
        true
    }

    /// Centre on a pantry at `zoom` and open its popup.
    ///
    /// Returns `false` when the pantry is not currently visible.
    pub fn focus<S: MapSurface>(&mut self, surface: &mut S, pantry_id: i64, zoom: u8) -> bool {
        let Some(position) = self
            .markers
            .iter()
            .find(|m| m.pantry_id == pantry_id)
            .map(|m| m.position)
        else {
            return false;
        };

        surface.set_view(&Viewport::Center {
            center: position,
            zoom,
        });
        self.open_popup(surface, pantry_id)
    }

    /// Place the user marker with its accuracy ring and, when
    /// `radius_miles` is set, the search-radius circle. Replaces any
    /// previous user marker. Centres the map when `zoom` is set.
    pub fn show_user<S: MapSurface>(
        &mut self,
        surface: &mut S,
        at: Coordinate,
        radius_miles: Option<f64>,
        zoom: Option<u8>,
    ) {
        if let Some(previous) = self.user_marker.take() {
            surface.remove_marker(previous);
        }
        for overlay in self.user_overlays.drain(..) {
            surface.remove_overlay(overlay);
        }

        if let Some(zoom) = zoom {
            surface.set_view(&Viewport::Center { center: at, zoom });
        }

        self.user_marker = Some(surface.add_user_marker(at));
        self.user_overlays.push(surface.add_circle(&CircleOverlay {
            center: at,
            radius_meters: USER_ACCURACY_METERS,
            color: USER_COLOR,
            fill_opacity: 0.2,
        }));

        if let Some(radius) = radius_miles.filter(|r| *r > 0.0) {
            self.user_overlays.push(surface.add_circle(&CircleOverlay {
                center: at,
                radius_meters: miles_to_meters(radius),
                color: USER_COLOR,
                fill_opacity: 0.1,
            }));
        }
    }
}

#[cfg(test)]
#[path = "map_test.rs"]
mod tests;

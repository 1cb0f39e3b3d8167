use pantrymap_core::Coordinate;
use serde::Serialize;

use super::{CircleOverlay, MapSurface, MarkerId, MarkerSpec, OverlayId, Viewport};

/// One call made against a [`MapSurface`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum MapOp {
    AddMarker { id: MarkerId, marker: MarkerSpec },
    RemoveMarker { id: MarkerId },
    OpenPopup { id: MarkerId },
    ClosePopup { id: MarkerId },
    SetView { viewport: Viewport },
    AddCircle { id: OverlayId, circle: CircleOverlay },
    RemoveOverlay { id: OverlayId },
    AddUserMarker { id: MarkerId, at: Coordinate },
}

/// Headless surface that records every call in order.
///
/// Used by the CLI to dump what a map would show, and by tests.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    ops: Vec<MapOp>,
    next_id: u64,
}

impl RecordingSurface {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn ops(&self) -> &[MapOp] {
        &self.ops
    }

    pub fn clear(&mut self) {
        self.ops.clear();
    }

    /// Pantry markers added and not yet removed, in insertion order.
    #[must_use]
    pub fn live_markers(&self) -> Vec<&MarkerSpec> {
        let mut live: Vec<(MarkerId, &MarkerSpec)> = Vec::new();
        for op in &self.ops {
            match op {
                MapOp::AddMarker { id, marker } => live.push((*id, marker)),
                MapOp::RemoveMarker { id } => live.retain(|(live_id, _)| live_id != id),
                _ => {}
            }
        }
        live.into_iter().map(|(_, marker)| marker).collect()
    }

    /// Markers whose popup is currently open.
    #[must_use]
    pub fn open_popups(&self) -> Vec<MarkerId> {
        let mut open: Vec<MarkerId> = Vec::new();
        for op in &self.ops {
            match op {
                MapOp::OpenPopup { id } => open.push(*id),
                MapOp::ClosePopup { id } | MapOp::RemoveMarker { id } => {
                    open.retain(|o| o != id);
                }
                _ => {}
            }
        }
        open
    }

    /// Circles added and not yet removed.
    #[must_use]
    pub fn live_circles(&self) -> Vec<&CircleOverlay> {
        let mut live: Vec<(OverlayId, &CircleOverlay)> = Vec::new();
        for op in &self.ops {
            match op {
                MapOp::AddCircle { id, circle } => live.push((*id, circle)),
                MapOp::RemoveOverlay { id } => live.retain(|(live_id, _)| live_id != id),
                _ => {}
            }
        }
        live.into_iter().map(|(_, circle)| circle).collect()
    }

    /// User markers added and not yet removed.
    #[must_use]
    pub fn live_user_markers(&self) -> Vec<Coordinate> {
        let mut live: Vec<(MarkerId, Coordinate)> = Vec::new();
        for op in &self.ops {
            match op {
                MapOp::AddUserMarker { id, at } => live.push((*id, *at)),
                MapOp::RemoveMarker { id } => live.retain(|(live_id, _)| live_id != id),
                _ => {}
            }
        }
        live.into_iter().map(|(_, at)| at).collect()
    }

    /// Most recent viewport change.
    #[must_use]
    pub fn last_view(&self) -> Option<&Viewport> {
        self.ops.iter().rev().find_map(|op| match op {
            MapOp::SetView { viewport } => Some(viewport),
            _ => None,
        })
    }

    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

impl MapSurface for RecordingSurface {
    fn add_marker(&mut self, marker: &MarkerSpec) -> MarkerId {
        let id = MarkerId(self.next_id());
        self.ops.push(MapOp::AddMarker {
            id,
            marker: marker.clone(),
        });
        id
    }

    fn remove_marker(&mut self, id: MarkerId) {
        self.ops.push(MapOp::RemoveMarker { id });
    }

    fn open_popup(&mut self, id: MarkerId) {
        self.ops.push(MapOp::OpenPopup { id });
    }

    fn close_popup(&mut self, id: MarkerId) {
        self.ops.push(MapOp::ClosePopup { id });
    }

    fn set_view(&mut self, viewport: &Viewport) {
        self.ops.push(MapOp::SetView {
            viewport: *viewport,
        });
    }

    fn add_circle(&mut self, circle: &CircleOverlay) -> OverlayId {
        let id = OverlayId(self.next_id());
        self.ops.push(MapOp::AddCircle {
            id,
            circle: *circle,
        });
        id
    }

    fn remove_overlay(&mut self, id: OverlayId) {
        self.ops.push(MapOp::RemoveOverlay { id });
    }

    fn add_user_marker(&mut self, at: Coordinate) -> MarkerId {
        let id = MarkerId(self.next_id());
        self.ops.push(MapOp::AddUserMarker { id, at });
        id
    }
}

use chrono::{DateTime, Utc};
use maud::{html, Markup};
use pantrymap_core::{Coordinate, LatLngBounds, PantryStatus, ViewPreset};
use serde::Serialize;

use super::icon::marker_icon;
use super::{MapScene, MarkerSpec, Viewport};
use crate::engine::VisiblePantry;
use crate::list::FULLNESS_UNKNOWN;
use crate::time_ago::days_ago;

/// Details popup attached to a pantry marker.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PopupContent {
    pub name: String,
    pub address: String,
    pub updated_text: String,
    pub distance_text: Option<String>,
    pub fullness_text: Option<String>,
    pub status: PantryStatus,
    pub details_href: String,
}

impl PopupContent {
    #[must_use]
    pub fn to_html(&self) -> Markup {
        html! {
            div.pantry-popup {
                h4 { (self.name) }
                p.popup-address {
                    i.fas.fa-map-marker-alt {}
                    " " (self.address)
                }
                p.popup-updated {
                    i.fas.fa-clock {}
                    " Updated " (self.updated_text)
                }
                p.popup-fullness {
                    "Last Reported Status: "
                    strong { (self.fullness_text.as_deref().unwrap_or(FULLNESS_UNKNOWN)) }
                }
                @if let Some(distance) = &self.distance_text {
                    p.popup-distance {
                        i.fas.fa-location-arrow {}
                        " " (distance)
                    }
                }
                div.popup-actions {
                    span class={ "pantry-status " (self.status.css_class()) } { (self.status.label()) }
                    a.pantry-details href=(self.details_href) {
                        i.fas.fa-info-circle {}
                        " Details"
                    }
                }
            }
        }
    }
}

/// Result of a places search or autocomplete selection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaceGeometry {
    pub location: Coordinate,
    pub viewport: Option<LatLngBounds>,
}

/// Viewport for a place: its own bounds when it has them, else a close-up.
#[must_use]
pub fn place_view(geometry: &PlaceGeometry, preset: &ViewPreset) -> Viewport {
    match geometry.viewport {
        Some(bounds) => Viewport::Fit {
            bounds,
            max_zoom: None,
        },
        None => Viewport::Center {
            center: geometry.location,
            zoom: preset.place_zoom,
        },
    }
}

/// One marker per visible pantry, framed together with the user location.
///
/// With no visible pantries the viewport is left unchanged.
#[must_use]
pub fn build_scene(
    visible: &[VisiblePantry],
    user: Option<Coordinate>,
    preset: &ViewPreset,
    now: DateTime<Utc>,
) -> MapScene {
    let markers: Vec<MarkerSpec> = visible
        .iter()
        .map(|v| marker_spec(v, preset, now))
        .collect();

    let viewport = LatLngBounds::from_points(markers.iter().map(|m| m.position)).map(|mut bounds| {
        if let Some(user) = user {
            bounds.extend(user);
        }
        Viewport::Fit {
            bounds,
            max_zoom: Some(preset.max_fit_zoom),
        }
    });

    MapScene { markers, viewport }
}

fn marker_spec(visible: &VisiblePantry, preset: &ViewPreset, now: DateTime<Utc>) -> MarkerSpec {
    let record = &visible.record;
    let color = record.marker_color().to_string();
    MarkerSpec {
        pantry_id: record.id,
        position: record.coordinate(),
        title: record.name.clone(),
        icon: marker_icon(preset.marker_style, &color),
        color,
        popup: PopupContent {
            name: record.name.clone(),
            address: record.address_or_placeholder().to_string(),
            updated_text: days_ago(record.last_updated, now),
            distance_text: visible
                .distance_miles
                .map(|d| format!("{d:.1} miles away")),
            fullness_text: record.fullness_text(),
            status: record.status_or_unknown(),
            details_href: record.details_path(),
        },
    }
}

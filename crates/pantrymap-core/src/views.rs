//! Named view presets.
//!
//! A preset captures everything that differs between deployments of the
//! pantry map: starting centre and zoom, zoom levels used when framing,
//! marker look, whether the status filter is offered, and the initial
//! filter state.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::filter::FilterState;
use crate::geo::Coordinate;
use crate::ConfigError;

pub const DEFAULT_VIEW_NAME: &str = "default";

const MAX_ZOOM: u8 = 22;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerStyle {
    /// Round SVG badge in the status colour.
    #[default]
    Badge,
    /// Pin glyph with the status colour as background.
    Pin,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewPreset {
    pub name: String,
    pub default_center: Coordinate,
    pub default_zoom: u8,
    /// Upper zoom bound when fitting markers, so one marker cannot over-zoom.
    pub max_fit_zoom: u8,
    pub focus_zoom: u8,
    pub place_zoom: u8,
    pub user_zoom: u8,
    pub marker_style: MarkerStyle,
    pub status_filter_enabled: bool,
    pub radius_overlay: bool,
    pub filter: FilterState,
}

impl Default for ViewPreset {
    fn default() -> Self {
        Self {
            name: DEFAULT_VIEW_NAME.to_string(),
            // Geographic centre of the contiguous US.
            default_center: Coordinate::new(39.8283, -98.5795),
            default_zoom: 4,
            max_fit_zoom: 10,
            focus_zoom: 16,
            place_zoom: 15,
            user_zoom: 13,
            marker_style: MarkerStyle::Badge,
            status_filter_enabled: true,
            radius_overlay: true,
            filter: FilterState::default(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ViewsFile {
    pub views: Vec<ViewPreset>,
}

/// Load and validate view presets from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_views(path: &Path) -> Result<ViewsFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ViewsFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let views_file: ViewsFile = serde_yaml::from_str(&content)?;
    validate_views(&views_file)?;
    Ok(views_file)
}

/// Resolve the preset named `name`.
///
/// A missing file falls back to the built-in default preset, which is the
/// only name that resolves in that case.
///
/// # Errors
///
/// Returns `ConfigError` if the file exists but is invalid, or the name is
/// not defined.
pub fn resolve_view(path: &Path, name: &str) -> Result<ViewPreset, ConfigError> {
    let views = if path.exists() {
        load_views(path)?
    } else {
        ViewsFile::default()
    };
    pick_view(views, name)
}

fn pick_view(views: ViewsFile, name: &str) -> Result<ViewPreset, ConfigError> {
    if let Some(found) = views.views.into_iter().find(|v| v.name == name) {
        return Ok(found);
    }
    if name == DEFAULT_VIEW_NAME {
        return Ok(ViewPreset::default());
    }
    Err(ConfigError::UnknownView(name.to_string()))
}

fn validate_views(views_file: &ViewsFile) -> Result<(), ConfigError> {
    let mut seen = HashSet::new();

    for view in &views_file.views {
        if view.name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "view name must be non-empty".to_string(),
            ));
        }

        if !seen.insert(view.name.as_str()) {
            return Err(ConfigError::Validation(format!(
                "duplicate view name: '{}'",
                view.name
            )));
        }

        if !view.default_center.is_valid() {
            return Err(ConfigError::Validation(format!(
                "view '{}' has an out-of-range default_center",
                view.name
            )));
        }

        let zooms = [
            ("default_zoom", view.default_zoom),
            ("max_fit_zoom", view.max_fit_zoom),
            ("focus_zoom", view.focus_zoom),
            ("place_zoom", view.place_zoom),
            ("user_zoom", view.user_zoom),
        ];
        if let Some((field, zoom)) = zooms.iter().find(|(_, z)| *z > MAX_ZOOM) {
            return Err(ConfigError::Validation(format!(
                "view '{}' has {field} {zoom}; must be 0..={MAX_ZOOM}",
                view.name
            )));
        }

        let radius = view.filter.radius_miles;
        if !radius.is_finite() || radius < 0.0 {
            return Err(ConfigError::Validation(format!(
                "view '{}' has invalid radius {radius}",
                view.name
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "views_test.rs"]
mod tests;

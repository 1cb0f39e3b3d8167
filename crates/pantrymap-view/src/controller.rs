//! Pantry view controller.
//!
//! Owns the view state and drives the pipeline: engine, then list, then map.
//! Data loads and location fixes are independent inputs; each one replaces
//! its slice of state and re-runs the pipeline, so the last write wins.

use std::time::Duration;

use chrono::{DateTime, Utc};
use pantrymap_core::{Coordinate, FilterState, PantryRecord, SortKey, StatusFilter, ViewPreset};

use crate::engine::{compute_visible, VisiblePantry};
use crate::geolocation::{locate, GeolocationProvider, LocateOutcome, LocateTrigger, LocationNotice};
use crate::list::{render_list, ListView};
use crate::loader::{LoadError, PantrySource};
use crate::map::{build_scene, place_view, MapRenderer, MapSurface, PlaceGeometry, Viewport};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ViewState {
    /// Full list from the last successful load.
    pub pantries: Vec<PantryRecord>,
    /// Whether any load has succeeded.
    pub loaded: bool,
    pub filter: FilterState,
    pub user_location: Option<Coordinate>,
    pub visible: Vec<VisiblePantry>,
    pub list: ListView,
}

pub struct PantryView<S: MapSurface> {
    state: ViewState,
    renderer: MapRenderer,
    surface: S,
    preset: ViewPreset,
    clock: fn() -> DateTime<Utc>,
}

impl<S: MapSurface> PantryView<S> {
    /// Frame the preset's default centre and start in the loading state.
    pub fn new(mut surface: S, preset: ViewPreset) -> Self {
        surface.set_view(&Viewport::Center {
            center: preset.default_center,
            zoom: preset.default_zoom,
        });

        Self {
            state: ViewState {
                filter: preset.filter,
                ..ViewState::default()
            },
            renderer: MapRenderer::new(),
            surface,
            preset,
            clock: Utc::now,
        }
    }

    /// Replace the clock used for relative timestamps.
    #[must_use]
    pub fn with_clock(mut self, clock: fn() -> DateTime<Utc>) -> Self {
        self.clock = clock;
        self
    }

    #[must_use]
    pub fn state(&self) -> &ViewState {
        &self.state
    }

    #[must_use]
    pub fn preset(&self) -> &ViewPreset {
        &self.preset
    }

    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    #[must_use]
    pub fn into_surface(self) -> S {
        self.surface
    }

    /// Apply the result of a data fetch.
    ///
    /// A failure keeps the previous list and map. The list shows the load
    /// error only when nothing has ever loaded.
    pub fn apply_load(&mut self, result: Result<Vec<PantryRecord>, LoadError>) {
        match result {
            Ok(pantries) => {
                tracing::info!(count = pantries.len(), "loaded pantries");
                self.state.pantries = pantries;
                self.state.loaded = true;
                self.refresh();
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to load pantries");
                if !self.state.loaded {
                    self.state.list = ListView::LoadError;
                }
            }
        }
    }

    /// Apply the outcome of a locate request. Returns the notice to show,
    /// if any.
    pub fn apply_location(&mut self, outcome: LocateOutcome) -> Option<LocationNotice> {
        match outcome {
            LocateOutcome::Located(at) => {
                self.state.user_location = Some(at);
                self.refresh();
                // A non-empty refresh has already framed the user with the pantries.
                let zoom = self
                    .state
                    .visible
                    .is_empty()
                    .then_some(self.preset.user_zoom);
                let radius = self.radius_overlay();
                self.renderer.show_user(&mut self.surface, at, radius, zoom);
                None
            }
            LocateOutcome::Failed { notice, .. } => notice,
        }
    }

    /// Change the search radius. Negative or non-finite values are ignored.
    pub fn set_radius(&mut self, miles: f64) {
        if !miles.is_finite() || miles < 0.0 {
            tracing::warn!(miles, "ignoring invalid radius");
            return;
        }

        self.state.filter.radius_miles = miles;
        if let Some(at) = self.state.user_location {
            let radius = self.radius_overlay();
            self.renderer.show_user(&mut self.surface, at, radius, None);
        }
        self.refresh();
    }

    /// Change the status filter. Returns `false` when this view does not
    /// offer one.
    pub fn set_status_filter(&mut self, status: StatusFilter) -> bool {
        if !self.preset.status_filter_enabled {
            tracing::debug!(%status, view = %self.preset.name, "status filter disabled");
            return false;
        }

        self.state.filter.status = status;
        self.refresh();
        true
    }

    pub fn set_sort(&mut self, sort: SortKey) {
        self.state.filter.sort = sort;
        self.refresh();
    }

    /// Recompute the visible subset and redraw the list and map.
    ///
    /// Does nothing to the map until a load has succeeded.
    pub fn refresh(&mut self) {
        if !self.state.loaded {
            return;
        }

        let now = (self.clock)();
        self.state.visible = compute_visible(
            &self.state.pantries,
            &self.state.filter,
            self.state.user_location,
        );
        self.state.list = render_list(&self.state.visible, now);

        let scene = build_scene(
            &self.state.visible,
            self.state.user_location,
            &self.preset,
            now,
        );
        self.renderer.render(&mut self.surface, &scene);

        tracing::debug!(
            total = self.state.pantries.len(),
            visible = self.state.visible.len(),
            "refreshed pantry view"
        );
    }

    /// Centre on a pantry and open its popup, as a list entry click does.
    pub fn focus_pantry(&mut self, pantry_id: i64) -> bool {
        self.renderer
            .focus(&mut self.surface, pantry_id, self.preset.focus_zoom)
    }

    /// Open a pantry's popup, as a marker click does.
    pub fn open_pantry_popup(&mut self, pantry_id: i64) -> bool {
        self.renderer.open_popup(&mut self.surface, pantry_id)
    }

    /// Move the map to a places search result.
    pub fn show_place(&mut self, geometry: &PlaceGeometry) {
        self.surface.set_view(&place_view(geometry, &self.preset));
    }

    /// Initial load: fetch data and silently locate the user concurrently,
    /// applying each result as it arrives.
    pub async fn run_initial<P, G>(&mut self, source: &P, provider: &G, timeout: Duration)
    where
        P: PantrySource,
        G: GeolocationProvider,
    {
        let fetch = source.fetch_pantries();
        let located = locate(provider, timeout, LocateTrigger::PageLoad);
        tokio::pin!(fetch, located);

        let mut fetch_done = false;
        let mut locate_done = false;
        while !(fetch_done && locate_done) {
            tokio::select! {
                result = &mut fetch, if !fetch_done => {
                    fetch_done = true;
                    self.apply_load(result);
                }
                outcome = &mut located, if !locate_done => {
                    locate_done = true;
                    self.apply_location(outcome);
                }
            }
        }
    }

    /// User-initiated locate. Returns the notice to show on failure.
    pub async fn find_near_me<G: GeolocationProvider>(
        &mut self,
        provider: &G,
        timeout: Duration,
    ) -> Option<LocationNotice> {
        let outcome = locate(provider, timeout, LocateTrigger::UserAction).await;
        self.apply_location(outcome)
    }

    fn radius_overlay(&self) -> Option<f64> {
        self.preset
            .radius_overlay
            .then_some(self.state.filter.radius_miles)
    }
}

#[cfg(test)]
#[path = "controller_test.rs"]
mod tests;

//! Filter/sort engine.
//!
//! Derives the visible subset from the full pantry list, the filter state,
//! and the user's location. Every call builds a fresh `Vec`; callers replace
//! their previous visible set wholesale.

use std::cmp::Ordering;

use pantrymap_core::{haversine_miles, Coordinate, FilterState, PantryRecord, SortKey};
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// A pantry that survived filtering, with its distance from the user when known.
#[derive(Debug, Clone, PartialEq)]
pub struct VisiblePantry {
    pub record: PantryRecord,
    pub distance_miles: Option<f64>,
}

#[must_use]
pub fn distance_from(user: Option<Coordinate>, record: &PantryRecord) -> Option<f64> {
    user.map(|u| haversine_miles(u, record.coordinate()))
}

/// Filter then sort `pantries` for display.
///
/// Filtering keeps input order. Sorting is stable, so records that compare
/// equal stay in their input order.
#[must_use]
pub fn compute_visible(
    pantries: &[PantryRecord],
    filter: &FilterState,
    user: Option<Coordinate>,
) -> Vec<VisiblePantry> {
    let mut visible: Vec<VisiblePantry> = pantries
        .iter()
        .filter(|p| filter.status.matches(p.status_or_unknown()))
        .map(|p| VisiblePantry {
            record: p.clone(),
            distance_miles: distance_from(user, p),
        })
        .filter(|v| within_radius(v.distance_miles, filter.radius_miles))
        .collect();

    sort_visible(&mut visible, filter.sort);
    visible
}

/// Without a user location nothing is excluded by distance.
fn within_radius(distance_miles: Option<f64>, radius_miles: f64) -> bool {
    distance_miles.is_none_or(|d| d <= radius_miles)
}

/// Sort in place by `key`.
///
/// `Distance` without distances (no user location) falls back to name order.
pub fn sort_visible(visible: &mut [VisiblePantry], key: SortKey) {
    match key {
        SortKey::Distance if visible.iter().all(|v| v.distance_miles.is_some()) => {
            visible.sort_by(|a, b| {
                let da = a.distance_miles.unwrap_or(f64::INFINITY);
                let db = b.distance_miles.unwrap_or(f64::INFINITY);
                da.total_cmp(&db)
            });
        }
        SortKey::Distance | SortKey::Name => {
            visible.sort_by(|a, b| locale_cmp(&a.record.name, &b.record.name));
        }
        // `None < Some`, so reversing puts never-updated pantries last.
        SortKey::Updated => {
            visible.sort_by(|a, b| b.record.last_updated.cmp(&a.record.last_updated));
        }
        SortKey::Status => visible.sort_by_key(|v| v.record.status_or_unknown().priority()),
    }
}

/// Collation-style name ordering. Letters compare by base form first, so
/// accents and case are ignored; unaccented sorts before accented, then at the
/// first case-only difference the lowercase letter sorts first.
#[must_use]
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    base_letters(a)
        .cmp(base_letters(b))
        .then_with(|| folded(a).cmp(folded(b)))
        .then_with(|| {
            a.nfd()
                .zip(b.nfd())
                .find(|(x, y)| x != y)
                .map_or(Ordering::Equal, |(x, y)| {
                    x.is_uppercase().cmp(&y.is_uppercase())
                })
        })
        .then_with(|| a.cmp(b))
}

fn base_letters(s: &str) -> impl Iterator<Item = char> + '_ {
    folded(s).filter(|c| !is_combining_mark(*c))
}

fn folded(s: &str) -> impl Iterator<Item = char> + '_ {
    s.nfd().flat_map(char::to_lowercase)
}

#[cfg(test)]
#[path = "engine_test.rs"]
mod tests;

//! Projects the visible subset into the pantry list.

use chrono::{DateTime, Utc};
use maud::{html, Markup};
use pantrymap_core::PantryStatus;

use crate::engine::VisiblePantry;
use crate::time_ago::{days_ago, report_age};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmptyState {
    pub icon: &'static str,
    pub title: &'static str,
    pub message: &'static str,
}

pub const NO_PANTRIES: EmptyState = EmptyState {
    icon: "fa-search",
    title: "No pantries found",
    message: "Try adjusting your search criteria or expanding your search radius.",
};

pub const LOAD_FAILED: EmptyState = EmptyState {
    icon: "fa-exclamation-triangle",
    title: "Error loading pantries",
    message: "Unable to load pantry data. Please try again later.",
};

/// Shown in place of a fullness report when none exists.
pub const FULLNESS_UNKNOWN: &str = "Unknown";

pub const LOADING: EmptyState = EmptyState {
    icon: "fa-spinner",
    title: "Loading pantries",
    message: "Fetching the latest pantry list.",
};

#[derive(Debug, Clone, PartialEq)]
pub struct ListEntry {
    pub id: i64,
    pub name: String,
    pub status: PantryStatus,
    pub address: String,
    /// `None` when the user's location is unknown.
    pub distance_text: Option<String>,
    /// Latest fullness report; rendered as "Unknown" when `None`.
    pub fullness_text: Option<String>,
    pub updated_text: String,
    pub reported_text: String,
    pub details_href: String,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum ListView {
    /// Nothing fetched yet.
    #[default]
    Loading,
    Entries(Vec<ListEntry>),
    Empty,
    LoadError,
}

impl ListView {
    #[must_use]
    pub fn entries(&self) -> &[ListEntry] {
        match self {
            ListView::Entries(entries) => entries,
            _ => &[],
        }
    }

    #[must_use]
    pub fn empty_state(&self) -> Option<EmptyState> {
        match self {
            ListView::Entries(_) => None,
            ListView::Loading => Some(LOADING),
            ListView::Empty => Some(NO_PANTRIES),
            ListView::LoadError => Some(LOAD_FAILED),
        }
    }

    /// Value shown in the results counters.
    #[must_use]
    pub fn results_count(&self) -> usize {
        self.entries().len()
    }

    #[must_use]
    pub fn to_html(&self) -> Markup {
        if let Some(state) = self.empty_state() {
            return render_empty_state(state);
        }

        html! {
            @for entry in self.entries() {
                (render_entry(entry))
            }
        }
    }

    /// Plain-text rendering, one block per pantry.
    #[must_use]
    pub fn to_text(&self) -> String {
        if let Some(state) = self.empty_state() {
            return format!("{}\n{}\n", state.title, state.message);
        }

        let mut out = String::new();
        for entry in self.entries() {
            out.push_str(&format!("{} [{}]\n", entry.name, entry.status.label()));
            out.push_str(&format!("  {}\n", entry.address));
            if let Some(distance) = &entry.distance_text {
                out.push_str(&format!("  {distance}\n"));
            }
            out.push_str(&format!(
                "  Last Reported Status: {}\n",
                entry.fullness_text.as_deref().unwrap_or(FULLNESS_UNKNOWN)
            ));
            out.push_str(&format!(
                "  updated {} (reported {})\n",
                entry.updated_text, entry.reported_text
            ));
            out.push_str(&format!("  {}\n", entry.details_href));
        }
        out
    }
}

#[must_use]
pub fn render_list(visible: &[VisiblePantry], now: DateTime<Utc>) -> ListView {
    if visible.is_empty() {
        return ListView::Empty;
    }

    ListView::Entries(visible.iter().map(|v| list_entry(v, now)).collect())
}

fn list_entry(visible: &VisiblePantry, now: DateTime<Utc>) -> ListEntry {
    let record = &visible.record;
    ListEntry {
        id: record.id,
        name: record.name.clone(),
        status: record.status_or_unknown(),
        address: record.address_or_placeholder().to_string(),
        distance_text: visible.distance_miles.map(|d| format!("{d:.1} miles")),
        fullness_text: record.fullness_text(),
        updated_text: days_ago(record.last_updated, now),
        reported_text: report_age(record.last_updated, now),
        details_href: record.details_path(),
    }
}

fn render_empty_state(state: EmptyState) -> Markup {
    html! {
        div.empty-state {
            i class={ "fas " (state.icon) } {}
            h4 { (state.title) }
            p { (state.message) }
        }
    }
}

fn render_entry(entry: &ListEntry) -> Markup {
    html! {
        li class={ "pantry-card " (entry.status.as_str()) } data-pantry-id=(entry.id) {
            div.pantry-header {
                h3.pantry-name { (entry.name) }
                span class={ "pantry-status " (entry.status.css_class()) } { (entry.status.label()) }
            }
            div.pantry-address {
                i.fas.fa-map-marker-alt {}
                " " (entry.address)
            }
            div.pantry-fullness {
                "Last Reported Status: "
                strong { (entry.fullness_text.as_deref().unwrap_or(FULLNESS_UNKNOWN)) }
            }
            div.pantry-meta {
                @if let Some(distance) = &entry.distance_text {
                    span.pantry-distance {
                        i.fas.fa-location-arrow {}
                        " " (distance)
                    }
                }
                span.pantry-updated title={ "Reported " (entry.reported_text) } {
                    i.fas.fa-clock {}
                    " " (entry.updated_text)
                }
            }
            div.pantry-actions {
                button.show-on-map type="button" data-pantry-id=(entry.id) {
                    i.fas.fa-map-marker-alt {}
                    " Show on Map"
                }
                a.pantry-details href=(entry.details_href) {
                    i.fas.fa-info-circle {}
                    " Details"
                }
            }
        }
    }
}

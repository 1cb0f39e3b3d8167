//! User-controlled filter state.

use serde::{Deserialize, Serialize};

use crate::pantry::PantryStatus;

pub const DEFAULT_RADIUS_MILES: f64 = 10.0;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {kind} '{value}'")]
pub struct ParseFilterError {
    pub kind: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Distance,
    Updated,
    Name,
    Status,
}

impl std::fmt::Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SortKey::Distance => write!(f, "distance"),
            SortKey::Updated => write!(f, "updated"),
            SortKey::Name => write!(f, "name"),
            SortKey::Status => write!(f, "status"),
        }
    }
}

impl std::str::FromStr for SortKey {
    type Err = ParseFilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "distance" => Ok(SortKey::Distance),
            "updated" => Ok(SortKey::Updated),
            "name" => Ok(SortKey::Name),
            "status" => Ok(SortKey::Status),
            _ => Err(ParseFilterError {
                kind: "sort key",
                value: s.to_string(),
            }),
        }
    }
}

/// Which statuses survive filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(PantryStatus),
}

impl StatusFilter {
    #[must_use]
    pub fn matches(self, status: PantryStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(wanted) => wanted == status,
        }
    }
}

impl std::fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StatusFilter::All => write!(f, "all"),
            StatusFilter::Only(status) => write!(f, "{status}"),
        }
    }
}

impl std::str::FromStr for StatusFilter {
    type Err = ParseFilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(StatusFilter::All);
        }
        s.parse::<PantryStatus>()
            .map(StatusFilter::Only)
            .map_err(|_| ParseFilterError {
                kind: "status filter",
                value: s.to_string(),
            })
    }
}

impl Serialize for StatusFilter {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for StatusFilter {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterState {
    pub radius_miles: f64,
    pub status: StatusFilter,
    pub sort: SortKey,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            radius_miles: DEFAULT_RADIUS_MILES,
            status: StatusFilter::All,
            sort: SortKey::Distance,
        }
    }
}

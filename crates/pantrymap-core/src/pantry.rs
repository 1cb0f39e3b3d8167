//! Pantry records as served by the backend's `/get_pantry_data` endpoint.

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::geo::Coordinate;

pub const ADDRESS_PLACEHOLDER: &str = "Address not available";
/// Shown when a pantry has never received a status report.
pub const NEVER_PLACEHOLDER: &str = "Never";
/// Shown when the age of the last update cannot be computed.
pub const UNKNOWN_PLACEHOLDER: &str = "Unknown";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PantryStatus {
    Full,
    Low,
    Empty,
    Unknown,
}

impl PantryStatus {
    pub const ALL: [PantryStatus; 4] = [
        PantryStatus::Full,
        PantryStatus::Low,
        PantryStatus::Empty,
        PantryStatus::Unknown,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            PantryStatus::Full => "full",
            PantryStatus::Low => "low",
            PantryStatus::Empty => "empty",
            PantryStatus::Unknown => "unknown",
        }
    }

    /// Sort priority: stocked pantries first.
    #[must_use]
    pub const fn priority(self) -> u8 {
        match self {
            PantryStatus::Full => 0,
            PantryStatus::Low => 1,
            PantryStatus::Empty => 2,
            PantryStatus::Unknown => 3,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            PantryStatus::Full => "Full",
            PantryStatus::Low => "Low",
            PantryStatus::Empty => "Empty",
            PantryStatus::Unknown => UNKNOWN_PLACEHOLDER,
        }
    }

    #[must_use]
    pub const fn css_class(self) -> &'static str {
        match self {
            PantryStatus::Full => "status-full",
            PantryStatus::Low => "status-low",
            PantryStatus::Empty => "status-empty",
            PantryStatus::Unknown => "status-unknown",
        }
    }

    /// Green, yellow, red, or gray.
    #[must_use]
    pub const fn marker_color(self) -> &'static str {
        match self {
            PantryStatus::Full => "#28a745",
            PantryStatus::Low => "#ffc107",
            PantryStatus::Empty => "#dc3545",
            PantryStatus::Unknown => "#6c757d",
        }
    }

    /// Interprets a reported fullness percentage.
    ///
    /// Thresholds match the backend's report model: above two thirds is full,
    /// above one third is low.
    #[must_use]
    pub fn from_fullness(fullness: Option<i32>) -> Self {
        match fullness {
            None => PantryStatus::Unknown,
            Some(f) if f > 66 => PantryStatus::Full,
            Some(f) if f > 33 => PantryStatus::Low,
            Some(_) => PantryStatus::Empty,
        }
    }
}

impl std::fmt::Display for PantryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PantryStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "full" => Ok(PantryStatus::Full),
            "low" => Ok(PantryStatus::Low),
            "empty" => Ok(PantryStatus::Empty),
            "unknown" => Ok(PantryStatus::Unknown),
            other => Err(format!(
                "unknown status '{other}'; expected full, low, empty, or unknown"
            )),
        }
    }
}

impl Serialize for PantryStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for PantryStatus {
    /// Unrecognised strings become `Unknown` rather than failing the whole list.
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(raw.parse().unwrap_or(PantryStatus::Unknown))
    }
}

/// One food pantry. Read-only on the client side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PantryRecord {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub address: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub status: Option<PantryStatus>,
    #[serde(
        default,
        alias = "lastUpdated",
        deserialize_with = "deserialize_timestamp"
    )]
    pub last_updated: Option<DateTime<Utc>>,
    #[serde(default)]
    pub marker_color: Option<String>,
    /// Latest reported fullness percentage, when the backend sends one.
    #[serde(default)]
    pub fullness: Option<i32>,
}

impl PantryRecord {
    #[must_use]
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }

    /// Explicit status, else one derived from `fullness`, else `Unknown`.
    #[must_use]
    pub fn status_or_unknown(&self) -> PantryStatus {
        match self.status {
            Some(status) => status,
            None => PantryStatus::from_fullness(self.fullness),
        }
    }

    /// Latest report as `"N% Full"`, or `None` when nothing was reported.
    #[must_use]
    pub fn fullness_text(&self) -> Option<String> {
        self.fullness.map(|pct| format!("{pct}% Full"))
    }

    #[must_use]
    pub fn address_or_placeholder(&self) -> &str {
        self.address
            .as_deref()
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .unwrap_or(ADDRESS_PLACEHOLDER)
    }

    /// Backend-supplied colour when it is a hex colour, else the status colour.
    #[must_use]
    pub fn marker_color(&self) -> &str {
        self.marker_color
            .as_deref()
            .filter(|c| is_hex_color(c))
            .unwrap_or_else(|| self.status_or_unknown().marker_color())
    }

    /// Relative link to the pantry's details page.
    #[must_use]
    pub fn details_path(&self) -> String {
        format!("/location/{}", self.id)
    }
}

fn is_hex_color(value: &str) -> bool {
    value.strip_prefix('#').is_some_and(|hex| {
        matches!(hex.len(), 3 | 4 | 6 | 8) && hex.chars().all(|c| c.is_ascii_hexdigit())
    })
}

/// Accepts RFC 3339, RFC 2822, a naive ISO-8601 datetime (taken as UTC), or
/// Unix seconds (whole or fractional).
///
/// Anything else becomes `None` so one bad record cannot fail the whole list.
fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Seconds(i64),
        FractionalSeconds(f64),
        Text(String),
        Other(IgnoredAny),
    }

    let Some(raw) = Option::<Raw>::deserialize(deserializer)? else {
        return Ok(None);
    };

    let parsed = match raw {
        Raw::Seconds(secs) => Utc.timestamp_opt(secs, 0).single(),
        Raw::FractionalSeconds(secs) => from_fractional_seconds(secs),
        Raw::Text(text) => {
            let text = text.trim();
            if text.is_empty() {
                return Ok(None);
            }
            let parsed = parse_timestamp(text);
            if parsed.is_none() {
                tracing::warn!(value = text, "ignoring unparseable pantry timestamp");
            }
            parsed
        }
        Raw::Other(_) => {
            tracing::warn!("ignoring non-string, non-numeric pantry timestamp");
            None
        }
    };
    Ok(parsed)
}

fn parse_timestamp(text: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
        return Some(parsed.with_timezone(&Utc));
    }
    if let Ok(parsed) = DateTime::parse_from_rfc2822(text) {
        return Some(parsed.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()
        .map(|naive| naive.and_utc())
}

fn from_fractional_seconds(secs: f64) -> Option<DateTime<Utc>> {
    if !secs.is_finite() {
        return None;
    }
    #[allow(clippy::cast_possible_truncation)]
    let millis = (secs * 1000.0).round() as i64;
    Utc.timestamp_millis_opt(millis).single()
}

//! Great-circle distance and map bounds.
//!
//! Distances use a spherical earth of radius [`EARTH_RADIUS_MILES`]. That is
//! accurate enough for "miles away" labels and radius filtering; it is not a
//! geodesic solver.

use serde::{Deserialize, Serialize};

/// Mean earth radius used for every distance in the crate.
pub const EARTH_RADIUS_MILES: f64 = 3959.0;

const METERS_PER_MILE: f64 = 1609.34;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    #[must_use]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// True when both components are finite and inside their degree ranges.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.4},{:.4}", self.lat, self.lng)
    }
}

impl std::str::FromStr for Coordinate {
    type Err = String;

    /// Parses `"LAT,LNG"` in decimal degrees.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (lat, lng) = s
            .split_once(',')
            .ok_or_else(|| format!("expected LAT,LNG but got '{s}'"))?;
        let lat = lat
            .trim()
            .parse::<f64>()
            .map_err(|e| format!("invalid latitude '{lat}': {e}"))?;
        let lng = lng
            .trim()
            .parse::<f64>()
            .map_err(|e| format!("invalid longitude '{lng}': {e}"))?;
        let coordinate = Self::new(lat, lng);
        if coordinate.is_valid() {
            Ok(coordinate)
        } else {
            Err(format!("coordinate out of range: {s}"))
        }
    }
}

/// Haversine distance in miles between two points given in degrees.
///
/// Pure and deterministic: identical inputs give bit-identical output.
#[must_use]
pub fn haversine_miles(from: Coordinate, to: Coordinate) -> f64 {
    let lat1 = from.lat.to_radians();
    let lat2 = to.lat.to_radians();
    let d_lat = (to.lat - from.lat).to_radians();
    let d_lng = (to.lng - from.lng).to_radians();

    let half_lat = (d_lat / 2.0).sin();
    let half_lng = (d_lng / 2.0).sin();
    let a = half_lat * half_lat + lat1.cos() * lat2.cos() * half_lng * half_lng;
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_MILES * c
}

#[must_use]
pub fn miles_to_meters(miles: f64) -> f64 {
    miles * METERS_PER_MILE
}

/// Axis-aligned lat/lng rectangle. Does not handle antimeridian wrap.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLngBounds {
    pub south_west: Coordinate,
    pub north_east: Coordinate,
}

impl LatLngBounds {
    #[must_use]
    pub const fn from_point(point: Coordinate) -> Self {
        Self {
            south_west: point,
            north_east: point,
        }
    }

    /// Smallest bounds containing every point, or `None` for an empty input.
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Coordinate>,
    {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut bounds = Self::from_point(first);
        for point in iter {
            bounds.extend(point);
        }
        Some(bounds)
    }

    pub fn extend(&mut self, point: Coordinate) {
        self.south_west.lat = self.south_west.lat.min(point.lat);
        self.south_west.lng = self.south_west.lng.min(point.lng);
        self.north_east.lat = self.north_east.lat.max(point.lat);
        self.north_east.lng = self.north_east.lng.max(point.lng);
    }

    #[must_use]
    pub fn contains(&self, point: Coordinate) -> bool {
        (self.south_west.lat..=self.north_east.lat).contains(&point.lat)
            && (self.south_west.lng..=self.north_east.lng).contains(&point.lng)
    }

    #[must_use]
    pub fn center(&self) -> Coordinate {
        Coordinate::new(
            (self.south_west.lat + self.north_east.lat) / 2.0,
            (self.south_west.lng + self.north_east.lng) / 2.0,
        )
    }

    /// Degenerate bounds covering a single point.
    #[must_use]
    pub fn is_point(&self) -> bool {
        self.south_west == self.north_east
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NASHVILLE: Coordinate = Coordinate::new(36.1627, -86.7816);

    #[test]
    fn distance_to_self_is_zero() {
        assert!(haversine_miles(NASHVILLE, NASHVILLE).abs() < f64::EPSILON);
    }

    #[test]
    fn distance_is_symmetric() {
        let points = [
            NASHVILLE,
            Coordinate::new(39.8283, -98.5795),
            Coordinate::new(-33.8688, 151.2093),
            Coordinate::new(64.1466, -21.9426),
        ];
        for a in points {
            for b in points {
                assert_eq!(
                    haversine_miles(a, b).to_bits(),
                    haversine_miles(b, a).to_bits(),
                    "asymmetric distance between {a} and {b}"
                );
            }
        }
    }

    #[test]
    fn one_degree_of_longitude_at_nashville() {
        let east = Coordinate::new(36.1627, -85.7816);
        let d = haversine_miles(NASHVILLE, east);
        assert!((d - 55.9).abs() < 0.5, "got {d}");
    }

    #[test]
    fn distance_is_reproducible() {
        let east = Coordinate::new(36.1627, -85.7816);
        let first = haversine_miles(NASHVILLE, east);
        let second = haversine_miles(NASHVILLE, east);
        assert_eq!(first.to_bits(), second.to_bits());
    }

    #[test]
    fn ten_miles_in_meters() {
        assert!((miles_to_meters(10.0) - 16_093.4).abs() < 1e-6);
    }

    #[test]
    fn parses_coordinate_pair() {
        let c: Coordinate = "36.1627, -86.7816".parse().unwrap();
        assert_eq!(c, NASHVILLE);
    }

    #[test]
    fn rejects_out_of_range_coordinate() {
        assert!("91.0,0.0".parse::<Coordinate>().is_err());
        assert!("0.0,181.0".parse::<Coordinate>().is_err());
        assert!("nashville".parse::<Coordinate>().is_err());
    }

    #[test]
    fn bounds_cover_all_points() {
        let points = [
            NASHVILLE,
            Coordinate::new(36.0, -87.0),
            Coordinate::new(36.5, -86.5),
        ];
        let bounds = LatLngBounds::from_points(points).unwrap();
        for p in points {
            assert!(bounds.contains(p));
        }
        assert_eq!(bounds.south_west, Coordinate::new(36.0, -87.0));
        assert_eq!(bounds.north_east, Coordinate::new(36.5, -86.5));
        assert!(!bounds.is_point());
    }

    #[test]
    fn bounds_from_single_point_is_degenerate() {
        let bounds = LatLngBounds::from_points([NASHVILLE]).unwrap();
        assert!(bounds.is_point());
        assert_eq!(bounds.center(), NASHVILLE);
    }

    #[test]
    fn bounds_from_nothing_is_none() {
        assert!(LatLngBounds::from_points(std::iter::empty()).is_none());
    }
}

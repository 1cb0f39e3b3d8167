//! Geolocation provider.
//!
//! Positioning sits behind [`GeolocationProvider`]. [`locate`] bounds the
//! wait and decides whether a failure is surfaced to the user.

use std::future::Future;
use std::time::Duration;

use pantrymap_core::Coordinate;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GeolocationError {
    #[error("location permission denied")]
    PermissionDenied,

    #[error("location unavailable")]
    Unavailable,

    #[error("timed out waiting for a location fix")]
    Timeout,

    #[error("provider returned an out-of-range position")]
    InvalidPosition,
}

/// What started a location request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocateTrigger {
    /// Automatic request at startup. Failures stay silent.
    PageLoad,
    /// The user asked to be located. Failures are explained.
    UserAction,
}

/// Explanation shown after a user-initiated locate fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LocationNotice {
    pub title: &'static str,
    pub message: &'static str,
}

pub const LOCATION_NOTICE: LocationNotice = LocationNotice {
    title: "Location unavailable",
    message: "We couldn't determine your location. Allow location access in your \
              browser or search for an address instead.",
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LocateOutcome {
    Located(Coordinate),
    Failed {
        error: GeolocationError,
        notice: Option<LocationNotice>,
    },
}

impl LocateOutcome {
    #[must_use]
    pub fn coordinate(&self) -> Option<Coordinate> {
        match self {
            LocateOutcome::Located(at) => Some(*at),
            LocateOutcome::Failed { .. } => None,
        }
    }
}

pub trait GeolocationProvider {
    fn current_position(&self) -> impl Future<Output = Result<Coordinate, GeolocationError>>;
}

/// Provider with a fixed answer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StaticLocation {
    result: Result<Coordinate, GeolocationError>,
}

impl StaticLocation {
    #[must_use]
    pub const fn at(coordinate: Coordinate) -> Self {
        Self {
            result: Ok(coordinate),
        }
    }

    #[must_use]
    pub const fn failing(error: GeolocationError) -> Self {
        Self { result: Err(error) }
    }

    /// `Some` locates at the coordinate; `None` behaves as if positioning
    /// is unavailable.
    #[must_use]
    pub const fn from_option(coordinate: Option<Coordinate>) -> Self {
        match coordinate {
            Some(at) => Self::at(at),
            None => Self::failing(GeolocationError::Unavailable),
        }
    }
}

impl GeolocationProvider for StaticLocation {
    async fn current_position(&self) -> Result<Coordinate, GeolocationError> {
        self.result
    }
}

/// Ask `provider` for a position, waiting at most `timeout`.
pub async fn locate<P: GeolocationProvider>(
    provider: &P,
    timeout: Duration,
    trigger: LocateTrigger,
) -> LocateOutcome {
    let result = match tokio::time::timeout(timeout, provider.current_position()).await {
        Ok(Ok(at)) if at.is_valid() => Ok(at),
        Ok(Ok(_)) => Err(GeolocationError::InvalidPosition),
        Ok(Err(e)) => Err(e),
        Err(_) => Err(GeolocationError::Timeout),
    };

    match result {
        Ok(at) => {
            tracing::debug!(%at, "located user");
            LocateOutcome::Located(at)
        }
        Err(error) => {
            tracing::warn!(error = %error, ?trigger, "geolocation failed");
            LocateOutcome::Failed {
                error,
                notice: match trigger {
                    LocateTrigger::UserAction => Some(LOCATION_NOTICE),
                    LocateTrigger::PageLoad => None,
                },
            }
        }
    }
}

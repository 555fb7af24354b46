use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A (latitude, longitude) pair in decimal degrees.
#[derive(Copy, Clone, Debug, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub const LATITUDE_RANGE: ::core::ops::RangeInclusive<f64> = -90.0..=90.0;
    pub const LONGITUDE_RANGE: ::core::ops::RangeInclusive<f64> = -180.0..=180.0;

    pub fn try_new(latitude: f64, longitude: f64) -> Result<Self, CoordinateError> {
        if !Self::LATITUDE_RANGE.contains(&latitude) {
            return Err(CoordinateError::Latitude(latitude));
        }
        if !Self::LONGITUDE_RANGE.contains(&longitude) {
            return Err(CoordinateError::Longitude(longitude));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Returns `self` only if both components are within range.
    pub fn validate(self) -> Result<Self, CoordinateError> {
        let Self {
            latitude,
            longitude,
        } = self;
        Self::try_new(latitude, longitude)
    }
}

/// Renders the `geolocation` header value: `<latitude>,<longitude>`.
///
/// `f64` formatting never emits whitespace or exponents, so the output is
/// always two decimal numbers joined by a single comma.
impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self {
            latitude,
            longitude,
        } = self;
        write!(f, "{latitude},{longitude}")
    }
}

impl FromStr for Coordinate {
    type Err = CoordinateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (latitude, longitude) = s
            .split_once(',')
            .ok_or_else(|| CoordinateError::Format(s.into()))?;

        let parse = |value: &str| {
            value
                .trim()
                .parse::<f64>()
                .map_err(|_| CoordinateError::Format(s.into()))
        };
        Self::try_new(parse(latitude)?, parse(longitude)?)
    }
}

#[derive(Clone, Debug, PartialEq, Error)]
pub enum CoordinateError {
    #[error("expected \"<latitude>,<longitude>\", but given {0:?}")]
    Format(String),
    #[error("latitude out of range [-90, 90]: {0}")]
    Latitude(f64),
    #[error("longitude out of range [-180, 180]: {0}")]
    Longitude(f64),
}

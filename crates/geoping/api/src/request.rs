use serde::{Deserialize, Serialize};
use url::Url;

use crate::coordinate::Coordinate;

/// Header carrying `<latitude>,<longitude>`.
pub const HEADER_GEOLOCATION: &str = "geolocation";

/// Header signalling that the user allowed location sharing.
pub const HEADER_ALLOW_LOCATION: &str = "allow_location";

const ALLOW_LOCATION_VALUE: &str = "true";

/// A single outbound location report: `POST {url}` with no body.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationRequest {
    pub url: Url,
    pub coordinate: Coordinate,
}

impl LocationRequest {
    pub fn headers(&self) -> [(&'static str, String); 2] {
        [
            (HEADER_GEOLOCATION, self.coordinate.to_string()),
            (HEADER_ALLOW_LOCATION, ALLOW_LOCATION_VALUE.into()),
        ]
    }
}

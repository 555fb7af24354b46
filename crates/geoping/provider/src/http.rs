use std::time::Duration;

use async_trait::async_trait;
use geoping_api::{coordinate::Coordinate, error::PositionError, provider::GeolocationProvider};
use reqwest::{Client, ClientBuilder, StatusCode};
use serde::Deserialize;
use tracing::{debug, instrument, Level};
use url::Url;

const TIMEOUT_MESSAGE: &str = "Timeout expired";

/// Looks up the position from a JSON service.
///
/// The service is expected to answer `GET {lookup_url}` with an object holding
/// `latitude`/`longitude` (or the shorter `lat`/`lon`) in decimal degrees.
#[derive(Clone, Debug)]
pub struct HttpProvider {
    client: Client,
    lookup_url: Url,
}

impl HttpProvider {
    pub fn try_new(lookup_url: Url, timeout: Option<Duration>) -> ::anyhow::Result<Self> {
        let mut builder = ClientBuilder::new();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            lookup_url,
        })
    }
}

#[async_trait]
impl GeolocationProvider for HttpProvider {
    #[inline]
    fn is_supported(&self) -> bool {
        true
    }

    #[instrument(level = Level::DEBUG, skip(self), fields(url = %self.lookup_url))]
    async fn current_position(&self) -> Result<Coordinate, PositionError> {
        let response = self
            .client
            .get(self.lookup_url.clone())
            .send()
            .await
            .map_err(unavailable)?;

        let status = response.status();
        debug!("lookup service responded: {status}");
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                return Err(PositionError::PermissionDenied(format!(
                    "lookup service refused the request: {status}"
                )))
            }
            status if !status.is_success() => {
                return Err(PositionError::PositionUnavailable(format!(
                    "lookup service failed: {status}"
                )))
            }
            _ => {}
        }

        let LookupResponse {
            latitude,
            longitude,
        } = response.json().await.map_err(unavailable)?;

        Coordinate::try_new(latitude, longitude)
            .map_err(|error| PositionError::PositionUnavailable(error.to_string()))
    }
}

fn unavailable(error: ::reqwest::Error) -> PositionError {
    if error.is_timeout() {
        PositionError::Timeout(TIMEOUT_MESSAGE.into())
    } else {
        PositionError::PositionUnavailable(error.to_string())
    }
}

#[derive(Deserialize)]
struct LookupResponse {
    #[serde(alias = "lat")]
    latitude: f64,
    #[serde(alias = "lon", alias = "lng")]
    longitude: f64,
}

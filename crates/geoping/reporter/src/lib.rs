use std::time::Duration;

use geoping_api::{
    coordinate::Coordinate,
    error::{PositionError, ReportError},
    provider::GeolocationProvider,
    request::LocationRequest,
    transport::Transport,
};
use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument, warn, Level};
use url::Url;

const TIMEOUT_MESSAGE: &str = "Timeout expired";

/// What happened to a single report.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "result")]
pub enum Report {
    /// The endpoint answered; its status is not interpreted.
    Delivered { status: u16 },
    Unavailable,
    AcquisitionFailed { message: String },
    TransportFailed { message: String },
}

impl Report {
    pub const fn is_delivered(&self) -> bool {
        matches!(self, Self::Delivered { .. })
    }
}

/// Acquires the current position once and posts it to `endpoint`.
pub struct LocationReporter<P, T> {
    acquisition_timeout: Option<Duration>,
    endpoint: Url,
    provider: P,
    transport: T,
}

impl<P, T> LocationReporter<P, T>
where
    P: GeolocationProvider + Send + Sync,
    T: Transport + Send + Sync,
{
    pub fn new(provider: P, transport: T, endpoint: Url) -> Self {
        Self {
            acquisition_timeout: None,
            endpoint,
            provider,
            transport,
        }
    }

    /// Bounds how long the provider may take to yield a position.
    pub fn with_acquisition_timeout(mut self, timeout: Duration) -> Self {
        self.acquisition_timeout = Some(timeout);
        self
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Runs one report and emits exactly one diagnostic about its outcome.
    ///
    /// Failures are terminal for this call and are never retried.
    #[instrument(level = Level::INFO, skip(self), fields(endpoint = %self.endpoint))]
    pub async fn report(&self) -> Report {
        match self.try_report().await {
            Ok(status) => {
                info!("location reported: {status}");
                Report::Delivered { status }
            }
            Err(error @ ReportError::CapabilityUnavailable) => {
                warn!("{error}");
                Report::Unavailable
            }
            Err(ReportError::AcquisitionFailed(cause)) => {
                let message = cause.message().to_string();
                error!(code = cause.code(), "Error obtaining location: {message}");
                Report::AcquisitionFailed { message }
            }
            Err(ReportError::TransportFailed(cause)) => {
                let message = format!("{cause:#}");
                error!("Error: {message}");
                Report::TransportFailed { message }
            }
        }
    }

    /// Checks the capability, acquires a position, then posts it.
    ///
    /// The transport is only touched after a successful acquisition.
    pub async fn try_report(&self) -> Result<u16, ReportError> {
        if !self.provider.is_supported() {
            return Err(ReportError::CapabilityUnavailable);
        }

        let coordinate = self
            .acquire()
            .await
            .map_err(ReportError::AcquisitionFailed)?;

        let request = LocationRequest {
            url: self.endpoint.clone(),
            coordinate,
        };
        self.transport
            .post(&request)
            .await
            .map_err(ReportError::TransportFailed)
    }

    async fn acquire(&self) -> Result<Coordinate, PositionError> {
        let position = self.provider.current_position();
        match self.acquisition_timeout {
            Some(timeout) => ::tokio::time::timeout(timeout, position)
                .await
                .unwrap_or_else(|_| Err(PositionError::Timeout(TIMEOUT_MESSAGE.into()))),
            None => position.await,
        }
    }
}

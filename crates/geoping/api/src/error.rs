use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a geolocation provider could not yield a position.
///
/// The message is kept exactly as the platform reported it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(rename_all = "camelCase", tag = "code", content = "message")]
pub enum PositionError {
    #[error("{0}")]
    PermissionDenied(String),
    #[error("{0}")]
    PositionUnavailable(String),
    #[error("{0}")]
    Timeout(String),
}

impl PositionError {
    /// Numeric code as exposed by the W3C geolocation API.
    pub const fn code(&self) -> u16 {
        match self {
            Self::PermissionDenied(_) => 1,
            Self::PositionUnavailable(_) => 2,
            Self::Timeout(_) => 3,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::PermissionDenied(message)
            | Self::PositionUnavailable(message)
            | Self::Timeout(message) => message,
        }
    }
}

/// Terminal failures of a single report; none of them is retried.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Geolocation is not supported by this platform.")]
    CapabilityUnavailable,
    #[error("Error obtaining location: {0}")]
    AcquisitionFailed(#[source] PositionError),
    #[error("Error: {0}")]
    TransportFailed(::anyhow::Error),
}

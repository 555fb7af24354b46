use async_trait::async_trait;
use geoping_api::{coordinate::Coordinate, error::PositionError, provider::GeolocationProvider};
use tracing::{instrument, Level};

/// Always reports the same, preconfigured position.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FixedProvider {
    coordinate: Coordinate,
}

impl FixedProvider {
    pub const fn new(coordinate: Coordinate) -> Self {
        Self { coordinate }
    }
}

#[async_trait]
impl GeolocationProvider for FixedProvider {
    #[inline]
    fn is_supported(&self) -> bool {
        true
    }

    #[instrument(level = Level::DEBUG, skip(self))]
    async fn current_position(&self) -> Result<Coordinate, PositionError> {
        self.coordinate
            .validate()
            .map_err(|error| PositionError::PositionUnavailable(error.to_string()))
    }
}

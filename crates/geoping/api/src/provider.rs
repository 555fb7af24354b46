use async_trait::async_trait;

use crate::{coordinate::Coordinate, error::PositionError};

#[async_trait]
pub trait GeolocationProvider {
    /// Whether the platform exposes a geolocation capability at all.
    fn is_supported(&self) -> bool;

    /// Acquires the current position once.
    async fn current_position(&self) -> Result<Coordinate, PositionError>;
}

#[async_trait]
impl GeolocationProvider for Box<dyn GeolocationProvider + Send + Sync> {
    fn is_supported(&self) -> bool {
        (**self).is_supported()
    }

    async fn current_position(&self) -> Result<Coordinate, PositionError> {
        (**self).current_position().await
    }
}

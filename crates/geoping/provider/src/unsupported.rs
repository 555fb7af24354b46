use async_trait::async_trait;
use geoping_api::{coordinate::Coordinate, error::PositionError, provider::GeolocationProvider};

/// A platform without any geolocation capability.
#[derive(Copy, Clone, Debug, Default)]
pub struct UnsupportedProvider;

#[async_trait]
impl GeolocationProvider for UnsupportedProvider {
    #[inline]
    fn is_supported(&self) -> bool {
        false
    }

    async fn current_position(&self) -> Result<Coordinate, PositionError> {
        Err(PositionError::PositionUnavailable(
            "geolocation is not supported".into(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn reports_missing_capability() {
        let provider = UnsupportedProvider;

        assert!(!provider.is_supported());
        assert!(provider.current_position().await.is_err());
    }
}

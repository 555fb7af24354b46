use anyhow::Result;
use async_trait::async_trait;

use crate::request::LocationRequest;

#[async_trait]
pub trait Transport {
    /// Sends the request and returns the response status code.
    async fn post(&self, request: &LocationRequest) -> Result<u16>;
}

#[async_trait]
impl Transport for Box<dyn Transport + Send + Sync> {
    async fn post(&self, request: &LocationRequest) -> Result<u16> {
        (**self).post(request).await
    }
}

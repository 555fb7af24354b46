use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use geoping_api::{request::LocationRequest, transport::Transport};
use reqwest::{Client, ClientBuilder};
use tracing::{debug, instrument, Level};

#[derive(Clone, Debug)]
pub struct HttpTransport {
    session: Client,
}

impl HttpTransport {
    pub fn try_new(timeout: Option<Duration>) -> Result<Self> {
        let mut builder = ClientBuilder::new();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            session: builder
                .build()
                .map_err(|error| anyhow!("failed to init http client: {error}"))?,
        })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    #[instrument(level = Level::INFO, skip_all, fields(url = %request.url))]
    async fn post(&self, request: &LocationRequest) -> Result<u16> {
        let url = &request.url;

        let mut builder = self.session.post(url.clone());
        for (key, value) in request.headers() {
            builder = builder.header(key, value);
        }

        let response = builder
            .send()
            .await
            .with_context(|| format!("failed to send location ({url})"))?;

        let status = response.status();
        debug!("endpoint responded: {status}");
        Ok(status.as_u16())
    }
}

#[cfg(test)]
mod tests {
    use geoping_api::coordinate::Coordinate;
    use tokio::{
        io::{AsyncReadExt, AsyncWriteExt},
        net::TcpListener,
        sync::oneshot,
    };

    use super::*;

    /// Accepts one connection, answers `204`, and hands back the raw request head.
    async fn capture_once() -> (reqwest::Url, oneshot::Receiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = oneshot::channel();

        ::tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();

            let mut head = Vec::new();
            let mut buf = [0u8; 1024];
            while !head.windows(4).any(|window| window == b"\r\n\r\n") {
                let len = stream.read(&mut buf).await.unwrap();
                if len == 0 {
                    break;
                }
                head.extend_from_slice(&buf[..len]);
            }

            stream
                .write_all(b"HTTP/1.1 204 No Content\r\nconnection: close\r\n\r\n")
                .await
                .unwrap();
            stream.shutdown().await.unwrap();
            let _ = tx.send(String::from_utf8_lossy(&head).into_owned());
        });

        let url = format!("http://{addr}/location/").parse().unwrap();
        (url, rx)
    }

    #[tokio::test]
    async fn posts_location_headers() {
        let (url, head) = capture_once().await;
        let request = LocationRequest {
            url,
            coordinate: Coordinate::try_new(37.7749, -122.4194).unwrap(),
        };

        let transport = HttpTransport::try_new(None).unwrap();
        let status = transport.post(&request).await.unwrap();
        assert_eq!(status, 204);

        let head = head.await.unwrap().to_ascii_lowercase();
        assert!(head.starts_with("post /location/ http/1.1\r\n"), "{head}");
        assert!(head.contains("\r\ngeolocation: 37.7749,-122.4194\r\n"), "{head}");
        assert!(head.contains("\r\nallow_location: true\r\n"), "{head}");
    }

    #[tokio::test]
    async fn connection_refused_is_an_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let request = LocationRequest {
            url: format!("http://{addr}/location/").parse().unwrap(),
            coordinate: Coordinate::try_new(0.0, 0.0).unwrap(),
        };

        let transport = HttpTransport::try_new(None).unwrap();
        let error = transport.post(&request).await.unwrap_err();
        assert!(error.to_string().starts_with("failed to send location"));

        // the os-level cause survives below the context
        let chain = format!("{error:#}").to_ascii_lowercase();
        assert!(error.chain().count() > 1, "{chain}");
        assert!(chain.contains("refused"), "{chain}");
    }
}

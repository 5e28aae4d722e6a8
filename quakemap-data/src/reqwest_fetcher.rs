use async_trait::async_trait;
use log::debug;
use reqwest::{Client, ClientBuilder};
use serde_json::Value;

use crate::error::QuakeDataError;
use crate::fetcher::GeoJsonFetcher;

static USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

pub struct ReqwestFetcher {
    client: Client,
}

impl ReqwestFetcher {
    pub fn try_new() -> Result<Self, QuakeDataError> {
        Ok(Self {
            client: ClientBuilder::new().user_agent(USER_AGENT).build()?,
        })
    }
}

#[async_trait]
impl GeoJsonFetcher for ReqwestFetcher {
    async fn fetch(&self, url: &str) -> Result<Value, QuakeDataError> {
        debug!("GET {url}");
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(QuakeDataError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Answers a single request on a local port with `response` and returns the URL to hit
    async fn serve_once(response: String) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = [0u8; 4096];
            let _ = socket.read(&mut request).await;
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
        });
        format!("http://{addr}/all_week.geojson")
    }

    #[tokio::test]
    async fn test_error_status_is_reported() {
        let url = serve_once(
            "HTTP/1.1 503 Service Unavailable\r\nContent-Length: 0\r\nConnection: close\r\n\r\n"
                .to_string(),
        )
        .await;

        let err = ReqwestFetcher::try_new().unwrap().fetch(&url).await.unwrap_err();
        assert!(
            matches!(&err, QuakeDataError::HttpStatus { url: failed, status: 503 } if *failed == url)
        );
    }

    #[tokio::test]
    async fn test_successful_fetch() {
        let body = r#"{"type": "FeatureCollection", "features": []}"#;
        let url = serve_once(format!(
            "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        ))
        .await;

        let value = ReqwestFetcher::try_new().unwrap().fetch(&url).await.unwrap();
        assert_eq!(value["type"], "FeatureCollection");
    }
}

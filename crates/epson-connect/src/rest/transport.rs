//! HTTP transport implementation.

use reqwest::header::HeaderMap;
use reqwest::{Method, StatusCode};
use tracing::{debug, trace};

use crate::error::TransportError;
use crate::types::BaseUrl;

/// HTTP transport for API requests.
///
/// Performs exactly one blocking exchange per call: no retries, no
/// backoff, no connection management beyond the underlying client's
/// defaults.
#[derive(Debug, Clone)]
pub(crate) struct HttpTransport {
    client: reqwest::Client,
    base: BaseUrl,
}

impl HttpTransport {
    /// Create a new transport for the given API base URL.
    pub fn new(base: BaseUrl) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(concat!("epson-connect/", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("failed to build HTTP client");

        Self { client, base }
    }

    /// Returns the base URL this transport is configured for.
    pub fn base(&self) -> &BaseUrl {
        &self.base
    }

    /// Perform one HTTP exchange and return the status and raw body.
    pub async fn send(
        &self,
        method: Method,
        path: &str,
        headers: HeaderMap,
        body: Option<Vec<u8>>,
    ) -> Result<(StatusCode, Vec<u8>), TransportError> {
        let url = self.base.endpoint(path);
        debug!(%method, %url, "HTTP exchange");

        let mut request = self.client.request(method, &url).headers(headers);
        if let Some(bytes) = body {
            request = request.body(bytes);
        }

        let response = request.send().await?;
        let status = response.status();
        trace!(status = %status, "HTTP response");

        let raw = response.bytes().await?.to_vec();
        Ok((status, raw))
    }
}

//! [`Transport`] implementation over HTTPS, using `reqwest`.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use ocpatch_core::{Headers, Response, Transport};
use serde_json::Value;
use tracing::{trace, warn};

#[derive(Debug, Clone)]
pub struct HttpTransportConfig {
    /// Verify the server's TLS certificate.
    pub verify_tls: bool,
    /// Per-request timeout. `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

impl Default for HttpTransportConfig {
    fn default() -> Self {
        HttpTransportConfig {
            verify_tls: true,
            timeout: None,
        }
    }
}

pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(config: &HttpTransportConfig) -> Result<HttpTransport> {
        let mut builder =
            reqwest::Client::builder().danger_accept_invalid_certs(!config.verify_tls);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().context("Could not set up HTTP client")?;
        Ok(HttpTransport { client })
    }

    async fn send(
        &self,
        mut request: reqwest::RequestBuilder,
        headers: &Headers,
    ) -> Result<Response> {
        for (name, value) in headers.iter() {
            request = request.header(name, value);
        }
        let response = request.send().await?;
        let status = response.status().as_u16();
        let bytes = response
            .bytes()
            .await
            .context("Could not read response body")?;
        trace!(status, bytes = bytes.len(), "received response");
        Ok(Response {
            status,
            body: decode_body(&bytes),
        })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &str, headers: &Headers) -> Result<Response> {
        self.send(self.client.get(url), headers)
            .await
            .with_context(|| format!("GET request to {} failed", url))
    }

    async fn patch(
        &self,
        url: &str,
        headers: &Headers,
        payload: &json_patch::Patch,
    ) -> Result<Response> {
        let body = serde_json::to_vec(payload).context("Could not serialize patch")?;
        self.send(self.client.patch(url).body(body), headers)
            .await
            .with_context(|| format!("PATCH request to {} failed", url))
    }
}

/// Decode a response body as JSON.
///
/// An empty body becomes `null`. A body that is not JSON (e.g. an HTML error
/// page from a proxy) is kept as a JSON string.
pub fn decode_body(bytes: &[u8]) -> Value {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Value::Null;
    }
    match serde_json::from_slice(bytes) {
        Ok(v) => v,
        Err(e) => {
            warn!("response body is not JSON ({}); keeping it as text", e);
            Value::String(String::from_utf8_lossy(bytes).into_owned())
        }
    }
}

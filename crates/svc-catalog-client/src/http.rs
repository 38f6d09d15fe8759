//! reqwest-backed transport.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_LENGTH};
use tracing::debug;

use crate::error::TransportError;
use crate::transport::{Transport, TransportRequest, TransportResponse};

/// HTTP session configuration.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// User-Agent sent with every request.
    pub user_agent: String,

    /// Whole-request timeout in seconds. `None` waits forever.
    pub timeout_secs: Option<u64>,

    /// Connection timeout in seconds.
    pub connect_timeout_secs: Option<u64>,

    /// Headers injected into every request, as `(name, value)` pairs.
    pub headers: Vec<(String, String)>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            user_agent: concat!("svc-catalog/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout_secs: None,
            connect_timeout_secs: Some(10),
            headers: Vec::new(),
        }
    }
}

/// A pre-configured HTTP client plus the headers it adds to each request.
pub struct HttpSession {
    inner: reqwest::Client,
    headers: HeaderMap,
}

impl HttpSession {
    /// Create a session from configuration.
    pub fn new(config: &SessionConfig) -> Result<Self, TransportError> {
        let mut builder = reqwest::Client::builder().user_agent(config.user_agent.as_str());
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        if let Some(secs) = config.connect_timeout_secs {
            builder = builder.connect_timeout(Duration::from_secs(secs));
        }

        let mut session = Self {
            inner: builder.build()?,
            headers: HeaderMap::new(),
        };
        for (name, value) in &config.headers {
            session = session.with_header(name, value)?;
        }
        Ok(session)
    }

    /// Wrap an existing reqwest client.
    pub fn from_client(client: reqwest::Client) -> Self {
        Self {
            inner: client,
            headers: HeaderMap::new(),
        }
    }

    /// Builder method to add a header injected before each send.
    pub fn with_header(mut self, name: &str, value: &str) -> Result<Self, TransportError> {
        let name = HeaderName::from_bytes(name.trim().as_bytes())
            .map_err(|e| TransportError::InvalidHeader(format!("{}: {}", name, e)))?;
        let value = HeaderValue::from_str(value.trim())
            .map_err(|e| TransportError::InvalidHeader(format!("{}: {}", name, e)))?;
        self.headers.append(name, value);
        Ok(self)
    }

    /// Headers this session injects.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }
}

#[async_trait]
impl Transport for HttpSession {
    fn on_open_request(&self, request: &mut TransportRequest) {
        for (name, value) in &self.headers {
            request.headers.append(name.clone(), value.clone());
        }
    }

    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, TransportError> {
        let uri = request.uri.ok_or(TransportError::MissingUri)?;
        debug!(method = %request.method, uri = %uri, "Sending request");

        let response = self
            .inner
            .request(request.method, uri)
            .headers(request.headers)
            .send()
            .await?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await?;
        debug!(status = %status, body_len = body.len(), "Response read");

        let mut response = TransportResponse::new(status, headers, body.to_vec());
        // Close-delimited bodies carry no length; report what was buffered.
        if !response.is_chunked() && response.content_length().is_none() {
            response
                .headers
                .insert(CONTENT_LENGTH, HeaderValue::from(body.len()));
        }
        Ok(response)
    }
}

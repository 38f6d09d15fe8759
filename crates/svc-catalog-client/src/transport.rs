//! The transport collaborator used by the catalog loader.
//!
//! The loader never talks to the network itself. It builds a
//! [`TransportRequest`], lets the transport customise it, and hands it back
//! to [`Transport::send`].

use async_trait::async_trait;
use reqwest::header::{HeaderMap, CONTENT_LENGTH, TRANSFER_ENCODING};
use reqwest::{Method, StatusCode, Url};

use crate::error::TransportError;

/// An HTTP client capable of sending one request and reading the whole response.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Called for every request before it is sent.
    ///
    /// The method is already set; the target URI is not. Implementations
    /// typically inject headers here. The default does nothing.
    fn on_open_request(&self, _request: &mut TransportRequest) {}

    /// Send the request and read the response body to the end.
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, TransportError>;
}

/// An outgoing request.
#[derive(Debug, Clone)]
pub struct TransportRequest {
    pub method: Method,
    pub uri: Option<Url>,
    pub headers: HeaderMap,
}

impl TransportRequest {
    /// Create a request with no target and no headers.
    pub fn new(method: Method) -> Self {
        Self {
            method,
            uri: None,
            headers: HeaderMap::new(),
        }
    }
}

/// A response whose body, if any, has been read completely.
#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    /// `None` when the transport could not provide a body stream.
    pub body: Option<Vec<u8>>,
}

impl TransportResponse {
    /// Create a response with a body.
    pub fn new(status: StatusCode, headers: HeaderMap, body: Vec<u8>) -> Self {
        Self {
            status,
            headers,
            body: Some(body),
        }
    }

    /// True if `Transfer-Encoding` lists `chunked`.
    pub fn is_chunked(&self) -> bool {
        self.headers
            .get_all(TRANSFER_ENCODING)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .flat_map(|v| v.split(','))
            .any(|coding| coding.trim().eq_ignore_ascii_case("chunked"))
    }

    /// Declared `Content-Length`, if present and well formed.
    pub fn content_length(&self) -> Option<u64> {
        self.headers
            .get(CONTENT_LENGTH)?
            .to_str()
            .ok()?
            .trim()
            .parse()
            .ok()
    }

    /// Whether the response announces a body worth parsing.
    pub fn declares_content(&self) -> bool {
        self.is_chunked() || self.content_length().is_some_and(|len| len > 0)
    }
}

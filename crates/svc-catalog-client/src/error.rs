//! Error types for the catalog client.

use reqwest::{StatusCode, Url};
use thiserror::Error;

use svc_catalog_core::{CoreError, ErrorEnvelope};

/// Errors that can occur while loading a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The response body could not be parsed as a catalog.
    #[error("could not parse catalog data from {uri}: {source}")]
    DataFormat {
        uri: Url,
        #[source]
        source: CoreError,
    },

    /// The server answered with its error envelope.
    #[error("server reported an error for {uri} (HTTP {status}): {envelope}")]
    ServerReported {
        uri: Url,
        status: StatusCode,
        envelope: ErrorEnvelope,
    },

    /// The response declared content but the transport produced no body.
    #[error("response from {uri} declared content but carried no body")]
    MissingBody { uri: Url },

    /// Failure inside the transport, passed through as is.
    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// Errors raised by a [`Transport`](crate::Transport) implementation.
#[derive(Debug, Error)]
pub enum TransportError {
    /// HTTP error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The request reached the transport without a target URI.
    #[error("request has no target URI")]
    MissingUri,

    /// A configured header name or value is not valid HTTP.
    #[error("invalid header: {0}")]
    InvalidHeader(String),

    /// Any other failure from a custom transport.
    #[error("transport error: {0}")]
    Other(Box<dyn std::error::Error + Send + Sync>),
}

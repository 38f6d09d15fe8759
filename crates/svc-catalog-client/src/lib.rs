//! Catalog client library.
//!
//! Loads a remote service catalog over HTTP: one GET through a [`Transport`],
//! then parsing into a [`Catalog`].

pub mod address;
pub mod error;
pub mod http;
pub mod loader;
pub mod transport;

pub use address::{resolve_resource_uri, resolve_service_uri};
pub use error::{CatalogError, TransportError};
pub use http::{HttpSession, SessionConfig};
pub use loader::load_catalog;
pub use transport::{Transport, TransportRequest, TransportResponse};

pub use reqwest::Url;
pub use svc_catalog_core::{Catalog, ErrorEnvelope, ServiceDescriptor};

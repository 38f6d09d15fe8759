//! Service Catalog Core Types
//!
//! This crate contains the catalog domain with no dependencies on:
//! - Network/HTTP
//! - Runtime specifics
//!
//! It parses a catalog body into a [`Catalog`] and recognises the server's
//! error envelope. Fetching the body is the client crate's job.

pub mod catalog;
pub mod envelope;
pub mod error;
pub mod service;

// Re-export commonly used types
pub use catalog::Catalog;
pub use envelope::{ErrorDetail, ErrorEnvelope};
pub use error::CoreError;
pub use service::{OperationDescriptor, ResourceDescriptor, ServiceDescriptor};

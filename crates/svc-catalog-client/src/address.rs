//! Resolving service and resource addresses against the catalog location.

use reqwest::Url;

use svc_catalog_core::{ResourceDescriptor, ServiceDescriptor};

/// Absolute URI of a service.
///
/// The service `address` is resolved like a link inside the catalog
/// document: absolute addresses are kept, `/rest/orders` replaces the path
/// and `orders` is a sibling of the catalog file.
pub fn resolve_service_uri(catalog_uri: &Url, service: &ServiceDescriptor) -> Option<Url> {
    let address = service.address.as_deref()?;
    catalog_uri.join(address).ok()
}

/// Absolute URI of a resource, by appending its path to the service URI.
pub fn resolve_resource_uri(service_uri: &Url, resource: &ResourceDescriptor) -> Option<Url> {
    let path = resource.path.as_deref()?;
    let base = service_uri.as_str().trim_end_matches('/');
    let joined = if path.starts_with('/') {
        format!("{}{}", base, path)
    } else {
        format!("{}/{}", base, path)
    };
    Url::parse(&joined).ok()
}

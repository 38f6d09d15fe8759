//! Catalog loading: one GET, one parse.

use reqwest::{Method, Url};
use tracing::{debug, info, warn};

use svc_catalog_core::{Catalog, CoreError};

use crate::error::CatalogError;
use crate::transport::{Transport, TransportRequest};

/// Fetch the catalog at `catalog_uri` through `transport` and parse it.
///
/// Sends exactly one GET. A response that declares neither chunked transfer
/// encoding nor a positive `Content-Length` yields an empty catalog. The HTTP
/// status is not inspected: the body alone decides between a catalog, a
/// server-reported error and a data-format error.
pub async fn load_catalog<T>(catalog_uri: &Url, transport: &T) -> Result<Catalog, CatalogError>
where
    T: Transport + ?Sized,
{
    let mut request = TransportRequest::new(Method::GET);
    transport.on_open_request(&mut request);
    request.uri = Some(catalog_uri.clone());

    debug!(uri = %catalog_uri, "Requesting catalog");
    let response = transport.send(request).await?;

    if !response.declares_content() {
        debug!(
            uri = %catalog_uri,
            status = %response.status,
            "Catalog response has no content"
        );
        return Ok(Catalog::default());
    }

    let status = response.status;
    let body = response.body.ok_or_else(|| CatalogError::MissingBody {
        uri: catalog_uri.clone(),
    })?;

    let catalog = Catalog::from_slice(&body).map_err(|err| match err {
        CoreError::ServerReported(envelope) => {
            warn!(uri = %catalog_uri, status = %status, error = %envelope, "Server reported an error");
            CatalogError::ServerReported {
                uri: catalog_uri.clone(),
                status,
                envelope,
            }
        }
        source => CatalogError::DataFormat {
            uri: catalog_uri.clone(),
            source,
        },
    })?;

    info!(
        uri = %catalog_uri,
        version = catalog.version().unwrap_or("-"),
        services = catalog.len(),
        "Catalog loaded"
    );
    Ok(catalog)
}

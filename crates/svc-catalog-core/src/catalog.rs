//! The catalog document and its parser.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::envelope::ErrorEnvelope;
use crate::error::CoreError;
use crate::service::{lenient, ServiceDescriptor};

/// In-memory directory of the services a remote catalog advertises.
///
/// A catalog is built once, from one response, and never changes afterwards.
/// `Catalog::default()` is the empty catalog returned when the server sends
/// no content.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    version: Option<String>,
    last_modified: Option<String>,
    services: Vec<ServiceDescriptor>,
}

/// Wire schema of a catalog body.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CatalogDocument {
    #[serde(default)]
    version: Option<String>,
    #[serde(default)]
    last_modified: Option<String>,
    #[serde(default, deserialize_with = "lenient::null_as_empty")]
    services: Vec<ServiceDescriptor>,
}

impl Catalog {
    /// Create a catalog from already-extracted parts.
    pub fn new(
        version: Option<String>,
        last_modified: Option<String>,
        services: Vec<ServiceDescriptor>,
    ) -> Self {
        Self {
            version,
            last_modified,
            services,
        }
    }

    /// Parse a catalog body.
    ///
    /// The body must be a JSON object. An object carrying the server's error
    /// shape is rejected with [`CoreError::ServerReported`] before any catalog
    /// field is read.
    pub fn from_slice(body: &[u8]) -> Result<Self, CoreError> {
        let value: Value = serde_json::from_slice(body)?;
        Self::from_value(value)
    }

    /// Same as [`Catalog::from_slice`], starting from a parsed JSON value.
    pub fn from_value(value: Value) -> Result<Self, CoreError> {
        let object = match value {
            Value::Object(object) => object,
            other => return Err(CoreError::NotAnObject(json_kind(&other))),
        };

        if let Some(envelope) = ErrorEnvelope::detect(&object) {
            return Err(CoreError::ServerReported(envelope));
        }

        let document: CatalogDocument = serde_json::from_value(Value::Object(object))?;
        Ok(Self::new(
            document.version,
            document.last_modified,
            document.services,
        ))
    }

    /// Server-assigned catalog version.
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// Opaque last-modification token.
    pub fn last_modified(&self) -> Option<&str> {
        self.last_modified.as_deref()
    }

    /// Services in document order.
    pub fn services(&self) -> &[ServiceDescriptor] {
        &self.services
    }

    /// First service with the given name.
    pub fn service(&self, name: &str) -> Option<&ServiceDescriptor> {
        self.services
            .iter()
            .find(|s| s.name.as_deref() == Some(name))
    }

    /// Names of all named services, in document order.
    pub fn service_names(&self) -> impl Iterator<Item = &str> {
        self.services.iter().filter_map(|s| s.name.as_deref())
    }

    /// Number of services, duplicates included.
    pub fn len(&self) -> usize {
        self.services.len()
    }

    /// True when the catalog lists no services.
    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_example_catalog() {
        let body = br#"{"version":"3.1","lastModified":"2024-01-01T00:00:00Z","services":[{"name":"orders"},{"name":"billing"}]}"#;

        let catalog = Catalog::from_slice(body).unwrap();
        assert_eq!(catalog.version(), Some("3.1"));
        assert_eq!(catalog.last_modified(), Some("2024-01-01T00:00:00Z"));
        let names: Vec<&str> = catalog.service_names().collect();
        assert_eq!(names, vec!["orders", "billing"]);
    }

    #[test]
    fn test_services_keep_order_and_duplicates() {
        let value = json!({
            "services": [
                { "name": "c" }, { "name": "a" }, { "name": "c" }, { "address": "/anon" }
            ]
        });

        let catalog = Catalog::from_value(value).unwrap();
        assert_eq!(catalog.len(), 4);
        assert_eq!(catalog.services()[0].name.as_deref(), Some("c"));
        assert_eq!(catalog.services()[1].name.as_deref(), Some("a"));
        assert_eq!(catalog.services()[2].name.as_deref(), Some("c"));
        assert!(catalog.services()[3].name.is_none());
        assert_eq!(catalog.service_names().count(), 3);
    }

    #[test]
    fn test_missing_last_modified_is_unset() {
        let catalog = Catalog::from_value(json!({ "version": "2", "services": [] })).unwrap();
        assert_eq!(catalog.version(), Some("2"));
        assert_eq!(catalog.last_modified(), None);
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_empty_string_is_not_unset() {
        let catalog = Catalog::from_value(json!({ "version": "", "lastModified": null })).unwrap();
        assert_eq!(catalog.version(), Some(""));
        assert_eq!(catalog.last_modified(), None);
    }

    #[test]
    fn test_missing_services_is_empty() {
        let catalog = Catalog::from_value(json!({ "version": "1" })).unwrap();
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_null_services_is_empty() {
        let catalog = Catalog::from_value(json!({ "version": "1", "services": null })).unwrap();
        assert_eq!(catalog.version(), Some("1"));
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_mistyped_service_field_keeps_catalog() {
        let catalog = Catalog::from_value(json!({
            "services": [
                { "name": "billing", "useRequest": "yes" },
                { "name": "orders", "resources": [{ "name": "Order", "relations": null }] }
            ]
        }))
        .unwrap();

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.service("billing").unwrap().use_request, None);
        assert_eq!(catalog.service("orders").unwrap().resources.len(), 1);
    }

    #[test]
    fn test_null_error_key_is_not_envelope() {
        let catalog = Catalog::from_value(json!({
            "version": "1",
            "error": null,
            "services": [{ "name": "orders" }]
        }))
        .unwrap();

        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_error_envelope_rejected() {
        let err = Catalog::from_value(json!({
            "version": "1",
            "error": "forbidden",
            "error_description": "no access to catalog"
        }))
        .unwrap_err();

        match err {
            CoreError::ServerReported(envelope) => {
                assert_eq!(envelope.error.as_deref(), Some("forbidden"));
            }
            other => panic!("Expected ServerReported, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_json_is_malformed() {
        let err = Catalog::from_slice(b"<html>oops</html>").unwrap_err();
        assert!(matches!(err, CoreError::Malformed(_)));
    }

    #[test]
    fn test_top_level_array_rejected() {
        let err = Catalog::from_slice(b"[1, 2]").unwrap_err();
        assert!(matches!(err, CoreError::NotAnObject("array")));
        assert!(err.is_data_format());
    }

    #[test]
    fn test_wrong_field_types_are_malformed() {
        let err = Catalog::from_value(json!({ "services": { "name": "x" } })).unwrap_err();
        assert!(matches!(err, CoreError::Malformed(_)));

        let err = Catalog::from_value(json!({ "version": 3 })).unwrap_err();
        assert!(matches!(err, CoreError::Malformed(_)));

        let err = Catalog::from_value(json!({ "services": ["orders"] })).unwrap_err();
        assert!(matches!(err, CoreError::Malformed(_)));
    }

    #[test]
    fn test_default_is_unset() {
        let catalog = Catalog::default();
        assert_eq!(catalog.version(), None);
        assert_eq!(catalog.last_modified(), None);
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_serialize_uses_wire_names() {
        let catalog = Catalog::new(
            Some("1".to_string()),
            Some("etag-7".to_string()),
            vec![ServiceDescriptor::new("orders")],
        );

        let value = serde_json::to_value(&catalog).unwrap();
        assert_eq!(value["lastModified"], "etag-7");
        assert_eq!(value["services"][0]["name"], "orders");
    }
}

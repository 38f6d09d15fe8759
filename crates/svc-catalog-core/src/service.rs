//! Service descriptor types.
//!
//! A descriptor is built from one element of the catalog's `services` array.
//! Every field is optional on the wire; keys this crate does not model are
//! kept in `extra` so callers can still reach them. A modelled field with an
//! unexpected type reads as unset (scalars) or empty (lists); only an element
//! that is not an object fails.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One remote service listed in a catalog.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceDescriptor {
    /// Service name (e.g., "orders").
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Address of the service, usually relative to the catalog URI.
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    /// Whether calls to this service carry the request object.
    #[serde(default, deserialize_with = "lenient::flag", skip_serializing_if = "Option::is_none")]
    pub use_request: Option<bool>,

    /// Service-level settings, passed through untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<Value>,

    /// Resources exposed by this service.
    #[serde(default, deserialize_with = "lenient::list", skip_serializing_if = "Vec::is_empty")]
    pub resources: Vec<ResourceDescriptor>,

    /// Keys not modelled above.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ServiceDescriptor {
    /// Create a descriptor with only a name set.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Builder method to set the address.
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    /// Builder method to add a resource.
    pub fn with_resource(mut self, resource: ResourceDescriptor) -> Self {
        self.resources.push(resource);
        self
    }

    /// Get a resource by name.
    pub fn resource(&self, name: &str) -> Option<&ResourceDescriptor> {
        self.resources
            .iter()
            .find(|r| r.name.as_deref() == Some(name))
    }
}

/// A resource (table, business entity) exposed by a service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceDescriptor {
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Path relative to the owning service's address.
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub id_property: Option<String>,

    #[serde(default, deserialize_with = "lenient::flag", skip_serializing_if = "Option::is_none")]
    pub auto_save: Option<bool>,

    /// Data schema, passed through untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<Value>,

    #[serde(default, deserialize_with = "lenient::list", skip_serializing_if = "Vec::is_empty")]
    pub relations: Vec<Value>,

    #[serde(default, deserialize_with = "lenient::list", skip_serializing_if = "Vec::is_empty")]
    pub operations: Vec<OperationDescriptor>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// An operation that can be invoked on a resource.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationDescriptor {
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// Operation kind (e.g., "read", "create", "invoke").
    #[serde(
        default,
        rename = "type",
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub kind: Option<String>,

    /// HTTP verb used to invoke the operation.
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub verb: Option<String>,

    #[serde(default, deserialize_with = "lenient::flag", skip_serializing_if = "Option::is_none")]
    pub use_before_image: Option<bool>,

    #[serde(default, deserialize_with = "lenient::list", skip_serializing_if = "Vec::is_empty")]
    pub params: Vec<Value>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Field readers that never fail on a mistyped value.
pub(crate) mod lenient {
    use serde::de::{DeserializeOwned, Error};
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    /// A string; anything else is unset.
    pub fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::String(s) => Some(s),
            _ => None,
        })
    }

    /// A boolean, or the strings `"true"`/`"false"`; anything else is unset.
    pub fn flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::Bool(b) => Some(b),
            Value::String(s) if s.eq_ignore_ascii_case("true") => Some(true),
            Value::String(s) if s.eq_ignore_ascii_case("false") => Some(false),
            _ => None,
        })
    }

    /// An array of `T`; `null` or a non-array is empty. Elements must still parse.
    pub fn list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned,
    {
        match Value::deserialize(deserializer)? {
            Value::Array(items) => items
                .into_iter()
                .map(|item| serde_json::from_value(item).map_err(D::Error::custom))
                .collect(),
            _ => Ok(Vec::new()),
        }
    }

    /// An array of `T`, with `null` read as empty. Any other non-array fails.
    pub fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: Deserialize<'de>,
    {
        Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_service_full_shape() {
        let value = json!({
            "name": "orders",
            "address": "/rest/orders",
            "useRequest": true,
            "settings": { "useXClientProps": false },
            "resources": [{
                "name": "Order",
                "path": "/Order",
                "idProperty": "id",
                "autoSave": false,
                "operations": [
                    { "name": "read", "path": "?filter={filter}", "type": "read", "verb": "get" },
                    { "name": "submit", "type": "submit", "verb": "put", "useBeforeImage": true }
                ]
            }]
        });

        let service: ServiceDescriptor = serde_json::from_value(value).unwrap();
        assert_eq!(service.name.as_deref(), Some("orders"));
        assert_eq!(service.address.as_deref(), Some("/rest/orders"));
        assert_eq!(service.use_request, Some(true));
        assert!(service.settings.is_some());

        let resource = service.resource("Order").unwrap();
        assert_eq!(resource.id_property.as_deref(), Some("id"));
        assert_eq!(resource.operations.len(), 2);
        assert_eq!(resource.operations[0].kind.as_deref(), Some("read"));
        assert_eq!(resource.operations[1].use_before_image, Some(true));
    }

    #[test]
    fn test_service_minimal_and_extra_keys() {
        let value = json!({ "name": "billing", "region": "eu-1" });

        let service: ServiceDescriptor = serde_json::from_value(value).unwrap();
        assert_eq!(service.name.as_deref(), Some("billing"));
        assert!(service.address.is_none());
        assert!(service.resources.is_empty());
        assert_eq!(service.extra.get("region"), Some(&json!("eu-1")));
    }

    #[test]
    fn test_service_empty_object() {
        let service: ServiceDescriptor = serde_json::from_value(json!({})).unwrap();
        assert_eq!(service, ServiceDescriptor::default());
    }

    #[test]
    fn test_service_builder() {
        let service = ServiceDescriptor::new("orders")
            .with_address("/rest/orders")
            .with_resource(ResourceDescriptor {
                name: Some("Order".to_string()),
                ..ResourceDescriptor::default()
            });

        assert!(service.resource("Order").is_some());
        assert!(service.resource("Invoice").is_none());
    }

    #[test]
    fn test_null_lists_are_empty() {
        let value = json!({
            "name": "orders",
            "resources": [{
                "name": "Order",
                "relations": null,
                "operations": null
            }, {
                "name": "Line",
                "operations": [{ "name": "read", "params": null }]
            }]
        });

        let service: ServiceDescriptor = serde_json::from_value(value).unwrap();
        assert_eq!(service.resources.len(), 2);
        assert!(service.resources[0].relations.is_empty());
        assert!(service.resources[0].operations.is_empty());
        assert!(service.resources[1].operations[0].params.is_empty());

        let service: ServiceDescriptor =
            serde_json::from_value(json!({ "name": "billing", "resources": null })).unwrap();
        assert!(service.resources.is_empty());
    }

    #[test]
    fn test_mistyped_fields_are_unset() {
        let value = json!({
            "name": 42,
            "address": ["/rest"],
            "useRequest": "true",
            "resources": { "name": "NotAList" }
        });

        let service: ServiceDescriptor = serde_json::from_value(value).unwrap();
        assert_eq!(service.name, None);
        assert_eq!(service.address, None);
        assert_eq!(service.use_request, Some(true));
        assert!(service.resources.is_empty());

        let service: ServiceDescriptor =
            serde_json::from_value(json!({ "name": "billing", "useRequest": 1 })).unwrap();
        assert_eq!(service.name.as_deref(), Some("billing"));
        assert_eq!(service.use_request, None);
    }

    #[test]
    fn test_non_object_resource_fails() {
        let result: Result<ServiceDescriptor, _> =
            serde_json::from_value(json!({ "resources": ["Order"] }));
        assert!(result.is_err());
    }
}

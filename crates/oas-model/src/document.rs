//! # Document Root, Components, and Security Schemes
//!
//! The document-level slice of the model: the root [`Document`] object, API
//! metadata, the component registry, and security scheme declarations.
//!
//! Security schemes live in an insertion-ordered map so that "the first
//! declared scheme" is stable and well-defined; filters that pick an existing
//! scheme rely on this ordering.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::ModelError;
use crate::path::PathItem;

/// Security requirement: scheme name → required role/scope names.
///
/// An empty role list means "authenticated, no specific role required".
pub type SecurityRequirement = IndexMap<String, Vec<String>>;

/// OpenAPI document root object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// OpenAPI version (e.g. "3.1.0").
    pub openapi: String,
    /// API metadata.
    pub info: Info,
    /// Available servers.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub servers: Vec<Server>,
    /// Declared paths and their operations, in declaration order.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub paths: IndexMap<String, PathItem>,
    /// Reusable components (security schemes, opaque schemas).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub components: Option<Components>,
    /// Document-level security requirements.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub security: Vec<SecurityRequirement>,
    /// Tags for API grouping.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<Tag>,
}

impl Document {
    /// New empty OpenAPI 3.1 document with the given title and version.
    pub fn new(title: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            openapi: "3.1.0".to_string(),
            info: Info {
                title: title.into(),
                version: version.into(),
                description: None,
                contact: None,
            },
            servers: Vec::new(),
            paths: IndexMap::new(),
            components: None,
            security: Vec::new(),
            tags: Vec::new(),
        }
    }

    /// Borrow the component registry, creating it if absent.
    pub fn components_mut(&mut self) -> &mut Components {
        self.components.get_or_insert_with(Components::default)
    }

    /// Parse a document from JSON text.
    pub fn from_json(text: &str) -> Result<Self, ModelError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String, ModelError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse a document from YAML text.
    pub fn from_yaml(text: &str) -> Result<Self, ModelError> {
        Ok(serde_yaml::from_str(text)?)
    }

    /// Serialize to YAML.
    pub fn to_yaml(&self) -> Result<String, ModelError> {
        Ok(serde_yaml::to_string(self)?)
    }
}

/// API metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Info {
    /// API title.
    pub title: String,
    /// API version.
    pub version: String,
    /// API description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Contact information.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<Contact>,
}

/// Contact information.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    /// Contact name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Contact URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Contact email.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Server information.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Server {
    /// Server URL.
    pub url: String,
    /// Server description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// API tag for grouping operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    /// Tag name.
    pub name: String,
    /// Description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Reusable components.
///
/// Only security schemes are modeled structurally; schemas and other
/// component kinds are carried opaquely so documents round-trip.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Components {
    /// Reusable schemas, carried opaquely.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub schemas: IndexMap<String, serde_json::Value>,
    /// Declared security schemes, in declaration order.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    #[serde(rename = "securitySchemes")]
    pub security_schemes: IndexMap<String, SecurityScheme>,
}

impl Components {
    /// Name of the first *declared* security scheme, if any.
    pub fn first_scheme_name(&self) -> Option<&str> {
        self.security_schemes.keys().next().map(String::as_str)
    }

    /// Register a security scheme under `name`, replacing any existing one.
    pub fn add_security_scheme(&mut self, name: impl Into<String>, scheme: SecurityScheme) {
        self.security_schemes.insert(name.into(), scheme);
    }
}

/// Security scheme declaration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SecurityScheme {
    /// Security scheme type ("http", "apiKey", "oauth2", "openIdConnect").
    #[serde(rename = "type")]
    pub scheme_type: String,
    /// Description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// HTTP auth scheme name (for type "http", e.g. "bearer").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheme: Option<String>,
    /// Bearer token format hint (e.g. "JWT").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[serde(rename = "bearerFormat")]
    pub bearer_format: Option<String>,
    /// API key location (for type "apiKey": "query", "header", "cookie").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[serde(rename = "in")]
    pub location: Option<String>,
    /// API key name (for type "apiKey").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl SecurityScheme {
    /// HTTP bearer scheme, the common default for generated documents.
    pub fn http_bearer() -> Self {
        Self {
            scheme_type: "http".to_string(),
            scheme: Some("bearer".to_string()),
            ..Self::default()
        }
    }
}

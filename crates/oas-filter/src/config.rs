//! # Filter Configuration
//!
//! Association tables derived upstream from annotation scanning, plus the
//! fallback security scheme name. Supplied once at filter construction; the
//! filter holds no other state.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Configuration for [`SecurityAnnotationFilter`](crate::SecurityAnnotationFilter).
///
/// Keys in both association tables are origin references: the stable
/// per-operation identifiers assigned by the document builder (see
/// [`Operation::origin_ref`](oas_model::Operation)). Any field may be empty.
///
/// Deserializes from the camelCase form emitted by annotation scanners:
///
/// ```yaml
/// defaultSecuritySchemeName: jwt
/// rolesAllowed:
///   AdminResource#deleteUser: [admin]
/// authenticatedOnly:
///   - UserResource#me
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SecurityFilterConfig {
    /// Scheme name referenced when the document declares no scheme itself.
    pub default_security_scheme_name: String,
    /// Origin reference → ordered list of allowed role names.
    pub roles_allowed: IndexMap<String, Vec<String>>,
    /// Origin references requiring authentication without specific roles.
    pub authenticated_only: Vec<String>,
}

impl SecurityFilterConfig {
    /// New configuration with empty association tables.
    pub fn new(default_security_scheme_name: impl Into<String>) -> Self {
        Self {
            default_security_scheme_name: default_security_scheme_name.into(),
            ..Self::default()
        }
    }

    /// Register a role-restricted origin reference.
    pub fn with_roles<I, S>(mut self, origin_ref: impl Into<String>, roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.roles_allowed
            .insert(origin_ref.into(), roles.into_iter().map(Into::into).collect());
        self
    }

    /// Register an origin reference that requires authentication only.
    pub fn with_authenticated(mut self, origin_ref: impl Into<String>) -> Self {
        self.authenticated_only.push(origin_ref.into());
        self
    }

    /// True when both association tables are empty: the filter pass is a no-op.
    pub fn is_empty(&self) -> bool {
        self.roles_allowed.is_empty() && self.authenticated_only.is_empty()
    }
}

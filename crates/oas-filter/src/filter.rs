//! # Security Annotation Filter
//!
//! The post-processing pass that makes declared access control visible in a
//! generated OpenAPI document. Operations are correlated to their originating
//! source methods through [`Operation::origin_ref`](oas_model::Operation);
//! references found in the role table gain a role-scoped security
//! requirement, references in the authenticated-only table gain a role-less
//! one, and both gain the standard 401/403 response entries.
//!
//! ## Mutation policy
//!
//! - Security requirements are append-only: existing requirements are never
//!   removed, and repeated application appends duplicates.
//! - Response entries are inserted by status-code key: a pre-existing 401 or
//!   403 entry is overwritten, never duplicated.

use oas_model::{Components, Document, Operation, Response, SecurityRequirement};

use crate::config::SecurityFilterConfig;

/// Description attached to the injected `401` response entry.
pub const UNAUTHORIZED_DESCRIPTION: &str = "Not Authorized";

/// Description attached to the injected `403` response entry.
pub const FORBIDDEN_DESCRIPTION: &str = "Not Allowed";

/// A post-processing filter over a fully-built OpenAPI document.
///
/// The hook contract of the document-generation pipeline: receive the
/// document, mutate it in place, return. Filters run synchronously, once per
/// build, with exclusive access to the document.
pub trait DocumentFilter {
    /// Apply this filter to `document`, mutating it in place.
    fn apply(&self, document: &mut Document);
}

/// Injects security requirements and 401/403 responses onto operations
/// generated from role-restricted or authentication-required methods.
///
/// The scheme referenced by the injected requirements is the document's first
/// declared security scheme when one exists, otherwise the configured default
/// name. The filter never creates schemes.
#[derive(Debug, Clone)]
pub struct SecurityAnnotationFilter {
    config: SecurityFilterConfig,
}

impl SecurityAnnotationFilter {
    /// New filter over the given association tables.
    pub fn new(config: SecurityFilterConfig) -> Self {
        Self { config }
    }

    /// Name of the scheme the injected requirements will reference.
    ///
    /// Prefers the first scheme *declared* in the document's component
    /// registry; falls back to the configured default name when the document
    /// declares none.
    fn active_scheme_name<'a>(&'a self, document: &'a Document) -> &'a str {
        document
            .components
            .as_ref()
            .and_then(Components::first_scheme_name)
            .unwrap_or(&self.config.default_security_scheme_name)
    }

    /// Attach a requirement for `scheme` with `roles` plus the standard
    /// 401/403 response entries.
    fn attach_security(operation: &mut Operation, scheme: &str, roles: Vec<String>) {
        let mut requirement = SecurityRequirement::new();
        requirement.insert(scheme.to_string(), roles);
        operation.security.push(requirement);

        operation
            .responses
            .insert("401".to_string(), Response::new(UNAUTHORIZED_DESCRIPTION));
        operation
            .responses
            .insert("403".to_string(), Response::new(FORBIDDEN_DESCRIPTION));
    }
}

impl DocumentFilter for SecurityAnnotationFilter {
    fn apply(&self, document: &mut Document) {
        if self.config.is_empty() {
            tracing::trace!("no security annotations registered, skipping pass");
            return;
        }

        let scheme = self.active_scheme_name(document).to_string();

        for (path, item) in document.paths.iter_mut() {
            for (method, operation) in item.operations_mut() {
                // Role restriction wins when a reference is in both tables.
                let roles = operation
                    .origin_ref
                    .as_deref()
                    .and_then(|origin_ref| self.config.roles_allowed.get(origin_ref))
                    .cloned();

                if let Some(roles) = roles {
                    tracing::debug!(
                        %path,
                        %method,
                        scheme = %scheme,
                        ?roles,
                        "attaching role-restricted security requirement"
                    );
                    Self::attach_security(operation, &scheme, roles);
                } else if operation
                    .origin_ref
                    .as_deref()
                    .is_some_and(|origin_ref| {
                        self.config
                            .authenticated_only
                            .iter()
                            .any(|candidate| candidate == origin_ref)
                    })
                {
                    tracing::debug!(
                        %path,
                        %method,
                        scheme = %scheme,
                        "attaching authentication-only security requirement"
                    );
                    Self::attach_security(operation, &scheme, Vec::new());
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oas_model::{HttpMethod, PathItem, SecurityScheme};

    fn document_with_operation(path: &str, method: HttpMethod, origin_ref: &str) -> Document {
        let mut doc = Document::new("Test API", "1.0");
        let mut item = PathItem::default();
        item.insert(method, Operation::with_origin_ref(origin_ref));
        doc.paths.insert(path.to_string(), item);
        doc
    }

    fn operation<'a>(doc: &'a Document, path: &str, method: HttpMethod) -> &'a Operation {
        doc.paths[path].operation(method).expect("operation exists")
    }

    #[test]
    fn test_empty_tables_leave_document_unchanged() {
        let mut doc = document_with_operation("/pets", HttpMethod::Get, "PetResource#list");
        let before = doc.clone();
        SecurityAnnotationFilter::new(SecurityFilterConfig::new("jwt")).apply(&mut doc);
        assert_eq!(doc, before);
    }

    #[test]
    fn test_role_restricted_operation_gains_requirement_and_responses() {
        let mut doc = document_with_operation("/admin", HttpMethod::Delete, "Admin#delete");
        let config = SecurityFilterConfig::new("jwt").with_roles("Admin#delete", ["admin", "auditor"]);
        SecurityAnnotationFilter::new(config).apply(&mut doc);

        let op = operation(&doc, "/admin", HttpMethod::Delete);
        assert_eq!(op.security.len(), 1);
        assert_eq!(
            op.security[0]["jwt"],
            vec!["admin".to_string(), "auditor".to_string()]
        );
        assert_eq!(op.responses["401"].description, UNAUTHORIZED_DESCRIPTION);
        assert_eq!(op.responses["403"].description, FORBIDDEN_DESCRIPTION);
    }

    #[test]
    fn test_authenticated_only_operation_gains_roleless_requirement() {
        let mut doc = document_with_operation("/me", HttpMethod::Get, "User#me");
        let config = SecurityFilterConfig::new("jwt").with_authenticated("User#me");
        SecurityAnnotationFilter::new(config).apply(&mut doc);

        let op = operation(&doc, "/me", HttpMethod::Get);
        assert_eq!(op.security.len(), 1);
        assert!(op.security[0]["jwt"].is_empty());
        assert_eq!(op.responses["401"].description, UNAUTHORIZED_DESCRIPTION);
        assert_eq!(op.responses["403"].description, FORBIDDEN_DESCRIPTION);
    }

    #[test]
    fn test_unmatched_operation_untouched() {
        let mut doc = document_with_operation("/pets", HttpMethod::Get, "PetResource#list");
        let config = SecurityFilterConfig::new("jwt").with_roles("Other#op", ["admin"]);
        SecurityAnnotationFilter::new(config).apply(&mut doc);

        let op = operation(&doc, "/pets", HttpMethod::Get);
        assert!(op.security.is_empty());
        assert!(op.responses.is_empty());
    }

    #[test]
    fn test_operation_without_origin_ref_untouched() {
        let mut doc = Document::new("Test API", "1.0");
        let mut item = PathItem::default();
        item.insert(HttpMethod::Get, Operation::default());
        doc.paths.insert("/anon".to_string(), item);

        let config = SecurityFilterConfig::new("jwt").with_roles("Admin#delete", ["admin"]);
        SecurityAnnotationFilter::new(config).apply(&mut doc);

        let op = operation(&doc, "/anon", HttpMethod::Get);
        assert!(op.security.is_empty());
        assert!(op.responses.is_empty());
    }

    #[test]
    fn test_declared_scheme_beats_configured_default() {
        let mut doc = document_with_operation("/admin", HttpMethod::Delete, "Admin#delete");
        doc.components_mut()
            .add_security_scheme("bearerAuth", SecurityScheme::http_bearer());

        let config = SecurityFilterConfig::new("basicAuth").with_roles("Admin#delete", ["admin"]);
        SecurityAnnotationFilter::new(config).apply(&mut doc);

        let op = operation(&doc, "/admin", HttpMethod::Delete);
        assert!(op.security[0].contains_key("bearerAuth"));
        assert!(!op.security[0].contains_key("basicAuth"));
    }

    #[test]
    fn test_default_scheme_used_when_document_declares_none() {
        let mut doc = document_with_operation("/admin", HttpMethod::Delete, "Admin#delete");
        let config = SecurityFilterConfig::new("basicAuth").with_roles("Admin#delete", ["admin"]);
        SecurityAnnotationFilter::new(config).apply(&mut doc);

        let op = operation(&doc, "/admin", HttpMethod::Delete);
        assert!(op.security[0].contains_key("basicAuth"));
    }

    #[test]
    fn test_first_declared_scheme_selected_among_several() {
        let mut doc = document_with_operation("/admin", HttpMethod::Delete, "Admin#delete");
        doc.components_mut()
            .add_security_scheme("zeta", SecurityScheme::http_bearer());
        doc.components_mut()
            .add_security_scheme("alpha", SecurityScheme::http_bearer());

        let config = SecurityFilterConfig::new("jwt").with_roles("Admin#delete", ["admin"]);
        SecurityAnnotationFilter::new(config).apply(&mut doc);

        let op = operation(&doc, "/admin", HttpMethod::Delete);
        assert!(op.security[0].contains_key("zeta"));
    }

    #[test]
    fn test_role_table_wins_when_reference_in_both_tables() {
        let mut doc = document_with_operation("/admin", HttpMethod::Delete, "Admin#delete");
        let config = SecurityFilterConfig::new("jwt")
            .with_roles("Admin#delete", ["admin"])
            .with_authenticated("Admin#delete");
        SecurityAnnotationFilter::new(config).apply(&mut doc);

        let op = operation(&doc, "/admin", HttpMethod::Delete);
        assert_eq!(op.security.len(), 1);
        assert_eq!(op.security[0]["jwt"], vec!["admin".to_string()]);
    }

    #[test]
    fn test_existing_security_requirements_preserved() {
        let mut doc = document_with_operation("/admin", HttpMethod::Delete, "Admin#delete");
        {
            let item = doc.paths.get_mut("/admin").unwrap();
            let op = item.operations_mut().next().unwrap().1;
            let mut existing = SecurityRequirement::new();
            existing.insert("apiKey".to_string(), Vec::new());
            op.security.push(existing);
        }

        let config = SecurityFilterConfig::new("jwt").with_roles("Admin#delete", ["admin"]);
        SecurityAnnotationFilter::new(config).apply(&mut doc);

        let op = operation(&doc, "/admin", HttpMethod::Delete);
        assert_eq!(op.security.len(), 2);
        assert!(op.security[0].contains_key("apiKey"));
        assert!(op.security[1].contains_key("jwt"));
    }

    #[test]
    fn test_existing_401_response_overwritten_not_duplicated() {
        let mut doc = document_with_operation("/admin", HttpMethod::Delete, "Admin#delete");
        {
            let item = doc.paths.get_mut("/admin").unwrap();
            let op = item.operations_mut().next().unwrap().1;
            op.responses
                .insert("401".to_string(), Response::new("custom unauthorized"));
        }

        let config = SecurityFilterConfig::new("jwt").with_roles("Admin#delete", ["admin"]);
        SecurityAnnotationFilter::new(config).apply(&mut doc);

        let op = operation(&doc, "/admin", HttpMethod::Delete);
        assert_eq!(op.responses.iter().filter(|(code, _)| *code == "401").count(), 1);
        assert_eq!(op.responses["401"].description, UNAUTHORIZED_DESCRIPTION);
    }

    #[test]
    fn test_double_apply_duplicates_requirements_but_not_responses() {
        let mut doc = document_with_operation("/admin", HttpMethod::Delete, "Admin#delete");
        let filter = SecurityAnnotationFilter::new(
            SecurityFilterConfig::new("jwt").with_roles("Admin#delete", ["admin"]),
        );
        filter.apply(&mut doc);
        filter.apply(&mut doc);

        let op = operation(&doc, "/admin", HttpMethod::Delete);
        // Requirements are append-only; responses insert by unique key.
        assert_eq!(op.security.len(), 2);
        assert_eq!(op.responses.len(), 2);
    }

    #[test]
    fn test_pathless_document_is_benign() {
        let mut doc = Document::new("Empty", "1.0");
        let config = SecurityFilterConfig::new("jwt").with_roles("Admin#delete", ["admin"]);
        SecurityAnnotationFilter::new(config).apply(&mut doc);
        assert!(doc.paths.is_empty());
    }

    #[test]
    fn test_operationless_path_item_is_benign() {
        let mut doc = Document::new("Empty", "1.0");
        doc.paths.insert("/stub".to_string(), PathItem::default());
        let before = doc.clone();
        let config = SecurityFilterConfig::new("jwt").with_roles("Admin#delete", ["admin"]);
        SecurityAnnotationFilter::new(config).apply(&mut doc);
        assert_eq!(doc, before);
    }

    #[test]
    fn test_all_methods_on_one_path_are_visited() {
        let mut doc = Document::new("Test API", "1.0");
        let mut item = PathItem::default();
        item.insert(HttpMethod::Get, Operation::with_origin_ref("R#get"));
        item.insert(HttpMethod::Post, Operation::with_origin_ref("R#post"));
        item.insert(HttpMethod::Delete, Operation::with_origin_ref("R#delete"));
        doc.paths.insert("/r".to_string(), item);

        let config = SecurityFilterConfig::new("jwt")
            .with_roles("R#get", ["viewer"])
            .with_roles("R#post", ["editor"])
            .with_authenticated("R#delete");
        SecurityAnnotationFilter::new(config).apply(&mut doc);

        assert_eq!(
            operation(&doc, "/r", HttpMethod::Get).security[0]["jwt"],
            vec!["viewer".to_string()]
        );
        assert_eq!(
            operation(&doc, "/r", HttpMethod::Post).security[0]["jwt"],
            vec!["editor".to_string()]
        );
        assert!(operation(&doc, "/r", HttpMethod::Delete).security[0]["jwt"].is_empty());
    }
}

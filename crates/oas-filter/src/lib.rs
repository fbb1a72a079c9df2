//! # oas-filter — Security Annotation Filters for Generated OpenAPI Documents
//!
//! A document-generation pipeline builds an OpenAPI [`Document`] from
//! annotated source methods, then runs post-processing filters over it before
//! publishing. This crate provides the filter that makes declared access
//! control visible in the published description: operations generated from
//! role-restricted or authentication-required methods gain a security
//! requirement and the standard 401/403 response entries.
//!
//! ## Usage
//!
//! ```
//! use oas_filter::{DocumentFilter, SecurityAnnotationFilter, SecurityFilterConfig};
//! use oas_model::{Document, HttpMethod, Operation, PathItem};
//!
//! let mut doc = Document::new("Admin API", "1.0");
//! let mut item = PathItem::default();
//! item.insert(
//!     HttpMethod::Delete,
//!     Operation::with_origin_ref("AdminResource#deleteUser"),
//! );
//! doc.paths.insert("/admin".to_string(), item);
//!
//! let config = SecurityFilterConfig::new("jwt")
//!     .with_roles("AdminResource#deleteUser", ["admin"]);
//! SecurityAnnotationFilter::new(config).apply(&mut doc);
//!
//! let op = doc.paths["/admin"].operation(HttpMethod::Delete).unwrap();
//! assert_eq!(op.security[0]["jwt"], vec!["admin".to_string()]);
//! assert_eq!(op.responses["401"].description, "Not Authorized");
//! ```
//!
//! [`Document`]: oas_model::Document

pub mod config;
pub mod filter;

pub use config::SecurityFilterConfig;
pub use filter::{
    DocumentFilter, SecurityAnnotationFilter, FORBIDDEN_DESCRIPTION, UNAUTHORIZED_DESCRIPTION,
};

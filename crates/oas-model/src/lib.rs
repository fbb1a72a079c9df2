//! # oas-model — Minimal OpenAPI 3.1 Document Object Model
//!
//! The document model that post-processing filters traverse and mutate.
//! It covers the slice of OpenAPI 3.1 that a generated API description
//! carries through a filter pass: document root, info, paths, path items,
//! operations, responses, components, and security schemes. Schema modeling
//! and document validation are out of scope.
//!
//! ## Key Design Principles
//!
//! 1. **Insertion-ordered maps everywhere.** Paths, responses, and security
//!    schemes use `IndexMap`, so "the first declared security scheme" is a
//!    well-defined notion rather than an accident of hash iteration.
//!
//! 2. **First-class origin references.** Every [`Operation`] can carry an
//!    `origin_ref` identifying the source method it was generated from,
//!    assigned upstream by the document builder. It serializes as the
//!    `x-origin-ref` vendor extension, so documents remain valid OpenAPI.
//!
//! 3. **Lossless round-tripping.** All model types derive `Serialize`,
//!    `Deserialize`, and `PartialEq`; [`Document`] round-trips through JSON
//!    and YAML without reordering or dropping the fields it models.
//!
//! ## Crate Policy
//!
//! - No dependencies on other workspace crates (leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod document;
pub mod error;
pub mod path;

// Re-export primary types for ergonomic imports.
pub use document::{
    Components, Contact, Document, Info, SecurityRequirement, SecurityScheme, Server, Tag,
};
pub use error::ModelError;
pub use path::{HttpMethod, Operation, PathItem, Response};

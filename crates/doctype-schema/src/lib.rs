//! # doctype-schema
//!
//! Type expression model, meta-schema, loader, and registry.
//!
//! A schema is itself a decoded document: an atomic tag string or a
//! single-key mapping naming a constructed kind. This crate decodes that raw
//! shape into the closed [`TypeExpr`] tree, provides the self-describing
//! [`META_SCHEMA`], and offers file/string loading with registry caching.

pub mod model;
pub mod meta;
pub mod loader;
pub mod registry;

pub use model::{Atom, DictSpec, TypeExpr};
pub use meta::META_SCHEMA;
pub use loader::{SchemaLoader, raw_from_json, raw_from_yaml};
pub use registry::SchemaRegistry;

use thiserror::Error;

/// Errors that can occur when decoding or loading schemas
///
/// Every variant is a schema-authoring defect, never a property of the data
/// being validated. Data non-conformance is the ordinary `false` result of
/// the validation crate and is not represented here.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid type at {path}: expected an atomic tag or a single-key mapping, found {found}")]
    NotAType { path: String, found: String },

    #[error("Unknown atomic type '{tag}' at {path}")]
    UnknownAtom { path: String, tag: String },

    #[error("Unknown constructed kind '{kind}' at {path}")]
    UnknownKind { path: String, kind: String },

    #[error("Constructed type at {path} must carry exactly one kind key, found {found}")]
    KindArity { path: String, found: usize },

    #[error("Invalid {kind} payload at {path}: expected {expected}, found {found}")]
    PayloadShape {
        path: String,
        kind: &'static str,
        expected: &'static str,
        found: String,
    },

    #[error("Schema not found: {0}")]
    NotFound(String),

    #[error("Invalid schema format: {0}")]
    InvalidFormat(String),

    #[error(transparent)]
    Value(#[from] doctype_value::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

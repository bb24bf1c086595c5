#![deny(warnings)]
#![deny(rust_2018_idioms)]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

//! # doctype-value
//!
//! Decoded document values for the doctypes workspace.
//!
//! This crate provides the in-memory representation of a decoded JSON/YAML
//! document: nested nulls, booleans, numbers, strings, sequences, and
//! string-keyed mappings. Decoding the textual formats themselves is the job
//! of `serde_json`/`serde_yaml`; this crate supplies the conversions from
//! their value types into the shared [`Value`] tree.

/// Conversions between [`Value`] and the serde decoder value types.
pub mod convert;
/// The decoded value tree and its accessors.
pub mod value;

/// Primary decoded value type.
pub use value::Value;

use thiserror::Error;

/// Errors that can occur when converting decoded documents
#[derive(Error, Debug)]
pub enum Error {
    #[error("Mapping key is not a string: {key}")]
    NonStringKey { key: String },
}

/// Crate-local result type for value conversions.
pub type Result<T> = std::result::Result<T, Error>;

#![deny(warnings)]
#![deny(rust_2018_idioms)]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

//! # doctype-validation
//!
//! Recursive matching engine deciding whether a decoded document conforms
//! to a type expression.
//!
//! Conformance is a boolean: non-conformant data is the ordinary `Ok(false)`
//! outcome. Errors are reserved for defects in the schema itself, either a
//! malformed type expression or a self-referential schema caught by the
//! recursion depth guard.
//!
//! ## Example Usage
//!
//! ```rust
//! use doctype_schema::raw_from_yaml;
//! use doctype_validation::{valid, validate_schema};
//!
//! // Gate the schema through the meta-schema before using it.
//! let schema = validate_schema(&raw_from_yaml("{list: number}").unwrap()).unwrap();
//!
//! let data = raw_from_yaml("[1, 2, 3]").unwrap();
//! assert!(valid(&data, &schema).unwrap());
//!
//! let data = raw_from_yaml("[1, two]").unwrap();
//! assert!(!valid(&data, &schema).unwrap());
//! ```

pub mod engine;
pub mod rules;
pub mod scope;

// Re-export main types
pub use engine::{DEFAULT_MAX_DEPTH, ValidationConfig, Validator};
pub use rules::{is_number, matches_atom, matches_date, matches_datetime, matches_pattern, matches_time};
pub use scope::{Frame, Scopes};

use doctype_schema::TypeExpr;
use doctype_value::Value;
use thiserror::Error;

/// Errors that can occur during validation
///
/// Data non-conformance is never an error; it is the `Ok(false)` result of
/// [`valid`]. These variants all describe schema-level defects.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Schema error: {0}")]
    Schema(#[from] doctype_schema::Error),

    #[error("Recursion depth limit {limit} exceeded; the type expression has no non-recursive base case")]
    DepthLimit { limit: usize },

    #[error("Schema rejected by the meta-schema")]
    Rejected,
}

pub type Result<T> = std::result::Result<T, Error>;

/// Convenience function to check a value with default settings
///
/// # Errors
///
/// Returns an error when the recursion depth guard trips on a
/// self-referential schema.
pub fn valid(value: &Value, schema: &TypeExpr) -> Result<bool> {
    Validator::new().valid(value, schema)
}

/// Convenience function to gate a raw schema through the meta-schema
///
/// # Errors
///
/// Returns a schema-level rejection when the raw value is not a valid type
/// expression.
pub fn validate_schema(raw: &Value) -> Result<TypeExpr> {
    Validator::new().validate_schema(raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use doctype_schema::raw_from_yaml;

    #[test]
    fn test_convenience_valid() {
        let schema = validate_schema(&raw_from_yaml("{oneof: [up, down]}").unwrap()).unwrap();
        assert!(valid(&raw_from_yaml("up").unwrap(), &schema).unwrap());
        assert!(!valid(&raw_from_yaml("sideways").unwrap(), &schema).unwrap());
    }

    #[test]
    fn test_convenience_validate_schema_rejects() {
        let raw = raw_from_yaml("{frobnicate: string}").unwrap();
        let result = validate_schema(&raw);
        assert!(matches!(
            result,
            Err(Error::Schema(doctype_schema::Error::UnknownKind { .. }))
        ));
    }
}

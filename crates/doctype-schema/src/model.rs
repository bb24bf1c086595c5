//! Type expression model
//!
//! The decoded form of a schema document. A raw schema value is either an
//! atomic tag string or a mapping with exactly one key naming a constructed
//! kind; [`TypeExpr::from_value`] turns that shape into a closed sum type so
//! the validation engine can match on it exhaustively.

use crate::{Error, Result};
use doctype_value::Value;
use std::collections::BTreeMap;

/// The atomic leaf types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Atom {
    /// Any well-formed value
    Any,
    /// Any string
    String,
    /// A `YYYY/MM/DD` string
    Date,
    /// An `HH:MM:SS` string, optional fractional seconds
    Time,
    /// A `YYYY/MM/DD HH:MM:SS` string, optional fractional seconds
    DateTime,
    /// A number, or a string that parses as one
    Number,
}

impl Atom {
    /// All atomic tags, in the order the meta-schema enumerates them
    pub const ALL: [Atom; 6] = [
        Atom::Any,
        Atom::String,
        Atom::Date,
        Atom::Time,
        Atom::DateTime,
        Atom::Number,
    ];

    /// Parse an atomic tag name
    pub fn parse(tag: &str) -> Option<Self> {
        match tag {
            "any" => Some(Atom::Any),
            "string" => Some(Atom::String),
            "date" => Some(Atom::Date),
            "time" => Some(Atom::Time),
            "datetime" => Some(Atom::DateTime),
            "number" => Some(Atom::Number),
            _ => None,
        }
    }

    /// The tag name as it appears in schema documents
    pub fn as_str(self) -> &'static str {
        match self {
            Atom::Any => "any",
            Atom::String => "string",
            Atom::Date => "date",
            Atom::Time => "time",
            Atom::DateTime => "datetime",
            Atom::Number => "number",
        }
    }
}

/// Key layout of a `dict` payload
///
/// Payload keys are split at decode time: plain names are required, names
/// with a `?` suffix are optional (suffix stripped), and the `*` key admits
/// and constrains every key not otherwise named. Without a wildcard the
/// mapping is closed-world.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DictSpec {
    /// Keys that must be present
    pub required: BTreeMap<String, TypeExpr>,
    /// Keys that may be present
    pub optional: BTreeMap<String, TypeExpr>,
    /// Type constraining all remaining keys, if extra keys are admitted
    pub wildcard: Option<Box<TypeExpr>>,
}

impl DictSpec {
    /// Create an empty spec (matches only the empty mapping)
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a required key
    #[must_use]
    pub fn required(mut self, name: impl Into<String>, ty: TypeExpr) -> Self {
        self.required.insert(name.into(), ty);
        self
    }

    /// Add an optional key
    #[must_use]
    pub fn optional(mut self, name: impl Into<String>, ty: TypeExpr) -> Self {
        self.optional.insert(name.into(), ty);
        self
    }

    /// Admit extra keys, constrained to the given type
    #[must_use]
    pub fn wildcard(mut self, ty: TypeExpr) -> Self {
        self.wildcard = Some(Box::new(ty));
        self
    }
}

/// A type expression
///
/// Immutable once constructed; validation only reads it, so a compiled
/// expression can be shared freely across concurrent validations.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeExpr {
    /// An atomic leaf type
    Atom(Atom),

    /// `oneof`: an enumeration of permitted string values
    OneOf(Vec<String>),

    /// `string`: a string constrained by a regex pattern
    Pattern(String),

    /// `list`: arbitrary-length sequence with a single element type
    List(Box<TypeExpr>),

    /// `tuple`: fixed-length sequence with per-position types
    Tuple(Vec<TypeExpr>),

    /// `dict`: mapping with required/optional/wildcard keys
    Dict(DictSpec),

    /// `d_u`: discriminated union, exactly one tag key present
    TaggedUnion(BTreeMap<String, TypeExpr>),

    /// `union`: undiscriminated union, alternatives tried in order
    Union(Vec<TypeExpr>),

    /// `with`: lexically scoped name bindings around a body type
    With {
        bindings: BTreeMap<String, TypeExpr>,
        body: Box<TypeExpr>,
    },

    /// `named`: reference to a name bound by an enclosing `with`
    Named(String),
}

impl TypeExpr {
    /// Build a `oneof` from string values
    pub fn one_of<I, S>(options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        TypeExpr::OneOf(options.into_iter().map(Into::into).collect())
    }

    /// Build a constrained-string type from a regex pattern
    pub fn pattern(pattern: impl Into<String>) -> Self {
        TypeExpr::Pattern(pattern.into())
    }

    /// Build a `list` type
    pub fn list(element: TypeExpr) -> Self {
        TypeExpr::List(Box::new(element))
    }

    /// Build a `tuple` type
    pub fn tuple<I: IntoIterator<Item = TypeExpr>>(fields: I) -> Self {
        TypeExpr::Tuple(fields.into_iter().collect())
    }

    /// Build a `d_u` type from (tag, type) pairs
    pub fn tagged_union<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = (S, TypeExpr)>,
        S: Into<String>,
    {
        TypeExpr::TaggedUnion(tags.into_iter().map(|(tag, ty)| (tag.into(), ty)).collect())
    }

    /// Build a `union` type
    pub fn union<I: IntoIterator<Item = TypeExpr>>(alternatives: I) -> Self {
        TypeExpr::Union(alternatives.into_iter().collect())
    }

    /// Build a `with` type
    pub fn with(bindings: BTreeMap<String, TypeExpr>, body: TypeExpr) -> Self {
        TypeExpr::With {
            bindings,
            body: Box::new(body),
        }
    }

    /// Build a `named` reference
    pub fn named(name: impl Into<String>) -> Self {
        TypeExpr::Named(name.into())
    }

    /// Decode a raw schema value into a type expression
    ///
    /// # Errors
    ///
    /// Returns an error when the raw value is not a well-shaped type
    /// expression: an unrecognized atomic tag or constructed kind, a
    /// constructed node without exactly one key, or a payload whose shape
    /// does not fit its kind. Errors carry the `$`-rooted path of the
    /// offending node.
    pub fn from_value(raw: &Value) -> Result<Self> {
        Self::decode(raw, "$")
    }

    fn decode(raw: &Value, path: &str) -> Result<Self> {
        match raw {
            Value::String(tag) => {
                Atom::parse(tag).map(TypeExpr::Atom).ok_or_else(|| Error::UnknownAtom {
                    path: path.to_string(),
                    tag: tag.clone(),
                })
            }
            Value::Mapping(entries) => {
                let mut iter = entries.iter();
                let Some((kind, payload)) = iter.next() else {
                    return Err(Error::KindArity {
                        path: path.to_string(),
                        found: 0,
                    });
                };
                if iter.next().is_some() {
                    return Err(Error::KindArity {
                        path: path.to_string(),
                        found: entries.len(),
                    });
                }
                Self::decode_kind(kind, payload, path)
            }
            other => Err(Error::NotAType {
                path: path.to_string(),
                found: other.kind().to_string(),
            }),
        }
    }

    fn decode_kind(kind: &str, payload: &Value, path: &str) -> Result<Self> {
        match kind {
            "oneof" => {
                let items = expect_sequence(payload, "oneof", "a list of strings", path)?;
                let mut options = Vec::with_capacity(items.len());
                for (i, item) in items.iter().enumerate() {
                    let Some(option) = item.as_str() else {
                        return Err(Error::PayloadShape {
                            path: format!("{path}.oneof[{i}]"),
                            kind: "oneof",
                            expected: "a string",
                            found: item.kind().to_string(),
                        });
                    };
                    options.push(option.to_string());
                }
                Ok(TypeExpr::OneOf(options))
            }
            "string" => {
                let pattern = expect_string(payload, "string", "a regex pattern string", path)?;
                Ok(TypeExpr::Pattern(pattern.to_string()))
            }
            "list" => {
                let element = Self::decode(payload, &format!("{path}.list"))?;
                Ok(TypeExpr::list(element))
            }
            "tuple" => {
                let items = expect_sequence(payload, "tuple", "a list of types", path)?;
                let fields = items
                    .iter()
                    .enumerate()
                    .map(|(i, item)| Self::decode(item, &format!("{path}.tuple[{i}]")))
                    .collect::<Result<Vec<_>>>()?;
                Ok(TypeExpr::Tuple(fields))
            }
            "dict" => {
                let entries = expect_mapping(payload, "dict", "a mapping from keys to types", path)?;
                let mut spec = DictSpec::new();
                for (key, item) in entries {
                    let ty = Self::decode(item, &format!("{path}.dict.{key}"))?;
                    if key == "*" {
                        spec.wildcard = Some(Box::new(ty));
                    } else if let Some(name) = key.strip_suffix('?') {
                        spec.optional.insert(name.to_string(), ty);
                    } else {
                        spec.required.insert(key.clone(), ty);
                    }
                }
                Ok(TypeExpr::Dict(spec))
            }
            "d_u" => {
                let entries = expect_mapping(payload, "d_u", "a mapping from tags to types", path)?;
                let tags = entries
                    .iter()
                    .map(|(tag, item)| {
                        Ok((tag.clone(), Self::decode(item, &format!("{path}.d_u.{tag}"))?))
                    })
                    .collect::<Result<BTreeMap<_, _>>>()?;
                Ok(TypeExpr::TaggedUnion(tags))
            }
            "union" => {
                let items = expect_sequence(payload, "union", "a list of types", path)?;
                let alternatives = items
                    .iter()
                    .enumerate()
                    .map(|(i, item)| Self::decode(item, &format!("{path}.union[{i}]")))
                    .collect::<Result<Vec<_>>>()?;
                Ok(TypeExpr::Union(alternatives))
            }
            "with" => {
                let items =
                    expect_sequence(payload, "with", "a 2-element list [bindings, type]", path)?;
                let [raw_bindings, raw_body] = items else {
                    return Err(Error::PayloadShape {
                        path: path.to_string(),
                        kind: "with",
                        expected: "a 2-element list [bindings, type]",
                        found: format!("a list of {} elements", items.len()),
                    });
                };
                let entries = expect_mapping(
                    raw_bindings,
                    "with",
                    "a mapping from names to types as the first element",
                    path,
                )?;
                let bindings = entries
                    .iter()
                    .map(|(name, item)| {
                        Ok((
                            name.clone(),
                            Self::decode(item, &format!("{path}.with.{name}"))?,
                        ))
                    })
                    .collect::<Result<BTreeMap<_, _>>>()?;
                let body = Self::decode(raw_body, &format!("{path}.with.body"))?;
                Ok(TypeExpr::with(bindings, body))
            }
            "named" => {
                let name = expect_string(payload, "named", "a name string", path)?;
                Ok(TypeExpr::Named(name.to_string()))
            }
            other => Err(Error::UnknownKind {
                path: path.to_string(),
                kind: other.to_string(),
            }),
        }
    }

    /// Re-encode the expression into its raw document form
    ///
    /// Inverse of [`TypeExpr::from_value`]: optional dict keys regain their
    /// `?` suffix and the wildcard its `*` key.
    pub fn to_value(&self) -> Value {
        match self {
            TypeExpr::Atom(atom) => Value::String(atom.as_str().to_string()),
            TypeExpr::OneOf(options) => kind_value(
                "oneof",
                Value::Sequence(
                    options
                        .iter()
                        .map(|option| Value::String(option.clone()))
                        .collect(),
                ),
            ),
            TypeExpr::Pattern(pattern) => kind_value("string", Value::String(pattern.clone())),
            TypeExpr::List(element) => kind_value("list", element.to_value()),
            TypeExpr::Tuple(fields) => kind_value(
                "tuple",
                Value::Sequence(fields.iter().map(TypeExpr::to_value).collect()),
            ),
            TypeExpr::Dict(spec) => {
                let mut entries = BTreeMap::new();
                for (name, ty) in &spec.required {
                    entries.insert(name.clone(), ty.to_value());
                }
                for (name, ty) in &spec.optional {
                    entries.insert(format!("{name}?"), ty.to_value());
                }
                if let Some(ty) = &spec.wildcard {
                    entries.insert("*".to_string(), ty.to_value());
                }
                kind_value("dict", Value::Mapping(entries))
            }
            TypeExpr::TaggedUnion(tags) => kind_value(
                "d_u",
                Value::Mapping(
                    tags.iter()
                        .map(|(tag, ty)| (tag.clone(), ty.to_value()))
                        .collect(),
                ),
            ),
            TypeExpr::Union(alternatives) => kind_value(
                "union",
                Value::Sequence(alternatives.iter().map(TypeExpr::to_value).collect()),
            ),
            TypeExpr::With { bindings, body } => kind_value(
                "with",
                Value::Sequence(vec![
                    Value::Mapping(
                        bindings
                            .iter()
                            .map(|(name, ty)| (name.clone(), ty.to_value()))
                            .collect(),
                    ),
                    body.to_value(),
                ]),
            ),
            TypeExpr::Named(name) => kind_value("named", Value::String(name.clone())),
        }
    }
}

fn kind_value(kind: &str, payload: Value) -> Value {
    Value::Mapping(BTreeMap::from([(kind.to_string(), payload)]))
}

fn expect_sequence<'v>(
    payload: &'v Value,
    kind: &'static str,
    expected: &'static str,
    path: &str,
) -> Result<&'v [Value]> {
    payload.as_sequence().ok_or_else(|| Error::PayloadShape {
        path: path.to_string(),
        kind,
        expected,
        found: payload.kind().to_string(),
    })
}

fn expect_mapping<'v>(
    payload: &'v Value,
    kind: &'static str,
    expected: &'static str,
    path: &str,
) -> Result<&'v BTreeMap<String, Value>> {
    payload.as_mapping().ok_or_else(|| Error::PayloadShape {
        path: path.to_string(),
        kind,
        expected,
        found: payload.kind().to_string(),
    })
}

fn expect_string<'v>(
    payload: &'v Value,
    kind: &'static str,
    expected: &'static str,
    path: &str,
) -> Result<&'v str> {
    payload.as_str().ok_or_else(|| Error::PayloadShape {
        path: path.to_string(),
        kind,
        expected,
        found: payload.kind().to_string(),
    })
}

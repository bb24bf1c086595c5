//! Validation engine

use crate::rules;
use crate::scope::Scopes;
use crate::{Error, Result};
use doctype_schema::{DictSpec, TypeExpr, META_SCHEMA};
use doctype_value::Value;

/// Default recursion depth limit
///
/// Generous enough for deeply nested documents; small enough to reject a
/// self-referential schema long before the call stack is at risk.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Validation configuration
#[derive(Debug, Clone)]
pub struct ValidationConfig {
    /// Maximum matching recursion depth before the schema is rejected as
    /// self-referential with no base case
    pub max_depth: usize,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Per-call matching state: the scope stack and the depth guard counter
struct Context<'t> {
    scopes: Scopes<'t>,
    depth: usize,
}

/// The recursive matching engine
///
/// Stateless apart from its configuration: every top-level [`valid`] call
/// owns a fresh scope stack, so one engine can serve concurrent callers.
///
/// [`valid`]: Validator::valid
pub struct Validator {
    config: ValidationConfig,
}

impl Validator {
    /// Create a new validator with the default configuration
    pub fn new() -> Self {
        Self {
            config: ValidationConfig::default(),
        }
    }

    /// Create a validator with a specific configuration
    pub fn with_config(config: ValidationConfig) -> Self {
        Self { config }
    }

    /// Decide whether a value conforms to a type expression
    ///
    /// `Ok(false)` is the ordinary outcome for non-conformant data.
    ///
    /// # Errors
    ///
    /// Returns an error only for schema-level defects: the recursion depth
    /// guard tripping on a self-referential schema.
    pub fn valid(&self, value: &Value, schema: &TypeExpr) -> Result<bool> {
        let mut cx = Context {
            scopes: Scopes::new(),
            depth: 0,
        };
        let outcome = self.check(value, schema, &mut cx);
        debug_assert!(cx.scopes.is_empty(), "scope frame leaked past its with node");
        outcome
    }

    /// Check a raw schema document against the meta-schema and decode it
    ///
    /// # Errors
    ///
    /// Returns a schema-level rejection when the raw value does not match
    /// the grammar of type expressions, carrying the structural defect when
    /// decoding can name one.
    pub fn validate_schema(&self, raw: &Value) -> Result<TypeExpr> {
        if !self.valid(raw, &META_SCHEMA)? {
            // Decode anyway to recover the precise defect for the caller.
            return match TypeExpr::from_value(raw) {
                Ok(_) => Err(Error::Rejected),
                Err(e) => Err(e.into()),
            };
        }
        Ok(TypeExpr::from_value(raw)?)
    }

    fn check<'t>(&self, value: &Value, schema: &'t TypeExpr, cx: &mut Context<'t>) -> Result<bool> {
        if cx.depth >= self.config.max_depth {
            return Err(Error::DepthLimit {
                limit: self.config.max_depth,
            });
        }
        cx.depth += 1;
        let outcome = self.dispatch(value, schema, cx);
        cx.depth -= 1;
        outcome
    }

    fn dispatch<'t>(
        &self,
        value: &Value,
        schema: &'t TypeExpr,
        cx: &mut Context<'t>,
    ) -> Result<bool> {
        match schema {
            TypeExpr::Atom(atom) => Ok(rules::matches_atom(value, *atom)),

            TypeExpr::OneOf(options) => Ok(value
                .as_str()
                .is_some_and(|s| options.iter().any(|option| option == s))),

            TypeExpr::Pattern(pattern) => Ok(value
                .as_str()
                .is_some_and(|s| rules::matches_pattern(s, pattern))),

            TypeExpr::List(element) => {
                let Some(items) = value.as_sequence() else {
                    return Ok(false);
                };
                for item in items {
                    if !self.check(item, element, cx)? {
                        return Ok(false);
                    }
                }
                Ok(true)
            }

            TypeExpr::Tuple(fields) => {
                let Some(items) = value.as_sequence() else {
                    return Ok(false);
                };
                if items.len() != fields.len() {
                    return Ok(false);
                }
                for (item, field) in items.iter().zip(fields) {
                    if !self.check(item, field, cx)? {
                        return Ok(false);
                    }
                }
                Ok(true)
            }

            TypeExpr::Dict(spec) => self.check_dict(value, spec, cx),

            TypeExpr::TaggedUnion(tags) => {
                let Some(entries) = value.as_mapping() else {
                    return Ok(false);
                };
                // Exactly one tag key selects the variant.
                let mut iter = entries.iter();
                let (Some((tag, inner)), None) = (iter.next(), iter.next()) else {
                    return Ok(false);
                };
                match tags.get(tag) {
                    Some(ty) => self.check(inner, ty, cx),
                    None => Ok(false),
                }
            }

            TypeExpr::Union(alternatives) => {
                // Alternatives are tried in order and the first success
                // wins; the outcome is the same for any order.
                for alternative in alternatives {
                    if self.check(value, alternative, cx)? {
                        return Ok(true);
                    }
                }
                Ok(false)
            }

            TypeExpr::With { bindings, body } => {
                cx.scopes.push(bindings);
                let outcome = self.check(value, body, cx);
                // The frame must not outlive this node, even on failure.
                cx.scopes.pop();
                outcome
            }

            TypeExpr::Named(name) => match cx.scopes.resolve(name) {
                Some(bound) => self.check(value, bound, cx),
                // An unbound name is a data mismatch, not a schema defect.
                None => Ok(false),
            },
        }
    }

    fn check_dict<'t>(&self, value: &Value, spec: &'t DictSpec, cx: &mut Context<'t>) -> Result<bool> {
        let Some(entries) = value.as_mapping() else {
            return Ok(false);
        };

        for (name, ty) in &spec.required {
            match entries.get(name) {
                Some(item) => {
                    if !self.check(item, ty, cx)? {
                        return Ok(false);
                    }
                }
                None => return Ok(false),
            }
        }

        for (name, ty) in &spec.optional {
            if let Some(item) = entries.get(name) {
                if !self.check(item, ty, cx)? {
                    return Ok(false);
                }
            }
        }

        // Closed world: keys not named above need a wildcard to admit them.
        for (key, item) in entries {
            if spec.required.contains_key(key) || spec.optional.contains_key(key) {
                continue;
            }
            match &spec.wildcard {
                Some(ty) => {
                    if !self.check(item, ty, cx)? {
                        return Ok(false);
                    }
                }
                None => return Ok(false),
            }
        }

        Ok(true)
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use doctype_schema::{raw_from_yaml, Atom};
    use std::collections::BTreeMap;

    fn schema(yaml: &str) -> TypeExpr {
        TypeExpr::from_value(&raw_from_yaml(yaml).unwrap()).unwrap()
    }

    fn value(yaml: &str) -> Value {
        raw_from_yaml(yaml).unwrap()
    }

    fn check(data: &str, ty: &str) -> bool {
        Validator::new().valid(&value(data), &schema(ty)).unwrap()
    }

    #[test]
    fn test_any_matches_everything() {
        for data in ["null", "true", "3.5", "x", "[1, 2]", "{a: 1}"] {
            assert!(check(data, "any"), "any should match {data}");
        }
    }

    #[test]
    fn test_atomic_string() {
        assert!(check("hello", "string"));
        assert!(!check("42", "string")); // YAML decodes a bare 42 as a number
        assert!(!check("[x]", "string"));
    }

    #[test]
    fn test_list_elements_all_checked() {
        assert!(check("[]", "{list: number}"));
        assert!(check("[1, 2, 3]", "{list: number}"));
        assert!(!check("[1, x, 3]", "{list: number}"));
        assert!(!check("scalar", "{list: number}"));
    }

    #[test]
    fn test_tuple_length_and_positions() {
        let ty = "{tuple: [string, number]}";
        assert!(check("[label, 2]", ty));
        assert!(!check("[label]", ty));
        assert!(!check("[label, 2, 3]", ty));
        assert!(!check("[2, label]", ty));
    }

    #[test]
    fn test_named_resolves_through_enclosing_frames() {
        let ty = "{with: [{a: number}, {with: [{b: string}, {list: {named: a}}]}]}";
        assert!(check("[1, 2]", ty));
        assert!(!check("[x]", ty));
    }

    #[test]
    fn test_depth_guard_trips_on_self_reference() {
        let ty = schema("{with: [{t: {named: t}}, {named: t}]}");
        let result = Validator::new().valid(&value("1"), &ty);
        assert!(matches!(result, Err(Error::DepthLimit { .. })));
    }

    #[test]
    fn test_depth_guard_configurable() {
        let validator = Validator::with_config(ValidationConfig { max_depth: 2 });
        let ty = schema("{list: {list: {list: number}}}");
        let result = validator.valid(&value("[[[1]]]"), &ty);
        assert!(matches!(result, Err(Error::DepthLimit { limit: 2 })));
    }

    #[test]
    fn test_recursive_schema_with_base_case_terminates() {
        // A tree type: either a leaf number or a list of trees.
        let ty = schema("{with: [{tree: {union: [number, {list: {named: tree}}]}}, {named: tree}]}");
        let validator = Validator::new();
        assert!(validator.valid(&value("[1, [2, [3]], 4]"), &ty).unwrap());
        assert!(!validator.valid(&value("[1, [x]]"), &ty).unwrap());
    }

    #[test]
    fn test_validate_schema_accepts_and_decodes() {
        let raw = raw_from_yaml("{d_u: {a: number, b: string}}").unwrap();
        let ty = Validator::new().validate_schema(&raw).unwrap();
        assert_eq!(
            ty,
            TypeExpr::tagged_union([
                ("a", TypeExpr::Atom(Atom::Number)),
                ("b", TypeExpr::Atom(Atom::String)),
            ])
        );
    }

    #[test]
    fn test_validate_schema_rejects_two_kind_keys() {
        let raw = raw_from_yaml("{oneof: [a], list: string}").unwrap();
        let result = Validator::new().validate_schema(&raw);
        assert!(matches!(
            result,
            Err(Error::Schema(doctype_schema::Error::KindArity { found: 2, .. }))
        ));
    }

    #[test]
    fn test_no_mutation_between_calls() {
        let ty = schema("{with: [{n: number}, {named: n}]}");
        let snapshot = ty.clone();
        let validator = Validator::new();

        assert!(validator.valid(&value("5"), &ty).unwrap());
        assert!(!validator.valid(&value("x"), &ty).unwrap());
        assert!(validator.valid(&value("5"), &ty).unwrap());

        assert_eq!(ty, snapshot);
    }

    #[test]
    fn test_empty_dict_spec_matches_only_empty_mapping() {
        let ty = TypeExpr::Dict(DictSpec::new());
        let validator = Validator::new();
        assert!(validator.valid(&value("{}"), &ty).unwrap());
        assert!(!validator.valid(&value("{a: 1}"), &ty).unwrap());
    }

    #[test]
    fn test_unbound_named_is_a_mismatch() {
        let ty = TypeExpr::With {
            bindings: BTreeMap::new(),
            body: Box::new(TypeExpr::named("ghost")),
        };
        assert!(!Validator::new().valid(&value("1"), &ty).unwrap());
    }
}

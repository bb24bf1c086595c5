//! The meta-schema
//!
//! The type expression describing the grammar of type expressions
//! themselves, written in the schema language it defines. Rendered as a
//! schema document it reads:
//!
//! ```yaml
//! with:
//! - dictionary: {dict: {'*': {named: type}}}
//!   types:      {list: {named: type}}
//!   type:
//!     union:
//!     - oneof: [any, string, date, time, datetime, number]
//!     - d_u:
//!         oneof:  {list: string}
//!         string: string
//!         list:   {named: type}
//!         tuple:  {named: types}
//!         dict:   {named: dictionary}
//!         d_u:    {named: dictionary}
//!         union:  {named: types}
//!         with:   {tuple: [{named: dictionary}, {named: type}]}
//!         named:  string
//! - {named: type}
//! ```
//!
//! The constant is built from the in-memory constructors rather than decoded
//! from text, so the engine's own correctness guarantee does not depend on a
//! document decoder.

use crate::model::{Atom, DictSpec, TypeExpr};
use std::collections::BTreeMap;
use std::sync::LazyLock;

/// The grammar of valid type expressions
///
/// A candidate schema document must match this expression before it is
/// decoded and used to validate data.
pub static META_SCHEMA: LazyLock<TypeExpr> = LazyLock::new(build);

fn build() -> TypeExpr {
    let atoms = TypeExpr::one_of(Atom::ALL.map(Atom::as_str));
    let kinds = TypeExpr::tagged_union([
        ("oneof", TypeExpr::list(TypeExpr::Atom(Atom::String))),
        ("string", TypeExpr::Atom(Atom::String)),
        ("list", TypeExpr::named("type")),
        ("tuple", TypeExpr::named("types")),
        ("dict", TypeExpr::named("dictionary")),
        ("d_u", TypeExpr::named("dictionary")),
        ("union", TypeExpr::named("types")),
        (
            "with",
            TypeExpr::tuple([TypeExpr::named("dictionary"), TypeExpr::named("type")]),
        ),
        ("named", TypeExpr::Atom(Atom::String)),
    ]);

    let bindings = BTreeMap::from([
        (
            "dictionary".to_string(),
            TypeExpr::Dict(DictSpec::new().wildcard(TypeExpr::named("type"))),
        ),
        ("types".to_string(), TypeExpr::list(TypeExpr::named("type"))),
        ("type".to_string(), TypeExpr::union([atoms, kinds])),
    ]);

    TypeExpr::with(bindings, TypeExpr::named("type"))
}

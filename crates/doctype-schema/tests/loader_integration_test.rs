//! Integration tests for schema loading
//!
//! These tests exercise file loading, extension dispatch, and registry
//! caching against the fixture schemas under `tests/data/`.

use doctype_schema::{Atom, SchemaLoader, SchemaRegistry, TypeExpr};
use std::path::{Path, PathBuf};
use std::sync::Arc;

fn create_test_loader() -> SchemaLoader {
    SchemaLoader::new(vec![
        PathBuf::from("tests/data"),
        PathBuf::from("crates/doctype-schema/tests/data"),
    ])
}

#[test]
fn test_load_yaml_fixture() {
    let loader = create_test_loader();
    let schema = loader.load("coin").unwrap();
    assert_eq!(*schema, TypeExpr::one_of(["heads", "tails"]));
}

#[test]
fn test_load_json_fixture() {
    let loader = create_test_loader();
    let schema = loader.load("point").unwrap();
    assert_eq!(
        *schema,
        TypeExpr::tuple([TypeExpr::Atom(Atom::Number), TypeExpr::Atom(Atom::Number)])
    );
}

#[test]
fn test_load_dict_fixture_key_forms() {
    let loader = create_test_loader();
    let schema = loader.load("contact").unwrap();

    let TypeExpr::Dict(spec) = &*schema else {
        panic!("contact schema is a dict");
    };
    assert!(spec.required.contains_key("name"));
    assert!(spec.optional.contains_key("email"));
    assert!(spec.optional.contains_key("phones"));
    assert!(spec.wildcard.is_some());
}

#[test]
fn test_load_caches_in_registry() {
    let loader = create_test_loader();
    assert!(!loader.registry().contains("coin"));

    let first = loader.load("coin").unwrap();
    assert!(loader.registry().contains("coin"));

    // The second load is served from the registry, same allocation.
    let second = loader.load("coin").unwrap();
    assert!(Arc::ptr_eq(&first, &second));
}

#[test]
fn test_loaders_share_a_registry() {
    let registry = Arc::new(SchemaRegistry::new());
    let first = SchemaLoader::with_registry(Arc::clone(&registry), vec![PathBuf::from("tests/data")]);
    let second = SchemaLoader::with_registry(registry, vec![]);

    first.load("coin").unwrap();

    // The second loader has no search paths; only the cache can serve it.
    let schema = second.load("coin").unwrap();
    assert_eq!(*schema, TypeExpr::one_of(["heads", "tails"]));
}

#[test]
fn test_load_from_file_direct() {
    let loader = create_test_loader();
    let schema = loader
        .load_from_file(Path::new("tests/data/point.json"))
        .unwrap();
    assert_eq!(
        schema,
        TypeExpr::tuple([TypeExpr::Atom(Atom::Number), TypeExpr::Atom(Atom::Number)])
    );
}

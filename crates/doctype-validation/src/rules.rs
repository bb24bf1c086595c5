//! Atomic matching rules

use doctype_schema::Atom;
use doctype_value::Value;
use regex::Regex;
use std::sync::LazyLock;

// Fractional seconds are optional, but a bare trailing '.' never matches.
static DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}/\d{2}/\d{2}$").expect("hard-coded pattern compiles"));
static TIME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{2}:\d{2}:\d{2}(\.\d+)?$").expect("hard-coded pattern compiles"));
static DATETIME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d{4}/\d{2}/\d{2} \d{2}:\d{2}:\d{2}(\.\d+)?$").expect("hard-coded pattern compiles")
});

/// Check a value against an atomic type
#[must_use]
pub fn matches_atom(value: &Value, atom: Atom) -> bool {
    match atom {
        Atom::Any => true,
        Atom::String => value.as_str().is_some(),
        Atom::Date => value.as_str().is_some_and(matches_date),
        Atom::Time => value.as_str().is_some_and(matches_time),
        Atom::DateTime => value.as_str().is_some_and(matches_datetime),
        Atom::Number => is_number(value),
    }
}

/// Check a string against the `YYYY/MM/DD` date form
#[must_use]
pub fn matches_date(value: &str) -> bool {
    DATE_RE.is_match(value)
}

/// Check a string against the `HH:MM:SS[.s+]` time form
#[must_use]
pub fn matches_time(value: &str) -> bool {
    TIME_RE.is_match(value)
}

/// Check a string against the `YYYY/MM/DD HH:MM:SS[.s+]` datetime form
#[must_use]
pub fn matches_datetime(value: &str) -> bool {
    DATETIME_RE.is_match(value)
}

/// Check whether a value is a number or a string that parses as one
///
/// Some decoders serialize floating point numbers as strings, so a
/// parseable string counts. Surrounding whitespace is tolerated.
#[must_use]
pub fn is_number(value: &Value) -> bool {
    match value {
        Value::Number(_) => true,
        Value::String(s) => s.trim().parse::<f64>().is_ok(),
        _ => false,
    }
}

/// Check a string against a schema-supplied regex pattern
///
/// The pattern carries its own anchors. A pattern that fails to compile
/// matches nothing; an authoring mistake inside an otherwise well-shaped
/// node degrades to "no match" rather than aborting validation.
#[must_use]
pub fn matches_pattern(value: &str, pattern: &str) -> bool {
    match Regex::new(pattern) {
        Ok(re) => re.is_match(value),
        Err(_) => false,
    }
}

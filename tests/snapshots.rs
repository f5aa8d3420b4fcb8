//! Compact `Debug`-text snapshots for a handful of representative documents.
//!
//!     `assert_debug_snapshot!`'s pretty-printed form is one accidental
//!     rename away from an unreadable diff; snapshotting the compact
//!     single-line `{:?}` instead keeps these readable and stable.

use flexconf::parse_text;
use flexconf::value::Value;

fn describe(value: &Value) -> String {
    format!("{value:?}")
}

#[test]
fn snapshot_simple_scalar_map() {
    let value = parse_text(b"a: 1\n").unwrap();
    insta::assert_snapshot!(describe(&value));
}

#[test]
fn snapshot_nested_map() {
    let value = parse_text(b"server:\n    host: \"localhost\"\n    port: 8080\n").unwrap();
    insta::assert_snapshot!(describe(&value));
}

#[test]
fn snapshot_bracket_list_of_maps() {
    let src = r#"{ protocols: { { name: "http", port: 8080 }, { name: "https", port: 443 } } }"#;
    let value = parse_text(src.as_bytes()).unwrap();
    insta::assert_snapshot!(describe(&value));
}

#[test]
fn snapshot_blank_line_anonymous_maps() {
    let src = "protocols:\n    name: \"http\"\n    port: 8080\n\n    name: \"https\"\n    port: 443\n";
    let value = parse_text(src.as_bytes()).unwrap();
    insta::assert_snapshot!(describe(&value));
}

#[test]
fn snapshot_mixed_literal_kinds() {
    let src = "flag: true\ncount: 42\nratio: 3.5\nlabel: null\nname: \"hi\"\n";
    let value = parse_text(src.as_bytes()).unwrap();
    insta::assert_snapshot!(describe(&value));
}

//! The acceptance scenarios from spec.md §8, parameterized with `rstest`.

use flexconf::error::ErrorKind;
use flexconf::parse_text;
use flexconf::value::Value;
use rstest::rstest;

#[rstest]
#[case::s1_indentation_map(
    "server:\n    host: \"localhost\"\n    port: 8080\n",
)]
fn s1_indentation_map(#[case] src: &str) {
    let value = parse_text(src.as_bytes()).unwrap();
    let server = value.as_map().unwrap().get(&"server".into()).unwrap().as_map().unwrap();
    assert_eq!(server.get(&"host".into()), Some(&Value::Str("localhost".into())));
    assert_eq!(server.get(&"port".into()), Some(&Value::Int(8080)));
}

#[test]
fn s2_bracket_list_of_maps() {
    let src = r#"{ protocols: { { name: "http", port: 8080 }, { name: "https", port: 443 } } }"#;
    let value = parse_text(src.as_bytes()).unwrap();
    let protocols = value.as_map().unwrap().get(&"protocols".into()).unwrap().as_seq().unwrap();
    assert_eq!(protocols.len(), 2);
    assert_eq!(
        protocols[0].as_map().unwrap().get(&"name".into()),
        Some(&Value::Str("http".into()))
    );
    assert_eq!(
        protocols[1].as_map().unwrap().get(&"port".into()),
        Some(&Value::Int(443))
    );
}

#[test]
fn s3_indentation_list_with_blank_line_separation() {
    let src = "protocols:\n    name: \"http\"\n    port: 8080\n\n    name: \"https\"\n    port: 443\n";
    let value = parse_text(src.as_bytes()).unwrap();
    let protocols = value.as_map().unwrap().get(&"protocols".into()).unwrap().as_seq().unwrap();
    assert_eq!(protocols.len(), 2);
    assert_eq!(
        protocols[0].as_map().unwrap().get(&"name".into()),
        Some(&Value::Str("http".into()))
    );
    assert_eq!(
        protocols[1].as_map().unwrap().get(&"name".into()),
        Some(&Value::Str("https".into()))
    );
}

#[test]
fn s4_mode_mismatch() {
    let err = parse_text(b"a: 1\n{b: 2}\n").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ModeMismatchError);
    assert_eq!(err.span().line, 2);
    assert_eq!(err.span().column, 1);
}

#[test]
fn s5_duplicate_key_bracket_mode() {
    let err = parse_text(b"{a: 1, a: 2}").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::KeyError);
}

#[test]
fn s6_pragma_redefines_block_identifier() {
    let src = b"#?> SET BLOCKIDENTIFIER '[' ']'\n[ a: 1, b: 2 ]\n";
    let value = parse_text(src).unwrap();
    let map = value.as_map().unwrap();
    assert_eq!(map.get(&"a".into()), Some(&Value::Int(1)));
    assert_eq!(map.get(&"b".into()), Some(&Value::Int(2)));
}

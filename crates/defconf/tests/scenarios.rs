//! End to end scenarios through the public `parse` entry point

use defconf::{parse, ErrorKind, ParseError};
use pretty_assertions::assert_eq;
use serde_json::json;

fn parse_json(source: &str) -> serde_json::Value {
    let document = parse(source).expect("must parse");
    serde_json::to_value(&document).expect("must serialize")
}

fn error_kind(source: &str) -> ErrorKind {
    parse(source).expect_err("must fail").kind()
}

#[test]
fn constant_declaration() {
    assert_eq!(parse_json("(def timeout 30);"), json!({"timeout": 30}));
}

#[test]
fn dictionary() {
    assert_eq!(
        parse_json(
            r#"(def settings [mode => "production", retrylimit => 3, logging => "enabled"]);"#
        ),
        json!({"settings": {"mode": "production", "retrylimit": 3, "logging": "enabled"}})
    );
}

#[test]
fn nested_dictionary() {
    assert_eq!(
        parse_json("(def config [db => [host => 23, port => 5432], app => [debug => 67]]);"),
        json!({"config": {"db": {"host": 23, "port": 5432}, "app": {"debug": 67}}})
    );
}

#[test]
fn constant_substitution() {
    assert_eq!(
        parse_json("(def timeout 30); (def settings [retrylimit => #{timeout}]);"),
        json!({"timeout": 30, "settings": {"retrylimit": 30}})
    );
}

#[test]
fn declaration_order_substitution() {
    assert_eq!(
        parse_json("(def a 1); (def b #{a});"),
        json!({"a": 1, "b": 1})
    );
    assert_eq!(
        parse("(def b #{a}); (def a 1);").unwrap_err(),
        ParseError::UndefinedConstant("a".into())
    );
}

#[test]
fn undefined_constant() {
    assert_eq!(
        error_kind("(def settings [retrylimit => #{missing}]);"),
        ErrorKind::UndefinedConstant
    );
}

#[test]
fn missing_terminator() {
    assert_eq!(error_kind("(def timeout 30"), ErrorKind::SyntaxError);
}

#[test]
fn syntax_errors() {
    for source in [
        "timeout 30;",
        "(def timeout 30); leftover",
        "(def Timeout 30);",
        "(def settings [retrylimit = 3]);",
        "(def settings [retry_limit => 3]);",
        "(def a 1); /* unterminated",
    ] {
        assert_eq!(error_kind(source), ErrorKind::SyntaxError, "{source}");
    }
}

#[test]
fn invalid_values() {
    for source in [
        "(def a -5);",
        "(def a 2.5);",
        "(def a yes);",
        "(def a [b => unquoted]);",
        "(def a #{});",
    ] {
        assert_eq!(error_kind(source), ErrorKind::InvalidValue, "{source}");
    }
}

#[test]
fn error_message_names_fragment() {
    assert_eq!(
        parse("(def a [b => unquoted]);").unwrap_err().to_string(),
        "Invalid value: unquoted"
    );
    assert_eq!(
        parse("(def a [b 1]);").unwrap_err().to_string(),
        "Invalid dictionary item: b 1"
    );
}

#[test]
fn independent_parses_share_nothing() {
    assert_eq!(parse_json("(def a 1);"), json!({"a": 1}));
    assert_eq!(
        parse("(def b #{a});").unwrap_err().kind(),
        ErrorKind::UndefinedConstant
    );
}

#[test]
fn typed_access() {
    let document = parse(r#"(def server [host => "127.0.0.1", port => 8080]);"#).unwrap();
    let server = document.get("server").and_then(|v| v.as_mapping()).unwrap();

    assert_eq!(server["host"].as_text(), Some("127.0.0.1"));
    assert_eq!(server["port"].as_integer(), Some(8080));
    assert_eq!(server["port"].as_text(), None);
    assert_eq!(server["host"].as_mapping(), None);
}

#[test]
fn earlier_block_error_wins() {
    assert_eq!(
        parse("(def a #{missing}); garbage").unwrap_err(),
        ParseError::UndefinedConstant("missing".into())
    );
}

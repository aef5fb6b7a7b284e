use alloc::vec::Vec;

use crate::{Kind, Parser};

/// Parse with a fresh dynamic parser, panicking on rejection, and return
/// the kinds of tokens 1..=count.
fn kinds(input: &[u8]) -> Vec<Kind> {
    let mut parser = Parser::default();
    let doc = parser.parse(input).expect("input should parse");
    (1..=doc.token_count())
        .map(|idx| doc.token(idx).kind())
        .collect()
}

#[test]
fn lonely_scalars() {
    assert_eq!(kinds(b"null"), [Kind::Null]);
    assert_eq!(kinds(b"true"), [Kind::Bool]);
    assert_eq!(kinds(b"false"), [Kind::Bool]);
    assert_eq!(kinds(b"42"), [Kind::Number]);
    assert_eq!(kinds(b"-0.1"), [Kind::Number]);
    assert_eq!(kinds(b"\"asd\""), [Kind::Str]);
    assert_eq!(kinds(b"\"\""), [Kind::Str]);
}

#[test]
fn boolean_values_are_recorded() {
    let mut parser = Parser::default();
    let doc = parser.parse(b"[true,false]").unwrap();
    assert!(doc.token(2).boolean());
    assert!(!doc.token(3).boolean());
}

#[test]
fn empty_containers() {
    assert_eq!(kinds(b"{}"), [Kind::Object]);
    assert_eq!(kinds(b"[]"), [Kind::Array]);
    assert_eq!(kinds(b"[[]   ]"), [Kind::Array, Kind::Array]);
    assert_eq!(kinds(b"{\"a\":[]}"), [Kind::Object, Kind::Array]);
}

#[test]
fn nested_structures() {
    assert_eq!(
        kinds(br#"[null, 1, "1", {}]"#),
        [Kind::Array, Kind::Null, Kind::Number, Kind::Str, Kind::Object]
    );
    assert_eq!(
        kinds(br#"{"asd":"sdf", "dfg":"fgh"}"#),
        [Kind::Object, Kind::Str, Kind::Str]
    );
}

#[test]
fn whitespace_around_tokens() {
    assert_eq!(kinds(b" [1] "), [Kind::Array, Kind::Number]);
    assert_eq!(kinds(b"[1\n]"), [Kind::Array, Kind::Number]);
    assert_eq!(kinds(b"{\n\"a\": \"b\"\n}"), [Kind::Object, Kind::Str]);
    assert_eq!(kinds(b"[\"a\"]\n"), [Kind::Array, Kind::Str]);
    assert_eq!(kinds(b"[ 4]"), [Kind::Array, Kind::Number]);
}

#[test]
fn leading_bom_is_consumed_once() {
    assert_eq!(kinds(b"\xEF\xBB\xBF{}"), [Kind::Object]);
    assert_eq!(kinds(b"\xEF\xBB\xBF 1"), [Kind::Number]);
}

#[test]
fn duplicate_keys_are_accepted() {
    assert_eq!(
        kinds(br#"{"a":"b","a":"c"}"#),
        [Kind::Object, Kind::Str, Kind::Str]
    );
}

#[test]
fn empty_member_name_is_still_a_name() {
    let mut parser = Parser::default();
    let doc = parser.parse(br#"{"":0}"#).unwrap();
    let member = doc.token(2);
    assert!(member.has_name());
    assert_eq!(doc.raw_name(2), b"");
}

#[test]
fn member_names_are_zero_copy_spans() {
    let mut parser = Parser::default();
    let doc = parser.parse(br#"{ "foo" : "bar" }"#).unwrap();
    assert_eq!(doc.raw_name(2), b"foo");
    assert_eq!(doc.raw_string(2), b"bar");
    assert!(!doc.token(2).name_escaped());
    assert!(!doc.token(2).value_escaped());
}

#[test]
fn escape_flags_are_set_per_lexeme() {
    let mut parser = Parser::default();
    let doc = parser.parse(br#"{"a\tb":"plain","c":"d\n"}"#).unwrap();
    assert!(doc.token(2).name_escaped());
    assert!(!doc.token(2).value_escaped());
    assert!(!doc.token(3).name_escaped());
    assert!(doc.token(3).value_escaped());
}

#[test]
fn number_lexemes_are_verbatim() {
    let mut parser = Parser::default();
    let doc = parser
        .parse(b"[123e65, -0, 1E+2, 0e1, 123.456e78, 1e-2]")
        .unwrap();
    let lexemes: Vec<&[u8]> = (2..=doc.token_count()).map(|i| doc.raw_string(i)).collect();
    assert_eq!(
        lexemes,
        [
            &b"123e65"[..],
            b"-0",
            b"1E+2",
            b"0e1",
            b"123.456e78",
            b"1e-2"
        ]
    );
}

#[test]
fn huge_magnitudes_are_not_interpreted() {
    // 100 nines of exponent: meaningless as f64, retained as text.
    let mut input = Vec::from(&b"[1e"[..]);
    input.extend_from_slice(&[b'9'; 100]);
    input.push(b']');
    let mut parser = Parser::default();
    let doc = parser.parse(&input).unwrap();
    assert_eq!(doc.raw_string(2), &input[1..input.len() - 1]);
}

#[test]
fn raw_non_ascii_string_bytes_pass_untouched() {
    // No UTF-8 well-formedness check at lex time.
    for input in [
        &b"[\"\xFF\"]"[..],
        b"[\"\xED\xA0\x80\"]",
        b"[\"\xC0\xAF\"]",
        b"[\"\xF4\xBF\xBF\xBF\"]",
    ] {
        assert_eq!(kinds(input), [Kind::Array, Kind::Str], "{input:?}");
    }
}

#[test]
fn del_and_escaped_controls_are_legal_in_strings() {
    assert_eq!(kinds(b"[\"a\x7Fa\"]"), [Kind::Array, Kind::Str]);
    assert_eq!(kinds(br#"["\u0012"]"#), [Kind::Array, Kind::Str]);
    assert_eq!(kinds(br#"["\"\\\/\b\f\n\r\t"]"#), [Kind::Array, Kind::Str]);
}

#[test]
fn deep_nesting_grows_the_store() {
    let mut input = Vec::new();
    input.extend_from_slice(&[b'['; 500]);
    input.extend_from_slice(&[b']'; 500]);
    let mut parser = Parser::default();
    let doc = parser.parse(&input).unwrap();
    assert_eq!(doc.token_count(), 500);
    assert_eq!(doc.token(500).kind(), Kind::Array);
    assert_eq!(doc.token(500).children(), 0);
}

//! Integration tests for the FTL parser.

use ftl::parser::{
    CommentLevel, Entry, Expression, Literal, MAX_NESTING, PatternElement, Resource, VariantKey,
    parse,
};

fn message_value(resource: &Resource, id: &str) -> String {
    let message = resource
        .messages()
        .find(|message| message.id.name == id)
        .unwrap();
    message
        .value
        .as_ref()
        .unwrap()
        .elements
        .iter()
        .map(|element| match element {
            PatternElement::Text(text) => text.value.clone(),
            PatternElement::Placeable(_) => "{..}".to_string(),
        })
        .collect()
}

/// One line per junk annotation: `code start..end: message`.
fn junk_report(source: &str) -> String {
    parse(source)
        .annotations()
        .map(|annotation| {
            let span = annotation.span.unwrap();
            format!(
                "{} {}..{}: {}",
                annotation.code, span.start, span.end, annotation.message
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

// =============================================================================
// Messages and Terms
// =============================================================================

#[test]
fn parse_simple_message() {
    let resource = parse("hello = Hello, world!\n");
    assert_eq!(resource.body.len(), 1);
    assert_eq!(message_value(&resource, "hello"), "Hello, world!");
}

#[test]
fn parse_message_with_attributes() {
    let resource = parse("login = Log in\n    .title = Log in to your account\n    .accesskey = L\n");
    let message = resource.messages().next().unwrap();
    assert_eq!(message.attributes.len(), 2);
    assert_eq!(message.attribute("accesskey").unwrap().id.name, "accesskey");
    assert!(message.attribute("missing").is_none());
}

#[test]
fn parse_message_with_only_attributes() {
    let resource = parse("login =\n    .title = Log in\n");
    let message = resource.messages().next().unwrap();
    assert!(message.value.is_none());
    assert_eq!(message.attributes.len(), 1);
}

#[test]
fn parse_term() {
    let resource = parse("-brand = Firefox\n    .gender = masculine\n");
    let term = resource.terms().next().unwrap();
    assert_eq!(term.id.name, "brand");
    assert_eq!(term.attributes.len(), 1);
}

#[test]
fn parse_multiline_pattern_dedents() {
    let resource = parse("multi =\n    First line\n      indented\n    Last\n");
    assert_eq!(message_value(&resource, "multi"), "First line\n  indented\nLast");
}

#[test]
fn parse_multiline_pattern_keeps_blank_lines() {
    let resource = parse("multi =\n    one\n\n    two\n\n\nnext = x\n");
    assert_eq!(message_value(&resource, "multi"), "one\n\ntwo");
    assert_eq!(message_value(&resource, "next"), "x");
}

#[test]
fn parse_crlf_line_endings() {
    let resource = parse("hello = Hello\r\nmulti =\r\n    a\r\n    b\r\nbye = Bye\r\n");
    assert_eq!(resource.body.len(), 3);
    assert_eq!(message_value(&resource, "hello"), "Hello");
    assert_eq!(message_value(&resource, "multi"), "a\nb");
    assert_eq!(message_value(&resource, "bye"), "Bye");
}

#[test]
fn parse_message_span_excludes_trailing_blank_lines() {
    let source = "hello = Hi\n\n\nbye = Bye\n";
    let resource = parse(source);
    let hello = resource.messages().next().unwrap();
    assert_eq!(&source[hello.span.start..hello.span.end], "hello = Hi");
}

// =============================================================================
// Expressions
// =============================================================================

#[test]
fn parse_select_expression() {
    let resource = parse("emails = { $count ->\n    [one] one email\n   *[other] { $count } emails\n}\n");
    let message = resource.messages().next().unwrap();
    let PatternElement::Placeable(placeable) = &message.value.as_ref().unwrap().elements[0] else {
        panic!("expected placeable");
    };
    let Expression::Select(select) = placeable.expression.as_ref() else {
        panic!("expected select expression");
    };
    assert_eq!(select.variants.len(), 2);
    assert!(matches!(&select.variants[0].key, VariantKey::Identifier(key) if key.name == "one"));
    let default = select.default_variant().unwrap();
    assert!(matches!(&default.key, VariantKey::Identifier(key) if key.name == "other"));
}

#[test]
fn parse_numeric_variant_keys() {
    let resource = parse("n = { $n ->\n    [0] none\n    [-1.5] negative\n   *[other] some\n}\n");
    let message = resource.messages().next().unwrap();
    let PatternElement::Placeable(placeable) = &message.value.as_ref().unwrap().elements[0] else {
        panic!("expected placeable");
    };
    let Expression::Select(select) = placeable.expression.as_ref() else {
        panic!("expected select expression");
    };
    let VariantKey::NumberLiteral(key) = &select.variants[1].key else {
        panic!("expected number key");
    };
    assert_eq!(key.raw, "-1.5");
    assert_eq!(key.value, -1.5);
}

#[test]
fn parse_function_call_arguments() {
    let resource = parse("price = { NUMBER($amount, minimumFractionDigits: 2, style: \"percent\") }\n");
    let message = resource.messages().next().unwrap();
    let PatternElement::Placeable(placeable) = &message.value.as_ref().unwrap().elements[0] else {
        panic!("expected placeable");
    };
    let Expression::FunctionReference(function) = placeable.expression.as_ref() else {
        panic!("expected function reference");
    };
    assert_eq!(function.id.name, "NUMBER");
    assert_eq!(function.arguments.positional.len(), 1);
    assert_eq!(function.arguments.named.len(), 2);
    assert!(matches!(&function.arguments.named[1].value, Literal::String(s) if s.value == "percent"));
}

#[test]
fn parse_term_reference_with_arguments() {
    let resource = parse("-thing = { $case ->\n   *[nominative] thing\n    [genitive] thing's\n}\nmine = my { -thing(case: \"genitive\") }\n");
    let message = resource.messages().next().unwrap();
    let PatternElement::Placeable(placeable) = &message.value.as_ref().unwrap().elements[1] else {
        panic!("expected placeable");
    };
    let Expression::TermReference(reference) = placeable.expression.as_ref() else {
        panic!("expected term reference");
    };
    assert_eq!(reference.id.name, "thing");
    assert_eq!(reference.arguments.as_ref().unwrap().named.len(), 1);
}

#[test]
fn parse_string_literal_escapes() {
    let resource = parse(r#"escapes = { "\"quoted\" \\ A\U01F602" }"#);
    let message = resource.messages().next().unwrap();
    let PatternElement::Placeable(placeable) = &message.value.as_ref().unwrap().elements[0] else {
        panic!("expected placeable");
    };
    let Expression::StringLiteral(literal) = placeable.expression.as_ref() else {
        panic!("expected string literal");
    };
    assert_eq!(literal.value, "\"quoted\" \\ A😂");
    assert_eq!(literal.raw, r#"\"quoted\" \\ A\U01F602"#);
}

#[test]
fn parse_invalid_code_point_becomes_replacement_char() {
    let resource = parse(r#"bad = { "\UFFFFFF" }"#);
    let message = resource.messages().next().unwrap();
    let PatternElement::Placeable(placeable) = &message.value.as_ref().unwrap().elements[0] else {
        panic!("expected placeable");
    };
    let Expression::StringLiteral(literal) = placeable.expression.as_ref() else {
        panic!("expected string literal");
    };
    assert_eq!(literal.value, "\u{FFFD}");
}

// =============================================================================
// Comments
// =============================================================================

#[test]
fn comment_directly_above_message_attaches() {
    let resource = parse("# Greeting shown on start\nhello = Hello\n");
    assert_eq!(resource.body.len(), 1);
    let message = resource.messages().next().unwrap();
    let comment = message.comment.as_ref().unwrap();
    assert_eq!(&*comment.content, ["Greeting shown on start"]);
}

#[test]
fn comment_separated_by_blank_line_stays_standalone() {
    let resource = parse("# Standalone\n\nhello = Hello\n");
    assert_eq!(resource.body.len(), 2);
    assert!(matches!(&resource.body[0], Entry::Comment(_)));
    assert!(resource.messages().next().unwrap().comment.is_none());
}

#[test]
fn group_and_resource_comments_never_attach() {
    let resource = parse("### Resource\n## Group\nhello = Hello\n");
    let levels: Vec<CommentLevel> = resource
        .body
        .iter()
        .filter_map(|entry| match entry {
            Entry::Comment(comment) => Some(comment.level),
            _ => None,
        })
        .collect();
    assert_eq!(levels, [CommentLevel::Resource, CommentLevel::Group]);
    assert!(resource.messages().next().unwrap().comment.is_none());
}

#[test]
fn multiline_comment_collects_lines() {
    let resource = parse("# one\n# two\n#\n# four\n");
    let Entry::Comment(comment) = &resource.body[0] else {
        panic!("expected comment");
    };
    assert_eq!(&*comment.content, ["one", "two", "", "four"]);
}

// =============================================================================
// Error Recovery
// =============================================================================

#[test]
fn junk_between_valid_messages_is_isolated() {
    let resource = parse("hello = Hello!\nbroken = {\nbye = Bye!\n");
    assert_eq!(resource.body.len(), 3);
    assert!(matches!(&resource.body[0], Entry::Message(_)));
    assert!(matches!(&resource.body[2], Entry::Message(_)));

    let junk = resource.junk().next().unwrap();
    assert_eq!(junk.content, "broken = {\n");
    assert_eq!(message_value(&resource, "hello"), "Hello!");
    assert_eq!(message_value(&resource, "bye"), "Bye!");
}

#[test]
fn junk_recovery_skips_indented_lines() {
    let resource = parse("bad = { $x\n    still bad\n  }\ngood = Good\n");
    assert_eq!(resource.junk().count(), 1);
    assert_eq!(message_value(&resource, "good"), "Good");
}

#[test]
fn message_without_value_is_junk() {
    let report = junk_report("empty =\n");
    insta::assert_snapshot!(report, @r#"E0005 8..8: Expected message "empty" to have a value or attributes"#);
}

#[test]
fn junk_annotations_carry_reference_codes() {
    let report = [
        "err = {}",
        "err = Hello }",
        "err = { lower() }",
        "err = { FUN(x: $y) }",
        "err = { $x -> [a] A }",
        "-term = { -other.attr }",
        r#"err = { "\q" }"#,
        r#"err = { "\u12" }"#,
    ]
    .into_iter()
    .map(junk_report)
    .collect::<Vec<_>>()
    .join("\n");

    insta::assert_snapshot!(report, @r#"
    E0028 7..8: Expected an inline expression
    E0027 12..13: Unbalanced closing brace in TextElement
    E0008 13..14: The callee has to be an upper-case identifier or a term
    E0014 15..16: Expected literal
    E0003 14..15: Expected token: "⏎"
    E0019 22..23: Attributes of terms cannot be used as placeables
    E0025 10..11: Unknown escape sequence: \q
    E0026 13..14: Invalid Unicode escape sequence: \u12
    "#);
}

#[test]
fn select_validation_errors() {
    let report = [
        "err = { msg -> *[a] A }",
        "err = { $x ->\n    [a] A\n}\n",
        "err = { $x ->\n   *[a] A\n   *[b] B\n}\n",
    ]
    .into_iter()
    .map(|source| {
        parse(source)
            .annotations()
            .map(|annotation| annotation.code.clone())
            .collect::<Vec<_>>()
            .join(",")
    })
    .collect::<Vec<_>>();

    assert_eq!(report, ["E0016", "E0010", "E0015"]);
}

#[test]
fn duplicated_and_misplaced_arguments() {
    let codes: Vec<String> = [
        "err = { FUN(a: 1, a: 2) }",
        "err = { FUN(a: 1, $x) }",
    ]
    .into_iter()
    .flat_map(|source| {
        parse(source)
            .annotations()
            .map(|annotation| annotation.code.clone())
            .collect::<Vec<_>>()
    })
    .collect();

    assert_eq!(codes, ["E0022", "E0021"]);
}

// =============================================================================
// Nesting
// =============================================================================

fn nested_placeables(depth: usize) -> String {
    format!("a = {}$x{}\nb = B\n", "{".repeat(depth), "}".repeat(depth))
}

#[test]
fn nesting_up_to_the_limit_parses() {
    let resource = parse(&nested_placeables(MAX_NESTING));
    assert_eq!(resource.junk().count(), 0);
    assert_eq!(resource.messages().count(), 2);
}

#[test]
fn deeply_nested_placeables_become_junk() {
    for depth in [MAX_NESTING + 1, 500, 5000] {
        let resource = parse(&nested_placeables(depth));
        let codes: Vec<&str> = resource
            .annotations()
            .map(|annotation| annotation.code.as_str())
            .collect();
        assert_eq!(codes, ["E0030"], "depth {depth}");
        assert_eq!(message_value(&resource, "b"), "B");
    }
}

#[test]
fn deeply_nested_call_arguments_become_junk() {
    let source = format!("a = {{ -t({}$x{}) }}\nb = B\n", "-t(".repeat(2000), ")".repeat(2000));
    let resource = parse(&source);
    assert_eq!(resource.junk().count(), 1);
    assert_eq!(resource.annotations().next().unwrap().code, "E0030");
    assert_eq!(message_value(&resource, "b"), "B");
}

//! Integration tests for bundle loading and configuration.

use std::io::Write;
use std::thread;

use ftl::{Bundle, ErrorKind, LoadError, LoadWarning, args, parse};
use tempfile::NamedTempFile;

// =========================================================================
// Builder
// =========================================================================

#[test]
fn bundle_defaults() {
    let bundle = Bundle::default();
    assert_eq!(bundle.locale(), "en");
    assert!(bundle.message_ids().is_empty());
    assert!(bundle.has_function("NUMBER"));
}

#[test]
fn bundle_builder_sets_locale() {
    let bundle = Bundle::builder().locale("pt-BR").build();
    assert_eq!(bundle.locale(), "pt-BR");
    assert_eq!(Bundle::new("uk").locale(), "uk");
}

// =========================================================================
// Loading
// =========================================================================

#[test]
fn add_source_registers_messages_and_terms() {
    let mut bundle = Bundle::new("en");
    let warnings = bundle
        .add_source("hello = Hello\nbye = Bye\n-brand = Firefox\n# comment\n")
        .unwrap();
    assert!(warnings.is_empty());
    assert_eq!(bundle.message_ids(), ["bye", "hello"]);
    assert!(bundle.has_message("hello"));
    assert!(!bundle.has_message("brand"));
    assert!(bundle.term("brand").is_some());
}

#[test]
fn last_write_wins() {
    let mut bundle = Bundle::builder().use_isolating(false).build();
    bundle.add_source("hello = First\n").unwrap();
    let warnings = bundle.add_source("hello = Second\n").unwrap();
    assert_eq!(bundle.format("hello", None).0, "Second");
    assert_eq!(
        warnings,
        [LoadWarning::Overridden {
            origin: "<en>".to_string(),
            id: "hello".to_string(),
        }]
    );
}

#[test]
fn last_write_wins_within_one_source() {
    let mut bundle = Bundle::new("en");
    let warnings = bundle
        .add_source("hello = First\n-t = A\nhello = Second\n-t = B\n")
        .unwrap();
    assert_eq!(bundle.format("hello", None).0, "Second");
    let ids: Vec<String> = warnings
        .iter()
        .filter_map(|warning| match warning {
            LoadWarning::Overridden { id, .. } => Some(id.clone()),
            _ => None,
        })
        .collect();
    assert_eq!(ids, ["hello", "-t"]);
}

#[test]
fn junk_is_reported_with_position() {
    let mut bundle = Bundle::new("en");
    let warnings = bundle
        .add_source("hello = Hello\nbroken = { $x\nbye = Bye\n")
        .unwrap();
    assert_eq!(warnings.len(), 1);
    let LoadWarning::Junk { line, code, .. } = &warnings[0] else {
        panic!("expected junk warning, got {:?}", warnings[0]);
    };
    assert_eq!(*line, 3);
    assert_eq!(code, "E0003");
    assert!(bundle.has_message("hello"));
    assert!(bundle.has_message("bye"));
}

#[test]
fn junk_warning_display() {
    let mut bundle = Bundle::new("en");
    let warnings = bundle.add_source("ok = Ok\nerr = {}\n").unwrap();
    assert_eq!(
        warnings[0].to_string(),
        "<en>:2:8: E0028: Expected an inline expression"
    );
}

#[test]
fn source_with_only_junk_is_an_error() {
    let mut bundle = Bundle::new("en");
    let err = bundle.add_source("this is not ftl\n").unwrap_err();
    let LoadError::Syntax {
        origin,
        annotations,
    } = &err
    else {
        panic!("expected syntax error, got {err:?}");
    };
    assert_eq!(origin, "<en>");
    assert_eq!(annotations.len(), 1);
    assert_eq!(
        err.to_string(),
        "<en>: no entries could be parsed (1 syntax error(s))"
    );
    assert_eq!(err.kind(), Some(ErrorKind::Syntax));
}

#[test]
fn empty_and_comment_only_sources_are_fine() {
    let mut bundle = Bundle::new("en");
    assert!(bundle.add_source("").unwrap().is_empty());
    assert!(bundle.add_source("# only a comment\n").unwrap().is_empty());
}

#[test]
fn add_resource_skips_junk() {
    let mut bundle = Bundle::new("en");
    let warnings = bundle.add_resource(parse("a = A\n!!!\nb = B\n"));
    assert!(warnings.is_empty());
    assert_eq!(bundle.message_ids(), ["a", "b"]);
}

// =========================================================================
// Files
// =========================================================================

#[test]
fn add_file_reads_source() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "hello = Hello from a file\nerr = {{}}\n").unwrap();

    let mut bundle = Bundle::new("en");
    let warnings = bundle.add_file(file.path()).unwrap();
    assert_eq!(bundle.format("hello", None).0, "Hello from a file");

    let LoadWarning::Junk { origin, line, .. } = &warnings[0] else {
        panic!("expected junk warning");
    };
    assert_eq!(origin, &file.path().display().to_string());
    assert_eq!(*line, 2);
}

#[test]
fn add_file_missing_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.ftl");

    let mut bundle = Bundle::new("en");
    let err = bundle.add_file(&path).unwrap_err();
    let LoadError::Io { path: error_path, .. } = &err else {
        panic!("expected io error, got {err:?}");
    };
    assert_eq!(error_path, &path);
    assert_eq!(err.kind(), None);
}

// =========================================================================
// Sharing
// =========================================================================

#[test]
fn bundles_format_from_many_threads() {
    let mut bundle = Bundle::builder().use_isolating(false).build();
    bundle
        .add_source("a = { b }\nb = { a }\nemails = { $n ->\n    [one] one email\n   *[other] { $n } emails\n}\n")
        .unwrap();

    thread::scope(|scope| {
        for n in 0..4 {
            let bundle = &bundle;
            scope.spawn(move || {
                let (text, errors) = bundle.format("a", None);
                assert_eq!(text, "{a}");
                assert_eq!(errors.len(), 1);
                let (text, _) = bundle.format("emails", Some(&args! { "n" => n + 2 }));
                assert_eq!(text, format!("{} emails", n + 2));
            });
        }
    });
}

//! Property-based fuzzing tests for the Wisp reader and evaluator
//!
//! These tests use proptest to generate random inputs and verify that:
//! 1. The scanner and reader never panic on arbitrary input
//! 2. Printing a literal readably and reading it back gives the same value
//! 3. Small valid programs evaluate to what Rust computes for them

use proptest::prelude::*;
use wisp::{pr_str, read_all, read_str, Interpreter, Scanner, Value};

// =============================================================================
// STRATEGY GENERATORS
// =============================================================================

/// Generate random strings that might break parsers
fn arbitrary_source_string() -> impl Strategy<Value = String> {
    prop::string::string_regex(r"[\x00-\x7F]{0,500}").unwrap()
}

/// Generate valid-ish S-expressions
fn sexp_like_string() -> impl Strategy<Value = String> {
    prop::collection::vec(sexp_token(), 0..50).prop_map(|tokens| tokens.join(" "))
}

/// Generate tokens that look like S-expression elements
fn sexp_token() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("(".to_string()),
        Just(")".to_string()),
        Just("[".to_string()),
        Just("]".to_string()),
        Just("{".to_string()),
        Just("}".to_string()),
        Just("'".to_string()),
        Just("`".to_string()),
        Just("~".to_string()),
        Just("~@".to_string()),
        Just("@".to_string()),
        Just("^".to_string()),
        Just("def!".to_string()),
        Just("let*".to_string()),
        Just("fn*".to_string()),
        Just("nil".to_string()),
        Just("true".to_string()),
        (-1000i64..1000i64).prop_map(|n| n.to_string()),
        r#""[a-zA-Z0-9 \\"]{0,20}"?"#.prop_map(|s| s),
        ":[a-z]{1,8}".prop_map(|s| s),
        "[a-z][a-z0-9_!?*-]{0,10}".prop_map(|s| s),
        ";[^\n]{0,20}\n".prop_map(|s| s),
    ]
}

/// Literal values that survive print-then-read unchanged
fn literal() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Nil),
        any::<bool>().prop_map(Value::Bool),
        (-1_000_000i64..1_000_000i64).prop_map(|n| Value::Number(n as f64)),
        "[a-zA-Z0-9 ]{0,12}".prop_map(Value::String),
        ":?[a-z][a-z0-9-]{0,8}".prop_filter("reserved words read as literals", |s| {
            !matches!(s.as_str(), "nil" | "true" | "false")
        })
        .prop_map(|s| match s.strip_prefix(':') {
            Some(k) => Value::keyword(k),
            None => Value::symbol(&s),
        }),
    ];
    leaf.prop_recursive(4, 64, 8, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..8).prop_map(Value::list),
            prop::collection::vec(inner, 0..8).prop_map(Value::vector),
        ]
    })
}

fn arith_expr() -> impl Strategy<Value = (String, f64)> {
    let op = prop_oneof![Just('+'), Just('-'), Just('*')];
    (op, -100i64..100i64, -100i64..100i64).prop_map(|(op, a, b)| {
        let (a, b) = (a as f64, b as f64);
        let expected = match op {
            '+' => a + b,
            '-' => a - b,
            _ => a * b,
        };
        (format!("({} {} {})", op, a, b), expected)
    })
}

// =============================================================================
// READER FUZZ TESTS
// =============================================================================

proptest! {
    /// The scanner should never panic on arbitrary input
    #[test]
    fn scanner_never_panics(source in arbitrary_source_string()) {
        let _ = Scanner::new(&source).scan_tokens();
    }

    /// The reader returns a value or an error, never panics
    #[test]
    fn reader_never_panics(source in arbitrary_source_string()) {
        let _ = read_str(&source);
        let _ = read_all(&source);
    }

    /// The reader handles S-expression-like token soup without panic
    #[test]
    fn reader_handles_sexp_like(source in sexp_like_string()) {
        let _ = read_all(&source);
    }

    /// Unclosed openers are underflow, never a syntax error
    #[test]
    fn unclosed_input_is_incomplete(depth in 1usize..60) {
        let source = format!("{}+ 1 1", "(".repeat(depth));
        let err = read_str(&source).unwrap_err();
        prop_assert!(err.is_incomplete());
    }

    /// Balanced nesting reads to completion
    #[test]
    fn balanced_nesting_reads(depth in 1usize..60) {
        let source = format!("{}1{}", "(".repeat(depth), ")".repeat(depth));
        prop_assert!(read_str(&source).is_ok());
    }

    /// Readable printing round-trips through the reader
    #[test]
    fn print_read_round_trip(value in literal()) {
        let printed = pr_str(&value, true);
        let reread = read_str(&printed).unwrap();
        prop_assert_eq!(reread, value);
    }
}

// =============================================================================
// EVALUATOR PROPERTIES
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Two-operand arithmetic agrees with host arithmetic
    #[test]
    fn arithmetic_matches_host((source, expected) in arith_expr()) {
        let interp = Interpreter::new().unwrap();
        prop_assert_eq!(interp.eval_str(&source).unwrap(), Value::Number(expected));
    }

    /// Quoting any literal yields it back unevaluated
    #[test]
    fn quote_is_identity(value in literal()) {
        let interp = Interpreter::new().unwrap();
        let source = format!("(quote {})", pr_str(&value, true));
        prop_assert_eq!(interp.eval_str(&source).unwrap(), value);
    }

    /// Evaluating arbitrary token soup never panics
    #[test]
    fn evaluator_never_panics(source in sexp_like_string()) {
        let interp = Interpreter::new().unwrap();
        let _ = interp.eval_all(&source);
    }
}

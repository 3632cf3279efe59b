use std::{
    fmt, fs,
    sync::{Arc, Mutex},
    thread,
};

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use safecalc::{
    Arity, Associativity, Bindings, ConfigError, Error, Grammar, Number, OperatorTable,
    ParseError, RuntimeError, calc, defaults, defaults::ArithmeticError,
};
use walkdir::WalkDir;

fn grammar() -> Grammar {
    defaults::operators().compile().unwrap()
}

fn assert_value(src: &str, bindings: &Bindings, expected: impl Into<Number>) {
    match calc(src, bindings) {
        Ok(value) => assert_eq!(value, expected.into(), "{src}"),
        Err(e) => panic!("Expression {src:?} failed: {e}"),
    }
}

fn assert_failure(src: &str, bindings: &Bindings) -> Error {
    match calc(src, bindings) {
        Ok(value) => panic!("Expression {src:?} evaluated to {value} but was expected to fail"),
        Err(e) => e,
    }
}

#[test]
fn basic_arithmetic() {
    let none = Bindings::new();

    assert_value("9", &none, 9);
    assert_value("9 + 3 + 6", &none, 18);
    assert_value("9 + 3 / 11", &none, 9.0 + 3.0 / 11.0);
    assert_value("(9 + 3)", &none, 12);
    assert_value("9 - 12 - 6", &none, -9);
    assert_value("2^3^2", &none, 512);
    assert_value("2^9", &none, 512);
}

#[test]
fn real_literals() {
    let none = Bindings::new();

    assert_value("2*3.14159", &none, 2.0 * 3.14159);
    assert_value("3.1415926535*3.1415926535 / 10", &none, 3.1415926535 * 3.1415926535 / 10.0);
    assert_value("6.02E23 * 8.048", &none, 6.02e23 * 8.048);
    assert_value(".02e23 * 8.", &none, 0.02e23 * 8.0);
}

#[test]
fn literal_classes_are_kept() {
    assert_eq!(calc("9", &Bindings::new()).unwrap(), Number::Integer(9));
    assert_eq!(calc("9.0", &Bindings::new()).unwrap(), Number::Real(9.0));
    assert_eq!(calc("9.0", &Bindings::new()).unwrap().to_string(), "9.0");
}

#[test]
fn order_of_operations() {
    let none = Bindings::new();

    assert_value("(9+3) / 11", &none, 12.0 / 11.0);
    assert_value("9 - (12 - 6)", &none, 3);
    assert_value("(2^3)^2", &none, 64);
    assert_value("2^(1-3)", &none, 0.25);
    assert_value("2^3+2", &none, 10);
    assert_value("2^3+5", &none, 13);
    assert_value("9 - 3 - 2", &none, 4);
}

#[test]
fn unary_operators() {
    let none = Bindings::new();

    assert_value("-9", &none, -9);
    assert_value("+9", &none, 9);
    assert_value("--9", &none, 9);
    assert_value("-2^2", &none, 4);
}

#[test]
fn letter_unary_operators() {
    let grammar = OperatorTable::new().prefix("a", |x| Ok(Number::Real(x.as_real() * 2.0)))
                                      .postfix("b", |x| Ok(Number::Real(x.as_real() + 1.0)))
                                      .compile()
                                      .unwrap();

    assert_eq!(grammar.evaluate("a 1 b", &Bindings::new()).unwrap(),
               Number::Real(4.0));
    // Written without spaces, the whole word is one identifier.
    assert!(matches!(grammar.evaluate("a1b", &Bindings::new()),
                     Err(Error::Runtime(RuntimeError::UnknownIdentifier { .. }))));
}

#[test]
fn prefix_applies_to_postfix_result() {
    let grammar = OperatorTable::new().prefix("P", |x| Ok(Number::Real(x.as_real() * 2.0)))
                                      .postfix("S", |x| Ok(Number::Real(x.as_real() + 1.0)))
                                      .compile()
                                      .unwrap();

    assert_eq!(grammar.evaluate("P 1 S", &Bindings::new()).unwrap(),
               Number::Real(4.0));
}

#[test]
fn functions() {
    let sin = Bindings::new().with_function("sin", Arity::Exact(1), |args| {
                                 Ok(Number::Real(args[0].as_real().sin()))
                             });
    assert_value("sin(0)", &sin, 0.0);

    let bindings = Bindings::new().with_function("first", Arity::Exact(3), |args| Ok(args[0]))
                                  .with_function("last", Arity::Exact(3), |args| Ok(args[2]))
                                  .with_function("mean", Arity::AtLeast(1), |args| {
                                      let sum = args.iter().map(|n| n.as_real()).sum::<f64>();
                                      Ok(Number::Real(sum / args.len() as f64))
                                  });

    assert_value("0 + first(-1+19, 2^2, 3 + 4)", &bindings, 18);
    assert_value("last(-1+19, 2^2, 3 + 4)", &bindings, 7);
    assert_value("1 * mean(-1+19, 2^2, 3 + 4)", &bindings, 29.0 / 3.0);

    let shadowed = Bindings::new().with_value("max", 0)
                                  .with_function("max_", Arity::Exact(1), |args| Ok(args[0]));
    assert_value("max_(1)", &shadowed, 1);
}

#[test]
fn variables() {
    let x = Bindings::new().with_value("x", 1);
    let both = Bindings::new().with_value("x", 1).with_value("x_", 2);

    assert_value("x", &x, 1);
    assert_value("x + x^x * x", &x, 2);
    assert_value("x", &both, 1);
    assert_value("x_", &both, 2);
}

#[test]
fn default_functions_are_opt_in() {
    let err = assert_failure("max(1, 2)", &Bindings::new());
    assert!(matches!(err, Error::Runtime(RuntimeError::UnknownIdentifier { .. })));

    assert_value("max(1, 2)", &defaults::identifiers(), 2);
    assert_value("round(2.5) + floor(-0.5)", &defaults::identifiers(), 1);
}

#[test]
fn unknown_identifier_reports_name_and_position() {
    let err = assert_failure("1 + y", &Bindings::new());

    assert_eq!(err.to_string(), "Error at position 4: Unknown identifier 'y'.");
}

#[test]
fn syntax_errors() {
    let none = Bindings::new();

    assert!(matches!(assert_failure("1 +", &none),
                     Error::Parse(ParseError::UnexpectedEndOfInput { position: 3 })));
    assert!(matches!(assert_failure("(1", &none),
                     Error::Parse(ParseError::ExpectedClosingParen { .. })));
    assert!(matches!(assert_failure("1 $ 2", &none),
                     Error::Parse(ParseError::UnexpectedCharacter { character: '$', position: 2 })));
    assert!(matches!(assert_failure("f()", &none),
                     Error::Parse(ParseError::EmptyArgumentList { .. })));
    assert!(matches!(assert_failure("", &none),
                     Error::Parse(ParseError::UnexpectedEndOfInput { position: 0 })));
}

#[test]
fn call_errors() {
    let bindings = defaults::identifiers().with_value("x", 2);

    let err = assert_failure("x(1)", &bindings);
    assert!(matches!(err, Error::Runtime(RuntimeError::NotCallable { .. })));

    let err = assert_failure("clamp(1)", &bindings);
    assert!(matches!(err,
                     Error::Runtime(RuntimeError::ArgumentCountMismatch { found: 1, .. })));
}

#[test]
fn rl_group_binds_tighter_than_lr_group() {
    let grammar = OperatorTable::new().binary("+", 1, Associativity::LeftToRight, |a, b| {
                                          Ok(Number::Real(a.as_real() + b.as_real()))
                                      })
                                      .binary("@", 9, Associativity::RightToLeft, |a, b| {
                                          Ok(Number::Real(a.as_real() * b.as_real()))
                                      })
                                      .compile()
                                      .unwrap();

    assert_eq!(grammar.parse("1 + 2 @ 3").unwrap().to_string(), "(+ 1 (@ 2 3))");
    assert_eq!(grammar.evaluate("1 + 2 @ 3", &Bindings::new()).unwrap(),
               Number::Real(7.0));
}

#[test]
fn registration_order_does_not_matter() {
    fn add(a: Number, b: Number) -> safecalc::CallResult {
        Ok(Number::Real(a.as_real() + b.as_real()))
    }
    fn mul(a: Number, b: Number) -> safecalc::CallResult {
        Ok(Number::Real(a.as_real() * b.as_real()))
    }

    let forward = OperatorTable::new().binary("+", 3, Associativity::LeftToRight, add)
                                      .binary("*", 2, Associativity::LeftToRight, mul)
                                      .compile()
                                      .unwrap();
    let backward = OperatorTable::new().binary("*", 2, Associativity::LeftToRight, mul)
                                       .binary("+", 3, Associativity::LeftToRight, add)
                                       .compile()
                                       .unwrap();

    for grammar in [forward, backward] {
        assert_eq!(grammar.parse("1 + 2 * 3").unwrap().to_string(), "(+ 1 (* 2 3))");
    }
}

#[test]
fn configuration_errors() {
    assert_eq!("x".parse::<Associativity>(),
               Err(ConfigError::UnknownAssociativity { found: "x".to_string() }));
    assert!(matches!(OperatorTable::new().tagged_binary("+ high", |a, _| Ok(a)),
                     Err(ConfigError::InvalidPrecedence { .. })));
    assert!(matches!(OperatorTable::new().tagged_unary("! sideways", |x| Ok(x)),
                     Err(ConfigError::UnknownSide { .. })));
}

#[test]
fn grammar_survives_failures() {
    let grammar = grammar();
    let bindings = Bindings::new().with_value("x", 4);

    assert!(grammar.evaluate("1 / 0", &bindings).is_err());
    assert!(grammar.evaluate("1 +", &bindings).is_err());
    assert!(grammar.evaluate("y", &bindings).is_err());
    assert_eq!(grammar.evaluate("x * 2", &bindings).unwrap(), Number::Integer(8));
}

#[test]
fn one_tree_many_bindings() {
    let grammar = grammar();
    let expr = grammar.parse("x ^ 2 + 1").unwrap();

    let results = (1..=3).map(|x| grammar.evaluate_expr(&expr, &Bindings::new().with_value("x", x))
                                         .unwrap())
                         .collect::<Vec<_>>();

    assert_eq!(results,
               vec![Number::Integer(2), Number::Integer(5), Number::Integer(10)]);
}

#[test]
fn concurrent_evaluations_share_a_grammar() {
    let grammar = grammar();

    thread::scope(|scope| {
        let handles = (0..8_i64).map(|i| {
                                    let grammar = &grammar;
                                    scope.spawn(move || {
                                             let bindings = Bindings::new().with_value("x", i);
                                             grammar.evaluate("x * x + 1", &bindings).unwrap()
                                         })
                                })
                                .collect::<Vec<_>>();

        for (i, handle) in (0..8_i64).zip(handles) {
            assert_eq!(handle.join().unwrap(), Number::Integer(i * i + 1));
        }
    });
}

#[derive(Debug)]
struct Refused(&'static str);

impl fmt::Display for Refused {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "refused: {}", self.0)
    }
}

impl std::error::Error for Refused {}

#[test]
fn callable_errors_reach_the_caller_unchanged() {
    let bindings = Bindings::new().with_function("check", Arity::Exact(1), |_| {
                                      Err(Refused("no thanks").into())
                                  });

    let err = assert_failure("1 + check(2)", &bindings);
    assert_eq!(err.to_string(), "refused: no thanks");

    let inner = err.into_callable_error().unwrap();
    assert_eq!(inner.downcast_ref::<Refused>().map(|r| r.0), Some("no thanks"));
}

#[test]
fn arithmetic_errors_can_be_downcast() {
    let err = assert_failure("1 % 0", &Bindings::new());
    let inner = err.into_callable_error().unwrap();

    assert_eq!(inner.downcast_ref::<ArithmeticError>(),
               Some(&ArithmeticError::DivisionByZero { operation: "%" }));
}

#[test]
fn callables_run_once_per_node() {
    let calls = Arc::new(Mutex::new(0));
    let counter = Arc::clone(&calls);
    let bindings = Bindings::new().with_function("tick", Arity::Exact(1), move |args| {
                                      *counter.lock().unwrap() += 1;
                                      Ok(args[0])
                                  });

    assert_value("tick(1) + tick(tick(2))", &bindings, 3);
    assert_eq!(*calls.lock().unwrap(), 3);
}

#[test]
fn adversarial_nesting_is_rejected() {
    let depth = 100_000;
    let source = format!("{}1{}", "(".repeat(depth), ")".repeat(depth));

    assert!(matches!(assert_failure(&source, &Bindings::new()),
                     Error::Parse(ParseError::NestingTooDeep { .. })));

    let chain = format!("1{}", " ^ 1".repeat(depth));
    assert!(matches!(assert_failure(&chain, &Bindings::new()),
                     Error::Parse(ParseError::NestingTooDeep { .. })));
}

fn as_int(n: Number) -> i64 {
    match n {
        Number::Integer(i) => i,
        Number::Real(_) => panic!("expected an integer"),
    }
}

fn nested(open: &str, depth: usize) -> String {
    format!("{}1{}", open.repeat(depth), ")".repeat(depth))
}

#[test]
fn nesting_up_to_the_default_limit_evaluates() {
    let functions = defaults::identifiers();

    // The whole expression and every group cost four levels, a prefix one.
    assert_value(&nested("(", 63), &Bindings::new(), 1);
    assert_value(&nested("-(", 50), &Bindings::new(), 1);
    assert_value(&nested("max(", 63), &functions, 1);

    for source in [nested("(", 64), nested("-(", 51), nested("max(", 64)] {
        assert!(matches!(assert_failure(&source, &functions),
                         Error::Parse(ParseError::NestingTooDeep { limit: 256, .. })));
    }
}

#[test]
fn many_precedence_levels_keep_nesting_cheap() {
    let table = (0..40).fold(OperatorTable::new(), |table, n| {
                           table.binary(format!("@{n}"), n, Associativity::LeftToRight, |a, b| {
                                    Ok(Number::Integer(as_int(a) + as_int(b)))
                                })
                       });
    let grammar = table.compile().unwrap();
    let inner = |depth: usize| {
        format!("{}1 @0 2 @39 3{}", "(".repeat(depth), ")".repeat(depth))
    };

    assert_eq!(grammar.evaluate(&inner(60), &Bindings::new()).unwrap(),
               Number::Integer(6));
    assert!(matches!(grammar.evaluate(&inner(250), &Bindings::new()),
                     Err(Error::Parse(ParseError::NestingTooDeep { .. }))));
    assert!(matches!(grammar.evaluate(&inner(100_000), &Bindings::new()),
                     Err(Error::Parse(ParseError::NestingTooDeep { .. }))));
}

/// Runs every `tests/cases/*.txt` fixture.
///
/// Each non-empty line that does not start with `#` reads
/// `expression => expected`, where `expected` is the printed result or
/// `error`. Expressions see the default operators and functions plus
/// `x = 3` and `y = 0.5`.
#[test]
fn fixture_cases() {
    let grammar = grammar();
    let bindings = defaults::identifiers().with_value("x", 3).with_value("y", 0.5);
    let mut count = 0;

    for entry in
        WalkDir::new("tests/cases").into_iter()
                                   .filter_map(Result::ok)
                                   .filter(|e| e.path().extension().is_some_and(|ext| ext == "txt"))
    {
        let path = entry.path();
        let content =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));

        for (line_no, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let (source, expected) = line.split_once("=>")
                                         .unwrap_or_else(|| panic!("{path:?}:{}: missing '=>'",
                                                                   line_no + 1));
            let (source, expected) = (source.trim(), expected.trim());
            count += 1;

            let actual = match grammar.evaluate(source, &bindings) {
                Ok(value) => value.to_string(),
                Err(_) => "error".to_string(),
            };
            assert_eq!(actual, expected, "{path:?}:{}: {source}", line_no + 1);
        }
    }

    assert!(count > 0, "No fixture cases found in tests/cases");
}

proptest! {
    #[test]
    fn integer_literals_evaluate_to_themselves(n in 0_i64..=i64::MAX) {
        prop_assert_eq!(calc(&n.to_string(), &Bindings::new()).unwrap(), Number::Integer(n));
    }

    #[test]
    fn subtraction_folds_left(values in prop::collection::vec(-1000_i64..1000, 1..20)) {
        let source = values.iter().map(i64::to_string).collect::<Vec<_>>().join(" - ");
        let expected = values[1..].iter().fold(values[0], |acc, v| acc - v);

        prop_assert_eq!(calc(&source, &Bindings::new()).unwrap(), Number::Integer(expected));
    }

    #[test]
    fn power_folds_right(values in prop::collection::vec(1_i64..=3, 1..4)) {
        let source = values.iter().map(i64::to_string).collect::<Vec<_>>().join("^");
        let expected = values.iter()
                             .rev()
                             .copied()
                             .reduce(|acc, v| v.pow(u32::try_from(acc).unwrap()))
                             .unwrap();

        prop_assert_eq!(calc(&source, &Bindings::new()).unwrap(), Number::Integer(expected));
    }

    #[test]
    fn parsing_arbitrary_text_never_panics(source in "[0-9a-z+*/^%(), .-]{0,40}") {
        let _ = calc(&source, &defaults::identifiers());
    }
}

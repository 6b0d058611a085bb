use std::collections::HashMap;

use pretty_assertions::assert_eq;
use scopeval::{
    Bindings, CallStack, ErrorKind, EvalError, EvalOptions, Frame, Namespace, Registry, Resolver,
    Value,
    compiler::{CompiledExpr, compile},
    engine::{Dependency, Engine, execute, interpreted::Interpreted},
    error::{ParseError, RuntimeError},
    evaluate, evaluate_in,
    interpreter::{evaluator::core::EvalResult, parser::grammar::Grammar},
    scope::core::ScopeBuilder,
};
use serde_json::json;

fn bindings(pairs: &[(&str, Value)]) -> Bindings {
    pairs.iter()
         .map(|(name, value)| ((*name).to_string(), value.clone()))
         .collect()
}

fn ints(values: impl IntoIterator<Item = i64>) -> Value {
    Value::from(values.into_iter().map(Value::Integer).collect::<Vec<_>>())
}

/// Answers every name that looks like `n<digits>` with the number.
struct Numbered;

impl Resolver for Numbered {
    fn resolve(&self, key: &str) -> Option<Value> {
        key.strip_prefix('n')?.parse().ok().map(Value::Integer)
    }
}

/// An engine whose dependency is never present.
struct Offline;

impl Engine for Offline {
    fn name(&self) -> &'static str {
        "offline"
    }

    fn dependency(&self) -> Option<Dependency> {
        Some(Dependency { name:      "remote-runtime",
                          available: false,
                          hint:      "start the runtime", })
    }

    fn evaluate(&self, _: &CompiledExpr<'_>) -> EvalResult<Value> {
        unreachable!("never selected")
    }
}

#[test]
fn adds_two_integers() {
    assert_eq!(evaluate("2 + 3", &EvalOptions::default()).unwrap(), Value::Integer(5));
}

#[test]
fn extended_and_is_elementwise() {
    let locals = bindings(&[("a", Value::Bool(true)), ("b", Value::Bool(false))]);
    let options = EvalOptions::default().with_locals(&locals);

    assert_eq!(evaluate("a and b", &options).unwrap(), Value::Bool(false));
    assert_eq!(evaluate("a or b", &options).unwrap(), Value::Bool(true));
    assert_eq!(evaluate("not b", &options).unwrap(), Value::Bool(true));
}

#[test]
fn true_and_legacy_division() {
    let legacy = EvalOptions::default().with_true_division(false);

    assert_eq!(evaluate("7 / 2", &EvalOptions::default()).unwrap(), Value::Real(3.5));
    assert_eq!(evaluate("7 / 2", &legacy).unwrap(), Value::Integer(3));
    assert_eq!(evaluate("-7 / 2", &legacy).unwrap(), Value::Integer(-4));
    assert_eq!(evaluate("7.0 / 2", &legacy).unwrap(), Value::Real(3.5));
}

#[test]
fn integers_beyond_exact_reals_still_promote() {
    let locals = bindings(&[("big", Value::Integer(1 << 60)),
                            ("above", Value::Integer((1 << 60) + 1))]);

    for engine in ["interpreted", "accelerated"] {
        let options = EvalOptions::default().with_engine(engine).with_locals(&locals);
        let run = |src: &str| evaluate(src, &options).unwrap();

        assert_eq!(run("2 ** 60 / 2"), Value::Real(576_460_752_303_423_488.0), "{engine}");
        assert_eq!(run("big + 0.5"), Value::Real(1_152_921_504_606_846_976.0), "{engine}");
        assert_eq!(run("big > 0.5"), Value::Bool(true), "{engine}");
        assert_eq!(run("above > 1152921504606846976.0"), Value::Bool(true), "{engine}");
        assert_eq!(run("big == 1152921504606846976.0"), Value::Bool(true), "{engine}");
    }
}

#[test]
fn unknown_identifiers_fail_before_compiling() {
    let broken = "1 +";

    let err = evaluate(broken, &EvalOptions::default().with_engine("numexpr")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Configuration);
    assert!(err.to_string().contains("'numexpr'"));
    assert!(err.to_string().contains("accelerated, interpreted"));

    let err = evaluate(broken, &EvalOptions::default().with_grammar("pandas")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Configuration);
}

#[test]
fn missing_dependency_fails_before_compiling() {
    let registry = Registry::builder().grammar(Grammar::Extended)
                                      .engine(Offline)
                                      .build()
                                      .unwrap();
    let options = EvalOptions::default().with_engine("offline");

    let err = evaluate_in(&registry, "1 +", &options).unwrap_err();
    assert!(matches!(&err,
                     EvalError::DependencyMissing { engine, dependency, .. }
                     if engine == "offline" && dependency == "remote-runtime"));
}

#[test]
fn non_text_input_is_rejected_first() {
    let err = evaluate(Value::Integer(5), &EvalOptions::default()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InputType);
    assert!(err.to_string().contains("'int'"));

    // Even a broken configuration is not looked at.
    let options = EvalOptions::default().with_engine("nope");
    let err = evaluate(Value::from(vec![Value::Integer(1)]), &options).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InputType);
}

#[test]
fn capability_failure_precedes_context_capture() {
    let stack = CallStack::new();
    let resolvers = [Namespace::from(Bindings::new()), Namespace::Plain(Value::Integer(1))];
    let options = EvalOptions::default().with_context(&stack, 9)
                                        .with_resolvers(&resolvers);

    let err = evaluate("x + 1", &options).unwrap_err();
    assert!(matches!(&err, EvalError::Capability { type_name } if type_name == "int"));

    // With usable resolvers the same stack fails at lookup instead.
    let err = evaluate("x + 1", &options.with_resolvers(&resolvers[..1])).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Context);
}

#[test]
fn scope_precedence() {
    let locals = bindings(&[("a", Value::Integer(1))]);
    let globals = bindings(&[("a", Value::Integer(3)),
                             ("b", Value::Integer(3)),
                             ("c", Value::Integer(3))]);
    let mut stack = CallStack::new();
    stack.push(Frame::default().with_local("a", 2_i64)
                               .with_local("b", 2_i64)
                               .with_global("e", 2_i64));
    let resolvers = [Namespace::from(bindings(&[("a", Value::Integer(4)),
                                                ("c", Value::Integer(4)),
                                                ("d", Value::Integer(4))])),
                     Namespace::keyed(Numbered)];

    let options = EvalOptions::default().with_locals(&locals)
                                        .with_globals(&globals)
                                        .with_context(&stack, 2)
                                        .with_resolvers(&resolvers);

    let read = |name: &str| evaluate(name, &options).unwrap();
    assert_eq!(read("a"), Value::Integer(1));
    assert_eq!(read("b"), Value::Integer(2));
    assert_eq!(read("c"), Value::Integer(3));
    assert_eq!(read("d"), Value::Integer(4));
    assert_eq!(read("n42"), Value::Integer(42));

    // Explicit globals hide the frame's globals.
    let err = evaluate("e", &options).unwrap_err();
    assert!(matches!(&err, EvalError::NameResolution { name, pos: 0 } if name == "e"));

    let without_globals = EvalOptions { globals: None,
                                        ..options };
    assert_eq!(evaluate("e", &without_globals).unwrap(), Value::Integer(2));
}

#[test]
fn deeper_context_frames() {
    let mut stack = CallStack::new();
    stack.push(Frame::default().with_local("depth", 3_i64));
    stack.push(Frame::default().with_local("depth", 2_i64));

    let at = |depth| {
        evaluate("depth", &EvalOptions::default().with_context(&stack, depth)).map_err(|e| e.kind())
    };
    assert_eq!(at(2), Ok(Value::Integer(2)));
    assert_eq!(at(3), Ok(Value::Integer(3)));
    assert_eq!(at(4), Err(ErrorKind::Context));
    // The evaluation machinery's own levels have no bindings.
    assert_eq!(at(1), Err(ErrorKind::NameResolution));
}

#[test]
fn text_scalar_results_are_rejected() {
    let locals = bindings(&[("s", Value::from("abc"))]);
    let options = EvalOptions::default().with_locals(&locals);

    let err = evaluate("s", &options).unwrap_err();
    assert!(matches!(err, EvalError::InvalidScalarResult { type_name: "text" }));

    assert_eq!(evaluate("s == 'abc'", &options).unwrap(), Value::Bool(true));
}

#[test]
fn syntax_and_name_errors_are_distinct() {
    let err = evaluate("a +* 2", &EvalOptions::default()).unwrap_err();
    assert!(matches!(err, EvalError::Syntax(ParseError::UnexpectedToken { pos: 3, .. })));

    let err = evaluate("a + 2", &EvalOptions::default()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NameResolution);
}

#[test]
fn assignments_and_statements_are_syntax_errors() {
    let cases = [("x = 1", ErrorKind::Syntax), ("x **= 2", ErrorKind::Syntax), ("1; 2", ErrorKind::Syntax)];
    for (source, kind) in cases {
        let err = evaluate(source, &EvalOptions::default()).unwrap_err();
        assert_eq!(err.kind(), kind, "{source}");
    }

    let err = evaluate("x = 1", &EvalOptions::default()).unwrap_err();
    assert!(matches!(err, EvalError::Syntax(ParseError::AssignmentNotAllowed { pos: 2 })));
}

#[test]
fn floor_division_belongs_to_the_strict_grammar() {
    let err = evaluate("7 // 2", &EvalOptions::default()).unwrap_err();
    assert!(matches!(err,
                     EvalError::Syntax(ParseError::UnsupportedOperator { grammar: "extended", .. })));

    let strict = EvalOptions::default().with_grammar("strict").with_engine("interpreted");
    assert_eq!(evaluate("-7 // 2", &strict).unwrap(), Value::Integer(-4));
    assert_eq!(evaluate("7.5 // 2", &strict).unwrap(), Value::Real(3.0));

    // The accelerated engine has no floor division.
    let err = evaluate("7 // 2", &strict.with_engine("accelerated")).unwrap_err();
    assert!(matches!(err,
                     EvalError::Engine { source: RuntimeError::UnsupportedOperator { .. }, .. }));
}

#[test]
fn strict_keywords_short_circuit() {
    let locals = bindings(&[("zero", Value::Integer(0)), ("two", Value::Integer(2))]);
    let strict = EvalOptions::default().with_grammar("strict")
                                       .with_engine("interpreted")
                                       .with_locals(&locals);

    assert_eq!(evaluate("zero and 1 / zero", &strict).unwrap(), Value::Integer(0));
    assert_eq!(evaluate("two or 1 / zero", &strict).unwrap(), Value::Integer(2));
    assert_eq!(evaluate("not two", &strict).unwrap(), Value::Bool(false));
    assert_eq!(evaluate("zero or two and 3", &strict).unwrap(), Value::Integer(3));

    let err = evaluate("zero and two", &strict.with_engine("accelerated")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Engine);
    assert!(err.to_string().starts_with("Engine 'accelerated' failed"));
}

#[test]
fn engine_errors_keep_their_source() {
    let err = evaluate("1 / 0", &EvalOptions::default()).unwrap_err();
    assert!(matches!(&err,
                     EvalError::Engine { engine, source: RuntimeError::DivisionByZero { pos: 2 } }
                     if engine == "accelerated"));
    assert!(std::error::Error::source(&err).is_some());
}

#[test]
fn engines_agree_on_columns() {
    let locals = bindings(&[("x", ints(0..5000)),
                            ("y", ints((0..5000).map(|n| n % 7))),
                            ("k", Value::Real(0.5))]);
    let expressions = ["x * 2 + 1",
                       "x % 7 == y",
                       "(x > 10) & (y < 3)",
                       "x ** 2 / (y + 1)",
                       "-x * k"];

    for expression in expressions {
        let run = |engine| {
            evaluate(expression, &EvalOptions::default().with_engine(engine).with_locals(&locals))
                .unwrap()
        };
        assert_eq!(run("accelerated"), run("interpreted"), "{expression}");
    }
}

#[test]
fn columns_broadcast_against_scalars() {
    let locals = bindings(&[("x", ints([1, 2, 3]))]);
    let options = EvalOptions::default().with_locals(&locals);

    assert_eq!(evaluate("x * 10 - 1", &options).unwrap(), ints([9, 19, 29]));
    assert_eq!(evaluate("x > 1", &options).unwrap(),
               Value::from(vec![Value::Bool(false), Value::Bool(true), Value::Bool(true)]));
    assert_eq!(evaluate("x[1] + x[-1]", &options).unwrap(), Value::Integer(5));
}

#[test]
fn nested_arrays_need_the_interpreted_engine() {
    let options = EvalOptions::default();
    let err = evaluate("[[1, 2], [3, 4]] * 2", &options).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Engine);

    let value = evaluate("[[1, 2], [3, 4]] * 2", &options.with_engine("interpreted")).unwrap();
    assert_eq!(value, Value::from(vec![ints([2, 4]), ints([6, 8])]));
}

#[test]
fn execution_follows_the_compiled_engine() {
    let scope = ScopeBuilder::new().build();
    let compiled =
        compile("[[1, 2], [3, 4]] * 2", Grammar::Extended, &scope, "interpreted", true).unwrap();

    // The accelerated engine would reject nested arrays.
    let value = execute(Registry::global(), &compiled).unwrap();
    assert_eq!(value, Value::from(vec![ints([2, 4]), ints([6, 8])]));

    let offline_only = Registry::builder().engine(Offline).build().unwrap();
    let err = execute(&offline_only, &compiled).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Configuration);
}

#[test]
fn json_namespaces_resolve_names() {
    let document = json!({ "price": [10.0, 20.0], "qty": [3, 1], "rate": 0.5 });
    let resolvers = [Namespace::from_json(&document).unwrap()];
    let options = EvalOptions::default().with_resolvers(&resolvers);

    assert_eq!(evaluate("price * qty * rate", &options).unwrap(),
               Value::from(vec![Value::Real(15.0), Value::Real(10.0)]));

    let plain = [Namespace::from_json(&json!([1, 2, 3])).unwrap()];
    let err = evaluate("1", &options.with_resolvers(&plain)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Capability);
}

#[test]
fn evaluation_is_idempotent() {
    let locals = HashMap::from([("a".to_string(), ints([1, 2, 3])),
                                ("b".to_string(), Value::Real(1.5))]);
    let options = EvalOptions::default().with_locals(&locals);

    let first = evaluate("a * b - 1", &options).unwrap();
    let second = evaluate("a * b - 1", &options).unwrap();
    assert_eq!(first, second);
    assert_eq!(locals.len(), 2);
}

#[test]
fn custom_registries_only_know_what_they_hold() {
    let registry = Registry::builder().grammar(Grammar::Strict)
                                      .engine(Interpreted)
                                      .build()
                                      .unwrap();
    let options = EvalOptions::default().with_grammar("strict").with_engine("interpreted");

    assert_eq!(evaluate_in(&registry, "2 ** 8", &options).unwrap(), Value::Integer(256));

    let err = evaluate_in(&registry, "1", &EvalOptions::default()).unwrap_err();
    assert!(matches!(err, EvalError::Configuration { ref valid, .. } if valid == &["strict"]));
}

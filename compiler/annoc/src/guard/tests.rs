use anno_check::CheckConfig;
use anno_expr::{SharedTypeRegistry, TypeRegistry};
use pretty_assertions::assert_eq;

use super::*;

const SCALE_DOC: &str = "Scale a list.

xs ([int]): values.
factor (int): multiplier.

return ([int]): scaled values.
";

fn engine(config: CheckConfig) -> Engine {
    Engine::with_registry(SharedTypeRegistry::new(TypeRegistry::with_builtins()), config)
}

fn scale(args: &[Value]) -> Value {
    match args {
        [Value::List(xs), Value::Int(k)] => {
            Value::list(xs.iter().map(|x| match x {
                Value::Int(n) => Value::int(n * k),
                other => other.clone(),
            }).collect())
        }
        _ => Value::None,
    }
}

#[test]
fn well_typed_call_reports_nothing() {
    let engine = engine(CheckConfig::default());
    let reporter = CollectingReporter::new();
    let guard = Guard::builder("scale")
        .doc(SCALE_DOC)
        .param("xs")
        .param("factor")
        .build(&engine, &reporter)
        .unwrap();

    let result = guard.call(&[Value::list(vec![Value::int(1), Value::int(2)]), Value::int(3)], scale);
    assert_eq!(result, Value::list(vec![Value::int(3), Value::int(6)]));
    assert!(reporter.is_empty());
}

#[test]
fn bad_argument_and_bad_return_are_both_reported() {
    let engine = engine(CheckConfig::default());
    let reporter = CollectingReporter::new();
    let guard = Guard::builder("scale")
        .doc(SCALE_DOC)
        .param("xs")
        .param("factor")
        .build(&engine, &reporter)
        .unwrap();

    let result = guard.call(&[Value::list(vec![]), Value::string("3")], scale);
    assert_eq!(result, Value::None);

    let warnings = reporter.take();
    assert_eq!(warnings.len(), 2);
    let Warning::Mismatch(arg) = &warnings[0] else {
        panic!("expected a mismatch, got {:?}", warnings[0]);
    };
    assert_eq!(arg.slot, "factor");
    let Warning::Mismatch(ret) = &warnings[1] else {
        panic!("expected a mismatch, got {:?}", warnings[1]);
    };
    assert!(ret.is_return());
    assert!(reporter.is_empty());
}

#[test]
fn check_args_counts_mismatches_and_ignores_extras() {
    let engine = engine(CheckConfig::default());
    let reporter = CollectingReporter::new();
    let guard = Guard::builder("scale")
        .doc(SCALE_DOC)
        .param("xs")
        .param("factor")
        .build(&engine, &reporter)
        .unwrap();

    assert_eq!(guard.check_args(&[Value::int(1), Value::string("x"), Value::None]), 2);
    assert_eq!(guard.check_args(&[Value::list(vec![])]), 0);
    assert_eq!(reporter.len(), 2);
}

#[test]
fn missing_doc_is_reported_when_asked() {
    let quiet = engine(CheckConfig::default());
    let loud = engine(CheckConfig::default().with_complain_for_missing_doc(true));
    let reporter = CollectingReporter::new();

    let guard = Guard::builder("bare").param("x").build(&quiet, &reporter).unwrap();
    assert!(reporter.is_empty());
    assert_eq!(guard.call(&[Value::string("anything")], |_| Value::int(1)), Value::int(1));
    assert!(reporter.is_empty());

    Guard::builder("bare").param("x").build(&loud, &reporter).unwrap();
    assert_eq!(
        reporter.take(),
        vec![Warning::MissingDoc {
            entity: "bare".to_string()
        }]
    );
}

#[test]
fn missing_types_skip_the_receiver() {
    let engine = engine(CheckConfig::default().with_complain_for_missing_doc(true));
    let reporter = CollectingReporter::new();
    let doc = "bar\n\na (int): a int.\n";

    Guard::builder("ClassA.bar")
        .doc(doc)
        .param("self")
        .param("a")
        .param("b")
        .build(&engine, &reporter)
        .unwrap();

    assert_eq!(
        reporter.take(),
        vec![Warning::MissingType {
            entity: "ClassA.bar".to_string(),
            param: "b".to_string(),
        }]
    );
}

#[test]
fn self_is_only_exempt_in_first_position() {
    let engine = engine(CheckConfig::default().with_complain_for_missing_doc(true));
    let reporter = CollectingReporter::new();
    Guard::builder("odd")
        .doc("odd\n\na (int): a int.\n")
        .param("a")
        .param("self")
        .build(&engine, &reporter)
        .unwrap();
    assert_eq!(reporter.len(), 1);
}

#[test]
fn defaults_are_checked_at_build_time() {
    let engine = engine(CheckConfig::default());
    let reporter = CollectingReporter::new();
    Guard::builder("scale")
        .doc(SCALE_DOC)
        .param("xs")
        .param_with_default("factor", Value::float(1.0))
        .build(&engine, &reporter)
        .unwrap();

    let warnings = reporter.take();
    assert_eq!(warnings.len(), 1);
    assert_eq!(
        warnings[0].to_string(),
        "`scale` received value with wrong type for argument `factor`.\n\
         Value passed: `1.0`, of type `float`.\n\
         Expected type: `int`."
    );
}

#[test]
fn malformed_declaration_fails_the_build() {
    let engine = engine(CheckConfig::default());
    let reporter = CollectingReporter::new();
    let result = Guard::builder("broken")
        .doc("broken\n\nx ({a}): bad.\n")
        .param("x")
        .build(&engine, &reporter);
    assert!(matches!(result, Err(ParseError::MalformedEntry { .. })));
}

#[test]
fn warnings_serialize_with_kind_tag() {
    let warning = Warning::MissingType {
        entity: "f".to_string(),
        param: "x".to_string(),
    };
    assert_eq!(
        serde_json::to_value(&warning).unwrap(),
        serde_json::json!({ "kind": "missing_type", "entity": "f", "param": "x" })
    );
    assert_eq!(warning.to_string(), "Missing type information for argument `x` in `f`.");
}

#[test]
fn keyword_arguments_fill_missing_positionals() {
    let engine = engine(CheckConfig::default());
    let reporter = CollectingReporter::new();
    let guard = Guard::builder("scale")
        .doc(SCALE_DOC)
        .param("xs")
        .param("factor")
        .build(&engine, &reporter)
        .unwrap();
    assert_eq!(guard.entity(), "scale");

    let xs = Value::list(vec![Value::int(2)]);
    let by_keyword = |args: &[Value], kwargs: &[(&str, Value)]| match kwargs {
        [(_, factor)] => scale(&[args[0].clone(), factor.clone()]),
        _ => scale(args),
    };

    let result = guard.call_with_kwargs(std::slice::from_ref(&xs), &[("factor", Value::int(5))], by_keyword);
    assert_eq!(result, Value::list(vec![Value::int(10)]));
    assert!(reporter.is_empty());

    assert_eq!(guard.check_call(std::slice::from_ref(&xs), &[("factor", Value::string("5"))]), 1);
    let warnings = reporter.take();
    assert!(matches!(&warnings[..], [Warning::Mismatch(d)] if d.slot == "factor"));

    // A positional argument shadows a keyword of the same name.
    assert_eq!(
        guard.check_call(&[xs, Value::int(1)], &[("factor", Value::string("5"))]),
        0
    );
    // Unknown keywords are ignored.
    assert_eq!(guard.check_call(&[], &[("scale", Value::None)]), 0);
    assert!(reporter.is_empty());
}

#[test]
fn mismatches_quote_the_doc_text() {
    let engine = engine(CheckConfig::default());
    let reporter = CollectingReporter::new();
    let guard = Guard::builder("draw")
        .doc("draw\n\nshapes ([Shape]|None): what to draw.\n")
        .param("shapes")
        .build(&engine, &reporter)
        .unwrap();

    assert_eq!(guard.check_args(&[Value::int(3)]), 1);
    let warnings = reporter.take();
    let [Warning::Mismatch(diagnostic)] = &warnings[..] else {
        panic!("expected one mismatch, got {warnings:?}");
    };
    assert_eq!(diagnostic.expected.as_deref(), Some("[Shape]|None"));
}

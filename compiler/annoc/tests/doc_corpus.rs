#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Documented identity functions checked against corpora of good and bad
//! values.
//!
//! Every function declares the same type for its argument and its return
//! value and returns its argument, so a bad value produces exactly two
//! warnings and a good one none.

use annoc::{
    BuiltinType, CheckConfig, CollectingReporter, Engine, Guard, SharedTypeRegistry, TypeRegistry,
    Value,
};

fn s(text: &str) -> Value {
    Value::string(text)
}

fn i(n: i64) -> Value {
    Value::int(n)
}

fn list(items: Vec<Value>) -> Value {
    Value::list(items)
}

fn tuple(items: Vec<Value>) -> Value {
    Value::tuple(items)
}

fn dict(entries: Vec<(Value, Value)>) -> Value {
    Value::dict(entries)
}

fn empties() -> Vec<Value> {
    vec![Value::None, dict(vec![]), Value::set(vec![]), tuple(vec![]), list(vec![])]
}

fn engine() -> Engine {
    let engine = Engine::with_registry(
        SharedTypeRegistry::new(TypeRegistry::with_builtins()),
        CheckConfig::default(),
    );
    engine.register_type("unicode", BuiltinType::Str);
    engine
}

fn run_corpus(name: &str, doc: &str, param: &str, ok: &[Value], not_ok: &[Value]) {
    let engine = engine();
    let reporter = CollectingReporter::new();
    let guard = Guard::builder(name)
        .doc(doc)
        .param(param)
        .build(&engine, &reporter)
        .unwrap();
    assert!(reporter.is_empty(), "{name}: build reported {:?}", reporter.take());

    let identity = |args: &[Value]| args[0].clone();
    for value in ok {
        guard.call(std::slice::from_ref(value), identity);
        let warnings = reporter.take();
        assert!(warnings.is_empty(), "{name}({value}) warned: {warnings:?}");
    }
    for value in not_ok {
        guard.call(std::slice::from_ref(value), identity);
        assert_eq!(reporter.take().len(), 2, "{name}({value}) should warn twice");
    }
}

#[test]
fn list_of_ints() {
    let mut not_ok: Vec<Value> = empties().into_iter().filter(|v| !matches!(v, Value::List(_))).collect();
    not_ok.extend([
        list(vec![Value::None]),
        list(vec![s("1")]),
        list(vec![Value::float(1.0)]),
        i(1),
    ]);
    run_corpus(
        "foo_list_1",
        "Testing list.\n\nlist_int ([int]): a list of integers.\n\nreturn ([int]): list_int.\n",
        "list_int",
        &[
            list(vec![i(1)]),
            list(vec![i(1), i(2), i(3)]),
            list(vec![i(1); 5]),
            list(vec![]),
        ],
        &not_ok,
    );
}

#[test]
fn untyped_list() {
    let mut not_ok: Vec<Value> = empties().into_iter().filter(|v| !matches!(v, Value::List(_))).collect();
    not_ok.push(i(1));
    run_corpus(
        "foo_list_2",
        "Testing list.\n\nlist_ ([]): a list.\n\nreturn ([object]): list_ ([] and [object] are synonyms).\n",
        "list_",
        &[list(vec![i(1)]), list(vec![i(1), s("2"), Value::float(3.0)]), list(vec![])],
        &not_ok,
    );
}

#[test]
fn pair_of_ints() {
    let mut not_ok = empties();
    not_ok.extend([
        tuple(vec![i(1), Value::None]),
        tuple(vec![Value::None, i(1)]),
        tuple(vec![i(1)]),
        i(1),
        tuple(vec![i(1), i(1), i(1)]),
        tuple(vec![s("1"), i(1)]),
    ]);
    run_corpus(
        "foo_tuple_1",
        "Testing tuple.\n\ntuple_two_ints ((int, int)): a tuple of two integers.\n\n\
         return ((int, int)): tuple_two_ints.\n",
        "tuple_two_ints",
        &[tuple(vec![i(1), i(1)]), tuple(vec![i(-1), i(1_000_000_000)])],
        &not_ok,
    );
}

#[test]
fn int_and_str() {
    let mut not_ok = empties();
    not_ok.extend([
        tuple(vec![i(1), Value::None]),
        tuple(vec![Value::None, s("1")]),
        tuple(vec![i(1), i(1)]),
        tuple(vec![i(1)]),
        i(1),
        tuple(vec![i(1), s("1"), i(1)]),
        tuple(vec![s("1"), i(1)]),
        list(vec![i(1), s("1")]),
    ]);
    run_corpus(
        "foo_tuple_2",
        "Testing tuple.\n\ntuple_int_str ((int, str)): a tuple of integer and string.\n\n\
         return ((int, str)): tuple_int_str.\n",
        "tuple_int_str",
        &[tuple(vec![i(1), s("1")]), tuple(vec![i(-1), s("")])],
        &not_ok,
    );
}

#[test]
fn int_str_float_with_continuation_line() {
    let mut not_ok = empties();
    not_ok.extend([
        tuple(vec![i(1), Value::None, Value::float(1.0)]),
        tuple(vec![Value::None, s("1"), Value::float(1.0)]),
        tuple(vec![i(1), s("1"), Value::None]),
        tuple(vec![i(1), s("1"), i(1)]),
        tuple(vec![i(1), s("1")]),
        tuple(vec![i(1), s("1"), i(1), Value::float(1.0)]),
        list(vec![i(1), s("1"), Value::float(1.0)]),
    ]);
    run_corpus(
        "foo_tuple_3",
        "Testing tuple.\n\n\
         tuple_int_str_float ((int, str, float)): a tuple of integer,\n    \
         string, and float.\n\n\
         return ((int, str, float)): tuple_int_str_float.\n",
        "tuple_int_str_float",
        &[
            tuple(vec![i(1), s("1"), Value::float(1.0)]),
            tuple(vec![i(-1), s(""), Value::float(0.0)]),
        ],
        &not_ok,
    );
}

#[test]
fn any_dict() {
    run_corpus(
        "foo_dict_1",
        "Testing dict.\n\ndict_ ({}): a dictionary.\n\nreturn ({object: object}): dict_.\n",
        "dict_",
        &[
            dict(vec![]),
            dict(vec![(i(1), s("a"))]),
            dict(vec![(i(1), i(1)), (s("2"), i(2)), (i(2), s("2"))]),
        ],
        &[Value::None, list(vec![]), Value::set(vec![]), tuple(vec![])],
    );
}

#[test]
fn homogeneous_dict() {
    run_corpus(
        "foo_dict_2",
        "Testing dict.\n\ndict_ ({unicode: (int, string)}): a dictionary.\n\n\
         return ({unicode: (int, string)}): dict_.\n",
        "dict_",
        &[
            dict(vec![(s("a"), tuple(vec![i(1), s("b")]))]),
            dict(vec![
                (s("a"), tuple(vec![i(1), s("b")])),
                (s("b"), tuple(vec![i(-1), s("c")])),
            ]),
            dict(vec![]),
        ],
        &[
            Value::None,
            list(vec![]),
            Value::set(vec![]),
            tuple(vec![]),
            dict(vec![(i(1), tuple(vec![i(1), s("b")]))]),
            dict(vec![(s("a"), i(1))]),
            dict(vec![(s("a"), tuple(vec![i(1)]))]),
        ],
    );
}

#[test]
fn field_dict() {
    let pair = || tuple(vec![i(1), s("b")]);
    run_corpus(
        "foo_dict_3",
        "Testing dict.\n\ndict_ ({keya: (int, string), keyb: unicode}): a dictionary.\n\n\
         return ({keya: (int, string), keyb: unicode}): dict_.\n",
        "dict_",
        &[
            dict(vec![(s("keya"), pair()), (s("keyb"), s("b"))]),
            dict(vec![
                (s("keya"), pair()),
                (s("keyb"), s("b")),
                (s("b"), tuple(vec![i(-1), s("c")])),
            ]),
            dict(vec![
                (s("keya"), pair()),
                (s("keyb"), s("b")),
                (i(2), tuple(vec![i(-1), s("c")])),
            ]),
            dict(vec![(s("keya"), pair()), (s("keyb"), s("b")), (Value::None, Value::None)]),
        ],
        &[
            Value::None,
            list(vec![]),
            Value::set(vec![]),
            tuple(vec![]),
            dict(vec![(s("keya"), pair())]),
            dict(vec![(s("keyb"), s("b"))]),
            dict(vec![]),
        ],
    );
}

#[test]
fn union_with_null() {
    run_corpus(
        "foo_or_1",
        "Testing or.\n\nobj ([int]|int|None): some object\n\nreturn (None|[int]|int): obj.\n",
        "obj",
        &[Value::None, list(vec![]), list(vec![i(1), i(2)]), i(1)],
        &[
            dict(vec![]),
            Value::set(vec![]),
            tuple(vec![]),
            tuple(vec![i(1), i(2)]),
            s("1"),
        ],
    );
}

#[test]
fn nested_structure() {
    let small = dict(vec![(i(1), s("a")), (i(2), s("b"))]);
    run_corpus(
        "foo_complex_1",
        "Testing complex object.\n\nobj ([({int: str}, str)]): a complex object.\n\n\
         return ([({int: str}, str)]): obj.\n",
        "obj",
        &[
            list(vec![]),
            list(vec![tuple(vec![dict(vec![]), s("a")])]),
            list(vec![tuple(vec![small.clone(), s("a")])]),
            list(vec![
                tuple(vec![small, s("a")]),
                tuple(vec![dict(vec![]), s("b")]),
            ]),
        ],
        &[
            Value::None,
            dict(vec![]),
            Value::set(vec![]),
            tuple(vec![]),
            list(vec![tuple(vec![i(1), s("a")])]),
        ],
    );
}

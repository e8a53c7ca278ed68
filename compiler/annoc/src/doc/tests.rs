use pretty_assertions::assert_eq;

use super::*;

const FOO_DOC: &str = "foo

a (testb.modulea.ClassA): a ClassA.
b (int): a int.

return (testb.modulea.ClassA): a.
";

#[test]
fn finds_argument_types() {
    assert_eq!(extract_expected_type(FOO_DOC, "a"), Some("testb.modulea.ClassA"));
    assert_eq!(extract_expected_type(FOO_DOC, "b"), Some("int"));
    assert_eq!(extract_expected_type(FOO_DOC, "c"), None);
}

#[test]
fn finds_return_type() {
    assert_eq!(extract_return_type(FOO_DOC), Some("testb.modulea.ClassA"));
    let returns = "Summary.\n\nreturns ([int]): values.\n";
    assert_eq!(extract_return_type(returns), Some("[int]"));
}

#[test]
fn return_wins_over_returns() {
    let doc = "Summary.\n\nreturns (str): later.\nreturn (int): first.\n";
    assert_eq!(extract_return_type(doc), Some("int"));
}

#[test]
fn summary_line_is_not_searched() {
    let doc = "a (int): in the summary.\n\nb (str): in the body.\n";
    assert_eq!(extract_expected_type(doc, "a"), None);
    assert_eq!(extract_expected_type(doc, "b"), Some("str"));
    assert_eq!(extract_expected_type("a (int): no body", "a"), None);
}

#[test]
fn nested_and_colon_bearing_types() {
    let doc = "Testing.

    tuple_two_ints ((int, int)): a tuple of two integers.
    dict_ ({keya: (int, string), keyb: str}): a dictionary.
    obj ([({int: str}, str)]): a complex object.
    list_ ([]): a list ([] and [object] are synonyms).
";
    assert_eq!(extract_expected_type(doc, "tuple_two_ints"), Some("(int, int)"));
    assert_eq!(
        extract_expected_type(doc, "dict_"),
        Some("{keya: (int, string), keyb: str}")
    );
    assert_eq!(extract_expected_type(doc, "obj"), Some("[({int: str}, str)]"));
    assert_eq!(extract_expected_type(doc, "list_"), Some("[]"));
}

#[test]
fn name_must_be_followed_by_space_and_paren() {
    let doc = "Summary.\n\nab (int): other.\nb(int): no space.\na: no type.\n";
    assert_eq!(extract_expected_type(doc, "a"), None);
    assert_eq!(extract_expected_type(doc, "b"), None);
}

#[test]
fn unbalanced_declaration_is_skipped() {
    let doc = "Summary.\n\nx ([int): broken.\nx (str): fine.\n";
    assert_eq!(extract_expected_type(doc, "x"), Some("str"));
}

#[test]
fn later_declaration_wins() {
    let doc = "Summary.\n\nx (int): first.\n\nx ([int]): redeclared.\n";
    assert_eq!(extract_expected_type(doc, "x"), Some("[int]"));
}

#[test]
fn missing_colon_is_not_a_declaration() {
    let doc = "Summary.\n\nx (int) means nothing.\n";
    assert_eq!(extract_expected_type(doc, "x"), None);
}

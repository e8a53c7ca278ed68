use anno_value::{BuiltinType, ConcreteType};

use super::*;

fn named(name: &str, ty: ConcreteType) -> Matcher {
    Matcher::Named {
        name: name.into(),
        types: TypeSet::single(ty),
    }
}

#[test]
fn none_literal_detection() {
    assert!(named("None", ConcreteType::NONE).is_none_literal());
    assert!(!named("int", BuiltinType::Int.into()).is_none_literal());
    assert!(!Matcher::Any.is_none_literal());
    assert!(!Matcher::Union(vec![named("None", ConcreteType::NONE)]).is_none_literal());
}

#[test]
fn display_of_hand_built_matchers() {
    let int = named("int", BuiltinType::Int.into());
    let record = Matcher::DictFields(vec![Field {
        name: "only".into(),
        matcher: int.clone(),
    }]);
    assert_eq!(record.to_string(), "{only: int}");

    let set = Matcher::Set(Box::new(Matcher::Tuple(vec![int.clone(), Matcher::Any])));
    assert_eq!(set.to_string(), "<(int, )>");
    assert_eq!(Matcher::List(Box::new(Matcher::Any)).to_string(), "[]");
    assert!(Matcher::Any.is_any());
}

#[test]
fn unresolved_names_display_as_written() {
    let unknown = Matcher::Unresolved("Gizmo".into());
    assert!(unknown.is_any());
    assert!(!unknown.is_none_literal());
    assert_eq!(Matcher::List(Box::new(unknown.clone())).to_string(), "[Gizmo]");
    assert_eq!(
        Matcher::Union(vec![unknown, named("int", BuiltinType::Int.into())]).to_string(),
        "Gizmo|int"
    );
}

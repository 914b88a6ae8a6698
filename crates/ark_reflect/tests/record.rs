use core::any::Any;

use ark_reflect::derive::Record;
use ark_reflect::info::{TypeKind, Typed};

#[derive(Record, Default, Clone, Debug, PartialEq)]
#[record(default, clone)]
struct Node {
    value: u8,
    next: Option<Box<Node>>,
}

#[derive(Record, Default)]
#[record(default)]
struct Wrapper<T> {
    inner: T,
    r#type: u16,
}

#[derive(Record)]
struct Marker;

#[test]
fn recursive_record() {
    let info = Node::type_info().as_struct().unwrap();
    let next = info.field("next").unwrap();
    assert!(next.type_is::<Option<Box<Node>>>());

    let optional = next.type_info().as_optional().unwrap();
    let boxed = optional.inner_info().as_boxed().unwrap();
    assert!(boxed.inner().is::<Node>());
}

#[test]
fn field_access_through_any() {
    let info = Node::type_info().as_struct().unwrap();
    let value = info.field("value").unwrap();

    let mut node = Node::default();
    *value
        .get_mut(&mut node)
        .unwrap()
        .downcast_mut::<u8>()
        .unwrap() = 4;
    assert_eq!(node.value, 4);

    // Another record is not an owner of this field.
    let other = 0_u32;
    assert!(value.get(&other as &dyn Any).is_none());
}

#[test]
fn declared_capabilities() {
    let fresh = Node::type_info().construct().unwrap();
    assert_eq!(fresh.downcast_ref::<Node>(), Some(&Node::default()));

    let node = Node {
        value: 1,
        next: Some(Box::new(Node::default())),
    };
    let copy = Node::type_info().clone_value(&node).unwrap();
    assert_eq!(copy.downcast_ref::<Node>(), Some(&node));

    assert!(Marker::type_info().construct().is_none());
    assert!(matches!(Marker::type_info().kind(), TypeKind::Struct(_)));
}

#[test]
fn generic_record() {
    let a = <Wrapper<u8>>::type_info();
    let b = <Wrapper<String>>::type_info();
    assert!(a.type_is::<Wrapper<u8>>());
    assert!(b.type_is::<Wrapper<String>>());

    let fields = b.as_struct().unwrap();
    assert!(fields.field("inner").unwrap().type_is::<String>());
    // Raw identifiers are named without their prefix.
    assert!(fields.field("type").unwrap().type_is::<u16>());
}

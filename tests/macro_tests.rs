use serde_yaml_emit::resolver::tags;
use serde_yaml_emit::{node, node_to_string, Node, NodeKind, NodeValue};

#[test]
fn test_node_macro_null() {
    let value = node!(null);
    assert_eq!(value.tag(), tags::NULL);
    assert_eq!(value.as_str(), Some("null"));
}

#[test]
fn test_node_macro_booleans() {
    assert_eq!(node!(true).as_str(), Some("true"));
    assert_eq!(node!(false).as_str(), Some("false"));
    assert_eq!(node!(false).tag(), tags::BOOL);
}

#[test]
fn test_node_macro_numbers() {
    let int_val = node!(42);
    assert_eq!(int_val.tag(), tags::INT);
    assert_eq!(int_val.as_str(), Some("42"));

    let float_val = node!(3.5);
    assert_eq!(float_val.tag(), tags::FLOAT);
    assert_eq!(float_val.as_str(), Some("3.5"));

    let negative_val = node!(-123);
    assert_eq!(negative_val.as_str(), Some("-123"));
}

#[test]
fn test_node_macro_strings() {
    let string_val = node!("hello world");
    assert_eq!(string_val.tag(), tags::STR);
    assert_eq!(string_val.as_str(), Some("hello world"));

    assert_eq!(node!("").as_str(), Some(""));
}

#[test]
fn test_node_macro_arrays() {
    let empty_array = node!([]);
    assert_eq!(empty_array.kind(), NodeKind::Sequence);
    assert_eq!(empty_array.items().map(<[_]>::len), Some(0));

    let number_array = node!([1, 2, (-3)]);
    let texts: Vec<_> = number_array
        .items()
        .unwrap()
        .iter()
        .filter_map(Node::as_str)
        .collect();
    assert_eq!(texts, vec!["1", "2", "-3"]);

    let mixed = node!([1, "two", true, null]);
    let tags_seen: Vec<_> = mixed.items().unwrap().iter().map(Node::tag).collect();
    assert_eq!(tags_seen, vec![tags::INT, tags::STR, tags::BOOL, tags::NULL]);
}

#[test]
fn test_node_macro_objects() {
    let empty = node!({});
    assert_eq!(empty.entries().map(<[_]>::len), Some(0));

    let obj = node!({
        "name": "Alice",
        "age": 30,
        "active": true
    });
    assert_eq!(obj.get("name").and_then(Node::as_str), Some("Alice"));
    assert_eq!(obj.get("age").and_then(Node::as_str), Some("30"));
    assert!(obj.get("missing").is_none());

    let keys: Vec<_> = obj
        .entries()
        .unwrap()
        .iter()
        .filter_map(|(k, _)| k.as_str())
        .collect();
    assert_eq!(keys, vec!["name", "age", "active"]);
}

#[test]
fn test_node_macro_nested() {
    let data = node!({
        "user": {
            "name": "Bob",
            "roles": ["admin", "dev"]
        },
        "count": 2
    });

    let roles = data.get("user").and_then(|u| u.get("roles")).unwrap();
    assert!(matches!(roles.value(), NodeValue::Sequence { items, .. } if items.len() == 2));
    assert_eq!(
        node_to_string(&data).unwrap(),
        "user:\n  name: Bob\n  roles:\n    - admin\n    - dev\ncount: 2\n"
    );
}

#[test]
fn test_node_macro_trailing_commas() {
    let arr = node!([1, 2,]);
    assert_eq!(arr.items().unwrap().len(), 2);

    let obj = node!({"a": 1,});
    assert_eq!(obj.entries().unwrap().len(), 1);
}

#[test]
fn test_node_macro_with_expressions() {
    let name = String::from("dynamic");
    let doc = node!({"name": name, "size": (2 * 21)});
    assert_eq!(node_to_string(&doc).unwrap(), "name: dynamic\nsize: 42\n");
}

#[test]
fn test_node_macro_shared_node_is_aliased() {
    let base = node!({"retries": 3});
    let doc = node!({"dev": (base.clone()), "prod": base});
    assert_eq!(
        node_to_string(&doc).unwrap(),
        "dev: &id1\n  retries: 3\nprod: *id1\n"
    );
}

use serde::Serialize;
use serde_yaml_emit::{
    emit_events, node, node_to_string, node_to_string_with_options, to_string,
    to_string_with_comments, to_string_with_options, CommentStore, EmitterOptions, Error, Event,
    FlowStyle, LineBreak, Node, ScalarStyle, Serializer, Version,
};
use std::collections::BTreeMap;

#[derive(Serialize, Debug, PartialEq)]
struct User {
    id: u32,
    name: String,
    active: bool,
    tags: Vec<String>,
}

#[derive(Serialize, Debug, PartialEq)]
struct Product {
    sku: String,
    price: f64,
    quantity: u32,
}

#[derive(Serialize, Debug, PartialEq)]
struct Order {
    order_id: u32,
    customer: User,
    items: Vec<Product>,
    note: Option<String>,
}

#[test]
fn test_simple_struct() {
    let user = User {
        id: 123,
        name: "Alice".to_string(),
        active: true,
        tags: vec!["admin".to_string(), "developer".to_string()],
    };

    let yaml = to_string(&user).unwrap();
    assert_eq!(
        yaml,
        "id: 123\nname: Alice\nactive: true\ntags:\n  - admin\n  - developer\n"
    );
}

#[test]
fn test_nested_struct() {
    let order = Order {
        order_id: 12345,
        customer: User {
            id: 123,
            name: "Alice".to_string(),
            active: true,
            tags: vec!["vip".to_string()],
        },
        items: vec![
            Product {
                sku: "WIDGET-001".to_string(),
                price: 29.99,
                quantity: 2,
            },
            Product {
                sku: "GADGET-002".to_string(),
                price: 5.0,
                quantity: 1,
            },
        ],
        note: None,
    };

    let yaml = to_string(&order).unwrap();
    assert_eq!(
        yaml,
        "order_id: 12345\n\
         customer:\n  id: 123\n  name: Alice\n  active: true\n  tags:\n    - vip\n\
         items:\n  - sku: WIDGET-001\n    price: 29.99\n    quantity: 2\n\
         \x20 - sku: GADGET-002\n    price: 5.0\n    quantity: 1\n\
         note: null\n"
    );
}

#[test]
fn test_mapping_with_plain_text_and_sequence() {
    let doc = node!({"a": "plain text", "b": ["x", "y"]});
    assert_eq!(
        node_to_string(&doc).unwrap(),
        "a: plain text\nb:\n  - x\n  - y\n"
    );
}

#[test]
fn test_indentless_sequences_option() {
    let doc = node!({"b": ["x", "y"]});
    let options = EmitterOptions::new().with_indentless_sequences(true);
    assert_eq!(
        node_to_string_with_options(&doc, options).unwrap(),
        "b:\n- x\n- y\n"
    );
}

#[test]
fn test_literal_scalar() {
    let text = Node::from("line1\nline2\n").with_style(ScalarStyle::Literal);
    assert_eq!(node_to_string(&text).unwrap(), "|\n  line1\n  line2\n");

    let stripped = Node::from("line1\nline2").with_style(ScalarStyle::Literal);
    assert_eq!(node_to_string(&stripped).unwrap(), "|-\n  line1\n  line2\n");
}

#[test]
fn test_literal_value_in_mapping() {
    let doc = Node::map(vec![(
        Node::from("script"),
        Node::from("echo hi\nexit 0\n").with_style(ScalarStyle::Literal),
    )]);
    assert_eq!(
        node_to_string(&doc).unwrap(),
        "script: |\n  echo hi\n  exit 0\n"
    );
}

#[test]
fn test_non_breaking_space_uses_short_escape() {
    let text = Node::from("a\u{a0}b").with_style(ScalarStyle::DoubleQuoted);
    assert_eq!(node_to_string(&text).unwrap(), "\"a\\_b\"\n");
}

const LONG_TEXT: &str = "alpha beta gamma delta epsilon zeta eta theta";

fn emit_narrow(value: Node) -> String {
    let doc = Node::map(vec![(Node::from("k"), value)]);
    node_to_string_with_options(&doc, EmitterOptions::new().with_width(20)).unwrap()
}

#[test]
fn test_double_quoted_wraps_at_width() {
    let value = Node::from(LONG_TEXT).with_style(ScalarStyle::DoubleQuoted);
    assert_eq!(
        emit_narrow(value),
        "k: \"alpha beta gamma delta\\\n  \\ epsilon zeta eta theta\"\n"
    );
}

#[test]
fn test_single_quoted_wraps_at_width() {
    let value = Node::from(LONG_TEXT).with_style(ScalarStyle::SingleQuoted);
    assert_eq!(
        emit_narrow(value),
        "k: 'alpha beta gamma delta\n  epsilon zeta eta theta'\n"
    );
}

#[test]
fn test_folded_wraps_at_width() {
    let value = Node::from(LONG_TEXT).with_style(ScalarStyle::Folded);
    assert_eq!(
        emit_narrow(value),
        "k: >-\n  alpha beta gamma delta\n  epsilon zeta eta theta\n"
    );
}

#[test]
fn test_pretty_flow_breaks_items() {
    let items = Node::seq(vec![Node::from("a"), Node::from("b")]).with_flow_style(FlowStyle::Flow);
    let doc = Node::map(vec![(Node::from("k"), items)]);
    let options = EmitterOptions::pretty_flow().with_width(20);
    assert_eq!(
        node_to_string_with_options(&doc, options).unwrap(),
        "k: [\n  a,\n  b\n]\n"
    );
}

#[test]
fn test_leading_space_is_never_plain() {
    assert_eq!(node_to_string(&Node::from(" x")).unwrap(), "' x'\n");
    let doc = node!({"k": " x"});
    assert_eq!(node_to_string(&doc).unwrap(), "k: ' x'\n");
}

#[test]
fn test_strings_that_would_change_type_are_quoted() {
    let doc = node!({
        "a": "123",
        "b": "true",
        "c": "~",
        "d": "",
        "e": "#hash",
        "f": "key: value"
    });
    assert_eq!(
        node_to_string(&doc).unwrap(),
        "a: '123'\nb: 'true'\nc: '~'\nd: ''\ne: '#hash'\nf: 'key: value'\n"
    );
}

#[test]
fn test_shared_sequence_anchor_and_alias() {
    let shared = node!(["x", "y"]);
    let doc = Node::map(vec![
        (Node::from("first"), shared.clone()),
        (Node::from("second"), shared),
    ]);

    let yaml = node_to_string(&doc).unwrap();
    assert_eq!(yaml, "first: &id1\n  - x\n  - y\nsecond: *id1\n");
    assert_eq!(yaml.matches("- x").count(), 1);
}

#[test]
fn test_value_equal_nodes_are_not_merged() {
    let doc = node!({"first": ["x"], "second": ["x"]});
    assert_eq!(
        node_to_string(&doc).unwrap(),
        "first:\n  - x\nsecond:\n  - x\n"
    );
}

#[test]
fn test_caller_anchor_is_kept() {
    let shared = Node::from("value").with_anchor("base");
    let doc = Node::seq(vec![shared.clone(), shared]);
    assert_eq!(node_to_string(&doc).unwrap(), "- &base value\n- *base\n");
}

#[test]
fn test_empty_collections_are_flow() {
    let doc = node!({"list": [], "map": {}});
    assert_eq!(node_to_string(&doc).unwrap(), "list: []\nmap: {}\n");

    let doc = Node::map(vec![(Node::from("a"), Node::seq(vec![]))]);
    assert_eq!(
        node_to_string_with_options(&doc, EmitterOptions::canonical()).unwrap(),
        "---\n!!map {\n  ? !!str \"a\"\n  : !!seq [],\n}\n"
    );
}

#[test]
fn test_flow_collections() {
    let seq = Node::seq(vec![Node::from("a"), Node::from(1)]).with_flow_style(FlowStyle::Flow);
    let doc = Node::map(vec![(Node::from("seq"), seq)]);
    assert_eq!(node_to_string(&doc).unwrap(), "seq: [a, 1]\n");

    let map = node!({"x": 1, "y": 2}).with_flow_style(FlowStyle::Flow);
    assert_eq!(node_to_string(&map).unwrap(), "{x: 1, y: 2}\n");
}

#[test]
fn test_explicit_markers_and_version() {
    let options = EmitterOptions::new()
        .with_explicit_start(true)
        .with_explicit_end(true)
        .with_version(Version::V1_1);
    assert_eq!(
        node_to_string_with_options(&node!({"a": 1}), options).unwrap(),
        "%YAML 1.1\n---\na: 1\n...\n"
    );
}

#[test]
fn test_windows_line_breaks() {
    let options = EmitterOptions::new().with_line_break(LineBreak::Windows);
    assert_eq!(
        node_to_string_with_options(&node!({"a": [1, 2]}), options).unwrap(),
        "a:\r\n  - 1\r\n  - 2\r\n"
    );
}

#[test]
fn test_custom_indent() {
    let options = EmitterOptions::new().with_indent(4);
    assert_eq!(
        node_to_string_with_options(&node!({"a": {"b": 1}}), options).unwrap(),
        "a:\n    b: 1\n"
    );
}

#[test]
fn test_comment_is_written_once_per_path() {
    let mut comments = CommentStore::new();
    comments.insert_dotted("k", "note");

    let doc = node!([{"k": 1}, {"k": 2}]);
    assert_eq!(
        emit_with_comments(&doc, comments),
        "-\n  # note\n  k: 1\n- k: 2\n"
    );
}

#[test]
fn test_comment_not_repeated_through_alias() {
    let mut comments = CommentStore::new();
    comments.insert_dotted("k", "note");

    let shared = node!({"k": 1});
    let doc = Node::seq(vec![shared.clone(), shared]);

    let yaml = emit_with_comments(&doc, comments);
    assert_eq!(yaml, "- &id1\n  # note\n  k: 1\n- *id1\n");
    assert_eq!(yaml.matches("# note").count(), 1);
}

#[test]
fn test_comment_kept_on_aliased_key() {
    let mut comments = CommentStore::new();
    comments.insert_dotted("o.k", "note");

    let key = Node::from("k");
    let doc = Node::map(vec![
        (key.clone(), node!({"z": 1})),
        (Node::from("o"), Node::map(vec![(key, Node::from("v"))])),
    ]);
    assert_eq!(
        emit_with_comments(&doc, comments),
        "&id1 k:\n  z: 1\no:\n  # note\n  *id1: v\n"
    );
}

#[test]
fn test_long_comment_border() {
    let mut comments = CommentStore::new();
    comments.insert_dotted("name", "abc\nhello");

    let mut map = BTreeMap::new();
    map.insert("name", "demo");

    let options = EmitterOptions::new().with_long_comments(2, "=");
    assert_eq!(
        to_string_with_comments(&map, &comments, options).unwrap(),
        "#======\n# abc\n# hello\n#======\nname: demo\n"
    );

    let options = EmitterOptions::new()
        .with_long_comments(2, "=")
        .with_long_comment_right_border("#");
    assert_eq!(
        to_string_with_comments(&map, &comments, options).unwrap(),
        "#========\n# abc   #\n# hello #\n#========\nname: demo\n"
    );
}

#[test]
fn test_nested_comment_is_indented() {
    let mut comments = CommentStore::new();
    comments.insert_dotted("db.port", "Default port");

    let config = node!({"db": {"host": "localhost", "port": 5432}});
    assert_eq!(
        emit_with_comments(&config, comments),
        "db:\n  host: localhost\n  # Default port\n  port: 5432\n"
    );
}

#[test]
fn test_enum_variants() {
    #[derive(Serialize)]
    enum Shape {
        Circle { r: f64 },
        Square(u32),
        Empty,
    }

    let shapes = vec![Shape::Circle { r: 1.5 }, Shape::Square(2), Shape::Empty];
    assert_eq!(
        to_string(&shapes).unwrap(),
        "- Circle:\n    r: 1.5\n- Square: 2\n- Empty\n"
    );
}

#[test]
fn test_json_value_keeps_order() {
    let value = serde_json::json!({"z": 1, "a": [true, null], "m": 1.5});
    assert_eq!(
        to_string(&value).unwrap(),
        "z: 1\na:\n  - true\n  - null\nm: 1.5\n"
    );
}

#[test]
fn test_special_floats() {
    let values = vec![f64::INFINITY, f64::NEG_INFINITY, f64::NAN, 2.0];
    assert_eq!(
        to_string(&values).unwrap(),
        "- .inf\n- -.inf\n- .NaN\n- 2.0\n"
    );
}

#[test]
fn test_options_through_serde() {
    let options = EmitterOptions::new().with_explicit_start(true);
    assert_eq!(
        to_string_with_options(&vec!["a"], options).unwrap(),
        "---\n- a\n"
    );
}

#[test]
fn test_invalid_anchor_is_format_error() {
    let node = Node::from("x").with_anchor("bad anchor");
    let err = node_to_string(&node).unwrap_err();
    assert!(matches!(err, Error::Format(_)));
}

#[test]
fn test_serializer_lifecycle_errors() {
    let mut serializer = Serializer::new(Vec::new(), EmitterOptions::new());
    assert!(matches!(
        serializer.serialize(&Node::from("x")),
        Err(Error::ProtocolState(_))
    ));
    serializer.open().unwrap();
    serializer.close().unwrap();
    assert!(matches!(serializer.close(), Err(Error::ProtocolState(_))));
    assert!(matches!(serializer.open(), Err(Error::ProtocolState(_))));
}

#[test]
fn test_protocol_violation_from_raw_events() {
    let events = vec![
        Event::StreamStart,
        Event::document_start(),
        Event::MappingEnd,
    ];
    let err = emit_events(events, EmitterOptions::new()).unwrap_err();
    assert!(matches!(err, Error::ProtocolViolation { .. }));
}

#[test]
fn test_multiple_documents() {
    let mut serializer = Serializer::new(Vec::new(), EmitterOptions::new());
    serializer.open().unwrap();
    serializer.serialize(&node!({"a": 1})).unwrap();
    serializer.serialize(&node!({"b": 2})).unwrap();
    serializer.close().unwrap();
    assert_eq!(
        String::from_utf8(serializer.into_inner()).unwrap(),
        "a: 1\n---\nb: 2\n"
    );
}

fn emit_with_comments(node: &Node, comments: CommentStore) -> String {
    let mut serializer = Serializer::new(Vec::new(), EmitterOptions::new()).with_comments(comments);
    serializer.open().unwrap();
    serializer.serialize(node).unwrap();
    serializer.close().unwrap();
    String::from_utf8(serializer.into_inner()).unwrap()
}

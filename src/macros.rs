/// Builds a [`Node`](crate::Node) tree from literal syntax.
///
/// Mapping keys are literals. Any other expression is converted with `Node::from`, so an
/// existing node can be dropped in (clone it to share it).
///
/// # Examples
///
/// ```rust
/// use serde_yaml_emit::{node, node_to_string};
///
/// let shared = node!(["x", "y"]);
/// let doc = node!({
///     "name": "demo",
///     "enabled": true,
///     "first": (shared.clone()),
///     "second": shared
/// });
/// assert_eq!(
///     node_to_string(&doc).unwrap(),
///     "name: demo\nenabled: true\nfirst: &id1\n  - x\n  - y\nsecond: *id1\n"
/// );
/// ```
#[macro_export]
macro_rules! node {
    (null) => {
        $crate::Node::null()
    };

    ([]) => {
        $crate::Node::seq(::std::vec::Vec::new())
    };

    ([ $($elem:tt),* $(,)? ]) => {
        $crate::Node::seq(::std::vec![$($crate::node!($elem)),*])
    };

    ({}) => {
        $crate::Node::map(::std::vec::Vec::new())
    };

    ({ $($key:literal : $value:tt),* $(,)? }) => {
        $crate::Node::map(::std::vec![$(($crate::Node::from($key), $crate::node!($value))),*])
    };

    ($other:expr) => {
        $crate::Node::from($other)
    };
}

#[cfg(test)]
mod tests {
    use crate::resolver::tags;
    use crate::NodeKind;

    #[test]
    fn test_node_macro_scalars() {
        assert_eq!(node!(null).tag(), tags::NULL);
        assert_eq!(node!(true).tag(), tags::BOOL);
        assert_eq!(node!(42).as_str(), Some("42"));
        assert_eq!(node!(3.5).as_str(), Some("3.5"));
        assert_eq!(node!("hello").tag(), tags::STR);
    }

    #[test]
    fn test_node_macro_collections() {
        assert_eq!(node!([]).items().map(<[_]>::len), Some(0));
        assert_eq!(node!({}).kind(), NodeKind::Mapping);

        let nested = node!({"a": [1, 2, {"b": null}]});
        let a = nested.get("a").unwrap();
        assert_eq!(a.items().unwrap().len(), 3);
        assert!(a.items().unwrap()[2].get("b").is_some());
    }

    #[test]
    fn test_node_macro_shares_identity() {
        let shared = node!("s");
        let doc = node!([(shared.clone()), shared]);
        let items = doc.items().unwrap();
        assert!(items[0].is_same(&items[1]));
    }
}

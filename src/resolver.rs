//! Tag resolution.
//!
//! The serializer asks a [`Resolver`] which tag a value would receive if its tag were
//! left off. When the answer matches the node's real tag the tag is implicit and the
//! emitter may omit it.
//!
//! [`DefaultResolver`] follows the YAML 1.1 implicit typing rules: `yes`/`no`/`on`/`off`
//! are booleans, `0x1F` and `1:30` are integers, `~` and the empty string are null, and
//! so on.

use crate::node::NodeKind;
use regex::Regex;
use std::borrow::Cow;
use std::sync::OnceLock;

/// Standard tag URIs.
pub mod tags {
    pub const STR: &str = "tag:yaml.org,2002:str";
    pub const INT: &str = "tag:yaml.org,2002:int";
    pub const FLOAT: &str = "tag:yaml.org,2002:float";
    pub const BOOL: &str = "tag:yaml.org,2002:bool";
    pub const NULL: &str = "tag:yaml.org,2002:null";
    pub const TIMESTAMP: &str = "tag:yaml.org,2002:timestamp";
    pub const BINARY: &str = "tag:yaml.org,2002:binary";
    pub const MERGE: &str = "tag:yaml.org,2002:merge";
    pub const VALUE: &str = "tag:yaml.org,2002:value";
    pub const YAML: &str = "tag:yaml.org,2002:yaml";
    pub const SEQ: &str = "tag:yaml.org,2002:seq";
    pub const MAP: &str = "tag:yaml.org,2002:map";
}

/// Maps a node kind and text to the tag it would be given implicitly.
///
/// # Examples
///
/// ```rust
/// use serde_yaml_emit::{DefaultResolver, NodeKind, Resolver};
///
/// let resolver = DefaultResolver;
/// assert_eq!(resolver.resolve(NodeKind::Scalar, "42", true), "tag:yaml.org,2002:int");
/// assert_eq!(resolver.resolve(NodeKind::Scalar, "42", false), "tag:yaml.org,2002:str");
/// assert_eq!(resolver.resolve(NodeKind::Mapping, "", true), "tag:yaml.org,2002:map");
/// ```
pub trait Resolver {
    /// `implicit` is `true` when the text would be written plain, `false` when it would
    /// be quoted.
    fn resolve(&self, kind: NodeKind, value: &str, implicit: bool) -> Cow<'static, str>;
}

/// YAML 1.1 implicit typing.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultResolver;

struct ImplicitRule {
    tag: &'static str,
    /// Characters a value must start with for the rule to apply. Empty applies to all.
    first: &'static str,
    pattern: Regex,
}

impl ImplicitRule {
    fn applies_to(&self, first: char) -> bool {
        self.first.is_empty() || self.first.contains(first)
    }
}

fn rule(tag: &'static str, pattern: &str, first: &'static str) -> ImplicitRule {
    ImplicitRule {
        tag,
        first,
        pattern: Regex::new(pattern).expect("implicit typing pattern is valid"),
    }
}

fn implicit_rules() -> &'static [ImplicitRule] {
    static RULES: OnceLock<Vec<ImplicitRule>> = OnceLock::new();
    RULES.get_or_init(|| {
        vec![
            rule(
                tags::BOOL,
                r"^(?:yes|Yes|YES|no|No|NO|true|True|TRUE|false|False|FALSE|on|On|ON|off|Off|OFF)$",
                "yYnNtTfFoO",
            ),
            rule(
                tags::INT,
                r"^(?:[-+]?0b[0-1_]+|[-+]?0[0-7_]+|[-+]?(?:0|[1-9][0-9_]*)|[-+]?0x[0-9a-fA-F_]+|[-+]?[1-9][0-9_]*(?::[0-5]?[0-9])+)$",
                "-+0123456789",
            ),
            rule(
                tags::FLOAT,
                r"^(?:[-+]?(?:\.[0-9]+|[0-9_]+(?:\.[0-9_]*)?)(?:[eE][-+]?[0-9]+)?|[-+]?[0-9][0-9_]*(?::[0-5]?[0-9])+\.[0-9_]*|[-+]?\.(?:inf|Inf|INF)|\.(?:nan|NaN|NAN))$",
                "-+0123456789.",
            ),
            rule(tags::MERGE, r"^(?:<<)$", "<"),
            rule(tags::NULL, r"^(?:~|null|Null|NULL| )$", "~nN\0"),
            rule(tags::NULL, r"^$", ""),
            rule(
                tags::TIMESTAMP,
                r"^(?:[0-9][0-9][0-9][0-9]-[0-9][0-9]-[0-9][0-9]|[0-9][0-9][0-9][0-9]-[0-9][0-9]?-[0-9][0-9]?(?:[Tt]|[ \t]+)[0-9][0-9]?:[0-9][0-9]:[0-9][0-9](?:\.[0-9]*)?(?:[ \t]*(?:Z|[-+][0-9][0-9]?(?::[0-9][0-9])?))?)$",
                "0123456789",
            ),
            rule(tags::VALUE, r"^(?:=)$", "="),
            rule(tags::YAML, r"^(?:!|&|\*)$", "!&*"),
        ]
    })
}

impl Resolver for DefaultResolver {
    fn resolve(&self, kind: NodeKind, value: &str, implicit: bool) -> Cow<'static, str> {
        match kind {
            NodeKind::Scalar => {
                if implicit {
                    let first = value.chars().next().unwrap_or('\0');
                    if let Some(rule) = implicit_rules()
                        .iter()
                        .find(|r| r.applies_to(first) && r.pattern.is_match(value))
                    {
                        return Cow::Borrowed(rule.tag);
                    }
                }
                Cow::Borrowed(tags::STR)
            }
            NodeKind::Sequence => Cow::Borrowed(tags::SEQ),
            NodeKind::Mapping => Cow::Borrowed(tags::MAP),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scalar(value: &str) -> Cow<'static, str> {
        DefaultResolver.resolve(NodeKind::Scalar, value, true)
    }

    #[test]
    fn test_yaml_1_1_booleans() {
        for text in ["yes", "No", "ON", "off", "true", "FALSE"] {
            assert_eq!(scalar(text), tags::BOOL, "{text}");
        }
        assert_eq!(scalar("yEs"), tags::STR);
    }

    #[test]
    fn test_numbers() {
        assert_eq!(scalar("42"), tags::INT);
        assert_eq!(scalar("-0x1F"), tags::INT);
        assert_eq!(scalar("0b101"), tags::INT);
        assert_eq!(scalar("1:30"), tags::INT);
        assert_eq!(scalar("1.5"), tags::FLOAT);
        assert_eq!(scalar("1e10"), tags::FLOAT);
        assert_eq!(scalar(".inf"), tags::FLOAT);
        assert_eq!(scalar(".NaN"), tags::FLOAT);
        assert_eq!(scalar("1.2.3"), tags::STR);
    }

    #[test]
    fn test_null_forms() {
        assert_eq!(scalar("~"), tags::NULL);
        assert_eq!(scalar("null"), tags::NULL);
        assert_eq!(scalar(""), tags::NULL);
        assert_eq!(scalar("nil"), tags::STR);
    }

    #[test]
    fn test_timestamps_and_specials() {
        assert_eq!(scalar("2024-01-15"), tags::TIMESTAMP);
        assert_eq!(scalar("2024-01-15T10:30:00Z"), tags::TIMESTAMP);
        assert_eq!(scalar("<<"), tags::MERGE);
        assert_eq!(scalar("="), tags::VALUE);
    }

    #[test]
    fn test_non_implicit_is_always_str() {
        assert_eq!(DefaultResolver.resolve(NodeKind::Scalar, "42", false), tags::STR);
        assert_eq!(DefaultResolver.resolve(NodeKind::Sequence, "", true), tags::SEQ);
    }
}

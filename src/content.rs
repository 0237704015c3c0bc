use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Node kinds whose text carries structural or semantic meaning and must
/// survive translation verbatim: code tokens, preformatted blocks, link
/// targets, image sources.
pub const PROTECTED_KINDS: &[&str] = &["code", "pre", "a", "img"];

/// Returns true if elements of this kind must never have their text altered.
pub fn kind_is_protected(kind: &str) -> bool {
    PROTECTED_KINDS.contains(&kind)
}

/// A renderable content tree.
///
/// Translation preserves shape: the translated tree has the same node
/// kinds, attributes and child counts at every position, and only `Text`
/// payloads may differ.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentNode {
    /// An atomic translatable string.
    Text { text: String },
    /// An order-preserving container of child nodes.
    Sequence { items: Vec<ContentNode> },
    /// A tagged node. Its `kind` decides whether children are eligible
    /// for translation; see [`kind_is_protected`].
    Element {
        kind: String,
        #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
        attributes: BTreeMap<String, String>,
        #[serde(default)]
        children: Vec<ContentNode>,
    },
    /// A verbatim payload that passes through translation untouched.
    Opaque { raw: String },
}

impl ContentNode {
    pub fn text(text: impl Into<String>) -> Self {
        ContentNode::Text { text: text.into() }
    }

    pub fn sequence(items: Vec<ContentNode>) -> Self {
        ContentNode::Sequence { items }
    }

    pub fn element(kind: impl Into<String>, children: Vec<ContentNode>) -> Self {
        ContentNode::Element {
            kind: kind.into(),
            attributes: BTreeMap::new(),
            children,
        }
    }

    pub fn element_with_attributes(
        kind: impl Into<String>,
        attributes: BTreeMap<String, String>,
        children: Vec<ContentNode>,
    ) -> Self {
        ContentNode::Element {
            kind: kind.into(),
            attributes,
            children,
        }
    }

    pub fn opaque(raw: impl Into<String>) -> Self {
        ContentNode::Opaque { raw: raw.into() }
    }

    /// Structural equality ignoring `Text` payloads: same kinds, same
    /// attributes, same child counts at every position.
    pub fn same_shape(&self, other: &ContentNode) -> bool {
        match (self, other) {
            (ContentNode::Text { .. }, ContentNode::Text { .. }) => true,
            (ContentNode::Sequence { items: a }, ContentNode::Sequence { items: b }) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.same_shape(y))
            }
            (
                ContentNode::Element {
                    kind: ka,
                    attributes: aa,
                    children: ca,
                },
                ContentNode::Element {
                    kind: kb,
                    attributes: ab,
                    children: cb,
                },
            ) => {
                ka == kb
                    && aa == ab
                    && ca.len() == cb.len()
                    && ca.iter().zip(cb).all(|(x, y)| x.same_shape(y))
            }
            (ContentNode::Opaque { raw: a }, ContentNode::Opaque { raw: b }) => a == b,
            _ => false,
        }
    }

    /// Collects every translatable leaf string in document order.
    pub fn text_leaves(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_text_leaves(&mut out);
        out
    }

    fn collect_text_leaves<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            ContentNode::Text { text } => out.push(text),
            ContentNode::Sequence { items } => {
                for item in items {
                    item.collect_text_leaves(out);
                }
            }
            ContentNode::Element { children, .. } => {
                for child in children {
                    child.collect_text_leaves(out);
                }
            }
            ContentNode::Opaque { .. } => {}
        }
    }
}

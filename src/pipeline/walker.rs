//! Content tree translation
//!
//! Recursive walk over a [`ContentNode`] tree, translating text leaves
//! while preserving structure. Sibling subtrees resolve concurrently, but
//! the output is always joined back into structural position, so the
//! translated tree keeps the original order regardless of which network
//! round trip finishes first.

use crate::content::{ContentNode, kind_is_protected};
use crate::language::Language;
use crate::pipeline::service::TranslationService;
use futures::FutureExt;
use futures::future::{BoxFuture, join_all};

impl TranslationService {
    /// Produce a translated copy of `node`. Total: leaf failures degrade
    /// inside [`TranslationService::translate`] and never abort siblings;
    /// worst case the returned tree equals the input.
    ///
    /// For the source language this is an instant structural clone with no
    /// backend traffic, which is what makes switching back to English free.
    pub fn translate_tree<'a>(
        &'a self,
        node: &'a ContentNode,
        target: Language,
    ) -> BoxFuture<'a, ContentNode> {
        async move {
            if target.is_source() {
                return node.clone();
            }

            match node {
                ContentNode::Text { text } => {
                    if text.trim().is_empty() {
                        node.clone()
                    } else {
                        ContentNode::Text {
                            text: self.translate(text, target).await,
                        }
                    }
                }
                ContentNode::Sequence { items } => {
                    let translated =
                        join_all(items.iter().map(|item| self.translate_tree(item, target))).await;
                    ContentNode::Sequence { items: translated }
                }
                ContentNode::Element { kind, .. } if kind_is_protected(kind) => node.clone(),
                ContentNode::Element {
                    kind,
                    attributes,
                    children,
                } => {
                    let translated =
                        join_all(children.iter().map(|c| self.translate_tree(c, target))).await;
                    ContentNode::Element {
                        kind: kind.clone(),
                        attributes: attributes.clone(),
                        children: translated,
                    }
                }
                ContentNode::Opaque { .. } => node.clone(),
            }
        }
        .boxed()
    }
}

//! Descendant-selector chains
//!
//! A chain is built from the target element outwards and emitted outermost
//! first. A stable id ends the walk: `#id` is treated as sufficient on its
//! own. Ancestors without a usable class are skipped.

use crate::dom::{DomTree, NodeId};
use crate::predicates::{Predicates, is_dynamic_id};

/// Tags emitted as bare class tokens when they appear as ancestors
const GENERIC_TAGS: &[&str] = &["div", "span", "li", "ul", "ol", "p"];

/// Ordered selector segments, outermost first
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectorChain {
    segments: Vec<String>,
}

impl SelectorChain {
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Segments joined with the descendant combinator
    pub fn to_selector(&self) -> String {
        self.segments.join(" ")
    }
}

impl std::fmt::Display for SelectorChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_selector())
    }
}

/// Builds selector chains for elements of a tree
#[derive(Debug, Clone, Copy)]
pub struct ChainBuilder<'a> {
    predicates: &'a Predicates,
    max_levels: Option<usize>,
}

impl<'a> ChainBuilder<'a> {
    pub fn new(predicates: &'a Predicates, max_levels: Option<usize>) -> Self {
        Self {
            predicates,
            max_levels,
        }
    }

    /// Walk from `node` towards the root and collect the chain
    pub fn chain(&self, tree: &DomTree, node: NodeId) -> SelectorChain {
        let mut parts = Vec::new();
        let mut current = Some(node);
        let mut first = true;
        let mut levels = 0;

        while let Some(id) = current {
            if tree.is_root(id) {
                break;
            }
            let element = tree.node(id);

            if let Some(element_id) = element.id().filter(|v| !is_dynamic_id(v)) {
                parts.push(format!("#{}", element_id));
                break;
            }

            let classes = self.class_suffix(tree, id);
            if first {
                parts.push(format!("{}{}", element.tag_name, classes));
                first = false;
            } else if !classes.is_empty() {
                if GENERIC_TAGS.contains(&element.tag_name.as_str()) {
                    parts.push(classes);
                } else {
                    parts.push(format!("{}{}", element.tag_name, classes));
                }
            }

            levels += 1;
            if self.max_levels.is_some_and(|max| levels >= max) {
                break;
            }
            current = tree.parent(id);
        }

        parts.reverse();
        SelectorChain { segments: parts }
    }

    /// Chain joined into a selector string
    pub fn build(&self, tree: &DomTree, node: NodeId) -> String {
        self.chain(tree, node).to_selector()
    }

    /// `.a.b` for the element's non-generic classes, empty when none
    pub fn class_suffix(&self, tree: &DomTree, node: NodeId) -> String {
        tree.node(node)
            .classes()
            .filter(|class| !self.predicates.is_generic_class(class))
            .map(|class| format!(".{}", class))
            .collect()
    }
}

/// Id if present, else `tag.classes` (all classes), else the bare tag
pub fn short_selector(tree: &DomTree, node: NodeId) -> String {
    let element = tree.node(node);
    if let Some(id) = element.id() {
        return format!("#{}", id);
    }
    let classes: String = element.classes().map(|c| format!(".{}", c)).collect();
    format!("{}{}", element.tag_name, classes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::ElementNode;

    fn first(tree: &DomTree, tag: &str) -> NodeId {
        tree.elements()
            .into_iter()
            .find(|id| tree.node(*id).is_tag(tag))
            .unwrap()
    }

    fn build(html: &str, tag: &str, max_levels: Option<usize>) -> String {
        let tree = DomTree::parse(html);
        let predicates = Predicates::default();
        ChainBuilder::new(&predicates, max_levels).build(&tree, first(&tree, tag))
    }

    #[test]
    fn test_build_selector_with_id() {
        assert_eq!(build("<div id='main'><span>Text</span></div>", "div", None), "#main");
    }

    #[test]
    fn test_stable_id_stops_walk() {
        let html = r#"<section class="page"><div id="main"><p class="lead">x</p></div></section>"#;
        assert_eq!(build(html, "p", None), "#main p.lead");
    }

    #[test]
    fn test_target_with_stable_id_is_only_id() {
        let html = r#"<div class="outer-card"><h1 id="title" class="big">x</h1></div>"#;
        assert_eq!(build(html, "h1", None), "#title");
    }

    #[test]
    fn test_dynamic_id_is_ignored() {
        let html = r#"<div id="post-4821" class="article"><p>x</p></div>"#;
        assert_eq!(build(html, "p", None), ".article p");
    }

    #[test]
    fn test_generic_classes_filtered_and_levels_skipped() {
        let html = r#"<nav class="menu"><div class="wrapper"><ul><li class="item"><a class="wrapper link" href="/">x</a></li></ul></div></nav>"#;
        assert_eq!(build(html, "a", None), "nav.menu .item a.link");
    }

    #[test]
    fn test_generic_anchor_class_leaves_bare_tag() {
        let html = r##"<h2><a class="wrapper" href="#">T</a></h2>"##;
        assert_eq!(build(html, "a", None), "a");
    }

    #[test]
    fn test_max_levels() {
        let html = r#"<article class="a"><section class="b"><div class="c"><ul class="d"><li class="e"><span class="f">x</span></li></ul></div></section></article>"#;
        assert_eq!(
            build(html, "span", None),
            "article.a section.b .c .d .e span.f"
        );
        assert_eq!(build(html, "span", Some(4)), ".c .d .e span.f");
        assert_eq!(build(html, "span", Some(1)), "span.f");
    }

    #[test]
    fn test_chain_segments() {
        let tree = DomTree::parse(r#"<main class="shop"><p class="price">9</p></main>"#);
        let predicates = Predicates::default();
        let chain = ChainBuilder::new(&predicates, None).chain(&tree, first(&tree, "p"));

        assert_eq!(chain.segments(), ["main.shop".to_string(), "p.price".to_string()]);
        assert_eq!(chain.to_string(), "main.shop p.price");
    }

    #[test]
    fn test_short_selector() {
        let mut tree = DomTree::new();
        let root = tree.root();
        let with_id = tree.append(root, ElementNode::new("div").with_id("x-123"));
        let with_classes = tree.append(root, ElementNode::new("p").with_classes("wrapper lead"));
        let bare = tree.append(root, ElementNode::new("span"));

        assert_eq!(short_selector(&tree, with_id), "#x-123");
        assert_eq!(short_selector(&tree, with_classes), "p.wrapper.lead");
        assert_eq!(short_selector(&tree, bare), "span");
    }
}

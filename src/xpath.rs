//! Positional XPath addressing

use crate::dom::{DomTree, NodeId};

/// Absolute XPath of `node`, e.g. `/div[1]/ul[1]/li[2]`
///
/// Each step is indexed among siblings sharing the tag name, starting at 1.
/// The document root contributes no step.
pub fn build_xpath(tree: &DomTree, node: NodeId) -> String {
    let mut steps = Vec::new();
    let mut current = node;

    while let Some(parent) = tree.parent(current) {
        let tag = tree.node(current).tag_name.as_str();
        let position = tree
            .children(parent)
            .filter(|sibling| tree.node(*sibling).tag_name == tag)
            .position(|sibling| sibling == current)
            .map_or(1, |index| index + 1);

        steps.push(format!("{}[{}]", tag, position));
        current = parent;
    }

    steps.reverse();
    format!("/{}", steps.join("/"))
}

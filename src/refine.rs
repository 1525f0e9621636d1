//! Narrowing a chosen wrapper down to the link it contains

use crate::dom::{DomTree, NodeId};

/// Return the sole descendant anchor of `node`, or `node` itself when it
/// contains no anchor or several.
pub fn refine(tree: &DomTree, node: NodeId) -> NodeId {
    let mut anchors = tree
        .descendants(node)
        .into_iter()
        .filter(|id| tree.node(*id).is_tag("a"));

    match (anchors.next(), anchors.next()) {
        (Some(anchor), None) => {
            log::debug!("Refined <{}> to its only anchor", tree.node(node).tag_name);
            anchor
        }
        _ => node,
    }
}

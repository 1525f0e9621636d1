use crate::dom::element::{ChildNode, NodeId};
use crate::dom::tree::{DomTree, is_void, open_tag};

/// Structural figures of every element, computed once per tree
///
/// Nodes are only appended, so a child always sits after its parent in the
/// arena. Depths are filled front to back and subtree figures back to front,
/// each in a single linear pass.
#[derive(Debug, Clone, Default)]
pub struct TreeMetrics {
    depth: Vec<usize>,
    descendants: Vec<usize>,
    html_len: Vec<usize>,
}

impl TreeMetrics {
    pub fn new(tree: &DomTree) -> Self {
        let len = tree.count_elements() + 1;
        let mut depth = vec![0; len];
        let mut descendants = vec![0; len];
        let mut html_len = vec![0; len];

        for index in 1..len {
            if let Some(parent) = tree.element_parent(NodeId(index)) {
                depth[index] = depth[parent.0] + 1;
            }
        }

        for index in (0..len).rev() {
            let id = NodeId(index);
            let node = tree.node(id);

            let mut inner = 0;
            for child in &node.nodes {
                match child {
                    ChildNode::Text(text) => inner += text.chars().count(),
                    ChildNode::Element(child) => {
                        inner += html_len[child.0];
                        descendants[index] += descendants[child.0] + 1;
                    }
                }
            }

            html_len[index] = if tree.is_root(id) {
                inner
            } else if is_void(node) {
                open_tag(node).chars().count()
            } else {
                // "</" + tag + ">"
                open_tag(node).chars().count() + inner + node.tag_name.chars().count() + 3
            };
        }

        Self {
            depth,
            descendants,
            html_len,
        }
    }

    /// Number of element ancestors, same as [`DomTree::depth`]
    pub fn depth(&self, id: NodeId) -> usize {
        self.depth.get(id.0).copied().unwrap_or(0)
    }

    /// Number of descendant elements, same as `DomTree::descendants(id).len()`
    pub fn descendant_count(&self, id: NodeId) -> usize {
        self.descendants.get(id.0).copied().unwrap_or(0)
    }

    /// Character length of [`DomTree::outer_html`]
    pub fn html_len(&self, id: NodeId) -> usize {
        self.html_len.get(id.0).copied().unwrap_or(0)
    }
}

use indexmap::{IndexMap, IndexSet};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Handle to an element stored in a [`DomTree`](crate::dom::DomTree)
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// Position of the node in its tree's arena
    pub fn index(self) -> usize {
        self.0
    }
}

/// A child of an element: either another element or a run of text
#[derive(Debug, Clone, PartialEq)]
pub enum ChildNode {
    Element(NodeId),
    Text(String),
}

/// Represents a DOM element node
#[derive(Debug, Clone, PartialEq)]
pub struct ElementNode {
    /// Lowercase HTML tag name (e.g., "div", "a", "h2")
    pub tag_name: String,

    /// Element id, absent when missing or empty
    pub id: Option<String>,

    /// Class tokens in document order, without duplicates
    pub classes: IndexSet<String>,

    /// Remaining attributes (href, src, ...) in document order
    pub attributes: IndexMap<String, String>,

    /// Child elements and text runs, in document order
    pub nodes: Vec<ChildNode>,

    /// Owning element, `None` only for the document root
    pub parent: Option<NodeId>,
}

impl ElementNode {
    /// Create a new ElementNode
    pub fn new(tag_name: impl Into<String>) -> Self {
        Self {
            tag_name: tag_name.into().to_ascii_lowercase(),
            id: None,
            classes: IndexSet::new(),
            attributes: IndexMap::new(),
            nodes: Vec::new(),
            parent: None,
        }
    }

    /// Builder method: set id (empty ids are ignored)
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.set_id(id);
        self
    }

    /// Builder method: add class tokens from a whitespace-separated list
    pub fn with_classes(mut self, classes: &str) -> Self {
        self.add_classes(classes);
        self
    }

    /// Builder method: set an attribute
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.add_attribute(key, value);
        self
    }

    /// Builder method: append a text run
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.nodes.push(ChildNode::Text(text.into()));
        self
    }

    /// Set the id, ignoring empty values
    pub fn set_id(&mut self, id: impl Into<String>) {
        let id = id.into();
        self.id = if id.is_empty() { None } else { Some(id) };
    }

    /// Add class tokens from a whitespace-separated list
    pub fn add_classes(&mut self, classes: &str) {
        for class in classes.split_whitespace() {
            self.classes.insert(class.to_string());
        }
    }

    /// Add a single attribute; `id` and `class` are routed to their fields
    pub fn add_attribute(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match key.as_str() {
            "id" => self.set_id(value),
            "class" => self.add_classes(&value),
            _ => {
                self.attributes.insert(key, value);
            }
        }
    }

    /// Get attribute value by key
    pub fn get_attribute(&self, key: &str) -> Option<&str> {
        match key {
            "id" => self.id.as_deref(),
            _ => self.attributes.get(key).map(String::as_str),
        }
    }

    /// Element id, if any
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Class tokens in document order
    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.classes.iter().map(String::as_str)
    }

    /// Check if element has a specific class
    pub fn has_class(&self, class_name: &str) -> bool {
        self.classes.contains(class_name)
    }

    /// Check if element is a specific tag
    pub fn is_tag(&self, tag: &str) -> bool {
        self.tag_name.eq_ignore_ascii_case(tag)
    }

    /// Check for h1..h6
    pub fn is_heading(&self) -> bool {
        let bytes = self.tag_name.as_bytes();
        bytes.len() == 2 && bytes[0] == b'h' && (b'1'..=b'6').contains(&bytes[1])
    }

    /// Element children, skipping text runs
    pub fn element_children(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.iter().filter_map(|node| match node {
            ChildNode::Element(id) => Some(*id),
            ChildNode::Text(_) => None,
        })
    }

    /// Concatenation of the element's own text runs, descendants excluded
    pub fn direct_text(&self) -> String {
        self.nodes
            .iter()
            .filter_map(|node| match node {
                ChildNode::Text(text) => Some(text.as_str()),
                ChildNode::Element(_) => None,
            })
            .collect()
    }

    /// Opening tag with id and classes, e.g. `<div id="main" class="a b">`
    pub fn to_simple_string(&self) -> String {
        let mut parts = vec![format!("<{}", self.tag_name)];

        if let Some(id) = self.id() {
            parts.push(format!(" id=\"{}\"", id));
        }

        if !self.classes.is_empty() {
            let joined: Vec<&str> = self.classes().collect();
            parts.push(format!(" class=\"{}\"", joined.join(" ")));
        }

        parts.push(">".to_string());
        parts.join("")
    }
}

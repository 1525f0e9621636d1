use crate::dom::element::{ChildNode, ElementNode, NodeId};
use crate::error::{Result, SelectorError};
use scraper::{ElementRef, Html, Node, Selector};

/// Tag name of the synthetic node that owns top-level elements
pub const DOCUMENT_TAG: &str = "#document";

/// Elements serialized without a closing tag
const VOID_TAGS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// Represents a parsed HTML document as an arena of elements
///
/// Index 0 always holds the document root. Every other node has exactly one
/// parent, and nodes are only ever appended, so a [`NodeId`] handed out by a
/// tree stays valid for the lifetime of that tree.
#[derive(Debug, Clone)]
pub struct DomTree {
    nodes: Vec<ElementNode>,
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

impl DomTree {
    /// Create a tree holding only the document root
    pub fn new() -> Self {
        Self {
            nodes: vec![ElementNode::new(DOCUMENT_TAG)],
        }
    }

    /// Parse HTML text into a tree
    ///
    /// Parsing is lenient: malformed markup still yields a tree, possibly
    /// one without any element.
    pub fn parse(html: &str) -> Self {
        Self::parse_excluding(html, &[])
    }

    /// Parse HTML text, dropping every element matched by `excluded`
    /// together with its subtree
    pub fn parse_excluding(html: &str, excluded: &[Selector]) -> Self {
        let mut tree = Self::new();
        if html.trim().is_empty() {
            return tree;
        }

        let root = tree.root();
        if looks_like_document(html) {
            let document = Html::parse_document(html);
            tree.import(document.root_element(), root, true, excluded);
        } else {
            // Fragments are wrapped in a synthetic <html> (plus table wrappers
            // for table parts); lift the original nodes out of them.
            let context = TableContext::of(html);
            let document = Html::parse_fragment(&context.wrap(html));
            let container = context.container(document.root_element());
            tree.import(container, root, false, excluded);
        }

        log::trace!("Parsed {} elements", tree.count_elements());
        tree
    }

    /// Copy `source` (or only its children) under `parent`
    ///
    /// Walks with an explicit stack so nesting depth is bounded by the heap.
    /// Each element is appended when its parent is visited, which keeps
    /// children in document order and every child after its parent in the
    /// arena.
    fn import<'a>(
        &mut self,
        source: ElementRef<'a>,
        parent: NodeId,
        include_source: bool,
        excluded: &[Selector],
    ) {
        let mut pending: Vec<(ElementRef<'a>, NodeId)> = Vec::new();
        if include_source {
            if let Some(id) = self.import_element(source, parent, excluded) {
                pending.push((source, id));
            }
        } else {
            pending.push((source, parent));
        }

        while let Some((element, id)) = pending.pop() {
            for child in element.children() {
                match child.value() {
                    Node::Text(text) => self.append_text(id, String::from(&**text)),
                    Node::Element(_) => {
                        let Some(child_element) = ElementRef::wrap(child) else {
                            continue;
                        };
                        if let Some(child_id) = self.import_element(child_element, id, excluded) {
                            pending.push((child_element, child_id));
                        }
                    }
                    _ => {}
                }
            }
        }
    }

    /// Append a childless copy of `source`, or nothing when it is excluded
    fn import_element(
        &mut self,
        source: ElementRef<'_>,
        parent: NodeId,
        excluded: &[Selector],
    ) -> Option<NodeId> {
        if excluded.iter().any(|selector| selector.matches(&source)) {
            return None;
        }

        let value = source.value();
        let mut node = ElementNode::new(value.name());
        for (key, attr) in value.attrs() {
            node.add_attribute(key, attr);
        }
        Some(self.append(parent, node))
    }

    /// Root of the tree (the synthetic document node)
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Whether `id` is the document root
    pub fn is_root(&self, id: NodeId) -> bool {
        id.0 == 0
    }

    /// Append `node` as the last child of `parent` and return its handle
    pub fn append(&mut self, parent: NodeId, mut node: ElementNode) -> NodeId {
        let id = NodeId(self.nodes.len());
        node.parent = Some(parent);
        self.nodes.push(node);
        self.nodes[parent.0].nodes.push(ChildNode::Element(id));
        id
    }

    /// Append a text run to `parent`
    pub fn append_text(&mut self, parent: NodeId, text: impl Into<String>) {
        self.nodes[parent.0].nodes.push(ChildNode::Text(text.into()));
    }

    /// Get a node by handle
    pub fn get(&self, id: NodeId) -> Option<&ElementNode> {
        self.nodes.get(id.0)
    }

    /// Get a node by handle issued by this tree
    pub fn node(&self, id: NodeId) -> &ElementNode {
        &self.nodes[id.0]
    }

    /// Parent of a node, `None` for the document root
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    /// Parent of a node unless it is the document root
    pub fn element_parent(&self, id: NodeId) -> Option<NodeId> {
        self.parent(id).filter(|parent| !self.is_root(*parent))
    }

    /// Element children of a node
    pub fn children(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.node(id).element_children()
    }

    /// All elements in document (pre-)order, document root excluded
    pub fn elements(&self) -> Vec<NodeId> {
        self.descendants(self.root())
    }

    /// Descendant elements of `id` in document order, `id` excluded
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(id).collect();
        stack.reverse();
        while let Some(current) = stack.pop() {
            out.push(current);
            let mut children: Vec<NodeId> = self.children(current).collect();
            children.reverse();
            stack.extend(children);
        }
        out
    }

    /// Number of element ancestors (the document root is not counted)
    pub fn depth(&self, id: NodeId) -> usize {
        let mut depth = 0;
        let mut current = self.element_parent(id);
        while let Some(parent) = current {
            depth += 1;
            current = self.element_parent(parent);
        }
        depth
    }

    /// The element's own text, descendants excluded
    pub fn direct_text(&self, id: NodeId) -> String {
        self.node(id).direct_text()
    }

    /// All text of the element and its descendants, in document order
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(id, &mut out);
        out
    }

    fn collect_text(&self, id: NodeId, out: &mut String) {
        let mut stack: Vec<&ChildNode> = self.node(id).nodes.iter().rev().collect();
        while let Some(child) = stack.pop() {
            match child {
                ChildNode::Text(text) => out.push_str(text),
                ChildNode::Element(child) => stack.extend(self.node(*child).nodes.iter().rev()),
            }
        }
    }

    /// Canonical serialization of the element and its subtree
    pub fn outer_html(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.write_outer_html(id, &mut out);
        out
    }

    fn write_outer_html(&self, id: NodeId, out: &mut String) {
        let mut stack = Vec::new();
        if self.is_root(id) {
            self.push_children(id, &mut stack);
        } else {
            stack.push(Emit::Open(id));
        }

        while let Some(item) = stack.pop() {
            match item {
                Emit::Text(text) => out.push_str(text),
                Emit::Close(tag) => {
                    out.push_str("</");
                    out.push_str(tag);
                    out.push('>');
                }
                Emit::Open(id) => {
                    let node = self.node(id);
                    out.push_str(&open_tag(node));
                    if is_void(node) {
                        continue;
                    }
                    stack.push(Emit::Close(&node.tag_name));
                    self.push_children(id, &mut stack);
                }
            }
        }
    }

    fn push_children<'a>(&'a self, id: NodeId, stack: &mut Vec<Emit<'a>>) {
        for child in self.node(id).nodes.iter().rev() {
            stack.push(match child {
                ChildNode::Text(text) => Emit::Text(text),
                ChildNode::Element(child) => Emit::Open(*child),
            });
        }
    }

    /// Count elements in the tree, document root excluded
    pub fn count_elements(&self) -> usize {
        self.nodes.len() - 1
    }

    /// Whether the tree holds no element at all
    pub fn is_empty(&self) -> bool {
        self.count_elements() == 0
    }
}

/// Compile exclusion selectors, reporting the first invalid one
pub fn compile_selectors(sources: &[String]) -> Result<Vec<Selector>> {
    sources
        .iter()
        .map(|source| {
            Selector::parse(source).map_err(|e| SelectorError::InvalidSelector {
                selector: source.clone(),
                reason: format!("{:?}", e),
            })
        })
        .collect()
}

fn looks_like_document(html: &str) -> bool {
    let lowered = html.trim_start().to_ascii_lowercase();
    lowered.starts_with("<!doctype") || lowered.contains("<html")
}

pub(crate) fn is_void(node: &ElementNode) -> bool {
    VOID_TAGS.contains(&node.tag_name.as_str())
}

/// Pending serialization step
enum Emit<'a> {
    Open(NodeId),
    Text(&'a str),
    Close(&'a str),
}

/// Opening tag in canonical form: id, then classes, then other attributes
pub(crate) fn open_tag(node: &ElementNode) -> String {
    let mut out = format!("<{}", node.tag_name);
    if let Some(element_id) = node.id() {
        out.push_str(&format!(" id=\"{}\"", element_id));
    }
    if !node.classes.is_empty() {
        let classes: Vec<&str> = node.classes().collect();
        out.push_str(&format!(" class=\"{}\"", classes.join(" ")));
    }
    for (key, value) in &node.attributes {
        out.push_str(&format!(" {}=\"{}\"", key, value));
    }
    out.push('>');
    out
}

/// Table parts only survive parsing inside a table, so fragments starting
/// with one are wrapped before parsing and unwrapped afterwards
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TableContext {
    None,
    Table,
    Section,
    Row,
    ColumnGroup,
}

impl TableContext {
    fn of(html: &str) -> Self {
        let Some(rest) = html.trim_start().strip_prefix('<') else {
            return TableContext::None;
        };
        let tag: String = rest
            .chars()
            .take_while(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();

        match tag.as_str() {
            "tbody" | "thead" | "tfoot" | "caption" | "colgroup" => TableContext::Table,
            "tr" => TableContext::Section,
            "td" | "th" => TableContext::Row,
            "col" => TableContext::ColumnGroup,
            _ => TableContext::None,
        }
    }

    fn wrap(self, html: &str) -> String {
        match self {
            TableContext::None => html.to_string(),
            TableContext::Table => format!("<table>{}</table>", html),
            TableContext::Section => format!("<table><tbody>{}</tbody></table>", html),
            TableContext::Row => format!("<table><tbody><tr>{}</tr></tbody></table>", html),
            TableContext::ColumnGroup => format!("<table><colgroup>{}</colgroup></table>", html),
        }
    }

    fn wrappers(self) -> &'static [&'static str] {
        match self {
            TableContext::None => &[],
            TableContext::Table => &["table"],
            TableContext::Section => &["table", "tbody"],
            TableContext::Row => &["table", "tbody", "tr"],
            TableContext::ColumnGroup => &["table", "colgroup"],
        }
    }

    /// Element whose children are the original fragment nodes
    fn container(self, wrapper: ElementRef<'_>) -> ElementRef<'_> {
        let mut container = wrapper;
        for tag in self.wrappers() {
            match container
                .child_elements()
                .find(|inner| inner.value().name() == *tag)
            {
                Some(inner) => container = inner,
                None => return wrapper,
            }
        }
        container
    }
}

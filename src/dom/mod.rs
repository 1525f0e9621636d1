//! Element tree the selector engine works on
//!
//! This module provides:
//! - ElementNode: tag, id, class tokens, attributes and ordered children
//! - DomTree: arena of elements parsed from HTML, with parent links
//! - TreeMetrics: depth, subtree size and serialized length per element
//! - SelectorMap: ordered, deduplicated map of CSS selectors to their elements

pub mod element;
pub mod metrics;
pub mod selector_map;
pub mod tree;

pub use element::{ChildNode, ElementNode, NodeId};
pub use metrics::TreeMetrics;
pub use selector_map::{ElementSelector, SelectorMap};
pub use tree::{DOCUMENT_TAG, DomTree, compile_selectors};

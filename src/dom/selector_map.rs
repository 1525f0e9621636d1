use crate::dom::element::NodeId;
use indexmap::IndexMap;
use indexmap::map::Entry;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Information needed to locate an element
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
pub struct ElementSelector {
    /// CSS selector chain for the element
    pub css_selector: String,

    /// Id if present, else `tag.classes`, else the bare tag
    pub short_selector: String,

    /// XPath selector (alternative to CSS)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xpath: Option<String>,

    /// Element's tag name
    pub tag_name: String,

    /// Element's ID attribute (if any)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Element's text content (truncated for display)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// Aggregate score of the element that was selected
    pub score: f64,

    /// Element the selector points at (after refinement)
    pub node: NodeId,
}

impl ElementSelector {
    /// Create a new ElementSelector with CSS selector
    pub fn new(css_selector: impl Into<String>, tag_name: impl Into<String>, node: NodeId) -> Self {
        let tag_name = tag_name.into();
        Self {
            css_selector: css_selector.into(),
            short_selector: tag_name.clone(),
            xpath: None,
            tag_name,
            id: None,
            text: None,
            score: 0.0,
            node,
        }
    }

    /// Builder method: set short selector
    pub fn with_short_selector(mut self, short: impl Into<String>) -> Self {
        self.short_selector = short.into();
        self
    }

    /// Builder method: set XPath
    pub fn with_xpath(mut self, xpath: impl Into<String>) -> Self {
        self.xpath = Some(xpath.into());
        self
    }

    /// Builder method: set ID
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Builder method: set text content, truncated to 50 characters
    pub fn with_text(mut self, text: &str) -> Self {
        let text = text.split_whitespace().collect::<Vec<_>>().join(" ");
        if text.is_empty() {
            return self;
        }
        let truncated = if text.chars().count() > 50 {
            format!("{}...", text.chars().take(47).collect::<String>())
        } else {
            text
        };
        self.text = Some(truncated);
        self
    }

    /// Builder method: set score
    pub fn with_score(mut self, score: f64) -> Self {
        self.score = score;
        self
    }

    /// Get the best selector to use (CSS preferred)
    pub fn best_selector(&self) -> &str {
        &self.css_selector
    }
}

/// Selectors keyed by their CSS string, in insertion order
///
/// Registering a selector whose CSS string is already present keeps the
/// earlier entry, which is how distinct top-K results are collected.
#[derive(Debug, Clone, Default)]
pub struct SelectorMap {
    map: IndexMap<String, ElementSelector>,
}

impl SelectorMap {
    /// Create a new empty SelectorMap
    pub fn new() -> Self {
        Self {
            map: IndexMap::new(),
        }
    }

    /// Register a selector; returns false if its CSS string was already taken
    pub fn register(&mut self, selector: ElementSelector) -> bool {
        match self.map.entry(selector.css_selector.clone()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(selector);
                true
            }
        }
    }

    /// Get selector by insertion position
    pub fn get(&self, index: usize) -> Option<&ElementSelector> {
        self.map.get_index(index).map(|(_, sel)| sel)
    }

    /// Get selector by CSS string
    pub fn find_by_css_selector(&self, css_selector: &str) -> Option<&ElementSelector> {
        self.map.get(css_selector)
    }

    /// Check if a CSS string is registered
    pub fn contains(&self, css_selector: &str) -> bool {
        self.map.contains_key(css_selector)
    }

    /// Get the number of registered selectors
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Check if the map is empty
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Get all selectors in insertion order
    pub fn selectors(&self) -> impl Iterator<Item = &ElementSelector> {
        self.map.values()
    }

    /// Consume the map, keeping insertion order
    pub fn into_vec(self) -> Vec<ElementSelector> {
        self.map.into_values().collect()
    }
}

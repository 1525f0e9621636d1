//! Classification of id and class values

use crate::config::SelectorConfig;
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

static DIGIT_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d{2,}").unwrap());

/// Ids longer than this are presumed generated
const MAX_STABLE_ID_LEN: usize = 30;

/// True if the id looks auto-generated: a run of two or more digits, or
/// more than 30 characters.
pub fn is_dynamic_id(value: &str) -> bool {
    DIGIT_RUN.is_match(value) || value.chars().count() > MAX_STABLE_ID_LEN
}

/// Generic-class and keyword lookups built from a [`SelectorConfig`]
#[derive(Debug, Clone)]
pub struct Predicates {
    generic_classes: HashSet<String>,
    keywords: Vec<String>,
}

impl Predicates {
    pub fn new<I, J, S, T>(generic_classes: I, keywords: J) -> Self
    where
        I: IntoIterator<Item = S>,
        J: IntoIterator<Item = T>,
        S: AsRef<str>,
        T: AsRef<str>,
    {
        Self {
            generic_classes: generic_classes
                .into_iter()
                .map(|c| c.as_ref().to_lowercase())
                .collect(),
            keywords: keywords
                .into_iter()
                .map(|k| k.as_ref().to_lowercase())
                .filter(|k| !k.is_empty())
                .collect(),
        }
    }

    pub fn from_config(config: &SelectorConfig) -> Self {
        Self::new(&config.generic_classes, &config.keywords)
    }

    /// Case-insensitive membership in the generic class set
    pub fn is_generic_class(&self, value: &str) -> bool {
        self.generic_classes.contains(&value.to_lowercase())
    }

    /// Case-insensitive substring match against any keyword
    pub fn has_keyword(&self, value: &str) -> bool {
        let lowered = value.to_lowercase();
        self.keywords.iter().any(|k| lowered.contains(k.as_str()))
    }

    /// Lowercased keywords, in configuration order
    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    /// True if the id exists and is not dynamic
    pub fn is_stable_id(&self, id: Option<&str>) -> bool {
        id.is_some_and(|id| !is_dynamic_id(id))
    }
}

impl Default for Predicates {
    fn default() -> Self {
        Self::from_config(&SelectorConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_dynamic_id() {
        assert!(is_dynamic_id("item12345"));
        assert!(is_dynamic_id("a12"));
        assert!(!is_dynamic_id("header"));
        assert!(!is_dynamic_id("h1-title"));
        assert!(!is_dynamic_id("a1b2c3"));
    }

    #[test]
    fn test_long_id_is_dynamic() {
        let long = "a".repeat(31);
        assert!(is_dynamic_id(&long));
        assert!(!is_dynamic_id(&"a".repeat(30)));
    }

    #[test]
    fn test_is_generic_class() {
        let predicates = Predicates::default();
        assert!(predicates.is_generic_class("wrapper"));
        assert!(predicates.is_generic_class("Container"));
        assert!(predicates.is_generic_class("tabcontent"));
        assert!(!predicates.is_generic_class("product-title"));
        assert!(!predicates.is_generic_class("wrappers"));
    }

    #[test]
    fn test_has_keyword() {
        let predicates = Predicates::default();
        assert!(predicates.has_keyword("Product-Title"));
        assert!(predicates.has_keyword("article-body"));
        assert!(predicates.has_keyword("navbar"));
        assert!(!predicates.has_keyword("wrapper"));
        assert!(!predicates.has_keyword(""));
    }

    #[test]
    fn test_custom_lists() {
        let predicates = Predicates::new(["Grid"], ["PRICE"]);
        assert!(predicates.is_generic_class("grid"));
        assert!(!predicates.is_generic_class("wrapper"));
        assert!(predicates.has_keyword("old-price"));
        assert!(!predicates.has_keyword("title"));
    }

    #[test]
    fn test_is_stable_id() {
        let predicates = Predicates::default();
        assert!(predicates.is_stable_id(Some("main")));
        assert!(!predicates.is_stable_id(Some("post-2024")));
        assert!(!predicates.is_stable_id(None));
    }
}

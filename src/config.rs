use crate::error::{Result, SelectorError};
use crate::scoring::strategies;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Classes too structural to discriminate between elements
pub const DEFAULT_GENERIC_CLASSES: &[&str] = &[
    "container",
    "wrapper",
    "wrap",
    "box",
    "block",
    "row",
    "col",
    "inner",
    "outer",
    "bold",
    "tabcontent",
    "header",
    "footer",
    "nav",
];

/// Keywords hinting that an id or class names interesting content
pub const DEFAULT_KEYWORDS: &[&str] = &[
    "title",
    "desc",
    "description",
    "content",
    "card",
    "item",
    "nav",
    "link",
    "button",
    "rte",
    "prose",
    "article-body",
];

/// Which text-density formula the density strategy applies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DensityMode {
    /// Absolute thresholds on direct text length and text per descendant,
    /// plus a flat bonus for headings
    #[default]
    Thresholds,
    /// `(direct text length / serialized length) * 10`
    Ratio,
}

/// Configuration of a selector engine
///
/// Every list the heuristics consult lives here so callers can override
/// them without touching the algorithm.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    /// Class names excluded from selectors and penalised when scoring
    pub generic_classes: Vec<String>,

    /// Substrings that mark an id or class as content-bearing
    pub keywords: Vec<String>,

    /// Maximum number of elements the chain builder visits (None = up to the root)
    pub max_levels: Option<usize>,

    /// Number of distinct selectors returned in top-K mode
    pub top_k: usize,

    /// Number of ranked alternatives kept per element
    pub max_alternatives: usize,

    /// Density formula used by the `text_density` strategy
    pub density_mode: DensityMode,

    /// Enabled scoring strategies, in evaluation order
    pub strategies: Vec<String>,

    /// CSS selectors whose matches are dropped before analysis
    pub exclude_selectors: Vec<String>,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            generic_classes: to_strings(DEFAULT_GENERIC_CLASSES),
            keywords: to_strings(DEFAULT_KEYWORDS),
            max_levels: None,
            top_k: 3,
            max_alternatives: 3,
            density_mode: DensityMode::Thresholds,
            strategies: to_strings(strategies::ALL_STRATEGIES),
            exclude_selectors: Vec::new(),
        }
    }
}

impl SelectorConfig {
    /// Create a configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Tag, id and class signals only
    pub fn classic() -> Self {
        Self::default().strategies([
            strategies::TAG_BIAS,
            strategies::ID_BONUS,
            strategies::CLASS_BONUS,
        ])
    }

    /// Main-content detection: keywords, semantic tags, text ratio and
    /// navigation noise
    pub fn content_finder() -> Self {
        Self::default()
            .strategies([
                strategies::KEYWORD_OVERLAY,
                strategies::SEMANTIC_BIAS,
                strategies::TEXT_DENSITY,
                strategies::STRUCTURAL_NOISE,
            ])
            .density_mode(DensityMode::Ratio)
    }

    /// Load a configuration from a JSON file; missing fields take defaults
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| SelectorError::ConfigRead {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::from_json_str(&raw)
    }

    /// Parse a configuration from JSON text
    pub fn from_json_str(raw: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Builder method: replace the generic class list
    pub fn generic_classes<I, S>(mut self, classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.generic_classes = classes.into_iter().map(Into::into).collect();
        self
    }

    /// Builder method: replace the keyword list
    pub fn keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keywords = keywords.into_iter().map(Into::into).collect();
        self
    }

    /// Builder method: append keywords to the current list
    pub fn with_extra_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for keyword in keywords {
            let keyword = keyword.into();
            if !self.keywords.contains(&keyword) {
                self.keywords.push(keyword);
            }
        }
        self
    }

    /// Builder method: cap the ancestor walk
    pub fn max_levels(mut self, levels: impl Into<Option<usize>>) -> Self {
        self.max_levels = levels.into();
        self
    }

    /// Builder method: number of distinct selectors in top-K mode
    pub fn top_k(mut self, k: usize) -> Self {
        self.top_k = k;
        self
    }

    /// Builder method: number of ranked alternatives
    pub fn max_alternatives(mut self, n: usize) -> Self {
        self.max_alternatives = n;
        self
    }

    /// Builder method: density formula
    pub fn density_mode(mut self, mode: DensityMode) -> Self {
        self.density_mode = mode;
        self
    }

    /// Builder method: enabled strategies
    pub fn strategies<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.strategies = names.into_iter().map(Into::into).collect();
        self
    }

    /// Builder method: exclusion selectors
    pub fn exclude_selectors<I, S>(mut self, selectors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_selectors = selectors.into_iter().map(Into::into).collect();
        self
    }

    /// Check limits and strategy names
    pub fn validate(&self) -> Result<()> {
        if self.top_k == 0 {
            return Err(SelectorError::InvalidConfig("top_k must be at least 1".to_string()));
        }
        if self.max_alternatives == 0 {
            return Err(SelectorError::InvalidConfig(
                "max_alternatives must be at least 1".to_string(),
            ));
        }
        if self.max_levels == Some(0) {
            return Err(SelectorError::InvalidConfig(
                "max_levels must be at least 1 when set".to_string(),
            ));
        }
        if self.strategies.is_empty() {
            return Err(SelectorError::InvalidConfig(
                "at least one scoring strategy must be enabled".to_string(),
            ));
        }
        if let Some(unknown) = self
            .strategies
            .iter()
            .find(|name| !strategies::ALL_STRATEGIES.contains(&name.as_str()))
        {
            return Err(SelectorError::UnknownStrategy(unknown.clone()));
        }
        Ok(())
    }
}

fn to_strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SelectorConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.max_levels, None);
        assert_eq!(config.top_k, 3);
        assert_eq!(config.strategies.len(), strategies::ALL_STRATEGIES.len());
        assert!(config.generic_classes.iter().any(|c| c == "wrapper"));
        assert!(config.keywords.iter().any(|k| k == "article-body"));
    }

    #[test]
    fn test_builder() {
        let config = SelectorConfig::new()
            .max_levels(4)
            .top_k(5)
            .density_mode(DensityMode::Ratio)
            .with_extra_keywords(["price", "title"]);

        assert_eq!(config.max_levels, Some(4));
        assert_eq!(config.top_k, 5);
        assert_eq!(config.density_mode, DensityMode::Ratio);
        assert_eq!(config.keywords.iter().filter(|k| *k == "title").count(), 1);
        assert_eq!(config.keywords.last().map(String::as_str), Some("price"));
    }

    #[test]
    fn test_presets() {
        let classic = SelectorConfig::classic();
        assert_eq!(classic.strategies, vec!["tag_bias", "id_bonus", "class_bonus"]);
        assert!(classic.validate().is_ok());

        let content = SelectorConfig::content_finder();
        assert_eq!(content.density_mode, DensityMode::Ratio);
        assert!(content.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_limits() {
        assert!(matches!(
            SelectorConfig::new().top_k(0).validate(),
            Err(SelectorError::InvalidConfig(_))
        ));
        assert!(matches!(
            SelectorConfig::new().max_alternatives(0).validate(),
            Err(SelectorError::InvalidConfig(_))
        ));
        assert!(matches!(
            SelectorConfig::new().max_levels(0).validate(),
            Err(SelectorError::InvalidConfig(_))
        ));
        assert!(matches!(
            SelectorConfig::new().strategies(Vec::<String>::new()).validate(),
            Err(SelectorError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_validate_rejects_unknown_strategy() {
        let result = SelectorConfig::new().strategies(["tag_bias", "vibes"]).validate();
        match result {
            Err(SelectorError::UnknownStrategy(name)) => assert_eq!(name, "vibes"),
            other => panic!("Expected unknown strategy error, got {:?}", other),
        }
    }

    #[test]
    fn test_from_json_partial() {
        let config = SelectorConfig::from_json_str(
            r#"{"max_levels": 4, "density_mode": "ratio", "keywords": ["price"]}"#,
        )
        .unwrap();

        assert_eq!(config.max_levels, Some(4));
        assert_eq!(config.density_mode, DensityMode::Ratio);
        assert_eq!(config.keywords, vec!["price"]);
        assert_eq!(config.top_k, 3);
    }

    #[test]
    fn test_from_json_invalid() {
        assert!(matches!(
            SelectorConfig::from_json_str("{not json"),
            Err(SelectorError::ConfigParse(_))
        ));
        assert!(matches!(
            SelectorConfig::from_json_str(r#"{"strategies": ["nope"]}"#),
            Err(SelectorError::UnknownStrategy(_))
        ));
    }

    #[test]
    fn test_from_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scout.json");
        std::fs::write(&path, r#"{"top_k": 7}"#).unwrap();

        let config = SelectorConfig::from_json_file(&path).unwrap();
        assert_eq!(config.top_k, 7);

        let missing = SelectorConfig::from_json_file(dir.path().join("missing.json"));
        assert!(matches!(missing, Err(SelectorError::ConfigRead { .. })));
    }
}

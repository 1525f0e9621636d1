//! Selector engine
//!
//! [`SelectorEngine`] ties the pieces together: parse, score, select, refine,
//! then build the chain, the short selector, the XPath and the ranked
//! alternatives for the chosen element.
//!
//! ```
//! use selector_scout::{SelectorConfig, SelectorEngine};
//!
//! # fn main() -> selector_scout::Result<()> {
//! let engine = SelectorEngine::new(SelectorConfig::default())?;
//! let report = engine
//!     .analyze(r#"<div id="main"><span>Text</span></div>"#, None)
//!     .expect("document has elements");
//! assert_eq!(report.selector.css_selector, "#main");
//! # Ok(())
//! # }
//! ```

use crate::candidates::{RankedSelector, SelectorForm, generate_candidates, rank_candidates};
use crate::chain::{ChainBuilder, short_selector};
use crate::config::SelectorConfig;
use crate::dom::{DomTree, ElementSelector, NodeId, compile_selectors};
use crate::error::Result;
use crate::intent::TagFilter;
use crate::predicates::Predicates;
use crate::scoring::{ScoreBreakdown, StrategyRegistry};
use crate::selection::{Candidate, CandidateSelector, describe_element};
use crate::xpath::build_xpath;
use schemars::JsonSchema;
use scraper::Selector;
use serde::Serialize;

/// Everything derived for the selected element
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct SelectionReport {
    /// Primary selector, short selector and XPath of the refined element
    pub selector: ElementSelector,

    /// Element that won the scoring, before refinement
    pub selected: NodeId,

    /// Shape of the primary selector
    pub form: SelectorForm,

    /// Human-readable explanation of the primary selector
    pub rationale: String,

    /// Ranked alternative selectors, best first
    pub alternatives: Vec<RankedSelector>,

    /// Per-strategy score of the selected element
    pub breakdown: ScoreBreakdown,
}

impl SelectionReport {
    /// Recommended alternative, if any was generated
    pub fn recommended(&self) -> Option<&RankedSelector> {
        self.alternatives.first()
    }
}

/// Configured selector synthesis pipeline
///
/// The engine holds no per-document state: every call parses its own tree,
/// so one engine can serve many documents.
pub struct SelectorEngine {
    config: SelectorConfig,
    predicates: Predicates,
    registry: StrategyRegistry,
    exclusions: Vec<Selector>,
}

impl SelectorEngine {
    /// Build an engine, rejecting invalid configuration
    pub fn new(config: SelectorConfig) -> Result<Self> {
        config.validate()?;
        let registry = StrategyRegistry::from_config(&config)?;
        let exclusions = compile_selectors(&config.exclude_selectors)?;
        let predicates = Predicates::from_config(&config);

        log::debug!(
            "Selector engine ready with strategies {:?}",
            registry.names()
        );

        Ok(Self {
            config,
            predicates,
            registry,
            exclusions,
        })
    }

    pub fn config(&self) -> &SelectorConfig {
        &self.config
    }

    pub fn predicates(&self) -> &Predicates {
        &self.predicates
    }

    pub fn registry(&self) -> &StrategyRegistry {
        &self.registry
    }

    /// Parse `html`, dropping excluded subtrees
    pub fn parse(&self, html: &str) -> DomTree {
        DomTree::parse_excluding(html, &self.exclusions)
    }

    fn chains(&self) -> ChainBuilder<'_> {
        ChainBuilder::new(&self.predicates, self.config.max_levels)
    }

    fn selector(&self) -> CandidateSelector<'_> {
        CandidateSelector::new(&self.registry, &self.predicates)
    }

    /// Highest-scoring element passing `filter`
    pub fn best_candidate(&self, tree: &DomTree, filter: Option<&TagFilter>) -> Option<Candidate> {
        self.selector().best(tree, filter)
    }

    /// Up to `top_k` distinct selectors, best first
    pub fn top_candidates(
        &self,
        tree: &DomTree,
        filter: Option<&TagFilter>,
    ) -> Vec<ElementSelector> {
        self.selector()
            .top_k(tree, filter, self.config.top_k, &self.chains())
            .into_vec()
    }

    pub fn refine(&self, tree: &DomTree, node: NodeId) -> NodeId {
        crate::refine::refine(tree, node)
    }

    /// Selector chain for `node`
    pub fn build_selector(&self, tree: &DomTree, node: NodeId) -> String {
        self.chains().build(tree, node)
    }

    pub fn short_selector(&self, tree: &DomTree, node: NodeId) -> String {
        short_selector(tree, node)
    }

    pub fn xpath(&self, tree: &DomTree, node: NodeId) -> String {
        build_xpath(tree, node)
    }

    /// Ranked alternative selectors for `node`
    pub fn alternatives(&self, tree: &DomTree, node: NodeId) -> Vec<RankedSelector> {
        let candidates = generate_candidates(tree, node, &self.chains(), &self.predicates);
        rank_candidates(&candidates, &self.predicates, self.config.max_alternatives)
    }

    /// Report for an already selected candidate
    pub fn report(&self, tree: &DomTree, candidate: Candidate) -> SelectionReport {
        let target = self.refine(tree, candidate.node);
        let selector = describe_element(tree, target, &self.chains(), candidate.score);
        let form = SelectorForm::of(&selector.css_selector);

        SelectionReport {
            alternatives: self.alternatives(tree, target),
            rationale: form.describe().to_string(),
            form,
            selected: candidate.node,
            breakdown: candidate.breakdown,
            selector,
        }
    }

    /// Run the whole pipeline on `html`
    ///
    /// Returns `None` when nothing can be selected: empty input, a document
    /// without elements, or no element accepted by `filter`.
    pub fn analyze(&self, html: &str, filter: Option<&TagFilter>) -> Option<SelectionReport> {
        if html.trim().is_empty() {
            log::debug!("Empty input, nothing to select");
            return None;
        }
        let tree = self.parse(html);
        let candidate = self.best_candidate(&tree, filter)?;
        Some(self.report(&tree, candidate))
    }

    /// Top-K mode of [`SelectorEngine::analyze`]
    pub fn analyze_top(&self, html: &str, filter: Option<&TagFilter>) -> Vec<ElementSelector> {
        if html.trim().is_empty() {
            return Vec::new();
        }
        let tree = self.parse(html);
        self.top_candidates(&tree, filter)
    }

    /// Primary selector for `html`, if any
    pub fn select(&self, html: &str, filter: Option<&TagFilter>) -> Option<String> {
        self.analyze(html, filter)
            .map(|report| report.selector.css_selector)
    }
}

impl std::fmt::Debug for SelectorEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectorEngine")
            .field("config", &self.config)
            .field("strategies", &self.registry.names())
            .finish()
    }
}

//! # selector-scout
//!
//! A Rust library that finds the element of an HTML fragment a query is most
//! likely about, and derives a short, stable CSS selector (and an XPath) for it.
//!
//! ## Features
//!
//! - **Composable scoring**: every heuristic is a [`ScoringStrategy`]; enable, disable or add your own
//! - **Intent filters**: narrow the search to links, headings, images, text or buttons
//! - **Selector synthesis**: descendant chains that skip generic classes and dynamic ids
//! - **Alternatives**: ranked candidate selectors with a human-readable rationale
//! - **XPath**: positional paths as a fallback locator
//!
//! ## Command Line
//!
//! ```bash
//! # Main content of a page
//! selector-scout page.html
//!
//! # The link a question is about, as JSON
//! echo '<h2><a href="/x">Title</a></h2>' | selector-scout --question "which link?" --json
//! ```
//!
//! ## Library Usage
//!
//! ### Single best selector
//!
//! ```rust
//! use selector_scout::{SelectorConfig, SelectorEngine};
//!
//! # fn main() -> selector_scout::Result<()> {
//! let engine = SelectorEngine::new(SelectorConfig::default())?;
//!
//! let html = r#"<main class="page"><div id="story"><p>Lead paragraph</p></div></main>"#;
//! if let Some(report) = engine.analyze(html, None) {
//!     println!("{} ({})", report.selector.css_selector, report.rationale);
//!     println!("xpath: {:?}", report.selector.xpath);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ### Restricting to an intent
//!
//! ```rust
//! use selector_scout::{IntentLabel, SelectorConfig, SelectorEngine};
//!
//! # fn main() -> selector_scout::Result<()> {
//! let engine = SelectorEngine::new(SelectorConfig::default())?;
//! let links = IntentLabel::Link.filter();
//!
//! let html = r#"<article><p>Long text about things.</p><a href="/more">More</a></article>"#;
//! let selector = engine.select(html, Some(&links));
//! assert_eq!(selector.as_deref(), Some("a"));
//! # Ok(())
//! # }
//! ```
//!
//! ### Custom strategies
//!
//! ```rust
//! use selector_scout::{NodeId, ScoringContext, ScoringStrategy, StrategyRegistry};
//! use selector_scout::config::DensityMode;
//!
//! struct PreferForms;
//!
//! impl ScoringStrategy for PreferForms {
//!     fn name(&self) -> &str {
//!         "prefer_forms"
//!     }
//!
//!     fn score(&self, ctx: &ScoringContext<'_>, node: NodeId) -> f64 {
//!         if ctx.tree.node(node).is_tag("form") { 10.0 } else { 0.0 }
//!     }
//! }
//!
//! let mut registry = StrategyRegistry::with_defaults(DensityMode::Thresholds);
//! registry.register(Box::new(PreferForms));
//! assert!(registry.names().contains(&"prefer_forms"));
//! ```
//!
//! ## Module Overview
//!
//! - [`dom`]: element tree parsed from HTML, and selector records
//! - [`scoring`]: the strategy trait, registry and built-in heuristics
//! - [`selection`]: single-best, ranked and top-K selection
//! - [`chain`]: selector chains and short selectors
//! - [`candidates`]: alternative selectors and their ranking
//! - [`engine`]: the full pipeline - **start here**
//! - [`history`]: append-only interaction log
//! - [`config`], [`error`]: configuration and error types

pub mod candidates;
pub mod chain;
pub mod config;
pub mod dom;
pub mod engine;
pub mod error;
pub mod history;
pub mod intent;
pub mod predicates;
pub mod refine;
pub mod scoring;
pub mod selection;
pub mod xpath;

pub use candidates::{RankedSelector, SelectorForm};
pub use chain::{ChainBuilder, SelectorChain};
pub use config::{DensityMode, SelectorConfig};
pub use dom::{DomTree, ElementNode, ElementSelector, NodeId, SelectorMap};
pub use engine::{SelectionReport, SelectorEngine};
pub use error::{Result, SelectorError, ensure_non_empty};
pub use history::{InteractionKind, InteractionLog, InteractionRecord};
pub use intent::{IntentLabel, TagFilter};
pub use predicates::{Predicates, is_dynamic_id};
pub use scoring::{ScoreBreakdown, ScoringContext, ScoringStrategy, StrategyRegistry};
pub use selection::{Candidate, CandidateSelector};

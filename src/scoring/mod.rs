//! Element scoring
//!
//! Each heuristic is an independent [`ScoringStrategy`]; a [`StrategyRegistry`]
//! holds the enabled ones in evaluation order and sums their contributions
//! into a [`ScoreBreakdown`]. New signals are added by registering another
//! strategy, without touching the tree walk.

pub mod strategies;

pub use strategies::{
    ClassBonusStrategy, DepthPenaltyStrategy, IdBonusStrategy, KeywordOverlayStrategy,
    SemanticBiasStrategy, StructuralNoiseStrategy, TagBiasStrategy, TextDensityStrategy,
};

use crate::config::{DensityMode, SelectorConfig};
use crate::dom::{DomTree, NodeId, TreeMetrics};
use crate::error::{Result, SelectorError};
use crate::predicates::Predicates;
use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Everything a strategy may look at while scoring one element
///
/// Built once per tree walk; `metrics` holds the structural figures so
/// strategies never re-walk a subtree.
#[derive(Debug, Clone)]
pub struct ScoringContext<'a> {
    pub tree: &'a DomTree,
    pub predicates: &'a Predicates,
    pub metrics: TreeMetrics,
}

impl<'a> ScoringContext<'a> {
    pub fn new(tree: &'a DomTree, predicates: &'a Predicates) -> Self {
        Self {
            tree,
            predicates,
            metrics: TreeMetrics::new(tree),
        }
    }
}

/// A single scoring heuristic
pub trait ScoringStrategy: Send + Sync {
    /// Unique name of the strategy (e.g., "tag_bias")
    fn name(&self) -> &str;

    /// Contribution of this strategy to the element's aggregate score
    fn score(&self, ctx: &ScoringContext<'_>, node: NodeId) -> f64;
}

/// One strategy's contribution to an element's score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct StrategyScore {
    pub strategy: String,
    pub score: f64,
}

/// Per-strategy contributions and their total for one element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ScoreBreakdown {
    pub node: NodeId,
    pub contributions: Vec<StrategyScore>,
    pub total: f64,
}

impl ScoreBreakdown {
    /// Contribution of a named strategy, if it ran
    pub fn contribution(&self, strategy: &str) -> Option<f64> {
        self.contributions
            .iter()
            .find(|c| c.strategy == strategy)
            .map(|c| c.score)
    }
}

/// Registry of enabled strategies, in evaluation order
#[derive(Default)]
pub struct StrategyRegistry {
    strategies: IndexMap<String, Box<dyn ScoringStrategy>>,
}

impl StrategyRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            strategies: IndexMap::new(),
        }
    }

    /// Registry with every built-in strategy
    pub fn with_defaults(density_mode: DensityMode) -> Self {
        let names: Vec<String> = strategies::ALL_STRATEGIES
            .iter()
            .map(|n| n.to_string())
            .collect();
        // Built-in names always resolve.
        Self::from_names(&names, density_mode).unwrap_or_default()
    }

    /// Registry with the strategies named in a configuration
    pub fn from_config(config: &SelectorConfig) -> Result<Self> {
        Self::from_names(&config.strategies, config.density_mode)
    }

    /// Build a registry from strategy names
    pub fn from_names(names: &[String], density_mode: DensityMode) -> Result<Self> {
        let mut registry = Self::new();
        for name in names {
            let strategy = strategies::create(name, density_mode)
                .ok_or_else(|| SelectorError::UnknownStrategy(name.clone()))?;
            registry.register(strategy);
        }
        Ok(registry)
    }

    /// Register a strategy; a strategy with the same name is replaced in place
    pub fn register(&mut self, strategy: Box<dyn ScoringStrategy>) {
        self.strategies.insert(strategy.name().to_string(), strategy);
    }

    /// Remove a strategy by name
    pub fn remove(&mut self, name: &str) -> bool {
        self.strategies.shift_remove(name).is_some()
    }

    /// Names of the registered strategies, in evaluation order
    pub fn names(&self) -> Vec<&str> {
        self.strategies.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }

    /// Score an element with every registered strategy
    pub fn score(&self, ctx: &ScoringContext<'_>, node: NodeId) -> ScoreBreakdown {
        let contributions: Vec<StrategyScore> = self
            .strategies
            .iter()
            .map(|(name, strategy)| StrategyScore {
                strategy: name.clone(),
                score: strategy.score(ctx, node),
            })
            .collect();
        let total = contributions.iter().map(|c| c.score).sum();

        ScoreBreakdown {
            node,
            contributions,
            total,
        }
    }

    /// Aggregate score without the per-strategy detail
    pub fn total(&self, ctx: &ScoringContext<'_>, node: NodeId) -> f64 {
        self.strategies
            .values()
            .map(|strategy| strategy.score(ctx, node))
            .sum()
    }
}

impl std::fmt::Debug for StrategyRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StrategyRegistry")
            .field("strategies", &self.names())
            .finish()
    }
}

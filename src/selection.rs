//! Candidate selection over a scored tree

use crate::chain::{ChainBuilder, short_selector};
use crate::dom::{DomTree, ElementSelector, NodeId, SelectorMap};
use crate::intent::TagFilter;
use crate::predicates::Predicates;
use crate::refine::refine;
use crate::scoring::{ScoreBreakdown, ScoringContext, StrategyRegistry};
use crate::xpath::build_xpath;

/// A scored element
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub node: NodeId,
    pub score: f64,
    pub breakdown: ScoreBreakdown,
}

/// Walks a tree and picks the highest-scoring elements
pub struct CandidateSelector<'a> {
    registry: &'a StrategyRegistry,
    predicates: &'a Predicates,
}

impl<'a> CandidateSelector<'a> {
    pub fn new(registry: &'a StrategyRegistry, predicates: &'a Predicates) -> Self {
        Self {
            registry,
            predicates,
        }
    }

    /// Every element passing `filter`, scored, in document order
    pub fn scored(&self, tree: &DomTree, filter: Option<&TagFilter>) -> Vec<Candidate> {
        let ctx = ScoringContext::new(tree, self.predicates);

        tree.elements()
            .into_iter()
            .filter(|id| filter.is_none_or(|f| f.accepts(&tree.node(*id).tag_name)))
            .map(|id| {
                let breakdown = self.registry.score(&ctx, id);
                log::trace!(
                    "{} scored {:.2} {:?}",
                    tree.node(id).to_simple_string(),
                    breakdown.total,
                    breakdown.contributions
                );
                Candidate {
                    node: id,
                    score: breakdown.total,
                    breakdown,
                }
            })
            .collect()
    }

    /// Highest-scoring element; the first one in document order wins ties
    pub fn best(&self, tree: &DomTree, filter: Option<&TagFilter>) -> Option<Candidate> {
        let mut best: Option<Candidate> = None;

        for candidate in self.scored(tree, filter) {
            if best.as_ref().is_none_or(|b| candidate.score > b.score) {
                best = Some(candidate);
            }
        }

        match &best {
            Some(candidate) => log::debug!(
                "Best candidate {} with score {:.2}",
                tree.node(candidate.node).to_simple_string(),
                candidate.score
            ),
            None => log::debug!("No candidate element found"),
        }
        best
    }

    /// All candidates, best first, ties kept in document order
    pub fn ranked(&self, tree: &DomTree, filter: Option<&TagFilter>) -> Vec<Candidate> {
        let mut candidates = self.scored(tree, filter);
        candidates.sort_by(|a, b| b.score.total_cmp(&a.score));
        candidates
    }

    /// Up to `k` distinct selectors, taken from the ranked candidates
    ///
    /// Each candidate is refined before its chain is built, and candidates
    /// whose chain was already produced are skipped.
    pub fn top_k(
        &self,
        tree: &DomTree,
        filter: Option<&TagFilter>,
        k: usize,
        chains: &ChainBuilder<'_>,
    ) -> SelectorMap {
        let mut selectors = SelectorMap::new();

        for candidate in self.ranked(tree, filter) {
            if selectors.len() >= k {
                break;
            }
            let target = refine(tree, candidate.node);
            let selector = describe_element(tree, target, chains, candidate.score);
            if !selectors.register(selector) {
                log::trace!("Skipping duplicate selector for node {}", target.index());
            }
        }

        log::debug!("Collected {} distinct selectors (k = {})", selectors.len(), k);
        selectors
    }
}

/// Full selector record for `node`
pub fn describe_element(
    tree: &DomTree,
    node: NodeId,
    chains: &ChainBuilder<'_>,
    score: f64,
) -> ElementSelector {
    let element = tree.node(node);
    let mut selector = ElementSelector::new(chains.build(tree, node), &element.tag_name, node)
        .with_short_selector(short_selector(tree, node))
        .with_xpath(build_xpath(tree, node))
        .with_score(score);

    if let Some(id) = element.id() {
        selector = selector.with_id(id);
    }
    let text = tree.text_content(node);
    if !text.trim().is_empty() {
        selector = selector.with_text(&text);
    }
    selector
}

//! Alternative selectors for one element and their ranking
//!
//! Ranking is purely textual: once generated, candidates are compared
//! without going back to the tree.

use crate::chain::ChainBuilder;
use crate::dom::{DomTree, NodeId};
use crate::predicates::Predicates;
use regex::Regex;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

static CLASS_TOKEN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\.([\w-]+)").unwrap());

/// Shape of a selector, used to explain it to a human
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum SelectorForm {
    IdBased,
    ClassOnly,
    Combinator,
    TagBased,
}

impl SelectorForm {
    pub fn of(selector: &str) -> Self {
        if selector.starts_with('#') {
            SelectorForm::IdBased
        } else if selector.starts_with('.') && !selector.contains(' ') {
            SelectorForm::ClassOnly
        } else if selector.contains(' ') {
            SelectorForm::Combinator
        } else {
            SelectorForm::TagBased
        }
    }

    pub fn describe(self) -> &'static str {
        match self {
            SelectorForm::IdBased => "Based on the element's unique identifier; very reliable.",
            SelectorForm::ClassOnly => {
                "Uses the class names only; fast but may match several elements."
            }
            SelectorForm::Combinator => {
                "Combines ancestors and the element to target the structure precisely."
            }
            SelectorForm::TagBased => "Simple selector based on the tag and its classes.",
        }
    }
}

/// A candidate selector with its heuristic rank
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RankedSelector {
    pub selector: String,
    pub rank: f64,
    pub form: SelectorForm,
    pub rationale: String,
}

impl RankedSelector {
    pub fn new(selector: impl Into<String>, predicates: &Predicates) -> Self {
        let selector = selector.into();
        let form = SelectorForm::of(&selector);
        Self {
            rank: rank_selector(&selector, predicates),
            rationale: form.describe().to_string(),
            form,
            selector,
        }
    }
}

/// Distinct selector strings for `node`, in generation order
///
/// Generated from: the bare tag, tag with own non-generic classes, those
/// classes alone, the parent chain plus tag, the parent's classes plus tag,
/// the parent chain plus tag and classes, and the id when it is stable.
pub fn generate_candidates(
    tree: &DomTree,
    node: NodeId,
    chains: &ChainBuilder<'_>,
    predicates: &Predicates,
) -> Vec<String> {
    let element = tree.node(node);
    let tag = element.tag_name.as_str();
    let classes = chains.class_suffix(tree, node);

    let mut candidates = vec![tag.to_string()];
    if !classes.is_empty() {
        candidates.push(format!("{}{}", tag, classes));
        candidates.push(classes.clone());
    }

    if let Some(parent) = tree.element_parent(node) {
        let parent_selector = chains.build(tree, parent);
        candidates.push(format!("{} {}", parent_selector, tag));

        let parent_classes = chains.class_suffix(tree, parent);
        if !parent_classes.is_empty() {
            candidates.push(format!("{} {}", parent_classes, tag));
        }

        candidates.push(format!("{} {}{}", parent_selector, tag, classes));
    }

    if let Some(id) = element.id().filter(|id| predicates.is_stable_id(Some(id))) {
        candidates.push(format!("#{}", id));
    }

    let mut unique: Vec<String> = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        if !candidate.is_empty() && !unique.contains(&candidate) {
            unique.push(candidate);
        }
    }
    unique
}

/// Textual rank of a selector; higher is better
///
/// `#id` +100, leading letter +5, each class token -8 if generic else +2,
/// minus one per space, minus a tenth of the length.
pub fn rank_selector(selector: &str, predicates: &Predicates) -> f64 {
    let mut score = 0.0;
    if selector.starts_with('#') {
        score += 100.0;
    }
    if selector.chars().next().is_some_and(char::is_alphabetic) {
        score += 5.0;
    }
    for token in CLASS_TOKEN.captures_iter(selector) {
        if predicates.is_generic_class(&token[1]) {
            score -= 8.0;
        } else {
            score += 2.0;
        }
    }
    // Context is credited then charged twice: each space nets -1.
    let spaces = selector.matches(' ').count() as f64;
    score += spaces;
    score -= 2.0 * spaces;
    score -= selector.chars().count() as f64 / 10.0;
    score
}

/// Rank candidates best first (stable on generation order) and keep `limit`
pub fn rank_candidates(
    candidates: &[String],
    predicates: &Predicates,
    limit: usize,
) -> Vec<RankedSelector> {
    let mut ranked: Vec<RankedSelector> = candidates
        .iter()
        .map(|candidate| RankedSelector::new(candidate.as_str(), predicates))
        .collect();
    ranked.sort_by(|a, b| b.rank.total_cmp(&a.rank));
    ranked.truncate(limit);
    ranked
}

use crate::config::DensityMode;
use crate::dom::NodeId;
use crate::predicates::is_dynamic_id;
use crate::scoring::{ScoringContext, ScoringStrategy};

pub const TAG_BIAS: &str = "tag_bias";
pub const SEMANTIC_BIAS: &str = "semantic_bias";
pub const ID_BONUS: &str = "id_bonus";
pub const CLASS_BONUS: &str = "class_bonus";
pub const KEYWORD_OVERLAY: &str = "keyword_overlay";
pub const DEPTH_PENALTY: &str = "depth_penalty";
pub const TEXT_DENSITY: &str = "text_density";
pub const STRUCTURAL_NOISE: &str = "structural_noise";

/// Every built-in strategy, in default evaluation order
pub const ALL_STRATEGIES: &[&str] = &[
    TAG_BIAS,
    SEMANTIC_BIAS,
    ID_BONUS,
    CLASS_BONUS,
    KEYWORD_OVERLAY,
    DEPTH_PENALTY,
    TEXT_DENSITY,
    STRUCTURAL_NOISE,
];

const INLINE_TAGS: &[&str] = &["span", "i", "b", "em", "strong", "small", "label"];

const STRUCTURAL_TAGS: &[&str] = &[
    "div", "section", "article", "nav", "main", "h1", "h2", "h3", "h4", "h5", "h6", "a", "p", "ul",
    "ol", "li",
];

const NAV_FORM_TAGS: &[&str] = &["a", "input", "button", "select", "option", "form"];

/// Instantiate a built-in strategy by name
pub fn create(name: &str, density_mode: DensityMode) -> Option<Box<dyn ScoringStrategy>> {
    let strategy: Box<dyn ScoringStrategy> = match name {
        TAG_BIAS => Box::new(TagBiasStrategy),
        SEMANTIC_BIAS => Box::new(SemanticBiasStrategy),
        ID_BONUS => Box::new(IdBonusStrategy),
        CLASS_BONUS => Box::new(ClassBonusStrategy),
        KEYWORD_OVERLAY => Box::new(KeywordOverlayStrategy),
        DEPTH_PENALTY => Box::new(DepthPenaltyStrategy),
        TEXT_DENSITY => Box::new(TextDensityStrategy::new(density_mode)),
        STRUCTURAL_NOISE => Box::new(StructuralNoiseStrategy),
        _ => return None,
    };
    Some(strategy)
}

/// Inline tags: -3, structural tags: +2
#[derive(Debug, Default, Clone, Copy)]
pub struct TagBiasStrategy;

impl ScoringStrategy for TagBiasStrategy {
    fn name(&self) -> &str {
        TAG_BIAS
    }

    fn score(&self, ctx: &ScoringContext<'_>, node: NodeId) -> f64 {
        let tag = ctx.tree.node(node).tag_name.as_str();
        let mut score = 0.0;
        if INLINE_TAGS.contains(&tag) {
            score -= 3.0;
        }
        if STRUCTURAL_TAGS.contains(&tag) {
            score += 2.0;
        }
        score
    }
}

/// HTML5 sectioning: article/main +5, section +2, page chrome -5
#[derive(Debug, Default, Clone, Copy)]
pub struct SemanticBiasStrategy;

impl ScoringStrategy for SemanticBiasStrategy {
    fn name(&self) -> &str {
        SEMANTIC_BIAS
    }

    fn score(&self, ctx: &ScoringContext<'_>, node: NodeId) -> f64 {
        match ctx.tree.node(node).tag_name.as_str() {
            "article" | "main" => 5.0,
            "section" => 2.0,
            "nav" | "header" | "footer" | "aside" => -5.0,
            _ => 0.0,
        }
    }
}

/// Stable id: +5 (+1 with a keyword); dynamic id: -1
#[derive(Debug, Default, Clone, Copy)]
pub struct IdBonusStrategy;

impl ScoringStrategy for IdBonusStrategy {
    fn name(&self) -> &str {
        ID_BONUS
    }

    fn score(&self, ctx: &ScoringContext<'_>, node: NodeId) -> f64 {
        let Some(id) = ctx.tree.node(node).id() else {
            return 0.0;
        };
        if is_dynamic_id(id) {
            return -1.0;
        }
        if ctx.predicates.has_keyword(id) { 6.0 } else { 5.0 }
    }
}

/// Per class: generic -2, otherwise +3 (+1 with a keyword)
#[derive(Debug, Default, Clone, Copy)]
pub struct ClassBonusStrategy;

impl ScoringStrategy for ClassBonusStrategy {
    fn name(&self) -> &str {
        CLASS_BONUS
    }

    fn score(&self, ctx: &ScoringContext<'_>, node: NodeId) -> f64 {
        ctx.tree
            .node(node)
            .classes()
            .map(|class| {
                if ctx.predicates.is_generic_class(class) {
                    -2.0
                } else if ctx.predicates.has_keyword(class) {
                    4.0
                } else {
                    3.0
                }
            })
            .sum()
    }
}

/// Per keyword, checked separately against the joined class string and the
/// id: +5 when contained, a further +3 on an exact match
#[derive(Debug, Default, Clone, Copy)]
pub struct KeywordOverlayStrategy;

impl ScoringStrategy for KeywordOverlayStrategy {
    fn name(&self) -> &str {
        KEYWORD_OVERLAY
    }

    fn score(&self, ctx: &ScoringContext<'_>, node: NodeId) -> f64 {
        let element = ctx.tree.node(node);
        let classes: Vec<String> = element.classes().map(str::to_lowercase).collect();
        let joined = classes.join(" ");
        let id = element.id().map(str::to_lowercase).unwrap_or_default();

        let mut score = 0.0;
        for keyword in ctx.predicates.keywords() {
            if joined.contains(keyword.as_str()) {
                score += 5.0;
                if classes.iter().any(|c| c == keyword) {
                    score += 3.0;
                }
            }
            if id.contains(keyword.as_str()) {
                score += 5.0;
                if id == *keyword {
                    score += 3.0;
                }
            }
        }
        score
    }
}

/// Minus one per element ancestor
#[derive(Debug, Default, Clone, Copy)]
pub struct DepthPenaltyStrategy;

impl ScoringStrategy for DepthPenaltyStrategy {
    fn name(&self) -> &str {
        DEPTH_PENALTY
    }

    fn score(&self, ctx: &ScoringContext<'_>, node: NodeId) -> f64 {
        -(ctx.metrics.depth(node) as f64)
    }
}

/// Rewards elements carrying their own text
///
/// With `t` the trimmed length of the element's direct text:
/// - [`DensityMode::Thresholds`]: `t > 40` → +2, else `t > 15` → +1; then
///   `t / (descendant elements + 1)`: `> 30` → +2, else `> 10` → +1; headings
///   get a flat +2.
/// - [`DensityMode::Ratio`]: `t / h * 10` with `h` the serialized length of
///   the element; 0 when there is no direct text.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextDensityStrategy {
    mode: DensityMode,
}

impl TextDensityStrategy {
    pub fn new(mode: DensityMode) -> Self {
        Self { mode }
    }

    fn thresholds(&self, ctx: &ScoringContext<'_>, node: NodeId, text_len: usize) -> f64 {
        let mut score = 0.0;
        if text_len > 40 {
            score += 2.0;
        } else if text_len > 15 {
            score += 1.0;
        }

        let descendants = ctx.metrics.descendant_count(node);
        let density = text_len as f64 / (descendants + 1) as f64;
        if density > 30.0 {
            score += 2.0;
        } else if density > 10.0 {
            score += 1.0;
        }

        if ctx.tree.node(node).is_heading() {
            score += 2.0;
        }
        score
    }

    fn ratio(&self, ctx: &ScoringContext<'_>, node: NodeId, text_len: usize) -> f64 {
        if text_len == 0 {
            return 0.0;
        }
        let html_len = ctx.metrics.html_len(node);
        if html_len == 0 {
            return 0.0;
        }
        text_len as f64 / html_len as f64 * 10.0
    }
}

impl ScoringStrategy for TextDensityStrategy {
    fn name(&self) -> &str {
        TEXT_DENSITY
    }

    fn score(&self, ctx: &ScoringContext<'_>, node: NodeId) -> f64 {
        let text_len = ctx.tree.direct_text(node).trim().chars().count();
        match self.mode {
            DensityMode::Thresholds => self.thresholds(ctx, node, text_len),
            DensityMode::Ratio => self.ratio(ctx, node, text_len),
        }
    }
}

/// Penalises elements whose direct children are mostly links or form
/// controls: `-10 * share of such children`
#[derive(Debug, Default, Clone, Copy)]
pub struct StructuralNoiseStrategy;

impl ScoringStrategy for StructuralNoiseStrategy {
    fn name(&self) -> &str {
        STRUCTURAL_NOISE
    }

    fn score(&self, ctx: &ScoringContext<'_>, node: NodeId) -> f64 {
        let children: Vec<&str> = ctx
            .tree
            .children(node)
            .map(|child| ctx.tree.node(child).tag_name.as_str())
            .collect();
        if children.is_empty() {
            return 0.0;
        }
        let noisy = children.iter().filter(|tag| NAV_FORM_TAGS.contains(*tag)).count();
        -(noisy as f64 / children.len() as f64) * 10.0
    }
}

use selector_scout::candidates::{generate_candidates, rank_candidates};
use selector_scout::{
    ChainBuilder, DomTree, InteractionKind, InteractionLog, IntentLabel, Predicates,
    SelectorConfig, SelectorEngine, TagFilter, is_dynamic_id,
};

const PRODUCT_PAGE: &str = r#"
<header class="site-header"><nav class="menu"><a href="/">Home</a><a href="/shop">Shop</a></nav></header>
<main id="content">
  <section class="product-card">
    <h1 class="title">Walnut desk</h1>
    <div class="wrapper"><p class="description">Solid walnut desk with two drawers and cable management built in.</p></div>
    <ul class="specs"><li class="spec-item">120 cm</li><li class="spec-item">Oil finish</li><li class="spec-item">Made to order</li></ul>
    <button id="add-to-cart" class="btn">Add to cart</button>
    <div class="related"><a class="related-link" href="/chair">Matching chair</a></div>
  </section>
</main>
<footer class="footer"><a href="/legal">Legal</a></footer>
"#;

fn engine() -> SelectorEngine {
    SelectorEngine::new(SelectorConfig::default()).expect("Default configuration is valid")
}

#[test]
fn test_dynamic_id_examples() {
    assert!(is_dynamic_id("item12345"));
    assert!(!is_dynamic_id("header"));
    assert!(is_dynamic_id(&"a".repeat(31)));
    assert!(!is_dynamic_id(&"a".repeat(30)));
}

#[test]
fn test_stable_id_chain_is_only_the_id() {
    let tree = DomTree::parse(PRODUCT_PAGE);
    let predicates = Predicates::default();
    let chains = ChainBuilder::new(&predicates, None);

    for node in tree.elements() {
        if let Some(id) = tree.node(node).id().filter(|id| !is_dynamic_id(id)) {
            assert_eq!(chains.build(&tree, node), format!("#{}", id));
        }
    }
}

#[test]
fn test_candidates_unique_and_id_first() {
    let tree = DomTree::parse(PRODUCT_PAGE);
    let predicates = Predicates::default();
    let chains = ChainBuilder::new(&predicates, None);

    for node in tree.elements() {
        let candidates = generate_candidates(&tree, node, &chains, &predicates);
        let mut seen = std::collections::HashSet::new();
        assert!(candidates.iter().all(|c| seen.insert(c.clone())));

        let ranked = rank_candidates(&candidates, &predicates, candidates.len());
        if let Some(position) = ranked.iter().position(|r| r.selector.starts_with('#')) {
            assert_eq!(position, 0);
        }
    }
}

#[test]
fn test_main_content_selection() {
    let engine = engine();
    let tree = engine.parse(PRODUCT_PAGE);
    let report = engine
        .analyze(PRODUCT_PAGE, None)
        .expect("Page has candidates");

    // <main> wins, then narrows to the only link it contains
    assert!(tree.node(report.selected).is_tag("main"));
    assert_eq!(
        report.selector.css_selector,
        "#content section.product-card .related a.related-link"
    );
    assert!(report.alternatives.len() <= 3);
}

#[test]
fn test_links_filter_returns_only_anchors() {
    let engine = engine();
    let links = IntentLabel::Link.filter();

    let report = engine
        .analyze(PRODUCT_PAGE, Some(&links))
        .expect("Page has links");
    assert_eq!(report.selector.tag_name, "a");

    for selector in engine.analyze_top(PRODUCT_PAGE, Some(&links)) {
        assert_eq!(selector.tag_name, "a");
    }
}

#[test]
fn test_question_resolves_filter() {
    let engine = engine();
    let intent =
        IntentLabel::from_question("Quel est le titre du produit ?").expect("Heading intent");
    let report = engine
        .analyze(PRODUCT_PAGE, Some(&intent.filter()))
        .expect("Page has a heading");

    assert_eq!(report.selector.css_selector, "#content section.product-card h1.title");
    assert_eq!(report.selector.text.as_deref(), Some("Walnut desk"));
}

#[test]
fn test_unknown_label_means_no_filter() {
    assert!(TagFilter::from_label("price").is_none());
}

#[test]
fn test_pipeline_is_deterministic() {
    let engine = engine();
    let runs: Vec<String> = (0..3)
        .map(|_| serde_json::to_string(&engine.analyze(PRODUCT_PAGE, None)).expect("Serializable"))
        .collect();

    assert!(runs.windows(2).all(|pair| pair[0] == pair[1]));
}

#[test]
fn test_id_end_to_end() {
    let selector = engine().select(r#"<div id="main"><span>Text</span></div>"#, None);
    assert_eq!(selector.as_deref(), Some("#main"));
}

#[test]
fn test_single_anchor_refinement_end_to_end() {
    let engine = engine();
    let headings = IntentLabel::Heading.filter();
    let report = engine
        .analyze(r##"<h2><a class="wrapper" href="#">T</a></h2>"##, Some(&headings))
        .expect("Heading present");

    assert_eq!(report.selector.tag_name, "a");
    assert_eq!(report.selector.css_selector, "a");
    assert_eq!(report.selector.xpath.as_deref(), Some("/h2[1]/a[1]"));
}

#[test]
fn test_xpath_of_second_list_item() {
    let engine = engine();
    let tree = engine.parse("<ul><li>one</li><li>two</li><li>three</li></ul>");
    let second = tree.elements()[2];

    assert!(engine.xpath(&tree, second).ends_with("/li[2]"));
}

#[test]
fn test_full_document_input() {
    let html = r#"<!DOCTYPE html>
<html><head><title>Journal</title></head>
<body><article class="content"><p>An article paragraph that is comfortably longer than forty characters.</p></article></body></html>"#;

    let report = engine().analyze(html, None).expect("Document has content");
    assert_eq!(report.selector.css_selector, "article.content");
    assert_eq!(report.selector.xpath.as_deref(), Some("/html[1]/body[1]/article[1]"));
}

#[test]
fn test_malformed_markup_does_not_panic() {
    let engine = engine();
    for html in ["<div><p>unclosed", "</span></div>", "<<<>>>", "<a href='x'>ok</a><div"] {
        let _ = engine.analyze(html, None);
        let _ = engine.analyze_top(html, None);
    }
}

#[test]
fn test_history_records_report() {
    let dir = tempfile::tempdir().expect("Temporary directory");
    let log = InteractionLog::new(dir.path().join("history.jsonl"));
    let report = engine()
        .analyze(r#"<div id="main"></div>"#, None)
        .expect("Element present");

    log.record(InteractionKind::Response, serde_json::json!(report))
        .expect("History writable");

    let records = log.load().expect("History readable");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].content["selector"]["css_selector"], "#main");
}

#[test]
fn test_deeply_nested_markup() {
    let depth = 3000;
    let html = format!("{}x{}", "<div>".repeat(depth), "</div>".repeat(depth));

    let report = engine().analyze(&html, None).expect("Nested divs parsed");
    assert_eq!(report.selector.css_selector, "div");
    assert_eq!(report.selector.xpath.as_deref(), Some("/div[1]"));

    let content = SelectorEngine::new(SelectorConfig::content_finder())
        .expect("Preset configuration is valid");
    let innermost = content.analyze(&html, None).expect("Nested divs parsed");
    assert_eq!(innermost.selector.css_selector, "div");
    assert_eq!(innermost.selector.xpath, Some("/div[1]".repeat(depth)));
    assert_eq!(innermost.selector.text.as_deref(), Some("x"));

    let top = content.analyze_top(&html, None);
    assert_eq!(top.len(), 1);
    assert_eq!(top[0].css_selector, "div");
}

#[test]
fn test_table_row_fragment() {
    let engine = engine();
    let row = r#"<tr class="line"><td class="price">9.99</td><td class="name">Desk</td></tr>"#;

    assert_eq!(engine.select(row, None).as_deref(), Some("tr.line"));

    let cells = TagFilter::new(["td"]);
    let report = engine.analyze(row, Some(&cells)).expect("Row has cells");
    assert_eq!(report.selector.css_selector, "tr.line td.price");
    assert_eq!(report.selector.xpath.as_deref(), Some("/tr[1]/td[1]"));

    let cell = r#"<td class="price">9.99</td>"#;
    assert_eq!(engine.select(cell, None).as_deref(), Some("td.price"));
}

#[test]
fn test_price_question_searches_everything() {
    let engine = engine();
    let filter =
        IntentLabel::from_question("Quel est le prix de l'image ?").map(IntentLabel::filter);
    assert!(filter.is_none());

    let report = engine
        .analyze(PRODUCT_PAGE, filter.as_ref())
        .expect("Page has candidates");
    assert!(engine.parse(PRODUCT_PAGE).node(report.selected).is_tag("main"));
}

//! selector-scout command line
//!
//! Reads HTML from a file or stdin and prints the selector of the most
//! relevant element, optionally restricted to an intent.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use selector_scout::{
    InteractionKind, InteractionLog, IntentLabel, SelectionReport, SelectorConfig, SelectorEngine,
    SelectorError, TagFilter, ensure_non_empty,
};
use serde_json::json;
use std::io::Read;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Profile {
    /// All strategies, threshold text density
    Default,
    /// Tag, id and class bonuses only
    Classic,
    /// Main-content finder: keywords, semantics, ratio density, noise
    Content,
}

impl Profile {
    fn config(self) -> SelectorConfig {
        match self {
            Profile::Default => SelectorConfig::default(),
            Profile::Classic => SelectorConfig::classic(),
            Profile::Content => SelectorConfig::content_finder(),
        }
    }
}

#[derive(Parser)]
#[command(name = "selector-scout")]
#[command(version)]
#[command(about = "Derive a stable CSS selector for the most relevant element of an HTML fragment", long_about = None)]
struct Cli {
    /// HTML file to analyse (default: stdin)
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Intent label restricting the search (link, heading, image, text, button)
    #[arg(long, short = 'i', value_name = "LABEL")]
    intent: Option<String>,

    /// Free-form question; its intent is guessed from keywords
    #[arg(long, short = 'q', value_name = "TEXT", conflicts_with = "intent")]
    question: Option<String>,

    /// Return up to N distinct selectors instead of a single report
    #[arg(long, short = 'k', value_name = "N")]
    top_k: Option<usize>,

    /// Maximum number of elements in a selector chain
    #[arg(long, value_name = "N")]
    max_levels: Option<usize>,

    /// JSON configuration file (overrides the profile)
    #[arg(long, short = 'c', value_name = "PATH")]
    config: Option<PathBuf>,

    /// Built-in configuration profile
    #[arg(long, short = 'p', value_enum, default_value = "default")]
    profile: Profile,

    /// CSS selector whose matches are ignored (repeatable)
    #[arg(long, value_name = "SELECTOR")]
    exclude: Vec<String>,

    /// Extra content keyword (repeatable)
    #[arg(long, value_name = "WORD")]
    keyword: Vec<String>,

    /// Print JSON instead of text
    #[arg(long)]
    json: bool,

    /// Print the JSON Schema of the report and exit
    #[arg(long)]
    schema: bool,

    /// Append questions and answers to this JSON-lines file
    #[arg(long, value_name = "PATH")]
    history: Option<PathBuf>,

    /// Verbose logging
    #[arg(long, short = 'v')]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    if cli.schema {
        let schema = schemars::schema_for!(SelectionReport);
        println!("{}", serde_json::to_string_pretty(&schema)?);
        return Ok(());
    }

    let html = read_input(cli.input.as_ref())?;
    if let Err(e @ SelectorError::EmptyInput) = ensure_non_empty(&html) {
        eprintln!("error: {}", e);
        std::process::exit(2);
    }

    let engine = SelectorEngine::new(build_config(&cli)?).context("Invalid configuration")?;
    let history = cli.history.as_ref().map(InteractionLog::new);

    let filter = resolve_filter(&cli);
    if let Some(log) = &history {
        let asked = cli.question.as_deref().or(cli.intent.as_deref()).unwrap_or("");
        log.record_or_warn(InteractionKind::Question, json!(asked));
    }

    if cli.top_k.is_some() {
        let selectors = engine.analyze_top(&html, filter.as_ref());
        if let Some(log) = &history {
            log.record_or_warn(InteractionKind::Response, json!(selectors));
        }

        if cli.json {
            println!("{}", serde_json::to_string_pretty(&selectors)?);
        } else if selectors.is_empty() {
            println!("No matching element found");
        } else {
            for (rank, selector) in selectors.iter().enumerate() {
                println!("{}. {} (score {:.2})", rank + 1, selector.css_selector, selector.score);
            }
        }
        return Ok(());
    }

    let report = engine.analyze(&html, filter.as_ref());
    if let Some(log) = &history {
        match &report {
            Some(report) => log.record_or_warn(InteractionKind::Response, json!(report)),
            None => log.record_or_warn(InteractionKind::Error, json!("no matching element")),
        }
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    match report {
        Some(report) => print_report(&report),
        None => println!("No matching element found"),
    }
    Ok(())
}

fn read_input(path: Option<&PathBuf>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        None => {
            let mut html = String::new();
            std::io::stdin()
                .read_to_string(&mut html)
                .context("Failed to read stdin")?;
            Ok(html)
        }
    }
}

fn build_config(cli: &Cli) -> Result<SelectorConfig> {
    let mut config = match &cli.config {
        Some(path) => SelectorConfig::from_json_file(path)?,
        None => cli.profile.config(),
    };

    if let Some(k) = cli.top_k {
        config = config.top_k(k);
    }
    if cli.max_levels.is_some() {
        config = config.max_levels(cli.max_levels);
    }
    if !cli.exclude.is_empty() {
        let mut selectors = config.exclude_selectors.clone();
        selectors.extend(cli.exclude.iter().cloned());
        config = config.exclude_selectors(selectors);
    }
    Ok(config.with_extra_keywords(cli.keyword.iter().cloned()))
}

fn resolve_filter(cli: &Cli) -> Option<TagFilter> {
    let intent = if let Some(label) = &cli.intent {
        let intent = IntentLabel::from_label(label);
        if intent.is_none() {
            log::warn!("Unrecognised intent '{}', searching all elements", label);
        }
        intent
    } else {
        cli.question.as_deref().and_then(IntentLabel::from_question)
    };

    if let Some(intent) = intent {
        log::debug!("Restricting search to {} elements", intent);
    }
    intent.map(IntentLabel::filter)
}

fn print_report(report: &SelectionReport) {
    let selector = &report.selector;
    println!("selector:  {}", selector.css_selector);
    println!("short:     {}", selector.short_selector);
    if let Some(xpath) = &selector.xpath {
        println!("xpath:     {}", xpath);
    }
    if let Some(text) = &selector.text {
        println!("text:      {}", text);
    }
    println!("score:     {:.2}", report.breakdown.total);
    println!("rationale: {}", report.rationale);

    if !report.alternatives.is_empty() {
        println!("alternatives:");
        for (index, alternative) in report.alternatives.iter().enumerate() {
            let marker = if index == 0 { "  (recommended)" } else { "" };
            println!(
                "  {}. {} [{:.1}]{}",
                index + 1,
                alternative.selector,
                alternative.rank,
                marker
            );
        }
    }
}

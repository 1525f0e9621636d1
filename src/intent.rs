//! Tag-set filters derived from intent labels
//!
//! The engine never classifies questions itself. Callers hand it a
//! [`TagFilter`], usually obtained from an [`IntentLabel`] that an external
//! classifier (or the cheap keyword pass in [`IntentLabel::from_question`])
//! produced.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Question words naming content that no tag set describes
const UNFILTERED_KEYWORDS: &[&str] = &["description", "prix", "price"];

/// `word` is `keyword` or its plural
fn is_form_of(word: &str, keyword: &str) -> bool {
    word == keyword || word.strip_suffix('s') == Some(keyword)
}

/// What kind of element the caller is after
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntentLabel {
    Link,
    Heading,
    Image,
    Text,
    Button,
}

impl IntentLabel {
    const ALL: [IntentLabel; 5] = [
        IntentLabel::Link,
        IntentLabel::Heading,
        IntentLabel::Image,
        IntentLabel::Text,
        IntentLabel::Button,
    ];

    /// Canonical label name
    pub fn as_str(self) -> &'static str {
        match self {
            IntentLabel::Link => "link",
            IntentLabel::Heading => "heading",
            IntentLabel::Image => "image",
            IntentLabel::Text => "text",
            IntentLabel::Button => "button",
        }
    }

    /// Tags searched for this intent
    pub fn tags(self) -> &'static [&'static str] {
        match self {
            IntentLabel::Link => &["a"],
            IntentLabel::Heading => &["h1", "h2", "h3", "h4", "h5", "h6"],
            IntentLabel::Image => &["img"],
            IntentLabel::Text => &["p", "div"],
            IntentLabel::Button => &["button"],
        }
    }

    /// Label names accepted by [`IntentLabel::from_label`]
    fn aliases(self) -> &'static [&'static str] {
        match self {
            IntentLabel::Link => &["link", "links", "lien", "liens"],
            IntentLabel::Heading => &["heading", "headings", "title", "titre"],
            IntentLabel::Image => &["image", "images", "img"],
            IntentLabel::Text => &["text", "texte", "paragraph"],
            IntentLabel::Button => &["button", "buttons", "bouton", "boutons"],
        }
    }

    /// Words that betray the intent inside a free-form question
    fn question_keywords(self) -> &'static [&'static str] {
        match self {
            IntentLabel::Heading => &["titre", "title", "heading"],
            IntentLabel::Image => &["image", "photo", "picture"],
            IntentLabel::Link => &["lien", "link", "url", "adresse", "href"],
            IntentLabel::Button => &["bouton", "button"],
            IntentLabel::Text => &["texte", "text", "paragraph", "paragraphe"],
        }
    }

    /// Resolve a classifier label; unrecognised labels yield `None`
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|intent| intent.aliases().contains(&label.as_str()))
    }

    /// Keyword pass over a natural-language question
    ///
    /// Labels are tried in a fixed order (heading, then the description and
    /// price words that ask for no filter, then image, link, button, text) so
    /// the result does not depend on word order in the question. Keywords
    /// match whole words, plural forms included.
    pub fn from_question(question: &str) -> Option<Self> {
        let question = question.to_lowercase();
        let words: Vec<&str> = question
            .split(|c: char| !c.is_alphanumeric())
            .filter(|word| !word.is_empty())
            .collect();
        let mentions = |keywords: &[&str]| {
            keywords
                .iter()
                .any(|keyword| words.iter().any(|word| is_form_of(word, keyword)))
        };

        if mentions(IntentLabel::Heading.question_keywords()) {
            return Some(IntentLabel::Heading);
        }
        if mentions(UNFILTERED_KEYWORDS) {
            return None;
        }
        [
            IntentLabel::Image,
            IntentLabel::Link,
            IntentLabel::Button,
            IntentLabel::Text,
        ]
        .into_iter()
        .find(|intent| mentions(intent.question_keywords()))
    }

    /// Tag filter for this intent
    pub fn filter(self) -> TagFilter {
        TagFilter::new(self.tags().iter().copied())
    }
}

impl fmt::Display for IntentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IntentLabel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_label(s).ok_or_else(|| format!("unrecognised intent label '{}'", s))
    }
}

/// Set of tag names an element must have to be considered at all
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagFilter {
    tags: BTreeSet<String>,
}

impl TagFilter {
    pub fn new<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            tags: tags
                .into_iter()
                .map(|t| t.as_ref().trim().to_ascii_lowercase())
                .filter(|t| !t.is_empty())
                .collect(),
        }
    }

    /// Filter for a classifier label; `None` (no filter) when unrecognised
    pub fn from_label(label: &str) -> Option<Self> {
        IntentLabel::from_label(label).map(IntentLabel::filter)
    }

    pub fn accepts(&self, tag_name: &str) -> bool {
        self.tags.contains(&tag_name.to_ascii_lowercase())
    }

    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_label() {
        assert_eq!(IntentLabel::from_label("link"), Some(IntentLabel::Link));
        assert_eq!(IntentLabel::from_label(" Titre "), Some(IntentLabel::Heading));
        assert_eq!(IntentLabel::from_label("bouton"), Some(IntentLabel::Button));
        assert_eq!(IntentLabel::from_label("prix"), None);
        assert!("texte".parse::<IntentLabel>().is_ok());
        assert!("price".parse::<IntentLabel>().is_err());
    }

    #[test]
    fn test_label_tags() {
        let heading = IntentLabel::Heading.filter();
        assert!(heading.accepts("h1"));
        assert!(heading.accepts("H6"));
        assert!(!heading.accepts("header"));

        let text = TagFilter::from_label("text").unwrap();
        assert_eq!(text.tags().collect::<Vec<_>>(), vec!["div", "p"]);

        assert!(TagFilter::from_label("description").is_none());
    }

    #[test]
    fn test_from_question() {
        assert_eq!(
            IntentLabel::from_question("Quel est le titre ?"),
            Some(IntentLabel::Heading)
        );
        assert_eq!(
            IntentLabel::from_question("Give me the URL of the product"),
            Some(IntentLabel::Link)
        );
        assert_eq!(
            IntentLabel::from_question("which photo is shown"),
            Some(IntentLabel::Image)
        );
        assert_eq!(IntentLabel::from_question("how much does it cost"), None);
    }

    #[test]
    fn test_from_question_unfiltered_words() {
        assert_eq!(IntentLabel::from_question("Quel est le prix de l'image ?"), None);
        assert_eq!(IntentLabel::from_question("show the price link"), None);
        assert_eq!(IntentLabel::from_question("Lire la description"), None);
        assert_eq!(
            IntentLabel::from_question("titre et description"),
            Some(IntentLabel::Heading)
        );
    }

    #[test]
    fn test_from_question_whole_words() {
        assert_eq!(IntentLabel::from_question("donne le contexte"), None);
        assert_eq!(IntentLabel::from_question("the subtitle please"), None);
        assert_eq!(
            IntentLabel::from_question("which photos are there"),
            Some(IntentLabel::Image)
        );
        assert_eq!(
            IntentLabel::from_question("Liste des liens"),
            Some(IntentLabel::Link)
        );
        assert_eq!(
            IntentLabel::from_question("read the text, please"),
            Some(IntentLabel::Text)
        );
    }

    #[test]
    fn test_custom_filter() {
        let filter = TagFilter::new(["TD", " th ", ""]);
        assert!(filter.accepts("td"));
        assert!(filter.accepts("th"));
        assert_eq!(filter.tags().count(), 2);
    }

    #[test]
    fn test_display() {
        assert_eq!(IntentLabel::Button.to_string(), "button");
    }
}

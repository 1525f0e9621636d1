use thiserror::Error;

/// Errors raised by the selector engine
///
/// Valid, non-empty input never produces an error: a document with nothing
/// worth selecting yields `None` instead. Errors are reserved for bad
/// configuration and for call sites that insist on non-empty input.
#[derive(Debug, Error)]
pub enum SelectorError {
    #[error("Input HTML is empty")]
    EmptyInput,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Unknown scoring strategy: {0}")]
    UnknownStrategy(String),

    #[error("Invalid CSS selector '{selector}': {reason}")]
    InvalidSelector { selector: String, reason: String },

    #[error("Failed to read configuration from {path}: {reason}")]
    ConfigRead { path: String, reason: String },

    #[error("Failed to parse configuration: {0}")]
    ConfigParse(#[from] serde_json::Error),

    #[error("Interaction history error: {0}")]
    History(String),
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, SelectorError>;

/// Reject empty or whitespace-only input.
///
/// The engine itself treats empty input as "no candidate"; front ends that
/// want to report it as a user error call this first.
pub fn ensure_non_empty(html: &str) -> Result<&str> {
    if html.trim().is_empty() {
        Err(SelectorError::EmptyInput)
    } else {
        Ok(html)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_non_empty() {
        assert!(matches!(ensure_non_empty("   \n\t"), Err(SelectorError::EmptyInput)));
        assert_eq!(ensure_non_empty("<p>x</p>").unwrap(), "<p>x</p>");
    }

    #[test]
    fn test_error_messages() {
        let err = SelectorError::InvalidSelector {
            selector: "div[".to_string(),
            reason: "unexpected end".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid CSS selector 'div[': unexpected end");
        assert_eq!(
            SelectorError::UnknownStrategy("magic".to_string()).to_string(),
            "Unknown scoring strategy: magic"
        );
    }
}

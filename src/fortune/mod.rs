//! # Fortunes
//!
//! Remote fortunes shown when a scroll in the gallery is opened.
//!
//! ## Components
//!
//! - [`Fortune`] - text + attribution of a single fortune
//! - [`FortuneSource`] - where fortunes come from ([`HttpFortuneSource`] in production)
//! - [`PrefetchCache`] - holds at most one fortune fetched ahead of time
//!
//! ## Failure Policy
//!
//! Fetch failures never reach the user as errors. The cache logs them and
//! substitutes [`Fortune::fallback`].

mod cache;
mod source;

pub use cache::PrefetchCache;
pub use source::{parse_response, FetchFuture, FortuneSource, HttpFortuneSource, DEFAULT_ENDPOINT};

use thiserror::Error;

/// Text shown when no fortune could be fetched.
pub const FALLBACK_CONTENT: &str = "Could not fetch a fortune. Please try again later.";

/// A single fortune, ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fortune {
    pub content: String,
    pub author: String,
}

impl Fortune {
    /// Build a fortune from the remote `quote` and `author` fields.
    pub fn from_remote(quote: String, author: &str) -> Self {
        Self {
            content: quote,
            author: format!("- {}", author),
        }
    }

    pub fn fallback() -> Self {
        Self {
            content: FALLBACK_CONTENT.to_string(),
            author: String::new(),
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.content == FALLBACK_CONTENT && self.author.is_empty()
    }
}

/// Why a fortune fetch failed.
#[derive(Debug, Error)]
pub enum FortuneError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP error! status: {0}")]
    Status(u16),

    #[error("Malformed fortune response: {0}")]
    Parse(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_remote_prefixes_author() {
        let f = Fortune::from_remote("Stay hungry.".to_string(), "Steve Jobs");
        assert_eq!(f.content, "Stay hungry.");
        assert_eq!(f.author, "- Steve Jobs");
        assert!(!f.is_fallback());
    }

    #[test]
    fn test_fallback() {
        let f = Fortune::fallback();
        assert_eq!(f.content, FALLBACK_CONTENT);
        assert_eq!(f.author, "");
        assert!(f.is_fallback());
    }

    #[test]
    fn test_status_error_message() {
        assert_eq!(
            FortuneError::Status(503).to_string(),
            "HTTP error! status: 503"
        );
    }
}

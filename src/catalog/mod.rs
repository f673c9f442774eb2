//! # Movie Quote Catalog
//!
//! Loads, normalizes and samples the static catalog behind the TV widget.
//!
//! ## Catalog Format
//!
//! ```json
//! [
//!   { "quote": "I'll be back.", "movie": "The Terminator", "type": "movie", "year": 1984 },
//!   { "quote": "Winter is coming.", "movie": "Game of Thrones", "type": "tv" }
//! ]
//! ```
//!
//! Only `quote` is required. Entries whose `quote` is not a string are
//! dropped. A catalog that cannot be read, is not a non-empty array, or has
//! no usable entries is replaced by a single fallback entry, so a loaded
//! [`Catalog`] is never empty.

use rand::Rng;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Filter tag selecting the whole catalog.
pub const ALL_FILTER: &str = "all";

/// Catalog compiled into the binary.
const EMBEDDED_CATALOG: &str = include_str!("../../assets/movie_quotes.json");

/// One normalized catalog entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieQuote {
    pub quote: String,
    pub movie: String,
    /// Lower-cased category tag (`movie`, `tv`, ...).
    pub kind: String,
    /// Empty when unknown.
    pub year: String,
}

impl MovieQuote {
    /// Attribution line shown under the quote, e.g. `— Jaws (1975) · MOVIE`.
    pub fn attribution(&self) -> String {
        let mut line = format!("— {}", self.movie);
        if !self.year.is_empty() {
            line.push_str(&format!(" ({})", self.year));
        }
        if !self.kind.is_empty() {
            line.push_str(&format!(" · {}", self.kind.to_uppercase()));
        }
        line
    }

    fn fallback() -> Self {
        Self {
            quote: "No quotes available. Check that the movie quotes catalog exists and is valid JSON."
                .to_string(),
            movie: "System".to_string(),
            kind: "movie".to_string(),
            year: String::new(),
        }
    }
}

/// Why a catalog could not be loaded.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Catalog is empty or not an array")]
    Empty,

    #[error("Catalog has no entries with a quote")]
    NoUsableEntries,
}

/// Where the catalog is loaded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    Embedded,
    File(PathBuf),
}

impl CatalogSource {
    pub fn from_path(path: Option<PathBuf>) -> Self {
        path.map_or(Self::Embedded, Self::File)
    }

    fn read(&self) -> Result<String, CatalogError> {
        match self {
            Self::Embedded => Ok(EMBEDDED_CATALOG.to_string()),
            Self::File(path) => fs::read_to_string(path).map_err(|source| CatalogError::Io {
                path: path.clone(),
                source,
            }),
        }
    }
}

/// A non-empty, ordered collection of movie quotes.
#[derive(Debug, Clone)]
pub struct Catalog {
    quotes: Vec<MovieQuote>,
}

impl Catalog {
    /// Build a catalog from normalized quotes. Returns `None` when empty.
    pub fn new(quotes: Vec<MovieQuote>) -> Option<Self> {
        if quotes.is_empty() {
            None
        } else {
            Some(Self { quotes })
        }
    }

    /// The single-entry catalog used when loading fails.
    pub fn fallback() -> Self {
        Self {
            quotes: vec![MovieQuote::fallback()],
        }
    }

    /// Load from `source`, substituting [`Catalog::fallback`] on any failure.
    pub fn load(source: &CatalogSource) -> Self {
        match Self::try_load(source) {
            Ok(catalog) => {
                tracing::info!(entries = catalog.len(), "movie quotes catalog loaded");
                catalog
            }
            Err(e) => {
                tracing::error!(error = %e, "Could not load movie quotes catalog");
                Self::fallback()
            }
        }
    }

    pub fn try_load(source: &CatalogSource) -> Result<Self, CatalogError> {
        Self::parse(&source.read()?)
    }

    pub fn load_from(path: &Path) -> Result<Self, CatalogError> {
        Self::try_load(&CatalogSource::File(path.to_path_buf()))
    }

    /// Parse and normalize a JSON catalog document.
    pub fn parse(json: &str) -> Result<Self, CatalogError> {
        let value: Value = serde_json::from_str(json)?;
        let entries = match value {
            Value::Array(entries) if !entries.is_empty() => entries,
            _ => return Err(CatalogError::Empty),
        };

        let quotes = entries.iter().filter_map(normalize).collect();
        Self::new(quotes).ok_or(CatalogError::NoUsableEntries)
    }

    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    /// Never true for a constructed catalog.
    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }

    pub fn quotes(&self) -> &[MovieQuote] {
        &self.quotes
    }

    /// Entries matching `filter`, or the whole catalog for `"all"` and for
    /// filters with no matches.
    pub fn pool(&self, filter: &str) -> Vec<&MovieQuote> {
        let filter = filter.trim().to_lowercase();
        if filter.is_empty() || filter == ALL_FILTER {
            return self.quotes.iter().collect();
        }

        let pool: Vec<&MovieQuote> = self.quotes.iter().filter(|q| q.kind == filter).collect();
        if pool.is_empty() {
            self.quotes.iter().collect()
        } else {
            pool
        }
    }

    /// One uniformly random entry from `pool(filter)`.
    pub fn sample<R: Rng + ?Sized>(&self, filter: &str, rng: &mut R) -> &MovieQuote {
        let pool = self.pool(filter);
        // pool is never empty: the catalog is non-empty and pool falls back to it
        pool[rng.random_range(0..pool.len())]
    }

    /// `"all"` followed by each distinct category in first-seen order.
    pub fn filters(&self) -> Vec<String> {
        let mut filters = vec![ALL_FILTER.to_string()];
        for quote in &self.quotes {
            if !quote.kind.is_empty() && !filters.contains(&quote.kind) {
                filters.push(quote.kind.clone());
            }
        }
        filters
    }
}

/// Coerce one raw JSON entry into a [`MovieQuote`].
fn normalize(entry: &Value) -> Option<MovieQuote> {
    let quote = entry.get("quote")?.as_str()?.trim().to_string();

    let movie = entry
        .get("movie")
        .and_then(coerce_string)
        .map(|m| m.trim().to_string())
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| "Unknown".to_string());

    let kind = entry
        .get("type")
        .and_then(coerce_string)
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| "movie".to_string())
        .to_lowercase();

    let year = entry
        .get("year")
        .and_then(coerce_string)
        .unwrap_or_default();

    Some(MovieQuote {
        quote,
        movie,
        kind,
        year,
    })
}

/// Strings pass through; numbers are formatted; anything else is missing.
fn coerce_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

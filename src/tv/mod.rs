//! # Movie Quotes TV
//!
//! State of the TV widget: the loaded catalog, the active category filter,
//! the quote on screen, and the "static noise" transition between quotes.
//!
//! ## Showing a Quote
//!
//! ```text
//! show(now) ──▶ static (content hidden, 150-350 ms) ──tick──▶ new quote revealed
//! ```
//!
//! The static is cosmetic. It never retries anything; the new quote is
//! sampled when the noise ends, using the filter active at that moment.

use crate::catalog::{Catalog, CatalogSource, MovieQuote, ALL_FILTER};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::ops::Range;
use std::time::{Duration, Instant};

/// Bounds of the randomized static duration, in milliseconds.
pub const STATIC_MS: Range<u64> = 150..350;

#[derive(Debug, Clone, Copy)]
struct StaticNoise {
    started: Instant,
    duration: Duration,
}

pub struct QuoteRenderer {
    catalog: Option<Catalog>,
    filter: String,
    current: Option<MovieQuote>,
    noise: Option<StaticNoise>,
    channel: u32,
    rng: StdRng,
}

impl Default for QuoteRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl QuoteRenderer {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_rng(&mut rand::rng()))
    }

    /// Deterministic renderer for tests and replays.
    pub fn with_rng(rng: StdRng) -> Self {
        Self {
            catalog: None,
            filter: ALL_FILTER.to_string(),
            current: None,
            noise: None,
            channel: 1,
            rng,
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    /// Load the catalog on first use; later calls do nothing.
    pub fn ensure_loaded(&mut self, source: &CatalogSource) {
        if self.catalog.is_some() {
            return;
        }
        self.catalog = Some(Catalog::load(source));
    }

    pub fn set_catalog(&mut self, catalog: Catalog) {
        self.catalog = Some(catalog);
    }

    pub fn is_loaded(&self) -> bool {
        self.catalog.is_some()
    }

    pub fn catalog(&self) -> Option<&Catalog> {
        self.catalog.as_ref()
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    /// Filter buttons, `"all"` first.
    pub fn filters(&self) -> Vec<String> {
        self.catalog
            .as_ref()
            .map_or_else(|| vec![ALL_FILTER.to_string()], Catalog::filters)
    }

    /// Select a category and show a quote from it.
    pub fn set_filter(&mut self, filter: &str, now: Instant) {
        let filter = filter.trim().to_lowercase();
        self.filter = if filter.is_empty() {
            ALL_FILTER.to_string()
        } else {
            filter
        };
        tracing::debug!(filter = %self.filter, "filter changed");
        self.show(now);
    }

    /// Step the active filter by `offset` buttons, wrapping around.
    pub fn cycle_filter(&mut self, offset: isize, now: Instant) {
        let filters = self.filters();
        let len = filters.len() as isize;
        let current = filters
            .iter()
            .position(|f| *f == self.filter)
            .unwrap_or(0) as isize;
        let next = (current + offset).rem_euclid(len) as usize;
        if let Some(filter) = filters.get(next) {
            let filter = filter.clone();
            self.set_filter(&filter, now);
        }
    }

    /// The channel knob: a new quote with the current filter.
    pub fn next_channel(&mut self, now: Instant) {
        self.show(now);
    }

    /// Hide the current quote behind static. A request arriving while the
    /// static is still on restarts it.
    pub fn show(&mut self, now: Instant) {
        let duration = Duration::from_millis(self.rng.random_range(STATIC_MS));
        self.noise = Some(StaticNoise {
            started: now,
            duration,
        });
    }

    /// Finish the static once its time is up. Returns true when a new quote
    /// was revealed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let Some(noise) = self.noise else {
            return false;
        };
        if now.saturating_duration_since(noise.started) < noise.duration {
            return false;
        }

        self.noise = None;
        let Some(catalog) = self.catalog.as_ref() else {
            return false;
        };
        let quote = catalog.sample(&self.filter, &mut self.rng).clone();
        tracing::debug!(movie = %quote.movie, kind = %quote.kind, "quote shown");
        self.current = Some(quote);
        self.channel = self.channel % 99 + 1;
        true
    }

    pub fn is_static(&self) -> bool {
        self.noise.is_some()
    }

    /// Seed for drawing the noise pattern; changes every 50 ms of static.
    pub fn noise_frame(&self, now: Instant) -> Option<u64> {
        self.noise.map(|noise| {
            let elapsed = now.saturating_duration_since(noise.started).as_millis() as u64;
            elapsed / 50 + u64::from(self.channel) * 1_000
        })
    }

    /// The quote on screen, hidden while the static runs.
    pub fn visible_quote(&self) -> Option<&MovieQuote> {
        if self.is_static() {
            None
        } else {
            self.current.as_ref()
        }
    }

    pub fn channel(&self) -> u32 {
        self.channel
    }
}

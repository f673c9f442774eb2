use super::{Fortune, FortuneSource};
use std::sync::{Arc, Mutex};
use tokio::task::JoinHandle;

/// Holds at most one fortune fetched ahead of display.
///
/// The slot lock is never held across an `.await`, so background prefetch
/// tasks and the UI loop can share one cache behind an [`Arc`].
pub struct PrefetchCache {
    source: Arc<dyn FortuneSource>,
    slot: Mutex<Option<Fortune>>,
}

impl PrefetchCache {
    pub fn new(source: Arc<dyn FortuneSource>) -> Self {
        Self {
            source,
            slot: Mutex::new(None),
        }
    }

    /// Fetch one fortune and store it, replacing anything already cached.
    ///
    /// Failures are logged and replaced by [`Fortune::fallback`]; they are
    /// never returned to the caller.
    pub async fn fetch_next(&self) {
        let fortune = self.fetch_or_fallback().await;
        self.store(fortune);
    }

    /// Take the cached fortune, fetching one inline if the slot is empty.
    pub async fn consume(&self) -> Fortune {
        if let Some(fortune) = self.take_ready() {
            return fortune;
        }
        tracing::debug!("prefetch slot empty, fetching inline");
        self.fetch_or_fallback().await
    }

    /// Take the cached fortune without fetching.
    pub fn take_ready(&self) -> Option<Fortune> {
        self.slot.lock().ok().and_then(|mut slot| slot.take())
    }

    /// Put back a fortune that was never displayed, unless the slot has
    /// already been refilled.
    pub fn restore(&self, fortune: Fortune) {
        if let Ok(mut slot) = self.slot.lock() {
            if slot.is_none() {
                *slot = Some(fortune);
            }
        }
    }

    pub fn is_ready(&self) -> bool {
        self.slot.lock().map(|slot| slot.is_some()).unwrap_or(false)
    }

    /// Refill the slot on the tokio runtime.
    pub fn spawn_prefetch(self: &Arc<Self>) -> JoinHandle<()> {
        let cache = Arc::clone(self);
        tokio::spawn(async move { cache.fetch_next().await })
    }

    async fn fetch_or_fallback(&self) -> Fortune {
        match self.source.fetch().await {
            Ok(fortune) => {
                tracing::debug!(author = %fortune.author, "fortune fetched");
                fortune
            }
            Err(e) => {
                tracing::warn!(error = %e, "Fortune fetch failed");
                Fortune::fallback()
            }
        }
    }

    fn store(&self, fortune: Fortune) {
        if let Ok(mut slot) = self.slot.lock() {
            *slot = Some(fortune);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fortune::{FetchFuture, FortuneError};
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Source that replays scripted results and counts calls
    struct ScriptedSource {
        results: Mutex<VecDeque<Result<Fortune, FortuneError>>>,
        calls: AtomicUsize,
    }

    impl ScriptedSource {
        fn new(results: Vec<Result<Fortune, FortuneError>>) -> Arc<Self> {
            Arc::new(Self {
                results: Mutex::new(results.into()),
                calls: AtomicUsize::new(0),
            })
        }
    }

    impl FortuneSource for ScriptedSource {
        fn fetch(&self) -> FetchFuture<'_> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let next = self
                .results
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(Err(FortuneError::Status(500)));
            Box::pin(async move { next })
        }
    }

    fn fortune(text: &str) -> Fortune {
        Fortune::from_remote(text.to_string(), "Tester")
    }

    #[tokio::test]
    async fn test_fetch_next_stores_fortune() {
        let source = ScriptedSource::new(vec![Ok(fortune("one"))]);
        let cache = PrefetchCache::new(source.clone());

        assert!(!cache.is_ready());
        cache.fetch_next().await;
        assert!(cache.is_ready());
        assert_eq!(cache.take_ready(), Some(fortune("one")));
        assert!(!cache.is_ready());
    }

    #[tokio::test]
    async fn test_fetch_failure_stores_fallback() {
        let source = ScriptedSource::new(vec![Err(FortuneError::Status(404))]);
        let cache = PrefetchCache::new(source);

        cache.fetch_next().await;
        assert_eq!(cache.take_ready(), Some(Fortune::fallback()));
    }

    #[tokio::test]
    async fn test_consume_uses_cached_without_fetching() {
        let source = ScriptedSource::new(vec![Ok(fortune("cached")), Ok(fortune("unused"))]);
        let cache = PrefetchCache::new(source.clone());

        cache.fetch_next().await;
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);

        assert_eq!(cache.consume().await, fortune("cached"));
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_consume_fetches_inline_when_empty() {
        let source = ScriptedSource::new(vec![Ok(fortune("inline"))]);
        let cache = PrefetchCache::new(source.clone());

        assert_eq!(cache.consume().await, fortune("inline"));
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
        // Inline fetches are handed out directly, never cached
        assert!(!cache.is_ready());
    }

    #[tokio::test]
    async fn test_consume_inline_failure_returns_fallback() {
        let source = ScriptedSource::new(vec![]);
        let cache = PrefetchCache::new(source);

        assert!(cache.consume().await.is_fallback());
    }

    #[tokio::test]
    async fn test_restore_only_fills_empty_slot() {
        let source = ScriptedSource::new(vec![Ok(fortune("fresh"))]);
        let cache = PrefetchCache::new(source);

        cache.restore(fortune("returned"));
        assert_eq!(cache.take_ready(), Some(fortune("returned")));

        cache.fetch_next().await;
        cache.restore(fortune("returned"));
        assert_eq!(cache.take_ready(), Some(fortune("fresh")));
    }

    #[tokio::test]
    async fn test_spawn_prefetch_fills_slot() {
        let source = ScriptedSource::new(vec![Ok(fortune("background"))]);
        let cache = Arc::new(PrefetchCache::new(source));

        cache.spawn_prefetch().await.unwrap();
        assert_eq!(cache.take_ready(), Some(fortune("background")));
    }
}

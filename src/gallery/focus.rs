//! Focus animation for a selected gallery item.
//!
//! ```text
//!  Idle ──begin──▶ Lifting ──tick──▶ Centered ──tick (lift done)──▶ Unrolled
//!   ▲                                                                  │
//!   │                                               reveal + request_close
//!   └────────────── tick (fade done) ◀────────── Closing ◀────────────┘
//! ```
//!
//! Each `begin` hands out a fresh [`InteractionToken`]. Results that arrive
//! for an older token (a fetch that outlived a cancelled lift) are rejected.

use super::list::ItemId;
use crate::anim::{progress, Rect, Transition};
use std::time::{Duration, Instant};
use thiserror::Error;

/// Durations of each animated stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FocusTimings {
    /// Travel from the list slot to the screen center.
    pub lift: Duration,
    /// Height growth once content is revealed.
    pub unroll: Duration,
    /// Fade-out when closing.
    pub fade: Duration,
}

impl Default for FocusTimings {
    fn default() -> Self {
        Self {
            lift: Duration::from_millis(800),
            unroll: Duration::from_millis(400),
            fade: Duration::from_millis(500),
        }
    }
}

/// Identifies one open sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InteractionToken(u64);

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FocusPhase {
    Idle,
    Lifting {
        item: ItemId,
        source: Rect,
        target: Rect,
    },
    Centered {
        item: ItemId,
        transition: Transition,
        started: Instant,
    },
    Unrolled {
        item: ItemId,
        rect: Rect,
        revealed_at: Option<Instant>,
    },
    Closing {
        item: ItemId,
        rect: Rect,
        started: Instant,
    },
}

/// Stage changes the owner has to act on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusEvent {
    /// The card reached the center; its content should now be fetched.
    Landed {
        item: ItemId,
        token: InteractionToken,
    },
    /// The fade finished; the item can be dropped from the list.
    Closed { item: ItemId },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FocusError {
    #[error("another item is already open")]
    Busy,
    #[error("no fully open item to close")]
    NotOpen,
    #[error("result belongs to an earlier interaction")]
    Stale,
    #[error("item is not a placeholder in this gallery")]
    UnknownItem,
}

/// What the renderer should draw for the focused card.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CardView {
    Floating(Rect),
    Open {
        rect: Rect,
        /// Unroll progress in `[0, 1]`; zero until content arrives.
        unroll: f32,
        revealed: bool,
    },
    Fading { rect: Rect, opacity: f32 },
}

#[derive(Debug, Clone)]
pub struct FocusAnimator {
    timings: FocusTimings,
    phase: FocusPhase,
    token: InteractionToken,
}

impl FocusAnimator {
    pub fn new(timings: FocusTimings) -> Self {
        Self {
            timings,
            phase: FocusPhase::Idle,
            token: InteractionToken(0),
        }
    }

    pub fn phase(&self) -> &FocusPhase {
        &self.phase
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.phase, FocusPhase::Idle)
    }

    pub fn token(&self) -> InteractionToken {
        self.token
    }

    pub fn active_item(&self) -> Option<ItemId> {
        match self.phase {
            FocusPhase::Idle => None,
            FocusPhase::Lifting { item, .. }
            | FocusPhase::Centered { item, .. }
            | FocusPhase::Unrolled { item, .. }
            | FocusPhase::Closing { item, .. } => Some(item),
        }
    }

    /// Open and showing content, i.e. closable.
    pub fn is_open(&self) -> bool {
        matches!(
            self.phase,
            FocusPhase::Unrolled {
                revealed_at: Some(_),
                ..
            }
        )
    }

    /// Lift `item` from `source` toward the center of `screen`. The lift
    /// clock starts at the next [`tick`](Self::tick).
    pub fn begin(
        &mut self,
        item: ItemId,
        source: Rect,
        screen: Rect,
    ) -> Result<InteractionToken, FocusError> {
        if !self.is_idle() {
            return Err(FocusError::Busy);
        }

        self.token = InteractionToken(self.token.0 + 1);
        self.phase = FocusPhase::Lifting {
            item,
            source,
            target: Rect::centered_in(screen, source.width, source.height),
        };
        Ok(self.token)
    }

    /// Advance time-driven stages.
    pub fn tick(&mut self, now: Instant) -> Option<FocusEvent> {
        match self.phase {
            FocusPhase::Lifting {
                item,
                source,
                target,
            } => {
                self.phase = FocusPhase::Centered {
                    item,
                    transition: Transition::new(source, target, self.timings.lift),
                    started: now,
                };
                None
            }
            FocusPhase::Centered {
                item,
                transition,
                started,
            } if transition.is_complete(now.saturating_duration_since(started)) => {
                self.phase = FocusPhase::Unrolled {
                    item,
                    rect: transition.to,
                    revealed_at: None,
                };
                Some(FocusEvent::Landed {
                    item,
                    token: self.token,
                })
            }
            FocusPhase::Closing { item, started, .. }
                if now.saturating_duration_since(started) >= self.timings.fade =>
            {
                self.phase = FocusPhase::Idle;
                Some(FocusEvent::Closed { item })
            }
            _ => None,
        }
    }

    /// Content for `token` has arrived; start unrolling.
    pub fn reveal(&mut self, token: InteractionToken, now: Instant) -> Result<ItemId, FocusError> {
        if token != self.token {
            return Err(FocusError::Stale);
        }
        match self.phase {
            FocusPhase::Unrolled {
                item,
                rect,
                revealed_at: None,
            } => {
                self.phase = FocusPhase::Unrolled {
                    item,
                    rect,
                    revealed_at: Some(now),
                };
                Ok(item)
            }
            _ => Err(FocusError::Stale),
        }
    }

    /// Start fading the open item. Ignored until content is showing.
    pub fn request_close(&mut self, now: Instant) -> Result<ItemId, FocusError> {
        match self.phase {
            FocusPhase::Unrolled {
                item,
                rect,
                revealed_at: Some(_),
            } => {
                self.phase = FocusPhase::Closing {
                    item,
                    rect,
                    started: now,
                };
                Ok(item)
            }
            _ => Err(FocusError::NotOpen),
        }
    }

    /// Abort a lift whose content is not showing yet. Bumps the token so a
    /// late result is rejected.
    pub fn cancel(&mut self) -> Option<ItemId> {
        let item = match self.phase {
            FocusPhase::Lifting { item, .. }
            | FocusPhase::Centered { item, .. }
            | FocusPhase::Unrolled {
                item,
                revealed_at: None,
                ..
            } => item,
            _ => return None,
        };
        self.phase = FocusPhase::Idle;
        self.token = InteractionToken(self.token.0 + 1);
        Some(item)
    }

    pub fn card(&self, now: Instant) -> Option<CardView> {
        match self.phase {
            FocusPhase::Idle => None,
            FocusPhase::Lifting { source, .. } => Some(CardView::Floating(source)),
            FocusPhase::Centered {
                transition,
                started,
                ..
            } => Some(CardView::Floating(
                transition.sample(now.saturating_duration_since(started)),
            )),
            FocusPhase::Unrolled {
                rect, revealed_at, ..
            } => Some(CardView::Open {
                rect,
                unroll: revealed_at.map_or(0.0, |at| {
                    progress(now.saturating_duration_since(at), self.timings.unroll)
                }),
                revealed: revealed_at.is_some(),
            }),
            FocusPhase::Closing { rect, started, .. } => Some(CardView::Fading {
                rect,
                opacity: 1.0 - progress(now.saturating_duration_since(started), self.timings.fade),
            }),
        }
    }
}

impl Default for FocusAnimator {
    fn default() -> Self {
        Self::new(FocusTimings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gallery::list::{GalleryConfig, VirtualList};

    fn some_item() -> ItemId {
        let mut list = VirtualList::new(GalleryConfig::default());
        list.mount(40);
        list.center_item().unwrap()
    }

    fn screen() -> Rect {
        Rect::new(0.0, 0.0, 100.0, 40.0)
    }

    fn source() -> Rect {
        Rect::new(10.0, 30.0, 40.0, 5.0)
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    /// Drive an animator to the open, revealed state
    fn opened(now: Instant) -> (FocusAnimator, ItemId) {
        let mut anim = FocusAnimator::default();
        let item = some_item();
        let token = anim.begin(item, source(), screen()).unwrap();
        anim.tick(now);
        anim.tick(now + ms(800));
        anim.reveal(token, now + ms(800)).unwrap();
        (anim, item)
    }

    #[test]
    fn test_full_sequence() {
        let now = Instant::now();
        let mut anim = FocusAnimator::default();
        let item = some_item();

        let token = anim.begin(item, source(), screen()).unwrap();
        assert!(matches!(anim.phase(), FocusPhase::Lifting { .. }));

        assert_eq!(anim.tick(now), None);
        assert!(matches!(anim.phase(), FocusPhase::Centered { .. }));

        assert_eq!(anim.tick(now + ms(799)), None);
        assert_eq!(
            anim.tick(now + ms(800)),
            Some(FocusEvent::Landed { item, token })
        );
        assert!(!anim.is_open());

        assert_eq!(anim.reveal(token, now + ms(800)), Ok(item));
        assert!(anim.is_open());

        assert_eq!(anim.request_close(now + ms(1000)), Ok(item));
        assert_eq!(anim.tick(now + ms(1499)), None);
        assert_eq!(anim.tick(now + ms(1500)), Some(FocusEvent::Closed { item }));
        assert!(anim.is_idle());
    }

    #[test]
    fn test_begin_while_busy_is_rejected() {
        let now = Instant::now();
        let (mut anim, item) = opened(now);
        assert_eq!(
            anim.begin(item, source(), screen()),
            Err(FocusError::Busy)
        );
    }

    #[test]
    fn test_lift_clock_starts_at_first_tick() {
        let now = Instant::now();
        let mut anim = FocusAnimator::default();
        anim.begin(some_item(), source(), screen()).unwrap();

        // However long the first frame takes, the full lift still plays
        let first = now + ms(5000);
        assert_eq!(anim.tick(first), None);
        assert_eq!(anim.tick(first + ms(799)), None);
        assert!(matches!(
            anim.tick(first + ms(800)),
            Some(FocusEvent::Landed { .. })
        ));
    }

    #[test]
    fn test_close_before_reveal_is_ignored() {
        let now = Instant::now();
        let mut anim = FocusAnimator::default();
        let token = anim.begin(some_item(), source(), screen()).unwrap();

        assert_eq!(anim.request_close(now), Err(FocusError::NotOpen));
        anim.tick(now);
        assert_eq!(anim.request_close(now), Err(FocusError::NotOpen));
        anim.tick(now + ms(800));
        assert_eq!(anim.request_close(now + ms(800)), Err(FocusError::NotOpen));

        anim.reveal(token, now + ms(900)).unwrap();
        assert!(anim.request_close(now + ms(900)).is_ok());
    }

    #[test]
    fn test_cancel_invalidates_token() {
        let now = Instant::now();
        let mut anim = FocusAnimator::default();
        let item = some_item();
        let token = anim.begin(item, source(), screen()).unwrap();
        anim.tick(now);
        anim.tick(now + ms(800));

        assert_eq!(anim.cancel(), Some(item));
        assert!(anim.is_idle());
        assert_eq!(anim.reveal(token, now + ms(900)), Err(FocusError::Stale));
    }

    #[test]
    fn test_cancel_does_not_abort_open_item() {
        let now = Instant::now();
        let (mut anim, _) = opened(now);
        assert_eq!(anim.cancel(), None);
        assert!(anim.is_open());
    }

    #[test]
    fn test_card_moves_to_center() {
        let now = Instant::now();
        let mut anim = FocusAnimator::default();
        anim.begin(some_item(), source(), screen()).unwrap();

        assert_eq!(anim.card(now), Some(CardView::Floating(source())));
        anim.tick(now);

        let Some(CardView::Floating(end)) = anim.card(now + ms(800)) else {
            panic!("expected floating card");
        };
        assert_eq!(end.center(), screen().center());
        assert_eq!(end.width, source().width);
    }

    #[test]
    fn test_card_unroll_and_fade_progress() {
        let now = Instant::now();
        let (mut anim, _) = opened(now);

        assert!(matches!(
            anim.card(now + ms(1000)),
            Some(CardView::Open { unroll, revealed: true, .. }) if (unroll - 0.5).abs() < 0.01
        ));

        anim.request_close(now + ms(2000)).unwrap();
        assert!(matches!(
            anim.card(now + ms(2250)),
            Some(CardView::Fading { opacity, .. }) if (opacity - 0.5).abs() < 0.01
        ));
    }
}

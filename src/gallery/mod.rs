//! # Fortune Scroll Gallery
//!
//! An endless column of rolled-up scrolls. Selecting one lifts it to the
//! middle of the screen and unrolls it to reveal a fortune; dismissing it
//! fades it out and slips a fresh scroll in at the top.
//!
//! ## Components
//!
//! - [`VirtualList`] - the lazily grown, recycled list of items
//! - [`FocusAnimator`] - the lift / unroll / close sequence
//! - [`FortuneGallery`] - both of the above kept in step
//!
//! Fetching fortunes is left to the owner: [`FortuneGallery::tick`] reports
//! [`GalleryEvent::NeedsFortune`] and the owner answers with
//! [`FortuneGallery::reveal`].

pub mod focus;
pub mod list;

pub use focus::{CardView, FocusAnimator, FocusError, FocusPhase, FocusTimings, InteractionToken};
pub use list::{BatchEdit, GalleryConfig, GalleryItem, ItemId, ItemState, VirtualList};

use crate::anim::Rect;
use crate::fortune::Fortune;
use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GalleryEvent {
    /// A card landed at the center and waits for its fortune.
    NeedsFortune(InteractionToken),
    /// A closed card was removed and replaced at the top.
    Recycled,
}

#[derive(Debug, Clone)]
pub struct FortuneGallery {
    list: VirtualList,
    focus: FocusAnimator,
    mounted: bool,
}

impl FortuneGallery {
    pub fn new(config: GalleryConfig, timings: FocusTimings) -> Self {
        Self {
            list: VirtualList::new(config),
            focus: FocusAnimator::new(timings),
            mounted: false,
        }
    }

    pub fn list(&self) -> &VirtualList {
        &self.list
    }

    pub fn focus(&self) -> &FocusAnimator {
        &self.focus
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// First call materializes the initial items; later calls only resize.
    pub fn set_viewport_height(&mut self, height: u32) {
        if self.mounted {
            self.list.set_viewport_height(height);
        } else {
            self.list.mount(height);
            self.mounted = true;
            tracing::debug!(items = self.list.len(), height, "gallery mounted");
        }
    }

    /// Other items are dimmed and inert while one is focused.
    pub fn is_focused(&self) -> bool {
        !self.focus.is_idle()
    }

    /// Scroll the list. Ignored while an item is focused.
    pub fn scroll_by(&mut self, delta: i64) -> Option<BatchEdit> {
        if self.is_focused() {
            return None;
        }
        self.list.scroll_by(delta)
    }

    /// Start opening `id`, whose on-screen box is `source`.
    pub fn select(
        &mut self,
        id: ItemId,
        source: Rect,
        screen: Rect,
    ) -> Result<InteractionToken, FocusError> {
        if !self.focus.is_idle() {
            return Err(FocusError::Busy);
        }
        match self.list.get(id) {
            Some(item) if item.state == ItemState::Placeholder => {}
            _ => return Err(FocusError::UnknownItem),
        }

        let token = self.focus.begin(id, source, screen)?;
        self.list.set_state(id, ItemState::Selected);
        tracing::debug!(?id, "scroll selected");
        Ok(token)
    }

    /// A click that did not land on the open item.
    pub fn click_outside(&mut self, now: Instant) -> Result<ItemId, FocusError> {
        let id = self.focus.request_close(now)?;
        self.list.set_state(id, ItemState::Closing);
        tracing::debug!(?id, "scroll closing");
        Ok(id)
    }

    pub fn tick(&mut self, now: Instant) -> Option<GalleryEvent> {
        match self.focus.tick(now)? {
            focus::FocusEvent::Landed { token, .. } => Some(GalleryEvent::NeedsFortune(token)),
            focus::FocusEvent::Closed { item } => {
                self.list.remove(item);
                self.list.recycle();
                tracing::debug!(?item, len = self.list.len(), "scroll recycled");
                Some(GalleryEvent::Recycled)
            }
        }
    }

    /// Show `fortune` in the card opened by `token`. On error the fortune
    /// was not used.
    pub fn reveal(
        &mut self,
        token: InteractionToken,
        fortune: Fortune,
        now: Instant,
    ) -> Result<ItemId, FocusError> {
        let id = self.focus.reveal(token, now)?;
        if let Some(item) = self.list.get_mut(id) {
            item.fortune = Some(fortune);
            item.state = ItemState::Unrolled;
        }
        Ok(id)
    }

    /// Abort a lift that has not revealed anything yet.
    pub fn cancel(&mut self) -> Option<ItemId> {
        let id = self.focus.cancel()?;
        self.list.set_state(id, ItemState::Placeholder);
        tracing::debug!(?id, "scroll lift cancelled");
        Some(id)
    }

    /// The fortune of the open (or closing) card.
    pub fn open_fortune(&self) -> Option<&Fortune> {
        let id = self.focus.active_item()?;
        self.list.get(id)?.fortune.as_ref()
    }

    pub fn card(&self, now: Instant) -> Option<CardView> {
        self.focus.card(now)
    }
}

impl Default for FortuneGallery {
    fn default() -> Self {
        Self::new(GalleryConfig::default(), FocusTimings::default())
    }
}

//! Virtualized list of scroll placeholders.
//!
//! Only a window of items ever exists. Scrolling near either end grows the
//! window by one batch; closing an item removes it and recycles a fresh
//! placeholder at the top. Distances are in terminal rows.

use crate::fortune::Fortune;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Tunables for the virtual list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GalleryConfig {
    /// Placeholders materialized on mount.
    pub initial_items: usize,
    /// Items added per edge crossing.
    pub batch_size: usize,
    /// Distance from either end that triggers a batch. Defaults to one
    /// item, so the centered mount position sits clear of both edges.
    pub edge_threshold: u32,
    /// Height of one item.
    pub item_height: u32,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            initial_items: 20,
            batch_size: 5,
            edge_threshold: 5,
            item_height: 5,
        }
    }
}

/// Stable identity of a gallery item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ItemId(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemState {
    Placeholder,
    /// Lifted out of the list; the slot is drawn empty.
    Selected,
    /// Open, showing its fortune.
    Unrolled,
    Closing,
    Removed,
}

#[derive(Debug, Clone)]
pub struct GalleryItem {
    pub id: ItemId,
    pub state: ItemState,
    pub fortune: Option<Fortune>,
}

/// Result of a scroll-triggered batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchEdit {
    Appended(usize),
    /// `scroll_shift` is the height added above the viewport, already
    /// applied to the scroll offset.
    Prepended { count: usize, scroll_shift: u32 },
}

#[derive(Debug, Clone)]
pub struct VirtualList {
    config: GalleryConfig,
    items: VecDeque<GalleryItem>,
    next_id: u64,
    scroll_top: u32,
    viewport_height: u32,
}

impl VirtualList {
    pub fn new(config: GalleryConfig) -> Self {
        Self {
            config: GalleryConfig {
                item_height: config.item_height.max(1),
                ..config
            },
            items: VecDeque::new(),
            next_id: 0,
            scroll_top: 0,
            viewport_height: 0,
        }
    }

    pub fn config(&self) -> &GalleryConfig {
        &self.config
    }

    /// Replace the contents with `initial_items` placeholders and center the
    /// middle one in a viewport of `viewport_height` rows.
    pub fn mount(&mut self, viewport_height: u32) {
        self.items.clear();
        self.viewport_height = viewport_height;
        self.append(self.config.initial_items);

        let middle = (self.items.len() / 2) as u32;
        let h = self.config.item_height;
        let middle_center = middle * h + h / 2;
        self.scroll_top = middle_center
            .saturating_sub(viewport_height / 2)
            .min(self.max_scroll());
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> impl Iterator<Item = &GalleryItem> {
        self.items.iter()
    }

    pub fn scroll_top(&self) -> u32 {
        self.scroll_top
    }

    pub fn viewport_height(&self) -> u32 {
        self.viewport_height
    }

    pub fn content_height(&self) -> u32 {
        self.items.len() as u32 * self.config.item_height
    }

    pub fn max_scroll(&self) -> u32 {
        self.content_height().saturating_sub(self.viewport_height)
    }

    pub fn set_viewport_height(&mut self, height: u32) {
        self.viewport_height = height;
        self.scroll_top = self.scroll_top.min(self.max_scroll());
    }

    /// Scroll by `delta` rows (negative is up), then load a batch if an edge
    /// is near.
    pub fn scroll_by(&mut self, delta: i64) -> Option<BatchEdit> {
        let target = (i64::from(self.scroll_top) + delta).clamp(0, i64::from(self.max_scroll()));
        self.scroll_top = target as u32;
        self.on_scroll()
    }

    /// Load at most one batch: append near the bottom, otherwise prepend
    /// near the top while keeping the visible rows in place.
    pub fn on_scroll(&mut self) -> Option<BatchEdit> {
        let threshold = self.config.edge_threshold;
        let count = self.config.batch_size;
        if count == 0 {
            return None;
        }

        if self.scroll_top + self.viewport_height >= self.content_height().saturating_sub(threshold) {
            self.append(count);
            tracing::trace!(count, len = self.len(), "appended batch");
            Some(BatchEdit::Appended(count))
        } else if self.scroll_top < threshold {
            let before = self.content_height();
            self.prepend(count);
            let scroll_shift = self.content_height() - before;
            self.scroll_top += scroll_shift;
            tracing::trace!(count, scroll_shift, len = self.len(), "prepended batch");
            Some(BatchEdit::Prepended {
                count,
                scroll_shift,
            })
        } else {
            None
        }
    }

    pub fn get(&self, id: ItemId) -> Option<&GalleryItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn get_mut(&mut self, id: ItemId) -> Option<&mut GalleryItem> {
        self.items.iter_mut().find(|item| item.id == id)
    }

    pub fn index_of(&self, id: ItemId) -> Option<usize> {
        self.items.iter().position(|item| item.id == id)
    }

    /// Returns false if the item is gone.
    pub fn set_state(&mut self, id: ItemId, state: ItemState) -> bool {
        match self.get_mut(id) {
            Some(item) => {
                item.state = state;
                true
            }
            None => false,
        }
    }

    /// Items in the open or lifted states. Never more than one.
    pub fn open_count(&self) -> usize {
        self.items
            .iter()
            .filter(|item| matches!(item.state, ItemState::Selected | ItemState::Unrolled))
            .count()
    }

    /// Remove an item from the list.
    pub fn remove(&mut self, id: ItemId) -> Option<GalleryItem> {
        let index = self.index_of(id)?;
        let mut item = self.items.remove(index)?;
        item.state = ItemState::Removed;
        Some(item)
    }

    /// Put one fresh placeholder at the top.
    pub fn recycle(&mut self) {
        self.prepend(1);
    }

    /// Item covering viewport row `row`.
    pub fn item_at(&self, row: u32) -> Option<ItemId> {
        if row >= self.viewport_height {
            return None;
        }
        let index = ((self.scroll_top + row) / self.config.item_height) as usize;
        self.items.get(index).map(|item| item.id)
    }

    /// Item under the middle of the viewport.
    pub fn center_item(&self) -> Option<ItemId> {
        self.item_at(self.viewport_height / 2)
    }

    /// Top row of an item relative to the viewport (negative when scrolled
    /// past).
    pub fn item_offset(&self, id: ItemId) -> Option<i64> {
        let index = self.index_of(id)? as i64;
        Some(index * i64::from(self.config.item_height) - i64::from(self.scroll_top))
    }

    /// Items overlapping the viewport with their top offsets.
    pub fn visible(&self) -> impl Iterator<Item = (i64, &GalleryItem)> {
        let h = self.config.item_height;
        let first = (self.scroll_top / h) as usize;
        let last = ((self.scroll_top + self.viewport_height).div_ceil(h)) as usize;
        let scroll_top = i64::from(self.scroll_top);
        self.items
            .iter()
            .enumerate()
            .skip(first)
            .take(last.saturating_sub(first))
            .map(move |(i, item)| (i as i64 * i64::from(h) - scroll_top, item))
    }

    fn new_item(&mut self) -> GalleryItem {
        let id = ItemId(self.next_id);
        self.next_id += 1;
        GalleryItem {
            id,
            state: ItemState::Placeholder,
            fortune: None,
        }
    }

    fn append(&mut self, count: usize) {
        for _ in 0..count {
            let item = self.new_item();
            self.items.push_back(item);
        }
    }

    fn prepend(&mut self, count: usize) {
        for _ in 0..count {
            let item = self.new_item();
            self.items.push_front(item);
        }
    }
}

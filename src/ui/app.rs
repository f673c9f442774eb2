use crate::anim::Rect as AnimRect;
use crate::catalog::CatalogSource;
use crate::fortune::{Fortune, PrefetchCache};
use crate::gallery::{FortuneGallery, GalleryEvent, InteractionToken, ItemId};
use crate::tv::QuoteRenderer;
use crate::ui::pages::{Page, PageSwitcher};
use crate::ui::render::{card_rect, layout, slot_rect, Areas};
use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::{Position, Rect};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc::UnboundedSender;

/// Rows moved per mouse wheel notch.
const WHEEL_ROWS: i64 = 3;

/// Results of background work, delivered to the UI loop.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    FortuneReady {
        token: InteractionToken,
        fortune: Fortune,
    },
}

pub struct App {
    pub pages: PageSwitcher,
    pub gallery: FortuneGallery,
    pub tv: QuoteRenderer,
    pub should_quit: bool,
    catalog_source: CatalogSource,
    cache: Arc<PrefetchCache>,
    events: UnboundedSender<AppEvent>,
    areas: Areas,
    now: Instant,
}

impl App {
    pub fn new(
        start: Page,
        gallery: FortuneGallery,
        cache: Arc<PrefetchCache>,
        catalog_source: CatalogSource,
        events: UnboundedSender<AppEvent>,
    ) -> Self {
        Self {
            pages: PageSwitcher::new(start),
            gallery,
            tv: QuoteRenderer::new(),
            should_quit: false,
            catalog_source,
            cache,
            events,
            areas: Areas::default(),
            now: Instant::now(),
        }
    }

    /// Time of the latest input or tick, used for drawing.
    pub fn now(&self) -> Instant {
        self.now
    }

    pub fn areas(&self) -> &Areas {
        &self.areas
    }

    pub fn cache(&self) -> &Arc<PrefetchCache> {
        &self.cache
    }

    /// Kick off the first prefetch and prepare the start page. Must run
    /// inside a tokio runtime.
    pub fn start(&mut self, now: Instant) {
        self.now = now;
        self.cache.spawn_prefetch();
        self.on_page_shown(now);
    }

    pub fn resize(&mut self, screen: Rect) {
        self.areas = layout(screen);
        self.gallery
            .set_viewport_height(u32::from(self.areas.gallery.height));
    }

    pub fn handle_event(&mut self, event: Event, now: Instant) {
        match event {
            Event::Key(key) => self.handle_key(key, now),
            Event::Mouse(mouse) => self.handle_mouse(mouse, now),
            Event::Resize(width, height) => self.resize(Rect::new(0, 0, width, height)),
            _ => {}
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        self.now = now;

        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        if self.pages.is_nav_open() {
            self.handle_nav_key(key.code, now);
            return;
        }

        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Tab | KeyCode::Char('m') => self.pages.toggle_nav(),
            KeyCode::Char('f') => self.go_to(Page::Fortunes, now),
            KeyCode::Char('t') => self.go_to(Page::MovieQuotes, now),
            code => match self.pages.current() {
                Page::Fortunes => self.handle_gallery_key(code, now),
                Page::MovieQuotes => self.handle_tv_key(code, now),
            },
        }
    }

    fn handle_nav_key(&mut self, code: KeyCode, now: Instant) {
        match code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Down | KeyCode::Char('j') => self.pages.nav_next(),
            KeyCode::Up | KeyCode::Char('k') => self.pages.nav_previous(),
            KeyCode::Enter => self.select_nav(now),
            KeyCode::Esc | KeyCode::Tab | KeyCode::Char('m') => self.pages.close_nav(),
            _ => {}
        }
    }

    fn handle_gallery_key(&mut self, code: KeyCode, now: Instant) {
        if self.gallery.is_focused() {
            if matches!(code, KeyCode::Esc | KeyCode::Enter | KeyCode::Char(' ')) {
                self.close_open_item(now);
            }
            return;
        }

        let half_page = i64::from(self.gallery.list().viewport_height() / 2).max(1);
        match code {
            KeyCode::Down | KeyCode::Char('j') => self.scroll(1),
            KeyCode::Up | KeyCode::Char('k') => self.scroll(-1),
            KeyCode::PageDown => self.scroll(half_page),
            KeyCode::PageUp => self.scroll(-half_page),
            KeyCode::Enter | KeyCode::Char(' ') => {
                if let Some(id) = self.gallery.list().center_item() {
                    self.select_item(id);
                }
            }
            _ => {}
        }
    }

    fn handle_tv_key(&mut self, code: KeyCode, now: Instant) {
        match code {
            KeyCode::Char('n') | KeyCode::Char(' ') | KeyCode::Enter => self.tv.next_channel(now),
            KeyCode::Left | KeyCode::Char('h') => self.tv.cycle_filter(-1, now),
            KeyCode::Right | KeyCode::Char('l') => self.tv.cycle_filter(1, now),
            KeyCode::Char(c @ '1'..='9') => {
                let index = c as usize - '1' as usize;
                if let Some(filter) = self.tv.filters().get(index).cloned() {
                    self.tv.set_filter(&filter, now);
                }
            }
            _ => {}
        }
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent, now: Instant) {
        self.now = now;
        let position = Position::new(mouse.column, mouse.row);

        match mouse.kind {
            MouseEventKind::ScrollDown if self.scrolls_gallery() => self.scroll(WHEEL_ROWS),
            MouseEventKind::ScrollUp if self.scrolls_gallery() => self.scroll(-WHEEL_ROWS),
            MouseEventKind::Down(MouseButton::Left) => self.click(position, now),
            _ => {}
        }
    }

    fn scrolls_gallery(&self) -> bool {
        !self.pages.is_nav_open() && self.pages.is_visible(Page::Fortunes)
    }

    fn click(&mut self, position: Position, now: Instant) {
        if self.pages.is_nav_open() {
            let nav = self.areas.nav;
            // Entries start below the drawer's top border
            if nav.contains(position) && position.y > nav.y {
                let index = usize::from(position.y - nav.y - 1);
                if index < Page::ALL.len() {
                    self.pages.nav_highlight(index);
                    self.select_nav(now);
                    return;
                }
            }
            if !nav.contains(position) {
                self.pages.close_nav();
            }
            return;
        }

        // While a scroll is focused every click belongs to it
        if self.pages.is_visible(Page::Fortunes) && self.gallery.is_focused() {
            self.click_gallery(position, now);
            return;
        }

        if self.areas.header.contains(position) {
            self.pages.open_nav();
            return;
        }

        match self.pages.current() {
            Page::Fortunes => self.click_gallery(position, now),
            Page::MovieQuotes => {
                if self.areas.body.contains(position) {
                    self.tv.next_channel(now);
                }
            }
        }
    }

    fn click_gallery(&mut self, position: Position, now: Instant) {
        if let Some(view) = self.gallery.card(now) {
            if !card_rect(&view, self.areas.screen).contains(position) {
                self.close_open_item(now);
            }
            return;
        }

        let gallery = self.areas.gallery;
        if !gallery.contains(position) {
            return;
        }
        let row = u32::from(position.y - gallery.y);
        if let Some(id) = self.gallery.list().item_at(row) {
            self.select_item(id);
        }
    }

    fn scroll(&mut self, delta: i64) {
        if let Some(edit) = self.gallery.scroll_by(delta) {
            tracing::trace!(?edit, "gallery batch loaded");
        }
    }

    /// Lift `id` out of its on-screen slot.
    pub fn select_item(&mut self, id: ItemId) {
        let Some(offset) = self.gallery.list().item_offset(id) else {
            return;
        };
        let height = self.gallery.list().config().item_height;
        let source = slot_rect(self.areas.gallery, offset, height);
        let screen = AnimRect::from(self.areas.screen);

        if let Err(e) = self.gallery.select(id, source, screen) {
            tracing::debug!(?id, error = %e, "selection ignored");
        }
    }

    fn close_open_item(&mut self, now: Instant) {
        if let Err(e) = self.gallery.click_outside(now) {
            tracing::debug!(error = %e, "close ignored");
        }
    }

    /// Advance animations. Call once per frame.
    pub fn tick(&mut self, now: Instant) {
        self.now = now;
        if let Some(GalleryEvent::NeedsFortune(token)) = self.gallery.tick(now) {
            self.request_fortune(token);
        }
        self.tv.tick(now);
    }

    /// Take a fortune for `token` off the UI task, then refill the cache.
    fn request_fortune(&self, token: InteractionToken) {
        let cache = Arc::clone(&self.cache);
        let events = self.events.clone();
        tokio::spawn(async move {
            let fortune = cache.consume().await;
            if let Err(e) = events.send(AppEvent::FortuneReady { token, fortune }) {
                tracing::debug!(error = %e, "UI gone, dropping fortune");
                return;
            }
            cache.fetch_next().await;
        });
    }

    pub fn apply(&mut self, event: AppEvent, now: Instant) {
        self.now = now;
        match event {
            AppEvent::FortuneReady { token, fortune } => {
                if let Err(e) = self.gallery.reveal(token, fortune.clone(), now) {
                    tracing::debug!(error = %e, "discarding fortune for stale interaction");
                    self.cache.restore(fortune);
                }
            }
        }
    }

    /// Follow a page link. Unknown keys are ignored.
    pub fn switch(&mut self, key: &str, now: Instant) {
        if let Some(page) = Page::from_key(key) {
            self.go_to(page, now);
        }
    }

    pub fn go_to(&mut self, page: Page, now: Instant) {
        let previous = self.pages.current();
        self.pages.show(page);
        self.after_switch(previous, now);
    }

    fn select_nav(&mut self, now: Instant) {
        let previous = self.pages.current();
        if self.pages.nav_select().is_some() {
            self.after_switch(previous, now);
        }
    }

    fn after_switch(&mut self, previous: Page, now: Instant) {
        if previous == Page::Fortunes && !self.pages.is_visible(Page::Fortunes) {
            if let Some(id) = self.gallery.cancel() {
                tracing::debug!(?id, "lift cancelled by page switch");
            }
        }
        self.on_page_shown(now);
    }

    fn on_page_shown(&mut self, now: Instant) {
        if self.pages.is_visible(Page::MovieQuotes) {
            self.tv.ensure_loaded(&self.catalog_source);
            self.tv.show(now);
        }
    }
}

//! Keyboard and mouse event handling tests
//!
//! Tests for input handling including quit keys, the navigation drawer,
//! page links, gallery scrolling and selection, and the TV controls.

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use fortune_tv::catalog::CatalogSource;
use fortune_tv::fortune::{FetchFuture, Fortune, FortuneSource, PrefetchCache};
use fortune_tv::gallery::{FocusPhase, FortuneGallery, ItemState};
use fortune_tv::tv::QuoteRenderer;
use fortune_tv::ui::pages::Page;
use fortune_tv::ui::App;
use ratatui::layout::Rect;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

struct QuietSource;

impl FortuneSource for QuietSource {
    fn fetch(&self) -> FetchFuture<'_> {
        Box::pin(async { Ok(Fortune::from_remote("Quiet".to_string(), "Nobody")) })
    }
}

/// Helper to create a key event
fn key_event(code: KeyCode) -> Event {
    Event::Key(KeyEvent::new(code, KeyModifiers::empty()))
}

fn mouse_event(kind: MouseEventKind, column: u16, row: u16) -> Event {
    Event::Mouse(MouseEvent {
        kind,
        column,
        row,
        modifiers: KeyModifiers::empty(),
    })
}

fn click(column: u16, row: u16) -> Event {
    mouse_event(MouseEventKind::Down(MouseButton::Left), column, row)
}

/// Helper to create a test app on a 100x40 screen
fn create_test_app(start: Page) -> App {
    let (tx, _rx) = mpsc::unbounded_channel();
    let cache = Arc::new(PrefetchCache::new(Arc::new(QuietSource)));
    let mut app = App::new(
        start,
        FortuneGallery::default(),
        cache,
        CatalogSource::Embedded,
        tx,
    );
    app.tv = QuoteRenderer::seeded(3);
    app.resize(Rect::new(0, 0, 100, 40));
    app
}

fn send(app: &mut App, event: Event) {
    app.handle_event(event, Instant::now());
}

#[test]
fn test_quit_key() {
    let mut app = create_test_app(Page::Fortunes);
    assert!(!app.should_quit);

    send(&mut app, key_event(KeyCode::Char('q')));
    assert!(app.should_quit);
}

#[test]
fn test_quit_key_on_tv_page() {
    let mut app = create_test_app(Page::MovieQuotes);
    send(&mut app, key_event(KeyCode::Char('q')));
    assert!(app.should_quit);
}

#[test]
fn test_tab_opens_and_closes_nav() {
    let mut app = create_test_app(Page::Fortunes);

    send(&mut app, key_event(KeyCode::Tab));
    assert!(app.pages.is_nav_open());

    send(&mut app, key_event(KeyCode::Esc));
    assert!(!app.pages.is_nav_open());
}

#[test]
fn test_nav_select_switches_page() {
    let mut app = create_test_app(Page::Fortunes);

    send(&mut app, key_event(KeyCode::Char('m')));
    send(&mut app, key_event(KeyCode::Char('j')));
    send(&mut app, key_event(KeyCode::Enter));

    assert!(!app.pages.is_nav_open());
    assert_eq!(app.pages.current(), Page::MovieQuotes);
    assert!(app.tv.is_loaded());
}

#[test]
fn test_nav_keys_do_not_reach_page() {
    let mut app = create_test_app(Page::Fortunes);
    let top = app.gallery.list().scroll_top();

    send(&mut app, key_event(KeyCode::Tab));
    send(&mut app, key_event(KeyCode::Down));

    assert_eq!(app.gallery.list().scroll_top(), top);
    assert_eq!(app.pages.nav_index(), 1);
}

#[test]
fn test_page_link_keys() {
    let mut app = create_test_app(Page::Fortunes);

    send(&mut app, key_event(KeyCode::Char('t')));
    assert_eq!(app.pages.current(), Page::MovieQuotes);

    send(&mut app, key_event(KeyCode::Char('f')));
    assert_eq!(app.pages.current(), Page::Fortunes);
}

#[test]
fn test_scroll_keys_move_gallery() {
    let mut app = create_test_app(Page::Fortunes);
    let top = app.gallery.list().scroll_top();

    send(&mut app, key_event(KeyCode::Char('j')));
    assert_eq!(app.gallery.list().scroll_top(), top + 1);

    send(&mut app, key_event(KeyCode::Up));
    assert_eq!(app.gallery.list().scroll_top(), top);
}

#[test]
fn test_mouse_wheel_scrolls_gallery() {
    let mut app = create_test_app(Page::Fortunes);
    let top = app.gallery.list().scroll_top();

    send(&mut app, mouse_event(MouseEventKind::ScrollDown, 50, 20));
    assert_eq!(app.gallery.list().scroll_top(), top + 3);
}

#[test]
fn test_scrolling_near_bottom_grows_list() {
    let mut app = create_test_app(Page::Fortunes);
    let count = app.gallery.list().len();

    // Scrolling up from the start position stays clear of both edges
    send(&mut app, key_event(KeyCode::Up));
    assert_eq!(app.gallery.list().len(), count);

    // Half a page down is still above the bottom edge
    send(&mut app, key_event(KeyCode::PageDown));
    assert_eq!(app.gallery.list().len(), count);

    // The next half page reaches the end and appends one batch below
    let first = app.gallery.list().items().next().map(|i| i.id);
    send(&mut app, key_event(KeyCode::PageDown));
    assert_eq!(app.gallery.list().len(), count + 5);
    assert_eq!(app.gallery.list().items().next().map(|i| i.id), first);
}

#[test]
fn test_click_selects_item_under_cursor() {
    let mut app = create_test_app(Page::Fortunes);
    let gallery = app.areas().gallery;
    let row = 10;
    let expected = app.gallery.list().item_at(u32::from(row)).unwrap();

    send(&mut app, click(gallery.x + 10, gallery.y + row));

    assert_eq!(
        app.gallery.list().get(expected).map(|i| i.state),
        Some(ItemState::Selected)
    );
    assert!(matches!(app.gallery.focus().phase(), FocusPhase::Lifting { .. }));
}

#[test]
fn test_second_click_while_lifting_is_ignored() {
    let mut app = create_test_app(Page::Fortunes);
    let gallery = app.areas().gallery;

    send(&mut app, click(gallery.x + 10, gallery.y + 2));
    send(&mut app, click(gallery.x + 10, gallery.y + 30));

    assert_eq!(app.gallery.list().open_count(), 1);
}

#[tokio::test]
async fn test_click_outside_open_card_closes_it() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let cache = Arc::new(PrefetchCache::new(Arc::new(QuietSource)));
    let mut app = App::new(
        Page::Fortunes,
        FortuneGallery::default(),
        cache,
        CatalogSource::Embedded,
        tx,
    );
    app.resize(Rect::new(0, 0, 100, 40));
    let now = Instant::now();

    app.handle_key(KeyEvent::new(KeyCode::Enter, KeyModifiers::empty()), now);
    app.tick(now);
    app.tick(now + Duration::from_millis(800));
    let event = rx.recv().await.unwrap();
    app.apply(event, now + Duration::from_millis(800));
    assert!(app.gallery.focus().is_open());

    // The card sits in the middle of the screen; the bottom row is outside it
    app.handle_event(click(50, 38), now + Duration::from_millis(1300));
    assert!(matches!(app.gallery.focus().phase(), FocusPhase::Closing { .. }));
}

#[test]
fn test_channel_knob_starts_static() {
    let mut app = create_test_app(Page::MovieQuotes);
    let now = Instant::now();
    app.switch("movie-quotes", now);
    app.tick(now + Duration::from_millis(400));
    assert!(!app.tv.is_static());

    app.handle_key(
        KeyEvent::new(KeyCode::Char('n'), KeyModifiers::empty()),
        now + Duration::from_millis(500),
    );
    assert!(app.tv.is_static());
}

#[test]
fn test_number_keys_pick_filter() {
    let mut app = create_test_app(Page::Fortunes);
    send(&mut app, key_event(KeyCode::Char('t')));
    let filters = app.tv.filters();
    assert_eq!(filters[0], "all");

    send(&mut app, key_event(KeyCode::Char('2')));
    assert_eq!(app.tv.filter(), filters[1]);

    send(&mut app, key_event(KeyCode::Char('9')));
    assert_eq!(app.tv.filter(), filters[1]);
}

#[test]
fn test_arrow_keys_cycle_filters() {
    let mut app = create_test_app(Page::Fortunes);
    send(&mut app, key_event(KeyCode::Char('t')));
    let filters = app.tv.filters();

    send(&mut app, key_event(KeyCode::Left));
    assert_eq!(app.tv.filter(), filters[filters.len() - 1]);

    send(&mut app, key_event(KeyCode::Right));
    assert_eq!(app.tv.filter(), "all");
}

#[test]
fn test_resize_event_updates_viewport() {
    let mut app = create_test_app(Page::Fortunes);
    send(&mut app, Event::Resize(80, 24));
    assert_eq!(app.gallery.list().viewport_height(), 18);
}

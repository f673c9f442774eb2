use crate::anim::{ease_in_out, Rect as AnimRect};
use crate::catalog::MovieQuote;
use crate::gallery::{CardView, GalleryItem, ItemState};
use crate::ui::app::App;
use crate::ui::pages::{Page, PageSwitcher};
use crate::ui::theme::Theme;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Margin, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, List, ListItem, Paragraph, Wrap},
    Frame,
};

/// Width of the navigation drawer.
const NAV_WIDTH: u16 = 30;

/// Size of an unrolled scroll.
const OPEN_CARD_WIDTH: f32 = 64.0;
const OPEN_CARD_HEIGHT: f32 = 11.0;

const NOISE: [char; 6] = [' ', '·', '░', '▒', '▓', '█'];

/// Screen regions shared by rendering and input hit testing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Areas {
    pub screen: Rect,
    pub header: Rect,
    pub body: Rect,
    pub footer: Rect,
    /// Inside of the gallery border; one row per list row.
    pub gallery: Rect,
    pub nav: Rect,
}

pub fn layout(screen: Rect) -> Areas {
    // Main layout: Header + Body + Footer
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Body
            Constraint::Length(1), // Footer
        ])
        .split(screen);

    let body = chunks[1];
    Areas {
        screen,
        header: chunks[0],
        body,
        footer: chunks[2],
        gallery: body.inner(Margin {
            horizontal: 1,
            vertical: 1,
        }),
        nav: Rect::new(body.x, body.y, NAV_WIDTH.min(body.width), body.height),
    }
}

/// Box of a list slot whose top is `offset` rows below the viewport top.
pub fn slot_rect(gallery: Rect, offset: i64, height: u32) -> AnimRect {
    let (x, width) = card_columns(gallery);
    AnimRect::new(
        f32::from(x),
        f32::from(gallery.y) + offset as f32,
        f32::from(width),
        height as f32,
    )
}

/// Where a focused card is drawn, in screen cells.
pub fn card_rect(view: &CardView, screen: Rect) -> Rect {
    let rect = match *view {
        CardView::Floating(rect) | CardView::Fading { rect, .. } => rect,
        CardView::Open { rect, unroll, .. } => {
            let full = AnimRect::centered_in(
                AnimRect::from(screen),
                OPEN_CARD_WIDTH.min(f32::from(screen.width)),
                OPEN_CARD_HEIGHT.max(rect.height).min(f32::from(screen.height)),
            );
            rect.lerp(&full, ease_in_out(unroll))
        }
    };
    rect.to_cells(screen)
}

fn card_columns(gallery: Rect) -> (u16, u16) {
    let margin = if gallery.width > 12 { 2 } else { 0 };
    (gallery.x + margin, gallery.width.saturating_sub(margin * 2))
}

pub fn render(frame: &mut Frame, app: &App) {
    let theme = app.pages.theme();
    let areas = layout(frame.area());

    frame.render_widget(
        Block::default().style(Style::default().bg(theme.bg).fg(theme.fg)),
        areas.screen,
    );

    render_header(frame, &app.pages, theme, areas.header);

    match app.pages.current() {
        Page::Fortunes => {
            render_gallery(frame, app, theme, &areas);
            render_focused_card(frame, app, theme, areas.screen);
        }
        Page::MovieQuotes => render_tv(frame, app, theme, areas.body),
    }

    if app.pages.is_nav_open() {
        render_nav(frame, &app.pages, theme, areas.nav);
    }

    render_footer(frame, app, theme, areas.footer);
}

fn render_header(frame: &mut Frame, pages: &PageSwitcher, theme: &Theme, area: Rect) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled("☰  ", Style::default().fg(theme.fg_dim)),
        Span::styled(
            pages.title(),
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        ),
    ]))
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.accent)),
    );

    frame.render_widget(header, area);
}

fn render_gallery(frame: &mut Frame, app: &App, theme: &Theme, areas: &Areas) {
    let list = app.gallery.list();
    let dimmed = app.gallery.is_focused();

    let border_color = if dimmed { theme.fg_dim } else { theme.accent };
    frame.render_widget(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(border_color)),
        areas.body,
    );

    let (_, card_width) = card_columns(areas.gallery);
    let height = list.config().item_height;
    let item_style = if dimmed {
        Style::default().fg(theme.fg_dim)
    } else {
        Style::default().fg(theme.fg)
    };

    let mut lines: Vec<Line> = Vec::new();
    let mut skip = 0u16;
    for (i, (offset, item)) in list.visible().enumerate() {
        if i == 0 {
            skip = offset.unsigned_abs().min(u64::from(u16::MAX)) as u16;
        }
        for row in 0..height {
            lines.push(Line::styled(
                scroll_row(item, row, height, usize::from(card_width)),
                item_style,
            ));
        }
    }

    let (x, width) = card_columns(areas.gallery);
    let column = Rect::new(x, areas.gallery.y, width, areas.gallery.height);
    frame.render_widget(Paragraph::new(lines).scroll((skip, 0)), column);
}

/// One text row of a rolled-up scroll. Lifted or open items leave their
/// slot empty.
fn scroll_row(item: &GalleryItem, row: u32, height: u32, width: usize) -> String {
    if item.state != ItemState::Placeholder || width < 4 {
        return String::new();
    }
    let inner = width - 2;
    if row == 0 {
        format!("╭{}╮", "─".repeat(inner))
    } else if row + 1 == height {
        format!("╰{}╯", "─".repeat(inner))
    } else if row == height / 2 {
        format!("│{:^inner$}│", "✦  a sealed scroll  ✦")
    } else {
        format!("│{}│", " ".repeat(inner))
    }
}

fn render_focused_card(frame: &mut Frame, app: &App, theme: &Theme, screen: Rect) {
    let Some(view) = app.gallery.card(app.now()) else {
        return;
    };
    let area = card_rect(&view, screen);
    if area.area() == 0 {
        return;
    }

    let (fg, show_text) = match view {
        CardView::Fading { opacity, .. } if opacity < 0.15 => return,
        CardView::Fading { opacity, .. } if opacity < 0.6 => (theme.fg_dim, true),
        CardView::Floating(_) => (theme.fg, false),
        CardView::Open { revealed, .. } => (theme.fg, revealed),
        CardView::Fading { .. } => (theme.fg, true),
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(Style::default().fg(theme.accent))
        .title(" ✦ Your Fortune ✦ ")
        .title_alignment(Alignment::Center)
        .style(Style::default().bg(theme.card_bg).fg(fg));

    let text = match (show_text, app.gallery.open_fortune()) {
        (true, Some(fortune)) => {
            let mut lines = vec![Line::from(""), Line::from(fortune.content.clone())];
            if !fortune.author.is_empty() {
                lines.push(Line::from(""));
                lines.push(
                    Line::styled(fortune.author.clone(), Style::default().fg(theme.secondary))
                        .alignment(Alignment::Right),
                );
            }
            lines
        }
        _ if matches!(view, CardView::Open { revealed: false, .. }) => {
            vec![Line::from("Unrolling…").alignment(Alignment::Center)]
        }
        _ => Vec::new(),
    };

    frame.render_widget(Clear, area);
    frame.render_widget(
        Paragraph::new(text)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(block),
        area,
    );
}

fn render_tv(frame: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let tv = &app.tv;
    let outer = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Thick)
        .border_style(Style::default().fg(theme.accent))
        .title(format!(" 📺 Movie Quotes TV · CH {:02} ", tv.channel()));
    let inner = outer.inner(area);
    frame.render_widget(outer, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Filter buttons
            Constraint::Length(1),
            Constraint::Min(3),    // Screen
            Constraint::Length(1), // Knob
        ])
        .split(inner);

    let mut buttons = Vec::new();
    for (i, filter) in tv.filters().iter().enumerate() {
        let label = format!(" [{}] {} ", i + 1, filter.to_uppercase());
        let style = if *filter == tv.filter() {
            Style::default()
                .fg(theme.bg)
                .bg(theme.secondary)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.fg_dim)
        };
        buttons.push(Span::styled(label, style));
        buttons.push(Span::raw(" "));
    }
    frame.render_widget(
        Paragraph::new(Line::from(buttons)).alignment(Alignment::Center),
        chunks[0],
    );

    let screen_block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.fg_dim))
        .style(Style::default().bg(theme.card_bg));
    let screen = screen_block.inner(chunks[2]);
    frame.render_widget(screen_block, chunks[2]);

    if let Some(seed) = tv.noise_frame(app.now()) {
        frame.render_widget(noise(seed, screen, theme), screen);
    } else if let Some(quote) = tv.visible_quote() {
        frame.render_widget(quote_paragraph(quote, theme), centered_rows(screen, 6));
    }

    frame.render_widget(
        Paragraph::new(Line::styled(
            "◉ channel knob: [n]",
            Style::default().fg(theme.fg_dim),
        ))
        .alignment(Alignment::Right),
        chunks[3],
    );
}

fn noise(seed: u64, area: Rect, theme: &Theme) -> Paragraph<'static> {
    let mut rng = StdRng::seed_from_u64(seed);
    let lines: Vec<Line> = (0..area.height)
        .map(|_| {
            let row: String = (0..area.width)
                .map(|_| NOISE[rng.random_range(0..NOISE.len())])
                .collect();
            Line::from(row)
        })
        .collect();
    Paragraph::new(lines).style(Style::default().fg(theme.fg_dim))
}

fn quote_paragraph(quote: &MovieQuote, theme: &Theme) -> Paragraph<'static> {
    Paragraph::new(vec![
        Line::styled(
            format!("“{}”", quote.quote),
            Style::default()
                .fg(theme.fg)
                .add_modifier(Modifier::ITALIC),
        ),
        Line::from(""),
        Line::styled(quote.attribution(), Style::default().fg(theme.secondary)),
    ])
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true })
}

/// A band of `rows` rows vertically centered in `area`.
fn centered_rows(area: Rect, rows: u16) -> Rect {
    let rows = rows.min(area.height);
    Rect::new(
        area.x + 2.min(area.width),
        area.y + (area.height - rows) / 2,
        area.width.saturating_sub(4),
        rows,
    )
}

fn render_nav(frame: &mut Frame, pages: &PageSwitcher, theme: &Theme, area: Rect) {
    let items: Vec<ListItem> = Page::ALL
        .iter()
        .enumerate()
        .map(|(i, page)| {
            let style = if i == pages.nav_index() {
                Style::default()
                    .fg(theme.bg)
                    .bg(theme.accent)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.fg)
            };
            let marker = if pages.is_visible(*page) { "●" } else { " " };
            ListItem::new(format!(" {} {}", marker, page.title())).style(style)
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" ☰ Menu ")
            .title_bottom(" [Esc] close ")
            .border_style(Style::default().fg(theme.accent))
            .style(Style::default().bg(theme.bg)),
    );

    frame.render_widget(Clear, area);
    frame.render_widget(list, area);
}

fn render_footer(frame: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let help_text = if app.pages.is_nav_open() {
        "[↑↓/jk] Move  [Enter] Open page  [Esc/Tab] Close menu  [q] Quit"
    } else {
        match app.pages.current() {
            Page::Fortunes if app.gallery.focus().is_open() => {
                "[Esc/Enter/Space] Roll the scroll back up  [q] Quit"
            }
            Page::Fortunes => {
                "[↑↓/jk] Scroll  [Enter] Open scroll  [Tab] Menu  [t] Movie quotes  [q] Quit"
            }
            Page::MovieQuotes => {
                "[n] Next channel  [←→/1-9] Filter  [Tab] Menu  [f] Fortunes  [q] Quit"
            }
        }
    };

    let footer = Paragraph::new(help_text)
        .style(Style::default().fg(theme.fg_dim))
        .block(Block::default());

    frame.render_widget(footer, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anim::Rect as AnimRect;

    #[test]
    fn test_layout_regions() {
        let areas = layout(Rect::new(0, 0, 80, 24));
        assert_eq!(areas.header, Rect::new(0, 0, 80, 3));
        assert_eq!(areas.footer, Rect::new(0, 23, 80, 1));
        assert_eq!(areas.body, Rect::new(0, 3, 80, 20));
        assert_eq!(areas.gallery, Rect::new(1, 4, 78, 18));
        assert_eq!(areas.nav.width, NAV_WIDTH);
    }

    #[test]
    fn test_slot_rect_follows_offset() {
        let gallery = Rect::new(1, 4, 78, 18);
        let slot = slot_rect(gallery, -2, 5);
        assert_eq!(slot, AnimRect::new(3.0, 2.0, 74.0, 5.0));
    }

    #[test]
    fn test_open_card_grows_with_unroll() {
        let screen = Rect::new(0, 0, 100, 40);
        let landed = AnimRect::centered_in(AnimRect::from(screen), 74.0, 5.0);

        let closed = card_rect(
            &CardView::Open {
                rect: landed,
                unroll: 0.0,
                revealed: false,
            },
            screen,
        );
        let open = card_rect(
            &CardView::Open {
                rect: landed,
                unroll: 1.0,
                revealed: true,
            },
            screen,
        );
        assert_eq!(closed.height, 5);
        assert_eq!(open.height, OPEN_CARD_HEIGHT as u16);
        assert_eq!(open.width, OPEN_CARD_WIDTH as u16);
    }

    #[test]
    fn test_scroll_row_shapes() {
        let mut list = crate::gallery::VirtualList::new(Default::default());
        list.mount(20);
        let item = list.items().next().unwrap();

        assert!(scroll_row(item, 0, 5, 30).starts_with('╭'));
        assert!(scroll_row(item, 4, 5, 30).starts_with('╰'));
        assert!(scroll_row(item, 2, 5, 30).contains("sealed scroll"));
        assert_eq!(scroll_row(item, 2, 5, 30).chars().count(), 30);
    }

    #[test]
    fn test_centered_rows() {
        let band = centered_rows(Rect::new(0, 0, 40, 10), 6);
        assert_eq!(band, Rect::new(2, 2, 36, 6));
    }
}

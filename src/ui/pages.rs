//! Page switching and the navigation drawer.

use crate::ui::theme::Theme;

/// A top-level view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {
    Fortunes,
    MovieQuotes,
}

impl Page {
    /// Display order in the navigation drawer.
    pub const ALL: [Page; 2] = [Page::Fortunes, Page::MovieQuotes];

    /// Identifier used by links, the CLI and the config file.
    pub fn key(self) -> &'static str {
        match self {
            Page::Fortunes => "fortunes",
            Page::MovieQuotes => "movie-quotes",
        }
    }

    pub fn from_key(key: &str) -> Option<Page> {
        Self::ALL.into_iter().find(|p| p.key() == key)
    }

    pub fn title(self) -> &'static str {
        match self {
            Page::Fortunes => "Choose Your Fortune",
            Page::MovieQuotes => "Movie Quotes",
        }
    }

    pub fn theme_name(self) -> &'static str {
        match self {
            Page::Fortunes => "fortunes-theme",
            Page::MovieQuotes => "tv-theme",
        }
    }

    pub fn theme(self) -> &'static Theme {
        Theme::by_name(self.theme_name()).unwrap_or_else(Theme::default_theme)
    }
}

/// Which page is visible, plus the side navigation drawer.
#[derive(Debug, Clone)]
pub struct PageSwitcher {
    current: Page,
    nav_open: bool,
    nav_index: usize,
}

impl Default for PageSwitcher {
    fn default() -> Self {
        Self::new(Page::Fortunes)
    }
}

impl PageSwitcher {
    pub fn new(start: Page) -> Self {
        Self {
            current: start,
            nav_open: false,
            nav_index: 0,
        }
    }

    pub fn current(&self) -> Page {
        self.current
    }

    pub fn is_visible(&self, page: Page) -> bool {
        self.current == page
    }

    /// Shared page title.
    pub fn title(&self) -> &'static str {
        self.current.title()
    }

    pub fn theme(&self) -> &'static Theme {
        self.current.theme()
    }

    /// Show the page identified by `key`. Unknown keys are ignored.
    /// Returns the newly shown page.
    pub fn switch(&mut self, key: &str) -> Option<Page> {
        let page = Page::from_key(key)?;
        self.show(page);
        Some(page)
    }

    pub fn show(&mut self, page: Page) {
        if self.current != page {
            tracing::info!(page = page.key(), "switching page");
        }
        self.current = page;
    }

    pub fn is_nav_open(&self) -> bool {
        self.nav_open
    }

    pub fn nav_index(&self) -> usize {
        self.nav_index
    }

    /// Open the drawer with the current page highlighted.
    pub fn open_nav(&mut self) {
        self.nav_open = true;
        self.nav_index = Page::ALL
            .iter()
            .position(|p| *p == self.current)
            .unwrap_or(0);
    }

    pub fn close_nav(&mut self) {
        self.nav_open = false;
    }

    pub fn toggle_nav(&mut self) {
        if self.nav_open {
            self.close_nav();
        } else {
            self.open_nav();
        }
    }

    pub fn nav_next(&mut self) {
        self.nav_index = (self.nav_index + 1) % Page::ALL.len();
    }

    pub fn nav_previous(&mut self) {
        self.nav_index = (self.nav_index + Page::ALL.len() - 1) % Page::ALL.len();
    }

    /// Highlight entry `index`. Out-of-range indices are ignored.
    pub fn nav_highlight(&mut self, index: usize) {
        if index < Page::ALL.len() {
            self.nav_index = index;
        }
    }

    /// Switch to the highlighted entry and close the drawer.
    pub fn nav_select(&mut self) -> Option<Page> {
        let page = *Page::ALL.get(self.nav_index)?;
        self.show(page);
        self.close_nav();
        Some(page)
    }
}

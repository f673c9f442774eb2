//! # Theme System
//!
//! Each page carries its own color theme, applied to the whole screen when
//! the page becomes visible.
//!
//! ## Built-in Themes
//!
//! - **fortunes-theme** - warm parchment and gold for the scroll gallery
//! - **tv-theme** - green phosphor on black for the movie quotes TV

use ratatui::style::Color;

/// All colors used by the UI, grouped by semantic role.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    /// Theme identifier, matched case-insensitively by [`Theme::by_name`].
    pub name: &'static str,

    // -- Background colors --
    /// Main background color for panels and modals.
    pub bg: Color,
    /// Background of cards (scrolls, the TV screen).
    pub card_bg: Color,

    // -- Foreground / text colors --
    /// Primary text color.
    pub fg: Color,
    /// Muted/secondary text (hints, footer, dimmed items).
    pub fg_dim: Color,

    // -- Accent / brand colors --
    /// Primary accent used for titles, focused borders, selected entries.
    pub accent: Color,
    /// Secondary accent for attributions and active buttons.
    pub secondary: Color,
}

impl Theme {
    /// Return the list of all built-in themes.
    pub fn all() -> &'static [Theme] {
        &BUILT_IN_THEMES
    }

    /// Find a built-in theme by name (case-insensitive).
    pub fn by_name(name: &str) -> Option<&'static Theme> {
        BUILT_IN_THEMES
            .iter()
            .find(|t| t.name.eq_ignore_ascii_case(name))
    }

    /// Return the default theme (the fortunes theme).
    pub fn default_theme() -> &'static Theme {
        &BUILT_IN_THEMES[0]
    }
}

// ---------------------------------------------------------------------------
// Built-in theme definitions
// ---------------------------------------------------------------------------

static BUILT_IN_THEMES: [Theme; 2] = [
    // 0 - Fortunes (default)
    Theme {
        name: "fortunes-theme",
        bg: Color::Rgb(43, 30, 22),         // walnut
        card_bg: Color::Rgb(92, 70, 45),    // aged paper in shadow
        fg: Color::Rgb(243, 229, 196),      // parchment
        fg_dim: Color::Rgb(140, 118, 92),   // faded ink
        accent: Color::Rgb(218, 165, 32),   // goldenrod
        secondary: Color::Rgb(205, 92, 60), // wax seal
    },
    // 1 - Movie quotes TV
    Theme {
        name: "tv-theme",
        bg: Color::Rgb(12, 12, 14),
        card_bg: Color::Rgb(20, 32, 22),
        fg: Color::Rgb(170, 255, 170),     // phosphor
        fg_dim: Color::Rgb(70, 110, 75),
        accent: Color::Rgb(120, 220, 255), // cathode blue
        secondary: Color::Rgb(255, 196, 87),
    },
];

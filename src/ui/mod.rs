//! # UI Module
//!
//! This module provides the terminal user interface for fortune-tv.
//!
//! ## Components
//!
//! - [`App`] - Application state: pages, the scroll gallery, the TV widget
//! - [`pages`] - Page switching and the navigation drawer
//! - [`mod@render`] - Rendering functions for drawing the TUI
//! - [`theme`] - Per-page color themes
//!
//! ## Layout
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │ ☰             Choose Your Fortune               │
//! ├─────────────────────────────────────────────────┤
//! │   ╭─────────────────────────────────────────╮   │
//! │   │        ✦  a sealed scroll  ✦            │   │
//! │   ╰─────────────────────────────────────────╯   │
//! │          (page body: gallery or TV)             │
//! ├─────────────────────────────────────────────────┤
//! │ Footer (key hints)                              │
//! └─────────────────────────────────────────────────┘
//! ```
//!
//! The navigation drawer and the focused fortune card are drawn as overlays
//! on top of the body.

pub mod app;
pub mod pages;
pub mod render;
pub mod theme;

pub use app::{App, AppEvent};
pub use render::render;

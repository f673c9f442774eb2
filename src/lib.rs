//! fortune-tv - A terminal toy with two pages
//!
//! This library provides the fortune scroll gallery (an endless, virtualized
//! list of scrolls that unroll to reveal remote fortunes) and the movie
//! quotes TV (a filterable random quote display with static between
//! channels).

pub mod anim;
pub mod catalog;
pub mod config;
pub mod fortune;
pub mod gallery;
pub mod logging;
pub mod tv;
pub mod ui;

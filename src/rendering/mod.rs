//! Terminal rendering.
//!
//! Themes map semantic roles to colors; the display functions build the text
//! for quotes, lists and messages.

pub mod display;
mod theme;
mod time;

pub use theme::{Role, Theme};
pub use time::{format_date, format_relative_opt, format_relative_time};

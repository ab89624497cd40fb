//! Terminal presentation: verbosity mode and styling.

pub mod output;
pub mod theme;

pub use output::OutputMode;
pub use theme::{should_use_colors, Theme};

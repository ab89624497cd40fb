//! Visual theme and styling.

use console::Style;

use crate::checker::CheckStatus;

/// Styles used by the text report.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Style for a passing verdict (green).
    pub pass: Style,
    /// Style for a failing verdict (red).
    pub fail: Style,
    /// Style for a warning verdict (yellow).
    pub warning: Style,
    /// Style for emphasized text (bold).
    pub highlight: Style,
    /// Style for secondary text (dim).
    pub dim: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self::new()
    }
}

impl Theme {
    /// Create the colored theme.
    ///
    /// Styling is forced on: callers decide up front whether colors are
    /// wanted and pick [`Theme::plain`] otherwise.
    pub fn new() -> Self {
        Self {
            pass: Style::new().green().force_styling(true),
            fail: Style::new().red().force_styling(true),
            warning: Style::new().yellow().force_styling(true),
            highlight: Style::new().bold().force_styling(true),
            dim: Style::new().dim().force_styling(true),
        }
    }

    /// Create a theme without colors (for non-TTY or --no-color).
    pub fn plain() -> Self {
        Self {
            pass: Style::new(),
            fail: Style::new(),
            warning: Style::new(),
            highlight: Style::new(),
            dim: Style::new(),
        }
    }

    /// Colored theme when `color` is set, plain otherwise.
    pub fn for_color(color: bool) -> Self {
        if color {
            Self::new()
        } else {
            Self::plain()
        }
    }

    /// Format a status label in its verdict color.
    pub fn format_status(&self, status: CheckStatus) -> String {
        let style = match status {
            CheckStatus::Pass => &self.pass,
            CheckStatus::Fail => &self.fail,
            CheckStatus::Warning => &self.warning,
        };
        style.apply_to(status.label()).to_string()
    }

    /// Format emphasized text.
    pub fn format_highlight(&self, text: &str) -> String {
        self.highlight.apply_to(text).to_string()
    }

    /// Format secondary text.
    pub fn format_dim(&self, text: &str) -> String {
        self.dim.apply_to(text).to_string()
    }
}

/// Check if colors should be enabled.
pub fn should_use_colors() -> bool {
    // Check NO_COLOR env var (https://no-color.org/)
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }

    // Check if stdout is a TTY
    console::Term::stdout().is_term()
}

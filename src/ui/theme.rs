//! Visual theme and styling.

use console::Style;

/// Styles used across ipweather's terminal output.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Success messages (green).
    pub success: Style,
    /// Warnings (orange).
    pub warning: Style,
    /// Errors (red bold).
    pub error: Style,
    /// Running elements such as spinners (cyan).
    pub info: Style,
    /// Secondary text.
    pub dim: Style,
    /// Emphasised text.
    pub highlight: Style,
    /// The temperature reading (yellow bold).
    pub temperature: Style,
    /// Labels in key-value displays.
    pub key: Style,
    pub value: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self::new()
    }
}

impl Theme {
    /// The colored theme.
    pub fn new() -> Self {
        Self {
            success: Style::new().green(),
            warning: Style::new().color256(208),
            error: Style::new().red().bold(),
            info: Style::new().cyan(),
            dim: Style::new().dim(),
            highlight: Style::new().bold(),
            temperature: Style::new().yellow().bold(),
            key: Style::new().bold(),
            value: Style::new(),
        }
    }

    /// A theme without colors (for non-TTY or --no-color).
    pub fn plain() -> Self {
        Self {
            success: Style::new(),
            warning: Style::new(),
            error: Style::new(),
            info: Style::new(),
            dim: Style::new(),
            highlight: Style::new(),
            temperature: Style::new(),
            key: Style::new(),
            value: Style::new(),
        }
    }

    /// Colored when [`should_use_colors`] allows it, plain otherwise.
    pub fn detect() -> Self {
        if should_use_colors() {
            Self::new()
        } else {
            Self::plain()
        }
    }

    pub fn format_success(&self, msg: &str) -> String {
        format!("{}", self.success.apply_to(format!("✓ {}", msg)))
    }

    pub fn format_warning(&self, msg: &str) -> String {
        format!("{}", self.warning.apply_to(format!("⚠ {}", msg)))
    }

    pub fn format_error(&self, msg: &str) -> String {
        format!("{}", self.error.apply_to(format!("✗ {}", msg)))
    }

    pub fn format_skipped(&self, msg: &str) -> String {
        format!("{}", self.dim.apply_to(format!("○ {}", msg)))
    }

    /// Format a header line.
    pub fn format_header(&self, title: &str) -> String {
        format!("{}", self.highlight.apply_to(title))
    }

    /// Format a `key: value` line, padding keys to a common width.
    pub fn format_detail(&self, key: &str, value: &str) -> String {
        format!(
            "  {} {}",
            self.key.apply_to(format!("{:<12}", format!("{}:", key))),
            self.value.apply_to(value)
        )
    }
}

/// Check if colors should be enabled.
pub fn should_use_colors() -> bool {
    // https://no-color.org/
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }

    console::Term::stdout().is_term()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_status_icons() {
        let theme = Theme::plain();
        assert_eq!(theme.format_success("Done"), "✓ Done");
        assert_eq!(theme.format_warning("Careful"), "⚠ Careful");
        assert_eq!(theme.format_error("Failed"), "✗ Failed");
        assert_eq!(theme.format_skipped("Skipped"), "○ Skipped");
    }

    #[test]
    fn details_are_aligned() {
        let theme = Theme::plain();
        assert_eq!(theme.format_detail("IP", "203.0.113.5"), "  IP:          203.0.113.5");
        assert_eq!(
            theme.format_detail("Coordinates", "10, 20"),
            "  Coordinates: 10, 20"
        );
    }

    #[test]
    fn default_matches_new() {
        assert_eq!(
            Theme::default().format_success("test"),
            Theme::new().format_success("test")
        );
    }
}

//! Grid styling configuration.

use crate::model::Status;
use ratatui::style::{Color, Modifier, Style};

/// Configuration for color output.
///
/// Determines whether colors should be enabled or disabled based on:
/// - `--no-color` CLI flag
/// - `NO_COLOR` environment variable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorConfig {
    enabled: bool,
}

impl ColorConfig {
    /// Create a ColorConfig from CLI args and environment.
    ///
    /// Priority (first match wins):
    /// 1. `--no-color` flag (disables colors)
    /// 2. `NO_COLOR` env var (any value disables colors)
    /// 3. Default: colors enabled
    pub fn from_env_and_args(no_color_flag: bool) -> Self {
        let enabled = !no_color_flag && std::env::var("NO_COLOR").is_err();
        Self { enabled }
    }

    /// Check if colors are enabled.
    pub fn colors_enabled(self) -> bool {
        self.enabled
    }
}

/// Styles for the grid chrome and rows.
#[derive(Debug, Clone)]
pub struct GridStyles {
    colors: ColorConfig,
    pub header: Style,
    pub column_cursor: Style,
    pub row_cursor: Style,
    pub selected_row: Style,
    pub notice: Style,
    pub footer: Style,
}

impl GridStyles {
    pub fn new(colors: ColorConfig) -> Self {
        if colors.colors_enabled() {
            Self {
                colors,
                header: Style::default().add_modifier(Modifier::BOLD),
                column_cursor: Style::default()
                    .add_modifier(Modifier::BOLD)
                    .add_modifier(Modifier::REVERSED),
                row_cursor: Style::default().add_modifier(Modifier::REVERSED),
                selected_row: Style::default().fg(Color::Yellow),
                notice: Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                footer: Style::default().fg(Color::DarkGray),
            }
        } else {
            Self {
                colors,
                header: Style::default().add_modifier(Modifier::BOLD),
                column_cursor: Style::default().add_modifier(Modifier::REVERSED),
                row_cursor: Style::default().add_modifier(Modifier::REVERSED),
                selected_row: Style::default().add_modifier(Modifier::UNDERLINED),
                notice: Style::default().add_modifier(Modifier::BOLD),
                footer: Style::default(),
            }
        }
    }

    /// Status badge style: green for accepted, red for rejected, dim for
    /// pending.
    pub fn status(&self, status: Status) -> Style {
        if !self.colors.colors_enabled() {
            return Style::default();
        }
        match status {
            Status::Accepted => Style::default().fg(Color::Green),
            Status::Rejected => Style::default().fg(Color::Red),
            Status::Pending => Style::default().fg(Color::Gray),
        }
    }
}

impl Default for GridStyles {
    fn default() -> Self {
        Self::new(ColorConfig::from_env_and_args(false))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial(no_color_env)]
    fn flag_disables_colors() {
        std::env::remove_var("NO_COLOR");
        let config = ColorConfig::from_env_and_args(true);
        assert!(!config.colors_enabled());
    }

    #[test]
    #[serial(no_color_env)]
    fn env_var_disables_colors() {
        std::env::set_var("NO_COLOR", "1");
        let config = ColorConfig::from_env_and_args(false);
        assert!(!config.colors_enabled());
        std::env::remove_var("NO_COLOR");
    }

    #[test]
    #[serial(no_color_env)]
    fn colors_enabled_by_default() {
        std::env::remove_var("NO_COLOR");
        let config = ColorConfig::from_env_and_args(false);
        assert!(config.colors_enabled());
    }

    #[test]
    #[serial(no_color_env)]
    fn status_styles_are_distinct_when_colored() {
        std::env::remove_var("NO_COLOR");
        let styles = GridStyles::new(ColorConfig::from_env_and_args(false));
        assert_ne!(styles.status(Status::Accepted), styles.status(Status::Rejected));
        assert_ne!(styles.status(Status::Accepted), styles.status(Status::Pending));
    }

    #[test]
    #[serial(no_color_env)]
    fn status_styles_are_plain_without_colors() {
        let styles = GridStyles::new(ColorConfig::from_env_and_args(true));
        assert_eq!(styles.status(Status::Accepted), Style::default());
        assert_eq!(styles.status(Status::Rejected), Style::default());
    }
}

//! Queue Theme - semantic role to style mapping
//!
//! The renderer asks for a style by meaning (title, selected row, job status);
//! colors never leak into `AppState`.

use ratatui::style::{Color, Modifier, Style};

use crate::types::JobStatus;

/// 256-color palette for the dashboard
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueTheme {
    pub title_pink: Color,
    pub muted_gray: Color,
    pub selected_pink: Color,

    // Status colors
    pub queued_yellow: Color,
    pub running_blue: Color,
    pub done_green: Color,
    pub failed_red: Color,
}

impl Default for QueueTheme {
    fn default() -> Self {
        Self {
            title_pink: Color::Indexed(205),
            muted_gray: Color::Indexed(241),
            selected_pink: Color::Indexed(212),

            queued_yellow: Color::Indexed(226),
            running_blue: Color::Indexed(33),
            done_green: Color::Indexed(46),
            failed_red: Color::Indexed(196),
        }
    }
}

impl QueueTheme {
    /// Create a new theme instance
    pub fn new() -> Self {
        Self::default()
    }

    // ─────────────────────────────────────────────────────────────────────
    // Styles
    // ─────────────────────────────────────────────────────────────────────

    /// Screen title
    pub fn title(&self) -> Style {
        Style::default()
            .fg(self.title_pink)
            .add_modifier(Modifier::BOLD)
    }

    /// Status line, column header, scroll footers
    pub fn muted(&self) -> Style {
        Style::default().fg(self.muted_gray)
    }

    /// Key binding help line
    pub fn help(&self) -> Style {
        self.muted()
    }

    /// Row under the cursor
    pub fn selected(&self) -> Style {
        Style::default()
            .fg(self.selected_pink)
            .add_modifier(Modifier::BOLD)
    }

    /// Last fetch failure
    pub fn error(&self) -> Style {
        Style::default()
            .fg(self.failed_red)
            .add_modifier(Modifier::BOLD)
    }

    /// Status label color; unknown statuses stay unstyled
    pub fn status(&self, status: &JobStatus) -> Style {
        match status {
            JobStatus::Queued => Style::default().fg(self.queued_yellow),
            JobStatus::Running => Style::default().fg(self.running_blue),
            JobStatus::Done => Style::default().fg(self.done_green),
            JobStatus::Failed => Style::default().fg(self.failed_red),
            JobStatus::Unknown(_) => Style::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_defaults() {
        let theme = QueueTheme::new();
        assert_eq!(theme.title_pink, Color::Indexed(205));
        assert_eq!(theme.done_green, Color::Indexed(46));
    }

    #[test]
    fn test_status_colors_are_distinct() {
        let theme = QueueTheme::new();
        let styles = [
            theme.status(&JobStatus::Queued),
            theme.status(&JobStatus::Running),
            theme.status(&JobStatus::Done),
            theme.status(&JobStatus::Failed),
        ];
        for (i, a) in styles.iter().enumerate() {
            for b in styles.iter().skip(i + 1) {
                assert_ne!(a.fg, b.fg);
            }
        }
        assert_eq!(theme.status(&JobStatus::Unknown("x".into())), Style::default());
    }

    #[test]
    fn test_selected_is_bold() {
        let theme = QueueTheme::new();
        assert!(theme.selected().add_modifier.contains(Modifier::BOLD));
    }
}

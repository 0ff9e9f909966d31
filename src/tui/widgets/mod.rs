//! TUI Widgets - layout math and text helpers
//!
//! Pure functions only. The renderer composes them; nothing here looks at
//! `AppState`.

mod window;
mod wrap;

pub use window::{visible_window, Window, MIN_VIEWPORT};
pub use wrap::{wrap_text, DEFAULT_WRAP_WIDTH};

/// Common widget utilities
pub mod utils {
    /// Cut a string to at most `max_len` characters
    pub fn clip(s: &str, max_len: usize) -> String {
        s.chars().take(max_len).collect()
    }

    /// Truncate string with ellipsis
    ///
    /// The result is at most `max_len` characters, the last three being `...`.
    pub fn truncate(s: &str, max_len: usize) -> String {
        if s.chars().count() <= max_len {
            s.to_string()
        } else if max_len <= 3 {
            clip(s, max_len)
        } else {
            format!("{}...", clip(s, max_len - 3))
        }
    }

    /// Format a duration rounded to whole seconds, e.g. `45s`, `1m5s`, `2h0m3s`
    ///
    /// Negative durations (clock skew between daemon and client) render as `0s`.
    pub fn format_elapsed(elapsed: chrono::Duration) -> String {
        let millis = elapsed.num_milliseconds().max(0);
        let secs = (millis + 500) / 1000;
        let (hours, minutes, seconds) = (secs / 3600, (secs % 3600) / 60, secs % 60);
        if hours > 0 {
            format!("{}h{}m{}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m{}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }
}

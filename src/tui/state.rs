//! AppState - Domain Layer
//!
//! The single root of dashboard state. Only the reducer in `events` mutates
//! it; the renderer reads it by shared reference.

use crate::types::{DaemonStatus, Job, Review};

/// Terminal size assumed until the first resize event
pub const DEFAULT_WIDTH: u16 = 80;
pub const DEFAULT_HEIGHT: u16 = 24;

// ─────────────────────────────────────────────────────────────────────────────
// Screens
// ─────────────────────────────────────────────────────────────────────────────

/// Active screen. The review screen owns the review it shows.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ViewState {
    #[default]
    Queue,
    Review(Review),
}

// ─────────────────────────────────────────────────────────────────────────────
// Core State
// ─────────────────────────────────────────────────────────────────────────────

/// Main application state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    pub view: ViewState,

    // Last snapshots from the daemon
    pub jobs: Vec<Job>,
    pub status: DaemonStatus,

    // Navigation
    pub selected: usize,
    pub scroll: usize,

    // Terminal
    pub width: u16,
    pub height: u16,

    /// Most recent fetch failure
    pub last_error: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            view: ViewState::Queue,
            jobs: Vec::new(),
            status: DaemonStatus::default(),
            selected: 0,
            scroll: 0,
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            last_error: None,
        }
    }
}

impl AppState {
    /// Replace the job list and pull the selection back inside it
    pub fn set_jobs(&mut self, jobs: Vec<Job>) {
        self.jobs = jobs;
        self.selected = self.selected.min(self.jobs.len().saturating_sub(1));
    }

    /// Job under the cursor
    pub fn selected_job(&self) -> Option<&Job> {
        self.jobs.get(self.selected)
    }

    /// Review currently on screen
    pub fn review(&self) -> Option<&Review> {
        match &self.view {
            ViewState::Review(review) => Some(review),
            ViewState::Queue => None,
        }
    }

    pub fn is_review(&self) -> bool {
        matches!(self.view, ViewState::Review(_))
    }

    /// Show `review` from its first line
    pub fn open_review(&mut self, review: Review) {
        self.view = ViewState::Review(review);
        self.scroll = 0;
    }

    /// Back to the job list, dropping the held review
    pub fn close_review(&mut self) {
        self.view = ViewState::Queue;
        self.scroll = 0;
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.jobs.len() {
            self.selected += 1;
        }
    }
}

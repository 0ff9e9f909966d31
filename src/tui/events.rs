//! Event Handling - the dashboard reducer
//!
//! Every change to [`AppState`] goes through [`step`]: keystrokes, resizes,
//! ticks and fetch completions are folded in one at a time. Follow-up work is
//! returned as [`Command`]s for the app loop to launch.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::state::AppState;
use crate::error::FetchError;
use crate::types::{DaemonStatus, Job, JobStatus, Review};

/// Input to the reducer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Keyboard input
    Key(KeyEvent),
    /// Terminal resize
    Resize(u16, u16),
    /// Poll timer fired
    Tick,
    JobsFetched(Vec<Job>),
    StatusFetched(DaemonStatus),
    ReviewFetched(Review),
    FetchFailed(FetchError),
}

/// A one-shot request against the daemon
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fetch {
    Jobs,
    Status,
    Review(i64),
}

/// Asynchronous work requested by a transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Fetch(Fetch),
    /// Arm the next poll tick
    ScheduleTick,
    Quit,
}

/// Actions that can be triggered by user input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    Up,
    Down,
    Select,
    Back,
    None,
}

/// Map a key press to an action
pub fn map_key(key: KeyEvent) -> Action {
    match (key.modifiers, key.code) {
        (KeyModifiers::CONTROL, KeyCode::Char('c')) => return Action::Quit,
        (KeyModifiers::NONE, KeyCode::Char('q')) => return Action::Quit,
        _ => {}
    }

    match key.code {
        KeyCode::Up | KeyCode::Char('k') => Action::Up,
        KeyCode::Down | KeyCode::Char('j') => Action::Down,
        KeyCode::Enter => Action::Select,
        KeyCode::Esc => Action::Back,
        _ => Action::None,
    }
}

/// Commands issued once at startup: first poll plus the first timer
pub fn startup_commands() -> Vec<Command> {
    vec![
        Command::ScheduleTick,
        Command::Fetch(Fetch::Jobs),
        Command::Fetch(Fetch::Status),
    ]
}

/// Apply one event to the state
pub fn step(mut state: AppState, event: Event) -> (AppState, Vec<Command>) {
    let commands = match event {
        Event::Resize(width, height) => {
            state.width = width;
            state.height = height;
            Vec::new()
        }
        Event::Tick => vec![
            Command::ScheduleTick,
            Command::Fetch(Fetch::Jobs),
            Command::Fetch(Fetch::Status),
        ],
        Event::JobsFetched(jobs) => {
            state.set_jobs(jobs);
            Vec::new()
        }
        Event::StatusFetched(status) => {
            state.status = status;
            Vec::new()
        }
        Event::ReviewFetched(review) => {
            tracing::debug!(agent = %review.agent, "review opened");
            state.open_review(review);
            Vec::new()
        }
        Event::FetchFailed(error) => {
            tracing::warn!(error = %error, "fetch failed");
            state.last_error = Some(error.to_string());
            Vec::new()
        }
        Event::Key(key) => {
            let action = map_key(key);
            if state.is_review() {
                handle_review_action(&mut state, action)
            } else {
                handle_queue_action(&mut state, action)
            }
        }
    };

    (state, commands)
}

fn handle_queue_action(state: &mut AppState, action: Action) -> Vec<Command> {
    match action {
        Action::Quit => vec![Command::Quit],
        Action::Up => {
            state.select_prev();
            Vec::new()
        }
        Action::Down => {
            state.select_next();
            Vec::new()
        }
        Action::Select => {
            let Some(job) = state.selected_job().cloned() else {
                return Vec::new();
            };
            match job.status {
                JobStatus::Done => vec![Command::Fetch(Fetch::Review(job.id))],
                JobStatus::Failed => {
                    tracing::debug!(job_id = job.id, "showing failed job error");
                    state.open_review(Review::for_failed_job(&job));
                    Vec::new()
                }
                _ => Vec::new(),
            }
        }
        Action::Back | Action::None => Vec::new(),
    }
}

fn handle_review_action(state: &mut AppState, action: Action) -> Vec<Command> {
    match action {
        Action::Up => state.scroll = state.scroll.saturating_sub(1),
        // Bounded by the renderer, which knows the wrapped line count.
        Action::Down => state.scroll = state.scroll.saturating_add(1),
        Action::Back | Action::Quit => state.close_review(),
        Action::Select | Action::None => {}
    }
    Vec::new()
}

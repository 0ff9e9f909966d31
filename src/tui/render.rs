//! Frame rendering
//!
//! `(AppState, now) -> Text`. Wrap width and viewport heights come from the
//! dimensions stored in the state on every call; nothing is cached between
//! frames.

use chrono::{DateTime, Utc};
use ratatui::{
    style::Style,
    text::{Line, Span, Text},
    widgets::Paragraph,
    Frame,
};

use super::state::{AppState, ViewState};
use super::theme::QueueTheme;
use super::widgets::utils::{clip, format_elapsed, truncate};
use super::widgets::{visible_window, wrap_text};
use crate::types::{Job, Review};

/// Lines of the queue screen that are not job rows
const QUEUE_CHROME_LINES: usize = 9;
/// Lines of the review screen that are not review text
const REVIEW_CHROME_LINES: usize = 5;
/// Widest the review text is ever wrapped to
const MAX_REVIEW_WIDTH: usize = 100;
/// Longest dashed rule under the column header
const MAX_RULE_WIDTH: usize = 78;

const REF_WIDTH: usize = 17;
const REPO_WIDTH: usize = 15;
const AGENT_WIDTH: usize = 12;
const STATUS_WIDTH: usize = 8;

const QUEUE_HELP: &str = "up/down: navigate | enter: view review | q: quit";
const REVIEW_HELP: &str = "up/down: scroll | esc/q: back";

/// Draw the current state into the whole frame
pub fn draw(frame: &mut Frame, state: &AppState, theme: &QueueTheme, now: DateTime<Utc>) {
    let text = render_frame(state, theme, now);
    frame.render_widget(Paragraph::new(text), frame.area());
}

/// Build the text of the active screen
pub fn render_frame(state: &AppState, theme: &QueueTheme, now: DateTime<Utc>) -> Text<'static> {
    match &state.view {
        ViewState::Review(review) => render_review(state, review, theme),
        ViewState::Queue => render_queue(state, theme, now),
    }
}

/// Number of job rows the queue screen has room for
pub fn queue_viewport(state: &AppState) -> usize {
    let chrome = QUEUE_CHROME_LINES + usize::from(state.last_error.is_some());
    usize::from(state.height).saturating_sub(chrome)
}

/// Number of review lines the review screen has room for
pub fn review_viewport(state: &AppState) -> usize {
    let chrome = REVIEW_CHROME_LINES + usize::from(state.last_error.is_some());
    usize::from(state.height).saturating_sub(chrome)
}

/// Column the review text wraps at
pub fn review_wrap_width(state: &AppState) -> usize {
    usize::from(state.width)
        .saturating_sub(2)
        .min(MAX_REVIEW_WIDTH)
}

// ─────────────────────────────────────────────────────────────────────────────
// Queue screen
// ─────────────────────────────────────────────────────────────────────────────

fn render_queue(state: &AppState, theme: &QueueTheme, now: DateTime<Utc>) -> Text<'static> {
    let mut lines = vec![Line::styled("RoboRev Queue", theme.title()), Line::default()];

    let status = &state.status;
    lines.push(Line::styled(
        format!(
            "Workers: {}/{} | Queued: {} | Running: {} | Done: {} | Failed: {} | Size: {}x{}",
            status.active_workers,
            status.max_workers,
            status.queued_jobs,
            status.running_jobs,
            status.completed_jobs,
            status.failed_jobs,
            state.width,
            state.height
        ),
        theme.muted(),
    ));
    if let Some(error) = &state.last_error {
        lines.push(error_line(error, theme));
    }
    lines.push(Line::default());

    if state.jobs.is_empty() {
        lines.push(Line::raw("No jobs in queue"));
    } else {
        lines.push(Line::styled(
            format!(
                "  {:<4} {:<17} {:<15} {:<12} {:<8} {}",
                "ID", "Ref", "Repo", "Agent", "Status", "Time"
            ),
            theme.muted(),
        ));
        let rule = usize::from(state.width)
            .saturating_sub(4)
            .min(MAX_RULE_WIDTH);
        lines.push(Line::raw(format!("  {}", "-".repeat(rule))));

        let window = visible_window(state.jobs.len(), queue_viewport(state), state.selected);
        for (index, job) in state
            .jobs
            .iter()
            .enumerate()
            .take(window.end)
            .skip(window.start)
        {
            lines.push(job_row(job, index == state.selected, theme, now));
        }

        if window.is_partial() {
            lines.push(Line::styled(
                format!(
                    "[showing {}-{} of {}]",
                    window.start + 1,
                    window.end,
                    window.total
                ),
                theme.muted(),
            ));
        }
    }

    lines.push(Line::default());
    lines.push(Line::styled(QUEUE_HELP, theme.help()));
    Text::from(lines)
}

/// One job row, prefixed with the selection marker
fn job_row(job: &Job, selected: bool, theme: &QueueTheme, now: DateTime<Utc>) -> Line<'static> {
    let columns = format!(
        "{:<4} {:<17} {:<15} {:<12} ",
        job.id,
        clip(&job.git_ref, REF_WIDTH),
        truncate(&job.repo_name, REPO_WIDTH),
        clip(&job.agent, AGENT_WIDTH),
    );
    let label = format!("{:<width$}", job.status.label(), width = STATUS_WIDTH);
    let elapsed = elapsed_label(job, now);

    let (marker, base, status_style) = if selected {
        (
            "> ",
            theme.selected(),
            theme.status(&job.status).add_modifier(theme.selected().add_modifier),
        )
    } else {
        ("  ", Style::default(), theme.status(&job.status))
    };

    let mut spans = vec![
        Span::styled(format!("{}{}", marker, columns), base),
        Span::styled(label, status_style),
    ];
    if !elapsed.is_empty() {
        spans.push(Span::styled(format!(" {}", elapsed), base));
    }
    Line::from(spans)
}

fn error_line(error: &str, theme: &QueueTheme) -> Line<'static> {
    Line::styled(format!("Error: {}", error), theme.error())
}

/// `finished - started`, else `now - started`, else blank
fn elapsed_label(job: &Job, now: DateTime<Utc>) -> String {
    match (job.started_at, job.finished_at) {
        (Some(started), Some(finished)) => format_elapsed(finished - started),
        (Some(started), None) => format_elapsed(now - started),
        _ => String::new(),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Review screen
// ─────────────────────────────────────────────────────────────────────────────

fn render_review(state: &AppState, review: &Review, theme: &QueueTheme) -> Text<'static> {
    let title = match &review.job {
        Some(job) => format!("Review: {} ({})", clip(&job.git_ref, REF_WIDTH), review.agent),
        None => "Review".to_string(),
    };
    let mut lines = vec![Line::styled(title, theme.title())];
    if let Some(error) = &state.last_error {
        lines.push(error_line(error, theme));
    }
    lines.push(Line::default());

    let wrapped = wrap_text(&review.output, review_wrap_width(state));
    let visible = review_viewport(state);
    let start = state.scroll.min(wrapped.len().saturating_sub(1));
    let end = (start + visible).min(wrapped.len());

    lines.extend(wrapped[start..end].iter().cloned().map(Line::raw));

    if wrapped.len() > visible {
        lines.push(Line::styled(
            format!("[{}-{} of {} lines]", start + 1, end, wrapped.len()),
            theme.muted(),
        ));
    }

    lines.push(Line::default());
    lines.push(Line::styled(REVIEW_HELP, theme.help()));
    Text::from(lines)
}

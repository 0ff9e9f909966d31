//! TUI Application - Main entry point and run loop

use std::io::{self, Stdout};
use std::ops::ControlFlow;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use crossterm::{
    event::{Event as TermEvent, EventStream, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;

use super::events::{startup_commands, step, Command, Event};
use super::render;
use super::runtime::{DaemonClient, Dispatcher};
use super::state::AppState;
use super::theme::QueueTheme;
use super::ticker::Ticker;
use crate::config::Config;
use crate::error::{Result, TuiError};

/// Completion events waiting for the loop
const EVENT_BUFFER: usize = 64;

type Term = Terminal<CrosstermBackend<Stdout>>;

/// TUI Application
pub struct TuiApp {
    state: AppState,
    theme: QueueTheme,
    client: Arc<dyn DaemonClient>,
    poll_interval: Duration,
    job_limit: usize,
}

impl TuiApp {
    pub fn new(client: Arc<dyn DaemonClient>, config: &Config) -> Self {
        Self {
            state: AppState::default(),
            theme: QueueTheme::new(),
            client,
            poll_interval: config.poll_interval,
            job_limit: config.job_limit,
        }
    }

    /// Run the dashboard until the user quits
    pub async fn run(mut self) -> Result<()> {
        let mut terminal = setup_terminal()?;

        let result = self.main_loop(&mut terminal).await;

        // Restore even when the loop failed
        let restored = restore_terminal(&mut terminal);
        result.and(restored)
    }

    async fn main_loop(&mut self, terminal: &mut Term) -> Result<()> {
        let (tx, mut rx) = mpsc::channel(EVENT_BUFFER);
        let dispatcher = Dispatcher::new(Arc::clone(&self.client), tx.clone(), self.job_limit);
        let mut ticker = Ticker::new(self.poll_interval);
        let mut input = EventStream::new();

        let size = terminal.size()?;
        self.apply(Event::Resize(size.width, size.height));
        if self
            .execute(startup_commands(), &dispatcher, &mut ticker, &tx)
            .is_break()
        {
            return Ok(());
        }

        loop {
            terminal.draw(|frame| render::draw(frame, &self.state, &self.theme, Utc::now()))?;

            let event = tokio::select! {
                Some(event) = rx.recv() => event,
                input_event = input.next() => match input_event {
                    Some(Ok(TermEvent::Key(key))) if key.kind == KeyEventKind::Press => Event::Key(key),
                    Some(Ok(TermEvent::Resize(width, height))) => Event::Resize(width, height),
                    Some(Ok(_)) => continue,
                    Some(Err(e)) => return Err(e.into()),
                    None => return Ok(()),
                },
            };

            let commands = self.apply(event);
            if self
                .execute(commands, &dispatcher, &mut ticker, &tx)
                .is_break()
            {
                return Ok(());
            }
        }
    }

    /// Feed one event through the reducer
    fn apply(&mut self, event: Event) -> Vec<Command> {
        let state = std::mem::take(&mut self.state);
        let (next, commands) = step(state, event);
        self.state = next;
        commands
    }

    fn execute(
        &self,
        commands: Vec<Command>,
        dispatcher: &Dispatcher,
        ticker: &mut Ticker,
        tx: &mpsc::Sender<Event>,
    ) -> ControlFlow<()> {
        for command in commands {
            match command {
                Command::Fetch(fetch) => {
                    dispatcher.spawn(fetch);
                }
                Command::ScheduleTick => ticker.arm(tx.clone()),
                Command::Quit => return ControlFlow::Break(()),
            }
        }
        ControlFlow::Continue(())
    }
}

/// Raw mode plus alternate screen
fn setup_terminal() -> Result<Term> {
    enable_raw_mode().map_err(|e| TuiError::Terminal {
        reason: format!("cannot enable raw mode: {e}"),
    })?;

    let mut stdout = io::stdout();
    unwind_on_error(
        execute!(stdout, EnterAlternateScreen),
        "cannot enter alternate screen",
        || {
            let _ = disable_raw_mode();
        },
    )?;

    unwind_on_error(
        Terminal::new(CrosstermBackend::new(stdout)),
        "cannot create terminal",
        || {
            let _ = execute!(io::stdout(), LeaveAlternateScreen);
            let _ = disable_raw_mode();
        },
    )
}

/// Run `undo` before reporting a failed setup step
fn unwind_on_error<T>(outcome: io::Result<T>, what: &str, undo: impl FnOnce()) -> Result<T> {
    outcome.map_err(|e| {
        undo();
        TuiError::Terminal {
            reason: format!("{what}: {e}"),
        }
    })
}

fn restore_terminal(terminal: &mut Term) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

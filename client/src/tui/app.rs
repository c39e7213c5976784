//! Application state and event management for the Bucketlist TUI.
//!
//! This module contains the TUI runtime around the [`ListController`]:
//!
//! - [`AppState`]: controller plus presentation state (selection, theme, quit flag)
//! - [`TuiEvent`]: events that drive the TUI event loop
//! - [`EventHandler`]: async loop using `tokio::select!` to multiplex event sources
//! - [`App`]: owns the terminal and runs the main loop
//!
//! # Architecture
//!
//! All state changes are triggered by [`TuiEvent`] variants. The
//! [`EventHandler`] runs an async loop that polls for terminal input with
//! short timeouts, generates periodic tick events, and listens for a shutdown
//! signal. Events are sent to the main loop via an MPSC channel; each key
//! event is dispatched to a controller action and awaited to completion
//! before the next event is processed, so no two controller mutations ever
//! interleave.

use std::time::Duration;

use crossterm::event::{self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::style::{Color, Modifier, Style};
use tokio::sync::{mpsc, oneshot};

use crate::controller::ListController;
use crate::error::{ClientError, TuiError};
use crate::tui::terminal::{install_panic_hook, Tui};
use crate::tui::ui;
use crate::view;

/// Theme configuration for the TUI.
///
/// Status and list styles always pair with symbols so no state is conveyed
/// by color alone. For terminals where color is disabled (per the
/// [NO_COLOR standard](https://no-color.org/)), use [`Theme::monochrome()`]
/// or [`Theme::from_env()`].
#[derive(Debug, Clone)]
pub struct Theme {
    /// Style for titles (default: white bold).
    pub title: Style,
    /// Style for primary text (default: terminal default).
    pub text_primary: Style,
    /// Style for secondary text (default: gray).
    pub text_secondary: Style,
    /// Style for muted/deemphasized text (default: dark gray).
    pub text_muted: Style,
    /// Style for the error banner (default: red).
    pub error: Style,
    /// Style for the draft input (default: cyan).
    pub input: Style,
    /// Style for completed item titles (default: green, crossed out).
    pub item_completed: Style,
    /// Style for the completed badge (default: green bold).
    pub badge: Style,
    /// Style for the progress gauge (default: green).
    pub gauge: Style,
    /// Style for the selected list row (default: bold, reversed).
    pub selected: Style,
    /// Style for borders (default: dark gray).
    pub border: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            title: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            text_primary: Style::default(),
            text_secondary: Style::default().fg(Color::Gray),
            text_muted: Style::default().fg(Color::DarkGray),
            error: Style::default().fg(Color::Red),
            input: Style::default().fg(Color::Cyan),
            item_completed: Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::CROSSED_OUT),
            badge: Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
            gauge: Style::default().fg(Color::Green),
            selected: Style::default().add_modifier(Modifier::BOLD | Modifier::REVERSED),
            border: Style::default().fg(Color::DarkGray),
        }
    }
}

impl Theme {
    /// Creates a monochrome theme using only modifiers, for `NO_COLOR`
    /// environments.
    #[must_use]
    pub fn monochrome() -> Self {
        Self {
            title: Style::default().add_modifier(Modifier::BOLD),
            text_primary: Style::default(),
            text_secondary: Style::default().add_modifier(Modifier::DIM),
            text_muted: Style::default().add_modifier(Modifier::DIM),
            error: Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            input: Style::default().add_modifier(Modifier::UNDERLINED),
            item_completed: Style::default().add_modifier(Modifier::CROSSED_OUT),
            badge: Style::default().add_modifier(Modifier::BOLD),
            gauge: Style::default(),
            selected: Style::default().add_modifier(Modifier::BOLD | Modifier::REVERSED),
            border: Style::default(),
        }
    }

    /// Returns [`Theme::monochrome()`] when `NO_COLOR` is set (to any
    /// value), [`Theme::default()`] otherwise.
    #[must_use]
    pub fn from_env() -> Self {
        if std::env::var("NO_COLOR").is_ok() {
            Self::monochrome()
        } else {
            Self::default()
        }
    }
}

/// Symbol set for the TUI (unicode or ASCII).
#[derive(Debug, Clone, Copy)]
pub struct Symbols {
    /// Symbol for a completed item.
    pub checked: &'static str,
    /// Symbol for a not-yet-completed item.
    pub unchecked: &'static str,
    /// Symbol marking the selected row.
    pub cursor: &'static str,
    /// Symbol decorating the completed badge.
    pub badge: &'static str,
}

/// Unicode symbol set for modern terminals.
pub const UNICODE_SYMBOLS: Symbols = Symbols {
    checked: "✓",
    unchecked: "○",
    cursor: "›",
    badge: "★",
};

/// ASCII symbol set for maximum compatibility.
pub const ASCII_SYMBOLS: Symbols = Symbols {
    checked: "[x]",
    unchecked: "[ ]",
    cursor: ">",
    badge: "*",
};

impl Symbols {
    /// Detects the symbol set for the current terminal.
    ///
    /// Returns [`ASCII_SYMBOLS`] when `TERM` names a limited environment
    /// (`linux` console, `vt100`), [`UNICODE_SYMBOLS`] otherwise.
    #[must_use]
    pub fn detect() -> Self {
        if std::env::var("TERM")
            .map(|t| t.contains("linux") || t.contains("vt100"))
            .unwrap_or(false)
        {
            ASCII_SYMBOLS
        } else {
            UNICODE_SYMBOLS
        }
    }
}

impl Default for Symbols {
    fn default() -> Self {
        Self::detect()
    }
}

/// Events that drive the TUI event loop.
#[derive(Debug, Clone)]
pub enum TuiEvent {
    /// Periodic tick for animations and timers.
    Tick,
    /// Terminal input event.
    Key(KeyEvent),
    /// Terminal resize event (columns, rows).
    Resize(u16, u16),
}

/// Default tick rate for the event handler (60ms = ~16 FPS).
pub const DEFAULT_TICK_RATE_MS: u64 = 60;

/// Default poll timeout for checking terminal input (10ms).
const DEFAULT_POLL_TIMEOUT_MS: u64 = 10;

/// Handles terminal input and generates periodic tick events.
///
/// Runs an async loop that multiplexes three event sources with
/// `tokio::select!`: a tick interval, non-blocking terminal polling (via
/// `spawn_blocking` so crossterm never blocks the async runtime), and a
/// oneshot shutdown signal.
#[derive(Debug)]
pub struct EventHandler {
    /// Channel sender for dispatching events to the main loop.
    event_tx: mpsc::Sender<TuiEvent>,
    /// Receiver for the shutdown signal.
    shutdown_rx: oneshot::Receiver<()>,
    /// Tick rate.
    tick_rate: Duration,
}

impl EventHandler {
    /// Creates a new `EventHandler` with the default tick rate.
    pub fn new(event_tx: mpsc::Sender<TuiEvent>, shutdown_rx: oneshot::Receiver<()>) -> Self {
        Self {
            event_tx,
            shutdown_rx,
            tick_rate: Duration::from_millis(DEFAULT_TICK_RATE_MS),
        }
    }

    /// Runs the event loop until a shutdown signal is received or the
    /// receiving side of the event channel is dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal polling task panics.
    pub async fn run(mut self) -> std::io::Result<()> {
        let mut tick_interval = tokio::time::interval(self.tick_rate);
        tick_interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Burst);

        // Consume the first tick immediately (interval ticks on creation)
        tick_interval.tick().await;

        loop {
            tokio::select! {
                biased;

                // Highest priority: check for shutdown signal
                _ = &mut self.shutdown_rx => {
                    tracing::debug!("EventHandler received shutdown signal");
                    break;
                }

                _ = tick_interval.tick() => {
                    if self.event_tx.send(TuiEvent::Tick).await.is_err() {
                        tracing::debug!("Event receiver dropped, exiting event loop");
                        break;
                    }
                }

                result = async {
                    tokio::time::sleep(Duration::from_millis(DEFAULT_POLL_TIMEOUT_MS)).await;
                    tokio::task::spawn_blocking(|| {
                        Self::poll_terminal_event(Duration::from_millis(DEFAULT_POLL_TIMEOUT_MS))
                    }).await
                } => {
                    match result {
                        Ok(Some(event)) => {
                            if self.event_tx.send(event).await.is_err() {
                                tracing::debug!("Event receiver dropped, exiting event loop");
                                break;
                            }
                        }
                        Ok(None) => {}
                        Err(join_error) => {
                            tracing::error!("spawn_blocking task panicked: {}", join_error);
                            return Err(std::io::Error::other("Terminal polling task panicked"));
                        }
                    }
                }
            }
        }

        Ok(())
    }

    /// Polls for a terminal event with the specified timeout.
    ///
    /// In non-terminal environments (CI, tests) polling may fail; that is
    /// treated as "no event" rather than an error.
    fn poll_terminal_event(timeout: Duration) -> Option<TuiEvent> {
        match event::poll(timeout) {
            Ok(true) => match event::read() {
                Ok(crossterm_event) => Self::convert_crossterm_event(crossterm_event),
                Err(e) => {
                    tracing::trace!("Failed to read terminal event: {}", e);
                    None
                }
            },
            Ok(false) => None,
            Err(e) => {
                tracing::trace!("Failed to poll terminal: {}", e);
                None
            }
        }
    }

    /// Converts a crossterm event to a [`TuiEvent`], dropping unsupported
    /// event types (mouse, focus, paste).
    fn convert_crossterm_event(event: CrosstermEvent) -> Option<TuiEvent> {
        match event {
            CrosstermEvent::Key(key_event) => Some(TuiEvent::Key(key_event)),
            CrosstermEvent::Resize(cols, rows) => Some(TuiEvent::Resize(cols, rows)),
            CrosstermEvent::Mouse(_) => None,
            CrosstermEvent::FocusGained | CrosstermEvent::FocusLost => None,
            CrosstermEvent::Paste(_) => None,
        }
    }
}

/// Application state for the Bucketlist TUI.
///
/// Wraps the [`ListController`] with presentation-only state: the selection
/// cursor (an index into the *sorted* view), theme, symbols, and the quit
/// flags. The controller remains the single owner of the list state.
pub struct AppState {
    /// The list controller owning all collection state.
    pub controller: ListController,

    /// Selected row in the sorted view, if any.
    pub selected: Option<usize>,

    /// Flag indicating the user requested exit.
    pub should_quit: bool,

    /// Whether exit was requested via sign-out (the caller then removes the
    /// stored session).
    pub signed_out: bool,

    /// Theme configuration.
    pub theme: Theme,

    /// Symbol set (unicode or ASCII).
    pub symbols: Symbols,
}

impl AppState {
    /// Creates the state around an existing controller, with theme and
    /// symbols detected from the environment.
    #[must_use]
    pub fn new(controller: ListController) -> Self {
        Self {
            controller,
            selected: None,
            should_quit: false,
            signed_out: false,
            theme: Theme::from_env(),
            symbols: Symbols::detect(),
        }
    }

    /// Signals that the application should quit.
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// The id of the currently selected item, resolved through the sorted
    /// view the user is looking at.
    #[must_use]
    pub fn selected_item_id(&self) -> Option<String> {
        let index = self.selected?;
        view::sorted(&self.controller.items)
            .get(index)
            .map(|item| item.id.clone())
    }

    /// Moves the selection down one row, clamping to the last item.
    pub fn select_next(&mut self) {
        let len = self.controller.items.len();
        if len == 0 {
            self.selected = None;
            return;
        }
        self.selected = Some(match self.selected {
            Some(index) => (index + 1).min(len - 1),
            None => 0,
        });
    }

    /// Moves the selection up one row, clamping to the first item.
    pub fn select_previous(&mut self) {
        let len = self.controller.items.len();
        if len == 0 {
            self.selected = None;
            return;
        }
        self.selected = Some(match self.selected {
            Some(index) => index.saturating_sub(1),
            None => 0,
        });
    }

    /// Re-clamps the selection after the collection changed size.
    pub fn clamp_selection(&mut self) {
        let len = self.controller.items.len();
        if len == 0 {
            self.selected = None;
        } else if let Some(index) = self.selected {
            self.selected = Some(index.min(len - 1));
        }
    }

    /// Dispatches a key event to the matching controller action.
    ///
    /// The delete confirmation prompt is modal: while it is open, only
    /// confirm/decline keys are interpreted.
    pub async fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        // The confirmation prompt blocks everything else
        if self.controller.is_confirming_delete() {
            match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                    self.controller.confirm_delete().await;
                    self.clamp_selection();
                }
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                    self.controller.cancel_delete();
                }
                _ => {}
            }
            return;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('c') => self.quit(),
                KeyCode::Char('o') => {
                    self.controller.sign_out().await;
                    self.signed_out = true;
                    self.quit();
                }
                KeyCode::Char('t') => {
                    if let Some(id) = self.selected_item_id() {
                        self.controller.toggle_completed(&id).await;
                    }
                }
                KeyCode::Char('d') => {
                    if let Some(id) = self.selected_item_id() {
                        self.controller.request_delete(&id);
                    }
                }
                _ => {}
            }
            return;
        }

        match key.code {
            KeyCode::Enter => {
                self.controller.submit_draft().await;
                self.clamp_selection();
            }
            KeyCode::Esc => self.controller.dismiss_error(),
            KeyCode::Backspace => self.controller.pop_draft_char(),
            KeyCode::Up => self.select_previous(),
            KeyCode::Down => self.select_next(),
            KeyCode::Tab => {
                if let Some(id) = self.selected_item_id() {
                    self.controller.toggle_completed(&id).await;
                }
            }
            KeyCode::Char(c) => self.controller.push_draft_char(c),
            _ => {}
        }
    }
}

/// The Bucketlist TUI application.
pub struct App {
    state: AppState,
}

impl App {
    /// Creates the application around a controller.
    #[must_use]
    pub fn new(controller: ListController) -> Self {
        Self {
            state: AppState::new(controller),
        }
    }

    /// Runs the TUI until the user quits.
    ///
    /// The session gate runs exactly once, before the first frame; it is
    /// never re-triggered by later state changes.
    ///
    /// # Returns
    ///
    /// `true` when the user exited via sign-out (the caller should remove
    /// the stored session).
    ///
    /// # Errors
    ///
    /// Returns `ClientError` if terminal setup or rendering fails.
    pub async fn run(mut self) -> Result<bool, ClientError> {
        install_panic_hook();
        let mut tui = Tui::new().map_err(TuiError::TerminalInit)?;

        let (event_tx, mut event_rx) = mpsc::channel(100);
        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        let handler = EventHandler::new(event_tx, shutdown_rx);
        let handler_task = tokio::spawn(handler.run());

        // Session gate: once per mount
        self.state.controller.initialize().await;

        while !self.state.should_quit {
            tui.draw(|frame| ui::render(frame, &self.state))
                .map_err(TuiError::Render)?;

            match event_rx.recv().await {
                Some(TuiEvent::Key(key)) => self.state.handle_key(key).await,
                Some(TuiEvent::Tick) | Some(TuiEvent::Resize(_, _)) => {}
                None => break,
            }
        }

        let _ = shutdown_tx.send(());
        let _ = handler_task.await;

        tui.restore().map_err(TuiError::Render)?;

        Ok(self.state.signed_out)
    }
}

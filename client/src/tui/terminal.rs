//! Terminal setup and RAII restoration for the Bucketlist TUI.
//!
//! This module provides the [`Tui`] struct that wraps a ratatui terminal with
//! automatic cleanup via the [`Drop`] trait. The terminal enters raw mode and
//! the alternate screen on creation, and restores the original state on drop.
//!
//! # Cleanup Behavior
//!
//! The terminal state is restored in three scenarios:
//!
//! 1. **Normal drop**: When [`Tui`] goes out of scope
//! 2. **Explicit restore**: By calling [`Tui::restore()`]
//! 3. **Panic hook**: Via [`install_panic_hook()`] which ensures restoration
//!    even if a panic occurs before the [`Drop`] handler runs
//!
//! The [`Drop`] implementation silently ignores errors during cleanup to avoid
//! panics during stack unwinding.

use std::io::{self, Stdout};
use std::panic;

use crossterm::{
    cursor::{Hide, Show},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Frame, Terminal};

/// Installs a panic hook that restores terminal state before displaying panic
/// messages.
///
/// Call this **once** at application startup, **before** creating any [`Tui`]
/// instance. It captures the existing panic hook and replaces it with one that
/// shows the cursor, leaves the alternate screen, and disables raw mode before
/// delegating to the previous handler, so the panic message lands in a usable
/// terminal.
pub fn install_panic_hook() {
    let previous_hook = panic::take_hook();

    panic::set_hook(Box::new(move |panic_info| {
        // The terminal may already be in an inconsistent state, so the
        // restoration is best-effort.
        let _ = execute!(io::stdout(), Show);
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        let _ = disable_raw_mode();

        previous_hook(panic_info);
    }));
}

/// A wrapper around ratatui's Terminal that provides RAII-based cleanup.
///
/// When dropped, this struct automatically shows the cursor, leaves the
/// alternate screen, and disables raw mode, so the terminal is restored even
/// if the application exits unexpectedly.
pub struct Tui {
    /// The underlying ratatui terminal.
    terminal: Terminal<CrosstermBackend<Stdout>>,
    /// Track whether the terminal has been restored to avoid double cleanup.
    restored: bool,
}

impl Tui {
    /// Creates a new TUI instance, initializing the terminal for raw mode.
    ///
    /// Enables raw mode, enters the alternate screen buffer, hides the
    /// cursor, and creates the ratatui terminal.
    ///
    /// # Errors
    ///
    /// Returns an error if any terminal initialization step fails.
    pub fn new() -> io::Result<Self> {
        enable_raw_mode()?;

        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, Hide)?;

        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        Ok(Self {
            terminal,
            restored: false,
        })
    }

    /// Draws a frame using the provided rendering closure.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying draw call fails.
    pub fn draw<F>(&mut self, render: F) -> io::Result<()>
    where
        F: FnOnce(&mut Frame),
    {
        self.terminal.draw(render)?;
        Ok(())
    }

    /// Explicitly restores the terminal to its original state.
    ///
    /// Idempotent: subsequent calls (and the eventual drop) are no-ops.
    ///
    /// # Errors
    ///
    /// Returns an error if any restoration step fails.
    pub fn restore(&mut self) -> io::Result<()> {
        if self.restored {
            return Ok(());
        }

        execute!(io::stdout(), Show, LeaveAlternateScreen)?;
        disable_raw_mode()?;
        self.restored = true;

        Ok(())
    }
}

impl Drop for Tui {
    fn drop(&mut self) {
        // Errors are ignored: this may run during unwinding.
        let _ = self.restore();
    }
}

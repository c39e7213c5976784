//! Terminal user interface for the Bucketlist client.
//!
//! A TUI built with [`ratatui`] around the list controller. The interface
//! shows the bucket list with completion stats, a draft input, and the
//! single-slot error banner.
//!
//! # Architecture
//!
//! - **App** ([`app`]): application state, key dispatch, and the event loop
//! - **UI** ([`ui`]): layout and rendering
//! - **Terminal** ([`terminal`]): raw-mode setup and RAII restoration
//!
//! # Usage
//!
//! ```ignore
//! use bucketlist_client::tui::App;
//!
//! let app = App::new(controller);
//! let signed_out = app.run().await?;
//! ```

pub mod app;
pub mod terminal;
pub mod ui;

pub use app::{App, AppState, EventHandler, Symbols, Theme, TuiEvent};
pub use terminal::{install_panic_hook, Tui};

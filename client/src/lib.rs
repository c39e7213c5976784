//! Bucketlist - terminal client for a remote bucket list.
//!
//! This crate implements a small client around a remote GraphQL bucket list
//! API and a hosted identity service. All persistence lives remotely; the
//! client owns only the in-memory collection, the synchronization between
//! that collection and the remote store, and the derived presentation
//! (sort order, completion stats).
//!
//! # Overview
//!
//! The [`controller::ListController`] is the only stateful component: it
//! gates on a session check, then mediates the four remote operations
//! (list, create, update-completion, delete) and converts every expected
//! failure into a single user-facing error slot. Everything the UI shows is
//! derived from the controller's state on each frame by the pure [`view`]
//! functions.
//!
//! # Modules
//!
//! - [`api`]: GraphQL transport for the four remote operations
//! - [`config`]: Configuration from environment variables
//! - [`controller`]: Client state and action handlers
//! - [`error`]: Error types for client operations
//! - [`session`]: Identity collaborator and session-token storage
//! - [`types`]: Bucket item entity and mutation inputs
//! - [`tui`]: Terminal user interface
//! - [`view`]: Pure derived view (ordering, counts, progress)

pub mod api;
pub mod config;
pub mod controller;
pub mod error;
pub mod session;
pub mod tui;
pub mod types;
pub mod view;

pub use api::{ApiClient, ApiError};
pub use config::Config;
pub use controller::ListController;
pub use error::{ClientError, Result, TuiError};
pub use session::{AuthClient, AuthError, SessionStore, SessionUser, StoredSession};
pub use types::{BucketItem, CreateItemInput, DeleteItemInput, DeletedId, UpdateItemInput};

//! Bucketlist - terminal client for a remote bucket list.
//!
//! This binary signs in against a hosted identity service and drives a
//! remote GraphQL bucket list API from a terminal UI.
//!
//! # Commands
//!
//! - `bucketlist login`: Validate a bearer token and store the session
//! - `bucketlist logout`: Revoke and remove the stored session
//! - `bucketlist run`: Start the interactive list UI
//!
//! # Environment Variables
//!
//! See the [`config`] module for available configuration options.

use std::io::{self, BufRead};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use bucketlist_client::config::Config;
use bucketlist_client::controller::ListController;
use bucketlist_client::session::{AuthClient, SessionStore, StoredSession};
use bucketlist_client::tui::App;
use bucketlist_client::ApiClient;

/// Bucketlist - terminal client for a remote bucket list.
///
/// Keeps a personal bucket list in a remote store: add items, mark them
/// completed, and delete them, with authentication delegated to a hosted
/// identity service.
#[derive(Parser, Debug)]
#[command(name = "bucketlist")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "\
ENVIRONMENT VARIABLES:
    BUCKETLIST_API_URL       GraphQL endpoint URL (required)
    BUCKETLIST_AUTH_URL      Identity service base URL (required)
    BUCKETLIST_SESSION_PATH  Session directory (default: ~/.bucketlist)
    BUCKETLIST_TIMEOUT_SECS  HTTP request timeout (default: 30)

EXAMPLES:
    # Store a session token issued by the identity service
    bucketlist login --token eyJraWQiOi...

    # Start the list UI
    export BUCKETLIST_API_URL=https://api.example.com/graphql
    export BUCKETLIST_AUTH_URL=https://auth.example.com
    bucketlist run

    # Sign out
    bucketlist logout
")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

/// CLI subcommands.
#[derive(Subcommand, Debug)]
enum Command {
    /// Validate a bearer token and store the session.
    ///
    /// The token is checked against the identity service before it is
    /// persisted; an invalid token is refused.
    Login {
        /// Bearer token issued by the identity service. Read from stdin
        /// when omitted.
        #[arg(short, long)]
        token: Option<String>,
    },

    /// Revoke and remove the stored session.
    ///
    /// Revocation is best-effort; the local session file is removed
    /// regardless. Succeeds when no session is stored.
    Logout,

    /// Start the interactive list UI.
    ///
    /// Requires BUCKETLIST_API_URL and BUCKETLIST_AUTH_URL.
    Run,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to create tokio runtime")?;

    match cli.command {
        Command::Login { token } => {
            init_logging("info");
            runtime.block_on(run_login(token))
        }
        Command::Logout => {
            init_logging("info");
            runtime.block_on(run_logout())
        }
        Command::Run => {
            // Keep the subscriber quiet by default: stderr writes would
            // corrupt the alternate screen.
            init_logging("error");
            runtime.block_on(run_tui())
        }
    }
}

/// Runs the login command: validate the token, then persist it.
async fn run_login(token: Option<String>) -> Result<()> {
    let config = Config::from_env().context("Failed to load configuration")?;

    let token = match token {
        Some(t) => t,
        None => read_token_from_stdin()?,
    };

    if token.is_empty() {
        anyhow::bail!("No token provided");
    }

    let auth = AuthClient::new(config.auth_url.clone(), config.timeout);
    let user = auth
        .current_session(&token)
        .await
        .context("The identity service rejected the token")?;

    let store = SessionStore::new(&config.session_path);
    store
        .save(&StoredSession { token })
        .context("Failed to store session")?;

    info!(username = %user.username, "Session stored");
    println!("Signed in as {}.", user.username);

    Ok(())
}

/// Runs the logout command: best-effort revoke, then remove the session file.
async fn run_logout() -> Result<()> {
    let config = Config::from_env().context("Failed to load configuration")?;
    let store = SessionStore::new(&config.session_path);

    if let Ok(session) = store.load() {
        let auth = AuthClient::new(config.auth_url.clone(), config.timeout);
        auth.sign_out(&session.token).await;
    }

    store.delete().context("Failed to remove session file")?;
    println!("Signed out.");

    Ok(())
}

/// Runs the interactive list UI.
async fn run_tui() -> Result<()> {
    let config = Config::from_env().context("Failed to load configuration")?;
    let store = SessionStore::new(&config.session_path);

    // A missing session is not fatal here: the controller's session gate
    // fails against the identity service and the UI shows the sign-in
    // prompt state.
    let token = store.load().map(|s| s.token).unwrap_or_default();

    let api = ApiClient::new(config.api_url.clone(), token.clone(), config.timeout);
    let auth = AuthClient::new(config.auth_url.clone(), config.timeout);
    let controller = ListController::new(api, auth, token);

    let app = App::new(controller);
    let signed_out = app.run().await.context("TUI terminated with an error")?;

    if signed_out {
        store.delete().context("Failed to remove session file")?;
        println!("Signed out.");
    }

    Ok(())
}

/// Reads a token from the first line of stdin.
fn read_token_from_stdin() -> Result<String> {
    let stdin = io::stdin();
    let mut line = String::new();
    stdin
        .lock()
        .read_line(&mut line)
        .context("Failed to read token from stdin")?;
    Ok(line.trim().to_string())
}

/// Initializes the logging subsystem.
fn init_logging(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(true)
        .with_level(true)
        .init();
}

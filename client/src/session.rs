//! Identity collaborator for the Bucketlist client.
//!
//! Authentication is delegated entirely to a hosted identity service; this
//! module only stores the opaque bearer token it issues and asks it two
//! questions:
//!
//! - [`AuthClient::current_session`] - is there a usable session for this
//!   token, and whose is it?
//! - [`AuthClient::sign_out`] - revoke the session (best-effort)
//!
//! The token is persisted as `session.json` in the session directory
//! (`~/.bucketlist/` by default, file mode 0600).
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use std::time::Duration;
//! use bucketlist_client::session::{AuthClient, SessionStore, StoredSession};
//!
//! #[tokio::main]
//! async fn main() {
//!     let store = SessionStore::new(Path::new("/home/user/.bucketlist"));
//!     let session = store.load().unwrap();
//!
//!     let auth = AuthClient::new(
//!         "https://auth.example.com".to_string(),
//!         Duration::from_secs(30),
//!     );
//!     let user = auth.current_session(&session.token).await.unwrap();
//!     println!("Signed in as {}", user.username);
//! }
//! ```

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

/// Session filename within the session directory.
const SESSION_FILE: &str = "session.json";

/// Errors that can occur during authentication or session storage.
#[derive(Error, Debug)]
pub enum AuthError {
    /// HTTP request to the identity service failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The identity service rejected the token.
    #[error("no usable session: identity service returned status {status}")]
    SessionRejected { status: u16 },

    /// No session file exists.
    #[error("no stored session; run 'bucketlist login' first")]
    NoSession,

    /// Session file I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Session file parsing error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// The identity of the signed-in user, as reported by the identity service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    /// Display name of the user.
    pub username: String,

    /// Opaque user identifier.
    #[serde(default)]
    pub user_id: Option<String>,
}

/// A persisted session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredSession {
    /// Opaque bearer token issued by the identity service.
    pub token: String,
}

/// Stores the session token on disk.
#[derive(Debug, Clone)]
pub struct SessionStore {
    dir: PathBuf,
}

impl SessionStore {
    /// Creates a store rooted at the given session directory.
    #[must_use]
    pub fn new(dir: &Path) -> Self {
        Self {
            dir: dir.to_path_buf(),
        }
    }

    /// Checks whether a session file exists.
    #[must_use]
    pub fn exists(&self) -> bool {
        self.session_path().exists()
    }

    /// Loads the stored session.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::NoSession`] if no session file exists, or an I/O
    /// or JSON error if the file cannot be read or parsed.
    pub fn load(&self) -> Result<StoredSession, AuthError> {
        let path = self.session_path();
        if !path.exists() {
            return Err(AuthError::NoSession);
        }

        let contents = fs::read_to_string(&path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Saves a session, creating the session directory if needed.
    ///
    /// The session file is written with mode 0600 on Unix (the token is a
    /// credential).
    ///
    /// # Errors
    ///
    /// Returns `AuthError` if the directory cannot be created, the file
    /// cannot be written, or permissions cannot be set.
    pub fn save(&self, session: &StoredSession) -> Result<(), AuthError> {
        fs::create_dir_all(&self.dir)?;

        let path = self.session_path();
        let mut file = File::create(&path)?;
        file.write_all(serde_json::to_string_pretty(session)?.as_bytes())?;
        file.write_all(b"\n")?;

        // Session token is a credential: owner read/write only
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = fs::metadata(&path)?.permissions();
            perms.set_mode(0o600);
            fs::set_permissions(&path, perms)?;
        }

        Ok(())
    }

    /// Deletes the session file.
    ///
    /// Idempotent: succeeds when no session file exists.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if an existing file cannot be removed.
    pub fn delete(&self) -> Result<(), AuthError> {
        let path = self.session_path();
        if path.exists() {
            fs::remove_file(&path)?;
        }
        Ok(())
    }

    fn session_path(&self) -> PathBuf {
        self.dir.join(SESSION_FILE)
    }
}

/// HTTP client for the hosted identity service.
#[derive(Debug, Clone)]
pub struct AuthClient {
    client: Client,
    base_url: String,
}

impl AuthClient {
    /// Creates a new identity service client.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Identity service base URL
    /// * `timeout` - Per-request timeout
    #[must_use]
    pub fn new(base_url: String, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self { client, base_url }
    }

    /// Queries the identity service for the current session.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::SessionRejected`] when the service answers with
    /// a non-success status (no usable session), or a transport error if the
    /// call never completes.
    pub async fn current_session(&self, token: &str) -> Result<SessionUser, AuthError> {
        let url = format!("{}/session", self.base_url);

        debug!(url = %url, "Checking current session");

        let response = self.client.get(&url).bearer_auth(token).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AuthError::SessionRejected {
                status: status.as_u16(),
            });
        }

        Ok(response.json().await?)
    }

    /// Signs out the current session.
    ///
    /// Best-effort: revocation failures are logged and swallowed, since the
    /// local session file is removed regardless.
    pub async fn sign_out(&self, token: &str) {
        let url = format!("{}/signout", self.base_url);

        match self.client.post(&url).bearer_auth(token).send().await {
            Ok(response) if response.status().is_success() => {
                debug!("Session revoked");
            }
            Ok(response) => {
                warn!(status = response.status().as_u16(), "Sign-out rejected");
            }
            Err(e) => {
                warn!(error = %e, "Sign-out request failed");
            }
        }
    }
}

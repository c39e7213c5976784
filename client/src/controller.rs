//! The list controller: all client-side state and the actions that mutate it.
//!
//! The controller owns the in-memory collection and mediates every remote
//! operation. Each user action maps to one handler; each handler issues at
//! most one remote call and reconciles local state only from the server's
//! response. Expected failures never propagate: they are caught here and
//! converted into the single user-facing error slot.
//!
//! # State transitions
//!
//! ```text
//! initialize ──ok──> refresh ──ok──> items replaced, loading = false
//!      │                 └──err──> error = load-failed, loading = false
//!      └──err──> error = sign-in, loading = false, no further calls
//!
//! submit_draft     create call   ──ok──> append echoed item, clear draft
//! toggle_completed update call   ──ok──> replace matching item by id
//! request_delete ─> pending ─ confirm_delete ──ok──> remove matching id
//!                        └─── cancel_delete ──> no call, no change
//! ```
//!
//! Every successful action clears the error slot; every failed remote call
//! overwrites it. Only one error is visible at a time.

use tracing::{debug, warn};

use crate::api::ApiClient;
use crate::session::{AuthClient, SessionUser};
use crate::types::{
    BucketItem, CreateItemInput, DeleteItemInput, UpdateItemInput, MAX_TITLE_LEN,
};

/// Shown when the session gate fails.
const SIGN_IN_MESSAGE: &str = "Please sign in to view your bucket list";

/// Shown when the initial fetch fails.
const LOAD_FAILED_MESSAGE: &str = "Failed to load your bucket list";

/// Shown when a create call fails.
const ADD_FAILED_MESSAGE: &str = "Failed to add item. Please try again.";

/// Shown when an update call fails.
const UPDATE_FAILED_MESSAGE: &str = "Failed to update item. Please try again.";

/// Shown when a delete call fails.
const DELETE_FAILED_MESSAGE: &str = "Failed to delete item. Please try again.";

/// Owns the local collection and orchestrates the four remote operations.
pub struct ListController {
    api: ApiClient,
    auth: AuthClient,
    token: String,

    /// The local collection. Order irrelevant at rest; rendering sorts it.
    pub items: Vec<BucketItem>,

    /// In-progress text for a not-yet-submitted item.
    pub draft: String,

    /// True while the initial fetch is outstanding.
    pub loading: bool,

    /// At most one active user-facing error message.
    pub error: Option<String>,

    /// The signed-in user; absence gates all list operations.
    pub user: Option<SessionUser>,

    /// Item id awaiting the delete confirmation prompt.
    pub pending_delete: Option<String>,
}

impl ListController {
    /// Creates a controller in its pre-mount state: empty collection,
    /// loading, no user, no error.
    #[must_use]
    pub fn new(api: ApiClient, auth: AuthClient, token: String) -> Self {
        Self {
            api,
            auth,
            token,
            items: Vec::new(),
            draft: String::new(),
            loading: true,
            error: None,
            user: None,
            pending_delete: None,
        }
    }

    /// The session gate: runs exactly once per mount.
    ///
    /// On a usable session, stores the user marker and performs the initial
    /// fetch. On failure, settles into the signed-out presentation and
    /// issues no further remote calls. A session expiring later is only
    /// detected when the next remote call itself fails.
    pub async fn initialize(&mut self) {
        match self.auth.current_session(&self.token).await {
            Ok(user) => {
                debug!(username = %user.username, "Session check passed");
                self.user = Some(user);
                self.refresh().await;
            }
            Err(e) => {
                warn!(error = %e, "Not authenticated");
                self.loading = false;
                self.error = Some(SIGN_IN_MESSAGE.to_string());
            }
        }
    }

    /// Replaces the local collection from the remote store.
    ///
    /// On failure the collection is left untouched. Loading clears when the
    /// call settles, success or failure.
    pub async fn refresh(&mut self) {
        self.loading = true;
        self.error = None;

        match self.api.list_items().await {
            Ok(items) => {
                debug!(count = items.len(), "Item list loaded");
                self.items = items;
            }
            Err(e) => {
                warn!(error = %e, "Failed to fetch items");
                self.error = Some(LOAD_FAILED_MESSAGE.to_string());
            }
        }

        self.loading = false;
    }

    /// Submits the draft as a new item.
    ///
    /// A whitespace-only draft is a no-op: no call is issued and nothing
    /// changes. On success the server's echoed item (authoritative id and
    /// timestamps) is appended and the draft cleared; there is no optimistic
    /// insertion. On failure both the collection and the draft are left
    /// unchanged.
    pub async fn submit_draft(&mut self) {
        let title = self.draft.trim().to_string();
        if title.is_empty() {
            return;
        }

        let input = CreateItemInput {
            title,
            description: String::new(),
            completed: false,
        };

        match self.api.create_item(input).await {
            Ok(item) => {
                debug!(item_id = %item.id, "Item created");
                self.items.push(item);
                self.draft.clear();
                self.error = None;
            }
            Err(e) => {
                warn!(error = %e, "Failed to create item");
                self.error = Some(ADD_FAILED_MESSAGE.to_string());
            }
        }
    }

    /// Flips the completion flag of the item with the given id.
    ///
    /// On success the matching item is replaced wholesale with the server's
    /// returned copy; every other item is untouched. An id not present
    /// locally is a no-op. A concurrent remote delete surfaces as the
    /// generic update failure.
    pub async fn toggle_completed(&mut self, id: &str) {
        let Some(current) = self.items.iter().find(|item| item.id == id) else {
            return;
        };

        let input = UpdateItemInput {
            id: current.id.clone(),
            completed: !current.completed,
        };

        match self.api.update_item(input).await {
            Ok(updated) => {
                debug!(item_id = %updated.id, completed = updated.completed, "Item updated");
                if let Some(slot) = self.items.iter_mut().find(|item| item.id == updated.id) {
                    *slot = updated;
                }
                self.error = None;
            }
            Err(e) => {
                warn!(item_id = %id, error = %e, "Failed to update item");
                self.error = Some(UPDATE_FAILED_MESSAGE.to_string());
            }
        }
    }

    /// Records an item id as awaiting the confirmation prompt.
    ///
    /// No remote call is issued until [`confirm_delete`](Self::confirm_delete).
    pub fn request_delete(&mut self, id: &str) {
        self.pending_delete = Some(id.to_string());
    }

    /// Declines the pending delete: no call, no state change.
    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Confirms the pending delete and issues the call.
    ///
    /// The item is removed locally only after the remote call succeeds; on
    /// failure it remains in place. The pending id is cleared either way.
    pub async fn confirm_delete(&mut self) {
        let Some(id) = self.pending_delete.take() else {
            return;
        };

        let input = DeleteItemInput { id: id.clone() };

        match self.api.delete_item(input).await {
            Ok(deleted) => {
                debug!(item_id = %deleted.id, "Item deleted");
                self.items.retain(|item| item.id != deleted.id);
                self.error = None;
            }
            Err(e) => {
                warn!(item_id = %id, error = %e, "Failed to delete item");
                self.error = Some(DELETE_FAILED_MESSAGE.to_string());
            }
        }
    }

    /// Signs out via the identity service (best-effort) and clears the user
    /// marker. The caller removes the session file.
    pub async fn sign_out(&mut self) {
        self.auth.sign_out(&self.token).await;
        self.user = None;
    }

    /// Appends a character to the draft, ignoring input past the title
    /// length cap.
    pub fn push_draft_char(&mut self, c: char) {
        if self.draft.chars().count() < MAX_TITLE_LEN {
            self.draft.push(c);
        }
    }

    /// Removes the last character from the draft.
    pub fn pop_draft_char(&mut self) {
        self.draft.pop();
    }

    /// Explicitly dismisses the active error message.
    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    /// Whether a delete confirmation prompt is open.
    #[must_use]
    pub fn is_confirming_delete(&self) -> bool {
        self.pending_delete.is_some()
    }
}

//! Shared types for the Bucketlist client.
//!
//! This module defines the bucket item entity as it appears in the remote
//! GraphQL schema, plus the mutation input shapes. All types serialize to
//! camelCase JSON to match the wire format.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Maximum length of an item title, enforced client-side before any
/// create call is issued.
pub const MAX_TITLE_LEN: usize = 200;

/// A single bucket list entry.
///
/// The `id`, timestamps, and `owner` are assigned by the remote API on
/// creation and are authoritative; the client never fabricates them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BucketItem {
    /// Opaque unique identifier, assigned remotely and never reassigned.
    pub id: String,

    /// Item title. Non-empty; at most [`MAX_TITLE_LEN`] characters.
    pub title: String,

    /// Optional free-text description, defaults to empty.
    #[serde(default)]
    pub description: String,

    /// Whether the item has been completed.
    pub completed: bool,

    /// When the item was created (server clock).
    pub created_at: DateTime<Utc>,

    /// When the item was last updated (server clock).
    pub updated_at: DateTime<Utc>,

    /// Identity of the creating user, assigned remotely.
    #[serde(default)]
    pub owner: Option<String>,
}

/// Input for the `createBucketItem` mutation.
#[derive(Debug, Clone, Serialize)]
pub struct CreateItemInput {
    pub title: String,
    pub description: String,
    pub completed: bool,
}

/// Input for the `updateBucketItem` mutation.
///
/// Only the completion flag is mutable in this system; title and
/// description are immutable after creation.
#[derive(Debug, Clone, Serialize)]
pub struct UpdateItemInput {
    pub id: String,
    pub completed: bool,
}

/// Input for the `deleteBucketItem` mutation.
#[derive(Debug, Clone, Serialize)]
pub struct DeleteItemInput {
    pub id: String,
}

/// The id echoed back by the `deleteBucketItem` mutation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DeletedId {
    pub id: String,
}

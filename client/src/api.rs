//! GraphQL transport for the Bucketlist client.
//!
//! This module wraps the remote bucket list API behind four typed
//! operations:
//!
//! - [`ApiClient::list_items`] - fetch the full collection
//! - [`ApiClient::create_item`] - create a new item
//! - [`ApiClient::update_item`] - flip an item's completion flag
//! - [`ApiClient::delete_item`] - delete an item by id
//!
//! Every operation is a single POST of `{query, variables}` with a bearer
//! token, issued exactly once. There is no retry or backoff: expected
//! failures surface as [`ApiError`] values for the caller to translate into
//! user-facing state.
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//! use bucketlist_client::api::ApiClient;
//!
//! #[tokio::main]
//! async fn main() {
//!     let api = ApiClient::new(
//!         "https://api.example.com/graphql".to_string(),
//!         "token".to_string(),
//!         Duration::from_secs(30),
//!     );
//!
//!     let items = api.list_items().await.unwrap();
//!     println!("{} items", items.len());
//! }
//! ```

use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;
use tracing::{debug, warn};

use crate::types::{
    BucketItem, CreateItemInput, DeleteItemInput, DeletedId, UpdateItemInput,
};

/// Query for fetching the full item collection.
const LIST_BUCKET_ITEMS: &str = "\
query ListBucketItems {
  listBucketItems {
    items {
      id
      title
      description
      completed
      createdAt
      updatedAt
      owner
    }
  }
}";

/// Mutation for creating a new item.
const CREATE_BUCKET_ITEM: &str = "\
mutation CreateBucketItem($input: CreateBucketItemInput!) {
  createBucketItem(input: $input) {
    id
    title
    description
    completed
    createdAt
    updatedAt
    owner
  }
}";

/// Mutation for updating an item's completion flag.
const UPDATE_BUCKET_ITEM: &str = "\
mutation UpdateBucketItem($input: UpdateBucketItemInput!) {
  updateBucketItem(input: $input) {
    id
    title
    description
    completed
    createdAt
    updatedAt
    owner
  }
}";

/// Mutation for deleting an item.
const DELETE_BUCKET_ITEM: &str = "\
mutation DeleteBucketItem($input: DeleteBucketItemInput!) {
  deleteBucketItem(input: $input) {
    id
  }
}";

/// Errors that can occur while talking to the bucket list API.
#[derive(Error, Debug)]
pub enum ApiError {
    /// HTTP request failed (connection, timeout, or body decode).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Server returned a non-success status.
    #[error("server returned status {status}")]
    Status { status: u16 },

    /// The response carried a GraphQL `errors` array.
    #[error("GraphQL error: {0}")]
    GraphQl(String),

    /// The response had no `data` field and no errors.
    #[error("response missing data field")]
    MissingData,
}

/// A GraphQL request body.
#[derive(Debug, Serialize)]
struct GraphQlRequest<'a> {
    query: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    variables: Option<serde_json::Value>,
}

/// A GraphQL response envelope.
#[derive(Debug, Deserialize)]
struct GraphQlResponse<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

/// A single entry in a GraphQL `errors` array.
#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
}

/// Response data for `listBucketItems`.
///
/// Both the connection and its `items` field may be absent or null; either
/// case yields an empty collection.
#[derive(Debug, Deserialize)]
struct ListData {
    #[serde(rename = "listBucketItems")]
    list_bucket_items: Option<ItemConnection>,
}

#[derive(Debug, Deserialize)]
struct ItemConnection {
    #[serde(default)]
    items: Option<Vec<BucketItem>>,
}

/// Response data for `createBucketItem`.
#[derive(Debug, Deserialize)]
struct CreateData {
    #[serde(rename = "createBucketItem")]
    create_bucket_item: BucketItem,
}

/// Response data for `updateBucketItem`.
#[derive(Debug, Deserialize)]
struct UpdateData {
    #[serde(rename = "updateBucketItem")]
    update_bucket_item: BucketItem,
}

/// Response data for `deleteBucketItem`.
#[derive(Debug, Deserialize)]
struct DeleteData {
    #[serde(rename = "deleteBucketItem")]
    delete_bucket_item: DeletedId,
}

/// Typed GraphQL client for the remote bucket list API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    endpoint: String,
    token: String,
}

impl ApiClient {
    /// Creates a new API client.
    ///
    /// # Arguments
    ///
    /// * `endpoint` - GraphQL endpoint URL
    /// * `token` - Bearer token for the current session
    /// * `timeout` - Per-request timeout
    #[must_use]
    pub fn new(endpoint: String, token: String, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .pool_max_idle_per_host(10)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            endpoint,
            token,
        }
    }

    /// Fetches the full item collection.
    ///
    /// An absent or null `items` field in the response yields an empty
    /// collection rather than an error.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the call fails at the transport, status, or
    /// GraphQL layer.
    pub async fn list_items(&self) -> Result<Vec<BucketItem>, ApiError> {
        let data: ListData = self.execute(LIST_BUCKET_ITEMS, None).await?;

        Ok(data
            .list_bucket_items
            .and_then(|connection| connection.items)
            .unwrap_or_default())
    }

    /// Creates a new item and returns the server's echoed copy.
    ///
    /// The returned item carries the server-assigned id, timestamps, and
    /// owner; callers must use it rather than the input.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the call fails at any layer.
    pub async fn create_item(&self, input: CreateItemInput) -> Result<BucketItem, ApiError> {
        let variables = json!({ "input": input });
        let data: CreateData = self.execute(CREATE_BUCKET_ITEM, Some(variables)).await?;

        Ok(data.create_bucket_item)
    }

    /// Updates an item's completion flag and returns the full updated item.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the call fails at any layer, including when the
    /// item no longer exists remotely.
    pub async fn update_item(&self, input: UpdateItemInput) -> Result<BucketItem, ApiError> {
        let variables = json!({ "input": input });
        let data: UpdateData = self.execute(UPDATE_BUCKET_ITEM, Some(variables)).await?;

        Ok(data.update_bucket_item)
    }

    /// Deletes an item and returns the deleted id.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the call fails at any layer.
    pub async fn delete_item(&self, input: DeleteItemInput) -> Result<DeletedId, ApiError> {
        let variables = json!({ "input": input });
        let data: DeleteData = self.execute(DELETE_BUCKET_ITEM, Some(variables)).await?;

        Ok(data.delete_bucket_item)
    }

    /// Executes a single GraphQL request and unwraps the response envelope.
    async fn execute<T: DeserializeOwned>(
        &self,
        query: &str,
        variables: Option<serde_json::Value>,
    ) -> Result<T, ApiError> {
        let operation = operation_name(query);

        debug!(url = %self.endpoint, operation, "Sending GraphQL request");

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.token)
            .json(&GraphQlRequest { query, variables })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), operation, "API request rejected");
            return Err(ApiError::Status {
                status: status.as_u16(),
            });
        }

        let envelope: GraphQlResponse<T> = response.json().await?;

        if let Some(error) = envelope.errors.into_iter().next() {
            warn!(operation, message = %error.message, "GraphQL error response");
            return Err(ApiError::GraphQl(error.message));
        }

        envelope.data.ok_or(ApiError::MissingData)
    }
}

/// Extracts the operation name from a query for log fields.
fn operation_name(query: &str) -> &str {
    query
        .split_whitespace()
        .nth(1)
        .map(|name| name.split('(').next().unwrap_or(name))
        .unwrap_or("unknown")
}

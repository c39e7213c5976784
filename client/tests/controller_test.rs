//! Integration tests for the list controller.
//!
//! These tests drive the controller's action handlers against a mock
//! remote API and identity service, verifying the state transitions the
//! client promises: server-authoritative reconciliation, the single error
//! slot, and the no-op paths that must never issue a call.

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use bucketlist_client::api::ApiClient;
use bucketlist_client::controller::ListController;
use bucketlist_client::session::AuthClient;

// =============================================================================
// Test Helpers
// =============================================================================

/// Creates a controller whose API and identity clients point at the mock
/// server.
fn create_controller(server: &MockServer) -> ListController {
    let api = ApiClient::new(
        format!("{}/graphql", server.uri()),
        "test-token".to_string(),
        Duration::from_secs(5),
    );
    let auth = AuthClient::new(server.uri(), Duration::from_secs(5));
    ListController::new(api, auth, "test-token".to_string())
}

/// A bucket item as the API would return it.
fn item_json(id: &str, title: &str, completed: bool, created: &str) -> serde_json::Value {
    json!({
        "id": id,
        "title": title,
        "description": "",
        "completed": completed,
        "createdAt": created,
        "updatedAt": created,
        "owner": "alice"
    })
}

/// Mounts a successful session check for `alice`.
async fn mount_session_ok(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/session"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"username": "alice", "userId": "u-1"})),
        )
        .mount(server)
        .await;
}

/// Mounts a list response with the given items.
async fn mount_list_ok(server: &MockServer, items: serde_json::Value) {
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(body_string_contains("ListBucketItems"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"listBucketItems": {"items": items}}
        })))
        .mount(server)
        .await;
}

// =============================================================================
// Session Gate
// =============================================================================

#[tokio::test]
async fn session_gate_success_fetches_items() {
    let server = MockServer::start().await;
    mount_session_ok(&server).await;
    mount_list_ok(
        &server,
        json!([item_json("item-1", "Visit Japan", false, "2024-03-01T12:00:00Z")]),
    )
    .await;

    let mut controller = create_controller(&server);
    controller.initialize().await;

    assert_eq!(
        controller.user.as_ref().map(|u| u.username.as_str()),
        Some("alice")
    );
    assert!(!controller.loading);
    assert!(controller.error.is_none());
    assert_eq!(controller.items.len(), 1);
    assert_eq!(controller.items[0].title, "Visit Japan");
}

#[tokio::test]
async fn session_gate_failure_blocks_all_list_operations() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/session"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    // The gate must not issue any GraphQL call
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let mut controller = create_controller(&server);
    controller.initialize().await;

    assert!(controller.user.is_none());
    assert!(!controller.loading);
    assert_eq!(
        controller.error.as_deref(),
        Some("Please sign in to view your bucket list")
    );
    assert!(controller.items.is_empty());
}

// =============================================================================
// Fetch-List
// =============================================================================

#[tokio::test]
async fn fetch_failure_preserves_collection_and_sets_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/graphql"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let mut controller = create_controller(&server);
    controller.refresh().await;

    assert!(controller.items.is_empty());
    assert!(!controller.loading);
    assert_eq!(
        controller.error.as_deref(),
        Some("Failed to load your bucket list")
    );
}

#[tokio::test]
async fn fetch_with_null_items_yields_empty_collection() {
    let server = MockServer::start().await;
    mount_list_ok(&server, serde_json::Value::Null).await;

    let mut controller = create_controller(&server);
    controller.refresh().await;

    assert!(controller.items.is_empty());
    assert!(controller.error.is_none());
}

#[tokio::test]
async fn graphql_errors_array_is_a_fetch_failure() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/graphql"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": null,
            "errors": [{"message": "Not Authorized"}]
        })))
        .mount(&server)
        .await;

    let mut controller = create_controller(&server);
    controller.refresh().await;

    assert_eq!(
        controller.error.as_deref(),
        Some("Failed to load your bucket list")
    );
}

#[tokio::test]
async fn successful_action_clears_previous_error() {
    let server = MockServer::start().await;

    // First list call fails, the second succeeds
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(body_string_contains("ListBucketItems"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    mount_list_ok(&server, json!([])).await;

    let mut controller = create_controller(&server);

    controller.refresh().await;
    assert!(controller.error.is_some());

    controller.refresh().await;
    assert!(controller.error.is_none());
}

// =============================================================================
// Create-Item
// =============================================================================

#[tokio::test]
async fn create_appends_server_item_and_clears_draft() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(body_string_contains("CreateBucketItem"))
        .and(body_string_contains("Visit Japan"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"createBucketItem":
                item_json("srv-1", "Visit Japan", false, "2024-03-01T12:00:00Z")}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut controller = create_controller(&server);
    controller.draft = "  Visit Japan  ".to_string();

    controller.submit_draft().await;

    assert_eq!(controller.items.len(), 1);
    assert_eq!(controller.items[0].id, "srv-1");
    assert_eq!(controller.items[0].title, "Visit Japan");
    assert!(!controller.items[0].completed);
    assert!(controller.draft.is_empty());
    assert!(controller.error.is_none());
}

#[tokio::test]
async fn whitespace_draft_never_issues_a_create_call() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/graphql"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let mut controller = create_controller(&server);
    controller.draft = "   ".to_string();

    controller.submit_draft().await;

    assert!(controller.items.is_empty());
    assert_eq!(controller.draft, "   ");
}

#[tokio::test]
async fn create_failure_keeps_draft_and_collection() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/graphql"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let mut controller = create_controller(&server);
    controller.draft = "Visit Japan".to_string();

    controller.submit_draft().await;

    assert!(controller.items.is_empty());
    assert_eq!(controller.draft, "Visit Japan");
    assert_eq!(
        controller.error.as_deref(),
        Some("Failed to add item. Please try again.")
    );
}

// =============================================================================
// Toggle-Completion
// =============================================================================

#[tokio::test]
async fn toggle_twice_returns_item_to_original_state() {
    let server = MockServer::start().await;

    // First update completes the item, the second un-completes it
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(body_string_contains("UpdateBucketItem"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"updateBucketItem":
                item_json("item-1", "Visit Japan", true, "2024-03-01T12:00:00Z")}
        })))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(body_string_contains("UpdateBucketItem"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"updateBucketItem":
                item_json("item-1", "Visit Japan", false, "2024-03-01T12:00:00Z")}
        })))
        .mount(&server)
        .await;

    let mut controller = create_controller(&server);
    controller.items = vec![
        serde_json::from_value(item_json("item-1", "Visit Japan", false, "2024-03-01T12:00:00Z"))
            .unwrap(),
        serde_json::from_value(item_json("item-2", "Learn to surf", true, "2024-03-02T12:00:00Z"))
            .unwrap(),
    ];

    controller.toggle_completed("item-1").await;
    assert!(controller.items[0].completed);

    controller.toggle_completed("item-1").await;
    assert!(!controller.items[0].completed);

    // The other item was never touched
    assert_eq!(controller.items[1].id, "item-2");
    assert!(controller.items[1].completed);
    assert_eq!(controller.items.len(), 2);
}

#[tokio::test]
async fn toggle_failure_leaves_collection_unchanged() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/graphql"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let mut controller = create_controller(&server);
    controller.items = vec![serde_json::from_value(item_json(
        "item-1",
        "Visit Japan",
        false,
        "2024-03-01T12:00:00Z",
    ))
    .unwrap()];

    controller.toggle_completed("item-1").await;

    assert!(!controller.items[0].completed);
    assert_eq!(
        controller.error.as_deref(),
        Some("Failed to update item. Please try again.")
    );
}

// =============================================================================
// Delete-Item
// =============================================================================

#[tokio::test]
async fn confirmed_delete_removes_exactly_the_matching_id() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(body_string_contains("DeleteBucketItem"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"deleteBucketItem": {"id": "item-1"}}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut controller = create_controller(&server);
    controller.items = vec![
        serde_json::from_value(item_json("item-1", "Visit Japan", false, "2024-03-01T12:00:00Z"))
            .unwrap(),
        serde_json::from_value(item_json("item-2", "Learn to surf", false, "2024-03-02T12:00:00Z"))
            .unwrap(),
    ];

    controller.request_delete("item-1");
    controller.confirm_delete().await;

    assert_eq!(controller.items.len(), 1);
    assert_eq!(controller.items[0].id, "item-2");
    assert!(!controller.is_confirming_delete());
    assert!(controller.error.is_none());
}

#[tokio::test]
async fn declined_delete_issues_no_call_and_changes_nothing() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/graphql"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let mut controller = create_controller(&server);
    let original: Vec<bucketlist_client::BucketItem> = vec![serde_json::from_value(item_json(
        "item-1",
        "Visit Japan",
        false,
        "2024-03-01T12:00:00Z",
    ))
    .unwrap()];
    controller.items = original.clone();

    controller.request_delete("item-1");
    controller.cancel_delete();

    assert_eq!(controller.items, original);
    assert!(!controller.is_confirming_delete());
}

#[tokio::test]
async fn delete_failure_keeps_item_and_clears_pending() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/graphql"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let mut controller = create_controller(&server);
    controller.items = vec![serde_json::from_value(item_json(
        "item-1",
        "Visit Japan",
        false,
        "2024-03-01T12:00:00Z",
    ))
    .unwrap()];

    controller.request_delete("item-1");
    controller.confirm_delete().await;

    assert_eq!(controller.items.len(), 1);
    assert!(!controller.is_confirming_delete());
    assert_eq!(
        controller.error.as_deref(),
        Some("Failed to delete item. Please try again.")
    );
}

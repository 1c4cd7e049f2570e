//! Conversation service integration tests
//!
//! Exercises the full send / seen / unread flows over a real PostgreSQL
//! database, with the image upload collaborator mocked and push channels
//! registered where the flow under test delivers to them.
//! Run with `cargo test -- --ignored`.

mod common;

use axum::http::StatusCode;
use axum_test::TestServer;
use pretty_assertions::assert_eq;
use serial_test::serial;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::database::TestDatabase;
use common::fixtures::{bearer, create_accepted_connection, create_test_user};
use wirechat::messaging::ConversationService;
use wirechat::model::{MessageStatus, PushEvent, SendMessagePayload};
use wirechat::realtime::PushRegistry;
use wirechat::routes::create_router;
use wirechat::server::AppState;
use wirechat::upload::ImageUploader;

const IMAGE_DATA: &str = "data:image/png;base64,aGVsbG8=";

fn text_payload(text: &str) -> SendMessagePayload {
    SendMessagePayload {
        text: Some(text.to_string()),
        image: None,
    }
}

async fn mock_upload_service(hosted_url: &str) -> MockServer {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/upload"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "secure_url": hosted_url
        })))
        .mount(&mock_server)
        .await;
    mock_server
}

#[tokio::test]
#[serial]
#[ignore = "requires PostgreSQL"]
async fn test_send_persists_and_pushes_to_connected_receiver() {
    let db = TestDatabase::new().await;
    let registry = PushRegistry::new();
    let service = ConversationService::new(Some(db.pool().clone()), registry.clone(), None);

    let alice = create_test_user(db.pool(), "Alice").await.unwrap();
    let bob = create_test_user(db.pool(), "Bob").await.unwrap();

    let (_ticket, mut bob_rx) = registry.register(bob.id);

    let message = service
        .send(alice.id, bob.id, &text_payload("hello bob"))
        .await
        .unwrap();
    assert_eq!(message.status, MessageStatus::Sent);

    match bob_rx.recv().await {
        Some(PushEvent::NewMessage(pushed)) => assert_eq!(pushed.id, message.id),
        other => panic!("expected newMessage push, got {:?}", other),
    }

    let history = service.history(bob.id, alice.id).await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].text.as_deref(), Some("hello bob"));
}

#[tokio::test]
#[serial]
#[ignore = "requires PostgreSQL"]
async fn test_send_to_disconnected_receiver_still_persists() {
    let db = TestDatabase::new().await;
    let service =
        ConversationService::new(Some(db.pool().clone()), PushRegistry::new(), None);

    let alice = create_test_user(db.pool(), "Alice").await.unwrap();
    let bob = create_test_user(db.pool(), "Bob").await.unwrap();

    service
        .send(alice.id, bob.id, &text_payload("offline message"))
        .await
        .unwrap();

    let history = service.history(alice.id, bob.id).await.unwrap();
    assert_eq!(history.len(), 1);
}

#[tokio::test]
#[serial]
#[ignore = "requires PostgreSQL"]
async fn test_send_with_image_stores_hosted_url() {
    let db = TestDatabase::new().await;
    let mock_server = mock_upload_service("https://images.example.com/xyz.png").await;
    let service = ConversationService::new(
        Some(db.pool().clone()),
        PushRegistry::new(),
        Some(ImageUploader::new(mock_server.uri())),
    );

    let alice = create_test_user(db.pool(), "Alice").await.unwrap();
    let bob = create_test_user(db.pool(), "Bob").await.unwrap();

    let payload = SendMessagePayload {
        text: Some("look at this".to_string()),
        image: Some(IMAGE_DATA.to_string()),
    };
    let message = service.send(alice.id, bob.id, &payload).await.unwrap();

    // The hosted URL is stored, never the raw upload data.
    assert_eq!(
        message.image.as_deref(),
        Some("https://images.example.com/xyz.png")
    );
    assert_eq!(message.text.as_deref(), Some("look at this"));
}

#[tokio::test]
#[serial]
#[ignore = "requires PostgreSQL"]
async fn test_upload_failure_aborts_send_without_persisting() {
    let db = TestDatabase::new().await;
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/upload"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let registry = PushRegistry::new();
    let service = ConversationService::new(
        Some(db.pool().clone()),
        registry.clone(),
        Some(ImageUploader::new(mock_server.uri())),
    );

    let alice = create_test_user(db.pool(), "Alice").await.unwrap();
    let bob = create_test_user(db.pool(), "Bob").await.unwrap();
    let (_ticket, mut bob_rx) = registry.register(bob.id);

    let payload = SendMessagePayload {
        text: None,
        image: Some(IMAGE_DATA.to_string()),
    };
    let err = service.send(alice.id, bob.id, &payload).await.unwrap_err();
    assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);

    // Nothing stored, nothing pushed.
    let history = service.history(alice.id, bob.id).await.unwrap();
    assert!(history.is_empty());
    assert!(bob_rx.try_recv().is_err());
}

#[tokio::test]
#[serial]
#[ignore = "requires PostgreSQL"]
async fn test_mark_seen_notifies_sender_only_when_something_changed() {
    let db = TestDatabase::new().await;
    let registry = PushRegistry::new();
    let service = ConversationService::new(Some(db.pool().clone()), registry.clone(), None);

    let alice = create_test_user(db.pool(), "Alice").await.unwrap();
    let bob = create_test_user(db.pool(), "Bob").await.unwrap();

    service
        .send(alice.id, bob.id, &text_payload("unread"))
        .await
        .unwrap();

    let (_ticket, mut alice_rx) = registry.register(alice.id);

    let updated = service.mark_seen(bob.id, alice.id).await.unwrap();
    assert_eq!(updated, 1);

    match alice_rx.recv().await {
        Some(PushEvent::MessagesSeen { user_id }) => assert_eq!(user_id, bob.id),
        other => panic!("expected messagesSeen push, got {:?}", other),
    }

    // Nothing left to update: no second notification.
    let updated = service.mark_seen(bob.id, alice.id).await.unwrap();
    assert_eq!(updated, 0);
    assert!(alice_rx.try_recv().is_err());
}

#[tokio::test]
#[serial]
#[ignore = "requires PostgreSQL"]
async fn test_chat_endpoints_end_to_end() {
    let db = TestDatabase::new().await;
    let push_registry = PushRegistry::new();
    let conversations =
        ConversationService::new(Some(db.pool().clone()), push_registry.clone(), None);
    let server = TestServer::new(create_router(AppState {
        conversations,
        push_registry,
        db_pool: Some(db.pool().clone()),
    }))
    .unwrap();

    let alice = create_test_user(db.pool(), "Alice").await.unwrap();
    let bob = create_test_user(db.pool(), "Bob").await.unwrap();
    create_accepted_connection(db.pool(), alice.id, bob.id)
        .await
        .unwrap();

    // Alice sees Bob in her contact list.
    let response = server
        .get("/connections")
        .add_header("Authorization", bearer(&alice.token))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: serde_json::Value = response.json();
    assert_eq!(body["message"], "data fetched successfully");
    assert_eq!(body["data"]["length"], 1);
    assert_eq!(body["data"]["data"][0]["fullName"], "Bob");

    // Alice sends Bob a message.
    let response = server
        .post(&format!("/send/{}", bob.id))
        .add_header("Authorization", bearer(&alice.token))
        .json(&serde_json::json!({ "text": "hi bob" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    let message: serde_json::Value = response.json();
    assert_eq!(message["senderId"], alice.id.to_string());
    assert_eq!(message["status"], "sent");

    // Bob's unread counter reflects it.
    let response = server
        .get("/unread-count")
        .add_header("Authorization", bearer(&bob.token))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: serde_json::Value = response.json();
    assert_eq!(body["unreadCount"], 1);

    // Bob reads the conversation and marks it seen.
    let response = server
        .get(&format!("/{}", alice.id))
        .add_header("Authorization", bearer(&bob.token))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let history: serde_json::Value = response.json();
    assert_eq!(history.as_array().unwrap().len(), 1);

    let response = server
        .put(&format!("/seen/{}", alice.id))
        .add_header("Authorization", bearer(&bob.token))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: serde_json::Value = response.json();
    assert_eq!(body["message"], "Messages marked as seen");
    assert_eq!(body["updatedCount"], 1);

    // Counter drops back to zero.
    let response = server
        .get("/unread-count")
        .add_header("Authorization", bearer(&bob.token))
        .await;
    let body: serde_json::Value = response.json();
    assert_eq!(body["unreadCount"], 0);
}

#[tokio::test]
#[serial]
#[ignore = "requires PostgreSQL"]
async fn test_token_for_unknown_user_is_rejected_when_store_present() {
    let db = TestDatabase::new().await;
    let push_registry = PushRegistry::new();
    let conversations =
        ConversationService::new(Some(db.pool().clone()), push_registry.clone(), None);
    let server = TestServer::new(create_router(AppState {
        conversations,
        push_registry,
        db_pool: Some(db.pool().clone()),
    }))
    .unwrap();

    // Valid signature, but no matching user row.
    let token = wirechat::auth::create_token(uuid::Uuid::new_v4()).unwrap();
    let response = server
        .get("/connections")
        .add_header("Authorization", bearer(&token))
        .await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

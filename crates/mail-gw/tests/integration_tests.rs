//! Integration tests for mail-gw.
//!
//! A local axum server stands in for the provider, so these run offline:
//!   cargo test -p mail-gw --test integration_tests

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use mail_gw::{Credentials, MailClient, MailGwConfig, MailGwError};
use serde_json::{json, Value};

const TOKEN: &str = "tok-123";

#[derive(Default)]
struct FakeProvider {
    accounts: Vec<(String, String)>,
    deleted: Vec<String>,
}

type Shared = Arc<Mutex<FakeProvider>>;

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map_or(false, |v| v == format!("Bearer {}", TOKEN))
}

async fn domains() -> Json<Value> {
    Json(json!({
        "@id": "/domains",
        "hydra:member": [
            {"id": "d1", "domain": "mail.gw", "isActive": true, "isPrivate": false},
            {"id": "d2", "domain": "private.gw", "isActive": true, "isPrivate": true}
        ],
        "hydra:totalItems": 2
    }))
}

async fn create_account(
    State(state): State<Shared>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let address = body["address"].as_str().unwrap_or_default().to_string();
    let password = body["password"].as_str().unwrap_or_default().to_string();
    let mut state = state.lock().unwrap();

    if state.accounts.iter().any(|(a, _)| *a == address) {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({"violations": [{"propertyPath": "address", "message": "This value is already used."}]})),
        );
    }

    state.accounts.push((address.clone(), password));
    let id = format!("acc{}", state.accounts.len());
    (
        StatusCode::CREATED,
        Json(json!({
            "id": id,
            "address": address,
            "quota": 40000000,
            "used": 0,
            "createdAt": "2024-03-01T10:00:00+00:00"
        })),
    )
}

async fn token(State(state): State<Shared>, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    let address = body["address"].as_str().unwrap_or_default();
    let password = body["password"].as_str().unwrap_or_default();
    let state = state.lock().unwrap();

    match state.accounts.iter().position(|(a, p)| a == address && p == password) {
        Some(idx) => (
            StatusCode::OK,
            Json(json!({"id": format!("acc{}", idx + 1), "token": TOKEN})),
        ),
        None => (
            StatusCode::UNAUTHORIZED,
            Json(json!({"code": 401, "message": "Invalid credentials."})),
        ),
    }
}

async fn messages(headers: HeaderMap) -> (StatusCode, Json<Value>) {
    if !authorized(&headers) {
        return (StatusCode::UNAUTHORIZED, Json(json!({"code": 401})));
    }
    (
        StatusCode::OK,
        Json(json!({
            "hydra:member": [
                {"id": "m2", "from": {"address": "b@example.com", "name": "B"}, "subject": "Second",
                 "intro": "two", "seen": false, "hasAttachments": false, "createdAt": "2024-03-01T10:10:00+00:00"},
                {"id": "m1", "from": null, "subject": "First",
                 "intro": "one", "seen": true, "hasAttachments": true, "createdAt": "2024-03-01T10:05:00+00:00"}
            ],
            "hydra:totalItems": 2
        })),
    )
}

async fn message(headers: HeaderMap, Path(id): Path<String>) -> (StatusCode, Json<Value>) {
    if !authorized(&headers) {
        return (StatusCode::UNAUTHORIZED, Json(json!({"code": 401})));
    }
    if id != "m1" {
        return (StatusCode::NOT_FOUND, Json(json!({"detail": "Not Found"})));
    }
    (
        StatusCode::OK,
        Json(json!({
            "id": "m1",
            "from": {"address": "a@example.com", "name": "A"},
            "to": [{"address": "qwerty@mail.gw", "name": ""}],
            "subject": "First",
            "text": "line one\nline two",
            "html": [],
            "attachments": [],
            "createdAt": "2024-03-01T10:05:00+00:00"
        })),
    )
}

async fn me(headers: HeaderMap) -> (StatusCode, Json<Value>) {
    if !authorized(&headers) {
        return (StatusCode::UNAUTHORIZED, Json(json!({"code": 401})));
    }
    (
        StatusCode::OK,
        Json(json!({
            "id": "acc1",
            "address": "qwerty@mail.gw",
            "quota": 40000000,
            "used": 1024,
            "createdAt": "2024-03-01T10:00:00+00:00"
        })),
    )
}

async fn remove_account(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> StatusCode {
    if !authorized(&headers) {
        return StatusCode::UNAUTHORIZED;
    }
    state.lock().unwrap().deleted.push(id);
    StatusCode::NO_CONTENT
}

async fn spawn_provider() -> (SocketAddr, Shared) {
    let state: Shared = Arc::new(Mutex::new(FakeProvider::default()));
    let app = Router::new()
        .route("/domains", get(domains))
        .route("/accounts", post(create_account))
        .route("/accounts/:id", delete(remove_account))
        .route("/token", post(token))
        .route("/me", get(me))
        .route("/messages", get(messages))
        .route("/messages/:id", get(message))
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (addr, state)
}

fn client_for(addr: SocketAddr) -> MailClient {
    MailClient::new(MailGwConfig::new(format!("http://{}", addr))).unwrap()
}

#[tokio::test]
async fn test_domains() {
    let (addr, _) = spawn_provider().await;
    let client = client_for(addr);

    let domains = client.domains().await.unwrap();
    assert_eq!(domains.len(), 2);
    assert_eq!(domains[0].domain, "mail.gw");
    assert!(domains[0].is_usable());
    assert!(!domains[1].is_usable());
}

#[tokio::test]
async fn test_register_then_login() {
    let (addr, _) = spawn_provider().await;
    let client = client_for(addr);
    let credentials = Credentials::new("qwerty@mail.gw", "abcdefghijkl");

    let account = client.create_account(&credentials).await.unwrap();
    assert_eq!(account.address, "qwerty@mail.gw");
    assert_eq!(account.id, "acc1");

    let token = client.token(&credentials).await.unwrap();
    assert_eq!(token.bearer(), TOKEN);
    assert_eq!(token.id, "acc1");
}

#[tokio::test]
async fn test_duplicate_address_is_status_error() {
    let (addr, _) = spawn_provider().await;
    let client = client_for(addr);
    let credentials = Credentials::new("qwerty@mail.gw", "abcdefghijkl");

    client.create_account(&credentials).await.unwrap();
    let err = client.create_account(&credentials).await.unwrap_err();
    match err {
        MailGwError::Status { status, ref body } => {
            assert_eq!(status, 422);
            assert!(body.contains("already used"));
        }
        other => panic!("Expected Status error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_wrong_password_is_unauthorized() {
    let (addr, _) = spawn_provider().await;
    let client = client_for(addr);

    client
        .create_account(&Credentials::new("qwerty@mail.gw", "abcdefghijkl"))
        .await
        .unwrap();
    let err = client
        .token(&Credentials::new("qwerty@mail.gw", "wrongpassword"))
        .await
        .unwrap_err();
    assert!(err.is_unauthorized());
}

#[tokio::test]
async fn test_list_and_read_messages() {
    let (addr, _) = spawn_provider().await;
    let client = client_for(addr);
    let token = mail_gw::Token::new("acc1", TOKEN);

    let inbox = client.messages(&token).await.unwrap();
    assert_eq!(inbox.len(), 2);
    assert_eq!(inbox[0].id, "m2");
    assert!(inbox[1].from.is_none());
    assert!(inbox[1].has_attachments);

    let message = client.message(&token, "m1").await.unwrap();
    assert_eq!(message.subject, "First");
    assert_eq!(message.to[0].address, "qwerty@mail.gw");
    assert_eq!(message.text.as_deref(), Some("line one\nline two"));
}

#[tokio::test]
async fn test_bad_token_and_missing_message() {
    let (addr, _) = spawn_provider().await;
    let client = client_for(addr);

    let bad = mail_gw::Token::new("acc1", "nope");
    assert!(client.messages(&bad).await.unwrap_err().is_unauthorized());

    let good = mail_gw::Token::new("acc1", TOKEN);
    let err = client.message(&good, "missing").await.unwrap_err();
    assert_eq!(err.status(), Some(404));
}

#[tokio::test]
async fn test_me() {
    let (addr, _) = spawn_provider().await;
    let client = client_for(addr);

    let account = client.me(&mail_gw::Token::new("acc1", TOKEN)).await.unwrap();
    assert_eq!(account.id, "acc1");
    assert_eq!(account.address, "qwerty@mail.gw");
    assert_eq!(account.used, 1024);
    assert!(account.created_at.is_some());

    let err = client
        .me(&mail_gw::Token::new("acc1", "nope"))
        .await
        .unwrap_err();
    assert!(err.is_unauthorized());
}

#[tokio::test]
async fn test_delete_account() {
    let (addr, state) = spawn_provider().await;
    let client = client_for(addr);
    let token = mail_gw::Token::new("acc1", TOKEN);

    client.delete_account(&token, "acc1").await.unwrap();
    assert_eq!(state.lock().unwrap().deleted, vec!["acc1".to_string()]);
}

#[tokio::test]
async fn test_unreachable_provider_is_http_error() {
    // Port 9 (discard) is not served by anything in the test environment.
    let client = MailClient::new(
        MailGwConfig::new("http://127.0.0.1:9").with_timeout(std::time::Duration::from_secs(2)),
    )
    .unwrap();

    let err = client.domains().await.unwrap_err();
    assert!(matches!(err, MailGwError::Http(_)));
    assert!(err.status().is_none());
}

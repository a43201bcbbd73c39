//! Session flow integration tests against a stub Food Bridge backend.
//! The stub speaks the real envelope shape (`success`/`message` plus payload
//! fields flattened at the top level) so the transport decoding is exercised
//! end to end.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

use foodbridge_client::api::{ApiClient, RegistrationForm};
use foodbridge_client::identity::{
    AccountType, FileTokenStore, MemoryTokenStore, SessionStore, TokenStore, TOKEN_KEY,
};

const TOKEN: &str = "tok-1";

#[derive(Clone)]
struct Backend {
    me_calls: Arc<AtomicUsize>,
}

fn sample_user() -> Value {
    json!({
        "id": "u-1",
        "email": "a@b.com",
        "role": "Business",
        "profileFields": { "businessName": "Tasty Bites Restaurant" }
    })
}

async fn login(Json(body): Json<Value>) -> Json<Value> {
    if body["email"] == "a@b.com" && body["password"] == "pw" {
        Json(json!({ "success": true, "token": TOKEN, "user": sample_user() }))
    } else {
        Json(json!({ "success": false, "message": "Invalid credentials" }))
    }
}

async fn register(Json(body): Json<Value>) -> Json<Value> {
    Json(json!({
        "success": true,
        "token": TOKEN,
        "user": {
            "id": "u-2",
            "email": body["email"],
            "role": body["userType"],
            "profileFields": { "organizationName": body["organizationName"] }
        }
    }))
}

async fn me(State(state): State<Backend>, headers: HeaderMap) -> (StatusCode, Json<Value>) {
    state.me_calls.fetch_add(1, Ordering::SeqCst);
    let auth = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    if auth == format!("Bearer {TOKEN}") {
        (StatusCode::OK, Json(json!({ "success": true, "user": sample_user() })))
    } else {
        (StatusCode::UNAUTHORIZED, Json(json!({ "success": false, "message": "Session expired" })))
    }
}

async fn categories(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
    let list = match params.get("type").map(String::as_str) {
        Some(t) if t.eq_ignore_ascii_case("charity") => {
            vec!["Children Center", "Elders Center", "Special Needs Center", "Food Bank"]
        }
        _ => vec!["Cooked Meals", "Drinks", "Dairy Products", "Bakery", "Fruits & Veggies"],
    };
    Json(json!({ "success": true, "categories": list }))
}

async fn user_types() -> Json<Value> {
    Json(json!({
        "success": true,
        "userTypes": [
            { "name": "Business", "description": "Restaurants, markets, and food businesses" },
            { "name": "Individual", "description": "Individual donors and volunteers" },
            { "name": "Charity", "description": "Non-profit organizations and charities" }
        ]
    }))
}

async fn spawn_backend() -> (String, Arc<AtomicUsize>) {
    let me_calls = Arc::new(AtomicUsize::new(0));
    let state = Backend { me_calls: me_calls.clone() };
    let app = Router::new()
        .route("/api/register", post(register))
        .route("/api/login", post(login))
        .route("/api/me", get(me))
        .route("/api/categories", get(categories))
        .route("/api/user-types", get(user_types))
        .with_state(state);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{addr}/api"), me_calls)
}

fn session_with_memory_store(base: &str) -> (SessionStore, Arc<MemoryTokenStore>) {
    let api = ApiClient::from_base_url(base).unwrap();
    let persist = Arc::new(MemoryTokenStore::new());
    (SessionStore::new(api, persist.clone()), persist)
}

#[tokio::test]
async fn login_then_current_user_round_trip() {
    let (base, _) = spawn_backend().await;
    let (session, persist) = session_with_memory_store(&base);

    let user = session.login("a@b.com", "pw").await.unwrap();
    assert_eq!(user.id, "u-1");
    assert_eq!(user.account_type, AccountType::Business);
    assert_eq!(persist.load(TOKEN_KEY).as_deref(), Some(TOKEN));

    let refreshed = session.current_user().await.unwrap();
    assert_eq!(refreshed.id, user.id);
    assert_eq!(session.cached_user().unwrap().id, user.id);
}

#[tokio::test]
async fn failed_login_is_application_and_leaves_state_untouched() {
    let (base, _) = spawn_backend().await;
    let (session, persist) = session_with_memory_store(&base);

    let err = session.login("a@b.com", "wrong").await.unwrap_err();
    assert!(err.is_application());
    assert_eq!(err.message(), "Invalid credentials");
    assert!(!session.is_authenticated());
    assert!(session.cached_user().is_none());
    assert_eq!(persist.load(TOKEN_KEY), None);
}

#[tokio::test]
async fn logout_then_current_user_fails_without_network() {
    let (base, me_calls) = spawn_backend().await;
    let (session, persist) = session_with_memory_store(&base);

    session.login("a@b.com", "pw").await.unwrap();
    session.current_user().await.unwrap();
    assert_eq!(me_calls.load(Ordering::SeqCst), 1);

    session.logout();
    assert!(!session.is_authenticated());
    assert!(session.cached_user().is_none());
    assert_eq!(persist.load(TOKEN_KEY), None);

    let err = session.current_user().await.unwrap_err();
    assert!(err.is_authorization());
    // No request left the process for the post-logout call.
    assert_eq!(me_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn rejected_credential_is_treated_as_expired_and_cleared() {
    let (base, _) = spawn_backend().await;
    let api = ApiClient::from_base_url(&base).unwrap();
    let persist = Arc::new(MemoryTokenStore::new());
    persist.save(TOKEN_KEY, "stale-token").unwrap();

    // The store picks up the persisted token at construction.
    let session = SessionStore::new(api, persist.clone());
    assert!(session.is_authenticated());

    let err = session.current_user().await.unwrap_err();
    assert!(err.is_authorization());
    assert_eq!(err.message(), "Session expired");
    assert!(!session.is_authenticated());
    assert_eq!(persist.load(TOKEN_KEY), None);
}

#[tokio::test]
async fn connection_refused_is_transport() {
    // Grab a free port, then close it so nothing is listening.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let (session, _) = session_with_memory_store(&format!("http://{addr}/api"));
    let err = session.login("a@b.com", "pw").await.unwrap_err();
    assert!(err.is_transport());
    assert!(!err.is_application());
    assert!(!session.is_authenticated());
}

#[tokio::test]
async fn transport_failure_during_refresh_keeps_the_session() {
    // Nothing is listening here, so the refresh dies at the network layer.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let api = ApiClient::from_base_url(&format!("http://{addr}/api")).unwrap();
    let persist = Arc::new(MemoryTokenStore::new());
    persist.save(TOKEN_KEY, TOKEN).unwrap();
    let session = SessionStore::new(api, persist.clone());
    assert!(session.is_authenticated());

    let err = session.current_user().await.unwrap_err();
    assert!(err.is_transport());
    // Only a rejected credential clears the session; a network failure must not.
    assert!(session.is_authenticated());
    assert_eq!(persist.load(TOKEN_KEY).as_deref(), Some(TOKEN));
}

struct CaptureWriter(Arc<std::sync::Mutex<Vec<u8>>>);

impl std::io::Write for CaptureWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[tokio::test]
async fn session_lifecycle_emits_tracing_events() {
    let (base, _) = spawn_backend().await;

    let captured: Arc<std::sync::Mutex<Vec<u8>>> = Arc::new(std::sync::Mutex::new(Vec::new()));
    let sink = captured.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_writer(move || CaptureWriter(sink.clone()))
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    let (session, _) = session_with_memory_store(&base);
    session.login("a@b.com", "pw").await.unwrap();
    session.logout();

    let log = String::from_utf8(captured.lock().unwrap().clone()).unwrap();
    assert!(log.contains("session.login user=u-1"), "missing login event in: {log}");
    assert!(log.contains("session.logout"), "missing logout event in: {log}");
}

#[tokio::test]
async fn register_signs_the_user_in() {
    let (base, _) = spawn_backend().await;
    let (session, persist) = session_with_memory_store(&base);

    let mut profile = HashMap::new();
    profile.insert("organizationName".to_string(), "Mekedonia Organization".to_string());
    let form = RegistrationForm {
        email: "contact@mekedonia.org".to_string(),
        password: "pw".to_string(),
        account_type: AccountType::Charity,
        profile,
    };
    let user = session.register(&form).await.unwrap();
    assert_eq!(user.account_type, AccountType::Charity);
    assert_eq!(user.display_name(), "Mekedonia Organization");
    assert!(session.is_authenticated());
    assert_eq!(persist.load(TOKEN_KEY).as_deref(), Some(TOKEN));
}

#[tokio::test]
async fn catalog_endpoints_decode_payloads() {
    let (base, _) = spawn_backend().await;
    let api = ApiClient::from_base_url(&base).unwrap();

    let business = api.categories(AccountType::Business).await.unwrap();
    assert!(business.contains(&"Cooked Meals".to_string()));
    let charity = api.categories(AccountType::Charity).await.unwrap();
    assert!(charity.contains(&"Food Bank".to_string()));

    let types = api.user_types().await.unwrap();
    let names: Vec<&str> = types.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, ["Business", "Individual", "Charity"]);
}

#[tokio::test]
async fn file_backed_session_survives_a_restart() {
    let (base, _) = spawn_backend().await;
    let tmp = tempfile::tempdir().unwrap();
    let dir = tmp.path().join("state");

    {
        let api = ApiClient::from_base_url(&base).unwrap();
        let session = SessionStore::new(api, Arc::new(FileTokenStore::new(&dir)));
        session.login("a@b.com", "pw").await.unwrap();
        session.remember_account_type(AccountType::Business);
    }

    // New process: a fresh store over the same directory is already signed in.
    let api = ApiClient::from_base_url(&base).unwrap();
    let session = SessionStore::new(api, Arc::new(FileTokenStore::new(&dir)));
    assert!(session.is_authenticated());
    assert_eq!(session.preferred_account_type(), Some(AccountType::Business));
    let user = session.current_user().await.unwrap();
    assert_eq!(user.id, "u-1");

    session.logout();
    let session = SessionStore::new(
        ApiClient::from_base_url(&base).unwrap(),
        Arc::new(FileTokenStore::new(&dir)),
    );
    assert!(!session.is_authenticated());
}

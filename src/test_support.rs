//! In-process mock of the Google endpoints the probe talks to: the OAuth
//! token endpoint plus the three Gmail operations. Records every request so
//! tests can assert on exact wire shapes.

use axum::extract::{Form, Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

#[derive(Default)]
pub struct MockState {
    pub token_forms: Mutex<Vec<HashMap<String, String>>>,
    pub watch_bodies: Mutex<Vec<Value>>,
    pub watch_bearers: Mutex<Vec<String>>,
    pub history_queries: Mutex<Vec<HashMap<String, String>>>,
    pub message_ids: Mutex<Vec<String>>,
    pub history_hits: AtomicUsize,
    pub message_hits: AtomicUsize,
    pub fail_token: AtomicBool,
    pub fail_watch: AtomicBool,
}

pub struct MockGoogle {
    pub base_url: String,
    pub token_url: String,
    pub state: Arc<MockState>,
}

pub async fn spawn_mock_google() -> MockGoogle {
    let state = Arc::new(MockState::default());

    let app = Router::new()
        .route("/token", post(token))
        .route("/gmail/v1/users/me/watch", post(watch))
        .route("/gmail/v1/users/me/history", get(history))
        .route("/gmail/v1/users/me/messages/:id", get(message))
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    MockGoogle {
        base_url: format!("http://{}", addr),
        token_url: format!("http://{}/token", addr),
        state,
    }
}

async fn token(
    State(state): State<Arc<MockState>>,
    Form(form): Form<HashMap<String, String>>,
) -> (StatusCode, Json<Value>) {
    state.token_forms.lock().unwrap().push(form);

    if state.fail_token.load(Ordering::SeqCst) {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "invalid_grant",
                "error_description": "Token has been expired or revoked."
            })),
        );
    }

    (
        StatusCode::OK,
        Json(json!({
            "access_token": "mock-access-token",
            "expires_in": 3599,
            "token_type": "Bearer"
        })),
    )
}

async fn watch(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let bearer = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();
    state.watch_bearers.lock().unwrap().push(bearer);
    state.watch_bodies.lock().unwrap().push(body);

    if state.fail_watch.load(Ordering::SeqCst) {
        return (
            StatusCode::FORBIDDEN,
            Json(json!({
                "error": {"code": 403, "message": "User not authorized to perform this action."}
            })),
        );
    }

    (
        StatusCode::OK,
        Json(json!({"historyId": "8631700", "expiration": "1735689600000"})),
    )
}

async fn history(
    State(state): State<Arc<MockState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Value> {
    state.history_hits.fetch_add(1, Ordering::SeqCst);
    state.history_queries.lock().unwrap().push(params);

    Json(json!({
        "history": [
            {
                "id": "8631692",
                "messages": [{"id": "18510ea757da1719", "threadId": "18510ea757da1719"}]
            }
        ],
        "historyId": "8631700"
    }))
}

async fn message(State(state): State<Arc<MockState>>, Path(id): Path<String>) -> Json<Value> {
    state.message_hits.fetch_add(1, Ordering::SeqCst);
    state.message_ids.lock().unwrap().push(id.clone());

    Json(json!({
        "id": id,
        "threadId": id,
        "labelIds": ["INBOX", "UNREAD"],
        "snippet": "Your deploy finished",
        "historyId": "8631692",
        "sizeEstimate": 5421
    }))
}

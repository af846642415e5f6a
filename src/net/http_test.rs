use std::sync::Arc;

use futures::executor::block_on;
use futures::future::join;

use super::testing::{MockTransport, RecordingNavigator};
use super::*;
use crate::storage::{MemoryStore, SessionStore, keys};

fn client(
    script: Vec<Result<HttpResponse, ApiError>>,
    store: Arc<MemoryStore>,
) -> (ApiClient, Arc<MockTransport>, Arc<RecordingNavigator>) {
    let transport = MockTransport::new(script);
    let navigator = Arc::new(RecordingNavigator::default());
    let api = ApiClient::new(
        API_BASE,
        store,
        Arc::clone(&transport) as Arc<dyn Transport>,
        Arc::clone(&navigator) as Arc<dyn Navigator>,
    );
    (api, transport, navigator)
}

fn store_with_tokens(access: Option<&str>, refresh: Option<&str>) -> Arc<MemoryStore> {
    let store = Arc::new(MemoryStore::default());
    if let Some(access) = access {
        store.set(keys::ACCESS_TOKEN, access);
    }
    if let Some(refresh) = refresh {
        store.set(keys::REFRESH_TOKEN, refresh);
    }
    store
}

const REFRESH_OK: &str = r#"{"accessToken":"fresh-token"}"#;

// =============================================================
// Request phase: bearer injection
// =============================================================

#[test]
fn attaches_bearer_token_from_store() {
    let store = store_with_tokens(Some("tok-1"), None);
    let (api, transport, _) = client(vec![MockTransport::response(200, "[]")], store);

    let resp = block_on(api.get("/teachers")).expect("transport ok");
    assert_eq!(resp.status, 200);

    let log = transport.log.lock();
    assert_eq!(log.len(), 1);
    assert_eq!(log[0].url, "/api/teachers");
    assert_eq!(log[0].method, Method::Get);
    assert_eq!(log[0].bearer.as_deref(), Some("tok-1"));
}

#[test]
fn dispatches_unauthenticated_without_token() {
    let store = Arc::new(MemoryStore::default());
    let (api, transport, _) = client(vec![MockTransport::response(200, "[]")], store);

    block_on(api.get("/teachers")).expect("transport ok");

    assert_eq!(transport.log.lock()[0].bearer, None);
}

#[test]
fn reads_token_fresh_per_dispatch() {
    let store = store_with_tokens(Some("first"), None);
    let (api, transport, _) = client(
        vec![
            MockTransport::response(200, "{}"),
            MockTransport::response(200, "{}"),
        ],
        Arc::clone(&store),
    );

    block_on(api.get("/students/me")).expect("transport ok");
    store.set(keys::ACCESS_TOKEN, "second");
    block_on(api.get("/students/me")).expect("transport ok");

    let log = transport.log.lock();
    assert_eq!(log[0].bearer.as_deref(), Some("first"));
    assert_eq!(log[1].bearer.as_deref(), Some("second"));
}

// =============================================================
// Response phase: one-shot refresh protocol
// =============================================================

#[test]
fn refresh_success_replays_request_once() {
    let store = store_with_tokens(Some("stale"), Some("refresh-1"));
    let (api, transport, navigator) = client(
        vec![
            MockTransport::response(401, ""),
            MockTransport::response(200, REFRESH_OK),
            MockTransport::response(200, r#"{"ok":true}"#),
        ],
        Arc::clone(&store),
    );

    let resp = block_on(api.get("/students/me")).expect("recovered");

    // The caller never observes the intermediate 401.
    assert_eq!(resp.status, 200);
    assert_eq!(resp.body, r#"{"ok":true}"#);
    assert_eq!(transport.requests_to("/auth/refresh-token"), 1);
    assert_eq!(*navigator.login_redirects.lock(), 0);

    // New token persisted and used on the replay.
    assert_eq!(store.get(keys::ACCESS_TOKEN).as_deref(), Some("fresh-token"));
    let log = transport.log.lock();
    assert_eq!(log.len(), 3);
    assert_eq!(log[2].bearer.as_deref(), Some("fresh-token"));
}

#[test]
fn refresh_call_is_unauthenticated_and_carries_refresh_token() {
    let store = store_with_tokens(Some("stale"), Some("refresh-1"));
    let (api, transport, _) = client(
        vec![
            MockTransport::response(401, ""),
            MockTransport::response(200, REFRESH_OK),
            MockTransport::response(200, "{}"),
        ],
        store,
    );

    block_on(api.get("/students/me")).expect("recovered");

    let log = transport.log.lock();
    let refresh = &log[1];
    assert_eq!(refresh.method, Method::Post);
    assert_eq!(refresh.url, "/api/auth/refresh-token");
    assert_eq!(refresh.bearer, None);
    assert_eq!(
        refresh.body.as_ref().and_then(|b| b.get("refreshToken").cloned()),
        Some(serde_json::json!("refresh-1"))
    );
}

#[test]
fn missing_refresh_token_clears_store_and_redirects() {
    let store = store_with_tokens(Some("stale"), None);
    let (api, transport, navigator) = client(vec![MockTransport::response(401, "expired")], Arc::clone(&store));

    let resp = block_on(api.get("/students/me")).expect("original response surfaced");

    // Original 401 propagates unchanged; the session is gone.
    assert_eq!(resp.status, 401);
    assert_eq!(resp.body, "expired");
    assert_eq!(store.get(keys::ACCESS_TOKEN), None);
    assert_eq!(*navigator.login_redirects.lock(), 1);
    assert_eq!(transport.requests_to("/auth/refresh-token"), 0);
}

#[test]
fn failed_refresh_clears_store_and_redirects_once() {
    let store = store_with_tokens(Some("stale"), Some("refresh-dead"));
    let (api, transport, navigator) = client(
        vec![
            MockTransport::response(401, ""),
            MockTransport::response(401, "refresh token expired"),
        ],
        Arc::clone(&store),
    );

    let err = block_on(api.get("/students/me")).expect_err("refresh error propagates");

    // The refresh error, not the original 401, reaches the caller.
    assert_eq!(
        err,
        ApiError::Status {
            status: 401,
            body: "refresh token expired".to_owned(),
        }
    );
    assert_eq!(store.get(keys::ACCESS_TOKEN), None);
    assert_eq!(store.get(keys::REFRESH_TOKEN), None);
    assert_eq!(*navigator.login_redirects.lock(), 1);
    assert_eq!(transport.requests_to("/auth/refresh-token"), 1);
}

#[test]
fn second_401_after_retry_propagates_without_second_refresh() {
    let store = store_with_tokens(Some("stale"), Some("refresh-1"));
    let (api, transport, navigator) = client(
        vec![
            MockTransport::response(401, ""),
            MockTransport::response(200, REFRESH_OK),
            MockTransport::response(401, "still unauthorized"),
        ],
        store,
    );

    let resp = block_on(api.get("/students/me")).expect("second 401 surfaced");

    assert_eq!(resp.status, 401);
    assert_eq!(resp.body, "still unauthorized");
    assert_eq!(transport.requests_to("/auth/refresh-token"), 1);
    assert_eq!(*navigator.login_redirects.lock(), 0);
}

#[test]
fn non_401_failures_pass_through_untouched() {
    let store = store_with_tokens(Some("tok"), Some("refresh-1"));
    let (api, transport, _) = client(vec![MockTransport::response(500, "boom")], store);

    let resp = block_on(api.get("/teachers")).expect("forwarded");

    assert_eq!(resp.status, 500);
    assert_eq!(transport.requests_to("/auth/refresh-token"), 0);
}

// =============================================================
// Concurrent 401s share one refresh
// =============================================================

#[test]
fn concurrent_401s_issue_a_single_refresh() {
    let store = store_with_tokens(Some("stale"), Some("refresh-1"));
    let (api, transport, navigator) = client(
        vec![
            MockTransport::response(401, ""),
            MockTransport::response(401, ""),
            MockTransport::response(200, REFRESH_OK),
            MockTransport::response(200, "first"),
            MockTransport::response(200, "second"),
        ],
        Arc::clone(&store),
    );

    let (a, b) = block_on(join(api.get("/bookings/student/1"), api.get("/payments/student/1")));

    let a = a.expect("first caller recovered");
    let b = b.expect("second caller recovered");
    assert_eq!(a.status, 200);
    assert_eq!(b.status, 200);
    assert_eq!(transport.requests_to("/auth/refresh-token"), 1);
    assert_eq!(*navigator.login_redirects.lock(), 0);
    assert_eq!(store.get(keys::ACCESS_TOKEN).as_deref(), Some("fresh-token"));
}

#[test]
fn concurrent_failed_refresh_redirects_once_and_fails_both() {
    let store = store_with_tokens(Some("stale"), Some("refresh-dead"));
    let (api, transport, navigator) = client(
        vec![
            MockTransport::response(401, ""),
            MockTransport::response(401, ""),
            MockTransport::response(403, "invalid refresh token"),
        ],
        Arc::clone(&store),
    );

    let (a, b) = block_on(join(api.get("/bookings/student/1"), api.get("/payments/student/1")));

    assert!(a.is_err());
    assert!(b.is_err());
    assert_eq!(transport.requests_to("/auth/refresh-token"), 1);
    assert_eq!(*navigator.login_redirects.lock(), 1);
    assert_eq!(store.get(keys::ACCESS_TOKEN), None);
}

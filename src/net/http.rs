//! HTTP client with bearer injection and one-shot refresh on 401.
//!
//! DESIGN
//! ======
//! Every outbound request reads the access token from the persisted store
//! immediately before dispatch — never from an in-memory copy — so a token
//! refreshed by any concurrent request is picked up by the next dispatch.
//!
//! The response side is an at-most-one-retry protocol: a 401 triggers exactly
//! one refresh-token exchange, the original request is replayed with the new
//! token, and the replay's outcome is returned to the caller transparently.
//! A second 401 is surfaced as-is; it means the authorization problem is not
//! recoverable by refreshing. Concurrent 401s share one in-flight exchange:
//! the first caller runs it, later callers park on oneshot channels and
//! receive the same outcome, so one expiry episode issues one refresh call.
//!
//! When no refresh token exists, or the refresh call itself fails, the store
//! is cleared and the browser is sent back to the login entry point.
//!
//! The transport and navigation seams are traits so the whole protocol runs
//! natively under test with a scripted transport and a recording navigator.

#[cfg(test)]
#[path = "http_test.rs"]
mod http_test;

use std::sync::Arc;

use futures::FutureExt;
use futures::channel::oneshot;
use futures::future::LocalBoxFuture;
use parking_lot::Mutex;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::net::types::{RefreshRequest, RefreshResponse};
use crate::storage::{SessionStore, keys};

/// Base path of the remote API on the serving origin.
pub const API_BASE: &str = "/api";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

/// An outbound request as seen by the transport.
#[derive(Clone, Debug)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub bearer: Option<String>,
    pub body: Option<Value>,
}

/// Status and raw body of a completed exchange. Interpretation (JSON or bare
/// text) is left to the caller.
#[derive(Clone, Debug)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Turn a non-2xx response into an [`ApiError::Status`].
    pub fn require_success(self) -> Result<Self, ApiError> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(ApiError::Status {
                status: self.status,
                body: self.body,
            })
        }
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        serde_json::from_str(&self.body).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The exchange never completed (connectivity, CORS, aborted page).
    #[error("network error: {0}")]
    Network(String),
    /// The server answered with a non-success status.
    #[error("request failed with status {status}")]
    Status { status: u16, body: String },
    /// The response body did not match the expected shape.
    #[error("failed to decode response: {0}")]
    Decode(String),
}

/// Dispatches a single request. Implementations must not retry or reorder.
pub trait Transport: Send + Sync {
    fn send(&self, req: HttpRequest) -> LocalBoxFuture<'static, Result<HttpResponse, ApiError>>;
}

/// Forced navigation used when a session cannot be recovered.
pub trait Navigator: Send + Sync {
    fn redirect_to_login(&self);
}

/// Transport for non-browser contexts (SSR). Every request fails cleanly.
#[derive(Debug, Default)]
pub struct InertTransport;

impl Transport for InertTransport {
    fn send(&self, _req: HttpRequest) -> LocalBoxFuture<'static, Result<HttpResponse, ApiError>> {
        async { Err(ApiError::Network("not available on server".to_owned())) }.boxed_local()
    }
}

#[derive(Debug, Default)]
pub struct NoopNavigator;

impl Navigator for NoopNavigator {
    fn redirect_to_login(&self) {}
}

/// Browser transport over `gloo-net`.
#[cfg(feature = "hydrate")]
#[derive(Debug, Default)]
pub struct GlooTransport;

#[cfg(feature = "hydrate")]
impl Transport for GlooTransport {
    fn send(&self, req: HttpRequest) -> LocalBoxFuture<'static, Result<HttpResponse, ApiError>> {
        async move {
            let builder = match req.method {
                Method::Get => gloo_net::http::Request::get(&req.url),
                Method::Post => gloo_net::http::Request::post(&req.url),
                Method::Put => gloo_net::http::Request::put(&req.url),
                Method::Delete => gloo_net::http::Request::delete(&req.url),
            };
            let builder = match &req.bearer {
                Some(token) => builder.header("Authorization", &format!("Bearer {token}")),
                None => builder,
            };
            let request = match &req.body {
                Some(body) => builder
                    .json(body)
                    .map_err(|e| ApiError::Network(e.to_string()))?,
                None => builder
                    .build()
                    .map_err(|e| ApiError::Network(e.to_string()))?,
            };
            let resp = request
                .send()
                .await
                .map_err(|e| ApiError::Network(e.to_string()))?;
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            Ok(HttpResponse { status, body })
        }
        .boxed_local()
    }
}

/// Hard navigation via `window.location` for a clean state.
#[cfg(feature = "hydrate")]
#[derive(Debug, Default)]
pub struct BrowserNavigator;

#[cfg(feature = "hydrate")]
impl Navigator for BrowserNavigator {
    fn redirect_to_login(&self) {
        if let Some(w) = web_sys::window() {
            let _ = w.location().set_href("/");
        }
    }
}

/// Callers parked on an in-flight refresh. `Some` while an exchange runs.
type RefreshWaiters = Option<Vec<oneshot::Sender<Result<String, ApiError>>>>;

/// REST client shared by every page through context.
///
/// Cloning is cheap; all clones observe the same store and the same
/// in-flight refresh state.
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    store: Arc<dyn SessionStore>,
    transport: Arc<dyn Transport>,
    navigator: Arc<dyn Navigator>,
    refresh_waiters: Arc<Mutex<RefreshWaiters>>,
}

impl ApiClient {
    pub fn new(
        base_url: impl Into<String>,
        store: Arc<dyn SessionStore>,
        transport: Arc<dyn Transport>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            store,
            transport,
            navigator,
            refresh_waiters: Arc::new(Mutex::new(None)),
        }
    }

    /// Client wired for the current execution environment: real browser
    /// plumbing under `hydrate`, inert stand-ins during SSR.
    #[cfg(feature = "hydrate")]
    pub fn from_environment(store: Arc<dyn SessionStore>) -> Self {
        Self::new(API_BASE, store, Arc::new(GlooTransport), Arc::new(BrowserNavigator))
    }

    #[cfg(not(feature = "hydrate"))]
    pub fn from_environment(store: Arc<dyn SessionStore>) -> Self {
        Self::new(API_BASE, store, Arc::new(InertTransport), Arc::new(NoopNavigator))
    }

    pub async fn get(&self, path: &str) -> Result<HttpResponse, ApiError> {
        self.request(Method::Get, path, None).await
    }

    pub async fn post(&self, path: &str, body: Option<Value>) -> Result<HttpResponse, ApiError> {
        self.request(Method::Post, path, body).await
    }

    pub async fn put(&self, path: &str, body: Option<Value>) -> Result<HttpResponse, ApiError> {
        self.request(Method::Put, path, body).await
    }

    pub async fn delete(&self, path: &str) -> Result<HttpResponse, ApiError> {
        self.request(Method::Delete, path, None).await
    }

    /// Dispatch one request through the auth interceptor.
    ///
    /// `Ok` carries any HTTP status the caller is meant to see, including a
    /// 401 that survived the recovery protocol. `Err` is reserved for
    /// transport failures and a failed refresh exchange.
    async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<HttpResponse, ApiError> {
        let mut req = HttpRequest {
            method,
            url: format!("{}{}", self.base_url, path),
            bearer: self.store.get(keys::ACCESS_TOKEN),
            body,
        };

        let resp = self.transport.send(req.clone()).await?;
        if resp.status != 401 {
            return Ok(resp);
        }

        if self.store.get(keys::REFRESH_TOKEN).is_none() {
            // Nothing to recover with. End the session and surface the
            // original response. Safe when the store is already empty.
            self.store.clear();
            self.navigator.redirect_to_login();
            return Ok(resp);
        }

        // One retry, with the token the (possibly shared) refresh produced.
        let token = self.refresh_access_token().await?;
        req.bearer = Some(token);
        self.transport.send(req).await
    }

    /// Exchange the refresh token for a new access token.
    ///
    /// The first caller of an expiry episode runs the exchange; concurrent
    /// callers park on a channel and receive the same outcome. The
    /// store-clear and login redirect on a failed exchange therefore happen
    /// exactly once per episode.
    async fn refresh_access_token(&self) -> Result<String, ApiError> {
        let parked = {
            let mut slot = self.refresh_waiters.lock();
            match slot.as_mut() {
                Some(waiters) => {
                    let (tx, rx) = oneshot::channel();
                    waiters.push(tx);
                    Some(rx)
                }
                None => {
                    *slot = Some(Vec::new());
                    None
                }
            }
        };

        if let Some(rx) = parked {
            return match rx.await {
                Ok(outcome) => outcome,
                // The leading caller's task went away mid-exchange.
                Err(oneshot::Canceled) => {
                    Err(ApiError::Network("refresh abandoned".to_owned()))
                }
            };
        }

        let outcome = self.run_refresh().await;
        if outcome.is_err() {
            self.store.clear();
            self.navigator.redirect_to_login();
        }
        let waiters = self.refresh_waiters.lock().take().unwrap_or_default();
        for tx in waiters {
            let _ = tx.send(outcome.clone());
        }
        outcome
    }

    /// The refresh exchange itself: a dedicated, unauthenticated call that
    /// bypasses the interceptor.
    async fn run_refresh(&self) -> Result<String, ApiError> {
        let refresh_token = self.store.get(keys::REFRESH_TOKEN).ok_or(ApiError::Status {
            status: 401,
            body: String::new(),
        })?;

        let body = serde_json::to_value(RefreshRequest { refresh_token })
            .map_err(|e| ApiError::Decode(e.to_string()))?;
        let req = HttpRequest {
            method: Method::Post,
            url: format!("{}/auth/refresh-token", self.base_url),
            bearer: None,
            body: Some(body),
        };

        let resp = self.transport.send(req).await?.require_success()?;
        let body: RefreshResponse = resp.json()?;
        self.store.set(keys::ACCESS_TOKEN, &body.access_token);
        Ok(body.access_token)
    }
}

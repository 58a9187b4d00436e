//! The authenticated API gateway.
//!
//! This module owns the access/refresh token pair, attaches credentials to
//! outbound requests, and transparently recovers from expired-access-token
//! rejections by performing a single coordinated refresh shared across
//! concurrent callers. Every other module issues its calls through here.

use crate::auth::models::{RefreshTokenRequest, extract_access_token, extract_refresh_token};
use crate::config::Config;
use crate::errors::{ApiError, ApiResult, DEFAULT_ERROR_MESSAGE};
use crate::storage::{ACCESS_TOKEN_KEY, MemoryTokenStore, REFRESH_TOKEN_KEY, TokenStore};
use crate::transport::{
    HttpTransport, Method, ReqwestTransport, TransportRequest, TransportResponse,
};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, warn};

/// Path of the token refresh endpoint.
pub const REFRESH_PATH: &str = "/auth/refresh";

/// Endpoints belonging to the auth subsystem itself. A 401 from these never
/// triggers a refresh attempt, to avoid recursing into the auth flow.
const AUTH_EXEMPT_PATHS: [&str; 5] = [
    "/auth/login",
    "/auth/signup",
    "/auth/refresh",
    "/auth/request-password-reset",
    "/auth/set-password",
];

fn is_auth_exempt(path: &str) -> bool {
    let path = path.split('?').next().unwrap_or(path);
    AUTH_EXEMPT_PATHS.contains(&path)
}

type SessionExpiredHandler = Arc<dyn Fn() + Send + Sync>;

/// Shared mutable credential state.
///
/// `generation` is bumped whenever the pair is replaced or cleared, which is
/// how callers waiting on the refresh gate detect that the episode they
/// joined has already settled.
#[derive(Debug, Default)]
struct CredentialState {
    access_token: Option<String>,
    refresh_token: Option<String>,
    /// User id from the last login, sent alongside refresh requests as a hint.
    user_id: Option<String>,
    generation: u64,
    hydrated: bool,
}

/// Gateway issuing authenticated calls against the remote API.
pub struct ApiGateway {
    base_url: String,
    transport: Arc<dyn HttpTransport>,
    store: Arc<dyn TokenStore>,
    state: RwLock<CredentialState>,
    /// Serializes refresh episodes; at most one refresh call is in flight.
    refresh_gate: Mutex<()>,
    on_session_expired: Option<SessionExpiredHandler>,
}

impl ApiGateway {
    /// Creates a gateway backed by a real HTTP client and in-memory storage.
    pub fn new(config: Config) -> Self {
        let transport = ReqwestTransport::new(config.request_timeout_seconds);
        Self::with_parts(
            config.base_url,
            Arc::new(transport),
            Arc::new(MemoryTokenStore::new()),
        )
    }

    /// Creates a gateway from injected transport and storage capabilities.
    pub fn with_parts(
        base_url: impl Into<String>,
        transport: Arc<dyn HttpTransport>,
        store: Arc<dyn TokenStore>,
    ) -> Self {
        ApiGateway {
            base_url: base_url.into(),
            transport,
            store,
            state: RwLock::new(CredentialState::default()),
            refresh_gate: Mutex::new(()),
            on_session_expired: None,
        }
    }

    /// Registers the hand-off invoked when the session becomes unrecoverable,
    /// typically a redirect to the login screen.
    pub fn on_session_expired(mut self, handler: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_session_expired = Some(Arc::new(handler));
        self
    }

    /// Stores both tokens, in memory and in durable storage, for use by
    /// subsequent calls. Idempotent.
    pub async fn configure_credentials(&self, access_token: &str, refresh_token: Option<&str>) {
        let mut state = self.state.write().await;
        state.access_token = Some(access_token.to_string());
        state.refresh_token = refresh_token.map(str::to_string);
        state.generation += 1;
        state.hydrated = true;

        self.store.set(ACCESS_TOKEN_KEY, access_token);
        match refresh_token {
            Some(token) => self.store.set(REFRESH_TOKEN_KEY, token),
            None => self.store.remove(REFRESH_TOKEN_KEY),
        }
        debug!("Credentials configured");
    }

    /// Erases both tokens from memory and durable storage.
    pub async fn clear_credentials(&self) {
        self.clear_credentials_inner().await;
    }

    /// Clears state and reports whether any credential was actually held.
    async fn clear_credentials_inner(&self) -> bool {
        let mut state = self.state.write().await;
        let held = state.access_token.is_some() || state.refresh_token.is_some();
        if held {
            state.generation += 1;
        }
        state.access_token = None;
        state.refresh_token = None;
        state.user_id = None;
        state.hydrated = true;

        self.store.remove(ACCESS_TOKEN_KEY);
        self.store.remove(REFRESH_TOKEN_KEY);
        if held {
            debug!("Credentials cleared");
        }
        held
    }

    /// Whether a usable session is currently held.
    pub async fn is_authenticated(&self) -> bool {
        self.hydrate().await;
        let state = self.state.read().await;
        state.access_token.is_some() || state.refresh_token.is_some()
    }

    pub(crate) async fn cache_user_hint(&self, user_id: Option<String>) {
        self.state.write().await.user_id = user_id;
    }

    /// Performs one logical API call and returns the parsed JSON body.
    ///
    /// A 401 on a non-exempt endpoint is recovered from exactly once: the
    /// gateway refreshes credentials (joining an in-flight refresh when one
    /// exists) and retries with a token at least as new as the original.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> ApiResult<Value> {
        self.hydrate().await;
        let exempt = is_auth_exempt(path);
        let (mut access, refresh, mut generation) = self.credentials_snapshot().await;

        // No access token yet, but a session can be minted from the refresh
        // token before the call goes out.
        if access.is_none() && refresh.is_some() && !exempt {
            self.refresh_or_join(generation).await?;
            let (token, _, new_generation) = self.credentials_snapshot().await;
            access = token;
            generation = new_generation;
        }

        let request = self.build_request(method.clone(), path, access, body.clone());
        let response = self.transport.execute(request).await?;

        if response.status == 401 {
            // No refresh token means no recovery, whatever the endpoint.
            let (_, refresh, _) = self.credentials_snapshot().await;
            if refresh.is_none() {
                return Err(self.expire_session().await);
            }
            if exempt {
                return decode_response(response);
            }
            debug!(path, "Access token rejected, refreshing credentials");
            self.refresh_or_join(generation).await?;

            let (token, _, _) = self.credentials_snapshot().await;
            let retry = self.build_request(method, path, token, body);
            let response = self.transport.execute(retry).await?;
            return decode_response(response);
        }

        decode_response(response)
    }

    /// Typed variant of [`request`](Self::request).
    pub async fn request_as<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> ApiResult<T> {
        let value = self.request(method, path, body).await?;
        serde_json::from_value(value).map_err(|e| ApiError::decode(e.to_string()))
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        self.request_as(Method::GET, path, None).await
    }

    pub async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<T> {
        let body = serde_json::to_value(body).map_err(|e| ApiError::decode(e.to_string()))?;
        self.request_as(Method::POST, path, Some(body)).await
    }

    pub async fn put<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<T> {
        let body = serde_json::to_value(body).map_err(|e| ApiError::decode(e.to_string()))?;
        self.request_as(Method::PUT, path, Some(body)).await
    }

    /// `PUT` without a request body, used by state-transition endpoints.
    pub async fn put_empty<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        self.request_as(Method::PUT, path, None).await
    }

    pub async fn delete(&self, path: &str) -> ApiResult<()> {
        self.request(Method::DELETE, path, None).await.map(|_| ())
    }

    /// Loads tokens out of durable storage, once per gateway lifetime.
    async fn hydrate(&self) {
        {
            let state = self.state.read().await;
            if state.hydrated {
                return;
            }
        }
        let mut state = self.state.write().await;
        if state.hydrated {
            return;
        }
        state.access_token = self.store.get(ACCESS_TOKEN_KEY);
        state.refresh_token = self.store.get(REFRESH_TOKEN_KEY);
        state.hydrated = true;
    }

    async fn credentials_snapshot(&self) -> (Option<String>, Option<String>, u64) {
        let state = self.state.read().await;
        (
            state.access_token.clone(),
            state.refresh_token.clone(),
            state.generation,
        )
    }

    fn build_request(
        &self,
        method: Method,
        path: &str,
        bearer: Option<String>,
        body: Option<Value>,
    ) -> TransportRequest {
        TransportRequest {
            method,
            url: format!("{}{}", self.base_url, path),
            bearer,
            body,
        }
    }

    /// Joins the in-flight refresh for this episode, or performs it.
    ///
    /// `observed_generation` is the credential generation behind the caller's
    /// failed attempt. When the generation moved while waiting on the gate,
    /// the episode already settled and no second refresh call is issued.
    async fn refresh_or_join(&self, observed_generation: u64) -> ApiResult<()> {
        let _gate = self.refresh_gate.lock().await;

        let (access, refresh, generation) = self.credentials_snapshot().await;
        if generation != observed_generation {
            debug!("Refresh episode already settled by a concurrent caller");
            return if access.is_some() {
                Ok(())
            } else {
                Err(ApiError::SessionExpired)
            };
        }

        let Some(refresh_token) = refresh else {
            return Err(self.expire_session().await);
        };
        let user_id = self.state.read().await.user_id.clone();

        info!("Refreshing access token");
        match self.call_refresh(&refresh_token, user_id).await {
            Ok((access_token, new_refresh)) => {
                // The upstream may omit a rotated refresh token; keep the
                // current one in that case.
                let refresh_token = new_refresh.unwrap_or(refresh_token);
                self.configure_credentials(&access_token, Some(&refresh_token))
                    .await;
                Ok(())
            }
            Err(e) => {
                warn!("Token refresh failed: {e}");
                Err(self.expire_session().await)
            }
        }
    }

    async fn call_refresh(
        &self,
        refresh_token: &str,
        user_id: Option<String>,
    ) -> ApiResult<(String, Option<String>)> {
        let payload = RefreshTokenRequest {
            refresh_token: refresh_token.to_string(),
            user_id,
        };
        let body = serde_json::to_value(&payload).map_err(|e| ApiError::decode(e.to_string()))?;
        let request = self.build_request(Method::POST, REFRESH_PATH, None, Some(body));

        let response = self.transport.execute(request).await?;
        let value = decode_response(response)?;
        let access = extract_access_token(&value)
            .ok_or_else(|| ApiError::decode("refresh response carries no access token"))?;
        Ok((access, extract_refresh_token(&value)))
    }

    /// Clears credentials, fires the UI hand-off, and returns the error for
    /// the caller to propagate. Once cleared, subsequent calls short-circuit
    /// instead of re-attempting a refresh against a known-bad token, and the
    /// hand-off is not fired again.
    async fn expire_session(&self) -> ApiError {
        if self.clear_credentials_inner().await {
            if let Some(handler) = &self.on_session_expired {
                handler();
            }
        }
        ApiError::SessionExpired
    }
}

fn decode_response(response: TransportResponse) -> ApiResult<Value> {
    if response.is_success() {
        // 204 and bodyless responses yield an empty result, not a parse error.
        if response.status == 204 || response.body.trim().is_empty() {
            return Ok(Value::Object(Map::new()));
        }
        return serde_json::from_str(&response.body).map_err(|e| ApiError::decode(e.to_string()));
    }
    Err(ApiError::http(
        response.status,
        extract_error_message(&response.body),
    ))
}

/// Best-effort extraction of the `message` field from an error body.
fn extract_error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|value| {
            value
                .get("message")
                .and_then(Value::as_str)
                .map(str::to_string)
        })
        .unwrap_or_else(|| DEFAULT_ERROR_MESSAGE.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashMap;
    use std::sync::Mutex as StdMutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::Barrier;

    const BASE: &str = "http://api.test";

    #[derive(Clone, Copy)]
    enum RefreshShape {
        TopLevelCamel,
        DataSnake,
    }

    /// In-process stand-in for the remote API. Accepts any request bearing
    /// the current valid token, answers 401 otherwise, and rotates the valid
    /// token on each successful refresh.
    struct FakeApi {
        valid_token: StdMutex<String>,
        valid_refresh: String,
        refresh_calls: AtomicUsize,
        endpoint_calls: StdMutex<HashMap<String, u32>>,
        bearers_seen: StdMutex<Vec<Option<String>>>,
        fail_refresh: bool,
        refresh_shape: RefreshShape,
        /// When set, first attempts against data endpoints rendezvous here,
        /// forcing the concurrent-401 episode to actually overlap.
        first_attempt_barrier: Option<Arc<Barrier>>,
    }

    impl FakeApi {
        fn new(valid_token: &str, valid_refresh: &str) -> Self {
            FakeApi {
                valid_token: StdMutex::new(valid_token.to_string()),
                valid_refresh: valid_refresh.to_string(),
                refresh_calls: AtomicUsize::new(0),
                endpoint_calls: StdMutex::new(HashMap::new()),
                bearers_seen: StdMutex::new(Vec::new()),
                fail_refresh: false,
                refresh_shape: RefreshShape::TopLevelCamel,
                first_attempt_barrier: None,
            }
        }

        fn failing_refresh(mut self) -> Self {
            self.fail_refresh = true;
            self
        }

        fn refresh_shape(mut self, shape: RefreshShape) -> Self {
            self.refresh_shape = shape;
            self
        }

        fn barrier(mut self, barrier: Arc<Barrier>) -> Self {
            self.first_attempt_barrier = Some(barrier);
            self
        }

        fn refresh_count(&self) -> usize {
            self.refresh_calls.load(Ordering::SeqCst)
        }

        fn calls(&self, path: &str) -> u32 {
            self.endpoint_calls
                .lock()
                .unwrap()
                .get(path)
                .copied()
                .unwrap_or(0)
        }

        fn handle_refresh(&self, request: &TransportRequest) -> TransportResponse {
            self.refresh_calls.fetch_add(1, Ordering::SeqCst);

            let sent = request
                .body
                .as_ref()
                .and_then(|b| b.get("refresh_token"))
                .and_then(Value::as_str)
                .unwrap_or_default();
            if self.fail_refresh || sent != self.valid_refresh {
                return TransportResponse {
                    status: 401,
                    body: json!({ "message": "invalid refresh token" }).to_string(),
                };
            }

            let mut token = self.valid_token.lock().unwrap();
            *token = format!("{}.next", *token);
            let body = match self.refresh_shape {
                RefreshShape::TopLevelCamel => json!({
                    "accessToken": *token,
                    "refreshToken": self.valid_refresh,
                }),
                RefreshShape::DataSnake => json!({
                    "data": { "access_token": *token }
                }),
            };
            TransportResponse {
                status: 200,
                body: body.to_string(),
            }
        }
    }

    #[async_trait::async_trait]
    impl HttpTransport for FakeApi {
        async fn execute(&self, request: TransportRequest) -> ApiResult<TransportResponse> {
            let path = request
                .url
                .strip_prefix(BASE)
                .unwrap_or(&request.url)
                .to_string();

            if path == REFRESH_PATH {
                return Ok(self.handle_refresh(&request));
            }

            let attempt = {
                let mut calls = self.endpoint_calls.lock().unwrap();
                let counter = calls.entry(path.clone()).or_insert(0);
                *counter += 1;
                *counter
            };
            self.bearers_seen.lock().unwrap().push(request.bearer.clone());

            if attempt == 1 {
                if let Some(barrier) = &self.first_attempt_barrier {
                    barrier.wait().await;
                }
            }

            if request.method == Method::DELETE {
                let valid = self.valid_token.lock().unwrap().clone();
                if request.bearer.as_deref() == Some(valid.as_str()) {
                    return Ok(TransportResponse {
                        status: 204,
                        body: String::new(),
                    });
                }
            }

            let valid = self.valid_token.lock().unwrap().clone();
            if request.bearer.as_deref() == Some(valid.as_str()) {
                Ok(TransportResponse {
                    status: 200,
                    body: json!({ "path": path }).to_string(),
                })
            } else {
                Ok(TransportResponse {
                    status: 401,
                    body: json!({ "message": "Unauthorized" }).to_string(),
                })
            }
        }
    }

    fn gateway_with(api: Arc<FakeApi>) -> ApiGateway {
        ApiGateway::with_parts(BASE, api, Arc::new(MemoryTokenStore::new()))
    }

    #[tokio::test]
    async fn test_concurrent_401s_share_a_single_refresh() {
        let barrier = Arc::new(Barrier::new(3));
        let api = Arc::new(FakeApi::new("good-1", "refresh-1").barrier(barrier));
        let gateway = gateway_with(api.clone());
        gateway
            .configure_credentials("expired", Some("refresh-1"))
            .await;

        let (a, b, c) = tokio::join!(
            gateway.request(Method::GET, "/appointment", None),
            gateway.request(Method::GET, "/client", None),
            gateway.request(Method::GET, "/service", None),
        );

        assert_eq!(a.unwrap(), json!({ "path": "/appointment" }));
        assert_eq!(b.unwrap(), json!({ "path": "/client" }));
        assert_eq!(c.unwrap(), json!({ "path": "/service" }));

        // One refresh for the whole episode; each endpoint hit twice.
        assert_eq!(api.refresh_count(), 1);
        assert_eq!(api.calls("/appointment"), 2);
        assert_eq!(api.calls("/client"), 2);
        assert_eq!(api.calls("/service"), 2);
    }

    #[tokio::test]
    async fn test_retry_uses_the_refreshed_token_exactly_once() {
        let api = Arc::new(FakeApi::new("good-1", "refresh-1"));
        let gateway = gateway_with(api.clone());
        gateway
            .configure_credentials("expired", Some("refresh-1"))
            .await;

        let result = gateway.request(Method::GET, "/client", None).await;
        assert_eq!(result.unwrap(), json!({ "path": "/client" }));
        assert_eq!(api.refresh_count(), 1);
        assert_eq!(api.calls("/client"), 2);

        let bearers = api.bearers_seen.lock().unwrap().clone();
        assert_eq!(bearers[0].as_deref(), Some("expired"));
        assert_eq!(bearers[1].as_deref(), Some("good-1.next"));
    }

    #[tokio::test]
    async fn test_refresh_failure_expires_the_session_for_every_waiter() {
        let expired_events = Arc::new(AtomicUsize::new(0));
        let events = expired_events.clone();

        let barrier = Arc::new(Barrier::new(3));
        let api = Arc::new(
            FakeApi::new("good-1", "refresh-1")
                .failing_refresh()
                .barrier(barrier),
        );
        let store = Arc::new(MemoryTokenStore::new());
        let gateway = ApiGateway::with_parts(BASE, api.clone(), store.clone())
            .on_session_expired(move || {
                events.fetch_add(1, Ordering::SeqCst);
            });
        gateway
            .configure_credentials("expired", Some("refresh-1"))
            .await;

        let (a, b, c) = tokio::join!(
            gateway.request(Method::GET, "/appointment", None),
            gateway.request(Method::GET, "/client", None),
            gateway.request(Method::GET, "/service", None),
        );

        for result in [a, b, c] {
            assert!(matches!(result, Err(ApiError::SessionExpired)));
        }
        assert_eq!(api.refresh_count(), 1);
        // Credentials cleared exactly once, store emptied, hand-off fired once.
        assert_eq!(expired_events.load(Ordering::SeqCst), 1);
        assert_eq!(store.get(ACCESS_TOKEN_KEY), None);
        assert_eq!(store.get(REFRESH_TOKEN_KEY), None);
        assert!(!gateway.is_authenticated().await);
    }

    #[tokio::test]
    async fn test_auth_exempt_endpoint_never_triggers_refresh() {
        let api = Arc::new(FakeApi::new("good-1", "refresh-1"));
        let gateway = gateway_with(api.clone());
        gateway
            .configure_credentials("expired", Some("refresh-1"))
            .await;

        let result = gateway
            .request(Method::POST, "/auth/login", Some(json!({})))
            .await;

        match result {
            Err(ApiError::Http { status, message }) => {
                assert_eq!(status, 401);
                assert_eq!(message, "Unauthorized");
            }
            other => panic!("expected plain HTTP error, got {other:?}"),
        }
        assert_eq!(api.refresh_count(), 0);
        assert_eq!(api.calls("/auth/login"), 1);
    }

    #[tokio::test]
    async fn test_exempt_401_without_refresh_token_expires_the_session() {
        let expired_events = Arc::new(AtomicUsize::new(0));
        let events = expired_events.clone();

        let api = Arc::new(FakeApi::new("good-1", "refresh-1"));
        let store = Arc::new(MemoryTokenStore::new());
        let gateway = ApiGateway::with_parts(BASE, api.clone(), store.clone())
            .on_session_expired(move || {
                events.fetch_add(1, Ordering::SeqCst);
            });
        gateway.configure_credentials("expired", None).await;

        let result = gateway
            .request(Method::POST, "/auth/login", Some(json!({})))
            .await;

        // No refresh token leaves nothing to recover with, even on an
        // auth endpoint: the stale credential is dropped, not kept.
        assert!(matches!(result, Err(ApiError::SessionExpired)));
        assert_eq!(api.refresh_count(), 0);
        assert_eq!(expired_events.load(Ordering::SeqCst), 1);
        assert_eq!(store.get(ACCESS_TOKEN_KEY), None);
        assert!(!gateway.is_authenticated().await);
    }

    #[tokio::test]
    async fn test_configured_credentials_apply_to_the_very_next_call() {
        let api = Arc::new(FakeApi::new("good-1", "refresh-1"));
        let gateway = gateway_with(api.clone());

        gateway.configure_credentials("good-1", None).await;
        let result = gateway.request(Method::GET, "/client", None).await;

        assert!(result.is_ok());
        assert_eq!(api.calls("/client"), 1);
        let bearers = api.bearers_seen.lock().unwrap().clone();
        assert_eq!(bearers[0].as_deref(), Some("good-1"));
    }

    #[tokio::test]
    async fn test_missing_access_token_refreshes_before_the_call() {
        let api = Arc::new(FakeApi::new("good-1", "refresh-1"));
        let store = Arc::new(MemoryTokenStore::new());
        store.set(REFRESH_TOKEN_KEY, "refresh-1");
        let gateway = ApiGateway::with_parts(BASE, api.clone(), store);

        let result = gateway.request(Method::GET, "/client", None).await;

        assert_eq!(result.unwrap(), json!({ "path": "/client" }));
        // One round trip to the refresh endpoint plus one to the data endpoint.
        assert_eq!(api.refresh_count(), 1);
        assert_eq!(api.calls("/client"), 1);
    }

    #[tokio::test]
    async fn test_401_without_refresh_token_is_session_expired() {
        let expired_events = Arc::new(AtomicUsize::new(0));
        let events = expired_events.clone();

        let api = Arc::new(FakeApi::new("good-1", "refresh-1"));
        let gateway = gateway_with(api.clone()).on_session_expired(move || {
            events.fetch_add(1, Ordering::SeqCst);
        });
        gateway.configure_credentials("expired", None).await;

        let result = gateway.request(Method::GET, "/client", None).await;

        assert!(matches!(result, Err(ApiError::SessionExpired)));
        assert_eq!(api.refresh_count(), 0);
        assert_eq!(api.calls("/client"), 1);
        assert_eq!(expired_events.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_refresh_response_wrapped_under_data() {
        let api = Arc::new(
            FakeApi::new("good-1", "refresh-1").refresh_shape(RefreshShape::DataSnake),
        );
        let store = Arc::new(MemoryTokenStore::new());
        let gateway = ApiGateway::with_parts(BASE, api.clone(), store.clone());
        gateway
            .configure_credentials("expired", Some("refresh-1"))
            .await;

        let result = gateway.request(Method::GET, "/client", None).await;

        assert!(result.is_ok());
        assert_eq!(api.refresh_count(), 1);
        // No rotated refresh token in the response: the existing one is kept.
        assert_eq!(store.get(REFRESH_TOKEN_KEY), Some("refresh-1".to_string()));
        assert_eq!(store.get(ACCESS_TOKEN_KEY), Some("good-1.next".to_string()));
    }

    #[tokio::test]
    async fn test_no_content_yields_an_empty_value() {
        let api = Arc::new(FakeApi::new("good-1", "refresh-1"));
        let gateway = gateway_with(api.clone());
        gateway.configure_credentials("good-1", None).await;

        let value = gateway
            .request(Method::DELETE, "/lead/42", None)
            .await
            .unwrap();
        assert_eq!(value, json!({}));

        gateway.delete("/lead/43").await.unwrap();
    }

    #[tokio::test]
    async fn test_tokens_hydrate_from_storage_once() {
        let api = Arc::new(FakeApi::new("good-1", "refresh-1"));
        let store = Arc::new(MemoryTokenStore::new());
        store.set(ACCESS_TOKEN_KEY, "good-1");
        store.set(REFRESH_TOKEN_KEY, "refresh-1");

        let gateway = ApiGateway::with_parts(BASE, api.clone(), store);
        assert!(gateway.is_authenticated().await);

        let result = gateway.request(Method::GET, "/client", None).await;
        assert!(result.is_ok());
        assert_eq!(api.refresh_count(), 0);
        assert_eq!(api.calls("/client"), 1);
    }

    #[tokio::test]
    async fn test_non_401_errors_carry_status_and_message() {
        struct FlakyApi;

        #[async_trait::async_trait]
        impl HttpTransport for FlakyApi {
            async fn execute(&self, request: TransportRequest) -> ApiResult<TransportResponse> {
                if request.url.ends_with("/client") {
                    Ok(TransportResponse {
                        status: 422,
                        body: json!({ "message": "Email already in use" }).to_string(),
                    })
                } else {
                    Ok(TransportResponse {
                        status: 500,
                        body: "<html>Internal Server Error</html>".to_string(),
                    })
                }
            }
        }

        let gateway = ApiGateway::with_parts(
            BASE,
            Arc::new(FlakyApi),
            Arc::new(MemoryTokenStore::new()),
        );
        gateway.configure_credentials("good-1", None).await;

        match gateway.request(Method::POST, "/client", Some(json!({}))).await {
            Err(ApiError::Http { status, message }) => {
                assert_eq!(status, 422);
                assert_eq!(message, "Email already in use");
            }
            other => panic!("expected HTTP error, got {other:?}"),
        }

        // Non-JSON error body falls back to the generic message.
        match gateway.request(Method::GET, "/service", None).await {
            Err(ApiError::Http { status, message }) => {
                assert_eq!(status, 500);
                assert_eq!(message, DEFAULT_ERROR_MESSAGE);
            }
            other => panic!("expected HTTP error, got {other:?}"),
        }
    }

    #[test]
    fn test_auth_exempt_path_matching() {
        assert!(is_auth_exempt("/auth/login"));
        assert!(is_auth_exempt("/auth/refresh"));
        assert!(is_auth_exempt("/auth/set-password"));
        assert!(is_auth_exempt("/auth/login?redirect=1"));
        assert!(!is_auth_exempt("/client"));
        assert!(!is_auth_exempt("/appointment/available/slots"));
    }
}

//! API client: token interception, envelope unwrapping, 401 teardown

use super::envelope::unwrap_envelope;
use super::request::{ApiRequest, RequestSpec};
use super::transport::{HttpRequest, HttpResponse, Transport};
use crate::auth::SharedSession;
use crate::error::{FoodwebError, FoodwebResult};
use crate::navigation::{LOGIN_PATH, Navigator};
use foodweb_session::{LocalStorage, TOKEN_KEY, USER_INFO_KEY};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// HTTP status that tears the session down
const UNAUTHORIZED: u16 = 401;

/// Client for the backend REST API
///
/// Every call goes through the same pipeline:
///
/// 1. the bearer token, if durable storage holds one, is attached;
/// 2. the request is executed once, with no retry;
/// 3. a 401 clears the stored and in-memory session and navigates to
///    `/login` before the error is returned;
/// 4. any other non-2xx status fails;
/// 5. the envelope is unwrapped and its `data` decoded.
///
/// Cloning is cheap; clones share transport, storage and session.
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    transport: Arc<dyn Transport>,
    storage: Arc<dyn LocalStorage>,
    session: SharedSession,
    navigator: Arc<dyn Navigator>,
}

impl ApiClient {
    pub fn new(
        base_url: impl Into<String>,
        transport: Arc<dyn Transport>,
        storage: Arc<dyn LocalStorage>,
        session: SharedSession,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            transport,
            storage,
            session,
            navigator,
        }
    }

    /// Backend origin requests are sent to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Send a request and decode its payload
    #[instrument(
        skip(self, request),
        fields(method = %request.spec().method, path = %request.spec().path)
    )]
    pub async fn send<T: DeserializeOwned>(&self, request: ApiRequest<T>) -> FoodwebResult<T> {
        let http_request = self.prepare(request.into_spec()).await;
        debug!("Sending {} {}", http_request.method, http_request.url);

        let response = self.transport.execute(http_request).await.map_err(|e| {
            warn!("Request failed before a response arrived: {}", e);
            e
        })?;

        self.handle_response(response).await
    }

    async fn prepare(&self, spec: RequestSpec) -> HttpRequest {
        let mut headers = Vec::new();
        if let Some(token) = self.stored_token().await {
            headers.push(("Authorization".to_string(), format!("Bearer {}", token)));
        }

        HttpRequest {
            method: spec.method,
            url: self.url_for(&spec.path),
            headers,
            query: spec.query,
            body: spec.body,
        }
    }

    fn url_for(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// A storage failure here means "no token", not a failed request.
    async fn stored_token(&self) -> Option<String> {
        match self.storage.get_item(TOKEN_KEY).await {
            Ok(token) => token.filter(|t| !t.is_empty()),
            Err(e) => {
                warn!("Could not read stored token: {}", e);
                None
            }
        }
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: HttpResponse,
    ) -> FoodwebResult<T> {
        if response.status == UNAUTHORIZED {
            self.teardown_session().await;
            return Err(FoodwebError::unauthorized());
        }

        if !response.is_success() {
            warn!("Request failed with status {}", response.status);
            return Err(FoodwebError::http_status(response.status));
        }

        unwrap_envelope(&response.body).map_err(|e| {
            debug!("Envelope rejected: {}", e);
            e
        })
    }

    /// Clear the session everywhere it lives and send the user to sign in.
    async fn teardown_session(&self) {
        info!("Received 401, clearing session");

        for key in [TOKEN_KEY, USER_INFO_KEY] {
            if let Err(e) = self.storage.remove_item(key).await {
                warn!("Failed to remove '{}' from storage: {}", key, e);
            }
        }
        self.session.clear();
        self.navigator.push(LOGIN_PATH);
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::request::{Method, RequestBody};
    use crate::navigation::MockNavigator;
    use crate::testing::{RecordingNavigator, StubTransport};
    use crate::types::FileUpload;
    use foodweb_session::{MemoryStorage, Role, Session, UserInfo};
    use serde_json::{Value, json};

    struct Fixture {
        client: ApiClient,
        transport: Arc<StubTransport>,
        storage: Arc<MemoryStorage>,
        session: SharedSession,
        navigator: Arc<RecordingNavigator>,
    }

    fn fixture(storage: MemoryStorage) -> Fixture {
        let transport = Arc::new(StubTransport::new());
        let storage = Arc::new(storage);
        let session = SharedSession::default();
        let navigator = Arc::new(RecordingNavigator::new());
        let client = ApiClient::new(
            "http://backend.test/",
            transport.clone(),
            storage.clone(),
            session.clone(),
            navigator.clone(),
        );
        Fixture {
            client,
            transport,
            storage,
            session,
            navigator,
        }
    }

    fn logged_in_storage() -> MemoryStorage {
        MemoryStorage::with_items([
            (TOKEN_KEY, "tok-123"),
            (USER_INFO_KEY, r#"{"userId":1,"username":"a","role":"ADMIN","email":""}"#),
        ])
    }

    #[tokio::test]
    async fn test_success_returns_data() {
        let fx = fixture(MemoryStorage::new());
        fx.transport
            .push_json(200, json!({"code": 200, "message": "ok", "data": {"x": 1}}));

        let out: Value = fx
            .client
            .send(RequestSpec::get("/api/admin/dish/hot").into())
            .await
            .unwrap();
        assert_eq!(out, json!({"x": 1}));

        let sent = fx.transport.requests();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].url, "http://backend.test/api/admin/dish/hot");
        assert_eq!(sent[0].method, Method::Get);
    }

    #[tokio::test]
    async fn test_attaches_bearer_token_from_storage() {
        let fx = fixture(logged_in_storage());
        fx.transport.push_json(200, json!({"code": 200, "data": null}));

        fx.client
            .send::<()>(RequestSpec::delete("/api/admin/dish/9").into())
            .await
            .unwrap();

        let sent = fx.transport.requests();
        assert_eq!(sent[0].header("Authorization"), Some("Bearer tok-123"));
    }

    #[tokio::test]
    async fn test_no_token_no_header() {
        let fx = fixture(MemoryStorage::new());
        fx.transport.push_json(200, json!({"code": 200, "data": []}));

        let _: Vec<Value> = fx
            .client
            .send(RequestSpec::get("/api/admin/category").into())
            .await
            .unwrap();

        assert_eq!(fx.transport.requests()[0].header("Authorization"), None);
    }

    #[tokio::test]
    async fn test_application_failure() {
        let fx = fixture(logged_in_storage());
        fx.transport
            .push_json(200, json!({"code": 400, "message": "bad", "data": null}));

        let err = fx
            .client
            .send::<Value>(RequestSpec::get("/api/user/1").into())
            .await
            .unwrap_err();

        assert_eq!(err.message(), "bad");
        assert!(fx.navigator.paths().is_empty());
        assert!(fx.storage.contains(TOKEN_KEY).await.unwrap());
    }

    #[tokio::test]
    async fn test_unauthorized_tears_down_before_returning() {
        let fx = fixture(logged_in_storage());
        fx.session
            .replace(Session::authenticated("tok-123", UserInfo::new(1, "a", Role::Admin)));
        fx.transport.push_json(401, json!({"code": 401, "message": "expired"}));

        let err = fx
            .client
            .send::<Value>(RequestSpec::get("/api/user/page").into())
            .await
            .unwrap_err();

        assert!(err.is_unauthorized());
        assert!(!fx.storage.contains(TOKEN_KEY).await.unwrap());
        assert!(!fx.storage.contains(USER_INFO_KEY).await.unwrap());
        assert_eq!(fx.session.snapshot(), Session::default());
        assert_eq!(fx.navigator.paths(), vec![LOGIN_PATH.to_string()]);
    }

    #[tokio::test]
    async fn test_unauthorized_navigates_exactly_once() {
        let transport = Arc::new(StubTransport::new());
        transport.push_json(401, json!({}));

        let mut navigator = MockNavigator::new();
        navigator
            .expect_push()
            .withf(|path| path == LOGIN_PATH)
            .times(1)
            .return_const(());

        let client = ApiClient::new(
            "http://backend.test",
            transport,
            Arc::new(logged_in_storage()),
            SharedSession::default(),
            Arc::new(navigator),
        );

        let result = client
            .send::<Value>(RequestSpec::get("/api/user/page").into())
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_other_http_status() {
        let fx = fixture(logged_in_storage());
        fx.transport.push_json(500, json!({"error": "boom"}));

        let err = fx
            .client
            .send::<Value>(RequestSpec::get("/api/admin/dish").into())
            .await
            .unwrap_err();

        assert_eq!(err.message(), "Request failed with status code 500");
        assert!(fx.storage.contains(TOKEN_KEY).await.unwrap());
        assert!(fx.navigator.paths().is_empty());
    }

    #[tokio::test]
    async fn test_transport_failure_propagates() {
        let fx = fixture(MemoryStorage::new());
        fx.transport
            .push_error(FoodwebError::timeout("timeout of 10000ms exceeded"));

        let err = fx
            .client
            .send::<Value>(RequestSpec::get("/api/admin/dish").into())
            .await
            .unwrap_err();

        assert!(matches!(err, FoodwebError::Transport { timed_out: true, .. }));
        assert_eq!(err.message(), "timeout of 10000ms exceeded");
    }

    #[tokio::test]
    async fn test_multipart_body_passes_through_with_token() {
        let fx = fixture(logged_in_storage());
        fx.transport.push_json(
            200,
            json!({"code": 200, "data": {"url": "/u/a.png", "filename": "a.png"}}),
        );

        let file = FileUpload::new("a.png", vec![1, 2, 3]);
        let _: Value = fx
            .client
            .send(RequestSpec::post("/api/files/upload").with_file("file", file.clone()).into())
            .await
            .unwrap();

        let sent = fx.transport.requests();
        assert_eq!(sent[0].header("Authorization"), Some("Bearer tok-123"));
        assert_eq!(
            sent[0].body,
            RequestBody::Multipart {
                field: "file".to_string(),
                file
            }
        );
    }
}

use crate::config::Config;
use crate::error::AppError;
use crate::session::events::SessionEvents;
use crate::session::store::SessionStore;
use async_trait::async_trait;
use reqwest::multipart::Form;
use reqwest::{header, Client, Method, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use std::fmt::Debug;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, instrument, warn};

/// Single point of outbound communication with the PhotoVault API.
///
/// Implementations attach the current session token to every request and
/// centralize response classification, so services stay free of credential
/// and recovery concerns.
#[async_trait]
pub trait PvHttpClient: Send + Sync {
    /// Sends a JSON round trip to `{base_url}{path}`.
    async fn request<B, T>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<T, AppError>
    where
        B: Serialize + Debug + Send + Sync,
        T: DeserializeOwned;

    /// Sends a multipart POST to `{base_url}{path}` (file upload).
    async fn request_multipart<T>(&self, path: &str, form: Form) -> Result<T, AppError>
    where
        T: DeserializeOwned;
}

pub struct PvHttpClientImpl {
    client: Client,
    base_url: String,
    store: Arc<dyn SessionStore>,
    events: Arc<dyn SessionEvents>,
}

impl PvHttpClientImpl {
    /// Builds the client from the configured base URL and timeout. The
    /// session store is read again on every request, so a token set or
    /// cleared after construction is picked up immediately.
    pub fn new(
        config: &Config,
        store: Arc<dyn SessionStore>,
        events: Arc<dyn SessionEvents>,
    ) -> Result<Self, AppError> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        let client = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.rest_api.timeout))
            .build()?;

        Ok(Self {
            client,
            base_url: config.rest_api.base_url.clone(),
            store,
            events,
        })
    }

    fn authorize(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.store.get_token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn handle_response<T: DeserializeOwned>(&self, response: Response) -> Result<T, AppError> {
        let status = response.status();
        let body_text = response.text().await?;
        debug!("Response status: {}", status);

        if status.is_success() {
            let body: T = serde_json::from_str(&body_text)?;
            return Ok(body);
        }

        let detail = extract_detail(&body_text);
        match status {
            StatusCode::UNAUTHORIZED => {
                warn!("Session rejected by the server, clearing token");
                self.store.clear_token();
                self.events.session_invalidated();
                Err(AppError::Unauthorized)
            }
            StatusCode::NOT_FOUND => Err(AppError::NotFound(detail)),
            StatusCode::CONFLICT => Err(AppError::Conflict(detail)),
            _ => {
                error!("API request failed. Status: {}, Body: {}", status, body_text);
                Err(AppError::Unexpected { status, detail })
            }
        }
    }
}

/// Pulls the `detail` message out of an error body, when the server sent one.
fn extract_detail(body: &str) -> Option<String> {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| {
            value
                .get("detail")
                .and_then(|detail| detail.as_str())
                .map(String::from)
        })
}

#[async_trait]
impl PvHttpClient for PvHttpClientImpl {
    #[instrument(skip(self, body))]
    async fn request<B, T>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<T, AppError>
    where
        B: Serialize + Debug + Send + Sync,
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        debug!("Sending {} request to {}", method, url);

        let mut builder = self.client.request(method, &url);
        if let Some(body) = body {
            builder = builder.json(body);
        }

        let response = self.authorize(builder).send().await?;
        self.handle_response(response).await
    }

    #[instrument(skip(self, form))]
    async fn request_multipart<T>(&self, path: &str, form: Form) -> Result<T, AppError>
    where
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        debug!("Sending multipart POST request to {}", url);

        let builder = self.client.post(&url).multipart(form);
        let response = self.authorize(builder).send().await?;
        self.handle_response(response).await
    }
}

#[cfg(test)]
mod tests_pv_http_client {
    use super::*;
    use crate::session::store::InMemorySessionStore;
    use crate::utils::logger::setup_logger;
    use mockito::{Matcher, Server};
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug, Default)]
    struct CountingEvents {
        invalidations: AtomicUsize,
    }

    impl SessionEvents for CountingEvents {
        fn session_invalidated(&self) {
            self.invalidations.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn test_config(server_url: &str) -> Config {
        let mut config = Config::new();
        config.rest_api.base_url = server_url.to_string();
        config.rest_api.timeout = 30;
        config
    }

    fn create_client(
        server_url: &str,
    ) -> (
        PvHttpClientImpl,
        Arc<InMemorySessionStore>,
        Arc<CountingEvents>,
    ) {
        let store = Arc::new(InMemorySessionStore::new());
        let events = Arc::new(CountingEvents::default());
        let client = PvHttpClientImpl::new(
            &test_config(server_url),
            store.clone(),
            events.clone(),
        )
        .unwrap();
        (client, store, events)
    }

    #[tokio::test]
    async fn test_request_attaches_bearer_token() {
        setup_logger();
        let mut server = Server::new_async().await;

        let mock = server
            .mock("GET", "/photos")
            .match_header("authorization", "Bearer abc123")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body("[]")
            .create_async()
            .await;

        let (client, store, _events) = create_client(&server.url());
        store.set_token("abc123");

        let result: serde_json::Value = client
            .request::<(), serde_json::Value>(Method::GET, "/photos", None)
            .await
            .unwrap();

        assert_eq!(result, json!([]));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_request_without_token_has_no_auth_header() {
        setup_logger();
        let mut server = Server::new_async().await;

        let mock = server
            .mock("GET", "/photos")
            .match_header("authorization", Matcher::Missing)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body("[]")
            .create_async()
            .await;

        let (client, _store, _events) = create_client(&server.url());

        let result: Result<serde_json::Value, AppError> = client
            .request::<(), serde_json::Value>(Method::GET, "/photos", None)
            .await;

        assert!(result.is_ok());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_unauthorized_clears_session_and_fires_event_once() {
        setup_logger();
        let mut server = Server::new_async().await;

        let mock = server
            .mock("GET", "/photos/9")
            .with_status(401)
            .with_header("content-type", "application/json")
            .with_body(r#"{"detail": "Not authenticated"}"#)
            .create_async()
            .await;

        let (client, store, events) = create_client(&server.url());
        store.set_token("stale-token");

        let result: Result<serde_json::Value, AppError> = client
            .request::<(), serde_json::Value>(Method::GET, "/photos/9", None)
            .await;

        assert!(matches!(result, Err(AppError::Unauthorized)));
        assert_eq!(store.get_token(), None);
        assert_eq!(events.invalidations.load(Ordering::SeqCst), 1);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_not_found_carries_server_detail() {
        setup_logger();
        let mut server = Server::new_async().await;

        let _mock = server
            .mock("GET", "/photos/404")
            .with_status(404)
            .with_header("content-type", "application/json")
            .with_body(r#"{"detail": "Photo not found"}"#)
            .create_async()
            .await;

        let (client, _store, events) = create_client(&server.url());

        let result: Result<serde_json::Value, AppError> = client
            .request::<(), serde_json::Value>(Method::GET, "/photos/404", None)
            .await;

        match result {
            Err(AppError::NotFound(detail)) => {
                assert_eq!(detail, Some("Photo not found".to_string()))
            }
            other => panic!("expected NotFound, got {:?}", other.map(|_| ())),
        }
        assert_eq!(events.invalidations.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_conflict_carries_server_detail() {
        setup_logger();
        let mut server = Server::new_async().await;

        let _mock = server
            .mock("POST", "/hashtags/")
            .with_status(409)
            .with_header("content-type", "application/json")
            .with_body(r#"{"detail": "Hashtag already exists"}"#)
            .create_async()
            .await;

        let (client, _store, _events) = create_client(&server.url());

        let result: Result<serde_json::Value, AppError> = client
            .request(Method::POST, "/hashtags/", Some(&json!({"name": "travel"})))
            .await;

        match result {
            Err(AppError::Conflict(detail)) => {
                assert_eq!(detail, Some("Hashtag already exists".to_string()))
            }
            other => panic!("expected Conflict, got {:?}", other.map(|_| ())),
        }
    }

    #[tokio::test]
    async fn test_server_error_maps_to_unexpected() {
        setup_logger();
        let mut server = Server::new_async().await;

        let _mock = server
            .mock("GET", "/photos")
            .with_status(500)
            .with_body("Internal Server Error")
            .create_async()
            .await;

        let (client, store, events) = create_client(&server.url());
        store.set_token("abc123");

        let result: Result<serde_json::Value, AppError> = client
            .request::<(), serde_json::Value>(Method::GET, "/photos", None)
            .await;

        match result {
            Err(AppError::Unexpected { status, detail }) => {
                assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
                assert_eq!(detail, None);
            }
            other => panic!("expected Unexpected, got {:?}", other.map(|_| ())),
        }
        // Non-401 failures must not touch the session.
        assert_eq!(store.get_token(), Some("abc123".to_string()));
        assert_eq!(events.invalidations.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_malformed_success_body_maps_to_json_error() {
        setup_logger();
        let mut server = Server::new_async().await;

        let _mock = server
            .mock("GET", "/auth/me")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"id": "#)
            .create_async()
            .await;

        let (client, _store, _events) = create_client(&server.url());

        let result: Result<serde_json::Value, AppError> = client
            .request::<(), serde_json::Value>(Method::GET, "/auth/me", None)
            .await;

        assert!(matches!(result, Err(AppError::Json(_))));
    }

    #[tokio::test]
    async fn test_multipart_request_attaches_bearer_token() {
        setup_logger();
        let mut server = Server::new_async().await;

        let mock = server
            .mock("POST", "/photos/")
            .match_header("authorization", "Bearer abc123")
            .match_header(
                "content-type",
                Matcher::Regex("^multipart/form-data".to_string()),
            )
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"ok": true}"#)
            .create_async()
            .await;

        let (client, store, _events) = create_client(&server.url());
        store.set_token("abc123");

        let form = Form::new().text("hashtags", "travel,summer");
        let result: serde_json::Value = client.request_multipart("/photos/", form).await.unwrap();

        assert_eq!(result, json!({"ok": true}));
        mock.assert_async().await;
    }

    #[test]
    fn test_extract_detail() {
        assert_eq!(
            extract_detail(r#"{"detail": "boom"}"#),
            Some("boom".to_string())
        );
        assert_eq!(extract_detail(r#"{"message": "boom"}"#), None);
        assert_eq!(extract_detail("not json"), None);
        assert_eq!(extract_detail(r#"{"detail": 42}"#), None);
    }
}

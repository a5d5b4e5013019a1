//! HTTP client for the library REST API
//!
//! Endpoint groups live in submodules; status mapping and cookie handling
//! stay here.

pub mod auth;
pub mod books;
pub mod borrows;
pub mod files;
pub mod loans;
pub mod users;

use std::sync::Arc;
use std::time::Duration;

use reqwest::cookie::{CookieStore, Jar};
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use reqwest::{Method, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::ApiConfig;
use crate::error::{ClientError, ClientResult};

const USER_AGENT_VALUE: &str = concat!("mini-library/", env!("CARGO_PKG_VERSION"));

/// Client for the library API. Cheap to clone; clones share the cookie jar.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    jar: Arc<Jar>,
    base_url: String,
    origin: Url,
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> ClientResult<Self> {
        let base_url = config.base_url.trim_end_matches('/').to_string();
        let origin = Url::parse(&base_url)
            .map_err(|e| ClientError::Config(format!("invalid API base URL {}: {}", base_url, e)))?;

        let mut default_headers = HeaderMap::new();
        default_headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));

        let jar = Arc::new(Jar::default());
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers(default_headers)
            .cookie_provider(jar.clone())
            .build()?;

        Ok(Self {
            http,
            jar,
            base_url,
            origin,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `Cookie` header value the jar would send to the API
    pub fn session_cookie(&self) -> Option<String> {
        self.jar
            .cookies(&self.origin)
            .and_then(|value| value.to_str().ok().map(str::to_string))
            .filter(|value| !value.is_empty())
    }

    /// Put previously saved cookies back into the jar
    pub fn restore_cookie(&self, header: &str) {
        for pair in header.split(';').map(str::trim).filter(|p| p.contains('=')) {
            self.jar.add_cookie_str(&format!("{}; Path=/", pair), &self.origin);
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http.request(method, self.url(path))
    }

    /// Send a request and turn non-success statuses into errors
    async fn send(&self, method: Method, path: &str, builder: RequestBuilder) -> ClientResult<Response> {
        tracing::debug!(%method, path, "sending request");

        let response = builder.send().await?;
        let status = response.status();
        tracing::debug!(%method, path, status = status.as_u16(), "response received");

        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let error = ClientError::from_status(status, &body);
        tracing::warn!(%method, path, status = status.as_u16(), "request failed: {}", error);
        Err(error)
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> ClientResult<T> {
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let response = self.send(Method::GET, path, self.request(Method::GET, path)).await?;
        Self::decode(response).await
    }

    pub(crate) async fn get_json_with<T, Q>(&self, path: &str, query: &Q) -> ClientResult<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let builder = self.request(Method::GET, path).query(query);
        let response = self.send(Method::GET, path, builder).await?;
        Self::decode(response).await
    }

    /// Send a JSON body; whatever the backend answers is dropped
    pub(crate) async fn send_json<B>(&self, method: Method, path: &str, body: &B) -> ClientResult<()>
    where
        B: Serialize + ?Sized,
    {
        let builder = self.request(method.clone(), path).json(body);
        self.send(method, path, builder).await?;
        Ok(())
    }

    pub(crate) async fn send_empty(&self, method: Method, path: &str) -> ClientResult<()> {
        self.send(method.clone(), path, self.request(method, path)).await?;
        Ok(())
    }
}

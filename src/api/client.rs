//! API Client
//!
//! Main client for the Stark Bank API, combining the signing user and the
//! HTTP layer. Implements [`Transport`] so every resource module can run
//! against it.

use super::auth::{resolve_user, Environment, User};
use super::http::HttpClient;
use crate::error::{Error, Result};
use crate::resource::{Page, Query, Resource, Transport};
use async_trait::async_trait;
use reqwest::Method;
use serde_json::{json, Value};
use std::time::Duration;
use url::Url;

/// API version prefix for every path
const API_VERSION: &str = "v2";

/// Default request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Languages accepted by the API for error messages
pub const LANGUAGES: &[&str] = &["en-US", "pt-BR"];

/// Client settings
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL override, e.g. a mock server. Defaults to the user's environment.
    pub base_url: Option<String>,
    pub timeout: Duration,
    /// `Accept-Language` header value
    pub language: String,
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout: DEFAULT_TIMEOUT,
            language: "en-US".to_string(),
            user_agent: format!("starkbank-rust/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ClientConfig {
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = Some(base_url.to_string());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_language(mut self, language: &str) -> Result<Self> {
        if !LANGUAGES.contains(&language) {
            return Err(Error::Config(format!(
                "unsupported language {:?}, expected one of {:?}",
                language, LANGUAGES
            )));
        }
        self.language = language.to_string();
        Ok(self)
    }
}

/// Main API client
#[derive(Clone)]
pub struct Client {
    pub http: HttpClient,
    pub config: ClientConfig,
    user: Option<User>,
}

impl Client {
    /// Create a client with default settings
    pub fn new(user: Option<User>) -> Result<Self> {
        Self::with_config(user, ClientConfig::default())
    }

    pub fn with_config(user: Option<User>, config: ClientConfig) -> Result<Self> {
        let http = HttpClient::new(config.timeout, &config.user_agent, &config.language)?;

        Ok(Self { http, config, user })
    }

    /// Copy of this client acting as another user
    pub fn with_user(&self, user: User) -> Self {
        Self {
            user: Some(user),
            ..self.clone()
        }
    }

    /// The user requests are signed with: own user, else the default user
    pub fn user(&self) -> Result<User> {
        resolve_user(self.user.as_ref())
    }

    /// Environment requests go to
    pub fn environment(&self) -> Result<Environment> {
        Ok(self.user()?.environment)
    }

    // =========================================================================
    // URL helpers
    // =========================================================================

    /// Build `{base}/v2/{path}?{query}`
    pub fn api_url(&self, user: &User, path: &str, query: &Query) -> Result<Url> {
        let base = match &self.config.base_url {
            Some(base) if base.ends_with('/') => base.clone(),
            Some(base) => format!("{}/", base),
            None => user.environment.base_url().to_string(),
        };

        let mut url = Url::parse(&base)
            .and_then(|base| base.join(&format!("{}/{}", API_VERSION, path)))
            .map_err(|e| Error::Config(format!("invalid base URL {:?}: {}", base, e)))?;

        let pairs = query.to_pairs();
        if !pairs.is_empty() {
            url.query_pairs_mut().extend_pairs(pairs);
        }

        Ok(url)
    }

    // =========================================================================
    // Raw requests
    // =========================================================================

    /// Make a GET request to an API path
    pub async fn get(&self, path: &str, query: &Query) -> Result<Value> {
        let user = self.user()?;
        let url = self.api_url(&user, path, query)?;
        self.http.request(Method::GET, url, &user, None).await
    }

    /// Make a GET request for binary content
    pub async fn get_bytes(&self, path: &str, query: &Query) -> Result<Vec<u8>> {
        let user = self.user()?;
        let url = self.api_url(&user, path, query)?;
        self.http.request_bytes(url, &user).await
    }

    /// Make a POST request to an API path
    pub async fn post(&self, path: &str, body: &Value, query: &Query) -> Result<Value> {
        let user = self.user()?;
        let url = self.api_url(&user, path, query)?;
        self.http.request(Method::POST, url, &user, Some(body)).await
    }

    /// Make a PATCH request to an API path
    pub async fn patch_path(&self, path: &str, body: &Value) -> Result<Value> {
        let user = self.user()?;
        let url = self.api_url(&user, path, &Query::new())?;
        self.http.request(Method::PATCH, url, &user, Some(body)).await
    }

    /// Make a DELETE request to an API path
    pub async fn delete(&self, path: &str) -> Result<Value> {
        let user = self.user()?;
        let url = self.api_url(&user, path, &Query::new())?;
        self.http.request(Method::DELETE, url, &user, None).await
    }
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("config", &self.config)
            .field("user", &self.user)
            .finish_non_exhaustive()
    }
}

/// `{endpoint}/{id}` with the id percent-encoded
fn entity_path(resource: &Resource, id: &str) -> String {
    format!("{}/{}", resource.endpoint(), urlencoding::encode(id))
}

/// Take `key` out of a response envelope
fn unwrap_envelope(resource: &Resource, key: &str, mut envelope: Value) -> Result<Value> {
    match envelope.get_mut(key).map(Value::take) {
        Some(Value::Null) | None => Err(Error::decode(
            resource.name,
            format!("response has no {:?} field", key),
        )),
        Some(value) => Ok(value),
    }
}

#[async_trait]
impl Transport for Client {
    async fn get_page(&self, resource: &Resource, query: &Query) -> Result<Page> {
        let envelope = self.get(&resource.endpoint(), query).await?;
        Page::from_envelope(resource, envelope)
    }

    async fn get_by_id(&self, resource: &Resource, id: &str, query: &Query) -> Result<Value> {
        let envelope = self.get(&entity_path(resource, id), query).await?;
        unwrap_envelope(resource, &resource.key(), envelope)
    }

    async fn get_content(
        &self,
        resource: &Resource,
        id: &str,
        sub_resource: &str,
        query: &Query,
    ) -> Result<Vec<u8>> {
        let path = format!("{}/{}", entity_path(resource, id), sub_resource);
        self.get_bytes(&path, query).await
    }

    async fn get_sub_resource(
        &self,
        resource: &Resource,
        id: &str,
        sub_resource: &Resource,
    ) -> Result<Value> {
        let key = sub_resource.key();
        let path = format!("{}/{}", entity_path(resource, id), key);
        let envelope = self.get(&path, &Query::new()).await?;
        unwrap_envelope(sub_resource, &key, envelope)
    }

    async fn post_multi(
        &self,
        resource: &Resource,
        records: Vec<Value>,
        query: &Query,
    ) -> Result<Vec<Value>> {
        let collection = resource.collection_key();
        let body = json!({ collection.as_str(): records });
        let envelope = self.post(&resource.endpoint(), &body, query).await?;

        match unwrap_envelope(resource, &collection, envelope)? {
            Value::Array(records) => Ok(records),
            other => Err(Error::decode(
                resource.name,
                format!("expected a list under {:?}, got {}", collection, other),
            )),
        }
    }

    async fn post_single(&self, resource: &Resource, record: Value) -> Result<Value> {
        let envelope = self.post(&resource.endpoint(), &record, &Query::new()).await?;
        unwrap_envelope(resource, &resource.key(), envelope)
    }

    async fn patch(&self, resource: &Resource, id: &str, partial: Value) -> Result<Value> {
        let envelope = self.patch_path(&entity_path(resource, id), &partial).await?;
        unwrap_envelope(resource, &resource.key(), envelope)
    }

    async fn delete_by_id(&self, resource: &Resource, id: &str) -> Result<Value> {
        let envelope = self.delete(&entity_path(resource, id)).await?;
        unwrap_envelope(resource, &resource.key(), envelope)
    }
}

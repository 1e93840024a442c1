//! HTTP utilities for signed API calls

use super::auth::User;
use crate::error::{Error, ErrorEntry, Result};
use reqwest::header::{ACCEPT_LANGUAGE, CONTENT_TYPE};
use reqwest::{Client, Method, Response, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use url::Url;

/// Maximum length of response body to log (to avoid logging sensitive data)
const MAX_LOG_BODY_LENGTH: usize = 200;

/// Sanitize response body for logging
/// Truncates long responses and drops control characters
fn sanitize_for_log(body: &str) -> String {
    let char_count = body.chars().count();
    let truncated = if char_count > MAX_LOG_BODY_LENGTH {
        let head: String = body.chars().take(MAX_LOG_BODY_LENGTH).collect();
        format!("{}... [truncated, {} bytes total]", head, body.len())
    } else {
        body.to_string()
    };

    truncated.replace(|c: char| !c.is_ascii_graphic() && c != ' ', "")
}

/// Error body returned by the API on 4xx responses
#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    errors: Vec<ErrorEntry>,
}

/// Classify a non-success response
fn classify_error(status: StatusCode, body: &str) -> Error {
    if status == StatusCode::INTERNAL_SERVER_ERROR {
        return Error::InternalServer;
    }

    if status.is_client_error() {
        if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) {
            if !parsed.errors.is_empty() {
                return Error::Input(parsed.errors);
            }
        }
    }

    Error::Unknown {
        status: status.as_u16(),
        message: sanitize_for_log(body),
    }
}

/// HTTP client wrapper that signs every request with the calling user
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    language: String,
}

impl HttpClient {
    /// Create a new HTTP client
    pub fn new(timeout: Duration, user_agent: &str, language: &str) -> Result<Self> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            language: language.to_string(),
        })
    }

    /// Send a signed request; non-success statuses become errors
    async fn send(
        &self,
        method: Method,
        url: Url,
        user: &User,
        body: Option<&Value>,
    ) -> Result<Response> {
        tracing::debug!("{} {}", method, url);

        let payload = match body {
            Some(body) => serde_json::to_string(body)
                .map_err(|e| Error::Config(format!("unserializable request body: {}", e)))?,
            None => String::new(),
        };

        let access_id = user.access_id();
        let access_time = chrono::Utc::now().timestamp().to_string();
        let message = format!("{}:{}:{}", access_id, access_time, payload);
        // Signers may block, e.g. on an openssl subprocess
        let signer = user.clone();
        let signature = tokio::task::spawn_blocking(move || signer.sign(&message))
            .await
            .map_err(|e| Error::Signing(format!("signing task failed: {}", e)))??;

        let mut request = self
            .client
            .request(method, url)
            .header("Access-Id", access_id)
            .header("Access-Time", access_time)
            .header("Access-Signature", signature)
            .header(ACCEPT_LANGUAGE, &self.language)
            .header(CONTENT_TYPE, "application/json");

        if body.is_some() {
            request = request.body(payload);
        }

        let response = request.send().await?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        // Security: Only log sanitized/truncated error body to avoid leaking sensitive data
        tracing::error!("API error: {} - {}", status, sanitize_for_log(&body));
        Err(classify_error(status, &body))
    }

    /// Make a signed request and parse the JSON response
    pub async fn request(
        &self,
        method: Method,
        url: Url,
        user: &User,
        body: Option<&Value>,
    ) -> Result<Value> {
        let response = self.send(method, url, user, body).await?;
        let status = response.status().as_u16();
        let text = response.text().await?;

        // Handle empty response
        if text.is_empty() {
            return Ok(Value::Null);
        }

        serde_json::from_str(&text).map_err(|e| Error::Unknown {
            status,
            message: format!("Failed to parse response JSON: {}", e),
        })
    }

    /// Make a signed GET request for binary content
    pub async fn request_bytes(&self, url: Url, user: &User) -> Result<Vec<u8>> {
        let response = self.send(Method::GET, url, user, None).await?;
        Ok(response.bytes().await?.to_vec())
    }
}

/// Format an API error for display
pub fn format_api_error(error: &Error) -> String {
    match error {
        Error::Input(entries) => entries
            .iter()
            .map(|e| format!("{}: {}", e.code, e.message))
            .collect::<Vec<_>>()
            .join("\n"),
        Error::InternalServer => {
            "Stark Bank is temporarily unavailable. Please try again.".to_string()
        }
        Error::Unknown { status: 401, .. } | Error::Unknown { status: 403, .. } => {
            "Authentication failed. Check your user id and private key.".to_string()
        }
        Error::Unknown { status: 404, .. } => "Resource not found.".to_string(),
        Error::Unknown { status: 429, .. } => {
            "Rate limit exceeded. Please try again later.".to_string()
        }
        Error::Http(err) if err.is_timeout() => "Request timed out.".to_string(),
        Error::Http(_) => {
            "Request failed. Check your network connection and try again.".to_string()
        }
        other => other.to_string(),
    }
}

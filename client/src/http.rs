//! HTTP client: the single choke point for outbound calls.
//!
//! # Design
//! `HttpClient` holds a configured `ureq::Agent` and the backend base
//! address, and carries no other state between calls. Every outcome crossing
//! this boundary is normalized: non-2xx statuses become `ApiError::Http`
//! with the body read as text, timeouts become `ApiError::Timeout`, and
//! transport failures become `ApiError::Network` — callers never see a raw
//! `ureq::Error`. Successful responses are dispatched on content type:
//! JSON bodies come back parsed, everything else as raw text.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::Config;
use crate::error::ApiError;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        };
        f.write_str(name)
    }
}

/// A successful response body, dispatched on the `content-type` header.
#[derive(Debug, Clone)]
pub enum ResponseBody {
    /// The server declared `application/json`; the body is parsed.
    Json(serde_json::Value),
    /// Anything else, returned verbatim (empty for 204 responses).
    Text(String),
}

impl ResponseBody {
    /// Deserialize a JSON body into `T`. Fails when the server did not send
    /// JSON or the shape does not match.
    pub fn into_json<T: DeserializeOwned>(self) -> Result<T, ApiError> {
        match self {
            ResponseBody::Json(value) => {
                serde_json::from_value(value).map_err(|e| ApiError::Deserialization(e.to_string()))
            }
            ResponseBody::Text(text) => Err(ApiError::Deserialization(format!(
                "expected a JSON response, got text ({} bytes)",
                text.len()
            ))),
        }
    }

    pub fn into_text(self) -> String {
        match self {
            ResponseBody::Json(value) => value.to_string(),
            ResponseBody::Text(text) => text,
        }
    }
}

/// Synchronous HTTP client for the task backend.
///
/// Stateless between calls apart from the base address and the agent's
/// connection pool. The per-request time limit comes from `Config::timeout`;
/// on expiry the in-flight request is aborted and reported as
/// `ApiError::Timeout`.
#[derive(Debug, Clone)]
pub struct HttpClient {
    agent: ureq::Agent,
    base_url: String,
}

impl HttpClient {
    pub fn new(config: &Config) -> Self {
        // Status codes are handled here, not raised by the transport.
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(Some(config.timeout))
            .build()
            .new_agent();
        Self {
            agent,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Perform a request against `base_url` + `path`.
    ///
    /// `body`, when present, is sent as-is with a JSON content type; the
    /// convenience wrappers below serialize it.
    pub fn request(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<String>,
    ) -> Result<ResponseBody, ApiError> {
        let url = join_url(&self.base_url, path);

        let result = match (method, body) {
            (HttpMethod::Get, _) => self.agent.get(&url).call(),
            (HttpMethod::Delete, _) => self.agent.delete(&url).call(),
            (HttpMethod::Post, Some(b)) => self
                .agent
                .post(&url)
                .content_type("application/json")
                .send(b.as_bytes()),
            (HttpMethod::Post, None) => self.agent.post(&url).send_empty(),
            (HttpMethod::Put, Some(b)) => self
                .agent
                .put(&url)
                .content_type("application/json")
                .send(b.as_bytes()),
            (HttpMethod::Put, None) => self.agent.put(&url).send_empty(),
            (HttpMethod::Patch, Some(b)) => self
                .agent
                .patch(&url)
                .content_type("application/json")
                .send(b.as_bytes()),
            (HttpMethod::Patch, None) => self.agent.patch(&url).send_empty(),
        };

        let mut response = result.map_err(classify_transport)?;
        let status = response.status();

        let is_json = response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.contains("application/json"));

        let text = response
            .body_mut()
            .read_to_string()
            .map_err(classify_transport)?;

        log::debug!("{method} {url} -> {status}");

        if !status.is_success() {
            return Err(ApiError::Http {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or("").to_string(),
                body: text,
            });
        }

        if is_json {
            let value = serde_json::from_str(&text)
                .map_err(|e| ApiError::Deserialization(e.to_string()))?;
            Ok(ResponseBody::Json(value))
        } else {
            Ok(ResponseBody::Text(text))
        }
    }

    pub fn get(&self, path: &str) -> Result<ResponseBody, ApiError> {
        self.request(HttpMethod::Get, path, None)
    }

    pub fn post<T: Serialize>(&self, path: &str, body: &T) -> Result<ResponseBody, ApiError> {
        self.request(HttpMethod::Post, path, Some(to_json(body)?))
    }

    pub fn put<T: Serialize>(&self, path: &str, body: &T) -> Result<ResponseBody, ApiError> {
        self.request(HttpMethod::Put, path, Some(to_json(body)?))
    }

    pub fn patch<T: Serialize>(&self, path: &str, body: &T) -> Result<ResponseBody, ApiError> {
        self.request(HttpMethod::Patch, path, Some(to_json(body)?))
    }

    pub fn delete(&self, path: &str) -> Result<ResponseBody, ApiError> {
        self.request(HttpMethod::Delete, path, None)
    }
}

fn to_json<T: Serialize>(body: &T) -> Result<String, ApiError> {
    serde_json::to_string(body).map_err(|e| ApiError::Serialization(e.to_string()))
}

fn join_url(base: &str, path: &str) -> String {
    format!("{base}/{}", path.trim_start_matches('/'))
}

/// Classify a transport-level failure into a stable `ApiError` variant.
/// This is the only place the crate inspects `ureq::Error`.
fn classify_transport(err: ureq::Error) -> ApiError {
    match err {
        ureq::Error::Timeout(_) => ApiError::Timeout,
        e @ (ureq::Error::ConnectionFailed
        | ureq::Error::HostNotFound
        | ureq::Error::Io(_)) => ApiError::Network(e.to_string()),
        other => ApiError::Unknown(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_url_handles_leading_and_trailing_slashes() {
        assert_eq!(
            join_url("http://localhost:3001", "tasks"),
            "http://localhost:3001/tasks"
        );
        assert_eq!(
            join_url("http://localhost:3001", "/tasks/abc"),
            "http://localhost:3001/tasks/abc"
        );
    }

    #[test]
    fn method_displays_as_wire_name() {
        assert_eq!(HttpMethod::Get.to_string(), "GET");
        assert_eq!(HttpMethod::Patch.to_string(), "PATCH");
    }

    #[test]
    fn into_json_parses_matching_shape() {
        let body = ResponseBody::Json(serde_json::json!({"a": 1}));
        let value: serde_json::Value = body.into_json().unwrap();
        assert_eq!(value["a"], 1);
    }

    #[test]
    fn into_json_rejects_text_body() {
        let body = ResponseBody::Text("plain".to_string());
        let err = body.into_json::<serde_json::Value>().unwrap_err();
        assert!(matches!(err, ApiError::Deserialization(_)));
    }

    #[test]
    fn into_text_passes_through() {
        assert_eq!(ResponseBody::Text("ok".to_string()).into_text(), "ok");
    }
}

//! Error types for the task API client.
//!
//! # Design
//! `ApiError` is the tagged taxonomy produced at the HTTP layer: transport
//! failures are classified into a stable variant at the single point where
//! the underlying error is caught, so downstream logic matches on a kind
//! rather than inspecting message text. `ServiceError` wraps an `ApiError`
//! with the domain operation (and task id, when there is one) that failed;
//! the underlying cause stays reachable through `Error::source`.

use std::fmt;

use uuid::Uuid;

/// Errors produced by `HttpClient`, plus validation failures raised before
/// any network call.
#[derive(Debug)]
pub enum ApiError {
    /// The input was rejected client-side; no request was sent.
    Validation(String),

    /// The server answered with a non-2xx status.
    Http {
        status: u16,
        status_text: String,
        body: String,
    },

    /// The request exceeded the configured time limit and was aborted.
    Timeout,

    /// The request never reached the server (connection refused, unknown
    /// host, broken transport).
    Network(String),

    /// The request payload could not be serialized to JSON.
    Serialization(String),

    /// The response body could not be read into the expected shape.
    Deserialization(String),

    /// A transport failure outside the classified cases, carried unchanged.
    Unknown(String),
}

impl ApiError {
    /// True when the server reported the resource as absent.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::Http { status: 404, .. })
    }

    /// The HTTP status code, when the server produced a response at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Validation(msg) => write!(f, "invalid input: {msg}"),
            ApiError::Http {
                status,
                status_text,
                body,
            } => {
                write!(f, "HTTP {status} {status_text}")?;
                if !body.is_empty() {
                    write!(f, ": {body}")?;
                }
                Ok(())
            }
            ApiError::Timeout => write!(f, "request timed out"),
            ApiError::Network(msg) => write!(f, "network failure: {msg}"),
            ApiError::Serialization(msg) => write!(f, "serialization failed: {msg}"),
            ApiError::Deserialization(msg) => write!(f, "deserialization failed: {msg}"),
            ApiError::Unknown(msg) => write!(f, "transport failure: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

/// A failed `TaskService` operation: which operation, on which task, and the
/// `ApiError` that caused it.
#[derive(Debug)]
pub struct ServiceError {
    operation: &'static str,
    id: Option<Uuid>,
    source: ApiError,
}

impl ServiceError {
    pub(crate) fn new(operation: &'static str, id: Option<Uuid>, source: ApiError) -> Self {
        Self {
            operation,
            id,
            source,
        }
    }

    /// The domain operation that failed, e.g. `"create task"`.
    pub fn operation(&self) -> &'static str {
        self.operation
    }

    /// The task the operation targeted, when it targeted one.
    pub fn task_id(&self) -> Option<Uuid> {
        self.id
    }

    /// The underlying classified error.
    pub fn kind(&self) -> &ApiError {
        &self.source
    }

    pub fn is_not_found(&self) -> bool {
        self.source.is_not_found()
    }
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.id {
            Some(id) => write!(f, "failed to {} {id}: {}", self.operation, self.source),
            None => write!(f, "failed to {}: {}", self.operation, self.source),
        }
    }
}

impl std::error::Error for ServiceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn http_error_display_includes_status_and_body() {
        let err = ApiError::Http {
            status: 500,
            status_text: "Internal Server Error".to_string(),
            body: "boom".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP 500 Internal Server Error: boom");
    }

    #[test]
    fn http_error_display_omits_empty_body() {
        let err = ApiError::Http {
            status: 404,
            status_text: "Not Found".to_string(),
            body: String::new(),
        };
        assert_eq!(err.to_string(), "HTTP 404 Not Found");
    }

    #[test]
    fn not_found_is_recognized() {
        let err = ApiError::Http {
            status: 404,
            status_text: "Not Found".to_string(),
            body: String::new(),
        };
        assert!(err.is_not_found());
        assert_eq!(err.status(), Some(404));
        assert!(!ApiError::Timeout.is_not_found());
        assert_eq!(ApiError::Timeout.status(), None);
    }

    #[test]
    fn service_error_embeds_operation_id_and_cause() {
        let id = Uuid::nil();
        let err = ServiceError::new("update task", Some(id), ApiError::Timeout);
        assert_eq!(
            err.to_string(),
            "failed to update task 00000000-0000-0000-0000-000000000000: request timed out"
        );
        assert_eq!(err.operation(), "update task");
        assert_eq!(err.task_id(), Some(id));
        assert!(matches!(err.kind(), ApiError::Timeout));
    }

    #[test]
    fn service_error_preserves_source_chain() {
        let err = ServiceError::new(
            "list tasks",
            None,
            ApiError::Network("connection refused".to_string()),
        );
        assert_eq!(
            err.to_string(),
            "failed to list tasks: network failure: connection refused"
        );
        let source = err.source().expect("source preserved");
        assert_eq!(source.to_string(), "network failure: connection refused");
    }
}

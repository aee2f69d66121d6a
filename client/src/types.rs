//! Domain DTOs for the task API.
//!
//! # Design
//! These types mirror the backend's JSON schema (camelCase field names,
//! RFC 3339 timestamps) but are defined independently of the mock-server
//! crate; integration tests catch any schema drift between the two. `Task`
//! is what the backend returns, `TaskDraft` is the full payload sent on
//! create and full update, and `TaskPatch` carries only the fields a partial
//! update actually changes.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

/// A task as stored by the backend. `created_at` is set once at creation;
/// `updated_at` is stamped on every mutation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: Uuid,
    pub text: String,
    pub completed: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

/// Caller-facing input for creating a task. Only `text` is required;
/// `completed` defaults to false and `created_at` to the call time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    pub text: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(
        default,
        with = "time::serde::rfc3339::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<OffsetDateTime>,
}

impl NewTask {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            completed: false,
            created_at: None,
        }
    }
}

/// Full task payload for `POST /tasks` and `PUT /tasks/:id`. The service
/// fills every field before sending; the backend assigns the id on create.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDraft {
    pub text: String,
    pub completed: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

/// Partial payload for `PATCH /tasks/:id`. Omitted fields are not serialized
/// and remain unchanged on the server.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
    #[serde(
        default,
        with = "time::serde::rfc3339::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_at: Option<OffsetDateTime>,
}

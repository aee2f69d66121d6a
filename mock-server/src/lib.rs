use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

#[derive(Clone, Debug, Serialize, Deserialize)]
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

/// Payload for `POST /tasks` and `PUT /tasks/:id`. Timestamps default to the
/// server clock when the client omits them.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskBody {
    pub text: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub created_at: Option<OffsetDateTime>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub updated_at: Option<OffsetDateTime>,
}

/// Payload for `PATCH /tasks/:id`. Only present fields are applied.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPatch {
    pub text: Option<String>,
    pub completed: Option<bool>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub updated_at: Option<OffsetDateTime>,
}

pub type Db = Arc<RwLock<HashMap<Uuid, Task>>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(HashMap::new()));
    Router::new()
        .route("/tasks", get(list_tasks).post(create_task))
        .route(
            "/tasks/{id}",
            get(get_task).put(replace_task).patch(patch_task).delete(delete_task),
        )
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn list_tasks(State(db): State<Db>) -> Json<Vec<Task>> {
    let tasks = db.read().await;
    Json(tasks.values().cloned().collect())
}

async fn create_task(
    State(db): State<Db>,
    Json(input): Json<TaskBody>,
) -> (StatusCode, Json<Task>) {
    let now = OffsetDateTime::now_utc();
    let task = Task {
        id: Uuid::new_v4(),
        text: input.text,
        completed: input.completed,
        created_at: input.created_at.unwrap_or(now),
        updated_at: input.updated_at.unwrap_or(now),
    };
    db.write().await.insert(task.id, task.clone());
    (StatusCode::CREATED, Json(task))
}

async fn get_task(
    State(db): State<Db>,
    Path(id): Path<Uuid>,
) -> Result<Json<Task>, StatusCode> {
    let tasks = db.read().await;
    tasks.get(&id).cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}

async fn replace_task(
    State(db): State<Db>,
    Path(id): Path<Uuid>,
    Json(input): Json<TaskBody>,
) -> Result<Json<Task>, StatusCode> {
    let mut tasks = db.write().await;
    let task = tasks.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    let now = OffsetDateTime::now_utc();
    task.text = input.text;
    task.completed = input.completed;
    task.created_at = input.created_at.unwrap_or(task.created_at);
    task.updated_at = input.updated_at.unwrap_or(now);
    Ok(Json(task.clone()))
}

async fn patch_task(
    State(db): State<Db>,
    Path(id): Path<Uuid>,
    Json(input): Json<TaskPatch>,
) -> Result<Json<Task>, StatusCode> {
    let mut tasks = db.write().await;
    let task = tasks.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    if let Some(text) = input.text {
        task.text = text;
    }
    if let Some(completed) = input.completed {
        task.completed = completed;
    }
    if let Some(updated_at) = input.updated_at {
        task.updated_at = updated_at;
    }
    Ok(Json(task.clone()))
}

async fn delete_task(
    State(db): State<Db>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, StatusCode> {
    let mut tasks = db.write().await;
    tasks.remove(&id).map(|_| StatusCode::NO_CONTENT).ok_or(StatusCode::NOT_FOUND)
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn task_serializes_with_camel_case_timestamps() {
        let task = Task {
            id: Uuid::nil(),
            text: "Test".to_string(),
            completed: false,
            created_at: datetime!(2024-01-01 00:00:00 UTC),
            updated_at: datetime!(2024-01-01 00:00:00 UTC),
        };
        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(json["id"], "00000000-0000-0000-0000-000000000000");
        assert_eq!(json["text"], "Test");
        assert_eq!(json["completed"], false);
        assert_eq!(json["createdAt"], "2024-01-01T00:00:00Z");
        assert_eq!(json["updatedAt"], "2024-01-01T00:00:00Z");
    }

    #[test]
    fn task_body_defaults_completed_and_timestamps() {
        let input: TaskBody = serde_json::from_str(r#"{"text":"No extras"}"#).unwrap();
        assert_eq!(input.text, "No extras");
        assert!(!input.completed);
        assert!(input.created_at.is_none());
        assert!(input.updated_at.is_none());
    }

    #[test]
    fn task_body_accepts_full_payload() {
        let input: TaskBody = serde_json::from_str(
            r#"{"text":"Full","completed":true,"createdAt":"2024-01-01T00:00:00Z","updatedAt":"2024-01-02T00:00:00Z"}"#,
        )
        .unwrap();
        assert!(input.completed);
        assert_eq!(input.created_at.unwrap(), datetime!(2024-01-01 00:00:00 UTC));
        assert_eq!(input.updated_at.unwrap(), datetime!(2024-01-02 00:00:00 UTC));
    }

    #[test]
    fn task_body_rejects_missing_text() {
        let result: Result<TaskBody, _> = serde_json::from_str(r#"{"completed":true}"#);
        assert!(result.is_err());
    }

    #[test]
    fn task_patch_all_fields_optional() {
        let input: TaskPatch = serde_json::from_str(r#"{}"#).unwrap();
        assert!(input.text.is_none());
        assert!(input.completed.is_none());
        assert!(input.updated_at.is_none());
    }

    #[test]
    fn task_patch_partial_fields() {
        let input: TaskPatch = serde_json::from_str(r#"{"completed":true}"#).unwrap();
        assert!(input.text.is_none());
        assert_eq!(input.completed, Some(true));
    }
}

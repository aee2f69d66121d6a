//! Domain CRUD operations over the HTTP client.
//!
//! # Design
//! `TaskService` owns an injected `HttpClient` and shapes every request and
//! response for the `/tasks` resource: it validates input before anything
//! touches the network, fills creation defaults, and stamps `updated_at` on
//! every mutation. Every failure coming back through a public method is
//! wrapped in a `ServiceError` naming the operation and, when applicable,
//! the task id, with the classified cause preserved underneath.

use time::OffsetDateTime;
use uuid::Uuid;

use crate::error::{ApiError, ServiceError};
use crate::http::HttpClient;
use crate::types::{NewTask, Task, TaskDraft, TaskPatch};

const ENDPOINT: &str = "tasks";

/// CRUD operations for the `/tasks` resource.
#[derive(Debug, Clone)]
pub struct TaskService {
    http: HttpClient,
}

impl TaskService {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    /// `GET /tasks` — every task, in backend order.
    pub fn get_all_tasks(&self) -> Result<Vec<Task>, ServiceError> {
        self.fetch_all()
            .map_err(|e| ServiceError::new("list tasks", None, e))
    }

    /// `GET /tasks/:id` — a single task; an absent id surfaces as an
    /// `ApiError::Http` with status 404.
    pub fn get_task_by_id(&self, id: Uuid) -> Result<Task, ServiceError> {
        self.fetch_one(id)
            .map_err(|e| ServiceError::new("fetch task", Some(id), e))
    }

    /// `POST /tasks` — validate the draft, fill defaults, and return the
    /// canonical task with its backend-assigned id.
    ///
    /// Fails with `ApiError::Validation` before any network call when the
    /// text is empty or whitespace-only.
    pub fn create_task(&self, draft: NewTask) -> Result<Task, ServiceError> {
        let wrap = |e| ServiceError::new("create task", None, e);

        let text = draft.text.trim();
        if text.is_empty() {
            return Err(wrap(ApiError::Validation(
                "task text is required".to_string(),
            )));
        }

        let now = OffsetDateTime::now_utc();
        let body = TaskDraft {
            text: text.to_string(),
            completed: draft.completed,
            created_at: draft.created_at.unwrap_or(now),
            updated_at: now,
        };
        self.http
            .post(ENDPOINT, &body)
            .and_then(|r| r.into_json())
            .map_err(wrap)
    }

    /// `PUT /tasks/:id` — full replace. `updated_at` is always stamped with
    /// the call time, regardless of what the draft carries.
    pub fn update_task(&self, id: Uuid, mut draft: TaskDraft) -> Result<Task, ServiceError> {
        draft.updated_at = OffsetDateTime::now_utc();
        self.http
            .put(&task_path(id), &draft)
            .and_then(|r| r.into_json())
            .map_err(|e| ServiceError::new("update task", Some(id), e))
    }

    /// `PATCH /tasks/:id` — partial merge on the backend side; `updated_at`
    /// is always stamped.
    pub fn patch_task(&self, id: Uuid, patch: TaskPatch) -> Result<Task, ServiceError> {
        self.send_patch(id, patch)
            .map_err(|e| ServiceError::new("patch task", Some(id), e))
    }

    /// Read the task, then patch `completed` to its negation.
    ///
    /// Not atomic: a concurrent modification between the read and the patch
    /// is silently overwritten (last writer wins).
    pub fn toggle_task_completion(&self, id: Uuid) -> Result<Task, ServiceError> {
        let current = self
            .fetch_one(id)
            .map_err(|e| ServiceError::new("toggle task completion", Some(id), e))?;
        let patch = TaskPatch {
            completed: Some(!current.completed),
            ..TaskPatch::default()
        };
        self.send_patch(id, patch)
            .map_err(|e| ServiceError::new("toggle task completion", Some(id), e))
    }

    /// `DELETE /tasks/:id`. A repeat delete fails with 404; the backend does
    /// not treat deletes as no-ops.
    pub fn delete_task(&self, id: Uuid) -> Result<(), ServiceError> {
        self.http
            .delete(&task_path(id))
            .map(|_| ())
            .map_err(|e| ServiceError::new("delete task", Some(id), e))
    }

    /// Fetch all tasks and filter client-side on `completed`; the backend
    /// exposes no filtered listing.
    pub fn get_tasks_by_status(&self, completed: bool) -> Result<Vec<Task>, ServiceError> {
        let tasks = self
            .fetch_all()
            .map_err(|e| ServiceError::new("list tasks by status", None, e))?;
        Ok(tasks.into_iter().filter(|t| t.completed == completed).collect())
    }

    pub fn get_pending_tasks(&self) -> Result<Vec<Task>, ServiceError> {
        self.get_tasks_by_status(false)
    }

    pub fn get_completed_tasks(&self) -> Result<Vec<Task>, ServiceError> {
        self.get_tasks_by_status(true)
    }

    fn fetch_all(&self) -> Result<Vec<Task>, ApiError> {
        self.http.get(ENDPOINT).and_then(|r| r.into_json())
    }

    fn fetch_one(&self, id: Uuid) -> Result<Task, ApiError> {
        self.http.get(&task_path(id)).and_then(|r| r.into_json())
    }

    fn send_patch(&self, id: Uuid, mut patch: TaskPatch) -> Result<Task, ApiError> {
        patch.updated_at = Some(OffsetDateTime::now_utc());
        self.http.patch(&task_path(id), &patch).and_then(|r| r.into_json())
    }
}

fn task_path(id: Uuid) -> String {
    format!("{ENDPOINT}/{id}")
}

//! Cached task store for presentation consumers.
//!
//! # Design
//! `TaskStore` owns an injected `TaskService` and a single in-memory cache
//! of tasks, together with the `loaded` / `is_loading` / `error` flags the
//! presentation layer reads. Failures never cross the store boundary: every
//! operation records them in `error` and returns an empty result, so
//! consumers switch on state rather than catching. The cache holds the last
//! confirmed server state per id and is only touched after a call resolves —
//! a full replace on fetch, or a per-item append/replace/remove on a
//! confirmed mutation.

use uuid::Uuid;

use crate::error::ServiceError;
use crate::service::TaskService;
use crate::types::{NewTask, Task};

/// Cached, error-absorbing view over `TaskService`.
#[derive(Debug)]
pub struct TaskStore {
    service: TaskService,
    tasks: Vec<Task>,
    loaded: bool,
    is_loading: bool,
    error: Option<ServiceError>,
}

impl TaskStore {
    pub fn new(service: TaskService) -> Self {
        Self {
            service,
            tasks: Vec::new(),
            loaded: false,
            is_loading: false,
            error: None,
        }
    }

    /// The cached tasks, in fetch/insertion order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Whether a full fetch has ever completed successfully.
    pub fn loaded(&self) -> bool {
        self.loaded
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// The failure recorded by the most recent operation, if it failed.
    pub fn error(&self) -> Option<&ServiceError> {
        self.error.as_ref()
    }

    pub fn error_message(&self) -> Option<String> {
        self.error.as_ref().map(ServiceError::to_string)
    }

    /// Return the cached tasks, fetching once from the backend.
    ///
    /// With `force` false, a cache populated by an earlier successful fetch
    /// is returned without a network call. Otherwise the cache is replaced
    /// wholesale: on success `loaded` is set; on failure the cache is left
    /// empty and the error recorded. `is_loading` is reset on both paths.
    /// Concurrent callers are not de-duplicated.
    pub fn get_all_tasks(&mut self, force: bool) -> &[Task] {
        if self.loaded && !force {
            return &self.tasks;
        }

        self.is_loading = true;
        self.error = None;
        match self.service.get_all_tasks() {
            Ok(tasks) => {
                self.tasks = tasks;
                self.loaded = true;
            }
            Err(err) => {
                log::warn!("task fetch failed: {err}");
                self.tasks.clear();
                self.error = Some(err);
            }
        }
        self.is_loading = false;
        &self.tasks
    }

    /// Create a task and append the canonical result to the cache.
    ///
    /// A successful add marks the store `loaded`, matching the behavior of a
    /// consumer that builds its list incrementally without ever fetching.
    pub fn add_task(&mut self, draft: NewTask) -> Option<&Task> {
        self.error = None;
        match self.service.create_task(draft) {
            Ok(task) => {
                self.tasks.push(task);
                self.loaded = true;
                self.tasks.last()
            }
            Err(err) => {
                log::warn!("task create failed: {err}");
                self.error = Some(err);
                None
            }
        }
    }

    /// Toggle a task's completion and replace its cache entry with the
    /// server's canonical result.
    pub fn toggle_task(&mut self, id: Uuid) -> Option<&Task> {
        self.error = None;
        match self.service.toggle_task_completion(id) {
            Ok(task) => {
                match self.tasks.iter_mut().find(|t| t.id == id) {
                    Some(slot) => *slot = task,
                    None => self.tasks.push(task),
                }
                self.tasks.iter().find(|t| t.id == id)
            }
            Err(err) => {
                log::warn!("task toggle failed: {err}");
                self.error = Some(err);
                None
            }
        }
    }

    /// Delete a task on the backend, then drop it from the cache. Returns
    /// whether the delete was confirmed.
    pub fn remove_task(&mut self, id: Uuid) -> bool {
        self.error = None;
        match self.service.delete_task(id) {
            Ok(()) => {
                self.tasks.retain(|t| t.id != id);
                true
            }
            Err(err) => {
                log::warn!("task delete failed: {err}");
                self.error = Some(err);
                false
            }
        }
    }
}

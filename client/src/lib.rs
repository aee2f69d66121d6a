//! Layered API client for a task backend.
//!
//! # Overview
//! Three layers, each owning the one below:
//! - [`HttpClient`] — performs the HTTP round-trip against a configured base
//!   address and normalizes every failure into a tagged [`ApiError`].
//! - [`TaskService`] — domain CRUD over `/tasks`: validation, defaults,
//!   timestamp stamping, and operation context on every error.
//! - [`TaskStore`] — in-memory cache with load-once semantics and explicit
//!   `loaded` / `is_loading` / `error` state for presentation consumers.
//!
//! # Design
//! - Instances are explicitly constructed and injected; there is no
//!   process-wide singleton:
//!   `TaskStore::new(TaskService::new(HttpClient::new(&Config::from_env())))`.
//! - Calls are synchronous and blocking; the store is a plain `&mut self`
//!   value with no internal locking.
//! - Transport failures are classified exactly once, at the HTTP layer, so
//!   everything downstream matches on error variants.

pub mod config;
pub mod error;
pub mod http;
pub mod service;
pub mod store;
pub mod types;

pub use config::Config;
pub use error::{ApiError, ServiceError};
pub use http::{HttpClient, HttpMethod, ResponseBody};
pub use service::TaskService;
pub use store::TaskStore;
pub use types::{NewTask, Task, TaskDraft, TaskPatch};

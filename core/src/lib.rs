//! State synchronization for a single-page to-do list.
//!
//! # Overview
//! `TodoPage` holds the list and input buffer a to-do page renders and turns
//! each user action into a request against the todo REST API. Local state
//! only changes once the server confirms a request; failures are logged and
//! otherwise leave the page untouched.
//!
//! # Design
//! - `TodoClient` is stateless: `build_*` produces an `HttpRequest`,
//!   `parse_*` consumes an `HttpResponse`. It never does I/O.
//! - `TodoPage` handlers return a `PendingRequest`; `TodoPage::resolve`
//!   folds the response back in. Hosts that do their own I/O drive the page
//!   directly.
//! - `TodoController` runs the same handlers as independent futures over a
//!   `Transport` (`ReqwestTransport` in production).
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod config;
pub mod controller;
pub mod error;
pub mod http;
pub mod page;
pub mod transport;
pub mod types;

pub use client::TodoClient;
pub use config::ClientConfig;
pub use controller::TodoController;
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use page::{PendingRequest, Reconcile, TodoPage};
pub use transport::{ReqwestTransport, Transport};
pub use types::{CreateTodo, EditMode, PatchTodo, Todo, TodoId, TodoItem, TodoSummary};

//! State container for the to-do page.
//!
//! # Design
//! `TodoPage` owns the item list and the input buffer. Every user action is a
//! handler that reads the current state and returns a `PendingRequest`: the
//! HTTP request to execute plus the `Reconcile` step that applies its result.
//! Nothing changes locally until `resolve` sees a successful response, so a
//! failed request leaves the page exactly as the server last confirmed it.
//!
//! Any number of requests may be outstanding. `resolve` always works on the
//! state as it is when the response arrives, so for the same item the last
//! response to be resolved wins.

use tracing::{debug, error, warn};

use crate::client::TodoClient;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::types::{CreateTodo, PatchTodo, TodoId, TodoItem, TodoSummary};

/// How to fold a response back into the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reconcile {
    Load,
    Add,
    /// Applies the value that was sent rather than flipping the current one,
    /// so overlapping toggles leave the page agreeing with the server.
    Toggle { id: TodoId, is_done: bool },
    Save { id: TodoId, title: String },
    Delete { id: TodoId },
}

impl Reconcile {
    fn describe(&self) -> &'static str {
        match self {
            Reconcile::Load => "load todos",
            Reconcile::Add => "create todo",
            Reconcile::Toggle { .. } => "toggle todo",
            Reconcile::Save { .. } => "save todo",
            Reconcile::Delete { .. } => "delete todo",
        }
    }
}

/// A request a handler wants executed, paired with its reconciliation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRequest {
    pub request: HttpRequest,
    pub reconcile: Reconcile,
}

#[derive(Debug, Clone)]
pub struct TodoPage {
    client: TodoClient,
    todos: Vec<TodoItem>,
    input: String,
}

impl TodoPage {
    pub fn new(client: TodoClient) -> Self {
        Self {
            client,
            todos: Vec::new(),
            input: String::new(),
        }
    }

    pub fn items(&self) -> &[TodoItem] {
        &self.todos
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn item(&self, id: &TodoId) -> Option<&TodoItem> {
        self.todos.iter().find(|todo| &todo.id == id)
    }

    /// The item currently in edit mode, if any.
    pub fn editing(&self) -> Option<&TodoItem> {
        self.todos.iter().find(|todo| todo.is_edit)
    }

    pub fn summary(&self) -> TodoSummary {
        let done = self.todos.iter().filter(|todo| todo.is_done).count();
        TodoSummary {
            total: self.todos.len(),
            done,
            remaining: self.todos.len() - done,
        }
    }

    /// Request for the full list, issued once when the page is first shown.
    pub fn load(&self) -> PendingRequest {
        PendingRequest {
            request: self.client.build_get_todos(),
            reconcile: Reconcile::Load,
        }
    }

    pub fn set_input(&mut self, value: impl Into<String>) {
        self.input = value.into();
    }

    pub fn on_add_click(&self) -> Option<PendingRequest> {
        self.add_todo()
    }

    pub fn on_key_press(&self) -> Option<PendingRequest> {
        self.add_todo()
    }

    /// Create a todo from the input buffer. An empty buffer issues nothing.
    pub fn add_todo(&self) -> Option<PendingRequest> {
        if self.input.is_empty() {
            return None;
        }
        let input = CreateTodo {
            title: self.input.clone(),
            is_done: false,
        };
        let request = self
            .client
            .build_create_todo(&input)
            .map_err(|e| error!(error = %e, "failed to build create request"))
            .ok()?;
        Some(PendingRequest {
            request,
            reconcile: Reconcile::Add,
        })
    }

    /// Flip an item's completion flag as it currently reads locally.
    pub fn toggle_done(&self, id: &TodoId) -> Option<PendingRequest> {
        let Some(current) = self.item(id) else {
            warn!(%id, "toggle requested for unknown todo");
            return None;
        };
        let is_done = !current.is_done;
        let request = self
            .client
            .build_patch_todo(id, &PatchTodo::is_done(is_done))
            .map_err(|e| error!(%id, error = %e, "failed to build toggle request"))
            .ok()?;
        Some(PendingRequest {
            request,
            reconcile: Reconcile::Toggle {
                id: id.clone(),
                is_done,
            },
        })
    }

    /// Put one item into or out of edit mode. Every other item leaves edit
    /// mode, so at most one item is ever being edited.
    pub fn change_mode(&mut self, id: &TodoId, is_edit: bool) {
        for todo in &mut self.todos {
            todo.is_edit = &todo.id == id && is_edit;
        }
    }

    pub fn save(&self, id: &TodoId, title: impl Into<String>) -> Option<PendingRequest> {
        let title = title.into();
        let request = self
            .client
            .build_patch_todo(id, &PatchTodo::title(title.clone()))
            .map_err(|e| error!(%id, error = %e, "failed to build save request"))
            .ok()?;
        Some(PendingRequest {
            request,
            reconcile: Reconcile::Save {
                id: id.clone(),
                title,
            },
        })
    }

    /// Deletion is always requested, even for ids the page does not hold.
    pub fn delete(&self, id: &TodoId) -> PendingRequest {
        PendingRequest {
            request: self.client.build_delete_todo(id),
            reconcile: Reconcile::Delete { id: id.clone() },
        }
    }

    /// Apply the outcome of a pending request.
    ///
    /// On success the page is updated to the confirmed result. On failure the
    /// error is logged and the page is left untouched; the error is handed
    /// back only so callers can observe it.
    pub fn resolve(
        &mut self,
        pending: PendingRequest,
        response: Result<HttpResponse, ApiError>,
    ) -> Result<(), ApiError> {
        let operation = pending.reconcile.describe();
        self.apply(pending.reconcile, response).inspect_err(|e| {
            error!(operation, error = %e, "todo request failed");
        })
    }

    fn apply(
        &mut self,
        reconcile: Reconcile,
        response: Result<HttpResponse, ApiError>,
    ) -> Result<(), ApiError> {
        let response = response?;
        match reconcile {
            Reconcile::Load => {
                let todos = self.client.parse_get_todos(response)?;
                debug!(count = todos.len(), "loaded todos");
                self.todos = todos.into_iter().map(TodoItem::from).collect();
            }
            Reconcile::Add => {
                let todo = self.client.parse_create_todo(response)?;
                debug!(id = %todo.id, "created todo");
                self.todos.push(TodoItem::from(todo));
                self.input.clear();
            }
            Reconcile::Toggle { id, is_done } => {
                self.client.parse_patch_todo(response)?;
                debug!(%id, is_done, "toggled todo");
                for todo in self.todos.iter_mut().filter(|todo| todo.id == id) {
                    todo.is_done = is_done;
                }
            }
            Reconcile::Save { id, title } => {
                self.client.parse_patch_todo(response)?;
                debug!(%id, "saved todo");
                for todo in self.todos.iter_mut().filter(|todo| todo.id == id) {
                    todo.title = title.clone();
                    todo.is_edit = false;
                }
            }
            Reconcile::Delete { id } => {
                self.client.parse_delete_todo(response)?;
                debug!(%id, "deleted todo");
                self.todos.retain(|todo| todo.id != id);
            }
        }
        Ok(())
    }
}

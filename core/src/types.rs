//! Domain DTOs for the todo API and the page-local item type.
//!
//! # Design
//! Wire types mirror the mock-server's schema (camelCase JSON) but are
//! defined independently; integration tests catch schema drift. `TodoItem`
//! is what the page holds: the server fields plus the local-only `is_edit`
//! flag, which never reaches the wire.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier assigned by the API. Treated as opaque: the page never
/// generates one and only compares them for equality.
///
/// Servers in the wild hand out either numbers or strings, so both are
/// accepted and serialized back in the shape they arrived in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TodoId {
    Number(u64),
    Text(String),
}

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TodoId::Number(n) => write!(f, "{n}"),
            TodoId::Text(s) => f.write_str(s),
        }
    }
}

impl From<u64> for TodoId {
    fn from(n: u64) -> Self {
        TodoId::Number(n)
    }
}

impl From<&str> for TodoId {
    fn from(s: &str) -> Self {
        TodoId::Text(s.to_string())
    }
}

/// A single todo as the API returns it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: TodoId,
    pub title: String,
    pub is_done: bool,
}

/// Request payload for creating a new todo.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTodo {
    pub title: String,
    #[serde(default)]
    pub is_done: bool,
}

/// Partial update. Only the fields present in the JSON are applied; omitted
/// fields remain unchanged on the server.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatchTodo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_done: Option<bool>,
}

impl PatchTodo {
    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            is_done: None,
        }
    }

    pub fn is_done(is_done: bool) -> Self {
        Self {
            title: None,
            is_done: Some(is_done),
        }
    }
}

/// Whether an item's title is being edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditMode {
    Viewing,
    Editing,
}

/// A todo as held by the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoItem {
    pub id: TodoId,
    pub title: String,
    pub is_done: bool,
    /// Local-only; never sent to the API.
    pub is_edit: bool,
}

impl TodoItem {
    pub fn mode(&self) -> EditMode {
        if self.is_edit {
            EditMode::Editing
        } else {
            EditMode::Viewing
        }
    }
}

impl From<Todo> for TodoItem {
    fn from(todo: Todo) -> Self {
        Self {
            id: todo.id,
            title: todo.title,
            is_done: todo.is_done,
            is_edit: false,
        }
    }
}

/// Counts shown by the page footer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TodoSummary {
    pub total: usize,
    pub done: usize,
    pub remaining: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn todo_uses_camel_case_on_the_wire() {
        let todo = Todo {
            id: TodoId::Number(1),
            title: "Buy milk".to_string(),
            is_done: false,
        };
        let json = serde_json::to_value(&todo).unwrap();
        assert_eq!(json, serde_json::json!({"id": 1, "title": "Buy milk", "isDone": false}));
    }

    #[test]
    fn todo_id_accepts_numbers_and_strings() {
        let n: Todo = serde_json::from_str(r#"{"id":7,"title":"a","isDone":true}"#).unwrap();
        assert_eq!(n.id, TodoId::Number(7));
        let s: Todo = serde_json::from_str(r#"{"id":"abc","title":"a","isDone":true}"#).unwrap();
        assert_eq!(s.id, TodoId::Text("abc".to_string()));
        assert_eq!(s.id.to_string(), "abc");
    }

    #[test]
    fn create_todo_defaults_is_done_to_false() {
        let input: CreateTodo = serde_json::from_str(r#"{"title":"No flag"}"#).unwrap();
        assert!(!input.is_done);
    }

    #[test]
    fn patch_omits_absent_fields() {
        let json = serde_json::to_value(PatchTodo::is_done(true)).unwrap();
        assert_eq!(json, serde_json::json!({"isDone": true}));
        let json = serde_json::to_value(PatchTodo::title("New")).unwrap();
        assert_eq!(json, serde_json::json!({"title": "New"}));
    }

    #[test]
    fn item_from_todo_starts_in_viewing_mode() {
        let item = TodoItem::from(Todo {
            id: TodoId::Number(2),
            title: "X".to_string(),
            is_done: true,
        });
        assert!(!item.is_edit);
        assert_eq!(item.mode(), EditMode::Viewing);
    }
}

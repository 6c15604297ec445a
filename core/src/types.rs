//! Domain DTOs for the todo collection API.
//!
//! # Design
//! Item ids are opaque, server-assigned strings; the client never generates
//! or interprets one. These types mirror the mock-server's schema but are
//! defined independently — integration tests catch schema drift between the
//! two crates.

use serde::{Deserialize, Serialize};

/// A single todo item as returned by the server.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Todo {
    pub id: String,
    pub text: String,
    pub completed: bool,
}

/// Request payload for creating a new todo.
///
/// `completed` is always serialized — explicitly `false` at creation time —
/// so a newly created item looks the same regardless of the server's
/// defaulting behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTodo {
    pub text: String,
    #[serde(default)]
    pub completed: bool,
}

/// Request payload for a partial update. Only the fields present in the JSON
/// are applied; omitted fields remain unchanged on the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateTodo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

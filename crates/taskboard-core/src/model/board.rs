//! Board payloads and the response envelopes the backend wraps them in.
//!
//! The backend answers `GET /w/{ws}/b/{b}` with a `BoardAccessResponse`,
//! `GET /w/t/status` with a `StatusResponse`, `GET /w/t/priorities` with a
//! `PriorityResponse`, and `GET /c/all` with a `CategoryResponse`. Exported files sometimes hold the bare payload instead,
//! so each loader goes through an untagged enum that accepts both shapes.

use super::task::{Category, Priority, Status, Task};
use serde::{Deserialize, Serialize};

/// A user with access to a board or workspace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardUser {
    #[serde(default)]
    pub id: i64,
    pub username: String,
}

/// A board together with its users and tasks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub workspace_id: i64,
    #[serde(default)]
    pub workspace_name: String,
    #[serde(default)]
    pub users: Vec<BoardUser>,
    #[serde(default)]
    pub task_count: usize,
    #[serde(default)]
    pub tasks: Vec<Task>,
}

impl Board {
    #[must_use]
    pub fn usernames(&self) -> Vec<String> {
        self.users.iter().map(|u| u.username.clone()).collect()
    }

    #[must_use]
    pub fn find_task(&self, task_id: i64) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == task_id)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardAccessResponse {
    pub status: String,
    #[serde(default)]
    pub member_id: Option<i64>,
    #[serde(default)]
    pub workspace_id: Option<i64>,
    pub board: Board,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
    pub statuses: Vec<Status>,
}

/// A priority as the backend offers it for task editing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriorityLevel {
    pub id: Priority,
    /// Display label, e.g. `Low`.
    pub level: String,
    #[serde(default)]
    pub color: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriorityResponse {
    pub status: String,
    pub task_priorities: Vec<PriorityLevel>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryResponse {
    pub status: String,
    pub categories: Vec<Category>,
}

/// Either a wrapped `{ "board": … }` response or a bare board object.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum BoardPayload {
    Wrapped(BoardAccessResponse),
    Bare(Board),
}

impl BoardPayload {
    #[must_use]
    pub fn into_board(self) -> Board {
        match self {
            Self::Wrapped(response) => response.board,
            Self::Bare(board) => board,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum StatusPayload {
    Wrapped(StatusResponse),
    Bare(Vec<Status>),
}

impl StatusPayload {
    #[must_use]
    pub fn into_statuses(self) -> Vec<Status> {
        match self {
            Self::Wrapped(response) => response.statuses,
            Self::Bare(statuses) => statuses,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum PriorityPayload {
    Wrapped(PriorityResponse),
    Bare(Vec<PriorityLevel>),
}

impl PriorityPayload {
    /// The levels in rank order, critical first.
    #[must_use]
    pub fn into_levels(self) -> Vec<PriorityLevel> {
        let mut levels = match self {
            Self::Wrapped(response) => response.task_priorities,
            Self::Bare(levels) => levels,
        };
        levels.sort_by_key(|level| level.id);
        levels
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum CategoryPayload {
    Wrapped(CategoryResponse),
    Bare(Vec<Category>),
}

impl CategoryPayload {
    #[must_use]
    pub fn into_categories(self) -> Vec<Category> {
        match self {
            Self::Wrapped(response) => response.categories,
            Self::Bare(categories) => categories,
        }
    }
}

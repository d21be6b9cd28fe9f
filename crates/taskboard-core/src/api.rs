//! REST endpoint catalogue and request payloads.
//!
//! Paths are relative to the configured base URL.

use crate::model::{Priority, Task};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
}

impl Method {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A workspace/board pair addressing one board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct BoardScope {
    pub workspace_id: i64,
    pub board_id: i64,
}

impl BoardScope {
    #[must_use]
    pub const fn new(workspace_id: i64, board_id: i64) -> Self {
        Self {
            workspace_id,
            board_id,
        }
    }
}

/// Where an access change applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase", tag = "kind")]
pub enum AccessTarget {
    Workspace { workspace_id: i64 },
    Board(BoardScope),
}

/// Every backend call the client makes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Board(BoardScope),
    Statuses,
    Priorities,
    Categories,
    UpdateTask { scope: BoardScope, task_id: i64 },
    AttachCategories { scope: BoardScope, task_id: i64 },
    DetachCategories { scope: BoardScope, task_id: i64 },
    AddMembers(AccessTarget),
    RemoveMembers(AccessTarget),
}

impl Endpoint {
    #[must_use]
    pub const fn method(&self) -> Method {
        match self {
            Self::Board(_) | Self::Statuses | Self::Priorities | Self::Categories => Method::Get,
            Self::UpdateTask { .. } => Method::Put,
            Self::AttachCategories { .. }
            | Self::DetachCategories { .. }
            | Self::AddMembers(_)
            | Self::RemoveMembers(_) => Method::Post,
        }
    }

    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::Board(scope) => board_path(scope),
            Self::Statuses => "/w/t/status".to_string(),
            Self::Priorities => "/w/t/priorities".to_string(),
            Self::Categories => "/c/all".to_string(),
            Self::UpdateTask { scope, task_id } => {
                format!("{}/t/{task_id}/update", board_path(scope))
            }
            Self::AttachCategories { scope, task_id } => {
                format!("{}/t/{task_id}/cats/a", board_path(scope))
            }
            Self::DetachCategories { scope, task_id } => {
                format!("{}/t/{task_id}/cats/d", board_path(scope))
            }
            Self::AddMembers(target) => format!("{}/ms/a", access_path(target)),
            Self::RemoveMembers(target) => format!("{}/ms/d", access_path(target)),
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method(), self.path())
    }
}

fn board_path(scope: &BoardScope) -> String {
    format!("/w/{}/b/{}", scope.workspace_id, scope.board_id)
}

fn access_path(target: &AccessTarget) -> String {
    match target {
        AccessTarget::Workspace { workspace_id } => format!("/w/{workspace_id}"),
        AccessTarget::Board(scope) => board_path(scope),
    }
}

/// Full task update body for `PUT …/t/{id}/update`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskUpdate {
    pub title: String,
    pub description: String,
    pub points: i64,
    pub priority: Priority,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,
}

impl TaskUpdate {
    /// Copy every editable field from `task`.
    #[must_use]
    pub fn from_task(task: &Task) -> Self {
        Self {
            title: task.title.clone(),
            description: task.description.clone(),
            points: task.points,
            priority: task.priority,
            due_date: task.due_date.clone(),
            status: task.status.clone(),
            assignee: task.assignee.clone(),
        }
    }

    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }
}

/// Body for category attach/detach.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryIds<'a> {
    pub category_ids: &'a [i64],
}

/// Body for member add/remove.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Usernames<'a> {
    pub usernames: &'a [String],
}

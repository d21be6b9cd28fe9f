//! Caller-side mutation workflows over a [`BoardBackend`].
//!
//! The derivation engine never sees staleness, so every workflow that changes
//! a board re-fetches it before returning. Re-derive from what these return,
//! not from the pre-mutation snapshot.

use crate::access::{SetDelta, diff_category_ids, diff_usernames};
use crate::api::{AccessTarget, BoardScope, TaskUpdate};
use crate::derive::BoardSnapshot;
use crate::error::BoardError;
use crate::model::{Board, Category, PriorityLevel, Status, Task};
use serde::Serialize;
use tracing::{debug, info};

/// Fetch and mutation calls a board client needs.
pub trait BoardBackend {
    fn fetch_board(&self, scope: BoardScope) -> Result<Board, BoardError>;

    fn fetch_statuses(&self) -> Result<Vec<Status>, BoardError>;

    fn fetch_priorities(&self) -> Result<Vec<PriorityLevel>, BoardError>;

    fn fetch_categories(&self) -> Result<Vec<Category>, BoardError>;

    fn update_task(
        &self,
        scope: BoardScope,
        task_id: i64,
        update: &TaskUpdate,
    ) -> Result<(), BoardError>;

    fn attach_categories(
        &self,
        scope: BoardScope,
        task_id: i64,
        category_ids: &[i64],
    ) -> Result<(), BoardError>;

    fn detach_categories(
        &self,
        scope: BoardScope,
        task_id: i64,
        category_ids: &[i64],
    ) -> Result<(), BoardError>;

    fn add_members(&self, target: AccessTarget, usernames: &[String]) -> Result<(), BoardError>;

    fn remove_members(&self, target: AccessTarget, usernames: &[String])
    -> Result<(), BoardError>;
}

/// Load everything a view needs. All three fetches must succeed.
///
/// # Errors
///
/// Returns the first fetch error; nothing is returned partially loaded.
pub fn load_snapshot<B: BoardBackend + ?Sized>(
    backend: &B,
    scope: BoardScope,
) -> Result<BoardSnapshot, BoardError> {
    let board = backend.fetch_board(scope)?;
    let statuses = backend.fetch_statuses()?;
    let categories = backend.fetch_categories()?;
    debug!(
        workspace = scope.workspace_id,
        board = scope.board_id,
        tasks = board.tasks.len(),
        statuses = statuses.len(),
        categories = categories.len(),
        "loaded board snapshot"
    );
    Ok(BoardSnapshot {
        tasks: board.tasks,
        statuses,
        categories,
    })
}

/// Usernames that currently have access to the board, in listing order.
///
/// # Errors
///
/// Returns the board fetch error.
pub fn board_members<B: BoardBackend + ?Sized>(
    backend: &B,
    scope: BoardScope,
) -> Result<Vec<String>, BoardError> {
    backend.fetch_board(scope).map(|board| board.usernames())
}

/// Outcome of [`move_task_to_status`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MoveOutcome {
    pub task_id: i64,
    pub from: String,
    pub to: String,
    /// `false` when the task already had the target status.
    pub moved: bool,
    /// Board tasks after the move, re-fetched from the backend.
    #[serde(skip)]
    pub tasks: Option<Vec<Task>>,
}

/// Move `task` to `target_status` with a full task update, then re-fetch.
///
/// Moving a task onto its current status makes no calls.
///
/// # Errors
///
/// Returns the backend error from the update or the re-fetch. A failed
/// update skips the re-fetch.
pub fn move_task_to_status<B: BoardBackend + ?Sized>(
    backend: &B,
    scope: BoardScope,
    task: &Task,
    target_status: &str,
) -> Result<MoveOutcome, BoardError> {
    if task.status == target_status {
        debug!(task = task.id, status = target_status, "task already in target status");
        return Ok(MoveOutcome {
            task_id: task.id,
            from: task.status.clone(),
            to: target_status.to_string(),
            moved: false,
            tasks: None,
        });
    }

    let update = TaskUpdate::from_task(task).with_status(target_status);
    backend.update_task(scope, task.id, &update)?;
    info!(
        task = task.id,
        from = %task.status,
        to = target_status,
        "moved task"
    );

    let board = backend.fetch_board(scope)?;
    Ok(MoveOutcome {
        task_id: task.id,
        from: task.status.clone(),
        to: target_status.to_string(),
        moved: true,
        tasks: Some(board.tasks),
    })
}

/// Look up `task_id` on a freshly fetched board and move it.
///
/// # Errors
///
/// [`BoardError::UnknownStatus`] if `target_status` is not one of the board's
/// statuses, [`BoardError::TaskNotFound`] if the task is not on the board.
pub fn move_task_by_id<B: BoardBackend + ?Sized>(
    backend: &B,
    scope: BoardScope,
    task_id: i64,
    target_status: &str,
) -> Result<MoveOutcome, BoardError> {
    let statuses = backend.fetch_statuses()?;
    if !statuses.iter().any(|s| s.name == target_status) {
        return Err(BoardError::UnknownStatus {
            status: target_status.to_string(),
        });
    }

    let board = backend.fetch_board(scope)?;
    let task = board
        .find_task(task_id)
        .ok_or(BoardError::TaskNotFound {
            task_id,
            board_id: scope.board_id,
        })?;
    move_task_to_status(backend, scope, task, target_status)
}

/// Attach and detach categories so `task_id` ends up with `selected`.
pub fn sync_task_categories<B: BoardBackend + ?Sized>(
    backend: &B,
    scope: BoardScope,
    task_id: i64,
    original: &[i64],
    selected: &[i64],
) -> Result<SetDelta<i64>, BoardError> {
    let delta = diff_category_ids(original, selected);
    if !delta.to_add.is_empty() {
        backend.attach_categories(scope, task_id, &delta.to_add)?;
    }
    if !delta.to_remove.is_empty() {
        backend.detach_categories(scope, task_id, &delta.to_remove)?;
    }
    if !delta.is_noop() {
        info!(
            task = task_id,
            added = delta.to_add.len(),
            removed = delta.to_remove.len(),
            "synced task categories"
        );
    }
    Ok(delta)
}

/// Apply a membership change. An unchanged selection makes no calls.
pub fn apply_access_change<B: BoardBackend + ?Sized>(
    backend: &B,
    target: AccessTarget,
    original: &[String],
    selected: &[String],
) -> Result<SetDelta<String>, BoardError> {
    let delta = diff_usernames(original, selected);
    if delta.is_noop() {
        debug!(?target, "access unchanged; skipping requests");
        return Ok(delta);
    }
    if !delta.to_add.is_empty() {
        backend.add_members(target, &delta.to_add)?;
    }
    if !delta.to_remove.is_empty() {
        backend.remove_members(target, &delta.to_remove)?;
    }
    info!(
        ?target,
        added = delta.to_add.len(),
        removed = delta.to_remove.len(),
        "updated access"
    );
    Ok(delta)
}

pub mod access;
pub mod categories;
pub mod completions;
pub mod move_cmd;
pub mod priorities;
pub mod statuses;
pub mod view;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::Args;
use serde::de::DeserializeOwned;
use std::io::Write;
use std::path::Path;
use taskboard_core::api::BoardScope;
use taskboard_core::due::is_past_due;
use taskboard_core::model::Task;

/// Workspace and board ids for commands that talk to the backend.
#[derive(Args, Debug, Clone, Copy)]
pub struct BoardTarget {
    /// Workspace id.
    #[arg(long, short = 'w')]
    pub workspace: i64,

    /// Board id within the workspace.
    #[arg(long, short = 'b')]
    pub board: i64,
}

impl BoardTarget {
    pub const fn scope(self) -> BoardScope {
        BoardScope::new(self.workspace, self.board)
    }
}

/// Read and decode a JSON export (wrapped response or bare payload).
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("Failed to parse {}", path.display()))
}

/// One tab-separated task row: `id priority status due past_due title`.
pub fn write_task_row(w: &mut dyn Write, task: &Task, now: DateTime<Utc>) -> std::io::Result<()> {
    writeln!(
        w,
        "{}\t{}\t{}\t{}\t{}\t{}",
        task.id,
        task.priority,
        task.status,
        task.due_date.as_deref().unwrap_or("-"),
        is_past_due(task, now),
        task.title
    )
}

/// One human-readable task line, flagging overdue tasks with `!`.
pub fn write_task_line(w: &mut dyn Write, task: &Task, now: DateTime<Utc>) -> std::io::Result<()> {
    let flag = if is_past_due(task, now) { "!" } else { " " };
    writeln!(
        w,
        "{flag} #{:<5} {:<8} {:<12} {:<10} {}",
        task.id,
        task.priority.to_string(),
        task.status,
        task.due_date.as_deref().unwrap_or("-"),
        task.title
    )
}

//! `tb view`: derive and render a board in list or column view.

use crate::cmd::{read_json, write_task_line, write_task_row};
use crate::http::HttpBackend;
use crate::output::{self, OutputMode, pretty_kv, pretty_section, render_mode};
use anyhow::Result;
use chrono::{DateTime, Utc};
use clap::Args;
use serde::Serialize;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use taskboard_core::api::BoardScope;
use taskboard_core::config::EffectiveConfig;
use taskboard_core::derive::group::STATUS_DISPLAY_ORDER;
use taskboard_core::derive::{BoardSnapshot, BoardView, Grouping, ViewMode, derive_view};
use taskboard_core::due::parse_due_date;
use taskboard_core::error::BoardError;
use taskboard_core::model::board::{BoardPayload, CategoryPayload, StatusPayload};
use taskboard_core::model::{Category, Status, Task};
use taskboard_core::mutation::load_snapshot;
use tracing::warn;

#[derive(Args, Debug, Default)]
pub struct ViewArgs {
    /// Board JSON export (`{ "board": … }` response or a bare board).
    #[arg(long, value_name = "PATH", conflicts_with = "workspace")]
    pub board_file: Option<PathBuf>,

    /// Status list JSON. Defaults to To Do, In Progress, Completed.
    #[arg(long, value_name = "PATH", requires = "board_file")]
    pub statuses_file: Option<PathBuf>,

    /// Category list JSON. Defaults to the categories found on tasks.
    #[arg(long, value_name = "PATH", requires = "board_file")]
    pub categories_file: Option<PathBuf>,

    /// Workspace id, to load the board from the backend.
    #[arg(long, short = 'w', requires = "board")]
    pub workspace: Option<i64>,

    /// Board id, to load the board from the backend.
    #[arg(long, short = 'b', requires = "workspace")]
    pub board: Option<i64>,

    /// View mode: list or columns.
    #[arg(long)]
    pub mode: Option<String>,

    /// Column grouping: status or category.
    #[arg(long = "group")]
    pub grouping: Option<String>,

    /// Keep only tasks with this exact status ("all" disables the filter).
    #[arg(long)]
    pub status: Option<String>,

    /// Keep only tasks in any of these categories (repeatable).
    #[arg(long = "category", value_name = "ID")]
    pub categories: Vec<i64>,

    /// Reference instant for past-due flags (RFC 3339 or YYYY-MM-DD).
    #[arg(long)]
    pub now: Option<String>,
}

#[derive(Debug, Serialize)]
struct ViewReport<'a> {
    now: DateTime<Utc>,
    #[serde(flatten)]
    view: BoardView<'a>,
}

pub fn run_view(args: &ViewArgs, output: OutputMode, config: &EffectiveConfig) -> Result<()> {
    let now = match resolve_now(args.now.as_deref()) {
        Ok(now) => now,
        Err(err) => return Err(output::fail(output, err)),
    };
    let view_config = match parse_view_flags(args) {
        Ok((mode, grouping)) => config.project.view.resolve(
            mode,
            grouping,
            args.status.as_deref(),
            &args.categories,
        ),
        Err(err) => return Err(output::fail(output, err)),
    };

    let snapshot = match (&args.board_file, args.workspace.zip(args.board)) {
        (Some(path), _) => snapshot_from_files(
            path,
            args.statuses_file.as_deref(),
            args.categories_file.as_deref(),
        )?,
        (None, Some((workspace, board))) => {
            let backend = HttpBackend::new(&config.api);
            load_snapshot(&backend, BoardScope::new(workspace, board))
                .map_err(|err| output::fail(output, err))?
        }
        (None, None) => {
            return Err(output::fail_usage(
                output,
                "specify --board-file <PATH> or --workspace <ID> --board <ID>",
            ));
        }
    };

    let view = derive_view(&snapshot, &view_config, now);
    if let BoardView::Columns { unplaced, .. } = &view {
        if !unplaced.is_empty() {
            let ids: Vec<i64> = unplaced.iter().map(|t| t.id).collect();
            warn!(?ids, "tasks with a status outside the board's statuses are not shown in any column");
        }
    }

    let report = ViewReport { now, view };
    render_mode(
        output,
        &report,
        |r, w| write_text(&r.view, r.now, w),
        |r, w| write_pretty(&r.view, r.now, w),
    )
}

fn parse_view_flags(args: &ViewArgs) -> Result<(Option<ViewMode>, Option<Grouping>), BoardError> {
    let mode = args.mode.as_deref().map(str::parse::<ViewMode>).transpose()?;
    let grouping = args
        .grouping
        .as_deref()
        .map(str::parse::<Grouping>)
        .transpose()?;
    Ok((mode, grouping))
}

fn resolve_now(flag: Option<&str>) -> Result<DateTime<Utc>, BoardError> {
    match flag {
        None => Ok(Utc::now()),
        Some(raw) => parse_due_date(raw).ok_or_else(|| BoardError::InvalidTimestamp {
            value: raw.to_string(),
        }),
    }
}

fn snapshot_from_files(
    board_file: &Path,
    statuses_file: Option<&Path>,
    categories_file: Option<&Path>,
) -> Result<BoardSnapshot> {
    let board = read_json::<BoardPayload>(board_file)?.into_board();
    let statuses = match statuses_file {
        Some(path) => read_json::<StatusPayload>(path)?.into_statuses(),
        None => default_statuses(),
    };
    let categories = match categories_file {
        Some(path) => read_json::<CategoryPayload>(path)?.into_categories(),
        None => categories_on_tasks(&board.tasks),
    };
    Ok(BoardSnapshot {
        tasks: board.tasks,
        statuses,
        categories,
    })
}

fn default_statuses() -> Vec<Status> {
    STATUS_DISPLAY_ORDER
        .iter()
        .zip(1..)
        .map(|(name, id)| Status {
            id,
            name: (*name).to_string(),
        })
        .collect()
}

/// Distinct categories referenced by `tasks`, in first-seen order.
fn categories_on_tasks(tasks: &[Task]) -> Vec<Category> {
    let mut seen = Vec::<Category>::new();
    for category in tasks.iter().flat_map(|t| &t.categories) {
        if !seen.iter().any(|c| c.id == category.id) {
            seen.push(category.clone());
        }
    }
    seen
}

fn write_text(view: &BoardView<'_>, now: DateTime<Utc>, w: &mut dyn Write) -> io::Result<()> {
    match view {
        BoardView::List { tasks } => {
            for task in tasks {
                write_task_row(w, task, now)?;
            }
        }
        BoardView::Columns { columns, .. } => {
            for column in columns {
                writeln!(w, "# {}\t{}", column.title, column.len())?;
                for task in &column.tasks {
                    write_task_row(w, task, now)?;
                }
            }
        }
    }
    Ok(())
}

fn write_pretty(view: &BoardView<'_>, now: DateTime<Utc>, w: &mut dyn Write) -> io::Result<()> {
    match view {
        BoardView::List { tasks } => {
            pretty_section(w, &format!("Tasks ({})", tasks.len()))?;
            for task in tasks {
                write_task_line(w, task, now)?;
            }
        }
        BoardView::Columns {
            grouping,
            layout,
            columns,
            unplaced,
        } => {
            pretty_kv(w, "Grouping", grouping.to_string())?;
            pretty_kv(w, "Layout", layout.to_string())?;
            for column in columns {
                writeln!(w)?;
                pretty_section(w, &format!("{} ({})", column.title, column.len()))?;
                if column.is_empty() {
                    writeln!(w, "  (empty)")?;
                }
                for task in &column.tasks {
                    write_task_line(w, task, now)?;
                }
            }
            if !unplaced.is_empty() {
                writeln!(w)?;
                pretty_section(w, &format!("Unplaced ({})", unplaced.len()))?;
                for task in unplaced {
                    write_task_line(w, task, now)?;
                }
            }
        }
    }
    Ok(())
}

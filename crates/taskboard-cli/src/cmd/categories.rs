//! `tb categories`: set a task's categories by attach/detach deltas.

use crate::cmd::BoardTarget;
use crate::http::HttpBackend;
use crate::output::{self, OutputMode, render};
use anyhow::Result;
use clap::Args;
use serde::Serialize;
use std::io::Write;
use taskboard_core::access::{SetDelta, diff_category_ids};
use taskboard_core::config::EffectiveConfig;
use taskboard_core::error::BoardError;
use taskboard_core::mutation::{BoardBackend, sync_task_categories};

#[derive(Args, Debug)]
pub struct CategoriesArgs {
    /// Task id to update.
    pub task: i64,

    #[command(flatten)]
    pub target: BoardTarget,

    /// Category ids the task has now (comma-separated). Read from the board
    /// when omitted.
    #[arg(long, value_delimiter = ',', num_args = 0..)]
    pub old: Option<Vec<i64>>,

    /// Category ids the task should have (comma-separated). A bare `--new`
    /// with no ids clears every category.
    #[arg(long, value_delimiter = ',', num_args = 0.., required = true)]
    pub new: Vec<i64>,

    /// Print the change without sending it.
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Debug, Serialize)]
struct CategoryReport {
    task_id: i64,
    dry_run: bool,
    #[serde(flatten)]
    delta: SetDelta<i64>,
}

pub fn run_categories(
    args: &CategoriesArgs,
    output: OutputMode,
    config: &EffectiveConfig,
) -> Result<()> {
    let backend = HttpBackend::new(&config.api);
    let scope = args.target.scope();

    let original = match &args.old {
        Some(ids) => ids.clone(),
        None => {
            let board = backend
                .fetch_board(scope)
                .map_err(|err| output::fail(output, err))?;
            let task = board.find_task(args.task).ok_or(BoardError::TaskNotFound {
                task_id: args.task,
                board_id: scope.board_id,
            });
            task.map_err(|err| output::fail(output, err))?.category_ids()
        }
    };

    let delta = if args.dry_run {
        diff_category_ids(&original, &args.new)
    } else {
        sync_task_categories(&backend, scope, args.task, &original, &args.new)
            .map_err(|err| output::fail(output, err))?
    };

    let report = CategoryReport {
        task_id: args.task,
        dry_run: args.dry_run,
        delta,
    };
    render(output, &report, |r, w| {
        if r.delta.is_noop() {
            return writeln!(w, "categories unchanged for task {}", r.task_id);
        }
        let join = |ids: &[i64]| {
            ids.iter()
                .map(i64::to_string)
                .collect::<Vec<_>>()
                .join(",")
        };
        writeln!(
            w,
            "task {}: attach [{}] detach [{}]{}",
            r.task_id,
            join(&r.delta.to_add),
            join(&r.delta.to_remove),
            if r.dry_run { " (dry run)" } else { "" }
        )
    })
}

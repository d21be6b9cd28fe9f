//! `tb move`: move a task to another status.

use crate::cmd::BoardTarget;
use crate::http::HttpBackend;
use crate::output::{self, OutputMode, render};
use clap::Args;
use std::io::Write;
use taskboard_core::config::EffectiveConfig;
use taskboard_core::mutation::move_task_by_id;

#[derive(Args, Debug)]
pub struct MoveArgs {
    /// Task id to move.
    pub task: i64,

    /// Target status name (exact, as listed by `tb statuses`).
    #[arg(long)]
    pub to: String,

    #[command(flatten)]
    pub target: BoardTarget,
}

pub fn run_move(args: &MoveArgs, output: OutputMode, config: &EffectiveConfig) -> anyhow::Result<()> {
    let backend = HttpBackend::new(&config.api);
    let outcome = move_task_by_id(&backend, args.target.scope(), args.task, &args.to)
        .map_err(|err| output::fail(output, err))?;

    render(output, &outcome, |o, w| {
        if o.moved {
            writeln!(w, "✓ moved task {}: {} → {}", o.task_id, o.from, o.to)
        } else {
            writeln!(w, "task {} is already in '{}'", o.task_id, o.to)
        }
    })
}

//! `tb access`: reconcile workspace or board membership.
//!
//! The caller passes the member list as it was when editing started and the
//! list it should become. Only the difference is sent. For board access the
//! starting list defaults to the board's current members.

use crate::http::HttpBackend;
use crate::output::{self, OutputMode, render};
use anyhow::Result;
use clap::{Args, ValueEnum};
use serde::Serialize;
use std::io::{self, Write};
use taskboard_core::access::{SetDelta, diff_usernames};
use taskboard_core::api::{AccessTarget, BoardScope};
use taskboard_core::config::EffectiveConfig;
use taskboard_core::mutation::{apply_access_change, board_members};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AccessLevel {
    Workspace,
    Board,
}

#[derive(Args, Debug)]
pub struct AccessArgs {
    /// Whether the member list belongs to a workspace or a board.
    #[arg(value_enum)]
    pub level: AccessLevel,

    /// Workspace id.
    #[arg(long, short = 'w')]
    pub workspace: i64,

    /// Board id (required for board access).
    #[arg(long, short = 'b')]
    pub board: Option<i64>,

    /// Usernames with access before the edit (comma-separated).
    /// Read from the board when omitted; required for workspace access.
    #[arg(long, value_delimiter = ',')]
    pub original: Option<Vec<String>>,

    /// Usernames that should have access (comma-separated).
    #[arg(long, value_delimiter = ',')]
    pub selected: Vec<String>,

    /// Print the change without sending it.
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Debug, Serialize)]
struct AccessReport {
    target: AccessTarget,
    dry_run: bool,
    applied: bool,
    #[serde(flatten)]
    delta: SetDelta<String>,
}

fn access_target(args: &AccessArgs) -> Option<AccessTarget> {
    match (args.level, args.board) {
        (AccessLevel::Workspace, _) => Some(AccessTarget::Workspace {
            workspace_id: args.workspace,
        }),
        (AccessLevel::Board, Some(board)) => {
            Some(AccessTarget::Board(BoardScope::new(args.workspace, board)))
        }
        (AccessLevel::Board, None) => None,
    }
}

pub fn run_access(args: &AccessArgs, output: OutputMode, config: &EffectiveConfig) -> Result<()> {
    let Some(target) = access_target(args) else {
        return Err(output::fail_usage(output, "board access needs --board <ID>"));
    };
    let backend = HttpBackend::new(&config.api);
    let original = match (&args.original, target) {
        (Some(names), _) => normalize_names(names),
        (None, AccessTarget::Board(scope)) => {
            board_members(&backend, scope).map_err(|err| output::fail(output, err))?
        }
        (None, AccessTarget::Workspace { .. }) => {
            return Err(output::fail_usage(
                output,
                "workspace access needs --original <NAMES>",
            ));
        }
    };
    let selected = normalize_names(&args.selected);

    let delta = if args.dry_run {
        diff_usernames(&original, &selected)
    } else {
        apply_access_change(&backend, target, &original, &selected)
            .map_err(|err| output::fail(output, err))?
    };

    let report = AccessReport {
        target,
        dry_run: args.dry_run,
        applied: !args.dry_run && !delta.is_noop(),
        delta,
    };
    render(output, &report, write_report)
}

/// Trim entries and drop empties left by stray commas.
fn normalize_names(raw: &[String]) -> Vec<String> {
    raw.iter()
        .map(|name| name.trim())
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

fn write_report(report: &AccessReport, w: &mut dyn Write) -> io::Result<()> {
    let delta = &report.delta;
    if delta.is_noop() {
        return writeln!(w, "access unchanged");
    }
    for name in &delta.to_add {
        writeln!(w, "+ {name}")?;
    }
    for name in &delta.to_remove {
        writeln!(w, "- {name}")?;
    }
    if report.dry_run {
        writeln!(w, "(dry run, nothing sent)")?;
    }
    Ok(())
}

//! `tb statuses`: list statuses in column display order.

use crate::cmd::read_json;
use crate::http::HttpBackend;
use crate::output::{self, OutputMode, pretty_section, render_mode};
use anyhow::Result;
use clap::Args;
use std::io::Write;
use std::path::PathBuf;
use taskboard_core::config::EffectiveConfig;
use taskboard_core::derive::sorted_statuses;
use taskboard_core::model::board::StatusPayload;
use taskboard_core::mutation::BoardBackend;

#[derive(Args, Debug)]
pub struct StatusesArgs {
    /// Status list JSON; fetched from the backend when omitted.
    #[arg(long, value_name = "PATH")]
    pub file: Option<PathBuf>,
}

pub fn run_statuses(
    args: &StatusesArgs,
    output: OutputMode,
    config: &EffectiveConfig,
) -> Result<()> {
    let statuses = match &args.file {
        Some(path) => read_json::<StatusPayload>(path)?.into_statuses(),
        None => HttpBackend::new(&config.api)
            .fetch_statuses()
            .map_err(|err| output::fail(output, err))?,
    };

    let ordered = sorted_statuses(&statuses);
    render_mode(
        output,
        &ordered,
        |list, w| {
            for status in list {
                writeln!(w, "{}\t{}", status.id, status.name)?;
            }
            Ok(())
        },
        |list, w| {
            pretty_section(w, &format!("Statuses ({})", list.len()))?;
            for (position, status) in list.iter().enumerate() {
                writeln!(w, "{:>3}. {} (id {})", position + 1, status.name, status.id)?;
            }
            Ok(())
        },
    )
}

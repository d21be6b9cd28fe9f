//! `tb priorities`: list the priority levels tasks can take.

use crate::cmd::read_json;
use crate::http::HttpBackend;
use crate::output::{self, OutputMode, pretty_section, render_mode};
use anyhow::Result;
use clap::Args;
use std::io::Write;
use std::path::PathBuf;
use taskboard_core::config::EffectiveConfig;
use taskboard_core::model::board::PriorityPayload;
use taskboard_core::mutation::BoardBackend;

#[derive(Args, Debug)]
pub struct PrioritiesArgs {
    /// Priority list JSON; fetched from the backend when omitted.
    #[arg(long, value_name = "PATH")]
    pub file: Option<PathBuf>,
}

pub fn run_priorities(
    args: &PrioritiesArgs,
    output: OutputMode,
    config: &EffectiveConfig,
) -> Result<()> {
    let levels = match &args.file {
        Some(path) => read_json::<PriorityPayload>(path)?.into_levels(),
        None => HttpBackend::new(&config.api)
            .fetch_priorities()
            .map_err(|err| output::fail(output, err))?,
    };

    render_mode(
        output,
        &levels,
        |list, w| {
            for level in list {
                writeln!(w, "{}\t{}\t{}", level.id, level.level, level.color)?;
            }
            Ok(())
        },
        |list, w| {
            pretty_section(w, &format!("Priorities ({})", list.len()))?;
            for level in list {
                writeln!(w, "  {:<10} {}", level.id, level.level)?;
            }
            Ok(())
        },
    )
}

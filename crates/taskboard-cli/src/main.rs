#![forbid(unsafe_code)]

mod cmd;
mod http;
mod output;

use clap::{CommandFactory, Parser, Subcommand};
use output::OutputMode;
use std::env;
use taskboard_core::config;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "tb: task board views and edits from the terminal",
    long_about = None
)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long)]
    verbose: bool,

    /// Emit JSON output instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    /// Output format (overrides --json, FORMAT and config).
    #[arg(long, global = true, value_enum)]
    format: Option<OutputMode>,

    /// Backend base URL (overrides TASKBOARD_API_BASE and config).
    #[arg(long, global = true, value_name = "URL")]
    api: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    /// Derive the output mode from flags and the resolved config.
    fn output_mode(&self, resolved: &str) -> OutputMode {
        self.format
            .unwrap_or_else(|| OutputMode::from_resolved(resolved))
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        next_help_heading = "Read",
        about = "Show a board as a sorted list or as columns",
        long_about = "Derive a board view: past-due tasks first, then by priority and due date. \
                      List view applies status and category filters; column view groups by \
                      status or category.",
        after_help = "EXAMPLES:\n    # List view from an exported board\n    tb view --board-file board.json\n\n    # Only 'To Do' tasks in category 3 or 5\n    tb view --board-file board.json --status \"To Do\" --category 3 --category 5\n\n    # Category columns straight from the backend\n    tb view -w 1 -b 4 --mode columns --group category\n\n    # Emit machine-readable output\n    tb view --board-file board.json --json"
    )]
    View(cmd::view::ViewArgs),

    #[command(
        next_help_heading = "Read",
        about = "List statuses in column order",
        long_about = "List statuses as columns show them: To Do, In Progress, Completed, then the rest alphabetically.",
        after_help = "EXAMPLES:\n    # From the backend\n    tb statuses\n\n    # From an exported status list\n    tb statuses --file statuses.json"
    )]
    Statuses(cmd::statuses::StatusesArgs),

    #[command(
        next_help_heading = "Read",
        about = "List task priority levels",
        long_about = "List the priority levels tasks can take, most urgent first.",
        after_help = "EXAMPLES:\n    # From the backend\n    tb priorities\n\n    # From an exported priority list\n    tb priorities --file priorities.json"
    )]
    Priorities(cmd::priorities::PrioritiesArgs),

    #[command(
        next_help_heading = "Write",
        about = "Move a task to another status",
        long_about = "Send a full task update with the new status, then re-fetch the board.",
        after_help = "EXAMPLES:\n    # Move task 12 to In Progress\n    tb move 12 --to \"In Progress\" -w 1 -b 4"
    )]
    Move(cmd::move_cmd::MoveArgs),

    #[command(
        next_help_heading = "Write",
        about = "Change who can access a workspace or board",
        long_about = "Compare the original and selected member lists and send only the additions and removals.",
        after_help = "EXAMPLES:\n    # Preview a board access change\n    tb access board -w 1 -b 4 --original ana,bo --selected bo,cy --dry-run\n\n    # Apply a workspace access change\n    tb access workspace -w 1 --original ana --selected ana,bo"
    )]
    Access(cmd::access::AccessArgs),

    #[command(
        next_help_heading = "Write",
        about = "Set a task's categories",
        long_about = "Attach and detach categories so the task ends up with exactly the given set.",
        after_help = "EXAMPLES:\n    # Replace category 2 with 5 on task 12\n    tb categories 12 -w 1 -b 4 --old 1,2 --new 1,5\n\n    # Read current categories from the board\n    tb categories 12 -w 1 -b 4 --new 1,5"
    )]
    Categories(cmd::categories::CategoriesArgs),

    #[command(
        next_help_heading = "Setup",
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n    # Bash\n    tb completions bash > ~/.local/share/bash-completion/completions/tb"
    )]
    Completions(cmd::completions::CompletionsArgs),
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("TASKBOARD_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if env::var("DEBUG").is_ok() {
            "taskboard=debug,info"
        } else {
            "taskboard=info,warn"
        })
    });

    let format = env::var("TASKBOARD_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();

    if cli.verbose {
        info!("Verbose mode enabled");
    }

    if let Commands::Completions(args) = &cli.command {
        let mut command = Cli::command();
        return cmd::completions::run_completions(args.shell, &mut command);
    }

    let project_root = env::current_dir()?;
    let config = config::resolve_config(&project_root, cli.json, cli.api.as_deref())?;
    let output = cli.output_mode(&config.resolved_output);

    match &cli.command {
        Commands::View(args) => cmd::view::run_view(args, output, &config),
        Commands::Statuses(args) => cmd::statuses::run_statuses(args, output, &config),
        Commands::Priorities(args) => cmd::priorities::run_priorities(args, output, &config),
        Commands::Move(args) => cmd::move_cmd::run_move(args, output, &config),
        Commands::Access(args) => cmd::access::run_access(args, output, &config),
        Commands::Categories(args) => cmd::categories::run_categories(args, output, &config),
        Commands::Completions(_) => Ok(()),
    }
}

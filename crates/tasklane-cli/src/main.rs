mod version;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::debug;

use tasklane_core::bootstrap::bootstrap_workspace;
use tasklane_core::views;
use tasklane_core::workspace::Workspace;

#[derive(Parser)]
#[command(
    name = "tasklane",
    version = version::FULL,
    about = "Pointer-based progress tracking over a flat task file"
)]
struct Cli {
    /// Project root containing the .tasklane directory.
    #[arg(long, default_value = ".")]
    root: PathBuf,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show the task list as a compact table
    List,
    /// Show every task in full with a status summary
    Details,
    /// Show the current task without advancing the pointer
    Peek {
        /// Include the rule text in the shown task
        #[arg(long)]
        rules: bool,
    },
    /// Serve the current task, mark it complete, and advance the pointer
    Next {
        /// Include the rule text in the served task
        #[arg(long)]
        rules: bool,
    },
    /// Move the pointer back to the first task
    Reset,
    /// Clear all completion marks (fingerprint history is kept)
    ResetStatus,
    /// Jump the pointer to a 0-based index (out-of-range input is clamped)
    Goto { index: i64 },
    /// Deprecated: show task info without changing any state
    Start { index: i64 },
    /// Mark a task complete by index
    Complete { index: i64 },
    /// Mark a task pending again by index
    Uncomplete { index: i64 },
    /// Mark the next tasks complete in bulk and print their full content
    Auto { count: Option<i64> },
    /// Reconcile completion state against the current task file
    Sync,
    /// Show the rule text prepended to annotated tasks
    Rules,
    /// Print version information
    Version,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if matches!(cli.command, Command::Version) {
        println!("tasklane {}", version::FULL);
        return Ok(());
    }

    let report = bootstrap_workspace(&cli.root)?;
    debug!(
        dir = %report.dir.display(),
        tasks = report.task_count,
        "workspace ready"
    );

    let mut ws = Workspace::open(&cli.root);
    let output = match cli.command {
        Command::List => {
            let records = ws.tasks()?;
            views::task_table(&records, ws.state())
        }
        Command::Details => {
            let records = ws.tasks()?;
            views::task_details(&records, ws.state())
        }
        Command::Peek { rules } => views::peek_text(&ws.peek(rules)?),
        Command::Next { rules } => views::advance_text(&ws.advance(rules)?),
        Command::Reset => {
            ws.reset()?;
            "Pointer reset to 0.".to_string()
        }
        Command::ResetStatus => {
            if ws.reset_status()? {
                "All completion marks cleared.".to_string()
            } else {
                "No completion marks to clear.".to_string()
            }
        }
        Command::Goto { index } => {
            let landed = ws.goto(index)?;
            format!("Pointer moved to {landed}.")
        }
        Command::Start { index } => {
            let info = ws.start_info(index)?;
            views::start_text(info.as_ref())
        }
        Command::Complete { index } => views::complete_text(&ws.complete(index)?),
        Command::Uncomplete { index } => views::uncomplete_text(&ws.uncomplete(index)?),
        Command::Auto { count } => views::batch_text(&ws.batch_advance(count)?),
        Command::Sync => {
            let records = ws.reconcile()?;
            views::sync_summary(&records, ws.state())
        }
        Command::Rules => ws.rules(),
        Command::Version => unreachable!("handled above"),
    };
    println!("{output}");
    Ok(())
}

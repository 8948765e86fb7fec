//! `task-worker` CLI entry-point.
//!
//! Available sub-commands:
//! - `run`      — process a task definition with the built-in action set.
//! - `validate` — validate a task definition JSON file.

use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::info;

use actions::builtin::EchoAction;
use actions::Action;
use handler::{validate_task, ActionRegistry, Handler, LogNotifier, TaskDescription, TaskOutcome};

#[derive(Parser)]
#[command(
    name = "task-worker",
    about = "Sequential task worker with classified failure reporting",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Process a task definition using the built-in action set.
    Run {
        /// Path to the task definition JSON file.
        path: std::path::PathBuf,
    },
    /// Validate a task definition JSON file.
    Validate {
        /// Path to the task definition JSON file.
        path: std::path::PathBuf,
    },
}

/// Actions the standalone binary can run without a scheduler.
fn builtin_registry() -> ActionRegistry {
    let mut registry = ActionRegistry::new();
    registry.insert("echo".to_string(), Arc::new(EchoAction) as Arc<dyn Action>);
    registry
}

fn load_task(path: &std::path::Path) -> TaskDescription {
    let content = std::fs::read_to_string(path)
        .unwrap_or_else(|e| panic!("cannot read file {}: {e}", path.display()));

    serde_json::from_str(&content).unwrap_or_else(|e| panic!("invalid task JSON: {e}"))
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Command::Run { path } => {
            let task = load_task(&path);
            info!("processing task '{}'", task.name);

            let handler = Handler::new(builtin_registry(), Arc::new(LogNotifier));
            let outcome = handler.run(&task, serde_json::Value::Null).await;

            println!("{}", serde_json::to_string(&outcome).unwrap());

            // Classified exit codes do not fit in a Unix exit status byte;
            // they travel in the printed outcome and the notification.
            match outcome {
                TaskOutcome::Completed | TaskOutcome::Halted => {}
                TaskOutcome::Failed { .. } => std::process::exit(1),
            }
        }
        Command::Validate { path } => {
            let task = load_task(&path);

            match validate_task(&task, &builtin_registry()) {
                Ok(order) => {
                    println!("✅ Task is valid. Step order: {order:?}");
                }
                Err(e) => {
                    eprintln!("❌ Validation failed: {e}");
                    std::process::exit(1);
                }
            }
        }
    }
}

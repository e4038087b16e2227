//! Task board commands for CLI.
//!
//! The board is not persisted: every invocation starts from the demo tasks,
//! applies one action, and prints the result.

use chrono::Utc;
use clap::Subcommand;

use flowstate_core::{Difficulty, TaskBoard};

#[derive(Subcommand)]
pub enum TaskAction {
    /// List tasks
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Task counts and derived signals
    Stats,
    /// Add a task and show the board
    Add {
        /// Task title
        title: String,
        /// Task description
        #[arg(long)]
        description: Option<String>,
        /// easy, medium or hard (default: medium)
        #[arg(long, default_value = "medium")]
        difficulty: String,
    },
    /// Mark a task completed
    Complete {
        /// Task ID
        id: String,
    },
    /// Mark a task failed
    Fail {
        /// Task ID
        id: String,
    },
    /// Record an error on a task
    Error {
        /// Task ID
        id: String,
    },
    /// Delete a task
    Delete {
        /// Task ID
        id: String,
    },
}

pub fn run(action: TaskAction) -> Result<(), Box<dyn std::error::Error>> {
    let now = Utc::now();
    let mut board = TaskBoard::with_mock_tasks(now);

    match action {
        TaskAction::List { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(board.tasks())?);
            } else {
                print_board(&board);
            }
        }
        TaskAction::Stats => {
            let stats = board.stats();
            let signals = board.derived_signals();
            println!("Total: {}", stats.total);
            println!("Completed: {}", stats.completed);
            println!("Active: {}", stats.active);
            println!("Errors: {}", stats.total_errors);
            println!("Completion efficiency: {:.2}", signals.completion_efficiency);
            println!("Error rate: {:.2}", signals.error_rate);
        }
        TaskAction::Add {
            title,
            description,
            difficulty,
        } => {
            let difficulty: Difficulty = difficulty.parse()?;
            let task = board.add_task(&title, description, difficulty, now)?;
            println!("Task created: {}", task.id);
            print_board(&board);
        }
        TaskAction::Complete { id } => {
            board.complete_task(&id, now)?;
            println!("Task completed: {id}");
            print_board(&board);
        }
        TaskAction::Fail { id } => {
            board.fail_task(&id, now)?;
            println!("Task failed: {id}");
            print_board(&board);
        }
        TaskAction::Error { id } => {
            let task = board.record_error(&id)?;
            println!("Errors on {}: {}", id, task.error_count);
        }
        TaskAction::Delete { id } => {
            let task = board.delete_task(&id)?;
            println!("Task deleted: {} ({})", task.id, task.title);
            print_board(&board);
        }
    }
    Ok(())
}

fn print_board(board: &TaskBoard) {
    for task in board.tasks() {
        println!(
            "{:<28} {:<10} {:<7} errors={}  {}",
            task.id,
            format!("{:?}", task.status).to_lowercase(),
            task.difficulty.to_string(),
            task.error_count,
            task.title
        );
    }
}

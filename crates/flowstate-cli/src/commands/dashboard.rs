//! Full dashboard view.

use chrono::Utc;
use clap::Args;

use flowstate_core::{
    Config, DashboardSnapshot, FileSessionStorage, SessionStore, SignalUpdate, TaskBoard,
};

use super::{build_tracker, SignalArgs};

#[derive(Args)]
pub struct DashboardArgs {
    #[command(flatten)]
    signals: SignalArgs,
    /// Take completion efficiency and error rate from the task board
    #[arg(long)]
    from_tasks: bool,
    /// Record the current score as today's history entry
    #[arg(long)]
    record: bool,
    /// Fixed seed for the demo history
    #[arg(long)]
    seed: Option<u64>,
    /// Print the formula breakdown
    #[arg(long)]
    breakdown: bool,
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

pub fn run(args: DashboardArgs) -> Result<(), Box<dyn std::error::Error>> {
    let now = Utc::now();
    let config = Config::load_or_default();
    let session = SessionStore::load_or_create_guest(FileSessionStorage::default_location()?, now)?;
    let board = TaskBoard::with_mock_tasks(now);

    let mut tracker = build_tracker(&config, args.seed);
    if args.from_tasks {
        let derived = board.derived_signals();
        tracker.update(SignalUpdate {
            completion_efficiency: Some(derived.completion_efficiency),
            error_rate: Some(derived.error_rate),
            ..Default::default()
        });
    }
    // Explicit flags win over task-derived values.
    tracker.update(args.signals.to_update());
    if args.record {
        tracker.record_current();
    }

    let snapshot = DashboardSnapshot::build(&tracker, &board, session.capabilities(), now);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
        return Ok(());
    }

    print!(
        "{}",
        snapshot.render_text(
            config.ui.chart_width,
            args.breakdown || config.ui.show_breakdown
        )
    );
    if session.is_guest() {
        println!("\nGuest mode: run `flowstate session signup` to unlock every panel.");
    }
    Ok(())
}

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "flowstate", version, about = "FlowState energy dashboard CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Energy score, recommendation and burnout risk
    Energy {
        #[command(subcommand)]
        action: commands::energy::EnergyAction,
    },
    /// Show the full dashboard
    Dashboard(commands::dashboard::DashboardArgs),
    /// Session task board (in memory, seeded with demo tasks)
    Task {
        #[command(subcommand)]
        action: commands::task::TaskAction,
    },
    /// Local guest / signed-in session
    Session {
        #[command(subcommand)]
        action: commands::session::SessionAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

/// Log to stderr so stdout stays parseable. Filter from `FLOWSTATE_LOG`,
/// then `RUST_LOG`, defaulting to warnings only.
fn init_tracing() {
    let log_env = std::env::var("FLOWSTATE_LOG")
        .or_else(|_| std::env::var("RUST_LOG"))
        .unwrap_or_else(|_| "warn".to_string());
    let env_filter = tracing_subscriber::EnvFilter::try_new(&log_env)
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .compact()
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(false)
        .with_env_filter(env_filter)
        .init();
    tracing::debug!("log filter: {}", log_env);
}

fn main() {
    init_tracing();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Energy { action } => commands::energy::run(action),
        Commands::Dashboard(args) => commands::dashboard::run(args),
        Commands::Task { action } => commands::task::run(action),
        Commands::Session { action } => commands::session::run(action),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

pub mod config;
pub mod dashboard;
pub mod energy;
pub mod session;
pub mod task;

use clap::Args;
use flowstate_core::{Config, EnergyHistory, EnergyTracker, SignalUpdate};

/// Signal overrides shared by the scoring commands.
///
/// Values are not range-checked: the formula clamps whatever it is given.
#[derive(Args, Debug, Clone, Default)]
pub struct SignalArgs {
    /// Completion efficiency (0.0-1.0)
    #[arg(long, allow_negative_numbers = true)]
    pub completion: Option<f64>,
    /// Error rate (0.0-1.0)
    #[arg(long, allow_negative_numbers = true)]
    pub error_rate: Option<f64>,
    /// Idle time ratio (0.0-1.0)
    #[arg(long, allow_negative_numbers = true)]
    pub idle: Option<f64>,
    /// Task switches this session
    #[arg(long, allow_negative_numbers = true)]
    pub switches: Option<f64>,
    /// Mood (1-5)
    #[arg(long, allow_negative_numbers = true)]
    pub mood: Option<f64>,
}

impl SignalArgs {
    pub fn to_update(&self) -> SignalUpdate {
        SignalUpdate {
            completion_efficiency: self.completion,
            error_rate: self.error_rate,
            idle_time_ratio: self.idle,
            task_switch_count: self.switches,
            mood_input: self.mood,
        }
    }
}

/// Tracker configured from `config`, seeded with mock history.
pub fn build_tracker(config: &Config, seed: Option<u64>) -> EnergyTracker {
    let history_cfg = &config.history;
    let history = match seed.or(history_cfg.seed) {
        Some(seed) => EnergyHistory::seeded(history_cfg.seed_days, history_cfg.window, seed),
        None => EnergyHistory::mock(history_cfg.seed_days, history_cfg.window),
    };
    EnergyTracker::new(history)
        .with_defaults(config.signals)
        .with_params(config.scoring_params())
        .with_burnout_window(history_cfg.burnout_window)
}

//! Energy scoring engine.
//!
//! [`calculator`] holds the pure scoring functions. [`history`] and
//! [`tracker`] are the caller-owned state that feeds them.

pub mod calculator;
pub mod history;
pub mod tracker;

pub use calculator::{
    calculate_burnout_risk, calculate_energy_score, calculate_energy_score_with,
    get_recommendation, normalize_mood, BurnoutRisk, Recommendation, ScoreBreakdown,
    ScoringParams, SignalInput, DEFAULT_SWITCH_CEILING,
};
pub use history::{
    generate_mock_energy_data, generate_mock_energy_data_with_rng, EnergyHistory,
    DEFAULT_BURNOUT_WINDOW, DEFAULT_HISTORY_WINDOW,
};
pub use tracker::{EnergyTracker, EnergyTrend, SignalUpdate};

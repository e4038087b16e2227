//! Caller-owned energy state: current signals plus the daily history.

use serde::{Deserialize, Serialize};

use super::calculator::{
    calculate_energy_score_with, get_recommendation, BurnoutRisk, Recommendation, ScoreBreakdown,
    ScoringParams, SignalInput,
};
use super::history::{EnergyHistory, DEFAULT_BURNOUT_WINDOW};

/// Partial update of the five signals. `None` fields keep their value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SignalUpdate {
    pub completion_efficiency: Option<f64>,
    pub error_rate: Option<f64>,
    pub idle_time_ratio: Option<f64>,
    pub task_switch_count: Option<f64>,
    pub mood_input: Option<f64>,
}

impl SignalUpdate {
    /// Apply this update on top of `input`.
    pub fn apply_to(&self, input: SignalInput) -> SignalInput {
        SignalInput {
            completion_efficiency: self
                .completion_efficiency
                .unwrap_or(input.completion_efficiency),
            error_rate: self.error_rate.unwrap_or(input.error_rate),
            idle_time_ratio: self.idle_time_ratio.unwrap_or(input.idle_time_ratio),
            task_switch_count: self.task_switch_count.unwrap_or(input.task_switch_count),
            mood_input: self.mood_input.unwrap_or(input.mood_input),
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Direction of today's score against the recent average.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnergyTrend {
    Improving,
    Declining,
}

/// Current signals, the parameters to score them with, and the daily history.
///
/// Every derived value is recomputed on read, so nothing can go stale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnergyTracker {
    signals: SignalInput,
    defaults: SignalInput,
    params: ScoringParams,
    history: EnergyHistory,
    burnout_window: usize,
}

impl Default for EnergyTracker {
    fn default() -> Self {
        Self::new(EnergyHistory::default())
    }
}

impl EnergyTracker {
    /// Tracker starting from the default signals.
    pub fn new(history: EnergyHistory) -> Self {
        Self {
            signals: SignalInput::default(),
            defaults: SignalInput::default(),
            params: ScoringParams::default(),
            history,
            burnout_window: DEFAULT_BURNOUT_WINDOW,
        }
    }

    /// Use `defaults` both as the starting signals and as the reset target.
    pub fn with_defaults(mut self, defaults: SignalInput) -> Self {
        self.signals = defaults;
        self.defaults = defaults;
        self
    }

    pub fn with_params(mut self, params: ScoringParams) -> Self {
        self.params = params;
        self
    }

    pub fn with_burnout_window(mut self, window: usize) -> Self {
        self.burnout_window = window;
        self
    }

    pub fn signals(&self) -> &SignalInput {
        &self.signals
    }

    pub fn params(&self) -> &ScoringParams {
        &self.params
    }

    pub fn history(&self) -> &EnergyHistory {
        &self.history
    }

    pub fn burnout_window(&self) -> usize {
        self.burnout_window
    }

    pub fn current_energy(&self) -> f64 {
        calculate_energy_score_with(&self.signals, &self.params)
    }

    pub fn breakdown(&self) -> ScoreBreakdown {
        ScoreBreakdown::compute(&self.signals, &self.params)
    }

    pub fn recommendation(&self) -> Recommendation {
        get_recommendation(self.current_energy(), self.signals.error_rate)
    }

    pub fn burnout_risk(&self) -> BurnoutRisk {
        self.history.burnout_risk(self.burnout_window)
    }

    /// Mean of the burnout window, 0 with no history.
    pub fn average_recent(&self) -> f64 {
        self.history.average_recent(self.burnout_window)
    }

    pub fn trend(&self) -> EnergyTrend {
        if self.current_energy() > self.average_recent() {
            EnergyTrend::Improving
        } else {
            EnergyTrend::Declining
        }
    }

    pub fn update(&mut self, update: SignalUpdate) {
        self.signals = update.apply_to(self.signals);
        tracing::debug!(signals = ?self.signals, "signals updated");
    }

    pub fn record_energy(&mut self, score: f64) {
        self.history.push(score);
    }

    /// Record the current score as today's entry and return it.
    pub fn record_current(&mut self) -> f64 {
        let score = self.current_energy();
        self.history.push(score);
        score
    }

    /// Restore the default signals. History is kept.
    pub fn reset(&mut self) {
        self.signals = self.defaults;
    }
}

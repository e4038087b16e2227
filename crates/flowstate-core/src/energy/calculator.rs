//! Energy score, recommendation and burnout risk.
//!
//! Everything here is a pure function of its arguments. Out-of-range signals
//! are never rejected: they go through the same arithmetic and the final
//! clamp in [`calculate_energy_score_with`] absorbs them.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Session ceiling used to normalize the task-switch count.
///
/// A session with this many switches (or more) contributes the full
/// switching penalty.
pub const DEFAULT_SWITCH_CEILING: f64 = 10.0;

pub const COMPLETION_WEIGHT: f64 = 0.35;
pub const MOOD_WEIGHT: f64 = 0.20;
pub const ERROR_WEIGHT: f64 = 0.25;
pub const IDLE_WEIGHT: f64 = 0.10;
pub const SWITCH_WEIGHT: f64 = 0.10;

pub const MIN_ENERGY: f64 = 0.0;
pub const MAX_ENERGY: f64 = 100.0;

/// The five self-reported signals feeding the energy formula.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SignalInput {
    /// Share of started work that was finished (0.0-1.0)
    pub completion_efficiency: f64,
    /// Share of work that produced errors (0.0-1.0)
    pub error_rate: f64,
    /// Share of the session spent idle (0.0-1.0)
    pub idle_time_ratio: f64,
    /// Number of task switches in the session (0+)
    pub task_switch_count: f64,
    /// Self-reported mood (1-5)
    pub mood_input: f64,
}

impl Default for SignalInput {
    fn default() -> Self {
        Self {
            completion_efficiency: 0.75,
            error_rate: 0.15,
            idle_time_ratio: 0.2,
            task_switch_count: 2.0,
            mood_input: 3.0,
        }
    }
}

/// Tunable parameters of the energy formula.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringParams {
    /// Switch count at which the switching penalty saturates.
    pub switch_ceiling: f64,
}

impl Default for ScoringParams {
    fn default() -> Self {
        Self {
            switch_ceiling: DEFAULT_SWITCH_CEILING,
        }
    }
}

impl ScoringParams {
    /// Map a raw switch count onto 0..=1, saturating at the ceiling.
    pub fn normalize_switches(&self, task_switch_count: f64) -> f64 {
        (task_switch_count / self.switch_ceiling).min(1.0)
    }
}

/// Map a 1-5 mood onto 0..=1.
pub fn normalize_mood(mood_input: f64) -> f64 {
    (mood_input - 1.0) / 4.0
}

/// Energy score (0-100) with the default switch ceiling.
pub fn calculate_energy_score(input: &SignalInput) -> f64 {
    calculate_energy_score_with(input, &ScoringParams::default())
}

/// Energy score (0-100).
///
/// ```text
/// score = efficiency * 0.35 + mood * 0.20 - errors * 0.25 - idle * 0.10 - switches * 0.10
/// ```
///
/// The weighted sum is scaled by 100 and clamped to `[0, 100]`. A NaN result
/// (NaN or opposing infinite inputs) maps to 0.
pub fn calculate_energy_score_with(input: &SignalInput, params: &ScoringParams) -> f64 {
    let normalized_mood = normalize_mood(input.mood_input);
    let normalized_switches = params.normalize_switches(input.task_switch_count);

    let score = input.completion_efficiency * COMPLETION_WEIGHT + normalized_mood * MOOD_WEIGHT
        - input.error_rate * ERROR_WEIGHT
        - input.idle_time_ratio * IDLE_WEIGHT
        - normalized_switches * SWITCH_WEIGHT;

    let scaled = score * 100.0;
    if scaled.is_nan() {
        return MIN_ENERGY;
    }
    scaled.clamp(MIN_ENERGY, MAX_ENERGY)
}

/// Per-signal contribution to the energy score, in score points.
///
/// Penalty terms are negative. `raw_total` is the unclamped sum.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub normalized_mood: f64,
    pub normalized_switches: f64,
    pub efficiency_points: f64,
    pub mood_points: f64,
    pub error_points: f64,
    pub idle_points: f64,
    pub switch_points: f64,
    pub raw_total: f64,
    pub score: f64,
}

impl ScoreBreakdown {
    pub fn compute(input: &SignalInput, params: &ScoringParams) -> Self {
        let normalized_mood = normalize_mood(input.mood_input);
        let normalized_switches = params.normalize_switches(input.task_switch_count);

        let efficiency_points = input.completion_efficiency * COMPLETION_WEIGHT * 100.0;
        let mood_points = normalized_mood * MOOD_WEIGHT * 100.0;
        let error_points = -input.error_rate * ERROR_WEIGHT * 100.0;
        let idle_points = -input.idle_time_ratio * IDLE_WEIGHT * 100.0;
        let switch_points = -normalized_switches * SWITCH_WEIGHT * 100.0;

        Self {
            normalized_mood,
            normalized_switches,
            efficiency_points,
            mood_points,
            error_points,
            idle_points,
            switch_points,
            raw_total: efficiency_points + mood_points + error_points + idle_points + switch_points,
            score: calculate_energy_score_with(input, params),
        }
    }
}

/// Adaptive recommendation for the next stretch of work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Recommendation {
    #[serde(rename = "Take a short break")]
    TakeBreak,
    #[serde(rename = "Switch to a low difficulty task")]
    SwitchToEasierTask,
    #[serde(rename = "Deep Work Mode Recommended")]
    DeepWork,
    #[serde(rename = "Continue current workflow")]
    ContinueWorkflow,
}

impl Recommendation {
    pub fn label(&self) -> &'static str {
        match self {
            Recommendation::TakeBreak => "Take a short break",
            Recommendation::SwitchToEasierTask => "Switch to a low difficulty task",
            Recommendation::DeepWork => "Deep Work Mode Recommended",
            Recommendation::ContinueWorkflow => "Continue current workflow",
        }
    }

    /// One-sentence reasoning for the rule that produced this recommendation.
    pub fn explain(&self, energy_score: f64, error_rate: f64) -> String {
        match self {
            Recommendation::TakeBreak => format!(
                "Your energy score is {}/100. When energy drops below 40, recovery becomes important to maintain long-term productivity.",
                energy_score.round()
            ),
            Recommendation::SwitchToEasierTask => format!(
                "Your error rate is {}%. When errors exceed 40%, switching to easier tasks helps rebuild accuracy and confidence.",
                (error_rate * 100.0).round()
            ),
            Recommendation::DeepWork => format!(
                "Your energy score is {}/100. This is the optimal window for tackling your most challenging, creative work.",
                energy_score.round()
            ),
            Recommendation::ContinueWorkflow => {
                "Your current workflow is sustainable. Keep up the consistency!".to_string()
            }
        }
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Pick a recommendation. Rules are evaluated in order and the first match
/// wins, so low energy beats a high error rate.
pub fn get_recommendation(energy_score: f64, error_rate: f64) -> Recommendation {
    if energy_score < 40.0 {
        return Recommendation::TakeBreak;
    }

    if error_rate > 0.4 {
        return Recommendation::SwitchToEasierTask;
    }

    if energy_score > 80.0 {
        return Recommendation::DeepWork;
    }

    Recommendation::ContinueWorkflow
}

/// Burnout risk bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BurnoutRisk {
    Low,
    Moderate,
    High,
}

impl BurnoutRisk {
    pub fn as_str(&self) -> &'static str {
        match self {
            BurnoutRisk::Low => "low",
            BurnoutRisk::Moderate => "moderate",
            BurnoutRisk::High => "high",
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            BurnoutRisk::Low => "Low Risk",
            BurnoutRisk::Moderate => "Moderate Risk",
            BurnoutRisk::High => "High Risk",
        }
    }

    pub fn indicator(&self) -> &'static str {
        match self {
            BurnoutRisk::Low => "●",
            BurnoutRisk::Moderate => "◐",
            BurnoutRisk::High => "○",
        }
    }
}

impl fmt::Display for BurnoutRisk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify burnout risk from recent daily scores.
///
/// Averages every value it is given; callers pass the trailing window.
/// An empty slice is low risk.
pub fn calculate_burnout_risk(recent_scores: &[f64]) -> BurnoutRisk {
    if recent_scores.is_empty() {
        return BurnoutRisk::Low;
    }

    let avg_energy = recent_scores.iter().sum::<f64>() / recent_scores.len() as f64;

    if avg_energy < 45.0 {
        BurnoutRisk::High
    } else if avg_energy < 65.0 {
        BurnoutRisk::Moderate
    } else {
        BurnoutRisk::Low
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn signals(eff: f64, err: f64, idle: f64, switches: f64, mood: f64) -> SignalInput {
        SignalInput {
            completion_efficiency: eff,
            error_rate: err,
            idle_time_ratio: idle,
            task_switch_count: switches,
            mood_input: mood,
        }
    }

    #[test]
    fn test_best_case_scores_fifty_five() {
        let score = calculate_energy_score(&signals(1.0, 0.0, 0.0, 0.0, 5.0));
        assert!((score - 55.0).abs() < 1e-9, "got {score}");
    }

    #[test]
    fn test_all_penalties_clamp_to_zero() {
        let score = calculate_energy_score(&signals(0.0, 1.0, 1.0, 10.0, 1.0));
        assert_eq!(score, 0.0);
    }

    #[test]
    fn test_default_signals() {
        // 26.25 + 10 - 3.75 - 2 - 2
        let score = calculate_energy_score(&SignalInput::default());
        assert!((score - 28.5).abs() < 1e-9, "got {score}");
    }

    #[test]
    fn test_switches_saturate_at_ceiling() {
        let at_ceiling = calculate_energy_score(&signals(1.0, 0.0, 0.0, 10.0, 5.0));
        let above = calculate_energy_score(&signals(1.0, 0.0, 0.0, 250.0, 5.0));
        assert_eq!(at_ceiling, above);
        assert!((at_ceiling - 45.0).abs() < 1e-9);
    }

    #[test]
    fn test_custom_switch_ceiling() {
        let params = ScoringParams { switch_ceiling: 20.0 };
        let score = calculate_energy_score_with(&signals(1.0, 0.0, 0.0, 10.0, 5.0), &params);
        assert!((score - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_out_of_range_inputs_are_absorbed() {
        assert_eq!(calculate_energy_score(&signals(0.5, 5.0, 0.0, 0.0, 3.0)), 0.0);
        assert_eq!(calculate_energy_score(&signals(10.0, 0.0, 0.0, 0.0, 9.0)), 100.0);
        // Mood below 1 lowers the score but does not error.
        let low_mood = calculate_energy_score(&signals(1.0, 0.0, 0.0, 0.0, 0.0));
        assert!((low_mood - 30.0).abs() < 1e-9);
    }

    #[test]
    fn test_nan_maps_to_floor() {
        assert_eq!(calculate_energy_score(&signals(f64::NAN, 0.0, 0.0, 0.0, 3.0)), 0.0);
        assert_eq!(
            calculate_energy_score(&signals(f64::INFINITY, f64::INFINITY, 0.0, 0.0, 3.0)),
            0.0
        );
    }

    #[test]
    fn test_score_is_idempotent() {
        let input = signals(0.8, 0.1, 0.3, 4.0, 4.0);
        assert_eq!(calculate_energy_score(&input), calculate_energy_score(&input));
    }

    #[test]
    fn test_breakdown_matches_score() {
        let input = signals(0.8, 0.1, 0.3, 4.0, 4.0);
        let breakdown = ScoreBreakdown::compute(&input, &ScoringParams::default());
        assert!((breakdown.efficiency_points - 28.0).abs() < 1e-9);
        assert!((breakdown.mood_points - 15.0).abs() < 1e-9);
        assert!((breakdown.error_points + 2.5).abs() < 1e-9);
        assert!((breakdown.idle_points + 3.0).abs() < 1e-9);
        assert!((breakdown.switch_points + 4.0).abs() < 1e-9);
        assert!((breakdown.raw_total - breakdown.score).abs() < 1e-9);
    }

    #[test]
    fn test_breakdown_keeps_negative_raw_total() {
        let input = signals(0.0, 1.0, 1.0, 10.0, 1.0);
        let breakdown = ScoreBreakdown::compute(&input, &ScoringParams::default());
        assert!((breakdown.raw_total + 45.0).abs() < 1e-9);
        assert_eq!(breakdown.score, 0.0);
    }

    #[test]
    fn test_recommendation_break_boundary() {
        assert_eq!(get_recommendation(39.9, 0.0), Recommendation::TakeBreak);
        assert_eq!(get_recommendation(40.0, 0.0), Recommendation::ContinueWorkflow);
    }

    #[test]
    fn test_recommendation_error_rate_boundary() {
        assert_eq!(get_recommendation(50.0, 0.41), Recommendation::SwitchToEasierTask);
        assert_eq!(get_recommendation(50.0, 0.40), Recommendation::ContinueWorkflow);
    }

    #[test]
    fn test_recommendation_rule_order() {
        // Low energy wins over a high error rate.
        assert_eq!(get_recommendation(10.0, 0.9), Recommendation::TakeBreak);
        // A high error rate wins over deep work.
        assert_eq!(get_recommendation(95.0, 0.5), Recommendation::SwitchToEasierTask);
        assert_eq!(get_recommendation(80.0, 0.0), Recommendation::ContinueWorkflow);
        assert_eq!(get_recommendation(80.1, 0.0), Recommendation::DeepWork);
    }

    #[test]
    fn test_recommendation_labels() {
        assert_eq!(Recommendation::TakeBreak.to_string(), "Take a short break");
        assert_eq!(
            serde_json::to_string(&Recommendation::DeepWork).unwrap(),
            "\"Deep Work Mode Recommended\""
        );
    }

    #[test]
    fn test_recommendation_explanations() {
        let explain = |score: f64, error_rate: f64| {
            get_recommendation(score, error_rate).explain(score, error_rate)
        };
        assert_eq!(
            explain(31.6, 0.9),
            "Your energy score is 32/100. When energy drops below 40, recovery becomes important to maintain long-term productivity."
        );
        assert_eq!(
            explain(50.0, 0.456),
            "Your error rate is 46%. When errors exceed 40%, switching to easier tasks helps rebuild accuracy and confidence."
        );
        assert_eq!(
            explain(85.2, 0.1),
            "Your energy score is 85/100. This is the optimal window for tackling your most challenging, creative work."
        );
        assert_eq!(
            explain(60.0, 0.1),
            "Your current workflow is sustainable. Keep up the consistency!"
        );
    }

    #[test]
    fn test_burnout_buckets() {
        assert_eq!(calculate_burnout_risk(&[]), BurnoutRisk::Low);
        assert_eq!(calculate_burnout_risk(&[44.0; 5]), BurnoutRisk::High);
        assert_eq!(calculate_burnout_risk(&[45.0; 5]), BurnoutRisk::Moderate);
        assert_eq!(calculate_burnout_risk(&[64.9; 5]), BurnoutRisk::Moderate);
        assert_eq!(calculate_burnout_risk(&[65.0; 5]), BurnoutRisk::Low);
    }

    #[test]
    fn test_burnout_averages_everything_given() {
        // Seven values, no truncation: mean is 50.
        let scores = [20.0, 20.0, 80.0, 80.0, 50.0, 50.0, 50.0];
        assert_eq!(calculate_burnout_risk(&scores), BurnoutRisk::Moderate);
    }

    #[test]
    fn test_burnout_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&BurnoutRisk::High).unwrap(), "\"high\"");
        assert_eq!(BurnoutRisk::Moderate.label(), "Moderate Risk");
    }

    proptest! {
        #[test]
        fn prop_score_always_in_range(
            eff in -1e6f64..1e6,
            err in -1e6f64..1e6,
            idle in -1e6f64..1e6,
            switches in -1e6f64..1e6,
            mood in -1e6f64..1e6,
        ) {
            let score = calculate_energy_score(&signals(eff, err, idle, switches, mood));
            prop_assert!((0.0..=100.0).contains(&score));
        }

        #[test]
        fn prop_nominal_range_never_exceeds_fifty_five(
            eff in 0.0f64..=1.0,
            err in 0.0f64..=1.0,
            idle in 0.0f64..=1.0,
            switches in 0.0f64..=50.0,
            mood in 1.0f64..=5.0,
        ) {
            let score = calculate_energy_score(&signals(eff, err, idle, switches, mood));
            prop_assert!(score <= 55.0 + 1e-9);
        }
    }
}

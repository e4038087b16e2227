//! Dashboard snapshot and text rendering.
//!
//! A [`DashboardSnapshot`] gathers every derived value the dashboard shows.
//! Gating is applied only when rendering: the snapshot always carries the
//! full numbers, and [`Capabilities`] decides which panels print them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::energy::{
    BurnoutRisk, EnergyTracker, EnergyTrend, Recommendation, ScoreBreakdown, SignalInput,
};
use crate::session::Capabilities;
use crate::task::{TaskBoard, TaskStats, WorkVelocity};

/// Focus mode is suggested strictly above this score.
pub const FOCUS_THRESHOLD: f64 = 70.0;

pub fn is_focus_recommended(score: f64) -> bool {
    score > FOCUS_THRESHOLD
}

/// Headline state shown on the energy card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnergyState {
    LowCapacity,
    Balanced,
    Optimal,
}

impl EnergyState {
    pub fn from_score(score: f64) -> Self {
        if score < 40.0 {
            EnergyState::LowCapacity
        } else if score < 70.0 {
            EnergyState::Balanced
        } else {
            EnergyState::Optimal
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            EnergyState::LowCapacity => "Low Capacity",
            EnergyState::Balanced => "Balanced",
            EnergyState::Optimal => "Optimal",
        }
    }
}

/// Deep-work readiness level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FocusReadiness {
    RecoveryNeeded,
    Preparing,
    Ready,
    Peak,
}

impl FocusReadiness {
    pub fn from_score(score: f64) -> Self {
        if score < 40.0 {
            FocusReadiness::RecoveryNeeded
        } else if score < 60.0 {
            FocusReadiness::Preparing
        } else if score < 80.0 {
            FocusReadiness::Ready
        } else {
            FocusReadiness::Peak
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FocusReadiness::RecoveryNeeded => "Low - Recovery Needed",
            FocusReadiness::Preparing => "Preparing",
            FocusReadiness::Ready => "Ready",
            FocusReadiness::Peak => "Peak Condition",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeeklySummary {
    pub average: f64,
    pub peak: f64,
    pub low: f64,
}

impl WeeklySummary {
    /// `None` for an empty history.
    pub fn from_scores(scores: &[f64]) -> Option<Self> {
        if scores.is_empty() {
            return None;
        }
        let average = scores.iter().sum::<f64>() / scores.len() as f64;
        let peak = scores.iter().copied().fold(f64::MIN, f64::max);
        let low = scores.iter().copied().fold(f64::MAX, f64::min);
        Some(Self { average, peak, low })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveTaskView {
    pub title: String,
    pub load: String,
    pub completion_percent: u32,
    pub minutes_invested: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    pub capabilities: Capabilities,
    pub signals: SignalInput,
    pub energy: f64,
    pub energy_state: EnergyState,
    pub readiness: FocusReadiness,
    pub recommendation: Recommendation,
    pub explanation: String,
    pub focus_recommended: bool,
    pub burnout_risk: BurnoutRisk,
    pub average_recent: f64,
    pub burnout_window: usize,
    pub trend: EnergyTrend,
    pub history: Vec<f64>,
    pub weekly: Option<WeeklySummary>,
    pub breakdown: ScoreBreakdown,
    pub task_stats: TaskStats,
    pub velocity: WorkVelocity,
    pub active_task: Option<ActiveTaskView>,
}

impl DashboardSnapshot {
    pub fn build(
        tracker: &EnergyTracker,
        board: &TaskBoard,
        capabilities: Capabilities,
        now: DateTime<Utc>,
    ) -> Self {
        let energy = tracker.current_energy();
        let history = tracker.history().recent(tracker.history().capacity());
        let recommendation = tracker.recommendation();
        let task_stats = board.stats();
        let active_task = board.active_task().map(|task| ActiveTaskView {
            title: task.title.clone(),
            load: task.difficulty.load_label().to_string(),
            completion_percent: (task.progress.unwrap_or(0.0) * 100.0).round().clamp(0.0, 100.0)
                as u32,
            minutes_invested: task.minutes_invested(now),
        });

        Self {
            capabilities,
            signals: *tracker.signals(),
            energy,
            energy_state: EnergyState::from_score(energy),
            readiness: FocusReadiness::from_score(energy),
            recommendation,
            explanation: recommendation.explain(energy, tracker.signals().error_rate),
            focus_recommended: is_focus_recommended(energy),
            burnout_risk: tracker.burnout_risk(),
            average_recent: tracker.average_recent(),
            burnout_window: tracker.burnout_window(),
            trend: tracker.trend(),
            weekly: WeeklySummary::from_scores(&history),
            history,
            breakdown: tracker.breakdown(),
            task_stats,
            velocity: task_stats.velocity(),
            active_task,
        }
    }

    /// Render every panel, printing unlock hints for locked ones.
    pub fn render_text(&self, chart_width: usize, show_breakdown: bool) -> String {
        let caps = &self.capabilities;
        let rule = "─".repeat(50);
        let mut out = String::new();

        out.push_str("\nCognitive Energy Score\n");
        out.push_str(&rule);
        out.push('\n');
        out.push_str(&format!(
            "  {:.0}/100  {}\n",
            self.energy,
            self.energy_state.label()
        ));
        out.push_str(&format!(
            "  efficiency {:.2}  errors {:.2}  idle {:.2}  switches {}  mood {}\n",
            self.signals.completion_efficiency,
            self.signals.error_rate,
            self.signals.idle_time_ratio,
            self.signals.task_switch_count,
            self.signals.mood_input
        ));
        if show_breakdown {
            out.push_str(&render_breakdown(&self.signals, &self.breakdown));
        }

        out.push_str("\nAdaptive Recommendation\n");
        out.push_str(&rule);
        out.push('\n');
        if caps.adaptive_recommendations {
            out.push_str(&format!("  {}\n", self.recommendation));
            out.push_str(&format!("  Why: {}\n", self.explanation));
        } else {
            out.push_str("  [locked] Sign in to unlock AI-guided workflow adjustments.\n");
        }

        out.push_str("\nTask Workflow\n");
        out.push_str(&rule);
        out.push('\n');
        match &self.active_task {
            Some(task) => out.push_str(&format!(
                "  {} ({})  {}% complete, {} min invested\n",
                task.title, task.load, task.completion_percent, task.minutes_invested
            )),
            None => out.push_str("  No active task\n"),
        }
        out.push_str(&format!(
            "  {} tasks, {} completed, {} active, {} errors\n",
            self.task_stats.total,
            self.task_stats.completed,
            self.task_stats.active,
            self.task_stats.total_errors
        ));
        out.push_str(&format!(
            "  completion rate {:.0}% ({} of {})  quality {:.0}%\n",
            self.velocity.completion_rate * 100.0,
            self.task_stats.completed,
            self.task_stats.completed + self.task_stats.active,
            self.velocity.quality_score * 100.0
        ));

        out.push_str("\nDeep Work Readiness\n");
        out.push_str(&rule);
        out.push('\n');
        out.push_str(&format!("  {}\n", self.readiness.label()));
        if !caps.focus_sessions {
            out.push_str("  [locked] Sign in to enable focus sessions.\n");
        } else if self.focus_recommended {
            out.push_str("  Focus mode recommended for your current energy level\n");
        }

        out.push_str("\nBurnout Risk\n");
        out.push_str(&rule);
        out.push('\n');
        out.push_str(&format!(
            "  {} {}\n",
            self.burnout_risk.indicator(),
            self.burnout_risk.label()
        ));
        if caps.burnout_details {
            let trend = match self.trend {
                EnergyTrend::Improving => "improving",
                EnergyTrend::Declining => "declining",
            };
            out.push_str(&format!(
                "  {}-day average {:.0}, trend {}\n",
                self.burnout_window, self.average_recent, trend
            ));
        }

        out.push_str("\nWeekly Performance Analytics\n");
        out.push_str(&rule);
        out.push('\n');
        if caps.weekly_analytics {
            if let Some(weekly) = &self.weekly {
                out.push_str(&format!(
                    "  avg {:.0}  peak {:.0}  low {:.0}\n",
                    weekly.average, weekly.peak, weekly.low
                ));
            }
            out.push_str(&render_weekly_chart(&self.history, chart_width));
        } else {
            out.push_str("  [locked] Sign in to view detailed performance trends.\n");
        }

        out
    }
}

/// ASCII bar chart of daily scores, oldest first, today last.
pub fn render_weekly_chart(scores: &[f64], width: usize) -> String {
    let mut output = String::new();
    let days = scores.len();
    for (i, score) in scores.iter().enumerate() {
        let clamped = score.clamp(0.0, 100.0);
        let bar_length = ((clamped / 100.0) * width as f64).round() as usize;
        let bar = "█".repeat(bar_length);
        let empty = " ".repeat(width.saturating_sub(bar_length));
        let ago = days - 1 - i;
        let label = if ago == 0 {
            "today".to_string()
        } else {
            format!("-{ago}d")
        };
        output.push_str(&format!("  {label:>5} {bar}{empty} {score:.0}\n"));
    }
    output
}

/// Formula with the current values plugged in.
pub fn render_breakdown(signals: &SignalInput, breakdown: &ScoreBreakdown) -> String {
    format!(
        "  (efficiency × 0.35) + (mood × 0.20) - (errors × 0.25) - (idle × 0.10) - (switches × 0.10)\n  \
         = ({:.2} × 0.35) + ({:.2} × 0.20) - ({:.2} × 0.25) - ({:.2} × 0.10) - ({:.2} × 0.10)\n  \
         = {:.1} + {:.1} - {:.1} - {:.1} - {:.1} = {:.1} -> {:.1}\n",
        signals.completion_efficiency,
        breakdown.normalized_mood,
        signals.error_rate,
        signals.idle_time_ratio,
        breakdown.normalized_switches,
        breakdown.efficiency_points,
        breakdown.mood_points,
        -breakdown.error_points,
        -breakdown.idle_points,
        -breakdown.switch_points,
        breakdown.raw_total,
        breakdown.score,
    )
}

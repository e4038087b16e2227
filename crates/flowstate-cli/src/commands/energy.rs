//! Energy commands: score, recommendation, burnout risk, mock history.

use clap::Subcommand;
use serde_json::json;

use flowstate_core::dashboard::{render_breakdown, render_weekly_chart};
use flowstate_core::energy::ScoreBreakdown;
use flowstate_core::{
    calculate_burnout_risk, get_recommendation, Config, EnergyHistory, SignalInput,
};

use super::SignalArgs;

#[derive(Subcommand)]
pub enum EnergyAction {
    /// Compute the energy score from signals (unset signals use config defaults)
    Score {
        #[command(flatten)]
        signals: SignalArgs,
        /// Print the formula with values plugged in
        #[arg(long)]
        breakdown: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Recommendation for a score and error rate
    Recommend {
        /// Energy score (0-100)
        #[arg(allow_negative_numbers = true)]
        score: f64,
        /// Error rate (0.0-1.0)
        #[arg(allow_negative_numbers = true)]
        error_rate: f64,
    },
    /// Burnout risk from recent daily scores (pass the trailing window, usually 5)
    Burnout {
        /// Daily scores, oldest first
        #[arg(allow_negative_numbers = true)]
        scores: Vec<f64>,
    },
    /// Generate demo history
    History {
        /// Number of days (default: history.seed_days)
        #[arg(long)]
        days: Option<usize>,
        /// Fixed seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,
        /// Draw a bar chart instead of a list
        #[arg(long)]
        chart: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

pub fn run(action: EnergyAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        EnergyAction::Score {
            signals,
            breakdown,
            json,
        } => score(signals, breakdown, json),
        EnergyAction::Recommend { score, error_rate } => {
            println!("{}", get_recommendation(score, error_rate));
            Ok(())
        }
        EnergyAction::Burnout { scores } => {
            let risk = calculate_burnout_risk(&scores);
            println!("{} ({})", risk, risk.label());
            Ok(())
        }
        EnergyAction::History {
            days,
            seed,
            chart,
            json,
        } => history(days, seed, chart, json),
    }
}

fn score(args: SignalArgs, show_breakdown: bool, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let signals: SignalInput = args.to_update().apply_to(config.signals);
    let result = ScoreBreakdown::compute(&signals, &config.scoring_params());
    let recommendation = get_recommendation(result.score, signals.error_rate);
    let explanation = recommendation.explain(result.score, signals.error_rate);

    if json {
        let out = json!({
            "signals": signals,
            "score": result.score,
            "recommendation": recommendation,
            "explanation": explanation,
            "breakdown": result,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!("Energy score: {:.1}/100", result.score);
    println!("Recommendation: {}", recommendation);
    println!("Why: {explanation}");
    if show_breakdown || config.ui.show_breakdown {
        print!("{}", render_breakdown(&signals, &result));
    }
    Ok(())
}

fn history(
    days: Option<usize>,
    seed: Option<u64>,
    chart: bool,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let days = days.unwrap_or(config.history.seed_days);
    // Keep every generated day; the window only bounds the dashboard.
    let capacity = days.max(1);
    let history = match seed.or(config.history.seed) {
        Some(seed) => EnergyHistory::seeded(days, capacity, seed),
        None => EnergyHistory::mock(days, capacity),
    };
    let scores = history.to_vec();

    if json {
        println!("{}", serde_json::to_string_pretty(&scores)?);
    } else if chart {
        print!("{}", render_weekly_chart(&scores, config.ui.chart_width));
    } else {
        for score in &scores {
            println!("{score:.1}");
        }
    }
    Ok(())
}

//! # FlowState Core Library
//!
//! Energy scoring for a self-reported productivity dashboard. The crate is
//! library-first: the `flowstate` CLI is a thin layer over the same types.
//!
//! ## Architecture
//!
//! - **Energy**: pure scoring functions (score, recommendation, burnout risk)
//!   plus the caller-owned tracker and rolling history that feed them
//! - **Task board**: in-memory task list that also derives efficiency and
//!   error-rate signals
//! - **Session**: local mock guest / signed-in session and feature gating
//! - **Dashboard**: snapshot of every derived value and its text rendering
//! - **Storage**: TOML configuration and the client-local data directory
//!
//! ## Key Components
//!
//! - [`calculate_energy_score`]: the energy formula
//! - [`EnergyTracker`]: current signals plus history
//! - [`TaskBoard`]: session task list
//! - [`SessionStore`]: guest / user session
//! - [`Config`]: application configuration

pub mod dashboard;
pub mod energy;
pub mod error;
pub mod session;
pub mod storage;
pub mod task;

pub use dashboard::{DashboardSnapshot, EnergyState, FocusReadiness};
pub use energy::{
    calculate_burnout_risk, calculate_energy_score, generate_mock_energy_data, get_recommendation,
    BurnoutRisk, EnergyHistory, EnergyTracker, Recommendation, ScoringParams, SignalInput,
    SignalUpdate,
};
pub use error::{ConfigError, CoreError, SessionError, ValidationError};
pub use session::{Capabilities, FileSessionStorage, Session, SessionStore};
pub use storage::Config;
pub use task::{Difficulty, Task, TaskBoard, TaskStatus, WorkVelocity};

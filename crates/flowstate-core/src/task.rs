//! In-memory task board.
//!
//! The board lives for one session and is never persisted. Besides plain CRUD
//! it derives the completion-efficiency and error-rate signals that feed the
//! energy formula.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::error::{CoreError, Result, ValidationError};

/// Task status.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    Active,
    Paused,
    Completed,
    Failed,
}

impl Default for TaskStatus {
    fn default() -> Self {
        TaskStatus::Active
    }
}

/// Cognitive load of a task.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Default for Difficulty {
    fn default() -> Self {
        Difficulty::Medium
    }
}

impl Difficulty {
    /// Dashboard label for the task workflow panel.
    pub fn load_label(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Low Load",
            Difficulty::Medium => "Moderate Load",
            Difficulty::Hard => "High Load",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "easy"),
            Difficulty::Medium => write!(f, "medium"),
            Difficulty::Hard => write!(f, "hard"),
        }
    }
}

impl std::str::FromStr for Difficulty {
    type Err = ValidationError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "easy" | "low" => Ok(Difficulty::Easy),
            "medium" | "moderate" => Ok(Difficulty::Medium),
            "hard" | "high" => Ok(Difficulty::Hard),
            _ => Err(ValidationError::InvalidValue {
                field: "difficulty".into(),
                message: format!("expected easy, medium or hard, got '{s}'"),
            }),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Task {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub difficulty: Difficulty,
    /// Progress (0.0-1.0)
    pub progress: Option<f64>,
    /// Time spent in seconds
    pub time_spent: u64,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub failed_at: Option<DateTime<Utc>>,
    pub error_count: u32,
}

impl Task {
    pub fn new(
        title: impl Into<String>,
        description: Option<String>,
        difficulty: Difficulty,
        now: DateTime<Utc>,
    ) -> Self {
        let simple = Uuid::new_v4().simple().to_string();
        Self {
            id: format!("task-{}-{}", now.timestamp_millis(), &simple[..8]),
            title: title.into(),
            description,
            status: TaskStatus::Active,
            difficulty,
            progress: None,
            time_spent: 0,
            created_at: now,
            completed_at: None,
            failed_at: None,
            error_count: 0,
        }
    }

    /// Neither completed nor failed.
    pub fn is_open(&self) -> bool {
        self.completed_at.is_none() && self.failed_at.is_none()
    }

    /// Whole minutes since creation.
    pub fn minutes_invested(&self, now: DateTime<Utc>) -> i64 {
        (now - self.created_at).num_minutes().max(0)
    }
}

/// Fields of a task that [`TaskBoard::update_task`] may overwrite.
#[derive(Debug, Clone, Default)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<TaskStatus>,
    pub difficulty: Option<Difficulty>,
    pub progress: Option<f64>,
    pub time_spent: Option<u64>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskStats {
    pub total: usize,
    pub completed: usize,
    pub active: usize,
    pub total_errors: u32,
}

impl TaskStats {
    pub fn velocity(&self) -> WorkVelocity {
        let started = self.completed + self.active;
        let completion_rate = if started == 0 {
            0.0
        } else {
            self.completed as f64 / started as f64
        };
        let error_rate = if self.completed > 0 {
            self.total_errors as f64 / self.completed as f64
        } else {
            0.0
        };
        WorkVelocity {
            completion_rate,
            error_rate,
            quality_score: 1.0 - error_rate,
        }
    }
}

/// Throughput and quality figures for the Work Velocity panel.
///
/// Unlike [`TaskSignals`] these are not clamped: errors per completed task
/// can exceed 1, which drives the quality score negative.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorkVelocity {
    /// completed / (completed + active), 0 when both are 0
    pub completion_rate: f64,
    /// Errors per completed task, 0 when nothing is completed
    pub error_rate: f64,
    pub quality_score: f64,
}

/// Signals derived from the board.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TaskSignals {
    /// completed / (completed + failed), 1.0 when nothing has finished
    pub completion_efficiency: f64,
    /// Errors per task, capped at 1.0
    pub error_rate: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaskBoard {
    tasks: Vec<Task>,
}

impl TaskBoard {
    pub fn new(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }

    /// Board seeded with the demo tasks, timestamped relative to `now`.
    pub fn with_mock_tasks(now: DateTime<Utc>) -> Self {
        let task = |id: &str,
                    title: &str,
                    description: &str,
                    status: TaskStatus,
                    difficulty: Difficulty,
                    time_spent: u64,
                    created_ago: Duration,
                    completed_ago: Option<Duration>,
                    error_count: u32| Task {
            id: id.to_string(),
            title: title.to_string(),
            description: Some(description.to_string()),
            status,
            difficulty,
            progress: None,
            time_spent,
            created_at: now - created_ago,
            completed_at: completed_ago.map(|ago| now - ago),
            failed_at: None,
            error_count,
        };

        Self::new(vec![
            task(
                "task-1",
                "Design Dashboard Layout",
                "Create responsive design for main dashboard",
                TaskStatus::Completed,
                Difficulty::Hard,
                3600,
                Duration::hours(24),
                Some(Duration::hours(23)),
                1,
            ),
            task(
                "task-2",
                "Implement Energy Calculator",
                "Build the weighted energy formula",
                TaskStatus::Completed,
                Difficulty::Medium,
                2400,
                Duration::hours(23),
                Some(Duration::hours(22)),
                0,
            ),
            task(
                "task-3",
                "Setup Database Schema",
                "Create tables for users and tasks",
                TaskStatus::Active,
                Difficulty::Medium,
                1200,
                Duration::hours(1),
                None,
                2,
            ),
            task(
                "task-4",
                "Write API Documentation",
                "Document all REST endpoints",
                TaskStatus::Active,
                Difficulty::Easy,
                600,
                Duration::minutes(30),
                None,
                0,
            ),
        ])
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    fn get_mut(&mut self, id: &str) -> Result<&mut Task> {
        self.tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| CoreError::TaskNotFound(id.to_string()))
    }

    /// Add a new active task at the top of the board.
    pub fn add_task(
        &mut self,
        title: &str,
        description: Option<String>,
        difficulty: Difficulty,
        now: DateTime<Utc>,
    ) -> Result<&Task> {
        let title = title.trim();
        if title.is_empty() {
            return Err(ValidationError::Empty("title".into()).into());
        }
        let task = Task::new(title, description, difficulty, now);
        tracing::debug!(id = %task.id, "task added");
        self.tasks.insert(0, task);
        Ok(&self.tasks[0])
    }

    pub fn update_task(&mut self, id: &str, patch: TaskPatch) -> Result<&Task> {
        let task = self.get_mut(id)?;
        if let Some(title) = patch.title {
            task.title = title;
        }
        if let Some(description) = patch.description {
            task.description = Some(description);
        }
        if let Some(status) = patch.status {
            task.status = status;
        }
        if let Some(difficulty) = patch.difficulty {
            task.difficulty = difficulty;
        }
        if let Some(progress) = patch.progress {
            task.progress = Some(progress);
        }
        if let Some(time_spent) = patch.time_spent {
            task.time_spent = time_spent;
        }
        Ok(&*task)
    }

    pub fn complete_task(&mut self, id: &str, now: DateTime<Utc>) -> Result<&Task> {
        let task = self.get_mut(id)?;
        task.status = TaskStatus::Completed;
        task.completed_at = Some(now);
        tracing::debug!(id, "task completed");
        Ok(&*task)
    }

    pub fn fail_task(&mut self, id: &str, now: DateTime<Utc>) -> Result<&Task> {
        let task = self.get_mut(id)?;
        task.status = TaskStatus::Failed;
        task.failed_at = Some(now);
        tracing::debug!(id, "task failed");
        Ok(&*task)
    }

    pub fn record_error(&mut self, id: &str) -> Result<&Task> {
        let task = self.get_mut(id)?;
        task.error_count += 1;
        Ok(&*task)
    }

    pub fn delete_task(&mut self, id: &str) -> Result<Task> {
        let pos = self
            .tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| CoreError::TaskNotFound(id.to_string()))?;
        tracing::debug!(id, "task deleted");
        Ok(self.tasks.remove(pos))
    }

    pub fn stats(&self) -> TaskStats {
        TaskStats {
            total: self.tasks.len(),
            completed: self
                .tasks
                .iter()
                .filter(|t| t.status == TaskStatus::Completed)
                .count(),
            active: self
                .tasks
                .iter()
                .filter(|t| t.status == TaskStatus::Active)
                .count(),
            total_errors: self.tasks.iter().map(|t| t.error_count).sum(),
        }
    }

    /// First task that has neither completed nor failed.
    pub fn active_task(&self) -> Option<&Task> {
        self.tasks.iter().find(|t| t.is_open())
    }

    pub fn derived_signals(&self) -> TaskSignals {
        let completed = self
            .tasks
            .iter()
            .filter(|t| t.status == TaskStatus::Completed)
            .count();
        let failed = self
            .tasks
            .iter()
            .filter(|t| t.status == TaskStatus::Failed)
            .count();
        let finished = completed + failed;
        let completion_efficiency = if finished == 0 {
            1.0
        } else {
            completed as f64 / finished as f64
        };

        let total_errors: u32 = self.tasks.iter().map(|t| t.error_count).sum();
        let error_rate = (total_errors as f64 / self.tasks.len().max(1) as f64).min(1.0);

        TaskSignals {
            completion_efficiency,
            error_rate,
        }
    }
}

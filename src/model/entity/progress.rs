use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{
    Identified, Ref, ResourceType, ResourceTyped,
    entity::{Module, Student},
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProgressStatus {
    #[default]
    NotStarted,
    InProgress,
    Completed,
    Paused,
}

impl std::fmt::Display for ProgressStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotStarted => write!(f, "not started"),
            Self::InProgress => write!(f, "in progress"),
            Self::Completed => write!(f, "completed"),
            Self::Paused => write!(f, "paused"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Progress {
    #[serde(rename = "_id", alias = "id", default)]
    pub id: String,
    pub student: Ref<Student>,
    pub module: Ref<Module>,
    #[serde(default)]
    pub status: ProgressStatus,
    #[serde(default)]
    pub current_step: usize,
    #[serde(default)]
    pub score: Option<f64>,
    /// Seconds.
    #[serde(default)]
    pub time_spent: u64,
    #[serde(default)]
    pub completion_percentage: f64,
    #[serde(default)]
    pub last_accessed: Option<DateTime<Utc>>,
}

impl ResourceTyped for Progress {
    fn get_resource_type() -> ResourceType {
        ResourceType::Progress
    }
}

impl Identified for Progress {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Progress {
    pub fn new(student_id: &str, module_id: &str) -> Self {
        Self {
            id: String::new(),
            student: Ref::Id(student_id.to_string()),
            module: Ref::Id(module_id.to_string()),
            status: ProgressStatus::NotStarted,
            current_step: 0,
            score: None,
            time_spent: 0,
            completion_percentage: 0.0,
            last_accessed: None,
        }
    }

    pub fn is_completed(&self) -> bool {
        self.status == ProgressStatus::Completed
    }

    /// Moves to `step` (zero based) of a module with `total_steps` steps.
    ///
    /// Going back to an earlier step is allowed, the percentage never goes down.
    pub fn advance_to(&mut self, step: usize, total_steps: usize) {
        if total_steps == 0 {
            return;
        }

        let step = step.min(total_steps - 1);
        self.current_step = step;

        let reached = (100.0 * (step + 1) as f64 / total_steps as f64).round().min(100.0);
        if reached > self.completion_percentage {
            self.completion_percentage = reached;
        }

        self.status = if self.completion_percentage >= 100.0 {
            ProgressStatus::Completed
        } else {
            ProgressStatus::InProgress
        };
        self.last_accessed = Some(Utc::now());
    }

    pub fn add_time(&mut self, seconds: u64) {
        self.time_spent = self.time_spent.saturating_add(seconds);
    }

    pub fn pause(&mut self) {
        if !self.is_completed() {
            self.status = ProgressStatus::Paused;
        }
    }

    pub fn to_update(&self) -> ProgressUpdate {
        ProgressUpdate {
            module_id: self.module.id().to_string(),
            student_id: Some(self.student.id().to_string()),
            status: Some(self.status),
            current_step: Some(self.current_step),
            score: self.score,
            time_spent: Some(self.time_spent),
            completion_percentage: Some(self.completion_percentage),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressStart {
    pub module_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressUpdate {
    pub module_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub student_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ProgressStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_step: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_spent: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completion_percentage: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoProgressUpdate {
    pub module_id: String,
    pub video_id: String,
    pub percentage: f64,
}

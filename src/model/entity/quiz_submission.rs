use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{
    Identified, Ref, ResourceType, ResourceTyped,
    entity::{AnswerValue, Module, Student},
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmittedAnswer {
    pub question_id: String,
    pub answer: Option<AnswerValue>,
    pub is_correct: bool,
}

/// A graded quiz attempt. The student writes it once; students and teachers read it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizSubmission {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub student: Ref<Student>,
    pub module: Ref<Module>,
    #[serde(default)]
    pub answers: Vec<SubmittedAnswer>,
    #[serde(default)]
    pub score: f64,
    #[serde(default)]
    pub total_questions: usize,
    #[serde(default)]
    pub correct_answers: usize,
    #[serde(default)]
    pub percentage: u32,
    #[serde(default)]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub submitted_at: Option<DateTime<Utc>>,
}

impl ResourceTyped for QuizSubmission {
    fn get_resource_type() -> ResourceType {
        ResourceType::QuizSubmission
    }
}

impl Identified for QuizSubmission {
    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizSubmissionCreate {
    pub module_id: String,
    pub answers: Vec<SubmittedAnswer>,
    pub score: f64,
    pub total_questions: usize,
    pub correct_answers: usize,
    pub percentage: u32,
    pub started_at: DateTime<Utc>,
    pub submitted_at: DateTime<Utc>,
}

use crate::{
    api::{ApiClient, ApiResult},
    model::{
        ResourceTyped,
        entity::{QuizSubmission, QuizSubmissionCreate},
    },
};

/// `quizAPI`: graded quiz submissions.
#[derive(Debug, Clone, Copy)]
pub struct QuizApi<'a> {
    client: &'a ApiClient,
}

impl<'a> QuizApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    #[tracing::instrument(skip(self, submission), fields(module_id = %submission.module_id, percentage = submission.percentage))]
    pub async fn submit(self, submission: &QuizSubmissionCreate) -> ApiResult<QuizSubmission> {
        self.client
            .post(&["quiz", "submit"], submission, QuizSubmission::get_resource_type())
            .await
    }

    pub async fn for_student(self, student_id: &str) -> ApiResult<Vec<QuizSubmission>> {
        self.client
            .get(&["quiz", "student", student_id], &[], QuizSubmission::get_resource_type())
            .await
    }

    pub async fn for_module(self, module_id: &str) -> ApiResult<Vec<QuizSubmission>> {
        self.client
            .get(&["quiz", "module", module_id], &[], QuizSubmission::get_resource_type())
            .await
    }

    pub async fn get(self, id: &str) -> ApiResult<QuizSubmission> {
        self.client
            .get(&["quiz", id], &[], QuizSubmission::get_resource_type())
            .await
    }
}

use reqwest::StatusCode;

use crate::{
    api::{ApiClient, ApiResult},
    model::{
        ResourceTyped,
        entity::{Progress, ProgressStart, ProgressUpdate, VideoProgressUpdate},
    },
};

/// `progressAPI`: per student, per module completion records.
#[derive(Debug, Clone, Copy)]
pub struct ProgressApi<'a> {
    client: &'a ApiClient,
}

impl<'a> ProgressApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn for_student(self, student_id: &str) -> ApiResult<Vec<Progress>> {
        self.client
            .get(&["progress", "student", student_id], &[], Progress::get_resource_type())
            .await
    }

    pub async fn get(self, student_id: &str, module_id: &str) -> ApiResult<Progress> {
        self.client
            .get(&["progress", student_id, module_id], &[], Progress::get_resource_type())
            .await
    }

    #[tracing::instrument(skip(self))]
    pub async fn start(self, module_id: &str) -> ApiResult<Progress> {
        let body = ProgressStart {
            module_id: module_id.to_string(),
        };
        self.client
            .post(&["progress", "start"], &body, Progress::get_resource_type())
            .await
    }

    /// Existing progress for the module, or a freshly started record when the student never
    /// opened it (the API answers 404).
    pub async fn get_or_start(self, student_id: &str, module_id: &str) -> ApiResult<Progress> {
        match self.get(student_id, module_id).await {
            Err(e) if e.status_code() == Some(StatusCode::NOT_FOUND) => {
                tracing::debug!(module_id, "no progress yet, starting the module");
                self.start(module_id).await
            }
            other => other,
        }
    }

    #[tracing::instrument(skip(self, update), fields(module_id = %update.module_id))]
    pub async fn update(self, update: &ProgressUpdate) -> ApiResult<Progress> {
        self.client
            .put(&["progress", "update"], update, Progress::get_resource_type())
            .await
    }

    #[tracing::instrument(skip(self))]
    pub async fn sync_video(self, module_id: &str, video_id: &str, percentage: f64) -> ApiResult<()> {
        let body = VideoProgressUpdate {
            module_id: module_id.to_string(),
            video_id: video_id.to_string(),
            percentage,
        };
        let _: serde_json::Value = self
            .client
            .put(&["progress", "video"], &body, Progress::get_resource_type())
            .await?;
        Ok(())
    }
}

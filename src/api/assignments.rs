use crate::{
    api::{ApiClient, ApiResult},
    model::{
        ResourceTyped,
        entity::{Assignment, AssignmentCreate},
    },
};

/// `assignmentAPI`: modules a teacher hands to some of their students.
#[derive(Debug, Clone, Copy)]
pub struct AssignmentApi<'a> {
    client: &'a ApiClient,
}

impl<'a> AssignmentApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(self) -> ApiResult<Vec<Assignment>> {
        self.client
            .get(&["assignments"], &[], Assignment::get_resource_type())
            .await
    }

    pub async fn for_student(self, student_id: &str) -> ApiResult<Vec<Assignment>> {
        self.client
            .get(&["assignments", "student", student_id], &[], Assignment::get_resource_type())
            .await
    }

    #[tracing::instrument(skip(self, data), fields(module_id = %data.module_id))]
    pub async fn create(self, data: &AssignmentCreate) -> ApiResult<Assignment> {
        self.client
            .post(&["assignments"], data, Assignment::get_resource_type())
            .await
    }

    pub async fn delete(self, id: &str) -> ApiResult<()> {
        self.client
            .delete(&["assignments", id], Assignment::get_resource_type())
            .await
    }
}

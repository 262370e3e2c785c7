use crate::{
    api::{ApiClient, ApiResult},
    model::{
        ResourceTyped,
        entity::{Module, ModuleCreate, ModuleFilter},
    },
};

/// `moduleAPI`: teachers author modules, students read them.
#[derive(Debug, Clone, Copy)]
pub struct ModuleApi<'a> {
    client: &'a ApiClient,
}

impl<'a> ModuleApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    #[tracing::instrument(skip(self))]
    pub async fn list(self, filter: &ModuleFilter) -> ApiResult<Vec<Module>> {
        self.client
            .get(&["modules"], &filter.query_pairs(), Module::get_resource_type())
            .await
    }

    pub async fn get(self, id: &str) -> ApiResult<Module> {
        self.client
            .get(&["modules", id], &[], Module::get_resource_type())
            .await
    }

    #[tracing::instrument(skip(self, data), fields(title = %data.title))]
    pub async fn create(self, data: &ModuleCreate) -> ApiResult<Module> {
        self.client
            .post(&["modules"], data, Module::get_resource_type())
            .await
    }

    #[tracing::instrument(skip(self, data))]
    pub async fn update(self, id: &str, data: &ModuleCreate) -> ApiResult<Module> {
        self.client
            .put(&["modules", id], data, Module::get_resource_type())
            .await
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete(self, id: &str) -> ApiResult<()> {
        self.client
            .delete(&["modules", id], Module::get_resource_type())
            .await
    }
}

use std::{sync::Arc, time::Duration};

use reqwest::{Method, header};
use serde::{Serialize, de::DeserializeOwned};
use url::Url;
use uuid::Uuid;

use crate::{
    api::{
        ApiError, ApiResult, AssignmentApi, AuthApi, ModuleApi, ProgressApi, QuizApi, UserApi,
    },
    auth::SessionStore,
    config::Config,
    error::AppResult,
    model::ResourceType,
    storage::LocalStorage,
};

pub static REQUEST_ID_HEADER: &str = "x-request-id";

/// Typed client for the LexiLearn REST API.
///
/// Cloning is cheap, the underlying `reqwest::Client` is reference counted.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    session: SessionStore,
}

impl ApiClient {
    pub fn new(base_url: Url, storage: Arc<dyn LocalStorage>, timeout: Duration) -> ApiResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("lexilearn/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url,
            session: SessionStore::new(storage),
        })
    }

    pub fn from_config(config: &Config, storage: Arc<dyn LocalStorage>) -> AppResult<Self> {
        let url = config.api_url()?;
        Ok(Self::new(url, storage, config.api().timeout())?)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn auth(&self) -> AuthApi<'_> {
        AuthApi::new(self)
    }

    pub fn users(&self) -> UserApi<'_> {
        UserApi::new(self)
    }

    pub fn modules(&self) -> ModuleApi<'_> {
        ModuleApi::new(self)
    }

    pub fn progress(&self) -> ProgressApi<'_> {
        ProgressApi::new(self)
    }

    pub fn quiz(&self) -> QuizApi<'_> {
        QuizApi::new(self)
    }

    pub fn assignments(&self) -> AssignmentApi<'_> {
        AssignmentApi::new(self)
    }

    /// Joins path segments onto the base url, escaping each segment.
    pub fn endpoint(&self, segments: &[&str]) -> ApiResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::ApiInvalidEndpoint(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        query: &[(&str, String)],
        resource_type: ResourceType,
    ) -> ApiResult<T> {
        self.request::<T, ()>(Method::GET, segments, query, None, resource_type)
            .await
    }

    pub(crate) async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        segments: &[&str],
        body: &B,
        resource_type: ResourceType,
    ) -> ApiResult<T> {
        self.request(Method::POST, segments, &[], Some(body), resource_type)
            .await
    }

    pub(crate) async fn put<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        segments: &[&str],
        body: &B,
        resource_type: ResourceType,
    ) -> ApiResult<T> {
        self.request(Method::PUT, segments, &[], Some(body), resource_type)
            .await
    }

    pub(crate) async fn delete(
        &self,
        segments: &[&str],
        resource_type: ResourceType,
    ) -> ApiResult<()> {
        self.request::<serde_json::Value, ()>(Method::DELETE, segments, &[], None, resource_type)
            .await?;
        Ok(())
    }

    #[tracing::instrument(skip(self, query, body), fields(request_id))]
    async fn request<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        method: Method,
        segments: &[&str],
        query: &[(&str, String)],
        body: Option<&B>,
        resource_type: ResourceType,
    ) -> ApiResult<T> {
        let url = self.endpoint(segments)?;
        let request_id = Uuid::new_v4();
        tracing::Span::current().record("request_id", tracing::field::display(request_id));

        let mut request = self
            .http
            .request(method.clone(), url)
            .header(REQUEST_ID_HEADER, request_id.to_string())
            .header(header::ACCEPT, "application/json");

        if !query.is_empty() {
            request = request.query(query);
        }

        if let Some(token) = self.session.token()? {
            request = request.bearer_auth(token);
        }

        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;
        tracing::debug!("{} -> {}", method, status);

        if !status.is_success() {
            let error = ApiError::from_response(status, &bytes);
            tracing::warn!("{} request failed: {}", resource_type, error);
            return Err(error);
        }

        let bytes: &[u8] = if bytes.is_empty() { b"null" } else { &bytes };
        serde_json::from_slice(bytes).map_err(|error| ApiError::ApiDecodeError {
            resource_type,
            error,
        })
    }
}

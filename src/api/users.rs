use crate::{
    api::{ApiClient, ApiResult},
    auth::AuthError,
    model::{
        ResourceType, ResourceTyped,
        entity::{ProfileUpdate, SessionUser, Student, StudentCreate, Teacher, UserSettings, UserType},
    },
};

/// `userAPI`: profile and settings of the signed in user, a teacher's students.
#[derive(Debug, Clone, Copy)]
pub struct UserApi<'a> {
    client: &'a ApiClient,
}

impl<'a> UserApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    fn session_user_type(&self) -> ApiResult<UserType> {
        self.client
            .session()
            .user_type()?
            .ok_or_else(|| AuthError::AuthenticationRequired.into())
    }

    pub async fn me_student(self) -> ApiResult<Student> {
        self.client
            .get(&["users", "profile"], &[], Student::get_resource_type())
            .await
    }

    pub async fn me_teacher(self) -> ApiResult<Teacher> {
        self.client
            .get(&["users", "profile"], &[], Teacher::get_resource_type())
            .await
    }

    /// Fetches the profile of whoever is signed in and refreshes the cached session user.
    #[tracing::instrument(skip(self))]
    pub async fn profile(self) -> ApiResult<SessionUser> {
        let user = match self.session_user_type()? {
            UserType::Student => SessionUser::Student(self.me_student().await?),
            UserType::Teacher => SessionUser::Teacher(self.me_teacher().await?),
        };

        self.client.session().update_user(&user)?;
        Ok(user)
    }

    #[tracing::instrument(skip(self, patch))]
    pub async fn update_profile(self, patch: &ProfileUpdate) -> ApiResult<SessionUser> {
        let user = match self.session_user_type()? {
            UserType::Student => SessionUser::Student(
                self.client
                    .put(&["users", "profile"], patch, Student::get_resource_type())
                    .await?,
            ),
            UserType::Teacher => SessionUser::Teacher(
                self.client
                    .put(&["users", "profile"], patch, Teacher::get_resource_type())
                    .await?,
            ),
        };

        self.client.session().update_user(&user)?;
        Ok(user)
    }

    #[tracing::instrument(skip(self, settings))]
    pub async fn update_settings(self, settings: &UserSettings) -> ApiResult<UserSettings> {
        let saved: UserSettings = self
            .client
            .put(&["users", "settings"], settings, ResourceType::Session)
            .await?;

        if let Some(mut user) = self.client.session().user()? {
            match &mut user {
                SessionUser::Student(s) => s.settings = saved.clone(),
                SessionUser::Teacher(t) => t.settings = saved.clone(),
            }
            self.client.session().update_user(&user)?;
        }

        Ok(saved)
    }

    pub async fn list_students(self) -> ApiResult<Vec<Student>> {
        self.client
            .get(&["users", "students"], &[], Student::get_resource_type())
            .await
    }

    pub async fn get_student(self, id: &str) -> ApiResult<Student> {
        self.client
            .get(&["users", "students", id], &[], Student::get_resource_type())
            .await
    }

    /// Creates a student; the response carries the generated secret code.
    #[tracing::instrument(skip(self, data), fields(name = %data.name))]
    pub async fn create_student(self, data: &StudentCreate) -> ApiResult<Student> {
        self.client
            .post(&["users", "students"], data, Student::get_resource_type())
            .await
    }

    pub async fn delete_student(self, id: &str) -> ApiResult<()> {
        self.client
            .delete(&["users", "students", id], Student::get_resource_type())
            .await
    }

    pub async fn regenerate_secret_code(self, id: &str) -> ApiResult<Student> {
        self.client
            .post(
                &["users", "students", id, "regenerate-code"],
                &serde_json::json!({}),
                Student::get_resource_type(),
            )
            .await
    }
}

use serde::{Deserialize, Serialize};

use crate::{
    api::{ApiClient, ApiResult},
    model::{
        ResourceType,
        entity::{SessionUser, Student, Teacher, TeacherRegister, UserType},
    },
};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct StudentLoginBody<'a> {
    secret_code: &'a str,
}

#[derive(Debug, Serialize)]
struct TeacherLoginBody<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct StudentLoginResponse {
    token: String,
    student: Student,
}

#[derive(Debug, Deserialize)]
struct TeacherLoginResponse {
    token: String,
    teacher: Teacher,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyResponse {
    pub valid: bool,
    #[serde(default)]
    pub user_type: Option<UserType>,
}

/// `authAPI`: logging in stores the session, logging out forgets it.
#[derive(Debug, Clone, Copy)]
pub struct AuthApi<'a> {
    client: &'a ApiClient,
}

impl<'a> AuthApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    #[tracing::instrument(skip_all)]
    pub async fn student_login(self, secret_code: &str) -> ApiResult<Student> {
        let body = StudentLoginBody {
            secret_code: secret_code.trim(),
        };
        let res: StudentLoginResponse = self
            .client
            .post(&["auth", "student", "login"], &body, ResourceType::Session)
            .await?;

        let user = SessionUser::Student(res.student.clone());
        self.client.session().save(&res.token, &user)?;
        tracing::info!("student signed in");
        Ok(res.student)
    }

    #[tracing::instrument(skip(self, password))]
    pub async fn teacher_login(self, email: &str, password: &str) -> ApiResult<Teacher> {
        let body = TeacherLoginBody { email, password };
        let res: TeacherLoginResponse = self
            .client
            .post(&["auth", "teacher", "login"], &body, ResourceType::Session)
            .await?;

        self.save_teacher(res)
    }

    #[tracing::instrument(skip(self, data), fields(email = %data.email))]
    pub async fn teacher_register(self, data: &TeacherRegister) -> ApiResult<Teacher> {
        let res: TeacherLoginResponse = self
            .client
            .post(&["auth", "teacher", "register"], data, ResourceType::Session)
            .await?;

        self.save_teacher(res)
    }

    /// Asks the server whether the stored token is still accepted.
    pub async fn verify(self) -> ApiResult<VerifyResponse> {
        self.client
            .get(&["auth", "verify"], &[], ResourceType::Session)
            .await
    }

    pub fn logout(&self) -> ApiResult<()> {
        self.client.session().clear()?;
        tracing::info!("signed out");
        Ok(())
    }

    fn save_teacher(&self, res: TeacherLoginResponse) -> ApiResult<Teacher> {
        let user = SessionUser::Teacher(res.teacher.clone());
        self.client.session().save(&res.token, &user)?;
        tracing::info!("teacher signed in");
        Ok(res.teacher)
    }
}

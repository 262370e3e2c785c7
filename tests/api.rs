mod common;

use axum::http::{Method, StatusCode};
use lexilearn::{
    api::{ApiError, REQUEST_ID_HEADER},
    auth::{AuthError, TOKEN_KEY, USER_TYPE_KEY},
    model::{
        Identified,
        entity::{
            Difficulty, ModuleFilter, Progress, SessionUser, StudentCreate, UserSettings, UserType,
        },
    },
    quiz::QuizAttempt,
    storage::LocalStorage,
};
use serde_json::json;

use crate::common::{
    MockApi, Reply, login_student, module_json, progress_json, student_json, teacher_json,
};

#[tokio::test]
async fn student_login_stores_session_test() {
    let api = MockApi::start().await;
    let (client, storage) = api.client();

    login_student(&api, &client).await;

    let login = api.last_request();
    assert_eq!(login.method, Method::POST);
    assert_eq!(login.path, "/api/auth/student/login");
    assert_eq!(login.body, json!({ "secretCode": "ABC123" }));
    assert!(login.header("authorization").is_none());

    assert_eq!(
        storage.get_item(TOKEN_KEY).unwrap().as_deref(),
        Some("student-token")
    );
    assert_eq!(
        storage.get_item(USER_TYPE_KEY).unwrap().as_deref(),
        Some("student")
    );

    let session = client.session().require(Some(UserType::Student)).unwrap();
    assert_eq!(session.user().id(), "s1");
    assert_eq!(session.user().name(), "Ada");
}

#[tokio::test]
async fn requests_carry_token_and_request_id_test() {
    let api = MockApi::start().await;
    let (client, _) = api.client();
    login_student(&api, &client).await;

    api.on(Method::GET, "/modules/m1", Reply::ok(module_json()));
    let module = client.modules().get("m1").await.unwrap();
    assert_eq!(module.title, "Short vowels");
    assert_eq!(module.total_steps(), 3);

    let req = api.last_request();
    assert_eq!(req.header("authorization"), Some("Bearer student-token"));
    let request_id = req.header(REQUEST_ID_HEADER).unwrap();
    assert!(uuid::Uuid::parse_str(request_id).is_ok());
}

#[tokio::test]
async fn teacher_login_and_logout_test() {
    let api = MockApi::start().await;
    let (client, storage) = api.client();

    api.on(
        Method::POST,
        "/auth/teacher/login",
        Reply::ok(json!({ "token": "teacher-token", "teacher": teacher_json() })),
    );
    let teacher = client
        .auth()
        .teacher_login("lee@school.test", "hunter2")
        .await
        .unwrap();
    assert_eq!(teacher.email, "lee@school.test");
    assert_eq!(
        api.last_request().body,
        json!({ "email": "lee@school.test", "password": "hunter2" })
    );
    assert_eq!(client.session().user_type().unwrap(), Some(UserType::Teacher));

    client.auth().logout().unwrap();
    assert!(storage.is_empty());
    assert!(matches!(
        client.session().require(None),
        Err(AuthError::AuthenticationRequired)
    ));
}

#[tokio::test]
async fn login_error_uses_server_message_test() {
    let api = MockApi::start().await;
    let (client, storage) = api.client();

    api.on(
        Method::POST,
        "/auth/student/login",
        Reply::status(
            StatusCode::BAD_REQUEST,
            json!({ "error": "Invalid secret code", "message": "ignored" }),
        ),
    );

    let err = client.auth().student_login("nope").await.unwrap_err();
    assert_eq!(err.to_string(), "Invalid secret code");
    assert_eq!(err.status_code(), Some(StatusCode::BAD_REQUEST));
    assert_eq!(
        err.client_display(),
        "Oops! Something went wrong: Invalid secret code"
    );
    assert!(storage.is_empty());
}

#[tokio::test]
async fn unauthorized_is_auth_failure_test() {
    let api = MockApi::start().await;
    let (client, _) = api.client();
    login_student(&api, &client).await;

    api.on(
        Method::GET,
        "/progress/student/s1",
        Reply::status(StatusCode::UNAUTHORIZED, json!({ "message": "Token expired" })),
    );

    let err = client.progress().for_student("s1").await.unwrap_err();
    assert!(matches!(err, ApiError::ApiUnauthorized { .. }));
    assert!(err.is_auth_failure());
    assert_eq!(err.to_string(), "Token expired");
}

#[tokio::test]
async fn module_list_filter_query_test() {
    let api = MockApi::start().await;
    let (client, _) = api.client();
    login_student(&api, &client).await;

    api.on(Method::GET, "/modules", Reply::ok(json!([module_json()])));

    let filter = ModuleFilter {
        category: Some("phonics".into()),
        difficulty: Some(Difficulty::Beginner),
        grade_level: Some(2),
    };
    let modules = client.modules().list(&filter).await.unwrap();
    assert_eq!(modules.len(), 1);
    assert_eq!(modules[0].find_video("v1").unwrap().duration, Some(90.0));

    let req = api.last_request();
    assert_eq!(
        req.query.as_deref(),
        Some("category=phonics&difficulty=beginner&gradeLevel=2")
    );

    client.modules().list(&ModuleFilter::default()).await.unwrap();
    assert_eq!(api.last_request().query, None);
}

#[tokio::test]
async fn progress_update_test() {
    let api = MockApi::start().await;
    let (client, _) = api.client();
    login_student(&api, &client).await;

    api.on(Method::GET, "/progress/s1/m1", Reply::ok(progress_json(0, 33.0)));
    api.on(Method::PUT, "/progress/update", Reply::ok(progress_json(2, 100.0)));

    let mut progress: Progress = client.progress().get("s1", "m1").await.unwrap();
    assert_eq!(progress.module.populated().unwrap().title, "Short vowels");

    progress.advance_to(2, 3);
    progress.add_time(30);
    let saved = client.progress().update(&progress.to_update()).await.unwrap();
    assert!(saved.is_completed());

    let req = api.last_request();
    assert_eq!(req.method, Method::PUT);
    assert_eq!(req.body["moduleId"], "m1");
    assert_eq!(req.body["currentStep"], 2);
    assert_eq!(req.body["completionPercentage"], 100.0);
    assert_eq!(req.body["timeSpent"], 150);
    assert_eq!(req.body["status"], "completed");
}

#[tokio::test]
async fn quiz_submit_test() {
    let api = MockApi::start().await;
    let (client, _) = api.client();
    login_student(&api, &client).await;

    api.on(Method::GET, "/modules/m1", Reply::ok(module_json()));
    api.on(
        Method::POST,
        "/quiz/submit",
        Reply::status(
            StatusCode::CREATED,
            json!({ "_id": "qs1", "student": "s1", "module": "m1", "percentage": 67, "correctAnswers": 2, "totalQuestions": 3 }),
        ),
    );

    let module = client.modules().get("m1").await.unwrap();
    let questions = module.quiz_questions().into_iter().cloned().collect();
    let mut attempt = QuizAttempt::start(&module.id, questions);
    assert!(attempt.answer(0, 0.into()));
    assert!(attempt.answer(1, 0.into()));
    assert!(attempt.answer(2, " Dog ".into()));

    let (result, submission) = attempt.finish();
    assert_eq!(result.correct, 2);
    assert_eq!(result.percentage, 67);

    let saved = client.quiz().submit(&submission).await.unwrap();
    assert_eq!(saved.id, "qs1");

    let req = api.last_request();
    assert_eq!(req.body["moduleId"], "m1");
    assert_eq!(req.body["percentage"], 67);
    assert_eq!(req.body["totalQuestions"], 3);
    assert_eq!(req.body["answers"][1]["questionId"], "q2");
    assert_eq!(req.body["answers"][1]["isCorrect"], false);
}

#[tokio::test]
async fn profile_refreshes_cached_user_test() {
    let api = MockApi::start().await;
    let (client, _) = api.client();
    login_student(&api, &client).await;

    let mut updated = student_json();
    updated["name"] = json!("Ada L.");
    api.on(Method::GET, "/users/profile", Reply::ok(updated));

    let user = client.users().profile().await.unwrap();
    assert!(matches!(user, SessionUser::Student(_)));
    assert_eq!(client.session().user().unwrap().unwrap().name(), "Ada L.");

    api.on(
        Method::PUT,
        "/users/settings",
        Reply::ok(json!({ "fontSize": 22, "textToSpeech": false, "colorOverlay": "cream" })),
    );
    let settings = UserSettings {
        font_size: Some(22),
        color_overlay: Some("cream".into()),
        ..Default::default()
    };
    client.users().update_settings(&settings).await.unwrap();

    match client.session().user().unwrap().unwrap() {
        SessionUser::Student(s) => {
            assert_eq!(s.settings.font_size, Some(22));
            assert_eq!(s.settings.color_overlay.as_deref(), Some("cream"));
        }
        other => panic!("unexpected session user {other:?}"),
    }
}

#[tokio::test]
async fn teacher_manages_students_test() {
    let api = MockApi::start().await;
    let (client, _) = api.client();

    api.on(
        Method::POST,
        "/auth/teacher/login",
        Reply::ok(json!({ "token": "teacher-token", "teacher": teacher_json() })),
    );
    client.auth().teacher_login("lee@school.test", "pw").await.unwrap();

    let mut created = student_json();
    created["secretCode"] = json!("XYZ789");
    api.on(Method::POST, "/users/students", Reply::status(StatusCode::CREATED, created));
    let student = client
        .users()
        .create_student(&StudentCreate {
            name: "Ada".into(),
            grade: Some(3),
        })
        .await
        .unwrap();
    assert_eq!(student.secret_code.as_deref(), Some("XYZ789"));

    api.on(Method::DELETE, "/users/students/s1", Reply::empty(StatusCode::NO_CONTENT));
    client.users().delete_student("s1").await.unwrap();
    let req = api.last_request();
    assert_eq!(req.method, Method::DELETE);
    assert_eq!(req.header("authorization"), Some("Bearer teacher-token"));
}

#[tokio::test]
async fn unknown_route_is_not_found_test() {
    let api = MockApi::start().await;
    let (client, _) = api.client();
    login_student(&api, &client).await;

    let err = client.assignments().for_student("s1").await.unwrap_err();
    assert_eq!(err.status_code(), Some(StatusCode::NOT_FOUND));
    assert_eq!(err.to_string(), "Route not found");
    assert!(!err.is_auth_failure());
}

#[tokio::test]
async fn verify_and_regenerate_code_test() {
    let api = MockApi::start().await;
    let (client, _) = api.client();

    api.on(
        Method::POST,
        "/auth/teacher/login",
        Reply::ok(json!({ "token": "teacher-token", "teacher": teacher_json() })),
    );
    client.auth().teacher_login("lee@school.test", "pw").await.unwrap();

    api.on(
        Method::GET,
        "/auth/verify",
        Reply::ok(json!({ "valid": true, "userType": "teacher" })),
    );
    let verified = client.auth().verify().await.unwrap();
    assert!(verified.valid);
    assert_eq!(verified.user_type, Some(UserType::Teacher));

    let mut student = student_json();
    student["secretCode"] = json!("NEW456");
    api.on(
        Method::POST,
        "/users/students/s1/regenerate-code",
        Reply::ok(student),
    );
    let student = client.users().regenerate_secret_code("s1").await.unwrap();
    assert_eq!(student.secret_code.as_deref(), Some("NEW456"));
    assert_eq!(api.last_request().body, json!({}));
}

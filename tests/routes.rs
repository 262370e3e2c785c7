mod common;

use axum::http::{Method, StatusCode};
use chrono::{TimeZone, Utc};
use lexilearn::model::entity::{
    AssignmentCreate, Module, ModuleCreate, ProgressStatus, TeacherRegister, UserType,
};
use serde_json::json;

use crate::common::{MockApi, Reply, login_student, module_json, progress_json, teacher_json};

fn submission_json(id: &str) -> serde_json::Value {
    json!({
        "_id": id,
        "student": { "_id": "s1", "name": "Ada" },
        "module": "m1",
        "answers": [{ "questionId": "q1", "answer": 0, "isCorrect": true }],
        "score": 1.0,
        "totalQuestions": 1,
        "correctAnswers": 1,
        "percentage": 100,
        "submittedAt": "2024-03-02T09:30:00Z"
    })
}

#[tokio::test]
async fn get_or_start_existing_progress_test() {
    let api = MockApi::start().await;
    let (client, _) = api.client();
    login_student(&api, &client).await;

    api.on(Method::GET, "/progress/s1/m1", Reply::ok(progress_json(1, 67.0)));

    let progress = client.progress().get_or_start("s1", "m1").await.unwrap();
    assert_eq!(progress.current_step, 1);

    let req = api.last_request();
    assert_eq!(req.method, Method::GET);
    assert_eq!(req.path, "/api/progress/s1/m1");
    assert!(api.requests().iter().all(|r| r.path != "/api/progress/start"));
}

#[tokio::test]
async fn get_or_start_missing_progress_test() {
    let api = MockApi::start().await;
    let (client, _) = api.client();
    login_student(&api, &client).await;

    api.on(
        Method::GET,
        "/progress/s1/m1",
        Reply::status(StatusCode::NOT_FOUND, json!({ "error": "Progress not found" })),
    );
    api.on(
        Method::POST,
        "/progress/start",
        Reply::status(
            StatusCode::CREATED,
            json!({ "_id": "p9", "student": "s1", "module": "m1", "status": "in-progress" }),
        ),
    );

    let progress = client.progress().get_or_start("s1", "m1").await.unwrap();
    assert_eq!(progress.id, "p9");
    assert_eq!(progress.status, ProgressStatus::InProgress);

    let req = api.last_request();
    assert_eq!(req.method, Method::POST);
    assert_eq!(req.path, "/api/progress/start");
    assert_eq!(req.body, json!({ "moduleId": "m1" }));
}

#[tokio::test]
async fn get_or_start_other_errors_test() {
    let api = MockApi::start().await;
    let (client, _) = api.client();
    login_student(&api, &client).await;

    api.on(
        Method::GET,
        "/progress/s1/m1",
        Reply::status(StatusCode::INTERNAL_SERVER_ERROR, json!({ "error": "db down" })),
    );

    let err = client.progress().get_or_start("s1", "m1").await.unwrap_err();
    assert_eq!(err.status_code(), Some(StatusCode::INTERNAL_SERVER_ERROR));
    assert!(api.requests().iter().all(|r| r.path != "/api/progress/start"));
}

#[tokio::test]
async fn teacher_register_test() {
    let api = MockApi::start().await;
    let (client, _) = api.client();

    api.on(
        Method::POST,
        "/auth/teacher/register",
        Reply::status(
            StatusCode::CREATED,
            json!({ "token": "fresh-token", "teacher": teacher_json() }),
        ),
    );

    let teacher = client
        .auth()
        .teacher_register(&TeacherRegister {
            name: "Ms. Lee".into(),
            email: "lee@school.test".into(),
            password: "hunter2".into(),
            school: Some("Hill Primary".into()),
        })
        .await
        .unwrap();
    assert_eq!(teacher.id, "t1");

    let req = api.last_request();
    assert_eq!(req.method, Method::POST);
    assert_eq!(req.path, "/api/auth/teacher/register");
    assert_eq!(
        req.body,
        json!({
            "name": "Ms. Lee",
            "email": "lee@school.test",
            "password": "hunter2",
            "school": "Hill Primary"
        })
    );

    assert_eq!(client.session().token().unwrap().as_deref(), Some("fresh-token"));
    assert_eq!(client.session().user_type().unwrap(), Some(UserType::Teacher));
}

#[tokio::test]
async fn module_authoring_test() {
    let api = MockApi::start().await;
    let (client, _) = api.client();
    login_student(&api, &client).await;

    let module: Module = serde_json::from_value(module_json()).unwrap();
    let mut data = ModuleCreate::from(&module);

    api.on(Method::POST, "/modules", Reply::status(StatusCode::CREATED, module_json()));
    let created = client.modules().create(&data).await.unwrap();
    assert_eq!(created.id, "m1");

    let req = api.last_request();
    assert_eq!(req.method, Method::POST);
    assert_eq!(req.path, "/api/modules");
    assert_eq!(req.body["title"], "Short vowels");
    assert_eq!(req.body["difficulty"], "beginner");
    assert_eq!(req.body["gradeLevel"], 2);
    assert_eq!(req.body["content"][1]["type"], "video");
    assert_eq!(req.body["isPublished"], true);

    data.title = "Short vowels, part 2".into();
    let mut updated = module_json();
    updated["title"] = json!("Short vowels, part 2");
    api.on(Method::PUT, "/modules/m1", Reply::ok(updated));
    let saved = client.modules().update("m1", &data).await.unwrap();
    assert_eq!(saved.title, "Short vowels, part 2");

    let req = api.last_request();
    assert_eq!(req.method, Method::PUT);
    assert_eq!(req.path, "/api/modules/m1");
    assert_eq!(req.body["title"], "Short vowels, part 2");

    api.on(
        Method::DELETE,
        "/modules/m1",
        Reply::ok(json!({ "message": "Module deleted" })),
    );
    client.modules().delete("m1").await.unwrap();

    let req = api.last_request();
    assert_eq!(req.method, Method::DELETE);
    assert_eq!(req.path, "/api/modules/m1");
    assert_eq!(req.body, serde_json::Value::Null);
}

#[tokio::test]
async fn assignment_create_and_delete_test() {
    let api = MockApi::start().await;
    let (client, _) = api.client();
    login_student(&api, &client).await;

    let due = Utc.with_ymd_and_hms(2024, 4, 1, 12, 0, 0).unwrap();
    api.on(
        Method::POST,
        "/assignments",
        Reply::status(
            StatusCode::CREATED,
            json!({
                "_id": "a1",
                "module": { "_id": "m1", "title": "Short vowels" },
                "students": ["s1", "s2"],
                "teacher": "t1",
                "dueDate": "2024-04-01T12:00:00Z"
            }),
        ),
    );

    let assignment = client
        .assignments()
        .create(&AssignmentCreate {
            module_id: "m1".into(),
            student_ids: vec!["s1".into(), "s2".into()],
            due_date: Some(due),
            notes: None,
        })
        .await
        .unwrap();
    assert_eq!(assignment.module_title(), Some("Short vowels"));
    assert_eq!(assignment.due_date, Some(due));

    let req = api.last_request();
    assert_eq!(req.method, Method::POST);
    assert_eq!(req.path, "/api/assignments");
    assert_eq!(req.body["moduleId"], "m1");
    assert_eq!(req.body["studentIds"], json!(["s1", "s2"]));
    assert_eq!(req.body["dueDate"], "2024-04-01T12:00:00Z");
    assert!(req.body.get("notes").is_none());

    api.on(Method::DELETE, "/assignments/a1", Reply::empty(StatusCode::NO_CONTENT));
    client.assignments().delete("a1").await.unwrap();

    let req = api.last_request();
    assert_eq!(req.method, Method::DELETE);
    assert_eq!(req.path, "/api/assignments/a1");
}

#[tokio::test]
async fn quiz_lookups_test() {
    let api = MockApi::start().await;
    let (client, _) = api.client();
    login_student(&api, &client).await;

    api.on(
        Method::GET,
        "/quiz/module/m1",
        Reply::ok(json!([submission_json("qs1"), submission_json("qs2")])),
    );
    let for_module = client.quiz().for_module("m1").await.unwrap();
    assert_eq!(for_module.len(), 2);
    assert_eq!(for_module[0].student.populated().unwrap().name, "Ada");

    let req = api.last_request();
    assert_eq!(req.method, Method::GET);
    assert_eq!(req.path, "/api/quiz/module/m1");

    api.on(Method::GET, "/quiz/qs1", Reply::ok(submission_json("qs1")));
    let submission = client.quiz().get("qs1").await.unwrap();
    assert_eq!(submission.id, "qs1");
    assert_eq!(submission.percentage, 100);
    assert!(submission.answers[0].is_correct);

    let req = api.last_request();
    assert_eq!(req.method, Method::GET);
    assert_eq!(req.path, "/api/quiz/qs1");
}

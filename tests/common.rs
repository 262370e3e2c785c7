use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
    time::Duration,
};

use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    http::{HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
};
use lexilearn::{api::ApiClient, storage::MemoryStorage};
use serde_json::{Value, json};
use url::Url;

/// A request as the mock API received it.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: Method,
    pub path: String,
    pub query: Option<String>,
    pub headers: HeaderMap,
    pub body: Value,
}

impl Recorded {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

#[derive(Debug, Clone)]
pub struct Reply {
    pub status: StatusCode,
    pub body: Option<Value>,
}

impl Reply {
    pub fn ok(body: Value) -> Self {
        Self {
            status: StatusCode::OK,
            body: Some(body),
        }
    }

    pub fn status(status: StatusCode, body: Value) -> Self {
        Self {
            status,
            body: Some(body),
        }
    }

    pub fn empty(status: StatusCode) -> Self {
        Self { status, body: None }
    }
}

#[derive(Debug, Default)]
struct MockState {
    replies: Mutex<HashMap<(Method, String), Reply>>,
    requests: Mutex<Vec<Recorded>>,
}

/// In-process stand-in for the LexiLearn API, listening on a random local port.
///
/// Every route answers with the reply registered for its method and path, anything else gets a
/// 404 with an `error` body like the real server sends.
pub struct MockApi {
    state: Arc<MockState>,
    base_url: Url,
}

impl MockApi {
    pub async fn start() -> Self {
        let state = Arc::new(MockState::default());
        let app = Router::new().fallback(handle).with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let base_url = Url::parse(&format!("http://{addr}/api/")).unwrap();
        Self { state, base_url }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Registers the reply for `method path`, `path` being relative to `/api`.
    pub fn on(&self, method: Method, path: &str, reply: Reply) -> &Self {
        self.state
            .replies
            .lock()
            .unwrap()
            .insert((method, format!("/api{path}")), reply);
        self
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.state.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> Recorded {
        self.requests().pop().expect("no request reached the mock api")
    }

    /// Client with its session kept in memory.
    pub fn client(&self) -> (ApiClient, Arc<MemoryStorage>) {
        let storage = Arc::new(MemoryStorage::new());
        let client = ApiClient::new(
            self.base_url.clone(),
            storage.clone(),
            Duration::from_secs(5),
        )
        .unwrap();
        (client, storage)
    }
}

async fn handle(
    State(state): State<Arc<MockState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let path = uri.path().to_string();
    let body = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).unwrap_or(Value::Null)
    };

    state.requests.lock().unwrap().push(Recorded {
        method: method.clone(),
        path: path.clone(),
        query: uri.query().map(str::to_string),
        headers,
        body,
    });

    let reply = state.replies.lock().unwrap().get(&(method, path)).cloned();
    match reply {
        Some(Reply {
            status,
            body: Some(body),
        }) => (status, Json(body)).into_response(),
        Some(Reply { status, body: None }) => status.into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Route not found" })),
        )
            .into_response(),
    }
}

// Common fixtures

pub fn student_json() -> Value {
    json!({
        "_id": "s1",
        "name": "Ada",
        "grade": 3,
        "teacher": "t1",
        "settings": { "fontSize": 18, "textToSpeech": true }
    })
}

pub fn teacher_json() -> Value {
    json!({
        "_id": "t1",
        "name": "Ms. Lee",
        "email": "lee@school.test",
        "school": "Hill Primary"
    })
}

pub fn module_json() -> Value {
    json!({
        "_id": "m1",
        "title": "Short vowels",
        "description": "Hear and read the five short vowels",
        "category": "phonics",
        "difficulty": "beginner",
        "gradeLevel": 2,
        "content": [
            { "type": "text", "title": "Intro", "body": "A, E, I, O, U" },
            { "type": "video", "_id": "v1", "title": "Sing along", "url": "https://cdn.test/v1.mp4", "duration": 90.0 },
            { "type": "quiz", "title": "Check", "questions": [
                { "_id": "q1", "question": "Vowel in 'cat'?", "options": ["a", "e"], "correctAnswer": 0 },
                { "_id": "q2", "question": "Vowel in 'bed'?", "options": ["a", "e"], "correctAnswer": 1 },
                { "_id": "q3", "type": "short-answer", "question": "Spell the animal that barks", "correctAnswer": "dog" }
            ]}
        ],
        "isPublished": true
    })
}

pub fn progress_json(step: usize, percentage: f64) -> Value {
    json!({
        "_id": "p1",
        "student": "s1",
        "module": { "_id": "m1", "title": "Short vowels" },
        "status": if percentage >= 100.0 { "completed" } else { "in-progress" },
        "currentStep": step,
        "timeSpent": 120,
        "completionPercentage": percentage,
        "lastAccessed": "2024-03-01T10:00:00Z"
    })
}

/// Signs the client in as the fixture student.
pub async fn login_student(api: &MockApi, client: &ApiClient) {
    api.on(
        Method::POST,
        "/auth/student/login",
        Reply::ok(json!({ "token": "student-token", "student": student_json() })),
    );
    client.auth().student_login("ABC123").await.unwrap();
}

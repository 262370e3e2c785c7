//! Typed client for the LexiLearn REST API, one resource group per module.

mod client;
pub use client::{ApiClient, REQUEST_ID_HEADER};

mod error;
pub use error::{ApiError, ApiResult, ErrorBody};

mod auth;
pub use auth::{AuthApi, VerifyResponse};

mod users;
pub use users::UserApi;

mod modules;
pub use modules::ModuleApi;

mod progress;
pub use progress::ProgressApi;

mod quiz;
pub use quiz::QuizApi;

mod assignments;
pub use assignments::AssignmentApi;

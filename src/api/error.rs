use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

use crate::{auth::AuthError, model::ResourceType, storage::StorageError};

pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Body the API sends along with a non-2xx status.
#[derive(Debug, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ErrorBody {
    /// Server message: `error`, then `message`, then the status reason.
    pub fn into_message(self, status: StatusCode) -> String {
        self.error
            .or(self.message)
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .map(str::to_string)
                    .unwrap_or_else(|| format!("HTTP {}", status.as_u16()))
            })
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{message}")]
    ApiServerError { status: StatusCode, message: String },

    #[error("{message}")]
    ApiUnauthorized { message: String },

    #[error("ApiNetworkError: {0}")]
    ApiNetworkError(#[from] reqwest::Error),

    #[error("ApiDecodeError: {resource_type}. Error: {error}")]
    ApiDecodeError {
        resource_type: ResourceType,
        error: serde_json::Error,
    },

    #[error("ApiInvalidEndpoint: {0}")]
    ApiInvalidEndpoint(String),

    #[error("AuthenticationError - {0}")]
    AuthenticationError(#[from] AuthError),

    #[error("StorageError - {0}")]
    StorageError(#[from] StorageError),
}

impl ApiError {
    pub fn from_response(status: StatusCode, body: &[u8]) -> Self {
        let parsed: ErrorBody = serde_json::from_slice(body).unwrap_or_default();
        let message = parsed.into_message(status);

        if status == StatusCode::UNAUTHORIZED {
            Self::ApiUnauthorized { message }
        } else {
            Self::ApiServerError { status, message }
        }
    }

    pub fn status_code(&self) -> Option<StatusCode> {
        match self {
            Self::ApiServerError { status, .. } => Some(*status),
            Self::ApiUnauthorized { .. } => Some(StatusCode::UNAUTHORIZED),
            Self::ApiNetworkError(e) => e.status(),
            _ => None,
        }
    }

    /// Failures that send the user back to the login page.
    pub fn is_auth_failure(&self) -> bool {
        matches!(
            self,
            Self::ApiUnauthorized { .. }
                | Self::AuthenticationError(
                    AuthError::AuthenticationRequired | AuthError::AuthenticationExpired
                )
        )
    }

    /// Banner text for the user. Everything that is not an authentication problem gets the
    /// same generic banner with the server message attached.
    pub fn client_display(&self) -> String {
        match self {
            Self::AuthenticationError(e) => e.client_display(),
            Self::ApiUnauthorized { .. } => String::from("Please log in to continue."),
            Self::ApiServerError { message, .. } => {
                format!("Oops! Something went wrong: {message}")
            }
            Self::ApiNetworkError(_) => {
                String::from("Oops! Something went wrong: the server could not be reached.")
            }
            _ => String::from("Oops! Something went wrong."),
        }
    }
}

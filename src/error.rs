use thiserror::Error;
use tracing::error;
use tracing_error::SpanTrace;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("io error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("config error: {0}")]
    ConfigError(#[from] crate::config::ConfigError),
    #[error("storage error: {0}")]
    StorageError(#[from] crate::storage::StorageError),
    #[error("api error: {0}")]
    ApiError(#[from] crate::api::ApiError),
    #[error("auth error: {0}")]
    AuthError(#[from] crate::auth::AuthError),
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl AppError {
    /// Text for the user, without internal details.
    pub fn client_display(&self) -> String {
        match self {
            Self::ApiError(e) => e.client_display(),
            Self::AuthError(e) => e.client_display(),
            Self::InvalidInput(msg) => msg.clone(),
            other => format!("Oops! Something went wrong: {other}"),
        }
    }

    pub fn is_auth_failure(&self) -> bool {
        match self {
            Self::ApiError(e) => e.is_auth_failure(),
            Self::AuthError(_) => true,
            _ => false,
        }
    }
}

pub type AppResult<T> = std::result::Result<T, AppError>;

pub async fn run_with_error_handler<F, T>(run: F) -> T
where
    F: AsyncFnOnce() -> AppResult<T>,
{
    match run().await {
        Ok(value) => value,
        Err(e) => {
            default_error_handler(e);
            std::process::exit(1);
        }
    }
}

fn default_error_handler(error: AppError) {
    let span = SpanTrace::capture();
    error!("{}\n{}", error, span);
    eprintln!("{}", error.client_display());
    if error.is_auth_failure() {
        eprintln!("Run `lexilearn login student --code <CODE>` or `lexilearn login teacher` first.");
    }
}

pub fn log_error<E: std::error::Error + std::fmt::Display>(error: &E) {
    let span = SpanTrace::capture();
    error!("{}\n{}", error, span);
}

use thiserror::Error;

use crate::{model::entity::UserType, storage::StorageError};

pub type AuthResult<T> = std::result::Result<T, AuthError>;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("AuthenticationRequired")]
    AuthenticationRequired,

    #[error("AuthenticationExpired")]
    AuthenticationExpired,

    #[error("AuthenticationWrongRole, expected: {expected}, actual: {actual}")]
    AuthenticationWrongRole { expected: UserType, actual: UserType },

    #[error("AuthenticationStorage: {0}")]
    AuthenticationStorage(#[from] StorageError),
}

impl AuthError {
    pub fn client_display(&self) -> String {
        match self {
            Self::AuthenticationRequired => String::from("Please log in to continue."),
            Self::AuthenticationExpired => {
                String::from("Your session has expired, please log in again.")
            }
            Self::AuthenticationWrongRole { expected, .. } => {
                format!("This page is only available to {expected}s.")
            }
            Self::AuthenticationStorage(_) => String::from("Unable to read the saved session."),
        }
    }
}

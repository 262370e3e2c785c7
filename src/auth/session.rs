use std::sync::Arc;

use chrono::Utc;

use crate::{
    auth::{AuthError, AuthResult, is_token_expired},
    model::entity::{SessionUser, UserType},
    storage::{LocalStorage, LocalStorageExt, StorageResult},
};

pub static TOKEN_KEY: &str = "token";
pub static USER_TYPE_KEY: &str = "userType";
pub static USER_KEY: &str = "user";

/// A signed in user with the token the API handed out.
#[derive(Debug, Clone)]
pub struct Session {
    token: String,
    user: SessionUser,
}

impl Session {
    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn user(&self) -> &SessionUser {
        &self.user
    }

    pub fn user_type(&self) -> UserType {
        self.user.user_type()
    }
}

/// Token utilities over the client storage.
#[derive(Clone)]
pub struct SessionStore {
    storage: Arc<dyn LocalStorage>,
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore").finish_non_exhaustive()
    }
}

impl SessionStore {
    pub fn new(storage: Arc<dyn LocalStorage>) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &Arc<dyn LocalStorage> {
        &self.storage
    }

    pub fn token(&self) -> StorageResult<Option<String>> {
        self.storage.get_item(TOKEN_KEY)
    }

    pub fn user_type(&self) -> StorageResult<Option<UserType>> {
        let raw = self.storage.get_item(USER_TYPE_KEY)?;
        Ok(raw.and_then(|r| r.parse().ok()))
    }

    pub fn user(&self) -> StorageResult<Option<SessionUser>> {
        self.storage.get_json(USER_KEY)
    }

    #[tracing::instrument(skip(self, token, user), fields(user_type = %user.user_type()))]
    pub fn save(&self, token: &str, user: &SessionUser) -> StorageResult<()> {
        self.storage.set_item(TOKEN_KEY, token)?;
        self.storage
            .set_item(USER_TYPE_KEY, &user.user_type().to_string())?;
        self.storage.set_json(USER_KEY, user)?;
        tracing::debug!("session saved");
        Ok(())
    }

    pub fn update_user(&self, user: &SessionUser) -> StorageResult<()> {
        self.storage.set_json(USER_KEY, user)
    }

    pub fn clear(&self) -> StorageResult<()> {
        self.storage.remove_item(TOKEN_KEY)?;
        self.storage.remove_item(USER_TYPE_KEY)?;
        self.storage.remove_item(USER_KEY)?;
        tracing::debug!("session cleared");
        Ok(())
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self.current(), Ok(Some(_)))
    }

    /// The stored session, if there is a token that has not expired yet.
    pub fn current(&self) -> AuthResult<Option<Session>> {
        let Some(token) = self.token()? else {
            return Ok(None);
        };

        if is_token_expired(&token, Utc::now()) {
            return Err(AuthError::AuthenticationExpired);
        }

        Ok(self.user()?.map(|user| Session { token, user }))
    }

    /// Authentication gate every page runs before loading anything.
    ///
    /// An expired token is cleared so the next login starts clean.
    pub fn require(&self, expected: Option<UserType>) -> AuthResult<Session> {
        let session = match self.current() {
            Ok(Some(session)) => session,
            Ok(None) => return Err(AuthError::AuthenticationRequired),
            Err(AuthError::AuthenticationExpired) => {
                self.clear()?;
                return Err(AuthError::AuthenticationExpired);
            }
            Err(e) => return Err(e),
        };

        match expected {
            Some(expected) if expected != session.user_type() => {
                Err(AuthError::AuthenticationWrongRole {
                    expected,
                    actual: session.user_type(),
                })
            }
            _ => Ok(session),
        }
    }
}

mod jwt;
pub use jwt::{TokenClaims, inspect_token, is_token_expired};
mod error;
pub use error::{AuthError, AuthResult};
mod session;
pub use session::{Session, SessionStore, TOKEN_KEY, USER_KEY, USER_TYPE_KEY};

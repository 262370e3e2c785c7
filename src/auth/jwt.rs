use chrono::{DateTime, Utc};
use jsonwebtoken::{DecodingKey, Validation};
use serde::{Deserialize, Serialize};

use crate::model::entity::UserType;

/// Claims the LexiLearn API puts in its tokens. All optional, the client only peeks at them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenClaims {
    #[serde(default, alias = "sub")]
    pub id: Option<String>,
    #[serde(default)]
    pub user_type: Option<UserType>,
    #[serde(default)]
    pub exp: Option<i64>,
    #[serde(default)]
    pub iat: Option<i64>,
}

/// Reads the claims without checking the signature. The server verifies tokens, the client
/// only needs the expiry to skip a request that would be rejected anyway.
pub fn inspect_token(token: &str) -> jsonwebtoken::errors::Result<TokenClaims> {
    let mut validation = Validation::default();
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.validate_aud = false;
    validation.required_spec_claims.clear();

    let data = jsonwebtoken::decode::<TokenClaims>(token, &DecodingKey::from_secret(&[]), &validation)?;
    Ok(data.claims)
}

/// Opaque (non JWT) tokens and tokens without `exp` never count as expired.
pub fn is_token_expired(token: &str, now: DateTime<Utc>) -> bool {
    match inspect_token(token) {
        Ok(TokenClaims { exp: Some(exp), .. }) => exp <= now.timestamp(),
        Ok(_) => false,
        Err(e) => {
            tracing::trace!("token is not an inspectable jwt: {}", e);
            false
        }
    }
}

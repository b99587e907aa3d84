use jsonwebtoken::{Algorithm, DecodingKey, TokenData, Validation, decode};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug)]
pub(crate) enum AuthError {
    #[error("Invalid token")]
    InvalidToken(#[from] jsonwebtoken::errors::Error),
}

#[derive(Serialize, Deserialize, Debug)]
pub(crate) struct UserToken {
    pub sub: String,
    // expiry, seconds since the epoch
    pub exp: i64,
    #[serde(default)]
    pub iat: Option<i64>,
}

struct InnerAuthConfig {
    decoding_key: DecodingKey,
    validation: Validation,
}

/// The authenticator capability handed to the routing layer at
/// construction time; handlers never touch process-wide state.
#[derive(Clone)]
pub(crate) struct AuthConfig(Arc<InnerAuthConfig>);

impl AuthConfig {
    pub(crate) fn from_secret(secret: &str) -> Self {
        let validation = Validation::new(Algorithm::HS256);
        Self(Arc::new(InnerAuthConfig {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }))
    }

    pub(crate) fn validate_token(&self, token: &str) -> Result<UserToken, AuthError> {
        let token: TokenData<UserToken> = decode(token, &self.0.decoding_key, &self.0.validation)?;
        Ok(token.claims)
    }
}

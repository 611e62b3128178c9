use jsonwebtoken::{decode, errors::ErrorKind, DecodingKey, Validation};
use secrecy::{ExposeSecret, SecretString};

use crate::{
    auth::claims::Claims,
    errors::{AppError, AppResult},
    models::domain::CurrentUser,
};

/// Resolves the caller from a bearer token. Issuing tokens belongs to the
/// external identity service.
pub trait IdentityProvider: Send + Sync {
    fn current_user(&self, token: &str) -> AppResult<CurrentUser>;
}

#[derive(Clone)]
pub struct JwtService {
    decoding_key: DecodingKey,
    validation: Validation,
    #[cfg(test)]
    encoding_key: jsonwebtoken::EncodingKey,
}

impl JwtService {
    pub fn new(secret: &SecretString) -> Self {
        let secret_bytes = secret.expose_secret().as_bytes();

        Self {
            decoding_key: DecodingKey::from_secret(secret_bytes),
            validation: Validation::default(),
            #[cfg(test)]
            encoding_key: jsonwebtoken::EncodingKey::from_secret(secret_bytes),
        }
    }

    pub fn validate_token(&self, token: &str) -> AppResult<Claims> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => {
                    AppError::Unauthorized("Token has expired".to_string())
                }
                ErrorKind::InvalidSignature => {
                    AppError::Unauthorized("Token signature is invalid".to_string())
                }
                _ => AppError::Unauthorized(format!("Invalid token: {}", e)),
            })
    }
}

impl IdentityProvider for JwtService {
    fn current_user(&self, token: &str) -> AppResult<CurrentUser> {
        self.validate_token(token).map(CurrentUser::from)
    }
}

#[cfg(test)]
impl JwtService {
    pub fn create_token(&self, user: &CurrentUser) -> AppResult<String> {
        let claims = Claims::for_user(user, 1);

        jsonwebtoken::encode(&jsonwebtoken::Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::InternalError(format!("Failed to create JWT: {}", e)))
    }
}

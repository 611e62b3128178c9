use serde::{Deserialize, Serialize};

use crate::models::domain::{CurrentUser, UserRole};

/// Claims carried by tokens from the identity provider. Anonymous sessions
/// carry `anonymous: true` and usually no role or email.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // Subject (user id)
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub anonymous: bool,
    #[serde(default)]
    pub role: Option<UserRole>,
    pub exp: usize, // Expiration time (as UTC timestamp)
    pub iat: usize, // Issued at (as UTC timestamp)
}

impl From<Claims> for CurrentUser {
    fn from(claims: Claims) -> Self {
        CurrentUser {
            id: claims.sub,
            email: claims.email,
            is_anonymous: claims.anonymous,
            role: claims.role,
        }
    }
}

#[cfg(test)]
impl Claims {
    pub fn for_user(user: &CurrentUser, expiration_hours: i64) -> Self {
        let now = chrono::Utc::now();
        let exp = now + chrono::Duration::hours(expiration_hours);

        Self {
            sub: user.id.clone(),
            email: user.email.clone(),
            anonymous: user.is_anonymous,
            role: user.role,
            iat: now.timestamp() as usize,
            exp: exp.timestamp() as usize,
        }
    }
}

use async_graphql::Context;

use crate::{
    errors::{AppError, AppResult},
    models::domain::CurrentUser,
};

pub fn require_instructor(user: &CurrentUser) -> AppResult<()> {
    if !user.is_instructor() {
        return Err(AppError::Forbidden(
            "Only instructors can perform this action".to_string(),
        ));
    }
    Ok(())
}

/// Student-facing writes (submissions, reviews) need a real account.
pub fn require_identified(user: &CurrentUser) -> AppResult<()> {
    if !user.is_identified() {
        return Err(AppError::Unauthorized(
            "Sign in to perform this action".to_string(),
        ));
    }
    Ok(())
}

/// Callers may read their own records; instructors may read anyone's.
pub fn require_self_or_instructor(user: &CurrentUser, owner_id: &str) -> AppResult<()> {
    if user.id != owner_id && !user.is_instructor() {
        return Err(AppError::Forbidden(
            "You can only access your own records".to_string(),
        ));
    }
    Ok(())
}

pub fn extract_user_from_context(ctx: &Context<'_>) -> AppResult<CurrentUser> {
    ctx.data::<CurrentUser>()
        .cloned()
        .map_err(|_| AppError::Unauthorized("Authentication required".to_string()))
}

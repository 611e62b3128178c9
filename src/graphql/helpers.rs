use async_graphql::Context;
use validator::Validate;

use crate::{
    app_state::AppState,
    errors::{AppError, AppResult},
};

pub fn app_state<'a>(ctx: &Context<'a>) -> AppResult<&'a AppState> {
    ctx.data::<AppState>()
        .map_err(|_| AppError::InternalError("Application state is not configured".to_string()))
}

/// Runs `validator` rules on a GraphQL input before any service call.
pub fn validated<T: Validate>(input: T) -> AppResult<T> {
    input.validate()?;
    Ok(input)
}

use axum::{
    extract::{Request, State},
    http::{HeaderMap, header},
    middleware::Next,
    response::Response,
};

use petitions_types::models::User;

use crate::auth::AppState;
use crate::error::ApiError;
use crate::run_db;

/// Authenticate the `Authorization: Bearer` token and attach the resolved
/// [`User`] to the request extensions.
pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = bearer_token(req.headers())
        .ok_or_else(|| ApiError::Unauthorized("missing bearer token".to_string()))?
        .to_string();

    let user = authenticate(&state, &token).await?;

    req.extensions_mut().insert(user);
    Ok(next.run(req).await)
}

/// Validate a token and resolve it to an existing user. A well-signed token
/// whose user no longer exists is rejected.
pub async fn authenticate(state: &AppState, token: &str) -> Result<User, ApiError> {
    let user_id = state.tokens.validate(token)?;

    let user = run_db(state, move |db| db.get_user_by_id(user_id))
        .await?
        .ok_or_else(ApiError::invalid_credentials)?;

    Ok(user.into_model())
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.split_once(' '))
        .filter(|(scheme, _)| scheme.eq_ignore_ascii_case("Bearer"))
        .map(|(_, token)| token.trim())
        .filter(|t| !t.is_empty())
}

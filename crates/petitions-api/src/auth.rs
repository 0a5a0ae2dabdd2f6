use std::sync::Arc;

use axum::{Json, extract::State};
use axum_extra::extract::WithRejection;
use tracing::{error, warn};

use petitions_db::Database;
use petitions_types::api::{LoginRequest, TokenResponse};

use crate::error::ApiError;
use crate::password::verify_password;
use crate::run_db;
use crate::token::TokenService;

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub db: Database,
    pub tokens: TokenService,
}

/// POST /token: exchange a username and password for a bearer token.
pub async fn login(
    State(state): State<AppState>,
    WithRejection(Json(req), _): WithRejection<Json<LoginRequest>, ApiError>,
) -> Result<Json<TokenResponse>, ApiError> {
    let username = req.username.clone();
    let user = run_db(&state, move |db| db.get_user_by_username(&username))
        .await?
        .ok_or_else(|| {
            warn!("Login attempt for unknown user '{}'", req.username);
            ApiError::Unauthorized("invalid credentials".to_string())
        })?;

    let valid = verify_password(&req.password, &user.password).map_err(|e| {
        error!("Unreadable password hash for user {}: {}", user.id, e);
        ApiError::Internal
    })?;
    if !valid {
        warn!("Wrong password for user '{}'", user.username);
        return Err(ApiError::Unauthorized("invalid credentials".to_string()));
    }

    let access_token = state.tokens.issue(user.id)?;

    Ok(Json(TokenResponse {
        access_token,
        token_type: "bearer".to_string(),
    }))
}

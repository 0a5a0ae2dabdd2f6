use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use axum_extra::extract::WithRejection;
use tracing::{error, info};

use petitions_types::api::CreateUserRequest;

use crate::auth::AppState;
use crate::error::ApiError;
use crate::password::hash_password;
use crate::run_db;

/// POST /users/: register a new user.
pub async fn create_user(
    State(state): State<AppState>,
    WithRejection(Json(req), _): WithRejection<Json<CreateUserRequest>, ApiError>,
) -> Result<impl IntoResponse, ApiError> {
    if req.username.trim().is_empty() {
        return Err(ApiError::BadRequest("username must not be empty".to_string()));
    }
    if req.password.is_empty() {
        return Err(ApiError::BadRequest("password must not be empty".to_string()));
    }

    let password_hash = hash_password(&req.password).map_err(|e| {
        error!("Password hashing failed: {}", e);
        ApiError::Internal
    })?;

    let username = req.username;
    let row = run_db(&state, move |db| db.create_user(&username, &password_hash)).await?;
    info!("Registered user {} ({})", row.id, row.username);

    Ok((StatusCode::CREATED, Json(row.into_model())))
}

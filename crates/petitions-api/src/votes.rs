use axum::{
    Extension, Json,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use axum_extra::extract::WithRejection;

use petitions_types::api::{CastVoteRequest, RetractVoteQuery};
use petitions_types::models::{User, Vote};

use crate::auth::AppState;
use crate::error::ApiError;
use crate::run_db;

/// POST /votes/: vote for a petition as the authenticated user.
pub async fn cast_vote(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    WithRejection(Json(req), _): WithRejection<Json<CastVoteRequest>, ApiError>,
) -> Result<impl IntoResponse, ApiError> {
    let petition_id = req.petition_id;
    let row = run_db(&state, move |db| db.cast_vote(user.id, petition_id)).await?;

    Ok((StatusCode::CREATED, Json(row.into_model())))
}

/// DELETE /votes/?petition_id=N: withdraw the authenticated user's vote.
pub async fn retract_vote(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    WithRejection(Query(query), _): WithRejection<Query<RetractVoteQuery>, ApiError>,
) -> Result<Json<Vote>, ApiError> {
    let petition_id = query.petition_id;
    let row = run_db(&state, move |db| db.retract_vote(user.id, petition_id)).await?;

    Ok(Json(row.into_model()))
}

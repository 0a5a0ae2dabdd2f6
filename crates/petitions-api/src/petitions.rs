use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use axum_extra::extract::WithRejection;
use tracing::info;

use petitions_db::PetitionPage;
use petitions_db::models::PetitionRow;
use petitions_types::api::{
    CreatePetitionRequest, ListPetitionsQuery, MAX_PAGE_LIMIT, MAX_SEARCH_LEN, PetitionSearch,
};
use petitions_types::models::Petition;

use crate::auth::AppState;
use crate::error::ApiError;
use crate::run_db;

/// POST /petitions/
pub async fn create_petition(
    State(state): State<AppState>,
    WithRejection(Json(req), _): WithRejection<Json<CreatePetitionRequest>, ApiError>,
) -> Result<impl IntoResponse, ApiError> {
    if req.title.trim().is_empty() {
        return Err(ApiError::BadRequest("title must not be empty".to_string()));
    }

    let row = run_db(&state, move |db| db.create_petition(&req.title, &req.description)).await?;
    info!("Created petition {}", row.id);

    Ok((StatusCode::CREATED, Json(row.into_model())))
}

/// GET /petitions/?page&limit&search&sort_by&sort_order
pub async fn list_petitions(
    State(state): State<AppState>,
    WithRejection(Query(query), _): WithRejection<Query<ListPetitionsQuery>, ApiError>,
) -> Result<Json<Vec<Petition>>, ApiError> {
    let page = petition_page(query)?;
    let rows = run_db(&state, move |db| db.list_petitions(&page)).await?;

    Ok(Json(rows.into_iter().map(PetitionRow::into_model).collect()))
}

fn petition_page(query: ListPetitionsQuery) -> Result<PetitionPage, ApiError> {
    if query.limit > MAX_PAGE_LIMIT {
        return Err(ApiError::BadRequest(format!(
            "limit must be at most {MAX_PAGE_LIMIT}"
        )));
    }
    if let Some(search) = &query.search {
        if search.chars().count() > MAX_SEARCH_LEN {
            return Err(ApiError::BadRequest(format!(
                "search must be at most {MAX_SEARCH_LEN} characters"
            )));
        }
    }

    Ok(PetitionPage {
        search: query.search.as_deref().and_then(PetitionSearch::parse),
        sort_by: query.sort_by,
        sort_order: query.sort_order,
        offset: i64::from(query.page) * i64::from(query.limit),
        limit: i64::from(query.limit),
    })
}

use axum::{
    Json, Router, middleware,
    routing::{get, post},
};
use serde_json::{Value, json};

use crate::auth::{self, AppState};
use crate::middleware::require_auth;
use crate::{petitions, users, votes};

/// Build the application router. Vote routes sit behind [`require_auth`];
/// everything else is public.
pub fn router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/token", post(auth::login))
        .route("/users/", post(users::create_user))
        .route(
            "/petitions/",
            post(petitions::create_petition).get(petitions::list_petitions),
        )
        .route("/health", get(health));

    let protected_routes = Router::new()
        .route("/votes/", post(votes::cast_vote).delete(votes::retract_vote))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .with_state(state)
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

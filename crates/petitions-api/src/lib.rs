pub mod auth;
pub mod error;
pub mod middleware;
pub mod password;
pub mod petitions;
pub mod routes;
pub mod token;
pub mod users;
pub mod votes;

pub use auth::{AppState, AppStateInner};
pub use error::ApiError;
pub use routes::router;
pub use token::TokenService;

use std::sync::Arc;

use petitions_db::Database;
use tracing::error;

/// Run a blocking database call off the async runtime.
pub(crate) async fn run_db<F, T>(state: &AppState, f: F) -> Result<T, ApiError>
where
    F: FnOnce(&Database) -> petitions_db::Result<T> + Send + 'static,
    T: Send + 'static,
{
    let state = Arc::clone(state);
    tokio::task::spawn_blocking(move || f(&state.db))
        .await
        .map_err(|e| {
            error!("spawn_blocking join error: {}", e);
            ApiError::Internal
        })?
        .map_err(ApiError::from)
}

pub mod routes;
pub mod state;

use axum::{routing::{get, post}, Router};
use crate::adapters::http::state::HttpState;

pub fn router(state: HttpState) -> Router {
    Router::new()
        .route("/api/config", get(routes::get_config))
        .route("/api/run", post(routes::run))
        .route("/api/random-url", get(routes::random_url))
        .with_state(state)
}

use axum::{middleware, routing::get, Router};
use crate::handlers::company::list_companies;
use crate::middleware::auth::require_auth;
use crate::state::AppState;

pub fn routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/companies", get(list_companies))
        .layer(middleware::from_fn_with_state(state.clone(), require_auth))
}

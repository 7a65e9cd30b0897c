use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use crate::handlers::quote::{aggregate_column, calculate_quote, edit_quote, list_columns};
use crate::middleware::auth::{require_approved, require_auth};
use crate::state::AppState;

pub fn routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/quotes/calculate", post(calculate_quote))
        .route("/quotes/edit", post(edit_quote))
        .route("/quotes/aggregate", post(aggregate_column))
        .route("/quotes/columns", get(list_columns))
        .layer(middleware::from_fn(require_approved))
        .layer(middleware::from_fn_with_state(state.clone(), require_auth))
}

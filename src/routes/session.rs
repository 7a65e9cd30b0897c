use axum::{routing::get, Router};
use crate::handlers::session::route_for_path;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/session/route", get(route_for_path))
}

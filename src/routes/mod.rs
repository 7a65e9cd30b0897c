pub mod admin;
pub mod companies;
pub mod quotes;
pub mod session;
pub mod users;

use axum::Router;
use crate::state::AppState;

pub fn create_router(state: &AppState) -> Router<AppState> {
    Router::new()
        .merge(users::routes(state))
        .merge(companies::routes(state))
        .merge(admin::routes(state))
        .merge(quotes::routes(state))
        .merge(session::routes())
}

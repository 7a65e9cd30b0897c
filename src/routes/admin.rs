use axum::{
    middleware,
    routing::{delete, get, put},
    Router,
};
use crate::handlers::admin::{admin_create_user, approve_user, delete_user, list_users};
use crate::middleware::auth::{require_admin, require_auth};
use crate::state::AppState;

pub fn routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/admin/users", get(list_users).post(admin_create_user))
        .route("/admin/users/{id}/approve", put(approve_user))
        .route("/admin/users/{id}", delete(delete_user))
        // Outermost layer runs first.
        .layer(middleware::from_fn(require_admin))
        .layer(middleware::from_fn_with_state(state.clone(), require_auth))
}

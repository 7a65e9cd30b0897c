use axum::{
    extract::{Query, State},
    http::HeaderMap,
    Json,
};

use crate::auth::guard::route_decision;
use crate::dtos::session::{RouteQuery, RouteResponse};
use crate::middleware::auth::session_from_headers;
use crate::state::AppState;

// GET /session/route?path=/admin - where the client should go for this page
pub async fn route_for_path(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<RouteQuery>,
) -> Json<RouteResponse> {
    let session = session_from_headers(&headers, &state.config.jwt_secret);
    let decision = route_decision(&session, &query.path);
    Json(RouteResponse { path: query.path, decision })
}

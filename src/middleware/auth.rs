use axum::{response::{Response, IntoResponse}};
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::middleware::Next;
use crate::auth::guard::Session;
use crate::auth::jwt::verify_token;
use crate::models::user::User;
use crate::state::AppState;
use serde::Serialize;

#[derive(Debug, Clone)]
pub struct AuthContext {
    pub user_id: i64,
    pub email: String,
    pub is_admin: bool,
    pub is_approved: bool,
}

impl From<User> for AuthContext {
    fn from(user: User) -> Self {
        Self {
            user_id: user.id,
            email: user.email,
            is_admin: user.is_admin,
            is_approved: user.is_approved,
        }
    }
}

#[derive(Serialize)]
struct ErrorBody { error: String, code: &'static str }

use axum::http::Request;

fn bearer_token(headers: &HeaderMap) -> Result<&str, &'static str> {
    let auth_header = headers
        .get("Authorization")
        .and_then(|v| v.to_str().ok())
        .ok_or("Missing Authorization header")?;

    // Expect "Bearer <token>"
    auth_header.strip_prefix("Bearer ").ok_or("Invalid Authorization format")
}

/// Session for optional-auth endpoints; a bad or missing token is anonymous.
pub fn session_from_headers(headers: &HeaderMap, secret: &str) -> Session {
    bearer_token(headers)
        .ok()
        .and_then(|token| verify_token(token, secret).ok())
        .map(|claims| Session::from(&claims))
        .unwrap_or_default()
}

pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request<axum::body::Body>,
    next: Next,
) -> Response {
    let token = match bearer_token(req.headers()) {
        Ok(t) => t,
        Err(msg) => return unauthorized(msg),
    };

    let claims = match verify_token(token, &state.config.jwt_secret) {
        Ok(c) => c,
        Err(e) => return unauthorized(&e.to_string()),
    };

    // Flags come from the stored account, not the token, so deletion and
    // approval take effect before the token expires.
    let user = match state.accounts.find_user(claims.sub).await {
        Ok(Some(user)) => user,
        Ok(None) => return unauthorized("Account no longer exists"),
        Err(e) => return e.into_response(),
    };

    req.extensions_mut().insert(AuthContext::from(user));

    next.run(req).await
}

// Layered inside `require_auth`.
pub async fn require_approved(req: Request<axum::body::Body>, next: Next) -> Response {
    let allowed = req
        .extensions()
        .get::<AuthContext>()
        .map(|ctx| ctx.is_approved || ctx.is_admin);
    match allowed {
        Some(true) => next.run(req).await,
        Some(false) => forbidden("Account awaiting approval"),
        None => unauthorized("Missing session"),
    }
}

// Layered inside `require_auth`.
pub async fn require_admin(req: Request<axum::body::Body>, next: Next) -> Response {
    let allowed = req.extensions().get::<AuthContext>().map(|ctx| ctx.is_admin);
    match allowed {
        Some(true) => next.run(req).await,
        Some(false) => forbidden("Admin access required"),
        None => unauthorized("Missing session"),
    }
}

fn unauthorized(msg: &str) -> Response {
    let body = axum::Json(ErrorBody { error: msg.to_string(), code: "unauthorized" });
    (StatusCode::UNAUTHORIZED, body).into_response()
}

fn forbidden(msg: &str) -> Response {
    let body = axum::Json(ErrorBody { error: msg.to_string(), code: "forbidden" });
    (StatusCode::FORBIDDEN, body).into_response()
}

use bcrypt::verify;
use crate::accounts::{self, validation::{LoginForm, NewUserForm}};
use crate::dtos::user::{CreateUserResponse, LoginResponse, UserResponse};
use crate::auth::jwt::{sign_token, TOKEN_TTL_HOURS};
use crate::error::AppError;
use axum::{extract::State, Json};
use crate::state::AppState;
use crate::middleware::auth::AuthContext;
use axum::extract::Extension;
use tracing::{info, instrument};

// POST /users/register - self-service sign up, lands in the pending table
#[instrument(skip(state))]
pub async fn register_user(
    State(state): State<AppState>,
    Json(payload): Json<NewUserForm>
) -> Result<(axum::http::StatusCode, Json<CreateUserResponse>), AppError> {
    let (user, intent) = accounts::create_from_form(
        state.accounts.as_ref(),
        &payload,
        false,
        state.config.bcrypt_cost,
    )
    .await?;

    info!(user_id = user.id, "User registered, awaiting approval");

    Ok((
        axum::http::StatusCode::CREATED,
        Json(CreateUserResponse { user: user.into(), intent }),
    ))
}

// POST /users/login
#[instrument(skip(state))]
pub async fn login_user(
    State(state): State<AppState>,
    Json(payload): Json<LoginForm>
) -> Result<Json<LoginResponse>, AppError> {
    payload.validate()?;

    let user = state
        .accounts
        .find_user_by_email(payload.email.trim())
        .await?
        .ok_or_else(|| AppError::not_found("Invalid credentials"))?;

    let ok = verify(&payload.password, &user.password_hash)
        .map_err(|e| AppError::internal(format!("Password verify error: {e}")))?;

    if !ok {
        return Err(AppError::validation("Invalid credentials"));
    }

    let token = sign_token(&user, &state.config.jwt_secret)?;
    state.accounts.record_login(user.id).await?;

    Ok(Json(LoginResponse {
        access_token: token,
        token_type: "Bearer",
        expires_in_seconds: TOKEN_TTL_HOURS * 60 * 60,
        user: user.into(),
    }))
}

// GET /users/me - full profile for the id in AuthContext
pub async fn get_me(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>
) -> Result<Json<UserResponse>, AppError> {
    let user = state
        .accounts
        .find_user(auth.user_id)
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))?;

    Ok(Json(user.into()))
}

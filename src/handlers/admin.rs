use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use tracing::{info, instrument};

use crate::accounts::{self, notify::{dispatch_welcome, WelcomeEmail}, validation::NewUserForm};
use crate::dtos::user::{AdminUsersResponse, CreateUserResponse};
use crate::error::AppError;
use crate::middleware::auth::AuthContext;
use crate::state::AppState;

// POST /admin/users - create an approved member and send the welcome email
#[instrument(skip(state, auth))]
pub async fn admin_create_user(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(payload): Json<NewUserForm>,
) -> Result<(StatusCode, Json<CreateUserResponse>), AppError> {
    let (user, intent) = accounts::create_from_form(
        state.accounts.as_ref(),
        &payload,
        true,
        state.config.bcrypt_cost,
    )
    .await?;

    info!(user_id = user.id, admin = %auth.email, ?intent, "Admin created user");

    // Not awaited: a failed email does not undo the account.
    dispatch_welcome(
        state.notifier.clone(),
        WelcomeEmail {
            to_name: intent.name().to_string(),
            to_email: intent.email().to_string(),
            to_password: intent.password().to_string(),
        },
    );

    Ok((
        StatusCode::CREATED,
        Json(CreateUserResponse { user: user.into(), intent }),
    ))
}

// GET /admin/users - pending and approved tables
pub async fn list_users(State(state): State<AppState>) -> Result<Json<AdminUsersResponse>, AppError> {
    let users = state.accounts.list_users().await?;
    Ok(Json(AdminUsersResponse::from(users)))
}

// PUT /admin/users/{id}/approve
#[instrument(skip(state))]
pub async fn approve_user(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<StatusCode, AppError> {
    if !state.accounts.approve_user(id).await? {
        return Err(AppError::not_found("User not found"));
    }
    info!(user_id = id, "User approved");
    Ok(StatusCode::NO_CONTENT)
}

// DELETE /admin/users/{id}
#[instrument(skip(state, auth))]
pub async fn delete_user(
    Path(id): Path<i64>,
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> Result<StatusCode, AppError> {
    if id == auth.user_id {
        return Err(AppError::conflict("Admins cannot delete their own account"));
    }
    if !state.accounts.delete_user(id).await? {
        return Err(AppError::not_found("User not found"));
    }
    info!(user_id = id, "User deleted");
    Ok(StatusCode::NO_CONTENT)
}

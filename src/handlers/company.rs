use axum::{extract::State, Json};

use crate::error::AppError;
use crate::models::company::Company;
use crate::state::AppState;

// GET /companies - directory used by the account form
pub async fn list_companies(State(state): State<AppState>) -> Result<Json<Vec<Company>>, AppError> {
    Ok(Json(state.accounts.list_companies().await?))
}

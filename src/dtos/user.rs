use serde::Serialize;
use chrono::{DateTime, Utc};

use crate::accounts::intent::CreationIntent;
use crate::models::user::{User, UserWithCompany};

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub company_id: Option<i64>,
    pub is_admin: bool,
    pub is_approved: bool,
    pub last_login: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
            company_id: user.company_id,
            is_admin: user.is_admin,
            is_approved: user.is_approved,
            last_login: user.last_login,
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CreateUserResponse {
    pub user: UserResponse,
    pub intent: CreationIntent,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: &'static str,
    pub expires_in_seconds: i64,
    pub user: UserResponse,
}

// Admin console: both tables in one response.
#[derive(Debug, Serialize)]
pub struct AdminUsersResponse {
    pub pending: Vec<UserWithCompany>,
    pub approved: Vec<UserWithCompany>,
}

impl From<Vec<UserWithCompany>> for AdminUsersResponse {
    fn from(users: Vec<UserWithCompany>) -> Self {
        let (approved, pending): (Vec<_>, Vec<_>) =
            users.into_iter().partition(|u| u.is_approved);
        Self { pending, approved }
    }
}

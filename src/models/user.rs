use serde::Serialize;
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub name: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub company_id: Option<i64>,
    pub is_admin: bool,
    pub is_approved: bool,
    pub last_login: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

// Row of the admin console tables.
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct UserWithCompany {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub company_id: Option<i64>,
    pub company_name: Option<String>,
    pub is_admin: bool,
    pub is_approved: bool,
    pub last_login: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

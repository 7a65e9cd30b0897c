// src/accounts/repository.rs
use async_trait::async_trait;
use chrono::Utc;
use sqlx::{Error as SqlxError, PgPool};
use tokio::sync::RwLock;

use crate::error::AppError;
use crate::models::company::Company;
use crate::models::user::{User, UserWithCompany};

/// Account fields ready to store; the password is already hashed.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub email: String,
    pub name: String,
    pub password_hash: String,
    pub is_admin: bool,
    pub is_approved: bool,
}

#[async_trait]
pub trait AccountRepository: Send + Sync {
    async fn list_companies(&self) -> Result<Vec<Company>, AppError>;
    /// `company_id` must name an existing company when set.
    async fn create_user(&self, account: NewAccount, company_id: Option<i64>) -> Result<User, AppError>;
    async fn create_company_and_user(&self, account: NewAccount, company_name: &str) -> Result<User, AppError>;
    async fn find_user(&self, id: i64) -> Result<Option<User>, AppError>;
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError>;
    async fn list_users(&self) -> Result<Vec<UserWithCompany>, AppError>;
    /// `false` when no such user exists.
    async fn approve_user(&self, id: i64) -> Result<bool, AppError>;
    async fn delete_user(&self, id: i64) -> Result<bool, AppError>;
    async fn record_login(&self, id: i64) -> Result<(), AppError>;
}

// ---------- Postgres ----------

const USER_COLUMNS: &str =
    "id, email, name, password_hash, company_id, is_admin, is_approved, last_login, created_at";

fn map_unique_violation(err: SqlxError, message: &str) -> AppError {
    match err {
        SqlxError::Database(db_err) if db_err.code().as_deref() == Some("23505") => {
            AppError::conflict(message)
        }
        SqlxError::Database(db_err) if db_err.code().as_deref() == Some("23503") => {
            AppError::not_found("Company not found")
        }
        other => other.into(),
    }
}

#[derive(Clone)]
pub struct PgAccountRepository {
    pool: PgPool,
}

impl PgAccountRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccountRepository for PgAccountRepository {
    async fn list_companies(&self) -> Result<Vec<Company>, AppError> {
        let companies = sqlx::query_as::<_, Company>("SELECT id, name FROM companies ORDER BY name")
            .fetch_all(&self.pool)
            .await?;
        Ok(companies)
    }

    async fn create_user(&self, account: NewAccount, company_id: Option<i64>) -> Result<User, AppError> {
        let sql = format!(
            "INSERT INTO users (email, name, password_hash, company_id, is_admin, is_approved)
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING {USER_COLUMNS}"
        );
        sqlx::query_as::<_, User>(&sql)
            .bind(&account.email)
            .bind(&account.name)
            .bind(&account.password_hash)
            .bind(company_id)
            .bind(account.is_admin)
            .bind(account.is_approved)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_unique_violation(e, "Email already registered"))
    }

    async fn create_company_and_user(&self, account: NewAccount, company_name: &str) -> Result<User, AppError> {
        let mut tx = self.pool.begin().await?;

        let company = sqlx::query_as::<_, Company>(
            "INSERT INTO companies (name) VALUES ($1) RETURNING id, name",
        )
        .bind(company_name)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| map_unique_violation(e, "Company already exists"))?;

        let sql = format!(
            "INSERT INTO users (email, name, password_hash, company_id, is_admin, is_approved)
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING {USER_COLUMNS}"
        );
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(&account.email)
            .bind(&account.name)
            .bind(&account.password_hash)
            .bind(company.id)
            .bind(account.is_admin)
            .bind(account.is_approved)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| map_unique_violation(e, "Email already registered"))?;

        tx.commit().await?;
        Ok(user)
    }

    async fn find_user(&self, id: i64) -> Result<Option<User>, AppError> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");
        Ok(sqlx::query_as::<_, User>(&sql).bind(id).fetch_optional(&self.pool).await?)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1");
        Ok(sqlx::query_as::<_, User>(&sql).bind(email).fetch_optional(&self.pool).await?)
    }

    async fn list_users(&self) -> Result<Vec<UserWithCompany>, AppError> {
        let users = sqlx::query_as::<_, UserWithCompany>(
            "SELECT u.id, u.email, u.name, u.company_id, c.name AS company_name,
                    u.is_admin, u.is_approved, u.last_login, u.created_at
             FROM users u
             LEFT JOIN companies c ON c.id = u.company_id
             ORDER BY u.created_at, u.id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(users)
    }

    async fn approve_user(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("UPDATE users SET is_approved = TRUE WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_user(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn record_login(&self, id: i64) -> Result<(), AppError> {
        sqlx::query("UPDATE users SET last_login = NOW() WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

// ---------- In-memory ----------

#[derive(Default)]
struct Tables {
    companies: Vec<Company>,
    users: Vec<User>,
    next_company_id: i64,
    next_user_id: i64,
}

impl Tables {
    fn insert_user(&mut self, account: NewAccount, company_id: Option<i64>) -> Result<User, AppError> {
        if self.users.iter().any(|u| u.email == account.email) {
            return Err(AppError::conflict("Email already registered"));
        }
        self.next_user_id += 1;
        let user = User {
            id: self.next_user_id,
            email: account.email,
            name: account.name,
            password_hash: account.password_hash,
            company_id,
            is_admin: account.is_admin,
            is_approved: account.is_approved,
            last_login: None,
            created_at: Utc::now(),
        };
        self.users.push(user.clone());
        Ok(user)
    }
}

/// Process-local store for development runs without `DATABASE_URL` and for
/// tests.
#[derive(Default)]
pub struct InMemoryAccountRepository {
    tables: RwLock<Tables>,
}

impl InMemoryAccountRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn with_companies<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let repo = Self::new();
        {
            let mut tables = repo.tables.write().await;
            for name in names {
                tables.next_company_id += 1;
                let id = tables.next_company_id;
                tables.companies.push(Company { id, name: name.into() });
            }
        }
        repo
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn list_companies(&self) -> Result<Vec<Company>, AppError> {
        let mut companies = self.tables.read().await.companies.clone();
        companies.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(companies)
    }

    async fn create_user(&self, account: NewAccount, company_id: Option<i64>) -> Result<User, AppError> {
        let mut tables = self.tables.write().await;
        if let Some(id) = company_id {
            if !tables.companies.iter().any(|c| c.id == id) {
                return Err(AppError::not_found("Company not found"));
            }
        }
        tables.insert_user(account, company_id)
    }

    async fn create_company_and_user(&self, account: NewAccount, company_name: &str) -> Result<User, AppError> {
        let mut tables = self.tables.write().await;
        if tables.companies.iter().any(|c| c.name == company_name) {
            return Err(AppError::conflict("Company already exists"));
        }
        if tables.users.iter().any(|u| u.email == account.email) {
            return Err(AppError::conflict("Email already registered"));
        }
        tables.next_company_id += 1;
        let company = Company { id: tables.next_company_id, name: company_name.to_string() };
        let company_id = company.id;
        tables.companies.push(company);
        tables.insert_user(account, Some(company_id))
    }

    async fn find_user(&self, id: i64) -> Result<Option<User>, AppError> {
        Ok(self.tables.read().await.users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        Ok(self.tables.read().await.users.iter().find(|u| u.email == email).cloned())
    }

    async fn list_users(&self) -> Result<Vec<UserWithCompany>, AppError> {
        let tables = self.tables.read().await;
        let rows = tables
            .users
            .iter()
            .map(|u| UserWithCompany {
                id: u.id,
                email: u.email.clone(),
                name: u.name.clone(),
                company_id: u.company_id,
                company_name: u
                    .company_id
                    .and_then(|id| tables.companies.iter().find(|c| c.id == id))
                    .map(|c| c.name.clone()),
                is_admin: u.is_admin,
                is_approved: u.is_approved,
                last_login: u.last_login,
                created_at: u.created_at,
            })
            .collect();
        Ok(rows)
    }

    async fn approve_user(&self, id: i64) -> Result<bool, AppError> {
        let mut tables = self.tables.write().await;
        match tables.users.iter_mut().find(|u| u.id == id) {
            Some(user) => {
                user.is_approved = true;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_user(&self, id: i64) -> Result<bool, AppError> {
        let mut tables = self.tables.write().await;
        let before = tables.users.len();
        tables.users.retain(|u| u.id != id);
        Ok(tables.users.len() < before)
    }

    async fn record_login(&self, id: i64) -> Result<(), AppError> {
        let mut tables = self.tables.write().await;
        if let Some(user) = tables.users.iter_mut().find(|u| u.id == id) {
            user.last_login = Some(Utc::now());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(email: &str) -> NewAccount {
        NewAccount {
            email: email.into(),
            name: "Ann".into(),
            password_hash: "hash".into(),
            is_admin: false,
            is_approved: false,
        }
    }

    #[tokio::test]
    async fn new_company_is_listed_and_linked() {
        let repo = InMemoryAccountRepository::new();
        let user = repo.create_company_and_user(account("a@x.test"), "Acme").await.unwrap();

        let companies = repo.list_companies().await.unwrap();
        assert_eq!(companies.len(), 1);
        assert_eq!(user.company_id, Some(companies[0].id));

        let rows = repo.list_users().await.unwrap();
        assert_eq!(rows[0].company_name.as_deref(), Some("Acme"));
    }

    #[tokio::test]
    async fn duplicate_email_conflicts() {
        let repo = InMemoryAccountRepository::with_companies(["Acme"]).await;
        repo.create_user(account("a@x.test"), Some(1)).await.unwrap();
        let err = repo.create_user(account("a@x.test"), Some(1)).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn unknown_company_is_not_found() {
        let repo = InMemoryAccountRepository::new();
        let err = repo.create_user(account("a@x.test"), Some(42)).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn approve_and_delete_report_missing_users() {
        let repo = InMemoryAccountRepository::new();
        let user = repo.create_user(account("a@x.test"), None).await.unwrap();

        assert!(repo.approve_user(user.id).await.unwrap());
        assert!(repo.find_user(user.id).await.unwrap().unwrap().is_approved);
        assert!(!repo.approve_user(999).await.unwrap());

        assert!(repo.delete_user(user.id).await.unwrap());
        assert!(!repo.delete_user(user.id).await.unwrap());
    }
}

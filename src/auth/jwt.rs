use chrono::{Utc, Duration};
use jsonwebtoken::{encode, decode, Header, Validation, EncodingKey, DecodingKey, Algorithm};
use serde::{Serialize, Deserialize};
use crate::error::AppError;
use crate::models::user::User;

pub const TOKEN_TTL_HOURS: i64 = 8;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: i64,
    pub email: String,
    pub is_admin: bool,
    pub is_approved: bool,
    pub exp: usize,
    pub iat: usize,
}

pub fn sign_token(user: &User, secret: &str) -> Result<String, AppError> {
    let now = Utc::now();
    let exp = now + Duration::hours(TOKEN_TTL_HOURS);
    let claims = Claims {
        sub: user.id,
        email: user.email.clone(),
        is_admin: user.is_admin,
        is_approved: user.is_approved,
        iat: now.timestamp() as usize,
        exp: exp.timestamp() as usize,
    };
    encode(&Header::new(Algorithm::HS256), &claims, &EncodingKey::from_secret(secret.as_bytes()))
        .map_err(|e| AppError::internal(format!("Token signing failed: {e}")))
}

pub fn verify_token(token: &str, secret: &str) -> Result<Claims, AppError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::new(Algorithm::HS256)
    )
    .map(|d| d.claims)
    .map_err(|e| AppError::validation(format!("Invalid or expired token: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> User {
        User {
            id: 3,
            email: "ann@acme.test".into(),
            name: "Ann".into(),
            password_hash: String::new(),
            company_id: None,
            is_admin: true,
            is_approved: false,
            last_login: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn claims_survive_signing() {
        let token = sign_token(&user(), "secret").unwrap();
        let claims = verify_token(&token, "secret").unwrap();
        assert_eq!(claims.sub, 3);
        assert!(claims.is_admin);
        assert!(!claims.is_approved);
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = sign_token(&user(), "secret").unwrap();
        assert!(verify_token(&token, "other").is_err());
    }
}

use std::net::IpAddr;
use std::str::FromStr;

use bcrypt::DEFAULT_COST;

use crate::accounts::notify::EmailJsConfig;
use crate::error::AppError;
use crate::pricing::calculations::{PricingConfig, DEFAULT_CREDIT_CARD_FEE_RATE};

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct AdminSeed {
    pub email: String,
    pub name: String,
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    /// No database configured means the in-memory account store.
    pub database_url: Option<String>,
    pub jwt_secret: String,
    pub bcrypt_cost: u32,
    pub pricing: PricingConfig,
    pub emailjs: Option<EmailJsConfig>,
    pub admin_seed: Option<AdminSeed>,
}

impl AppConfig {
    /// Reads the process environment; call after `dotenvy::dotenv()`.
    pub fn from_env() -> Result<Self, AppError> {
        let jwt_secret = var("JWT_SECRET")
            .ok_or_else(|| AppError::internal("JWT_SECRET must be set"))?;

        let credit_card_fee_rate: f64 =
            parse_or("CREDIT_CARD_FEE_RATE", DEFAULT_CREDIT_CARD_FEE_RATE)?;
        if !(0.0..1.0).contains(&credit_card_fee_rate) {
            return Err(AppError::internal("CREDIT_CARD_FEE_RATE must be a fraction below 1"));
        }

        let emailjs = match (
            var("EMAILJS_SERVICE_ID"),
            var("EMAILJS_TEMPLATE_ID"),
            var("EMAILJS_PUBLIC_KEY"),
        ) {
            (Some(service_id), Some(template_id), Some(public_key)) => {
                Some(EmailJsConfig { service_id, template_id, public_key })
            }
            _ => None,
        };

        let admin_seed = match (var("ADMIN_EMAIL"), var("ADMIN_PASSWORD")) {
            (Some(email), Some(password)) => Some(AdminSeed {
                email,
                name: var("ADMIN_NAME").unwrap_or_else(|| "Administrator".to_string()),
                password,
            }),
            _ => None,
        };

        Ok(Self {
            server: ServerConfig {
                host: parse_or("HOST", IpAddr::from([127, 0, 0, 1]))?,
                port: parse_or("PORT", 3000)?,
            },
            database_url: var("DATABASE_URL"),
            jwt_secret,
            bcrypt_cost: parse_or("BCRYPT_COST", DEFAULT_COST)?,
            pricing: PricingConfig { credit_card_fee_rate },
            emailjs,
            admin_seed,
        })
    }
}

// Unset and blank are treated the same.
fn var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_or<T: FromStr>(key: &str, default: T) -> Result<T, AppError> {
    match var(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| AppError::internal(format!("{key} has an invalid value: {raw}"))),
    }
}

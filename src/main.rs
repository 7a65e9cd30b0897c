// src/main.rs
use std::net::SocketAddr;
use std::sync::Arc;

use dotenvy::dotenv;
use quotedesk_backend::accounts::{
    ensure_admin,
    notify::{EmailJsNotifier, LogNotifier, Notifier},
    repository::{AccountRepository, InMemoryAccountRepository, PgAccountRepository},
};
use quotedesk_backend::{build_app, database, AppConfig, AppState};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Load environment variables
    dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = match AppConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            tracing::error!(error = %e, "Invalid configuration");
            return;
        }
    };

    // Account store: Postgres when configured, otherwise process memory
    let accounts: Arc<dyn AccountRepository> = match &config.database_url {
        Some(url) => {
            let pool = match database::create_pool(url).await {
                Ok(p) => p,
                Err(e) => {
                    tracing::error!(error = %e, "Failed to create database pool");
                    return;
                }
            };
            if let Err(e) = database::run_migrations(&pool).await {
                tracing::error!(error = %e, "Failed to run migrations");
                return;
            }
            Arc::new(PgAccountRepository::new(pool))
        }
        None => {
            tracing::warn!("DATABASE_URL not set, accounts are kept in memory");
            Arc::new(InMemoryAccountRepository::new())
        }
    };

    let notifier: Arc<dyn Notifier> = match config.emailjs.clone() {
        Some(emailjs) => match EmailJsNotifier::new(emailjs) {
            Ok(n) => Arc::new(n),
            Err(e) => {
                tracing::error!(error = %e, "Failed to build email client");
                return;
            }
        },
        None => {
            tracing::warn!("EmailJS not configured, welcome emails are only logged");
            Arc::new(LogNotifier)
        }
    };

    if let Some(seed) = &config.admin_seed {
        if let Err(e) = ensure_admin(
            accounts.as_ref(),
            &seed.email,
            &seed.name,
            &seed.password,
            config.bcrypt_cost,
        )
        .await
        {
            tracing::error!(error = %e, "Failed to create bootstrap admin");
            return;
        }
    }

    let host = config.server.host;
    let base_port = config.server.port;
    let app = build_app(AppState::new(accounts, notifier, config));

    // Try base_port..base_port+20 to avoid crash when address is in use
    let listener = {
        let mut bound = None;
        for offset in 0u16..=20 {
            let port = base_port.saturating_add(offset);
            let addr = SocketAddr::from((host, port));
            match TcpListener::bind(addr).await {
                Ok(l) => { bound = Some((l, addr)); break; }
                Err(e) => {
                    if offset == 0 { tracing::warn!(%addr, error=%e, "Port in use, trying next"); }
                }
            }
        }
        match bound {
            Some((l, addr)) => {
                tracing::info!("Server running on {}", addr);
                l
            }
            None => {
                tracing::error!("Failed to bind to any port starting at {} on {}", base_port, host);
                return;
            }
        }
    };

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!(error=%e, "Server error");
    }
}

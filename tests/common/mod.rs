#![allow(dead_code)]

use std::net::IpAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use quotedesk_backend::accounts::ensure_admin;
use quotedesk_backend::accounts::notify::{Notifier, NotifyError, WelcomeEmail};
use quotedesk_backend::accounts::repository::InMemoryAccountRepository;
use quotedesk_backend::config::ServerConfig;
use quotedesk_backend::pricing::PricingConfig;
use quotedesk_backend::{build_app, AppConfig, AppState};

pub const ADMIN_EMAIL: &str = "admin@quotedesk.test";
pub const ADMIN_PASSWORD: &str = "admin-password";

#[derive(Default)]
pub struct RecordingNotifier {
    pub sent: Mutex<Vec<WelcomeEmail>>,
    pub fail: bool,
}

impl RecordingNotifier {
    pub fn failing() -> Self {
        Self { sent: Mutex::new(Vec::new()), fail: true }
    }

    pub fn count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }

    /// The email task is detached; give it a moment to run.
    pub async fn wait_for(&self, expected: usize) -> usize {
        for _ in 0..100 {
            if self.count() >= expected {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        self.count()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send_welcome(&self, email: &WelcomeEmail) -> Result<(), NotifyError> {
        self.sent.lock().unwrap().push(email.clone());
        if self.fail {
            return Err(NotifyError::Rejected { status: 500, body: "down".into() });
        }
        Ok(())
    }
}

pub fn test_config() -> AppConfig {
    AppConfig {
        server: ServerConfig { host: IpAddr::from([127, 0, 0, 1]), port: 0 },
        database_url: None,
        jwt_secret: "test-secret".into(),
        bcrypt_cost: 4,
        pricing: PricingConfig { credit_card_fee_rate: 0.03 },
        emailjs: None,
        admin_seed: None,
    }
}

pub struct TestApp {
    pub router: Router,
    pub notifier: Arc<RecordingNotifier>,
}

pub async fn spawn_app_with(notifier: RecordingNotifier) -> TestApp {
    let repo = Arc::new(InMemoryAccountRepository::with_companies(["Acme", "Globex"]).await);
    let config = test_config();
    ensure_admin(repo.as_ref(), ADMIN_EMAIL, "Admin", ADMIN_PASSWORD, config.bcrypt_cost)
        .await
        .unwrap();

    let notifier = Arc::new(notifier);
    let state = AppState::new(repo, notifier.clone(), config);
    TestApp { router: build_app(state), notifier }
}

pub async fn spawn_app() -> TestApp {
    spawn_app_with(RecordingNotifier::default()).await
}

impl TestApp {
    pub async fn send(&self, req: Request<Body>) -> (StatusCode, Value) {
        let resp = self.router.clone().oneshot(req).await.unwrap();
        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, json)
    }

    pub async fn get(&self, path: &str, token: Option<&str>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method("GET").uri(format!("/quotedesk{path}"));
        if let Some(t) = token {
            builder = builder.header("Authorization", format!("Bearer {t}"));
        }
        self.send(builder.body(Body::empty()).unwrap()).await
    }

    pub async fn call(&self, method: &str, path: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        let mut builder = Request::builder()
            .method(method)
            .uri(format!("/quotedesk{path}"))
            .header("Content-Type", "application/json");
        if let Some(t) = token {
            builder = builder.header("Authorization", format!("Bearer {t}"));
        }
        self.send(builder.body(Body::from(body.to_string())).unwrap()).await
    }

    pub async fn login(&self, email: &str, password: &str) -> String {
        let (status, body) = self
            .call("POST", "/users/login", None, serde_json::json!({ "email": email, "password": password }))
            .await;
        assert_eq!(status, StatusCode::OK, "login failed: {body}");
        body["access_token"].as_str().unwrap().to_string()
    }

    pub async fn admin_token(&self) -> String {
        self.login(ADMIN_EMAIL, ADMIN_PASSWORD).await
    }
}

use std::sync::Arc;

use crate::accounts::notify::Notifier;
use crate::accounts::repository::AccountRepository;
use crate::config::AppConfig;

#[derive(Clone)]
pub struct AppState {
    pub accounts: Arc<dyn AccountRepository>,
    pub notifier: Arc<dyn Notifier>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(
        accounts: Arc<dyn AccountRepository>,
        notifier: Arc<dyn Notifier>,
        config: AppConfig,
    ) -> Self {
        Self { accounts, notifier, config: Arc::new(config) }
    }
}

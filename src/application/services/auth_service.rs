use async_trait::async_trait;
use reqwest::Method;
use std::sync::Arc;
use tracing::{debug, info};

use crate::{
    application::models::user::CurrentUser, config::Config, constants::AUTH_ME_PATH,
    error::AppError, transport::http_client::PvHttpClient,
};

/// Session-identity operations.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Resolves the identity behind the stored token.
    async fn get_current_user(&self) -> Result<CurrentUser, AppError>;
}

pub struct AuthServiceImpl<T: PvHttpClient> {
    config: Arc<Config>,
    client: Arc<T>,
}

impl<T: PvHttpClient> AuthServiceImpl<T> {
    pub fn new(config: Arc<Config>, client: Arc<T>) -> Self {
        Self { config, client }
    }

    pub fn get_config(&self) -> &Config {
        &self.config
    }
}

#[async_trait]
impl<T: PvHttpClient + 'static> AuthService for AuthServiceImpl<T> {
    async fn get_current_user(&self) -> Result<CurrentUser, AppError> {
        info!("Fetching current session identity");

        let user = self
            .client
            .request::<(), CurrentUser>(Method::GET, AUTH_ME_PATH, None)
            .await?;

        debug!("Current user resolved: id {}", user.id);
        Ok(user)
    }
}

use async_trait::async_trait;
use reqwest::Method;
use std::sync::Arc;
use tracing::{debug, info};

use crate::{
    application::models::hashtag::{normalize_hashtag_name, Hashtag, NewHashtag},
    config::Config,
    constants::HASHTAGS_PATH,
    error::AppError,
    transport::http_client::PvHttpClient,
};

/// Hashtag operations against the external API.
#[async_trait]
pub trait HashtagService: Send + Sync {
    async fn list_hashtags(&self) -> Result<Vec<Hashtag>, AppError>;

    /// Creates a hashtag. The name is normalized first (trimmed, one leading
    /// `#` stripped); an empty result is rejected without a request. A
    /// duplicate name surfaces as [`AppError::Conflict`].
    async fn create_hashtag(&self, name: &str) -> Result<Hashtag, AppError>;

    /// Free-text search over hashtag names. May return an empty list.
    async fn search_hashtags(&self, query: &str) -> Result<Vec<Hashtag>, AppError>;
}

pub struct HashtagServiceImpl<T: PvHttpClient> {
    config: Arc<Config>,
    client: Arc<T>,
}

impl<T: PvHttpClient> HashtagServiceImpl<T> {
    pub fn new(config: Arc<Config>, client: Arc<T>) -> Self {
        Self { config, client }
    }

    pub fn get_config(&self) -> &Config {
        &self.config
    }
}

#[async_trait]
impl<T: PvHttpClient + 'static> HashtagService for HashtagServiceImpl<T> {
    async fn list_hashtags(&self) -> Result<Vec<Hashtag>, AppError> {
        info!("Listing hashtags");

        let hashtags = self
            .client
            .request::<(), Vec<Hashtag>>(Method::GET, HASHTAGS_PATH, None)
            .await?;

        debug!("Listed {} hashtags", hashtags.len());
        Ok(hashtags)
    }

    async fn create_hashtag(&self, name: &str) -> Result<Hashtag, AppError> {
        let name = normalize_hashtag_name(name);
        if name.is_empty() {
            return Err(AppError::InvalidInput(
                "hashtag name is empty".to_string(),
            ));
        }

        info!("Creating hashtag {}", name);
        let payload = NewHashtag { name };
        let path = format!("{}/", HASHTAGS_PATH);

        let hashtag = self
            .client
            .request::<NewHashtag, Hashtag>(Method::POST, &path, Some(&payload))
            .await?;

        debug!("Hashtag created with id {}", hashtag.id);
        Ok(hashtag)
    }

    async fn search_hashtags(&self, query: &str) -> Result<Vec<Hashtag>, AppError> {
        let path = format!("{}/search?q={}", HASHTAGS_PATH, query);
        info!("Searching hashtags");

        let hashtags = self
            .client
            .request::<(), Vec<Hashtag>>(Method::GET, &path, None)
            .await?;

        debug!("Search matched {} hashtags", hashtags.len());
        Ok(hashtags)
    }
}

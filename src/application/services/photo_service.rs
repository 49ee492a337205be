use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Method;
use std::sync::Arc;
use tracing::{debug, info};

use crate::{
    application::models::photo::{DeleteConfirmation, Photo, PhotoUpload},
    config::Config,
    constants::PHOTOS_PATH,
    error::AppError,
    transport::http_client::PvHttpClient,
};

/// Photo operations against the external API.
#[async_trait]
pub trait PhotoService: Send + Sync {
    /// Lists photos, optionally restricted to those carrying the named
    /// hashtag. No filter returns the server's full listing.
    async fn list_photos(&self, hashtag: Option<&str>) -> Result<Vec<Photo>, AppError>;

    /// Fetches a single photo by id.
    async fn get_photo(&self, photo_id: u64) -> Result<Photo, AppError>;

    /// Uploads a photo file with its comma-separated hashtag text.
    async fn upload_photo(&self, upload: PhotoUpload) -> Result<Photo, AppError>;

    /// Deletes a photo by id. Whether deleting a missing photo fails is
    /// server-defined; a 404 surfaces as [`AppError::NotFound`].
    async fn delete_photo(&self, photo_id: u64) -> Result<DeleteConfirmation, AppError>;
}

pub struct PhotoServiceImpl<T: PvHttpClient> {
    config: Arc<Config>,
    client: Arc<T>,
}

impl<T: PvHttpClient> PhotoServiceImpl<T> {
    pub fn new(config: Arc<Config>, client: Arc<T>) -> Self {
        Self { config, client }
    }

    pub fn get_config(&self) -> Arc<Config> {
        self.config.clone()
    }
}

#[async_trait]
impl<T: PvHttpClient + 'static> PhotoService for PhotoServiceImpl<T> {
    async fn list_photos(&self, hashtag: Option<&str>) -> Result<Vec<Photo>, AppError> {
        let path = match hashtag {
            Some(tag) => format!("{}?hashtag={}", PHOTOS_PATH, tag),
            None => PHOTOS_PATH.to_string(),
        };
        info!("Listing photos");

        let photos = self
            .client
            .request::<(), Vec<Photo>>(Method::GET, &path, None)
            .await?;

        debug!("Listed {} photos", photos.len());
        Ok(photos)
    }

    async fn get_photo(&self, photo_id: u64) -> Result<Photo, AppError> {
        let path = format!("{}/{}", PHOTOS_PATH, photo_id);
        info!("Fetching photo {}", photo_id);

        self.client
            .request::<(), Photo>(Method::GET, &path, None)
            .await
    }

    async fn upload_photo(&self, upload: PhotoUpload) -> Result<Photo, AppError> {
        info!("Uploading photo {}", upload.file_name);

        let file_part = Part::bytes(upload.data)
            .file_name(upload.file_name)
            .mime_str(&upload.content_type)?;
        let form = Form::new()
            .part("file", file_part)
            .text("hashtags", upload.hashtags);

        let path = format!("{}/", PHOTOS_PATH);
        let photo = self
            .client
            .request_multipart::<Photo>(&path, form)
            .await?;

        debug!("Photo uploaded with id {}", photo.id);
        Ok(photo)
    }

    async fn delete_photo(&self, photo_id: u64) -> Result<DeleteConfirmation, AppError> {
        let path = format!("{}/{}", PHOTOS_PATH, photo_id);
        info!("Deleting photo {}", photo_id);

        self.client
            .request::<(), DeleteConfirmation>(Method::DELETE, &path, None)
            .await
    }
}

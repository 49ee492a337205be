//! Async client for the PhotoVault photo management API.
//!
//! The crate owns the session-token lifecycle (capture from the OIDC login
//! redirect, durable storage, clear-on-401) and exposes typed operations for
//! the API's resource groups. A single [`transport::http_client::PvHttpClient`]
//! carries every request: it attaches the stored bearer token, and on a 401
//! response clears the session and fires
//! [`session::events::SessionEvents::session_invalidated`] before the error
//! reaches the caller. All other failures pass through unmodified.
//!
//! ```no_run
//! use photovault_client::application::services::photo_service::{
//!     PhotoService, PhotoServiceImpl,
//! };
//! use photovault_client::config::Config;
//! use photovault_client::session::events::NullSessionEvents;
//! use photovault_client::session::store::FileSessionStore;
//! use photovault_client::transport::http_client::PvHttpClientImpl;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Arc::new(Config::new());
//! let store = Arc::new(FileSessionStore::new("/tmp/photovault-token"));
//! let client = Arc::new(PvHttpClientImpl::new(
//!     &config,
//!     store,
//!     Arc::new(NullSessionEvents),
//! )?);
//!
//! let photos = PhotoServiceImpl::new(config, client);
//! for photo in photos.list_photos(Some("travel")).await? {
//!     println!("{} {}", photo.id, photo.public_url);
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;

pub mod application;

mod constants;

pub mod error;

pub mod session;

pub mod transport;

pub mod utils;

use std::fs;
use std::path::PathBuf;
use std::sync::RwLock;
use tracing::{debug, error};

/// Single-slot storage for the current bearer token.
///
/// The store is the only owner of the credential: the transport reads it at
/// send time, the auth helpers write it after the login redirect, and the
/// 401 recovery clears it. Implementations are infallible — a storage medium
/// that cannot be read behaves as if no token were present.
pub trait SessionStore: Send + Sync {
    /// Stores the token verbatim. The token is opaque; no validation.
    fn set_token(&self, token: &str);

    /// Returns the current token, or `None` when no session is active.
    fn get_token(&self) -> Option<String>;

    /// Removes the stored token. Idempotent.
    fn clear_token(&self);
}

/// Process-lifetime store. The token does not survive a restart.
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    token: RwLock<Option<String>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for InMemorySessionStore {
    fn set_token(&self, token: &str) {
        let mut guard = self.token.write().unwrap_or_else(|e| e.into_inner());
        *guard = Some(token.to_string());
    }

    fn get_token(&self) -> Option<String> {
        let guard = self.token.read().unwrap_or_else(|e| e.into_inner());
        guard.clone()
    }

    fn clear_token(&self) {
        let mut guard = self.token.write().unwrap_or_else(|e| e.into_inner());
        *guard = None;
    }
}

/// Durable store backed by a single file, so the session survives a process
/// restart. IO failures are logged and degrade to the absent state.
#[derive(Debug)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SessionStore for FileSessionStore {
    fn set_token(&self, token: &str) {
        if let Err(e) = fs::write(&self.path, token) {
            error!("Failed to persist session token to {:?}: {}", self.path, e);
        }
    }

    fn get_token(&self) -> Option<String> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => {
                let token = contents.trim();
                if token.is_empty() {
                    None
                } else {
                    Some(token.to_string())
                }
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => {
                error!("Failed to read session token from {:?}: {}", self.path, e);
                None
            }
        }
    }

    fn clear_token(&self) {
        match fs::remove_file(&self.path) {
            Ok(()) => debug!("Session token file {:?} removed", self.path),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                error!("Failed to remove session token file {:?}: {}", self.path, e);
            }
        }
    }
}

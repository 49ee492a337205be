use tracing::warn;

/// Hook the transport fires when the server rejects the session.
///
/// Fired exactly once per 401 response, after the session store has been
/// cleared and before the error reaches the caller. The hosting application
/// reacts by sending the user to [`crate::session::auth::login_url`].
pub trait SessionEvents: Send + Sync {
    fn session_invalidated(&self);
}

/// Logs the invalidation and does nothing else. For hosts that observe the
/// session store directly instead of subscribing.
#[derive(Debug, Default)]
pub struct NullSessionEvents;

impl SessionEvents for NullSessionEvents {
    fn session_invalidated(&self) {
        warn!("Session invalidated by the server");
    }
}

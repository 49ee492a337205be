use crate::config::Config;
use crate::constants::{AUTH_LOGIN_PATH, TOKEN_QUERY_PARAM};
use crate::session::store::SessionStore;
use reqwest::Url;
use tracing::{debug, info};

/// Login entry point on the external API. Navigating here starts the
/// redirect-based OIDC flow; the server eventually redirects back to the
/// client with a `token` query parameter.
pub fn login_url(config: &Config) -> String {
    format!("{}{}", config.rest_api.base_url, AUTH_LOGIN_PATH)
}

/// Extracts the session token from a post-login redirect URL.
///
/// Returns `None` when the URL does not parse, carries no `token` parameter,
/// or carries an empty one.
pub fn token_from_redirect(redirect_url: &str) -> Option<String> {
    let url = Url::parse(redirect_url).ok()?;
    url.query_pairs()
        .find(|(key, _)| key == TOKEN_QUERY_PARAM)
        .map(|(_, value)| value.into_owned())
        .filter(|token| !token.is_empty())
}

/// Captures the redirect token into the session store, if one is present.
/// Returns whether a token was stored.
pub fn adopt_redirect_token(store: &dyn SessionStore, redirect_url: &str) -> bool {
    match token_from_redirect(redirect_url) {
        Some(token) => {
            store.set_token(&token);
            info!("Session token captured from login redirect");
            true
        }
        None => {
            debug!("No session token in redirect URL");
            false
        }
    }
}

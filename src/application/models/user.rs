use serde::Deserialize;

/// The identity record behind `GET /auth/me`. The OIDC provider decides
/// which profile fields are present.
#[derive(Debug, Clone, Deserialize)]
pub struct CurrentUser {
    pub id: u64,
    pub email: Option<String>,
    pub username: Option<String>,
}

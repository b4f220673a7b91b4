/// Request authentication plumbing
///
/// The api layer validates the bearer token, loads the full `User` row, and
/// inserts it into request extensions; handlers pull it back out with the
/// [`CurrentUser`] extractor. Loading the row (rather than trusting the
/// token claims alone) gives the access policy the stored display name and
/// the current active flag.

use axum::{
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::models::user::User;

/// Error type for request authentication
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// No Authorization header
    #[error("Missing credentials")]
    MissingCredentials,

    /// Header present but not a bearer token
    #[error("Invalid authorization header: {0}")]
    InvalidFormat(String),

    /// Token failed validation
    #[error("Invalid token: {0}")]
    InvalidToken(String),

    /// Token subject no longer exists
    #[error("Unknown user")]
    UnknownUser,

    /// Account has been deactivated
    #[error("Account is inactive")]
    Inactive,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "error": "unauthorized",
            "message": self.to_string(),
        }));
        (StatusCode::UNAUTHORIZED, body).into_response()
    }
}

/// The authenticated principal, extracted from request extensions
///
/// # Example
///
/// ```no_run
/// use hivedesk_shared::auth::middleware::CurrentUser;
///
/// async fn handler(CurrentUser(user): CurrentUser) -> String {
///     format!("Hello, {}", user.name)
/// }
/// ```
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

#[axum::async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<User>()
            .cloned()
            .map(CurrentUser)
            .ok_or(AuthError::MissingCredentials)
    }
}

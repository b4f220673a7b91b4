/// Access-token generation and validation
///
/// HS256-signed JWTs carrying the user id and role. Tokens are short-lived
/// (30 minutes); there is no refresh flow, clients log in again.
///
/// # Example
///
/// ```
/// use hivedesk_shared::auth::jwt::{create_token, validate_token, Claims};
/// use hivedesk_shared::models::user::Role;
/// use uuid::Uuid;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let claims = Claims::new(Uuid::new_v4(), Role::Employee);
/// let token = create_token(&claims, "a-secret-at-least-32-bytes-long!")?;
///
/// let validated = validate_token(&token, "a-secret-at-least-32-bytes-long!")?;
/// assert_eq!(validated.sub, claims.sub);
/// # Ok(())
/// # }
/// ```

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::user::Role;

/// Issuer baked into every token
pub const ISSUER: &str = "hivedesk";

/// Access-token lifetime in minutes
pub const ACCESS_TOKEN_MINUTES: i64 = 30;

/// Error type for token operations
#[derive(Debug, thiserror::Error)]
pub enum JwtError {
    /// Failed to sign a token
    #[error("Failed to create token: {0}")]
    CreateError(String),

    /// Token has expired
    #[error("Token has expired")]
    Expired,

    /// Signature, issuer, or structure check failed
    #[error("Invalid token: {0}")]
    Invalid(String),
}

/// Token claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the user ID
    pub sub: Uuid,

    /// Account role at issue time
    pub role: Role,

    /// Issuer, always [`ISSUER`]
    pub iss: String,

    /// Issued-at (Unix timestamp)
    pub iat: i64,

    /// Expiration (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Creates claims expiring [`ACCESS_TOKEN_MINUTES`] from now
    pub fn new(user_id: Uuid, role: Role) -> Self {
        let now = Utc::now();
        Self {
            sub: user_id,
            role,
            iss: ISSUER.to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::minutes(ACCESS_TOKEN_MINUTES)).timestamp(),
        }
    }
}

/// Signs claims into a compact token string
pub fn create_token(claims: &Claims, secret: &str) -> Result<String, JwtError> {
    encode(
        &Header::new(Algorithm::HS256),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| JwtError::CreateError(e.to_string()))
}

/// Validates a token's signature, expiry, and issuer
pub fn validate_token(token: &str, secret: &str) -> Result<Claims, JwtError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[ISSUER]);

    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => JwtError::Expired,
        _ => JwtError::Invalid(e.to_string()),
    })?;

    Ok(data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret-key-at-least-32-bytes!";

    #[test]
    fn test_round_trip() {
        let user_id = Uuid::new_v4();
        let claims = Claims::new(user_id, Role::Hr);
        let token = create_token(&claims, SECRET).unwrap();

        let validated = validate_token(&token, SECRET).unwrap();
        assert_eq!(validated.sub, user_id);
        assert_eq!(validated.role, Role::Hr);
        assert_eq!(validated.iss, ISSUER);
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let claims = Claims::new(Uuid::new_v4(), Role::Employee);
        let token = create_token(&claims, SECRET).unwrap();

        let result = validate_token(&token, "another-secret-also-32-bytes-long");
        assert!(matches!(result, Err(JwtError::Invalid(_))));
    }

    #[test]
    fn test_expired_token_rejected() {
        let mut claims = Claims::new(Uuid::new_v4(), Role::Employee);
        claims.iat -= 7200;
        claims.exp = claims.iat + 60;
        let token = create_token(&claims, SECRET).unwrap();

        let result = validate_token(&token, SECRET);
        assert!(matches!(result, Err(JwtError::Expired)));
    }

    #[test]
    fn test_garbage_rejected() {
        assert!(validate_token("not.a.token", SECRET).is_err());
    }
}

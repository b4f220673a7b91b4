/// Authentication endpoints
///
/// # Endpoints
///
/// - `POST /auth/login` - Login and get an access token (public)
/// - `POST /auth/register` - Register a new user (HR only)

use axum::{extract::State, Json};
use hivedesk_shared::{
    auth::{jwt, middleware::CurrentUser, password},
    models::user::{CreateUser, Role, User},
};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};

/// Login request
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    /// Email address
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    /// Password
    pub password: String,
}

/// Login response
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    /// Access token (30 minutes)
    pub access_token: String,

    /// Always "bearer"
    pub token_type: &'static str,

    /// The authenticated account
    pub user: User,
}

/// Register request
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Display name
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: String,

    /// Email address
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    /// Password
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,

    /// Account role
    pub role: Role,

    /// Active flag (defaults to true)
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

/// Login endpoint
///
/// Authenticates by email and password and returns a short-lived access
/// token. Wrong email and wrong password are indistinguishable to the
/// caller, and inactive accounts cannot log in.
///
/// # Errors
///
/// - `401 Unauthorized`: Unknown email, wrong password, inactive account
/// - `422 Unprocessable Entity`: Malformed email
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    req.validate()?;

    let user = User::find_by_email(&state.db, &req.email)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Incorrect email or password".to_string()))?;

    let valid = password::verify_password(&req.password, &user.password_hash)?;
    if !valid {
        return Err(ApiError::Unauthorized(
            "Incorrect email or password".to_string(),
        ));
    }

    if !user.is_active {
        return Err(ApiError::Unauthorized("Account is inactive".to_string()));
    }

    let claims = jwt::Claims::new(user.id, user.role);
    let access_token = jwt::create_token(&claims, state.jwt_secret())?;

    Ok(Json(LoginResponse {
        access_token,
        token_type: "bearer",
        user,
    }))
}

/// Registration endpoint (HR only)
///
/// Creates a new HR or employee account. The requesting principal must hold
/// the HR role; the email must be unused.
///
/// # Errors
///
/// - `403 Forbidden`: Requester is not HR
/// - `409 Conflict`: Email already registered
/// - `422 Unprocessable Entity`: Validation failed
pub async fn register(
    State(state): State<AppState>,
    CurrentUser(current): CurrentUser,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<Json<User>> {
    if current.role != Role::Hr {
        return Err(ApiError::Forbidden("Access denied".to_string()));
    }

    req.validate()?;

    if User::find_by_email(&state.db, &req.email).await?.is_some() {
        return Err(ApiError::Conflict("Email already registered".to_string()));
    }

    let password_hash = password::hash_password(&req.password)?;

    let user = User::create(
        &state.db,
        CreateUser {
            name: req.name,
            email: req.email,
            password_hash,
            role: req.role,
            is_active: req.is_active,
        },
    )
    .await?;

    Ok(Json(user))
}

/// Application state and router builder
///
/// Defines the shared application state and builds the axum router with all
/// routes and middleware. State is constructed explicitly from its
/// dependencies (pool, config, storage root); there are no process-wide
/// singletons.
///
/// # Example
///
/// ```no_run
/// use hivedesk_api::{app::AppState, config::Config, storage::DocumentStorage};
/// use sqlx::PgPool;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let pool = PgPool::connect(&config.database.url).await?;
/// let storage = DocumentStorage::new(&config.storage.upload_dir);
/// let state = AppState::new(pool, config, storage);
/// let app = hivedesk_api::app::build_router(state);
/// # Ok(())
/// # }
/// ```

use axum::{
    extract::{Request, State},
    http::{header, HeaderValue, Method},
    middleware::Next,
    response::Response,
    routing::{get, post},
    Router,
};
use hivedesk_shared::auth::{jwt, middleware::AuthError};
use hivedesk_shared::models::user::User;
use sqlx::PgPool;
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::{config::Config, storage::DocumentStorage};

/// Shared application state
///
/// Cloned per request via axum's `State` extractor; internals are cheap to
/// clone.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: PgPool,

    /// Application configuration
    pub config: Arc<Config>,

    /// Document blob storage
    pub storage: DocumentStorage,
}

impl AppState {
    /// Creates new application state
    pub fn new(db: PgPool, config: Config, storage: DocumentStorage) -> Self {
        Self {
            db,
            config: Arc::new(config),
            storage,
        }
    }

    /// Gets the JWT secret for token operations
    pub fn jwt_secret(&self) -> &str {
        &self.config.jwt.secret
    }
}

/// Builds the complete axum router
///
/// # Architecture
///
/// ```text
/// /
/// ├── /health                                  # Liveness (public)
/// ├── /auth/login                              # Login (public)
/// ├── /auth/register                           # HR-only registration
/// └── /:name/:role/                            # Path-scoped, authenticated
///     ├── GET    /dashboard
///     ├── GET    /employees
///     ├── GET    /manage/:employee_id
///     ├── PUT    /manage/:employee_id
///     ├── DELETE /manage/:employee_id
///     ├── GET    /tasks
///     ├── POST   /tasks
///     ├── DELETE /tasks/:task_id
///     ├── POST   /tasks/complete
///     ├── POST   /assign-task
///     ├── GET    /documents
///     ├── POST   /documents/upload
///     ├── POST   /documents/:document_id/verify
///     ├── GET    /training
///     ├── POST   /training
///     ├── POST   /training/progress
///     ├── GET    /reports/overview
///     └── GET    /reports/employee/:employee_id
/// ```
///
/// Every `/:name/:role/` handler runs the access policy against the target
/// identity in the path; the bearer-auth layer has already loaded the
/// principal row by then.
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    // Public routes: no credentials required
    let public_routes = Router::new()
        .route("/health", get(routes::health::health_check))
        .route("/auth/login", post(routes::auth::login));

    // Everything else requires a valid bearer token
    let protected_routes = Router::new()
        .route("/auth/register", post(routes::auth::register))
        .route("/:name/:role/dashboard", get(routes::dashboard::get_dashboard))
        .route("/:name/:role/employees", get(routes::employees::list_employees))
        .route(
            "/:name/:role/manage/:employee_id",
            get(routes::employees::manage_employee)
                .put(routes::employees::update_employee)
                .delete(routes::employees::delete_employee),
        )
        .route(
            "/:name/:role/tasks",
            get(routes::tasks::list_tasks).post(routes::tasks::create_task),
        )
        .route("/:name/:role/tasks/complete", post(routes::tasks::complete_task))
        .route("/:name/:role/tasks/:task_id", axum::routing::delete(routes::tasks::delete_task))
        .route("/:name/:role/assign-task", post(routes::tasks::assign_task))
        .route("/:name/:role/documents", get(routes::documents::list_documents))
        .route("/:name/:role/documents/upload", post(routes::documents::upload_document))
        .route(
            "/:name/:role/documents/:document_id/verify",
            post(routes::documents::verify_document),
        )
        .route(
            "/:name/:role/training",
            get(routes::training::list_training).post(routes::training::create_module),
        )
        .route(
            "/:name/:role/training/progress",
            post(routes::training::update_progress),
        )
        .route("/:name/:role/reports/overview", get(routes::reports::overview))
        .route(
            "/:name/:role/reports/employee/:employee_id",
            get(routes::reports::employee_report),
        )
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            bearer_auth_layer,
        ));

    // Configure CORS based on environment
    let cors = if state.config.api.cors_origins.contains(&"*".to_string()) {
        CorsLayer::permissive()
    } else {
        let origins: Vec<HeaderValue> = state
            .config
            .api
            .cors_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
            .allow_credentials(true)
            .max_age(std::time::Duration::from_secs(3600))
    };

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors)
        .with_state(state)
}

/// Bearer-token authentication layer
///
/// Validates the JWT from the Authorization header, loads the subject's
/// user row, and injects it into request extensions. Loading the row keeps
/// the principal's stored name and active flag current: the access policy
/// compares names as stored, and a deactivated account is rejected even if
/// its token has not yet expired.
async fn bearer_auth_layer(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, crate::error::ApiError> {
    let auth_header = req
        .headers()
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(AuthError::MissingCredentials)?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AuthError::InvalidFormat("Expected Bearer token".to_string()))?;

    let claims = jwt::validate_token(token, state.jwt_secret())?;

    let user = User::find_by_id(&state.db, claims.sub)
        .await?
        .ok_or(AuthError::UnknownUser)?;

    if !user.is_active {
        return Err(AuthError::Inactive.into());
    }

    req.extensions_mut().insert(user);

    Ok(next.run(req).await)
}

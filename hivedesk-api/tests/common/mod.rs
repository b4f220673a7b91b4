/// Common test utilities for integration tests
///
/// Shared infrastructure for the API integration suite:
/// - Test database setup (migrations run on first connect)
/// - Test HR and employee accounts with unique names/emails
/// - Access-token generation
/// - Router construction against the real application state
///
/// These helpers require a running PostgreSQL reachable via `DATABASE_URL`;
/// the tests that use them are `#[ignore]`d so the default test run stays
/// database-free.

use hivedesk_api::app::{build_router, AppState};
use hivedesk_api::config::{ApiConfig, Config, DatabaseConfig, JwtConfig, StorageConfig};
use hivedesk_api::storage::DocumentStorage;
use hivedesk_shared::auth::jwt::{create_token, Claims};
use hivedesk_shared::auth::password::hash_password;
use hivedesk_shared::models::task::{CreateTask, Task};
use hivedesk_shared::models::training_module::{CreateTrainingModule, TrainingModule};
use hivedesk_shared::models::user::{CreateUser, Role, User};
use sqlx::PgPool;
use uuid::Uuid;

/// Password used for every test account
pub const TEST_PASSWORD: &str = "Password123!";

/// Test context containing all necessary resources
pub struct TestContext {
    pub db: PgPool,
    pub app: axum::Router,
    pub hr: User,
    pub hr_token: String,
    pub employee: User,
    pub employee_token: String,
}

impl TestContext {
    /// Creates a new test context with fresh HR and employee accounts
    pub async fn new() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")
            .map_err(|_| anyhow::anyhow!("DATABASE_URL is required for integration tests"))?;

        let config = Config {
            api: ApiConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
                cors_origins: vec!["*".to_string()],
            },
            database: DatabaseConfig {
                url: database_url.clone(),
                max_connections: 5,
            },
            jwt: JwtConfig {
                secret: "integration-test-secret-32-bytes!!".to_string(),
            },
            storage: StorageConfig {
                upload_dir: std::env::temp_dir()
                    .join(format!("hivedesk-test-{}", Uuid::new_v4()))
                    .to_string_lossy()
                    .into_owned(),
            },
        };

        let db = PgPool::connect(&database_url).await?;

        // Path relative to the crate manifest, not this file
        sqlx::migrate!("../migrations").run(&db).await?;

        let suffix = Uuid::new_v4();
        let hr = User::create(
            &db,
            CreateUser {
                name: format!("test-hr-{}", suffix),
                email: format!("test-hr-{}@example.com", suffix),
                password_hash: hash_password(TEST_PASSWORD)?,
                role: Role::Hr,
                is_active: true,
            },
        )
        .await?;

        let employee = User::create(
            &db,
            CreateUser {
                name: format!("test-employee-{}", suffix),
                email: format!("test-employee-{}@example.com", suffix),
                password_hash: hash_password(TEST_PASSWORD)?,
                role: Role::Employee,
                is_active: true,
            },
        )
        .await?;

        let hr_token = create_token(&Claims::new(hr.id, hr.role), &config.jwt.secret)?;
        let employee_token =
            create_token(&Claims::new(employee.id, employee.role), &config.jwt.secret)?;

        let storage = DocumentStorage::new(&config.storage.upload_dir);
        storage.ensure_root().await?;

        let state = AppState::new(db.clone(), config, storage);
        let app = build_router(state);

        Ok(TestContext {
            db,
            app,
            hr,
            hr_token,
            employee,
            employee_token,
        })
    }

    /// Authorization header value for the HR account
    pub fn hr_auth(&self) -> String {
        format!("Bearer {}", self.hr_token)
    }

    /// Authorization header value for the employee account
    pub fn employee_auth(&self) -> String {
        format!("Bearer {}", self.employee_token)
    }

    /// Creates an extra employee account
    pub async fn create_employee(&self, tag: &str) -> anyhow::Result<User> {
        let suffix = Uuid::new_v4();
        let user = User::create(
            &self.db,
            CreateUser {
                name: format!("test-{}-{}", tag, suffix),
                email: format!("test-{}-{}@example.com", tag, suffix),
                password_hash: hash_password(TEST_PASSWORD)?,
                role: Role::Employee,
                is_active: true,
            },
        )
        .await?;
        Ok(user)
    }

    /// Cleans up test data created by this context
    pub async fn cleanup(&self) -> anyhow::Result<()> {
        User::delete(&self.db, self.employee.id).await?;
        User::delete(&self.db, self.hr.id).await?;
        Ok(())
    }
}

/// Creates a catalog task owned by the context's HR account
pub async fn create_test_task(ctx: &TestContext, title: &str) -> anyhow::Result<Task> {
    let task = Task::create(
        &ctx.db,
        CreateTask {
            title: title.to_string(),
            description: "integration test task".to_string(),
            task_type: "paperwork".to_string(),
            content: String::new(),
            required_document_type: None,
            created_by: Some(ctx.hr.id),
        },
    )
    .await?;
    Ok(task)
}

/// Creates an active training module
pub async fn create_test_module(ctx: &TestContext, title: &str) -> anyhow::Result<TrainingModule> {
    let module = TrainingModule::create(
        &ctx.db,
        CreateTrainingModule {
            title: title.to_string(),
            description: "integration test module".to_string(),
            content: String::new(),
            duration_minutes: 30,
            is_mandatory: false,
        },
    )
    .await?;
    Ok(module)
}

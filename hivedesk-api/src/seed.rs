/// Default-account bootstrap
///
/// On startup the server makes sure a default HR account and a few sample
/// employees exist, so a fresh deployment is immediately usable. Seeding is
/// keyed on the HR account's email: if it exists, nothing is touched.

use sqlx::PgPool;
use tracing::info;

use hivedesk_shared::auth::password::hash_password;
use hivedesk_shared::models::user::{CreateUser, Role, User};

const DEFAULT_HR_EMAIL: &str = "john.hr@company.com";
const DEFAULT_PASSWORD: &str = "password123";

/// Creates the default HR user and sample employees if missing
pub async fn create_default_users(pool: &PgPool) -> anyhow::Result<()> {
    if User::find_by_email(pool, DEFAULT_HR_EMAIL).await?.is_some() {
        info!("Default users already exist, skipping creation");
        return Ok(());
    }

    info!("Creating default users");

    User::create(
        pool,
        CreateUser {
            name: "John HR".to_string(),
            email: DEFAULT_HR_EMAIL.to_string(),
            password_hash: hash_password(DEFAULT_PASSWORD)?,
            role: Role::Hr,
            is_active: true,
        },
    )
    .await?;

    let employees = [
        ("Jane Employee", "jane.employee@company.com"),
        ("Bob Employee", "bob.employee@company.com"),
        ("Alice Employee", "alice.employee@company.com"),
    ];

    for (name, email) in employees {
        User::create(
            pool,
            CreateUser {
                name: name.to_string(),
                email: email.to_string(),
                password_hash: hash_password(DEFAULT_PASSWORD)?,
                role: Role::Employee,
                is_active: true,
            },
        )
        .await?;
    }

    info!(
        hr_email = DEFAULT_HR_EMAIL,
        "Default users created (see deployment docs for the initial password)"
    );

    Ok(())
}

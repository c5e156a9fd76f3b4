use crate::auth::password;
use crate::db::UserStore;
use crate::db::models::{NewUser, Role};
use crate::error::ApiError;
use tracing::{info, warn};

pub const ADMIN_EMAIL: &str = "admin@orgmanage.com";
const ADMIN_NAME: &str = "Admin User";
const ADMIN_PASSWORD: &str = "admin123";

/// Ensure the well-known administrative account exists. Idempotent: repeated
/// invocations (e.g. across restarts) are no-ops after the first.
///
/// Two instances starting against a shared store can both miss the lookup
/// and race the insert; the email UNIQUE constraint arbitrates and the loser
/// logs a warning. Either way the server keeps serving, so every failure
/// here is swallowed after logging.
pub async fn ensure_default_admin(users: &UserStore) {
    if let Err(e) = provision_admin(users).await {
        warn!(error = %e, email = ADMIN_EMAIL, "failed to provision default admin account");
    }
}

async fn provision_admin(users: &UserStore) -> Result<(), ApiError> {
    if users.find_by_email(ADMIN_EMAIL).await?.is_some() {
        info!(email = ADMIN_EMAIL, "default admin account already present");
        return Ok(());
    }

    let password_digest = password::hash_password(ADMIN_PASSWORD).await?;
    users
        .create(NewUser {
            name: ADMIN_NAME.to_string(),
            email: ADMIN_EMAIL.to_string(),
            password_digest,
            role: Role::Admin,
        })
        .await?;

    info!(email = ADMIN_EMAIL, "default admin account created");
    Ok(())
}

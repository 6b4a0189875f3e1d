/// Bootstrap admin account
///
/// On startup the server makes sure an admin account exists when
/// `ADMIN_PASSWORD` is configured. Seeding is idempotent: an existing
/// account with the admin email is left untouched.

use crate::{config::AdminConfig, error::ApiResult};
use homehub_shared::{
    auth::password,
    models::user::{CreateUser, Role},
    store::{Store, StoreError},
};

/// Creates the admin account if configured and missing
///
/// Returns `true` if a new account was created.
pub async fn seed_admin(store: &dyn Store, admin: &AdminConfig) -> ApiResult<bool> {
    let Some(admin_password) = admin.password.as_deref() else {
        tracing::debug!("ADMIN_PASSWORD not set, skipping admin seed");
        return Ok(false);
    };

    if store.find_user_by_email(&admin.email).await?.is_some() {
        tracing::debug!(email = %admin.email, "Admin account already exists");
        return Ok(false);
    }

    let password_hash = password::hash_password(admin_password)?;

    let result = store
        .create_user(CreateUser {
            full_name: admin.name.clone(),
            email: admin.email.clone(),
            password_hash,
            role: Role::Admin.as_str().to_string(),
            phone: None,
            gender: None,
            dob: None,
        })
        .await;

    match result {
        Ok(user) => {
            tracing::info!(user_id = user.id, email = %user.email, "Seeded admin account");
            Ok(true)
        }
        // Another instance seeded it first
        Err(StoreError::DuplicateEmail) => Ok(false),
        Err(e) => Err(e.into()),
    }
}

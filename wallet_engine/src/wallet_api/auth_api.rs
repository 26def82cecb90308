use std::fmt::Debug;

use log::*;

use crate::{
    account_objects::normalize_email,
    db_types::User,
    helpers::verify_password_async,
    traits::{AuthApiError, AuthManagement},
};

/// `AuthApi` checks login credentials against the stored password hashes.
pub struct AuthApi<B> {
    db: B,
}

impl<B: Debug> Debug for AuthApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "AuthApi ({:?})", self.db)
    }
}

impl<B> AuthApi<B>
where B: AuthManagement
{
    pub fn new(db: B) -> Self {
        Self { db }
    }

    /// Returns the user if the email and password match. An unknown email and a wrong password produce the same
    /// [`AuthApiError::InvalidCredentials`] error.
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<User, AuthApiError> {
        let email = normalize_email(email);
        let Some(user) = self.db.fetch_login_details(&email).await? else {
            debug!("🔐️ Login attempt for unknown email {email}");
            return Err(AuthApiError::InvalidCredentials);
        };
        let valid = verify_password_async(password.to_string(), user.password_hash.clone())
            .await
            .map_err(|e| AuthApiError::PasswordHashError(e.to_string()))?;
        if valid {
            debug!("🔐️ User #{} logged in", user.id);
            Ok(user)
        } else {
            debug!("🔐️ Wrong password for user #{}", user.id);
            Err(AuthApiError::InvalidCredentials)
        }
    }
}

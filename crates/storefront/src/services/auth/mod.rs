//! Authentication service.
//!
//! A mock user directory held in memory. Passwords are hashed with Argon2id
//! and never leave this module; callers receive plain [`User`] records that
//! the auth store can persist.

mod error;

pub use error::AuthError;

use std::collections::HashMap;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use enzobay_core::{User, UserId, UserRole};
use secrecy::{ExposeSecret, SecretString};
use tokio::sync::RwLock;
use tracing::instrument;

use crate::checkout::{RegistrationForm, ValidRegistration};

/// Password shared by the seeded demo accounts.
pub const DEMO_PASSWORD: &str = "enzobay-demo";

struct Account {
    user: User,
    password_hash: String,
}

/// In-memory account directory keyed by lower-cased email.
#[derive(Default)]
pub struct AuthService {
    accounts: RwLock<HashMap<String, Account>>,
}

impl AuthService {
    /// Create an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a directory seeded with one demo account per role.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::PasswordHash` if hashing the demo password fails.
    pub async fn with_demo_accounts() -> Result<Self, AuthError> {
        let service = Self::new();
        for (name, email, role) in [
            ("Demo Customer", "customer@enzobay.test", UserRole::Customer),
            ("Demo Seller", "seller@enzobay.test", UserRole::Seller),
            ("Demo Admin", "admin@enzobay.test", UserRole::Admin),
        ] {
            service
                .insert(ValidRegistration {
                    name: name.to_string(),
                    email: email.to_string(),
                    password: SecretString::from(DEMO_PASSWORD),
                    role,
                })
                .await?;
        }
        tracing::info!("demo accounts seeded");
        Ok(service)
    }

    /// Register a new account from a submitted form.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Validation` if the form is invalid.
    /// Returns `AuthError::UserAlreadyExists` if the email is already registered.
    #[instrument(skip(self, form), fields(email = %form.email))]
    pub async fn register(&self, form: RegistrationForm) -> Result<User, AuthError> {
        let registration = form.validate()?;
        self.insert(registration).await
    }

    /// Log in with email and password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if the email/password is wrong.
    #[instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &SecretString) -> Result<User, AuthError> {
        let accounts = self.accounts.read().await;
        let account = accounts
            .get(&email.trim().to_lowercase())
            .ok_or(AuthError::InvalidCredentials)?;

        verify_password(password.expose_secret(), &account.password_hash)?;

        Ok(account.user.clone())
    }

    /// Number of registered accounts.
    pub async fn account_count(&self) -> usize {
        self.accounts.read().await.len()
    }

    async fn insert(&self, registration: ValidRegistration) -> Result<User, AuthError> {
        if self.accounts.read().await.contains_key(&registration.email) {
            return Err(AuthError::UserAlreadyExists);
        }

        // Hash outside the write lock; the re-check below settles races.
        let password_hash = hash_password(registration.password.expose_secret())?;

        let mut accounts = self.accounts.write().await;
        if accounts.contains_key(&registration.email) {
            return Err(AuthError::UserAlreadyExists);
        }
        let user = User {
            id: UserId::new(format!("u-{}", uuid::Uuid::new_v4().simple())),
            name: registration.name,
            email: registration.email.clone(),
            role: registration.role,
        };

        accounts.insert(
            registration.email,
            Account {
                user: user.clone(),
                password_hash,
            },
        );
        tracing::info!(user_id = %user.id, role = %user.role, "account registered");
        Ok(user)
    }
}

/// Hash a password using Argon2id.
fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against a hash.
fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::InvalidCredentials)?;

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::InvalidCredentials)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn form(email: &str) -> RegistrationForm {
        RegistrationForm {
            name: "Grace".to_string(),
            email: email.to_string(),
            password: "hopper-1906".to_string(),
            password_confirm: "hopper-1906".to_string(),
            role: UserRole::Customer,
        }
    }

    #[tokio::test]
    async fn test_register_then_login() {
        let auth = AuthService::new();
        let user = auth.register(form("grace@example.com")).await.unwrap();

        let logged_in = auth
            .login("Grace@Example.com", &SecretString::from("hopper-1906"))
            .await
            .unwrap();
        assert_eq!(logged_in, user);
    }

    #[tokio::test]
    async fn test_wrong_password_and_unknown_email() {
        let auth = AuthService::new();
        auth.register(form("grace@example.com")).await.unwrap();

        let wrong = auth
            .login("grace@example.com", &SecretString::from("nope-nope"))
            .await;
        assert!(matches!(wrong, Err(AuthError::InvalidCredentials)));

        let unknown = auth
            .login("nobody@example.com", &SecretString::from("hopper-1906"))
            .await;
        assert!(matches!(unknown, Err(AuthError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let auth = AuthService::new();
        auth.register(form("grace@example.com")).await.unwrap();
        let again = auth.register(form("GRACE@example.com")).await;
        assert!(matches!(again, Err(AuthError::UserAlreadyExists)));
        assert_eq!(auth.account_count().await, 1);
    }

    #[tokio::test]
    async fn test_invalid_form_rejected() {
        let auth = AuthService::new();
        let result = auth.register(form("not-an-email")).await;
        assert!(matches!(result, Err(AuthError::Validation(_))));
    }
}

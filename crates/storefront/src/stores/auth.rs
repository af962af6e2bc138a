//! Auth store: the signed-in user, if any.

use std::sync::Arc;

use enzobay_core::{User, UserRole};
use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use super::PersistedStore;
use crate::storage::{KeyValueStore, SnapshotFormat, keys};

/// Persisted auth state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthState {
    pub user: Option<User>,
    pub is_authenticated: bool,
}

/// Auth store persisted under `enzobay-auth-storage`.
pub struct AuthStore {
    inner: PersistedStore<AuthState>,
}

impl AuthStore {
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        Self {
            inner: PersistedStore::hydrate(storage, keys::AUTH, SnapshotFormat::Versioned),
        }
    }

    /// Record `user` as signed in, replacing any previous user.
    pub fn sign_in(&self, user: User) {
        tracing::info!(user_id = %user.id, role = %user.role, "user signed in");
        self.inner.update(|state| {
            state.user = Some(user);
            state.is_authenticated = true;
            true
        });
    }

    /// Forget the signed-in user. Returns whether anyone was signed in.
    pub fn sign_out(&self) -> bool {
        self.inner.update(|state| {
            let was_signed_in = state.user.take().is_some();
            state.is_authenticated = false;
            was_signed_in
        })
    }

    #[must_use]
    pub fn current_user(&self) -> Option<User> {
        self.inner.read(|state| state.user.clone())
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.inner
            .read(|state| state.is_authenticated && state.user.is_some())
    }

    /// Whether the signed-in user has `role`.
    #[must_use]
    pub fn has_role(&self, role: UserRole) -> bool {
        self.inner
            .read(|state| state.user.as_ref().is_some_and(|u| u.role == role))
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.inner.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use enzobay_core::UserId;

    use super::*;
    use crate::storage::MemoryStorage;

    fn user() -> User {
        User {
            id: UserId::new("u-1"),
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            role: UserRole::Seller,
        }
    }

    #[test]
    fn test_sign_in_and_out() {
        let store = AuthStore::new(Arc::new(MemoryStorage::new()));
        assert!(!store.is_authenticated());

        store.sign_in(user());
        assert!(store.is_authenticated());
        assert!(store.has_role(UserRole::Seller));
        assert!(!store.has_role(UserRole::Admin));

        assert!(store.sign_out());
        assert!(!store.sign_out());
        assert!(store.current_user().is_none());
    }

    #[test]
    fn test_session_survives_rebuild() {
        let storage: Arc<dyn KeyValueStore> = Arc::new(MemoryStorage::new());
        AuthStore::new(storage.clone()).sign_in(user());

        let store = AuthStore::new(storage);
        assert_eq!(store.current_user(), Some(user()));
    }
}

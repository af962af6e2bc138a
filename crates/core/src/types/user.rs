//! Account records.

use serde::{Deserialize, Serialize};

use super::id::UserId;
use super::status::UserRole;

/// A signed-in account as held by the auth store.
///
/// Never carries credentials; password hashes stay in the auth service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub role: UserRole,
}

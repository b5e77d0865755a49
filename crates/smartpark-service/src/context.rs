//! Request context carrying the authenticated user.

use serde::{Deserialize, Serialize};

use smartpark_entity::user::UserRole;

/// Context for the current authenticated request.
///
/// Built from validated token claims and passed into service methods so
/// that every write knows who is acting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The authenticated user's ID.
    pub user_id: i64,
    /// The user's role at the time the token was issued.
    pub role: UserRole,
    /// The username (from token claims).
    pub username: String,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(user_id: i64, role: UserRole, username: String) -> Self {
        Self {
            user_id,
            role,
            username,
        }
    }

    /// Context for operator actions run from the command line.
    pub fn system() -> Self {
        Self::new(0, UserRole::Admin, "cli".to_string())
    }

    /// Returns whether the current user is an admin.
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

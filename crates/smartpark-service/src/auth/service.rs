//! Account registration and credential checks.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use smartpark_auth::jwt::JwtEncoder;
use smartpark_auth::password::{PasswordHasher, PasswordPolicy};
use smartpark_core::error::AppError;
use smartpark_database::store::UserStore;
use smartpark_entity::user::{NewUser, User, UserRole};

use crate::context::RequestContext;

/// Handles account creation and login.
#[derive(Debug, Clone)]
pub struct AuthService {
    users: Arc<dyn UserStore>,
    hasher: Arc<PasswordHasher>,
    policy: Arc<PasswordPolicy>,
    encoder: Arc<JwtEncoder>,
}

/// A successful login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResult {
    /// The authenticated user.
    pub user: User,
    /// Bearer token for subsequent requests.
    pub token: String,
}

impl AuthService {
    /// Creates a new auth service.
    pub fn new(
        users: Arc<dyn UserStore>,
        hasher: Arc<PasswordHasher>,
        policy: Arc<PasswordPolicy>,
        encoder: Arc<JwtEncoder>,
    ) -> Self {
        Self {
            users,
            hasher,
            policy,
            encoder,
        }
    }

    /// Self-service registration. Never creates an admin.
    pub async fn register(
        &self,
        username: &str,
        password: &str,
        requested_role: Option<UserRole>,
    ) -> Result<User, AppError> {
        if requested_role == Some(UserRole::Admin) {
            warn!(username = %username, "Admin role requested at registration, downgraded to staff");
        }
        self.create_user(username, password, UserRole::Staff).await
    }

    /// Create an account with any role. Reserved for operator tooling.
    pub async fn create_user(
        &self,
        username: &str,
        password: &str,
        role: UserRole,
    ) -> Result<User, AppError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(AppError::validation("Username is required"));
        }
        self.policy.validate(password)?;

        if self.users.find_user_by_username(username).await?.is_some() {
            return Err(AppError::conflict("Username already exists"));
        }

        let password_hash = self.hasher.hash_password(password)?;
        let user = self
            .users
            .create_user(NewUser {
                username: username.to_string(),
                password_hash,
                role,
            })
            .await?;

        info!(user_id = user.id, username = %user.username, role = %user.role, "User created");
        Ok(user)
    }

    /// Check credentials and issue a token.
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginResult, AppError> {
        let user = self
            .users
            .find_user_by_username(username)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))?;

        if !self.hasher.verify_password(password, &user.password_hash)? {
            warn!(username = %username, "Login failed: invalid password");
            return Err(AppError::authentication("Invalid password"));
        }

        let issued = self.encoder.issue(&user)?;
        info!(user_id = user.id, "User logged in");

        Ok(LoginResult {
            user,
            token: issued.token,
        })
    }

    /// The calling user's account.
    pub async fn profile(&self, ctx: &RequestContext) -> Result<User, AppError> {
        self.users
            .find_user(ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }

    /// All accounts. Admins only.
    pub async fn list_users(&self, ctx: &RequestContext) -> Result<Vec<User>, AppError> {
        if !ctx.is_admin() {
            warn!(user_id = ctx.user_id, "User listing refused: not an admin");
            return Err(AppError::authorization("Require Admin Role!"));
        }
        self.users.list_users().await
    }
}

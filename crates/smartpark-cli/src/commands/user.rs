//! User management CLI commands.
//!
//! `user create` is the only way to create an admin account.

use std::sync::Arc;

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use smartpark_auth::jwt::JwtEncoder;
use smartpark_auth::password::{PasswordHasher, PasswordPolicy};
use smartpark_core::config::AppConfig;
use smartpark_core::error::AppError;
use smartpark_entity::user::{User, UserRole};
use smartpark_service::{AuthService, RequestContext};

use crate::output::{self, OutputFormat};

/// Arguments for user commands
#[derive(Debug, Args)]
pub struct UserArgs {
    /// User subcommand
    #[command(subcommand)]
    pub command: UserCommand,
}

/// User subcommands
#[derive(Debug, Subcommand)]
pub enum UserCommand {
    /// Create a user account
    Create {
        /// Username
        username: String,
        /// Role: admin or staff
        #[arg(short, long, default_value = "admin")]
        role: String,
        /// Password; prompted for when omitted
        #[arg(long)]
        password: Option<String>,
    },
    /// List all users
    List,
}

/// User display row for table output
#[derive(Debug, Serialize, Tabled)]
struct UserRow {
    id: i64,
    username: String,
    role: String,
    created_at: String,
}

impl From<&User> for UserRow {
    fn from(u: &User) -> Self {
        Self {
            id: u.id,
            username: u.username.clone(),
            role: u.role.to_string(),
            created_at: u.created_at.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

/// Execute user commands
pub async fn execute(
    args: &UserArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let stores = super::open_stores(config).await?;
    let auth = AuthService::new(
        Arc::clone(&stores.users),
        Arc::new(PasswordHasher::new()),
        Arc::new(PasswordPolicy::new(&config.auth)),
        Arc::new(JwtEncoder::new(&config.auth)),
    );

    let result = match &args.command {
        UserCommand::Create {
            username,
            role,
            password,
        } => create(&auth, username, role, password.as_deref()).await,
        UserCommand::List => {
            let users = auth.list_users(&RequestContext::system()).await;
            users.map(|users| {
                let rows: Vec<UserRow> = users.iter().map(UserRow::from).collect();
                output::print_list(&rows, format);
            })
        }
    };

    stores.close().await;
    result
}

async fn create(
    auth: &AuthService,
    username: &str,
    role: &str,
    password: Option<&str>,
) -> Result<(), AppError> {
    let role: UserRole = role
        .parse()
        .map_err(|_| AppError::validation(format!("Invalid role: {role}")))?;

    let password = match password {
        Some(p) => p.to_string(),
        None => dialoguer::Password::new()
            .with_prompt(format!("Password for '{username}'"))
            .with_confirmation("Confirm password", "Passwords do not match")
            .interact()
            .map_err(|e| AppError::internal(format!("Input error: {e}")))?,
    };

    let user = auth.create_user(username, &password, role).await?;
    output::print_success(&format!(
        "User '{}' created with role {} (id {})",
        user.username, user.role, user.id
    ));
    Ok(())
}

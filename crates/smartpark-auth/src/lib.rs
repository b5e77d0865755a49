//! # smartpark-auth
//!
//! Bearer-token authentication for SmartPark.
//!
//! ## Modules
//!
//! - `jwt`: HS256 token creation and validation
//! - `password`: Argon2id password hashing and the registration policy

pub mod jwt;
pub mod password;

pub use jwt::{Claims, JwtDecoder, JwtEncoder};
pub use password::{PasswordHasher, PasswordPolicy};

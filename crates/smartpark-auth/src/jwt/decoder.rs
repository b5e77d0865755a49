//! JWT token validation.

use jsonwebtoken::errors::ErrorKind as JwtErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use tracing::debug;

use smartpark_core::config::AuthConfig;
use smartpark_core::error::AppError;

use super::claims::Claims;

/// Validates HS256 access tokens.
#[derive(Clone)]
pub struct JwtDecoder {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for JwtDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtDecoder")
            .field("validation", &self.validation)
            .finish()
    }
}

impl JwtDecoder {
    /// Creates a new decoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 5;

        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
        }
    }

    /// Verifies signature and expiry and returns the claims.
    pub fn decode(&self, token: &str) -> Result<Claims, AppError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                debug!(error = %e, "Rejected access token");
                match e.kind() {
                    JwtErrorKind::ExpiredSignature => AppError::authentication("Token has expired"),
                    _ => AppError::authentication("Unauthorized"),
                }
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jwt::JwtEncoder;
    use chrono::{Duration, Utc};
    use smartpark_core::error::ErrorKind;
    use smartpark_entity::user::{User, UserRole};

    fn config(secret: &str) -> AuthConfig {
        AuthConfig {
            jwt_secret: secret.to_string(),
            ..AuthConfig::default()
        }
    }

    fn user() -> User {
        User {
            id: 7,
            username: "attendant".to_string(),
            password_hash: String::new(),
            role: UserRole::Staff,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_issued_token_round_trips_claims() {
        let cfg = config("test-secret");
        let issued = JwtEncoder::new(&cfg).issue(&user()).unwrap();

        let claims = JwtDecoder::new(&cfg).decode(&issued.token).unwrap();

        assert_eq!(claims.user_id(), 7);
        assert_eq!(claims.username, "attendant");
        assert_eq!(claims.role, UserRole::Staff);
        assert_eq!(claims.exp - claims.iat, 24 * 3600);
    }

    #[test]
    fn test_wrong_secret_is_unauthorized() {
        let issued = JwtEncoder::new(&config("one")).issue(&user()).unwrap();

        let err = JwtDecoder::new(&config("two"))
            .decode(&issued.token)
            .unwrap_err();

        assert_eq!(err.kind, ErrorKind::Authentication);
        assert_eq!(err.message, "Unauthorized");
    }

    #[test]
    fn test_expired_token() {
        let cfg = config("test-secret");
        let issued = JwtEncoder::new(&cfg)
            .issue_at(&user(), Utc::now() - Duration::hours(48))
            .unwrap();

        let err = JwtDecoder::new(&cfg).decode(&issued.token).unwrap_err();

        assert_eq!(err.message, "Token has expired");
    }

    #[test]
    fn test_garbage_token() {
        let err = JwtDecoder::new(&config("s")).decode("not.a.jwt").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authentication);
    }
}

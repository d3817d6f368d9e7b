use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use std::fmt;

use crate::config::JwtSettings;
use crate::errors::ApiError;
use crate::types::db::user;
use crate::types::internal::auth::Claims;

/// Manages JWT generation and validation
pub struct TokenService {
    secret: String,
    algorithm: Algorithm,
    expire_minutes: i64,
}

impl TokenService {
    pub fn new(settings: &JwtSettings) -> Self {
        Self {
            secret: settings.secret.clone(),
            algorithm: settings.algorithm,
            expire_minutes: settings.expire_minutes,
        }
    }

    /// Issue a JWT for the given user
    ///
    /// Claims carry the username as subject plus the role and city scope
    /// used by the authorization policy.
    pub fn issue(&self, user: &user::Model) -> Result<String, ApiError> {
        let now = Utc::now().timestamp();

        let claims = Claims {
            sub: user.username.clone(),
            role: user.role.clone(),
            city_id: user.city_id,
            exp: now + self.expire_minutes * 60,
            iat: now,
        };

        encode(
            &Header::new(self.algorithm),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| ApiError::internal(format!("Failed to generate JWT: {}", e)))
    }

    /// Decode and validate a JWT, returning its claims
    ///
    /// Malformed, expired, or wrongly-signed tokens all map to
    /// `Unauthenticated`.
    pub fn decode(&self, token: &str) -> Result<Claims, ApiError> {
        let validation = Validation::new(self.algorithm);

        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &validation,
        )
        .map_err(|e| {
            if matches!(
                e.kind(),
                jsonwebtoken::errors::ErrorKind::ExpiredSignature
            ) {
                ApiError::unauthenticated("Token has expired")
            } else {
                ApiError::unauthenticated("Could not validate credentials")
            }
        })?;

        Ok(token_data.claims)
    }
}

impl fmt::Debug for TokenService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenService")
            .field("secret", &"<redacted>")
            .field("algorithm", &self.algorithm)
            .field("expire_minutes", &self.expire_minutes)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ApiError;

    fn test_settings() -> JwtSettings {
        JwtSettings {
            secret: "test-secret-key-minimum-32-characters-long".to_string(),
            algorithm: Algorithm::HS256,
            expire_minutes: 30,
        }
    }

    fn test_user() -> user::Model {
        user::Model {
            id: 1,
            username: "manager1".to_string(),
            email: "manager1@example.com".to_string(),
            password_hash: "hash".to_string(),
            city_id: 7,
            role: "manager".to_string(),
            is_active: true,
            telegram_id: None,
        }
    }

    #[test]
    fn test_issue_and_decode_round_trip() {
        let service = TokenService::new(&test_settings());

        let token = service.issue(&test_user()).unwrap();
        let claims = service.decode(&token).unwrap();

        assert_eq!(claims.sub, "manager1");
        assert_eq!(claims.role, "manager");
        assert_eq!(claims.city_id, 7);
        assert_eq!(claims.exp - claims.iat, 30 * 60);
    }

    #[test]
    fn test_decode_rejects_garbage_token() {
        let service = TokenService::new(&test_settings());

        let result = service.decode("not-a-jwt");

        assert!(matches!(result, Err(ApiError::Unauthenticated(_))));
    }

    #[test]
    fn test_decode_rejects_token_signed_with_other_secret() {
        let service = TokenService::new(&test_settings());
        let other = TokenService::new(&JwtSettings {
            secret: "another-secret-key-minimum-32-chars-xx".to_string(),
            algorithm: Algorithm::HS256,
            expire_minutes: 30,
        });

        let token = other.issue(&test_user()).unwrap();
        let result = service.decode(&token);

        assert!(matches!(result, Err(ApiError::Unauthenticated(_))));
    }

    #[test]
    fn test_decode_rejects_expired_token() {
        let service = TokenService::new(&test_settings());

        let now = Utc::now().timestamp();
        let expired_claims = Claims {
            sub: "manager1".to_string(),
            role: "manager".to_string(),
            city_id: 7,
            exp: now - 3600,
            iat: now - 7200,
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &expired_claims,
            &EncodingKey::from_secret("test-secret-key-minimum-32-characters-long".as_bytes()),
        )
        .unwrap();

        let result = service.decode(&token);

        match result {
            Err(error) => assert_eq!(error.message(), "Token has expired"),
            Ok(_) => panic!("Expected expired token to be rejected"),
        }
    }
}

//! JWT token issuance and verification
//! Stateless HS256 tokens carrying the owning user's ID

use crate::{config::AppConfig, error::AppError};
use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};

/// Token claims
///
/// `user_id` is the authoritative identity claim; `sub` carries the
/// username for log correlation only and is never used for lookups.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (username, diagnostic)
    pub sub: String,

    /// Owning user ID
    pub user_id: i64,

    /// Issued at (epoch seconds)
    pub iat: i64,

    /// Expiration (epoch seconds)
    pub exp: i64,
}

/// Token codec holding the process-wide signing keys
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    token_ttl_secs: u64,
}

impl JwtService {
    /// Create the codec from config
    pub fn from_config(config: &AppConfig) -> Result<Self, AppError> {
        let secret = config.security.jwt_secret.expose_secret();

        // Ensure secret is at least 32 bytes for HS256
        if secret.len() < 32 {
            return Err(AppError::Config("JWT secret too short (min 32 chars)".to_string()));
        }

        let encoding_key = EncodingKey::from_secret(secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(secret.as_bytes());

        Ok(Self {
            encoding_key,
            decoding_key,
            token_ttl_secs: config.security.token_ttl_secs,
        })
    }

    /// Configured time-to-live in seconds
    pub fn token_ttl_secs(&self) -> u64 {
        self.token_ttl_secs
    }

    /// Issue a signed token bound to the given user
    pub fn issue(&self, user_id: i64, username: &str) -> Result<String, AppError> {
        let now = Utc::now();
        let expiration = now + Duration::seconds(self.token_ttl_secs as i64);

        let claims = Claims {
            sub: username.to_string(),
            user_id,
            iat: now.timestamp(),
            exp: expiration.timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key).map_err(|e| {
            tracing::error!("Failed to encode token: {:?}", e);
            AppError::Internal(format!("Failed to encode token: {}", e))
        })
    }

    /// Verify a token and return the embedded user ID
    ///
    /// Only HS256 is accepted; a token whose header claims any other
    /// algorithm fails verification regardless of its MAC. Expiry is
    /// checked with zero leeway, so a token expiring at T is invalid
    /// from T onward.
    pub fn verify(&self, token: &str) -> Result<i64, AppError> {
        self.verify_claims(token).map(|claims| claims.user_id)
    }

    /// Verify a token and return the full claim set
    pub fn verify_claims(&self, token: &str) -> Result<Claims, AppError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        let claims = decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!("Token verification failed: {:?}", e);
                match e.kind() {
                    ErrorKind::ExpiredSignature => AppError::TokenExpired,
                    ErrorKind::InvalidSignature
                    | ErrorKind::InvalidAlgorithm
                    | ErrorKind::InvalidAlgorithmName => AppError::SignatureInvalid,
                    // Undecodable structure, or a missing/non-integer
                    // user_id claim (never defaulted to zero)
                    _ => AppError::MalformedToken,
                }
            })?;

        // jsonwebtoken only rejects exp < now; the boundary second
        // itself must already count as expired
        if claims.exp <= Utc::now().timestamp() {
            return Err(AppError::TokenExpired);
        }

        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DatabaseConfig, LoggingConfig, SecurityConfig, ServerConfig};
    use secrecy::Secret;

    fn test_config(secret: &str, ttl_secs: u64) -> AppConfig {
        AppConfig {
            server: ServerConfig {
                addr: "127.0.0.1:3000".to_string(),
                graceful_shutdown_timeout_secs: 30,
            },
            database: DatabaseConfig {
                url: Secret::new("postgresql://localhost/test".to_string()),
                max_connections: 10,
                min_connections: 1,
                acquire_timeout_secs: 30,
                idle_timeout_secs: 600,
                max_lifetime_secs: 1800,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                format: "json".to_string(),
            },
            security: SecurityConfig {
                jwt_secret: Secret::new(secret.to_string()),
                token_ttl_secs: ttl_secs,
            },
        }
    }

    const TEST_SECRET: &str = "test_secret_key_32_characters_long!";

    #[test]
    fn test_issue_and_verify_roundtrip() {
        let service = JwtService::from_config(&test_config(TEST_SECRET, 3600)).unwrap();

        let token = service.issue(42, "alice").unwrap();
        let user_id = service.verify(&token).unwrap();
        assert_eq!(user_id, 42);

        let claims = service.verify_claims(&token).unwrap();
        assert_eq!(claims.user_id, 42);
        assert_eq!(claims.sub, "alice");
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn test_short_secret_rejected() {
        let result = JwtService::from_config(&test_config("short", 3600));
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn test_wrong_secret_fails_signature() {
        let issuer = JwtService::from_config(&test_config(TEST_SECRET, 3600)).unwrap();
        let verifier = JwtService::from_config(&test_config(
            "another_secret_key_32_characters_xx",
            3600,
        ))
        .unwrap();

        let token = issuer.issue(1, "alice").unwrap();
        assert!(matches!(verifier.verify(&token), Err(AppError::SignatureInvalid)));
    }

    #[test]
    fn test_garbage_token_is_malformed() {
        let service = JwtService::from_config(&test_config(TEST_SECRET, 3600)).unwrap();
        assert!(matches!(service.verify("not-a-token"), Err(AppError::MalformedToken)));
        assert!(matches!(service.verify(""), Err(AppError::MalformedToken)));
    }

    #[test]
    fn test_foreign_algorithm_rejected() {
        let service = JwtService::from_config(&test_config(TEST_SECRET, 3600)).unwrap();

        // Token signed with HS384 under the same secret must not verify
        let claims = Claims {
            sub: "alice".to_string(),
            user_id: 1,
            iat: Utc::now().timestamp(),
            exp: Utc::now().timestamp() + 3600,
        };
        let foreign = encode(
            &Header::new(Algorithm::HS384),
            &claims,
            &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
        )
        .unwrap();

        assert!(matches!(service.verify(&foreign), Err(AppError::SignatureInvalid)));
    }

    #[test]
    fn test_expired_token_rejected() {
        let service = JwtService::from_config(&test_config(TEST_SECRET, 3600)).unwrap();

        // Hand-craft a token that expired one second ago
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: "alice".to_string(),
            user_id: 1,
            iat: now - 10,
            exp: now - 1,
        };
        let expired = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
        )
        .unwrap();

        assert!(matches!(service.verify(&expired), Err(AppError::TokenExpired)));
    }

    #[test]
    fn test_token_at_exact_expiry_boundary_is_invalid() {
        let service = JwtService::from_config(&test_config(TEST_SECRET, 3600)).unwrap();

        // A token expiring at T is invalid from T onward, so one whose
        // exp equals the current second must already be rejected
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: "alice".to_string(),
            user_id: 1,
            iat: now - 10,
            exp: now,
        };
        let boundary = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
        )
        .unwrap();

        assert!(matches!(service.verify(&boundary), Err(AppError::TokenExpired)));
    }

    #[test]
    fn test_missing_user_id_claim_is_malformed() {
        let service = JwtService::from_config(&test_config(TEST_SECRET, 3600)).unwrap();

        #[derive(Serialize)]
        struct NoIdClaims {
            sub: String,
            iat: i64,
            exp: i64,
        }

        let now = Utc::now().timestamp();
        let token = encode(
            &Header::new(Algorithm::HS256),
            &NoIdClaims {
                sub: "alice".to_string(),
                iat: now,
                exp: now + 3600,
            },
            &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
        )
        .unwrap();

        assert!(matches!(service.verify(&token), Err(AppError::MalformedToken)));
    }

    #[test]
    fn test_non_integer_user_id_is_malformed() {
        let service = JwtService::from_config(&test_config(TEST_SECRET, 3600)).unwrap();

        #[derive(Serialize)]
        struct StringIdClaims {
            sub: String,
            user_id: String,
            iat: i64,
            exp: i64,
        }

        let now = Utc::now().timestamp();
        let token = encode(
            &Header::new(Algorithm::HS256),
            &StringIdClaims {
                sub: "alice".to_string(),
                user_id: "1".to_string(),
                iat: now,
                exp: now + 3600,
            },
            &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
        )
        .unwrap();

        assert!(matches!(service.verify(&token), Err(AppError::MalformedToken)));
    }
}

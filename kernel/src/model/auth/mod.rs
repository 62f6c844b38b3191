use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use shared::{
    config::AuthConfig,
    error::{AppError, AppResult},
};
use uuid::Uuid;

use crate::model::{id::UserId, role::Role};

/// The authenticated identity for one request. Reconstructed from the
/// bearer credential on every request, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Principal {
    pub user_id: UserId,
    pub role: Role,
}

impl Principal {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct AccessClaims {
    sub: Uuid,
    role: String,
    iat: i64,
    exp: i64,
}

/// Signs and verifies the HS256 access token. Verification is a pure
/// cryptographic check against the configured secret; the principal comes
/// straight out of the claims, with no store lookup.
pub struct TokenProvider {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    token_ttl: Duration,
}

impl TokenProvider {
    pub fn new(cfg: &AuthConfig) -> Self {
        let secret = cfg.jwt_secret.as_bytes();
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation: Validation::new(Algorithm::HS256),
            token_ttl: Duration::seconds(cfg.token_ttl_seconds),
        }
    }

    pub fn issue(&self, user_id: UserId, role: Role) -> AppResult<String> {
        let now = Utc::now();
        let claims = AccessClaims {
            sub: user_id.raw(),
            role: role.to_string(),
            iat: now.timestamp(),
            exp: (now + self.token_ttl).timestamp(),
        };
        jsonwebtoken::encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| AppError::CredentialVerificationError(e.into()))
    }

    pub fn verify(&self, token: &str) -> AppResult<Principal> {
        let data = jsonwebtoken::decode::<AccessClaims>(token, &self.decoding, &self.validation)
            .map_err(map_verification_error)?;
        let role = data
            .claims
            .role
            .parse::<Role>()
            .map_err(|_| AppError::InvalidCredential)?;
        Ok(Principal {
            user_id: UserId::from(data.claims.sub),
            role,
        })
    }
}

fn map_verification_error(e: jsonwebtoken::errors::Error) -> AppError {
    use jsonwebtoken::errors::ErrorKind;

    match e.kind() {
        ErrorKind::ExpiredSignature => AppError::ExpiredCredential,
        ErrorKind::InvalidToken
        | ErrorKind::InvalidSignature
        | ErrorKind::ImmatureSignature
        | ErrorKind::InvalidAlgorithm
        | ErrorKind::Base64(_)
        | ErrorKind::Json(_)
        | ErrorKind::Utf8(_) => AppError::InvalidCredential,
        _ => AppError::CredentialVerificationError(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider(secret: &str, ttl_seconds: i64) -> TokenProvider {
        TokenProvider::new(&AuthConfig {
            jwt_secret: secret.to_string(),
            token_ttl_seconds: ttl_seconds,
        })
    }

    #[test]
    fn issue_and_verify_round_trip() {
        let provider = provider("test-secret", 3600);
        let user_id = UserId::new();

        let token = provider.issue(user_id, Role::Admin).unwrap();
        let principal = provider.verify(&token).unwrap();

        assert_eq!(principal.user_id, user_id);
        assert_eq!(principal.role, Role::Admin);
    }

    #[test]
    fn expired_token_is_rejected_as_expired() {
        let provider = provider("test-secret", -3600);
        let token = provider.issue(UserId::new(), Role::User).unwrap();

        assert!(matches!(
            provider.verify(&token),
            Err(AppError::ExpiredCredential)
        ));
    }

    #[test]
    fn token_signed_with_another_secret_is_invalid() {
        let issuer = provider("one-secret", 3600);
        let verifier = provider("another-secret", 3600);
        let token = issuer.issue(UserId::new(), Role::User).unwrap();

        assert!(matches!(
            verifier.verify(&token),
            Err(AppError::InvalidCredential)
        ));
    }

    #[test]
    fn garbage_token_is_invalid() {
        let provider = provider("test-secret", 3600);

        assert!(matches!(
            provider.verify("not-a-jwt"),
            Err(AppError::InvalidCredential)
        ));
    }
}

use anyhow::bail;

use crate::env::{which, Environment};

// Local development fallback only. Startup fails in production when
// JWT_SECRET is unset.
const INSECURE_DEV_JWT_SECRET: &str = "insecure-dev-secret-do-not-deploy";

pub struct AppConfig {
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub access: AccessConfig,
}

impl AppConfig {
    pub fn new() -> anyhow::Result<Self> {
        let database = DatabaseConfig {
            host: env_or("DATABASE_HOST", "localhost"),
            port: std::env::var("DATABASE_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(5432),
            username: env_or("DATABASE_USERNAME", "app"),
            password: env_or("DATABASE_PASSWORD", "passwd"),
            database: env_or("DATABASE_NAME", "app"),
        };
        let auth = AuthConfig {
            jwt_secret: jwt_secret()?,
            token_ttl_seconds: std::env::var("JWT_TTL_SECONDS")
                .ok()
                .and_then(|t| t.parse().ok())
                .unwrap_or(86400),
        };
        let access = AccessConfig {
            conceal_forbidden: std::env::var("CONCEAL_FORBIDDEN_RESOURCES")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(false),
        };
        Ok(Self {
            database,
            auth,
            access,
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn jwt_secret() -> anyhow::Result<String> {
    match std::env::var("JWT_SECRET") {
        Ok(secret) if !secret.is_empty() => Ok(secret),
        _ => match which() {
            Environment::Development => {
                tracing::warn!(
                    "JWT_SECRET is not set; using the insecure development fallback"
                );
                Ok(INSECURE_DEV_JWT_SECRET.to_string())
            }
            Environment::Production => {
                bail!("JWT_SECRET must be set when running in production")
            }
        },
    }
}

pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub database: String,
}

pub struct AuthConfig {
    pub jwt_secret: String,
    pub token_ttl_seconds: i64,
}

/// Controls what a caller who fails the ownership check learns.
///
/// With `conceal_forbidden` set, a denied mutation reports the resource as
/// not found instead of forbidden, so non-owners cannot probe for existence.
pub struct AccessConfig {
    pub conceal_forbidden: bool,
}

// BSD 3-Clause License
// Copyright (c) 2025, NØNOS - NOXTERM
//
//! Configuration type definitions
//! The validated configuration record and the namespace records derived from it.

use serde::Serialize;
use std::str::FromStr;
use std::time::Duration;

use super::loader::RawEnvironment;
use super::schema::*;

/// Deployment environment, from `NODE_ENV`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
    Test,
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "development" => Ok(Environment::Development),
            "production" => Ok(Environment::Production),
            "test" => Ok(Environment::Test),
            _ => Err(format!("Unknown environment: {}", s)),
        }
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Production => write!(f, "production"),
            Environment::Test => write!(f, "test"),
        }
    }
}

/// Fully typed configuration, produced by [`super::validate`].
///
/// Every required variable is present and every default applied. Nothing
/// downstream of this struct handles raw strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedConfig {
    pub node_env: Environment,
    pub port: u16,
    pub cors_origins: Vec<String>,
    pub database_url: String,
    pub database_url_direct: String,
    pub redis_url: Option<String>,
    pub firebase_project_id: String,
    /// Real newlines, already unescaped.
    pub firebase_private_key: String,
    pub firebase_client_email: String,
    pub jwt_secret: String,
    pub jwt_expires_in: String,
    pub cloudinary_cloud_name: String,
    pub cloudinary_api_key: String,
    pub cloudinary_api_secret: String,
    pub goong_api_key: String,
    /// Throttle window in milliseconds.
    pub throttle_ttl: u64,
    pub throttle_limit: u64,
}

impl ValidatedConfig {
    /// Renders the config back into environment form.
    ///
    /// Newlines in the private key are escaped again and the origin list is
    /// re-joined, so validating the result yields an equal config.
    pub fn to_raw(&self) -> RawEnvironment {
        let mut raw = RawEnvironment::from_pairs([
            (NODE_ENV, self.node_env.to_string()),
            (PORT, self.port.to_string()),
            (CORS_ORIGINS, self.cors_origins.join(",")),
            (DATABASE_URL, self.database_url.clone()),
            (DATABASE_URL_DIRECT, self.database_url_direct.clone()),
            (FIREBASE_PROJECT_ID, self.firebase_project_id.clone()),
            (
                FIREBASE_PRIVATE_KEY,
                self.firebase_private_key.replace('\n', "\\n"),
            ),
            (FIREBASE_CLIENT_EMAIL, self.firebase_client_email.clone()),
            (JWT_SECRET, self.jwt_secret.clone()),
            (JWT_EXPIRES_IN, self.jwt_expires_in.clone()),
            (CLOUDINARY_CLOUD_NAME, self.cloudinary_cloud_name.clone()),
            (CLOUDINARY_API_KEY, self.cloudinary_api_key.clone()),
            (CLOUDINARY_API_SECRET, self.cloudinary_api_secret.clone()),
            (GOONG_API_KEY, self.goong_api_key.clone()),
            (THROTTLE_TTL, self.throttle_ttl.to_string()),
            (THROTTLE_LIMIT, self.throttle_limit.to_string()),
        ]);
        if let Some(url) = &self.redis_url {
            raw = raw.with(REDIS_URL, url.clone());
        }
        raw
    }

    pub fn is_production(&self) -> bool {
        self.node_env == Environment::Production
    }
}

/// HTTP listener settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub environment: Environment,
    pub port: u16,
    pub cors_origins: Vec<String>,
}

/// Primary database connection strings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    /// Pooled connection, used at runtime.
    pub url: String,
    /// Direct connection, required for migrations.
    pub direct_url: String,
}

impl DatabaseConfig {
    pub fn migration_url(&self) -> &str {
        &self.direct_url
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    pub url: Option<String>,
}

/// Identity provider service account
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityProviderConfig {
    pub project_id: String,
    pub private_key: String,
    pub client_email: String,
}

/// Access token signing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SigningConfig {
    pub secret: String,
    /// Opaque duration string such as `15m`, handed to the token issuer as is.
    pub expires_in: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaStorageConfig {
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingServiceConfig {
    pub api_key: String,
}

/// Request throttling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitConfig {
    /// Window length in milliseconds.
    pub ttl: u64,
    /// Requests allowed per window.
    pub limit: u64,
}

impl RateLimitConfig {
    pub fn window(&self) -> Duration {
        Duration::from_millis(self.ttl)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_parsing_is_exact() {
        assert_eq!(
            "production".parse::<Environment>().unwrap(),
            Environment::Production
        );
        assert_eq!("test".parse::<Environment>().unwrap(), Environment::Test);
        assert!("staging".parse::<Environment>().is_err());
        assert!("Production".parse::<Environment>().is_err());
        assert!("".parse::<Environment>().is_err());
    }

    #[test]
    fn test_environment_display() {
        assert_eq!(Environment::Production.to_string(), "production");
        assert_eq!(Environment::Development.to_string(), "development");
        assert_eq!(Environment::default(), Environment::Development);
    }

    #[test]
    fn test_rate_limit_window() {
        let config = RateLimitConfig {
            ttl: 60000,
            limit: 100,
        };
        assert_eq!(config.window(), Duration::from_secs(60));
    }

    #[test]
    fn test_database_migration_url_is_direct() {
        let config = DatabaseConfig {
            url: "postgres://pooled/db".to_string(),
            direct_url: "postgres://direct/db".to_string(),
        };
        assert_eq!(config.migration_url(), "postgres://direct/db");
    }
}

// BSD 3-Clause License
// Copyright (c) 2025, NØNOS - NOXTERM
//
//! Configuration namespaces
//! Named, read-only projections of the validated config, looked up by name.

use std::collections::BTreeMap;

use super::error::ConfigError;
use super::types::*;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Namespace {
    Server(ServerConfig),
    Database(DatabaseConfig),
    Cache(CacheConfig),
    IdentityProvider(IdentityProviderConfig),
    Signing(SigningConfig),
    MediaStorage(MediaStorageConfig),
    MappingService(MappingServiceConfig),
    RateLimit(RateLimitConfig),
}

/// A record type registered under a fixed namespace name.
pub trait ConfigNamespace: Sized {
    const NAME: &'static str;

    fn from_namespace(namespace: &Namespace) -> Option<&Self>;
}

macro_rules! config_namespace {
    ($record:ty, $variant:ident, $name:literal) => {
        impl ConfigNamespace for $record {
            const NAME: &'static str = $name;

            fn from_namespace(namespace: &Namespace) -> Option<&Self> {
                match namespace {
                    Namespace::$variant(record) => Some(record),
                    _ => None,
                }
            }
        }
    };
}

config_namespace!(ServerConfig, Server, "server");
config_namespace!(DatabaseConfig, Database, "database");
config_namespace!(CacheConfig, Cache, "cache");
config_namespace!(IdentityProviderConfig, IdentityProvider, "identityProvider");
config_namespace!(SigningConfig, Signing, "signing");
config_namespace!(MediaStorageConfig, MediaStorage, "mediaStorage");
config_namespace!(MappingServiceConfig, MappingService, "mappingService");
config_namespace!(RateLimitConfig, RateLimit, "rateLimit");

/// Every namespace derived from one [`ValidatedConfig`].
///
/// Built once at startup and shared read-only; collaborators ask for the
/// record they need instead of reading the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigRegistry {
    namespaces: BTreeMap<&'static str, Namespace>,
}

impl ConfigRegistry {
    pub fn project(config: &ValidatedConfig) -> Self {
        let mut namespaces = BTreeMap::new();

        namespaces.insert(
            ServerConfig::NAME,
            Namespace::Server(ServerConfig {
                environment: config.node_env,
                port: config.port,
                cors_origins: config.cors_origins.clone(),
            }),
        );
        namespaces.insert(
            DatabaseConfig::NAME,
            Namespace::Database(DatabaseConfig {
                url: config.database_url.clone(),
                direct_url: config.database_url_direct.clone(),
            }),
        );
        namespaces.insert(
            CacheConfig::NAME,
            Namespace::Cache(CacheConfig {
                url: config.redis_url.clone(),
            }),
        );
        namespaces.insert(
            IdentityProviderConfig::NAME,
            Namespace::IdentityProvider(IdentityProviderConfig {
                project_id: config.firebase_project_id.clone(),
                private_key: config.firebase_private_key.clone(),
                client_email: config.firebase_client_email.clone(),
            }),
        );
        namespaces.insert(
            SigningConfig::NAME,
            Namespace::Signing(SigningConfig {
                secret: config.jwt_secret.clone(),
                expires_in: config.jwt_expires_in.clone(),
            }),
        );
        namespaces.insert(
            MediaStorageConfig::NAME,
            Namespace::MediaStorage(MediaStorageConfig {
                cloud_name: config.cloudinary_cloud_name.clone(),
                api_key: config.cloudinary_api_key.clone(),
                api_secret: config.cloudinary_api_secret.clone(),
            }),
        );
        namespaces.insert(
            MappingServiceConfig::NAME,
            Namespace::MappingService(MappingServiceConfig {
                api_key: config.goong_api_key.clone(),
            }),
        );
        namespaces.insert(
            RateLimitConfig::NAME,
            Namespace::RateLimit(RateLimitConfig {
                ttl: config.throttle_ttl,
                limit: config.throttle_limit,
            }),
        );

        Self { namespaces }
    }

    pub fn get(&self, name: &str) -> Option<&Namespace> {
        self.namespaces.get(name)
    }

    /// Typed lookup of the record registered under `T::NAME`.
    pub fn namespace<T: ConfigNamespace>(&self) -> Result<&T, ConfigError> {
        self.get(T::NAME)
            .and_then(T::from_namespace)
            .ok_or_else(|| ConfigError::UnknownNamespace {
                name: T::NAME.to_string(),
            })
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.namespaces.keys().copied()
    }
}

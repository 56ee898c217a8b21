// BSD 3-Clause License
// Copyright (c) 2025, NØNOS - NOXTERM
//
//! Startup configuration
//! The environment is read once, validated as a whole, and projected into
//! read-only namespaces. Any invalid variable stops the server from starting.

mod error;
mod loader;
mod registry;
pub mod schema;
mod types;
mod validation;

pub use error::{ConfigError, FieldError, ValidationReport};
pub use loader::{split_list, RawEnvironment};
pub use registry::{ConfigNamespace, ConfigRegistry, Namespace};
pub use types::{
    CacheConfig, DatabaseConfig, Environment, IdentityProviderConfig, MappingServiceConfig,
    MediaStorageConfig, RateLimitConfig, ServerConfig, SigningConfig, ValidatedConfig,
};
pub use validation::validate;

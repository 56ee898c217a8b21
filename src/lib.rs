// BSD 3-Clause License
// Copyright (c) 2025, NØNOS - NOXTERM
//
//! API server bootstrap
//! Fail-fast environment validation, configuration namespaces and the HTTP
//! listener setup built on top of them.

pub mod config;
pub mod security;
pub mod server;
pub mod throttle;

pub use config::{validate, ConfigRegistry, RawEnvironment, ValidatedConfig, ValidationReport};
pub use server::{build_router, serve};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const BUILD_TIME: &str = env!("BUILD_TIME");

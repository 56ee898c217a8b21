// BSD 3-Clause License
// Copyright (c) 2025, NØNOS - NOXTERM
//! Configuration error types

use std::fmt;

/// A single problem found while resolving one schema field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub path: String,
    pub message: String,
}

impl FieldError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "  - {}: {}", self.path, self.message)
    }
}

/// Every field error from one validation pass, in schema order.
#[derive(Debug, Clone, Default, PartialEq, Eq, thiserror::Error)]
#[error(
    "Environment validation failed:\n{}\n\nCheck your .env file against .env.example",
    render_issues(.issues)
)]
pub struct ValidationReport {
    issues: Vec<FieldError>,
}

impl ValidationReport {
    pub fn push(&mut self, error: FieldError) {
        self.issues.push(error);
    }

    pub fn issues(&self) -> &[FieldError] {
        &self.issues
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn len(&self) -> usize {
        self.issues.len()
    }
}

fn render_issues(issues: &[FieldError]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error(transparent)]
    Validation(#[from] ValidationReport),

    #[error("Configuration namespace '{name}' is not registered")]
    UnknownNamespace { name: String },
}

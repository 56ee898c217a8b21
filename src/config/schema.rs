// BSD 3-Clause License
// Copyright (c) 2025, NØNOS - NOXTERM
//
//! Environment schema
//! Every recognised variable, its shape and its default, in report order.

/// Allowed values for `NODE_ENV`.
pub const ENVIRONMENTS: &[&str] = &["development", "production", "test"];

pub const NODE_ENV: &str = "NODE_ENV";
pub const PORT: &str = "PORT";
pub const CORS_ORIGINS: &str = "CORS_ORIGINS";
pub const DATABASE_URL: &str = "DATABASE_URL";
pub const DATABASE_URL_DIRECT: &str = "DATABASE_URL_DIRECT";
pub const REDIS_URL: &str = "REDIS_URL";
pub const FIREBASE_PROJECT_ID: &str = "FIREBASE_PROJECT_ID";
pub const FIREBASE_PRIVATE_KEY: &str = "FIREBASE_PRIVATE_KEY";
pub const FIREBASE_CLIENT_EMAIL: &str = "FIREBASE_CLIENT_EMAIL";
pub const JWT_SECRET: &str = "JWT_SECRET";
pub const JWT_EXPIRES_IN: &str = "JWT_EXPIRES_IN";
pub const CLOUDINARY_CLOUD_NAME: &str = "CLOUDINARY_CLOUD_NAME";
pub const CLOUDINARY_API_KEY: &str = "CLOUDINARY_API_KEY";
pub const CLOUDINARY_API_SECRET: &str = "CLOUDINARY_API_SECRET";
pub const GOONG_API_KEY: &str = "GOONG_API_KEY";
pub const THROTTLE_TTL: &str = "THROTTLE_TTL";
pub const THROTTLE_LIMIT: &str = "THROTTLE_LIMIT";

/// Minimum length of the token signing secret.
pub const MIN_SECRET_LEN: usize = 32;

/// Shape a raw value must coerce into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Free text with a minimum character count.
    Text { min_len: usize },
    /// Text whose literal `\n` escapes become real newlines.
    EscapedText { min_len: usize },
    /// Absolute URL, kept verbatim once it parses.
    Url,
    Email,
    /// Strictly positive integer, optionally capped.
    PositiveInt { max: Option<u64> },
    OneOf(&'static [&'static str]),
    /// Comma separated list, elements trimmed.
    List,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    Required,
    Optional,
    /// Raw value used when the variable is absent; coerced like user input.
    Default(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
    pub presence: Presence,
}

const fn field(name: &'static str, kind: FieldKind, presence: Presence) -> FieldSpec {
    FieldSpec {
        name,
        kind,
        presence,
    }
}

const NON_EMPTY: FieldKind = FieldKind::Text { min_len: 1 };

pub static SCHEMA: &[FieldSpec] = &[
    // Server
    field(NODE_ENV, FieldKind::OneOf(ENVIRONMENTS), Presence::Default("development")),
    field(
        PORT,
        FieldKind::PositiveInt {
            max: Some(u16::MAX as u64),
        },
        Presence::Default("3000"),
    ),
    field(
        CORS_ORIGINS,
        FieldKind::List,
        Presence::Default("http://localhost:3001,http://localhost:8081"),
    ),
    // Database
    field(DATABASE_URL, FieldKind::Url, Presence::Required),
    field(DATABASE_URL_DIRECT, FieldKind::Url, Presence::Required),
    // Cache
    field(REDIS_URL, FieldKind::Text { min_len: 0 }, Presence::Optional),
    // Identity provider
    field(FIREBASE_PROJECT_ID, NON_EMPTY, Presence::Required),
    field(
        FIREBASE_PRIVATE_KEY,
        FieldKind::EscapedText { min_len: 1 },
        Presence::Required,
    ),
    field(FIREBASE_CLIENT_EMAIL, FieldKind::Email, Presence::Required),
    // Token signing
    field(
        JWT_SECRET,
        FieldKind::Text {
            min_len: MIN_SECRET_LEN,
        },
        Presence::Required,
    ),
    field(JWT_EXPIRES_IN, FieldKind::Text { min_len: 0 }, Presence::Default("15m")),
    // Media storage
    field(CLOUDINARY_CLOUD_NAME, NON_EMPTY, Presence::Required),
    field(CLOUDINARY_API_KEY, NON_EMPTY, Presence::Required),
    field(CLOUDINARY_API_SECRET, NON_EMPTY, Presence::Required),
    // Mapping service
    field(GOONG_API_KEY, NON_EMPTY, Presence::Required),
    // Rate limiting
    field(
        THROTTLE_TTL,
        FieldKind::PositiveInt { max: None },
        Presence::Default("60000"),
    ),
    field(
        THROTTLE_LIMIT,
        FieldKind::PositiveInt { max: None },
        Presence::Default("100"),
    ),
];

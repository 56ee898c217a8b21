// BSD 3-Clause License
// Copyright (c) 2025, NØNOS - NOXTERM
//! Raw environment snapshot

use std::collections::BTreeMap;
use std::env;
use std::ffi::OsString;
use tracing::{info, warn};

use super::error::ConfigError;
use super::types::ValidatedConfig;
use super::validation::validate;

/// Variable name to raw value, captured once at startup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawEnvironment {
    vars: BTreeMap<String, String>,
}

impl RawEnvironment {
    /// Snapshot of `.env` (if any) overlaid by the process environment.
    ///
    /// The `.env` file never overrides a variable the process already has,
    /// and `${VAR}` references inside it are expanded while it is read. A
    /// `.env` file with any unparsable line is ignored as a whole. The
    /// process environment itself is left untouched.
    pub fn from_process() -> Self {
        let dotenv = match dotenvy::dotenv_iter() {
            Ok(iter) => dotenv_pairs(iter).unwrap_or_else(|e| {
                warn!("Ignoring .env file: {}", e);
                Vec::new()
            }),
            Err(e) if e.not_found() => {
                info!("No .env file found, using environment variables only");
                Vec::new()
            }
            Err(e) => {
                warn!("Error loading .env file: {}", e);
                Vec::new()
            }
        };

        Self {
            vars: merge(dotenv, env::vars_os()),
        }
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        pairs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    /// Copy with `key` set, for building variants of one environment.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(key.into(), value.into());
        self
    }

    /// Copy with `key` removed.
    pub fn without(mut self, key: &str) -> Self {
        self.vars.remove(key);
        self
    }
}

impl FromIterator<(String, String)> for RawEnvironment {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        Self {
            vars: iter.into_iter().collect(),
        }
    }
}

impl ValidatedConfig {
    /// Reads and validates the process environment in one step.
    pub fn from_env() -> Result<Self, ConfigError> {
        let raw = RawEnvironment::from_process();
        Ok(validate(&raw)?)
    }
}

/// Collects every `.env` entry, or none of them if any line fails to parse.
fn dotenv_pairs<I>(iter: I) -> Result<Vec<(String, String)>, dotenvy::Error>
where
    I: IntoIterator<Item = Result<(String, String), dotenvy::Error>>,
{
    iter.into_iter().collect()
}

/// Layers process variables over `.env` entries. Non UTF-8 process variables
/// are skipped.
fn merge<P>(dotenv: Vec<(String, String)>, process: P) -> BTreeMap<String, String>
where
    P: IntoIterator<Item = (OsString, OsString)>,
{
    let mut vars: BTreeMap<_, _> = dotenv.into_iter().collect();

    for (key, value) in process {
        match (key.into_string(), value.into_string()) {
            (Ok(key), Ok(value)) => {
                vars.insert(key, value);
            }
            (Ok(key), Err(_)) => warn!("Skipping {}: value is not valid UTF-8", key),
            (Err(_), _) => warn!("Skipping environment variable with non UTF-8 name"),
        }
    }

    vars
}

/// Splits a comma separated list, trimming each element and dropping empties.
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_list_trims_and_keeps_order() {
        assert_eq!(
            split_list(" http://a.com , http://b.com "),
            vec!["http://a.com".to_string(), "http://b.com".to_string()]
        );
    }

    #[test]
    fn test_split_list_drops_empty_elements() {
        assert!(split_list("").is_empty());
        assert!(split_list(" , ,").is_empty());
        assert_eq!(split_list("a,,b"), vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_from_pairs_and_lookup() {
        let raw = RawEnvironment::from_pairs([("PORT", "8080"), ("NODE_ENV", "test")]);
        assert_eq!(raw.get("PORT"), Some("8080"));
        assert_eq!(raw.get("NODE_ENV"), Some("test"));
        assert!(raw.get("HOME").is_none());
    }

    #[test]
    fn test_with_and_without() {
        let raw = RawEnvironment::from_pairs([("PORT", "8080")])
            .with("NODE_ENV", "test")
            .without("PORT");
        assert!(raw.get("PORT").is_none());
        assert_eq!(raw.get("NODE_ENV"), Some("test"));
    }

    fn os(s: &str) -> (OsString, OsString) {
        let (k, v) = s.split_once('=').unwrap();
        (OsString::from(k), OsString::from(v))
    }

    fn parse(contents: &str) -> Result<Vec<(String, String)>, dotenvy::Error> {
        dotenv_pairs(dotenvy::from_read_iter(contents.as_bytes()))
    }

    #[test]
    fn test_process_overrides_dotenv() {
        let dotenv = parse("PORT=4000\nNODE_ENV=test\n").unwrap();
        let vars = merge(dotenv, [os("PORT=8080")]);
        assert_eq!(vars["PORT"], "8080");
        assert_eq!(vars["NODE_ENV"], "test");
    }

    #[test]
    fn test_dotenv_expands_references() {
        let dotenv = parse(
            "API_SERVER_TEST_DB_HOST=db.local\nDATABASE_URL=postgresql://${API_SERVER_TEST_DB_HOST}/app\n",
        )
        .unwrap();
        let vars = merge(dotenv, Vec::<(OsString, OsString)>::new());
        assert_eq!(vars["DATABASE_URL"], "postgresql://db.local/app");
    }

    #[test]
    fn test_malformed_dotenv_is_ignored_as_a_whole() {
        assert!(parse("PORT=4000\nBROKEN LINE\nNODE_ENV=test\n").is_err());

        let dotenv = parse("PORT=4000\nBROKEN LINE\n").unwrap_or_default();
        let vars = merge(dotenv, [os("NODE_ENV=production")]);
        assert!(!vars.contains_key("PORT"));
        assert_eq!(vars["NODE_ENV"], "production");
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_process_values_are_skipped() {
        use std::os::unix::ffi::OsStringExt;

        let process = vec![
            (OsString::from("BAD"), OsString::from_vec(vec![0xff, 0xfe])),
            (OsString::from_vec(vec![0xff]), OsString::from("x")),
            os("GOOD=1"),
        ];
        let vars = merge(vec![("BAD".to_string(), "from-dotenv".to_string())], process);
        assert_eq!(vars["BAD"], "from-dotenv");
        assert_eq!(vars["GOOD"], "1");
        assert_eq!(vars.len(), 2);
    }
}

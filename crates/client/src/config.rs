//! Runtime configuration, read from the environment.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use billbook_parties::DEFAULT_MIN_QUERY_CHARS;

pub const API_URL_ENV: &str = "BILLBOOK_API_URL";
pub const HTTP_TIMEOUT_ENV: &str = "BILLBOOK_HTTP_TIMEOUT_SECS";
pub const SEARCH_DEBOUNCE_ENV: &str = "BILLBOOK_SEARCH_DEBOUNCE_MS";
pub const SEARCH_MIN_CHARS_ENV: &str = "BILLBOOK_SEARCH_MIN_CHARS";
pub const SESSION_FILE_ENV: &str = "BILLBOOK_SESSION_FILE";

const DEFAULT_API_URL: &str = "http://localhost:8000/api";
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;
const DEFAULT_SEARCH_DEBOUNCE_MS: u64 = 300;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_url: String,
    pub http_timeout: Duration,
    pub search_debounce: Duration,
    pub search_min_chars: usize,
    pub session_file: PathBuf,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
            search_debounce: Duration::from_millis(DEFAULT_SEARCH_DEBOUNCE_MS),
            search_min_chars: DEFAULT_MIN_QUERY_CHARS,
            session_file: default_session_file(),
        }
    }
}

impl ClientConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source. Missing or unparseable
    /// values fall back to their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let api_url = lookup(API_URL_ENV)
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty())
            .unwrap_or(defaults.api_url);

        let session_file = lookup(SESSION_FILE_ENV)
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.session_file);

        Self {
            api_url,
            http_timeout: Duration::from_secs(parse_or(&lookup, HTTP_TIMEOUT_ENV, DEFAULT_HTTP_TIMEOUT_SECS)),
            search_debounce: Duration::from_millis(parse_or(
                &lookup,
                SEARCH_DEBOUNCE_ENV,
                DEFAULT_SEARCH_DEBOUNCE_MS,
            )),
            search_min_chars: parse_or(&lookup, SEARCH_MIN_CHARS_ENV, DEFAULT_MIN_QUERY_CHARS),
            session_file,
        }
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T
where
    T: FromStr + std::fmt::Display,
{
    match lookup(key) {
        None => default,
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!(key, value = %raw, default = %default, "unparseable setting, using default");
            default
        }),
    }
}

fn default_session_file() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("billbook")
        .join("session.json")
}

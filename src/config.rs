//! Run configuration loading and validation.
//!
//! The crawler is driven by a flat JSON configuration file. Every field is
//! required and checked against its own invariant before any network call is
//! made; each field failure maps to a distinct [`ConfigError`] variant so the
//! operator can see exactly which setting is wrong.
//!
//! Fields are pulled out of a loosely-typed [`serde_json::Value`] one at a
//! time rather than through a derived struct, so a wrong *type* (for example
//! `"total_articles": "abc"`) reports the same error kind as a wrong *value*.

use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;
use tracing::info;

/// Hard upper bound on how many article links a single run may collect.
pub const MAX_TOTAL_ARTICLES: u64 = 150;

/// Exclusive upper bound on the request timeout, in seconds.
pub const MAX_TIMEOUT_SECS: u64 = 60;

/// Everything that can go wrong while reading and validating a configuration
/// file. One variant per field invariant, plus I/O and syntax failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// `seed_urls` is not a list, or an entry is not an `http(s)://` string.
    #[error("seed_urls must be a non-empty list of http:// or https:// URLs")]
    IncorrectSeedUrl,

    /// `total_articles` is not an integer or is less than 1.
    #[error("total_articles must be a positive integer")]
    IncorrectNumberOfArticles,

    /// `total_articles` exceeds [`MAX_TOTAL_ARTICLES`].
    #[error("total_articles must be between 1 and {}", MAX_TOTAL_ARTICLES)]
    NumberOfArticlesOutOfRange,

    /// `headers` is not a string-to-string map.
    #[error("headers must be a map of string keys to string values")]
    IncorrectHeaders,

    /// `encoding` is not a non-empty string.
    #[error("encoding must be a non-empty string naming a character encoding")]
    IncorrectEncoding,

    /// `timeout` is not an integer in the open interval between zero and
    /// [`MAX_TIMEOUT_SECS`].
    #[error("timeout must be an integer greater than 0 and less than {}", MAX_TIMEOUT_SECS)]
    IncorrectTimeout,

    /// `should_verify_certificate` or `headless_mode` is not a boolean.
    #[error("should_verify_certificate and headless_mode must be booleans")]
    IncorrectVerify,

    /// The configuration file could not be read.
    #[error("failed to read configuration file: {0}")]
    Io(#[from] std::io::Error),

    /// The configuration file is not well-formed JSON.
    #[error("configuration file is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// A validated, immutable run configuration.
///
/// Constructed only through [`Config::from_file`] or [`Config::from_value`];
/// once built, every field satisfies its invariant and is stored exactly as
/// it appeared in the source file (no coercion).
#[derive(Debug, Clone)]
pub struct Config {
    /// Listing-page URLs to discover article links from, in crawl order.
    pub seed_urls: Vec<String>,
    /// Maximum number of article links to collect before discovery stops.
    pub total_articles: usize,
    /// Request headers sent with every GET.
    pub headers: HashMap<String, String>,
    /// Character encoding label used to decode response bodies.
    pub encoding: String,
    /// Per-request timeout in seconds.
    pub timeout: u64,
    /// Whether TLS certificates are verified.
    pub should_verify_certificate: bool,
    /// Reserved for browser-driven fetching; not used by the HTTP fetcher.
    pub headless_mode: bool,
}

impl Config {
    /// Read and validate a configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let value: Value = serde_json::from_str(&raw)?;
        let config = Self::from_value(&value)?;
        info!(
            path = %path.as_ref().display(),
            seeds = config.seed_urls.len(),
            total_articles = config.total_articles,
            "Loaded crawler configuration"
        );
        Ok(config)
    }

    /// Validate an already-parsed JSON document.
    ///
    /// Fields are checked in a fixed order (seeds, article count, headers,
    /// encoding, timeout, boolean flags); the first invalid field aborts
    /// validation without looking at the rest.
    pub fn from_value(value: &Value) -> Result<Self, ConfigError> {
        let seed_urls = extract_seed_urls(value)?;
        let total_articles = extract_total_articles(value)?;
        let headers = extract_headers(value)?;
        let encoding = extract_encoding(value)?;
        let timeout = extract_timeout(value)?;
        let (should_verify_certificate, headless_mode) = extract_flags(value)?;

        Ok(Self {
            seed_urls,
            total_articles,
            headers,
            encoding,
            timeout,
            should_verify_certificate,
            headless_mode,
        })
    }
}

fn extract_seed_urls(value: &Value) -> Result<Vec<String>, ConfigError> {
    let entries = value
        .get("seed_urls")
        .and_then(Value::as_array)
        .ok_or(ConfigError::IncorrectSeedUrl)?;
    if entries.is_empty() {
        return Err(ConfigError::IncorrectSeedUrl);
    }

    let mut seeds = Vec::with_capacity(entries.len());
    for entry in entries {
        let url = entry.as_str().ok_or(ConfigError::IncorrectSeedUrl)?;
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ConfigError::IncorrectSeedUrl);
        }
        seeds.push(url.to_string());
    }
    Ok(seeds)
}

fn extract_total_articles(value: &Value) -> Result<usize, ConfigError> {
    let count = value
        .get("total_articles")
        .and_then(Value::as_i64)
        .ok_or(ConfigError::IncorrectNumberOfArticles)?;
    if count < 1 {
        return Err(ConfigError::IncorrectNumberOfArticles);
    }
    if count as u64 > MAX_TOTAL_ARTICLES {
        return Err(ConfigError::NumberOfArticlesOutOfRange);
    }
    Ok(count as usize)
}

fn extract_headers(value: &Value) -> Result<HashMap<String, String>, ConfigError> {
    let map = value
        .get("headers")
        .and_then(Value::as_object)
        .ok_or(ConfigError::IncorrectHeaders)?;

    let mut headers = HashMap::with_capacity(map.len());
    for (name, val) in map {
        let val = val.as_str().ok_or(ConfigError::IncorrectHeaders)?;
        headers.insert(name.clone(), val.to_string());
    }
    Ok(headers)
}

fn extract_encoding(value: &Value) -> Result<String, ConfigError> {
    let encoding = value
        .get("encoding")
        .and_then(Value::as_str)
        .ok_or(ConfigError::IncorrectEncoding)?;
    if encoding.is_empty() {
        return Err(ConfigError::IncorrectEncoding);
    }
    Ok(encoding.to_string())
}

fn extract_timeout(value: &Value) -> Result<u64, ConfigError> {
    let timeout = value
        .get("timeout")
        .and_then(Value::as_i64)
        .ok_or(ConfigError::IncorrectTimeout)?;
    if timeout <= 0 || timeout as u64 >= MAX_TIMEOUT_SECS {
        return Err(ConfigError::IncorrectTimeout);
    }
    Ok(timeout as u64)
}

fn extract_flags(value: &Value) -> Result<(bool, bool), ConfigError> {
    let verify = value
        .get("should_verify_certificate")
        .and_then(Value::as_bool)
        .ok_or(ConfigError::IncorrectVerify)?;
    let headless = value
        .get("headless_mode")
        .and_then(Value::as_bool)
        .ok_or(ConfigError::IncorrectVerify)?;
    Ok((verify, headless))
}

//! Single-shot HTTP fetching with configuration-supplied behavior.
//!
//! The [`Fetcher`] wraps one [`reqwest::Client`] built from the validated
//! [`Config`]: request headers, per-request timeout, and TLS verification all
//! come from the configuration, and response bodies are decoded with the
//! configured character encoding regardless of what charset the server
//! declares.
//!
//! There are no retries. A non-2xx status is *not* an error here; callers
//! inspect [`PageResponse::ok`] and decide what to do. Only transport-level
//! failures (DNS, connect, timeout) surface as `Err`.

use crate::config::Config;
use encoding_rs::{Encoding, UTF_8};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use std::time::Duration;
use tracing::{debug, warn};

/// A fetched page: HTTP success flag plus the decoded body.
#[derive(Debug)]
pub struct PageResponse {
    /// Whether the response status was in the 2xx range.
    pub ok: bool,
    /// Response body decoded with the configured encoding.
    pub text: String,
}

/// Issues one GET per call with the configured headers, timeout, and TLS
/// verification behavior.
#[derive(Debug)]
pub struct Fetcher {
    client: reqwest::Client,
    encoding: String,
}

impl Fetcher {
    /// Build a fetcher from a validated configuration.
    pub fn new(config: &Config) -> Result<Self, reqwest::Error> {
        let mut headers = HeaderMap::with_capacity(config.headers.len());
        for (name, value) in &config.headers {
            match (
                HeaderName::from_bytes(name.as_bytes()),
                HeaderValue::from_str(value),
            ) {
                (Ok(name), Ok(value)) => {
                    headers.insert(name, value);
                }
                _ => warn!(header = %name, "Skipping malformed request header"),
            }
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout))
            .danger_accept_invalid_certs(!config.should_verify_certificate)
            .build()?;

        Ok(Self {
            client,
            encoding: config.encoding.clone(),
        })
    }

    /// Fetch one URL.
    ///
    /// Never retries and never raises on a non-success status; transport
    /// failures propagate to the caller as `Err`.
    pub async fn get(&self, url: &str) -> Result<PageResponse, reqwest::Error> {
        let response = self.client.get(url).send().await?;
        let ok = response.status().is_success();
        debug!(%url, status = %response.status(), "Fetched page");
        let bytes = response.bytes().await?;
        Ok(PageResponse {
            ok,
            text: decode_body(&bytes, &self.encoding),
        })
    }
}

/// Decode a response body with the configured encoding label.
///
/// The configuration always wins: any charset the server declares in
/// `Content-Type` is ignored. An unknown label falls back to UTF-8.
fn decode_body(bytes: &[u8], label: &str) -> String {
    let encoding = Encoding::for_label(label.as_bytes()).unwrap_or(UTF_8);
    let (text, _, _) = encoding.decode(bytes);
    text.into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configured_utf8_keeps_utf8_bytes_intact() {
        // A UTF-8 body stays UTF-8 under the configured label, no matter
        // what charset a server might have declared alongside it.
        assert_eq!(decode_body("привет".as_bytes(), "utf-8"), "привет");
    }

    #[test]
    fn decodes_windows_1251_bodies() {
        // "да" in windows-1251.
        assert_eq!(decode_body(&[0xE4, 0xE0], "windows-1251"), "да");
    }

    #[test]
    fn unknown_encoding_label_falls_back_to_utf8() {
        assert_eq!(decode_body("plain".as_bytes(), "no-such-encoding"), "plain");
    }
}

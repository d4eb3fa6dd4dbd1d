//! Article-link discovery from seed listing pages.
//!
//! Each seed listing page links its articles from `h3` headings. Discovery
//! walks the seeds in configuration order, pulls the first anchor out of
//! every heading, normalizes the href to an absolute URL, and accumulates
//! the results into a bounded, duplicate-free, order-preserving list. Once
//! the configured cap is reached no further seeds are fetched.
//!
//! A seed that fails to fetch (transport error or non-success status) is
//! logged and skipped; discovery continues with the remaining seeds.

use crate::config::Config;
use crate::fetch::Fetcher;
use scraper::{Html, Selector};
use tracing::{debug, info, instrument, warn};
use url::Url;

/// Bounded, order-preserving collector of discovered article URLs.
///
/// Exact duplicate strings are ignored; the first discovery wins. Appends
/// report whether the collector just became full so callers can stop
/// iterating instead of threading break conditions through nested loops.
#[derive(Debug)]
pub struct LinkAccumulator {
    urls: Vec<String>,
    cap: usize,
}

impl LinkAccumulator {
    pub fn new(cap: usize) -> Self {
        Self {
            urls: Vec::with_capacity(cap),
            cap,
        }
    }

    /// Append a URL unless it is already present or the cap is reached.
    /// Returns `true` when the accumulator is full after the call.
    pub fn offer(&mut self, url: String) -> bool {
        if !self.is_full() && !self.urls.contains(&url) {
            self.urls.push(url);
        }
        self.is_full()
    }

    pub fn is_full(&self) -> bool {
        self.urls.len() >= self.cap
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn into_urls(self) -> Vec<String> {
        self.urls
    }
}

/// Resolve an anchor href against the first configured seed.
///
/// Absolute `http(s)` hrefs pass through unchanged. Relative hrefs (assumed
/// to start with `/`) are prefixed with the first seed's scheme and host.
/// An empty seed list or an unparseable seed yields the empty string, which
/// callers treat as "no URL found".
pub fn normalize_href(href: &str, seed_urls: &[String]) -> String {
    if href.starts_with("http://") || href.starts_with("https://") {
        return href.to_string();
    }

    let Some(base) = seed_urls.first() else {
        return String::new();
    };
    match Url::parse(base) {
        Ok(base) => format!("{}{}", base.origin().ascii_serialization(), href),
        Err(_) => String::new(),
    }
}

/// Discovers article URLs from the configured seed listing pages.
#[derive(Debug)]
pub struct Crawler<'a> {
    config: &'a Config,
}

impl<'a> Crawler<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    /// Walk the seeds in configuration order and collect article URLs up to
    /// the configured cap. Returns the URLs in first-discovered order.
    #[instrument(level = "info", skip_all)]
    pub async fn find_articles(&self, fetcher: &Fetcher) -> Vec<String> {
        let mut links = LinkAccumulator::new(self.config.total_articles);

        for seed in &self.config.seed_urls {
            let response = match fetcher.get(seed).await {
                Ok(response) => response,
                Err(e) => {
                    warn!(%seed, error = %e, "Seed fetch failed; skipping seed");
                    continue;
                }
            };
            if !response.ok {
                warn!(%seed, "Seed returned non-success status; skipping seed");
                continue;
            }

            let full = collect_listing_links(&response.text, &self.config.seed_urls, &mut links);
            debug!(%seed, collected = links.len(), "Processed seed listing");
            if full {
                break;
            }
        }

        info!(count = links.len(), "Discovered article URLs");
        links.into_urls()
    }
}

/// Pull article links out of one listing page into the accumulator.
///
/// Headings are visited in document order; each contributes at most its
/// first `a[href]` descendant. Returns `true` once the accumulator is full
/// so the caller stops fetching further seeds.
fn collect_listing_links(html: &str, seed_urls: &[String], links: &mut LinkAccumulator) -> bool {
    let document = Html::parse_document(html);
    let heading_selector = Selector::parse("h3").unwrap();
    let anchor_selector = Selector::parse("a[href]").unwrap();

    for heading in document.select(&heading_selector) {
        if links.is_full() {
            return true;
        }
        let Some(anchor) = heading.select(&anchor_selector).next() else {
            continue;
        };
        let Some(href) = anchor.value().attr("href") else {
            continue;
        };

        let url = normalize_href(href, seed_urls);
        if url.is_empty() {
            continue;
        }
        if links.offer(url) {
            return true;
        }
    }

    links.is_full()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeds(urls: &[&str]) -> Vec<String> {
        urls.iter().map(|u| u.to_string()).collect()
    }

    #[test]
    fn absolute_hrefs_pass_through() {
        let seed_urls = seeds(&["https://example.com/page"]);
        assert_eq!(
            normalize_href("https://other.org/news/1", &seed_urls),
            "https://other.org/news/1"
        );
        assert_eq!(
            normalize_href("http://other.org/news/1", &seed_urls),
            "http://other.org/news/1"
        );
    }

    #[test]
    fn relative_hrefs_take_scheme_and_host_from_first_seed() {
        let seed_urls = seeds(&["https://example.com/page", "https://mirror.example.org/"]);
        assert_eq!(
            normalize_href("/news/123", &seed_urls),
            "https://example.com/news/123"
        );
    }

    #[test]
    fn empty_seed_list_yields_empty_string() {
        assert_eq!(normalize_href("/news/123", &[]), "");
    }

    #[test]
    fn accumulator_respects_cap_and_order() {
        let mut links = LinkAccumulator::new(2);
        assert!(!links.offer("https://example.com/a".to_string()));
        assert!(links.offer("https://example.com/b".to_string()));
        // Full: further offers are ignored.
        assert!(links.offer("https://example.com/c".to_string()));
        assert_eq!(
            links.into_urls(),
            vec![
                "https://example.com/a".to_string(),
                "https://example.com/b".to_string()
            ]
        );
    }

    #[test]
    fn accumulator_drops_exact_duplicates() {
        let mut links = LinkAccumulator::new(10);
        links.offer("https://example.com/a".to_string());
        links.offer("https://example.com/a".to_string());
        links.offer("https://example.com/b".to_string());
        assert_eq!(links.len(), 2);
    }

    #[test]
    fn listing_links_come_from_first_anchor_of_each_heading() {
        let html = r#"
            <html><body>
              <h3><a href="/news/1">First</a><a href="/news/ignored">x</a></h3>
              <h3>No anchor here</h3>
              <h3><a href="https://other.org/abs">Absolute</a></h3>
              <h3><a href="/news/1">Duplicate</a></h3>
              <h3><a href="/news/2">Second</a></h3>
            </body></html>
        "#;
        let seed_urls = seeds(&["https://example.com/page"]);
        let mut links = LinkAccumulator::new(10);
        let full = collect_listing_links(html, &seed_urls, &mut links);
        assert!(!full);
        assert_eq!(
            links.into_urls(),
            vec![
                "https://example.com/news/1".to_string(),
                "https://other.org/abs".to_string(),
                "https://example.com/news/2".to_string(),
            ]
        );
    }

    #[test]
    fn listing_stops_at_cap() {
        let html = r#"
            <h3><a href="/news/1">a</a></h3>
            <h3><a href="/news/2">b</a></h3>
            <h3><a href="/news/3">c</a></h3>
        "#;
        let seed_urls = seeds(&["https://example.com"]);
        let mut links = LinkAccumulator::new(2);
        let full = collect_listing_links(html, &seed_urls, &mut links);
        assert!(full);
        assert_eq!(links.len(), 2);
    }
}

//! Structured field extraction from article pages.
//!
//! Every field is extracted independently with an explicit fallback chain;
//! a page whose markup deviates from the expected shape degrades field by
//! field instead of failing the whole record. The one exception is the
//! publication date: a page without a parseable `DD.MM.YYYY` date aborts
//! that article's record (see [`ArticleError::Date`]).
//!
//! # Expected markup
//!
//! - body: `div[itemprop=articleBody]` containing a
//!   `div.field.ft_html.f_content.auto_field` containing a `div.value`
//!   whose `p` children carry the paragraphs;
//! - headline: the first `h1`;
//! - date: the first `time` element;
//! - topics: `ul[itemprop=about]` with `li[itemprop=itemListElement]`
//!   items, each carrying a `meta[itemprop=name]` content attribute;
//! - breadcrumb: `ol.breadcrumb` with `li[itemprop=itemListElement]` items.

use crate::dates::{unify_date_format, DateParseError};
use crate::fetch::{Fetcher, PageResponse};
use crate::models::{Article, NOT_FOUND};
use scraper::{ElementRef, Html, Selector};
use thiserror::Error;
use tracing::{debug, instrument};

/// Why an article's record could not be produced.
#[derive(Debug, Error)]
pub enum ArticleError {
    /// The fetch failed at the transport level (DNS, connect, timeout).
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    /// The page carried no parseable publication date.
    #[error(transparent)]
    Date(#[from] DateParseError),
}

/// Fetch one article page and extract its record.
///
/// A non-success HTTP status yields a record whose fields are all defaults
/// (empty body text, no date); a transport failure or an unparseable date
/// aborts the record.
#[instrument(level = "info", skip_all, fields(%url, id = id))]
pub async fn parse_article(
    fetcher: &Fetcher,
    url: &str,
    id: usize,
) -> Result<(Article, String), ArticleError> {
    let response = fetcher.get(url).await?;
    Ok(article_from_response(response, url, id)?)
}

/// Turn a fetched response into a record plus the raw text hand-off.
///
/// A non-success status yields the all-defaults record with the response
/// body still attached for persistence; only a successful response is
/// parsed for fields.
fn article_from_response(
    response: PageResponse,
    url: &str,
    id: usize,
) -> Result<(Article, String), DateParseError> {
    if !response.ok {
        debug!(%url, "Article returned non-success status; keeping defaults");
        return Ok((unfetched_record(url, id), response.text));
    }

    let article = build_article(&response.text, url, id)?;
    Ok((article, response.text))
}

/// Extract every field of an article record from fetched markup.
pub fn build_article(html: &str, url: &str, id: usize) -> Result<Article, DateParseError> {
    let document = Html::parse_document(html);
    let date = unify_date_format(&extract_raw_date(&document))?;

    Ok(Article {
        id,
        url: url.to_string(),
        title: extract_title(&document),
        authors: vec![NOT_FOUND.to_string()],
        date: Some(date),
        topics: extract_topics(&document),
        breadcrumb: extract_breadcrumb(&document),
        text: extract_text(&document),
    })
}

/// The all-defaults record used when the page could not be fetched.
fn unfetched_record(url: &str, id: usize) -> Article {
    Article {
        id,
        url: url.to_string(),
        title: NOT_FOUND.to_string(),
        authors: vec![NOT_FOUND.to_string()],
        date: None,
        topics: vec![NOT_FOUND.to_string()],
        breadcrumb: Vec::new(),
        text: String::new(),
    }
}

fn trimmed_text(element: ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Newline-joined paragraph text from the nested content container chain.
///
/// The chain must resolve completely; a missing link anywhere yields the
/// empty string rather than partial text. Paragraphs that are empty after
/// trimming are dropped.
fn extract_text(document: &Html) -> String {
    let body_selector = Selector::parse(r#"div[itemprop="articleBody"]"#).unwrap();
    let field_selector = Selector::parse("div.field.ft_html.f_content.auto_field").unwrap();
    let value_selector = Selector::parse("div.value").unwrap();
    let paragraph_selector = Selector::parse("p").unwrap();

    let Some(body) = document.select(&body_selector).next() else {
        return String::new();
    };
    let Some(field) = body.select(&field_selector).next() else {
        return String::new();
    };
    let Some(value) = field.select(&value_selector).next() else {
        return String::new();
    };

    value
        .select(&paragraph_selector)
        .map(trimmed_text)
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// First `h1` inner markup, trimmed, with guillemets turned into their
/// named character references. This is a site-specific transform, not
/// general HTML escaping; no other character is touched.
fn extract_title(document: &Html) -> String {
    let headline_selector = Selector::parse("h1").unwrap();
    match document.select(&headline_selector).next() {
        Some(headline) => headline
            .inner_html()
            .trim()
            .replace('«', "&laquo;")
            .replace('»', "&raquo;"),
        None => NOT_FOUND.to_string(),
    }
}

/// Trimmed text of the first `time` element; empty when absent, which the
/// date normalizer then rejects.
fn extract_raw_date(document: &Html) -> String {
    let time_selector = Selector::parse("time").unwrap();
    document
        .select(&time_selector)
        .next()
        .map(trimmed_text)
        .unwrap_or_default()
}

/// Topic tags from the `about` list, in document order.
fn extract_topics(document: &Html) -> Vec<String> {
    let about_selector = Selector::parse(r#"ul[itemprop="about"]"#).unwrap();
    let item_selector = Selector::parse(r#"li[itemprop="itemListElement"]"#).unwrap();
    let name_selector = Selector::parse(r#"meta[itemprop="name"]"#).unwrap();

    let mut topics = Vec::new();
    if let Some(about) = document.select(&about_selector).next() {
        for item in about.select(&item_selector) {
            if let Some(meta) = item.select(&name_selector).next() {
                if let Some(content) = meta.value().attr("content") {
                    topics.push(content.trim().to_string());
                }
            }
        }
    }

    if topics.is_empty() {
        topics.push(NOT_FOUND.to_string());
    }
    topics
}

/// Breadcrumb labels in trail order.
///
/// Per item the fallback chain is: the anchor's `itemprop=name` descendant
/// text, then the anchor's own text, then the item's `itemprop=name` text,
/// then the empty string. No breadcrumb list means an empty trail, not a
/// placeholder.
fn extract_breadcrumb(document: &Html) -> Vec<String> {
    let trail_selector = Selector::parse("ol.breadcrumb").unwrap();
    let item_selector = Selector::parse(r#"li[itemprop="itemListElement"]"#).unwrap();
    let anchor_selector = Selector::parse(r#"a[itemprop="item"]"#).unwrap();
    let name_selector = Selector::parse(r#"[itemprop="name"]"#).unwrap();

    let Some(trail) = document.select(&trail_selector).next() else {
        return Vec::new();
    };

    trail
        .select(&item_selector)
        .map(|item| match item.select(&anchor_selector).next() {
            Some(anchor) => anchor
                .select(&name_selector)
                .next()
                .map(trimmed_text)
                .unwrap_or_else(|| trimmed_text(anchor)),
            None => item
                .select(&name_selector)
                .next()
                .map(trimmed_text)
                .unwrap_or_default(),
        })
        .collect()
}

//! Data model for extracted articles.
//!
//! One [`Article`] is produced per discovered URL. It is built in a single
//! pass by the parser and handed to the output layer; nothing mutates it
//! afterward.

use chrono::NaiveDate;
use serde::Serialize;

/// Placeholder stored wherever the expected markup carries no usable value.
pub const NOT_FOUND: &str = "NOT FOUND";

/// A normalized article record.
#[derive(Debug, Serialize)]
pub struct Article {
    /// Ordinal id within the run, starting at 1 in discovery order.
    pub id: usize,
    /// The article's absolute URL.
    pub url: String,
    /// Headline markup with guillemets escaped; `"NOT FOUND"` when absent.
    pub title: String,
    /// The source markup carries no reliable byline, so this is always
    /// `["NOT FOUND"]`.
    pub authors: Vec<String>,
    /// Publication date parsed from the page; `None` only when the fetch
    /// returned a non-success status and no page was available to parse.
    pub date: Option<NaiveDate>,
    /// Topic tags in document order; `["NOT FOUND"]` when none were found.
    pub topics: Vec<String>,
    /// Category labels from the breadcrumb trail, outermost first; empty
    /// when the page has no breadcrumb markup.
    pub breadcrumb: Vec<String>,
    /// Newline-joined paragraph text; empty when the content container
    /// chain is absent or the fetch returned a non-success status.
    #[serde(skip)]
    pub text: String,
}

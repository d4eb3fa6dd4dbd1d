//! JSON serialization of article records.
//!
//! Each article's structured fields are written to `{id}_meta.json` inside
//! the prepared output directory.

use crate::models::Article;
use std::error::Error;
use std::path::Path;
use tokio::fs;
use tracing::{debug, instrument};

/// Write an article's structured record to `{id}_meta.json`.
#[instrument(level = "debug", skip_all, fields(id = article.id))]
pub async fn write_meta(base_path: impl AsRef<Path>, article: &Article) -> Result<(), Box<dyn Error>> {
    let json = serde_json::to_string_pretty(article)?;
    let path = base_path.as_ref().join(format!("{}_meta.json", article.id));
    fs::write(&path, json).await?;
    debug!(path = %path.display(), "Wrote article record");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NOT_FOUND;
    use chrono::NaiveDate;

    fn sample_article() -> Article {
        Article {
            id: 1,
            url: "https://example.com/news/1".to_string(),
            title: "&laquo;Title&raquo;".to_string(),
            authors: vec![NOT_FOUND.to_string()],
            date: NaiveDate::from_ymd_opt(2021, 3, 5),
            topics: vec!["Sport".to_string()],
            breadcrumb: vec!["Home".to_string(), "News".to_string()],
            text: "body".to_string(),
        }
    }

    #[test]
    fn record_serializes_without_body_text() {
        let value = serde_json::to_value(sample_article()).unwrap();
        assert_eq!(value["id"], 1);
        assert_eq!(value["url"], "https://example.com/news/1");
        assert_eq!(value["title"], "&laquo;Title&raquo;");
        assert_eq!(value["authors"][0], NOT_FOUND);
        assert_eq!(value["date"], "2021-03-05");
        assert_eq!(value["topics"][0], "Sport");
        assert_eq!(value["breadcrumb"][1], "News");
        // Raw text is persisted separately, never inside the record.
        assert!(value.get("text").is_none());
    }

    #[tokio::test]
    async fn meta_file_is_keyed_by_id() {
        let dir = std::env::temp_dir().join("article_harvest_meta_test");
        let _ = tokio::fs::remove_dir_all(&dir).await;
        tokio::fs::create_dir_all(&dir).await.unwrap();

        write_meta(&dir, &sample_article()).await.unwrap();
        let written = tokio::fs::read_to_string(dir.join("1_meta.json")).await.unwrap();
        assert!(written.contains("https://example.com/news/1"));

        let _ = tokio::fs::remove_dir_all(&dir).await;
    }
}

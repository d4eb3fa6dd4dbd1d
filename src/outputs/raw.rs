//! Raw response persistence.
//!
//! The undecorated response body of every successfully parsed article is
//! kept alongside its record as `{id}_raw.txt`, so extraction fixes can be
//! replayed offline against the exact markup that was fetched.

use std::error::Error;
use std::path::Path;
use tokio::fs;
use tracing::{debug, instrument};

/// Write an article's raw response text to `{id}_raw.txt`.
#[instrument(level = "debug", skip_all, fields(id = id))]
pub async fn write_raw(
    base_path: impl AsRef<Path>,
    id: usize,
    text: &str,
) -> Result<(), Box<dyn Error>> {
    let path = base_path.as_ref().join(format!("{id}_raw.txt"));
    fs::write(&path, text).await?;
    debug!(path = %path.display(), bytes = text.len(), "Wrote raw article text");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn raw_file_is_keyed_by_id() {
        let dir = std::env::temp_dir().join("article_harvest_raw_test");
        let _ = tokio::fs::remove_dir_all(&dir).await;
        tokio::fs::create_dir_all(&dir).await.unwrap();

        write_raw(&dir, 3, "<html>page</html>").await.unwrap();
        let written = tokio::fs::read_to_string(dir.join("3_raw.txt")).await.unwrap();
        assert_eq!(written, "<html>page</html>");

        let _ = tokio::fs::remove_dir_all(&dir).await;
    }
}

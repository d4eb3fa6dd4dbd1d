//! Persistence layer for harvested articles.
//!
//! The crawl core hands each article off as two artifacts keyed by its
//! ordinal id; this module owns the directory layout and serialization:
//!
//! ```text
//! output_dir/
//! ├── 1_raw.txt    # raw response body
//! ├── 1_meta.json  # structured record
//! ├── 2_raw.txt
//! └── 2_meta.json
//! ```
//!
//! [`prepare_environment`] resets the output directory at the start of a
//! run; a run's artifacts never mix with a previous run's.

pub mod json;
pub mod raw;

use std::error::Error;
use std::path::Path;
use tokio::fs;
use tracing::{info, instrument};

/// Reset the output directory: remove it if present, then recreate it.
#[instrument(level = "info", skip_all, fields(path = %base_path.as_ref().display()))]
pub async fn prepare_environment(base_path: impl AsRef<Path>) -> Result<(), Box<dyn Error>> {
    let base_path = base_path.as_ref();
    if fs::metadata(base_path).await.is_ok() {
        fs::remove_dir_all(base_path).await?;
    }
    fs::create_dir_all(base_path).await?;
    info!("Prepared output directory");
    Ok(())
}

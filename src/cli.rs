//! Command-line interface definitions.
//!
//! All run behavior lives in the JSON configuration file; the CLI only says
//! where that file is and where the harvested artifacts go.

use clap::Parser;

/// Command-line arguments for the article harvester.
///
/// # Examples
///
/// ```sh
/// article_harvest -c ./crawler_config.json -o ./artifacts
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Path to the JSON crawler configuration file
    #[arg(short, long, default_value = "crawler_config.json")]
    pub config: String,

    /// Output directory for raw pages and article records (recreated each run)
    #[arg(short, long)]
    pub output_dir: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::parse_from(&[
            "article_harvest",
            "--config",
            "./config.json",
            "--output-dir",
            "./artifacts",
        ]);

        assert_eq!(cli.config, "./config.json");
        assert_eq!(cli.output_dir, "./artifacts");
    }

    #[test]
    fn test_cli_short_flags_and_default_config() {
        let cli = Cli::parse_from(&["article_harvest", "-o", "/tmp/artifacts"]);

        assert_eq!(cli.config, "crawler_config.json");
        assert_eq!(cli.output_dir, "/tmp/artifacts");
    }
}

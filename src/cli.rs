use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    /// Parse a format name from the config file
    pub fn from_config(value: &str) -> Option<Self> {
        <Self as clap::ValueEnum>::from_str(value, true).ok()
    }
}

#[derive(Parser)]
#[command(
    name = "ytnotes",
    about = "Turn a YouTube video's captions into detailed notes with Gemini",
    version = env!("GIT_DESCRIBE"),
)]
pub struct Cli {
    /// YouTube video URL or video ID (reads from stdin if omitted)
    pub url: Option<String>,

    /// Serve the web form instead of summarizing from the command line
    #[arg(long, conflicts_with = "url")]
    pub serve: bool,

    /// Address for the web form [default: 127.0.0.1:8501]
    #[arg(long)]
    pub bind: Option<String>,

    /// Output format [default: text]
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Preferred caption languages, in order (comma-separated) [default: en]
    #[arg(short, long, value_delimiter = ',')]
    pub lang: Option<Vec<String>>,

    /// Write output to file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Gemini model for summarization [default: gemini-2.0-flash]
    #[arg(long)]
    pub model: Option<String>,

    /// Show progress and metadata on stderr
    #[arg(short, long)]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_url_and_flags() {
        let cli = Cli::try_parse_from([
            "ytnotes",
            "https://www.youtube.com/watch?v=abc123",
            "--lang",
            "de,en",
            "--format",
            "json",
        ])
        .unwrap();
        assert_eq!(cli.url.as_deref(), Some("https://www.youtube.com/watch?v=abc123"));
        assert_eq!(cli.lang, Some(vec!["de".to_string(), "en".to_string()]));
        assert_eq!(cli.format, Some(OutputFormat::Json));
        assert!(!cli.serve);
    }

    #[test]
    fn test_serve_conflicts_with_url() {
        assert!(Cli::try_parse_from(["ytnotes", "--serve", "dQw4w9WgXcQ"]).is_err());
        let cli = Cli::try_parse_from(["ytnotes", "--serve", "--bind", "0.0.0.0:9000"]).unwrap();
        assert!(cli.serve);
        assert_eq!(cli.bind.as_deref(), Some("0.0.0.0:9000"));
    }

    #[test]
    fn test_format_from_config() {
        assert_eq!(OutputFormat::from_config("JSON"), Some(OutputFormat::Json));
        assert_eq!(OutputFormat::from_config("srt"), None);
    }
}

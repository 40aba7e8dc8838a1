use thiserror::Error;

/// Problems resolving startup configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{env_var} environment variable is not set (required for Gemini summarization)")]
    MissingApiKey { env_var: String },

    #[error("invalid bind address {value}: {reason}")]
    InvalidBind { value: String, reason: String },

    #[error("could not read config file {path}: {reason}")]
    File { path: String, reason: String },
}

/// The user-supplied input did not contain a usable video identifier
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractError {
    #[error("no URL or video ID provided")]
    Empty,

    #[error("could not extract video ID from: {0}")]
    Unrecognized(String),

    #[error("video ID contains invalid characters: {0}")]
    InvalidCharacters(String),
}

#[derive(Error, Debug)]
pub enum TranscriptError {
    #[error("transcripts are disabled for video {video_id}")]
    Disabled { video_id: String },

    #[error("no transcript found for video {video_id} in [{}] (available: [{}])", .requested.join(", "), .available.join(", "))]
    NotFound {
        video_id: String,
        requested: Vec<String>,
        available: Vec<String>,
    },

    #[error("{0}")]
    Unknown(String),
}

impl From<reqwest::Error> for TranscriptError {
    fn from(e: reqwest::Error) -> Self {
        TranscriptError::Unknown(format!("request to YouTube failed: {e}"))
    }
}

#[derive(Error, Debug)]
pub enum SummarizationError {
    #[error("{0}")]
    Unknown(String),
}

impl From<reqwest::Error> for SummarizationError {
    fn from(e: reqwest::Error) -> Self {
        SummarizationError::Unknown(format!("request to Gemini failed: {e}"))
    }
}

/// A failed pipeline run, tagged with the stage that produced it
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Extract(#[from] ExtractError),

    #[error(transparent)]
    Transcript(#[from] TranscriptError),

    #[error(transparent)]
    Summarize(#[from] SummarizationError),
}

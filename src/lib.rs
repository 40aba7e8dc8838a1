pub mod config;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod summarize;
pub mod web;
pub mod youtube;

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use url::Url;

pub use error::{ConfigError, ExtractError, PipelineError, SummarizationError, TranscriptError};

static BARE_ID: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9_-]{11}$").expect("valid regex"));
static ID_CHARS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9_-]+$").expect("valid regex"));

/// Path prefixes on youtube.com whose next segment is the video ID
const ID_PATH_PREFIXES: &[&str] = &["embed", "shorts", "live", "v"];

/// Identifier of a single video, derived once per submission
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct VideoId(String);

impl VideoId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for VideoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for VideoId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A single captioned segment
#[derive(Debug, Clone, Serialize)]
pub struct Segment {
    pub text: String,
    pub start: f64,
    pub duration: f64,
}

/// Caption track for a video, segments in playback order
#[derive(Debug, Clone, Serialize)]
pub struct Transcript {
    pub video_id: VideoId,
    pub language: String,
    pub segments: Vec<Segment>,
}

impl Transcript {
    /// Segment texts joined by single spaces
    pub fn text(&self) -> String {
        self.segments
            .iter()
            .map(|s| s.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Successful result of a pipeline run
#[derive(Debug, Clone, Serialize)]
pub struct Notes {
    pub video_id: VideoId,
    pub thumbnail_url: String,
    pub language: String,
    pub summary: String,
}

pub fn thumbnail_url(video_id: &VideoId) -> String {
    format!("https://img.youtube.com/vi/{video_id}/0.jpg")
}

/// Extract video ID from a bare ID or the usual YouTube URL formats
pub fn extract_video_id(input: &str) -> Result<VideoId, ExtractError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(ExtractError::Empty);
    }

    // Bare 11-character video ID
    if BARE_ID.is_match(input) {
        return Ok(VideoId(input.to_string()));
    }

    let url = Url::parse(input)
        .or_else(|_| Url::parse(&format!("https://{input}")))
        .map_err(|_| ExtractError::Unrecognized(input.to_string()))?;

    let candidate = id_from_url(&url).ok_or_else(|| ExtractError::Unrecognized(input.to_string()))?;

    if candidate.is_empty() {
        return Err(ExtractError::Unrecognized(input.to_string()));
    }
    if !ID_CHARS.is_match(&candidate) {
        return Err(ExtractError::InvalidCharacters(candidate));
    }
    Ok(VideoId(candidate))
}

fn id_from_url(url: &Url) -> Option<String> {
    // ...?v=ID, wherever it sits in the query
    if let Some((_, v)) = url.query_pairs().find(|(k, _)| k == "v") {
        return Some(v.into_owned());
    }

    let host = url.host_str()?;
    let host = host
        .strip_prefix("www.")
        .or_else(|| host.strip_prefix("m."))
        .unwrap_or(host);
    let mut segments = url.path_segments()?.filter(|s| !s.is_empty());

    match host {
        "youtu.be" => segments.next().map(str::to_string),
        "youtube.com" | "youtube-nocookie.com" => {
            let prefix = segments.next()?;
            if ID_PATH_PREFIXES.contains(&prefix) {
                segments.next().map(str::to_string)
            } else {
                None
            }
        }
        _ => None,
    }
}

//! URL in, notes or a stage-tagged error out.
//!
//! Every run is independent: the pipeline holds only read-only collaborators,
//! and a failure at any stage stops the run before the next one starts.

use log::{debug, info, warn};

use crate::summarize::{self, TextGenerator};
use crate::youtube::TranscriptFetcher;
use crate::{ExtractError, Notes, PipelineError, TranscriptError, VideoId, extract_video_id, thumbnail_url};

/// Progress of a single run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Idle,
    IdExtracted,
    TranscriptFetched,
    Summarized,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stage::Idle => write!(f, "idle"),
            Stage::IdExtracted => write!(f, "id-extracted"),
            Stage::TranscriptFetched => write!(f, "transcript-fetched"),
            Stage::Summarized => write!(f, "summarized"),
        }
    }
}

impl PipelineError {
    /// Last stage reached before the failure
    pub fn stage(&self) -> Stage {
        match self {
            PipelineError::Extract(_) => Stage::Idle,
            PipelineError::Transcript(_) => Stage::IdExtracted,
            PipelineError::Summarize(_) => Stage::TranscriptFetched,
        }
    }

    /// Message shown to the person who submitted the URL
    pub fn user_message(&self) -> String {
        match self {
            PipelineError::Extract(ExtractError::Empty) => "Please enter a YouTube video link.".to_string(),
            PipelineError::Extract(e) => format!("Invalid YouTube link: {e}"),
            PipelineError::Transcript(TranscriptError::Disabled { .. }) => {
                "Transcripts are disabled for this video.".to_string()
            }
            PipelineError::Transcript(TranscriptError::NotFound { .. }) => {
                "No transcript found for this video.".to_string()
            }
            PipelineError::Transcript(e) => format!("Error extracting transcript: {e}"),
            PipelineError::Summarize(e) => format!("Error generating content: {e}"),
        }
    }
}

pub struct Pipeline<F, G> {
    fetcher: F,
    generator: G,
    prompt: String,
}

impl<F, G> Pipeline<F, G>
where
    F: TranscriptFetcher,
    G: TextGenerator,
{
    pub fn new(fetcher: F, generator: G) -> Self {
        Self::with_prompt(fetcher, generator, summarize::SUMMARY_PROMPT)
    }

    pub fn with_prompt(fetcher: F, generator: G, prompt: impl Into<String>) -> Self {
        Self {
            fetcher,
            generator,
            prompt: prompt.into(),
        }
    }

    /// Derive the video ID; no network access happens here
    pub fn extract(&self, url: &str) -> Result<VideoId, PipelineError> {
        let video_id = extract_video_id(url)?;
        debug!("{} -> {}: {video_id}", Stage::Idle, Stage::IdExtracted);
        Ok(video_id)
    }

    /// Full run: extract, fetch, summarize
    pub async fn run(&self, url: &str) -> Result<Notes, PipelineError> {
        let video_id = self.extract(url)?;
        self.notes_for(&video_id).await
    }

    /// Fetch and summarize for an ID that was already extracted
    pub async fn notes_for(&self, video_id: &VideoId) -> Result<Notes, PipelineError> {
        let result = self.fetch_and_summarize(video_id).await;
        match &result {
            Ok(_) => info!("Notes ready for {video_id}"),
            Err(e) => warn!("Pipeline for {video_id} failed after {}: {e}", e.stage()),
        }
        result
    }

    async fn fetch_and_summarize(&self, video_id: &VideoId) -> Result<Notes, PipelineError> {
        let transcript = self.fetcher.fetch(video_id).await?;
        debug!(
            "{} -> {}: {} segments ({})",
            Stage::IdExtracted,
            Stage::TranscriptFetched,
            transcript.segments.len(),
            transcript.language
        );

        let summary = summarize::summarize(&self.generator, &transcript, &self.prompt).await?;
        debug!("{} -> {}", Stage::TranscriptFetched, Stage::Summarized);

        Ok(Notes {
            video_id: video_id.clone(),
            thumbnail_url: thumbnail_url(video_id),
            language: transcript.language,
            summary,
        })
    }
}

use async_trait::async_trait;
use log::debug;

use crate::config::Settings;
use crate::{SummarizationError, Transcript};

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Instruction placed in front of the transcript text
pub const SUMMARY_PROMPT: &str = "You are a YouTube summarizer. You will be taking the transcript text, summarizing \
the entire video, and providing an important summary in points within 200 to 250 words. Please provide \
the summary of the text given here: ";

/// A generative model that turns one text input into one text output
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, input: &str) -> Result<String, SummarizationError>;
}

/// Summarize a transcript: one request, prompt first, transcript appended as-is
pub async fn summarize<G>(generator: &G, transcript: &Transcript, prompt: &str) -> Result<String, SummarizationError>
where
    G: TextGenerator + ?Sized,
{
    let input = format!("{prompt}{}", transcript.text());
    debug!(
        "Summarizing {} ({} segments, {} chars of input)",
        transcript.video_id,
        transcript.segments.len(),
        input.len()
    );
    generator.generate(&input).await
}

/// Client for the Gemini `generateContent` endpoint
#[derive(Clone)]
pub struct GeminiClient {
    client: reqwest::Client,
    api_key: String,
    model: String,
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("model", &self.model)
            .finish_non_exhaustive()
    }
}

impl GeminiClient {
    pub fn new(client: reqwest::Client, settings: &Settings) -> Self {
        Self {
            client,
            api_key: settings.api_key().to_string(),
            model: settings.model.clone(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!("{GEMINI_API_BASE}/models/{}:generateContent", self.model)
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, input: &str) -> Result<String, SummarizationError> {
        debug!("Generating content via Gemini API with model {}", self.model);

        let resp = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(&request_body(input))
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(SummarizationError::Unknown(format!(
                "Gemini API returned {status}: {body}"
            )));
        }

        let json: serde_json::Value = resp.json().await?;
        extract_gemini_text(&json)
    }
}

fn request_body(input: &str) -> serde_json::Value {
    serde_json::json!({
        "contents": [
            {
                "role": "user",
                "parts": [{ "text": input }]
            }
        ]
    })
}

fn extract_gemini_text(json: &serde_json::Value) -> Result<String, SummarizationError> {
    if let Some(parts) = json
        .get("candidates")
        .and_then(|c| c.get(0))
        .and_then(|c| c.get("content"))
        .and_then(|c| c.get("parts"))
        .and_then(|p| p.as_array())
    {
        let text: String = parts
            .iter()
            .filter_map(|part| part.get("text")?.as_str())
            .collect::<Vec<_>>()
            .join("");
        if !text.is_empty() {
            return Ok(text);
        }
    }

    if let Some(reason) = json
        .get("promptFeedback")
        .and_then(|f| f.get("blockReason"))
        .and_then(|r| r.as_str())
    {
        return Err(SummarizationError::Unknown(format!(
            "Gemini blocked the prompt: {reason}"
        )));
    }

    Err(SummarizationError::Unknown(
        "unexpected Gemini API response format".to_string(),
    ))
}

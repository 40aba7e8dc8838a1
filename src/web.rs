use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Html;
use axum::routing::get;
use axum::{Form, Json, Router};
use html_escape::{encode_double_quoted_attribute, encode_text};
use log::{error, info};
use serde::{Deserialize, Serialize};

use crate::pipeline::Pipeline;
use crate::summarize::TextGenerator;
use crate::youtube::TranscriptFetcher;
use crate::{ExtractError, PipelineError, TranscriptError, thumbnail_url};

const TITLE: &str = "YouTube Transcript to Detailed Notes Converter";

/// What the form server runs with: a working pipeline, or the reason there isn't one
pub enum AppState<F, G> {
    Ready(Pipeline<F, G>),
    Misconfigured(String),
}

#[derive(Debug, Deserialize)]
pub struct NotesForm {
    #[serde(default)]
    url: String,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

#[derive(Default)]
struct Page<'a> {
    url: &'a str,
    thumbnail: Option<String>,
    notes: Option<&'a str>,
    error: Option<String>,
}

pub fn router<F, G>(state: AppState<F, G>) -> Router
where
    F: TranscriptFetcher + 'static,
    G: TextGenerator + 'static,
{
    Router::new()
        .route("/", get(index::<F, G>).post(submit::<F, G>))
        .route("/health", get(health))
        .with_state(Arc::new(state))
}

pub async fn serve<F, G>(addr: SocketAddr, state: AppState<F, G>) -> std::io::Result<()>
where
    F: TranscriptFetcher + 'static,
    G: TextGenerator + 'static,
{
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Serving notes form on http://{addr}");
    axum::serve(listener, router(state)).await
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

async fn index<F, G>(State(state): State<Arc<AppState<F, G>>>) -> (StatusCode, Html<String>)
where
    F: TranscriptFetcher + 'static,
    G: TextGenerator + 'static,
{
    match state.as_ref() {
        AppState::Ready(_) => (StatusCode::OK, Html(render_page(&Page::default()))),
        AppState::Misconfigured(reason) => misconfigured("", reason),
    }
}

async fn submit<F, G>(
    State(state): State<Arc<AppState<F, G>>>,
    Form(form): Form<NotesForm>,
) -> (StatusCode, Html<String>)
where
    F: TranscriptFetcher + 'static,
    G: TextGenerator + 'static,
{
    let pipeline = match state.as_ref() {
        AppState::Ready(pipeline) => pipeline,
        AppState::Misconfigured(reason) => return misconfigured(&form.url, reason),
    };

    let video_id = match pipeline.extract(&form.url) {
        Ok(video_id) => video_id,
        Err(e) => {
            let page = Page {
                url: &form.url,
                error: Some(e.user_message()),
                ..Default::default()
            };
            return (status_for(&e), Html(render_page(&page)));
        }
    };

    let thumbnail = Some(thumbnail_url(&video_id));
    match pipeline.notes_for(&video_id).await {
        Ok(notes) => {
            let page = Page {
                url: &form.url,
                thumbnail,
                notes: Some(notes.summary.as_str()),
                error: None,
            };
            (StatusCode::OK, Html(render_page(&page)))
        }
        Err(e) => {
            let page = Page {
                url: &form.url,
                thumbnail,
                notes: None,
                error: Some(e.user_message()),
            };
            (status_for(&e), Html(render_page(&page)))
        }
    }
}

fn misconfigured(url: &str, reason: &str) -> (StatusCode, Html<String>) {
    error!("Rejecting request, configuration error: {reason}");
    let page = Page {
        url,
        error: Some(format!("Configuration error: {reason}")),
        ..Default::default()
    };
    (StatusCode::SERVICE_UNAVAILABLE, Html(render_page(&page)))
}

fn status_for(err: &PipelineError) -> StatusCode {
    match err {
        PipelineError::Extract(ExtractError::Empty) => StatusCode::BAD_REQUEST,
        PipelineError::Extract(_) => StatusCode::UNPROCESSABLE_ENTITY,
        // Properties of the video itself, not upstream failures
        PipelineError::Transcript(TranscriptError::Disabled { .. }) => StatusCode::UNPROCESSABLE_ENTITY,
        PipelineError::Transcript(TranscriptError::NotFound { .. }) => StatusCode::NOT_FOUND,
        PipelineError::Transcript(TranscriptError::Unknown(_)) | PipelineError::Summarize(_) => {
            StatusCode::BAD_GATEWAY
        }
    }
}

fn render_page(page: &Page<'_>) -> String {
    let mut body = String::new();

    if let Some(thumbnail) = &page.thumbnail {
        body.push_str(&format!(
            "<img src=\"{}\" alt=\"Video thumbnail\" style=\"width:100%\">\n",
            encode_double_quoted_attribute(thumbnail)
        ));
    }
    if let Some(error) = &page.error {
        body.push_str(&format!("<p class=\"error\">{}</p>\n", encode_text(error)));
    }
    if let Some(notes) = page.notes {
        body.push_str(&format!(
            "<h2>Detailed Notes:</h2>\n<div class=\"notes\">{}</div>\n",
            encode_text(notes)
        ));
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{TITLE}</title>
<style>
body {{ font-family: sans-serif; max-width: 48rem; margin: 2rem auto; padding: 0 1rem; }}
input[type=text] {{ width: 100%; padding: 0.5rem; box-sizing: border-box; }}
.error {{ color: #b00020; background: #fdecea; padding: 0.75rem; }}
.notes {{ white-space: pre-wrap; }}
</style>
</head>
<body>
<h1>{TITLE}</h1>
<form method="post" action="/">
<label for="url">Enter YouTube Video Link:</label>
<input type="text" id="url" name="url" value="{url}">
<p><button type="submit">Get Detailed Notes</button></p>
</form>
{body}</body>
</html>
"#,
        url = encode_double_quoted_attribute(page.url),
    )
}

use crate::Notes;

/// Render notes for a terminal: heading, thumbnail, then the summary verbatim
pub fn render_text(notes: &Notes) -> String {
    format!(
        "## Detailed Notes: {}\nThumbnail: {}\n\n{}",
        notes.video_id, notes.thumbnail_url, notes.summary
    )
}

pub fn render_json(notes: &Notes) -> String {
    serde_json::to_string_pretty(notes).unwrap_or_else(|e| format!("{{\"error\": \"{e}\"}}"))
}

//! AI summarization of an aggregated patient history

use super::client::ClaudeClient;
use carecms_core::summary::PatientSummary;

const SYSTEM_PROMPT: &str = "You are a clinical records assistant writing for doctors. \
Follow the formatting instructions in the request exactly.";

/// Returned in place of a summary when text generation is unavailable or
/// fails. The aggregated data is still surfaced alongside it.
pub const FALLBACK_SUMMARY: &str = "Failed to generate summary due to an error.";

/// Generate the summary text for an aggregated patient history, degrading
/// to [`FALLBACK_SUMMARY`] on any upstream failure. The boolean reports
/// whether the text came from the service.
pub async fn summarize_or_fallback(
    client: Option<&ClaudeClient>,
    summary: &PatientSummary,
) -> (String, bool) {
    let Some(client) = client else {
        tracing::warn!("Text generation skipped: no API key configured");
        return (FALLBACK_SUMMARY.to_string(), false);
    };

    match client.message(Some(SYSTEM_PROMPT), &summary.compose_prompt()).await {
        Ok(text) => (text, true),
        Err(e) => {
            tracing::warn!(error = %e, "Text generation failed, returning fallback summary");
            (FALLBACK_SUMMARY.to_string(), false)
        }
    }
}

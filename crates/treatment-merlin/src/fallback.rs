//! OpenAI fallback for when Merlin is down.
//!
//! Transport failures and degraded responses (5xx, 429) fall through to an
//! OpenAI chat completion asked to produce the same JSON shape. Merlin 4xx
//! responses are the caller's error and do not fall back.

use serde::{Deserialize, Serialize};
use tracing::warn;

use treatment_openai::chat::{complete, ChatMessage, ChatRole};
use treatment_openai::client::OpenAiClient;

use crate::client::{DiagnosisCandidate, MerlinClient};
use crate::error::MerlinError;

const FALLBACK_SYSTEM_PROMPT: &str = "\
You are a clinical decision-support assistant. Given a patient's symptoms \
and health profile, produce a ranked differential diagnosis. Respond with \
only a JSON array of objects with keys \"condition\", \"likelihood\" \
(0.0 to 1.0) and \"rationale\". No other text.";

/// Which backend actually produced a differential.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosisBackend {
    Merlin,
    OpenaiFallback,
}

#[derive(Debug, Clone, Serialize)]
pub struct Differential {
    pub candidates: Vec<DiagnosisCandidate>,
    pub backend: DiagnosisBackend,
}

/// Whether a Merlin HTTP status warrants the OpenAI fallback.
///
/// Server-side failures and rate limiting do; client errors (bad request,
/// auth) are the caller's problem and are surfaced as-is.
pub fn should_fall_back(status: u16) -> bool {
    status >= 500 || status == 429
}

/// Run the differential through Merlin, falling back to OpenAI when Merlin
/// is unreachable or degraded.
pub async fn differential_with_fallback(
    merlin: &MerlinClient,
    openai: &OpenAiClient,
    symptoms: &str,
    profile_block: &str,
) -> Result<Differential, MerlinError> {
    match merlin.differential_diagnosis(symptoms, profile_block).await {
        Ok(candidates) => Ok(Differential {
            candidates,
            backend: DiagnosisBackend::Merlin,
        }),
        Err(MerlinError::Api { status, body }) if !should_fall_back(status) => {
            Err(MerlinError::Api { status, body })
        }
        Err(e) => {
            warn!(error = %e, "merlin unavailable, using openai fallback");

            let system = if profile_block.is_empty() {
                FALLBACK_SYSTEM_PROMPT.to_string()
            } else {
                format!("{FALLBACK_SYSTEM_PROMPT}\n\n{profile_block}")
            };

            let reply = complete(
                openai,
                &system,
                &[ChatMessage {
                    role: ChatRole::User,
                    content: symptoms.to_string(),
                }],
            )
            .await?;

            let candidates = parse_candidates(&reply)?;

            Ok(Differential {
                candidates,
                backend: DiagnosisBackend::OpenaiFallback,
            })
        }
    }
}

/// Parse a JSON candidate array, tolerating a Markdown code fence around
/// it. Chat models add the fence often enough that rejecting it would make
/// the fallback flaky.
pub fn parse_candidates(reply: &str) -> Result<Vec<DiagnosisCandidate>, MerlinError> {
    let trimmed = strip_code_fence(reply.trim());

    serde_json::from_str(trimmed).map_err(|e| MerlinError::ResponseParse(e.to_string()))
}

fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };

    // Drop the fence's info string ("json") up to the first newline.
    let body = match rest.split_once('\n') {
        Some((_, body)) => body,
        None => rest,
    };

    body.trim_end().trim_end_matches("```").trim()
}

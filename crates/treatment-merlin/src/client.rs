use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::MerlinError;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone)]
pub struct MerlinConfig {
    pub base_url: String,
    pub api_key: String,
}

#[derive(Clone)]
pub struct MerlinClient {
    http: reqwest::Client,
    config: MerlinConfig,
}

/// One ranked entry in a differential diagnosis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiagnosisCandidate {
    pub condition: String,
    /// 0.0..=1.0 as reported by the backend; not re-normalized.
    pub likelihood: f64,
    pub rationale: String,
}

#[derive(Serialize)]
struct DifferentialRequest<'a> {
    symptoms: &'a str,
    context: &'a str,
}

#[derive(Deserialize)]
struct DifferentialResponse {
    candidates: Vec<DiagnosisCandidate>,
}

impl MerlinClient {
    pub fn new(config: MerlinConfig) -> Result<Self, MerlinError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .connect_timeout(CONNECT_TIMEOUT)
            .build()
            .map_err(|e| MerlinError::Config(e.to_string()))?;

        Ok(Self { http, config })
    }

    /// Ask Merlin for a ranked differential given free-text symptoms and
    /// the caller's health-profile context block.
    pub async fn differential_diagnosis(
        &self,
        symptoms: &str,
        profile_block: &str,
    ) -> Result<Vec<DiagnosisCandidate>, MerlinError> {
        let url = format!(
            "{}/v1/differential",
            self.config.base_url.trim_end_matches('/')
        );

        let response = self
            .http
            .post(url)
            .bearer_auth(&self.config.api_key)
            .json(&DifferentialRequest {
                symptoms,
                context: profile_block,
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MerlinError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: DifferentialResponse = response
            .json()
            .await
            .map_err(|e| MerlinError::ResponseParse(e.to_string()))?;

        info!(candidates = parsed.candidates.len(), "merlin differential received");

        Ok(parsed.candidates)
    }
}

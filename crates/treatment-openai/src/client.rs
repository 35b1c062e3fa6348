use std::time::Duration;

use serde::de::DeserializeOwned;

use crate::error::OpenAiError;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(90);
const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// How much of an error body to keep in error messages.
const BODY_SNIPPET_LEN: usize = 300;

#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    pub api_key: String,
    /// Overridable for tests and self-hosted gateways.
    pub base_url: String,
    pub chat_model: String,
    pub vision_model: String,
    pub embedding_model: String,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: "https://api.openai.com".to_string(),
            chat_model: "gpt-4o-mini".to_string(),
            vision_model: "gpt-4o".to_string(),
            embedding_model: "text-embedding-3-small".to_string(),
        }
    }
}

/// Shared OpenAI client, built once at startup and stored in app state.
#[derive(Clone)]
pub struct OpenAiClient {
    http: reqwest::Client,
    config: OpenAiConfig,
}

impl OpenAiClient {
    pub fn new(config: OpenAiConfig) -> Result<Self, OpenAiError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .connect_timeout(CONNECT_TIMEOUT)
            .build()
            .map_err(|e| OpenAiError::Config(e.to_string()))?;

        Ok(Self { http, config })
    }

    pub fn config(&self) -> &OpenAiConfig {
        &self.config
    }

    pub(crate) fn post(&self, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.config.base_url.trim_end_matches('/'), path);
        self.http.post(url).bearer_auth(&self.config.api_key)
    }
}

/// Read a response body, mapping non-2xx statuses to a typed error carrying
/// a bounded body snippet.
pub(crate) async fn read_json<T: DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, OpenAiError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(OpenAiError::Api {
            status: status.as_u16(),
            body: snippet(&body),
        });
    }

    response
        .json::<T>()
        .await
        .map_err(|e| OpenAiError::ResponseParse(e.to_string()))
}

fn snippet(body: &str) -> String {
    let mut end = body.len().min(BODY_SNIPPET_LEN);
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    body[..end].to_string()
}

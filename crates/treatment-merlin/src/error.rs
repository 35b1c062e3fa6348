use thiserror::Error;

#[derive(Debug, Error)]
pub enum MerlinError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("merlin returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("response parsing failed: {0}")]
    ResponseParse(String),

    #[error("fallback failed: {0}")]
    Fallback(#[from] treatment_openai::error::OpenAiError),

    #[error("client build failed: {0}")]
    Config(String),
}

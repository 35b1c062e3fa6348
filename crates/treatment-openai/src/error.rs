use thiserror::Error;

#[derive(Debug, Error)]
pub enum OpenAiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("api returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("response parsing failed: {0}")]
    ResponseParse(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("input must not be empty")]
    EmptyInput,

    #[error("unsupported content type: {0}")]
    UnsupportedContentType(String),

    #[error("client build failed: {0}")]
    Config(String),
}

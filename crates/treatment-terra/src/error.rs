use thiserror::Error;

#[derive(Debug, Error)]
pub enum TerraError {
    #[error("malformed signature header")]
    MalformedHeader,

    #[error("signature mismatch")]
    SignatureMismatch,

    #[error("signature timestamp outside tolerance")]
    StaleTimestamp,

    #[error("payload parsing failed: {0}")]
    PayloadParse(#[from] serde_json::Error),
}

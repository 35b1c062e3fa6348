//! treatment-openai
//!
//! OpenAI REST client: chat completions, vision-based document text
//! extraction, and embeddings. Thin wrapper over `reqwest`.

pub mod chat;
pub mod client;
pub mod context;
pub mod embeddings;
pub mod error;
pub mod vision;

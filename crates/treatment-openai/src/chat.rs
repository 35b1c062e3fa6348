use serde::{Deserialize, Serialize};
use tracing::info;

use crate::client::{read_json, OpenAiClient};
use crate::error::OpenAiError;

/// A single message in a conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

/// Role of a chat message.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatRole {
    User,
    Assistant,
}

impl ChatRole {
    fn wire_name(self) -> &'static str {
        match self {
            ChatRole::User => "user",
            ChatRole::Assistant => "assistant",
        }
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<WireMessage>,
}

#[derive(Serialize)]
struct WireMessage {
    role: &'static str,
    content: serde_json::Value,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// Send a multi-turn conversation and return the assistant's reply.
///
/// The caller provides the full message history and a system prompt;
/// nothing is streamed.
pub async fn complete(
    client: &OpenAiClient,
    system_prompt: &str,
    messages: &[ChatMessage],
) -> Result<String, OpenAiError> {
    if messages.is_empty() {
        return Err(OpenAiError::EmptyInput);
    }

    let mut wire = Vec::with_capacity(messages.len() + 1);
    wire.push(WireMessage {
        role: "system",
        content: serde_json::Value::String(system_prompt.to_string()),
    });
    for msg in messages {
        wire.push(WireMessage {
            role: msg.role.wire_name(),
            content: serde_json::Value::String(msg.content.clone()),
        });
    }

    let request = ChatRequest {
        model: &client.config().chat_model,
        messages: wire,
    };

    let response = client
        .post("/v1/chat/completions")
        .json(&request)
        .send()
        .await?;

    let parsed: ChatResponse = read_json(response).await?;

    let text = parsed
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .ok_or_else(|| OpenAiError::ResponseParse("no message in response".to_string()))?;

    info!(
        model = %client.config().chat_model,
        reply_len = text.len(),
        "chat completion finished"
    );

    Ok(text)
}

/// Chat completion with raw content parts in the user message, used by the
/// vision module. Exposed at crate level only.
pub(crate) async fn complete_with_parts(
    client: &OpenAiClient,
    model: &str,
    system_prompt: &str,
    user_parts: serde_json::Value,
) -> Result<String, OpenAiError> {
    let request = ChatRequest {
        model,
        messages: vec![
            WireMessage {
                role: "system",
                content: serde_json::Value::String(system_prompt.to_string()),
            },
            WireMessage {
                role: "user",
                content: user_parts,
            },
        ],
    };

    let response = client
        .post("/v1/chat/completions")
        .json(&request)
        .send()
        .await?;

    let parsed: ChatResponse = read_json(response).await?;

    parsed
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .ok_or_else(|| OpenAiError::ResponseParse("no message in response".to_string()))
}

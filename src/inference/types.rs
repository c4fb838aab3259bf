//! Shared wire types for the chat-completions API shape.
//!
//! Both backends (Azure OpenAI and GitHub Models) speak the same
//! OpenAI-compatible protocol: an ordered list of role-tagged messages in,
//! a single completion message out. These types serialize that shape.

use serde::{Deserialize, Serialize};

/// Role tag on a chat message (OpenAI terminology).
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// A single role-tagged message in the request.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        ChatMessage {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// A tool the model may invoke, as discovered from the tool server.
/// `name` is unique within a discovered set.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ToolDescriptor {
    pub name: String,
    pub description: String,
}

/// Tool definition in the API request body (`{"type": "function", ...}`).
#[derive(Serialize, Debug)]
pub struct ApiToolDefinition {
    #[serde(rename = "type")]
    pub tool_type: &'static str, // always "function"
    pub function: ApiFunction,
}

#[derive(Serialize, Debug)]
pub struct ApiFunction {
    pub name: String,
    pub description: String,
}

/// The request body for the chat-completions endpoint.
#[derive(Serialize, Debug)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<ApiToolDefinition>>,
}

/// The response body for the chat-completions endpoint.
#[derive(Deserialize, Debug)]
pub struct ChatCompletionResponse {
    pub choices: Vec<Choice>,
}

#[derive(Deserialize, Debug)]
pub struct Choice {
    pub message: CompletionMessage,
}

#[derive(Deserialize, Debug)]
pub struct CompletionMessage {
    /// Completion text. Absent when the model answered with tool calls only.
    #[serde(default)]
    pub content: Option<String>,
}

/// Converts tool descriptors to API format. Returns None if empty (omitted from JSON).
pub fn tools_to_api(tools: &[ToolDescriptor]) -> Option<Vec<ApiToolDefinition>> {
    if tools.is_empty() {
        return None;
    }
    Some(
        tools
            .iter()
            .map(|t| ApiToolDefinition {
                tool_type: "function",
                function: ApiFunction {
                    name: t.name.clone(),
                    description: t.description.clone(),
                },
            })
            .collect(),
    )
}

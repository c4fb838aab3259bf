//! JSON-RPC 2.0 and MCP wire types.
//!
//! Only the slice of the protocol this crate consumes: session
//! initialization and tool listing. Field names follow the MCP schema
//! (camelCase on the wire).

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const JSONRPC_VERSION: &str = "2.0";
pub const MCP_PROTOCOL_VERSION: &str = "2025-03-26";

// ============================================================================
// JSON-RPC Envelope
// ============================================================================

#[derive(Serialize, Debug)]
pub struct JsonRpcRequest {
    pub jsonrpc: &'static str,
    pub id: u64,
    pub method: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
}

/// A notification carries no `id` and expects no response.
#[derive(Serialize, Debug)]
pub struct JsonRpcNotification {
    pub jsonrpc: &'static str,
    pub method: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
}

#[derive(Deserialize, Debug)]
pub struct JsonRpcResponse {
    #[serde(default)]
    pub id: Value,
    #[serde(default)]
    pub result: Option<Value>,
    #[serde(default)]
    pub error: Option<JsonRpcError>,
}

#[derive(Deserialize, Debug)]
pub struct JsonRpcError {
    pub code: i64,
    pub message: String,
}

// ============================================================================
// MCP Payloads
// ============================================================================

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct InitializeParams {
    pub protocol_version: String,
    pub capabilities: ClientCapabilities,
    pub client_info: ClientInfo,
}

/// We advertise no optional client capabilities.
#[derive(Serialize, Debug, Default)]
pub struct ClientCapabilities {}

#[derive(Serialize, Debug)]
pub struct ClientInfo {
    pub name: String,
    pub version: String,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct InitializeResult {
    #[serde(default)]
    pub protocol_version: String,
    #[serde(default)]
    pub server_info: Option<ServerInfo>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct ServerInfo {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub version: String,
}

#[derive(Serialize, Debug)]
pub struct ListToolsParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ListToolsResult {
    pub tools: Vec<McpTool>,
    #[serde(default)]
    pub next_cursor: Option<String>,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct McpTool {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub input_schema: Option<Value>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum McpError {
    /// Bad server URL or network-level failure.
    Transport(String),
    /// Response did not follow the JSON-RPC/MCP shape.
    Protocol(String),
    /// The server returned a JSON-RPC error object.
    Server { code: i64, message: String },
}

impl fmt::Display for McpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            McpError::Transport(msg) => write!(f, "MCP transport error: {msg}"),
            McpError::Protocol(msg) => write!(f, "MCP protocol error: {msg}"),
            McpError::Server { code, message } => {
                write!(f, "MCP server error {code}: {message}")
            }
        }
    }
}

impl std::error::Error for McpError {}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_serialization() {
        let request = JsonRpcRequest {
            jsonrpc: JSONRPC_VERSION,
            id: 1,
            method: "tools/list".to_string(),
            params: Some(json!({"cursor": "abc"})),
        };
        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains("\"jsonrpc\":\"2.0\""));
        assert!(json.contains("\"method\":\"tools/list\""));
    }

    #[test]
    fn test_notification_has_no_id() {
        let notification = JsonRpcNotification {
            jsonrpc: JSONRPC_VERSION,
            method: "notifications/initialized".to_string(),
            params: None,
        };
        let json = serde_json::to_string(&notification).unwrap();
        assert!(!json.contains("\"id\""));
        assert!(!json.contains("\"params\""));
    }

    #[test]
    fn test_list_tools_result_camel_case() {
        let json = r#"{
            "tools": [{"name": "search", "description": "Web search", "inputSchema": {}}],
            "nextCursor": "page2"
        }"#;
        let result: ListToolsResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.tools[0].name, "search");
        assert_eq!(result.tools[0].description.as_deref(), Some("Web search"));
        assert_eq!(result.next_cursor.as_deref(), Some("page2"));
    }

    #[test]
    fn test_tool_description_optional() {
        let tool: McpTool = serde_json::from_str(r#"{"name": "bare"}"#).unwrap();
        assert_eq!(tool.name, "bare");
        assert!(tool.description.is_none());
    }
}

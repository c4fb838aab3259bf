//! Streamable-HTTP MCP client.
//!
//! JSON-RPC 2.0 requests are POSTed to the configured server URL with a
//! bearer token. The server may answer with plain JSON or with a single
//! SSE-framed message (`event:`/`data:` lines); both are handled.
//!
//! `connect` performs the `initialize` handshake, captures the session id
//! header when the server issues one, and sends `notifications/initialized`.
//! A connected client is stateless afterwards and safe to share.

use std::sync::atomic::{AtomicU64, Ordering};

use log::{debug, info, warn};
use serde_json::json;
use url::Url;

use super::types::{
    ClientCapabilities, ClientInfo, InitializeParams, InitializeResult, JSONRPC_VERSION,
    JsonRpcNotification, JsonRpcRequest, JsonRpcResponse, ListToolsParams, ListToolsResult,
    MCP_PROTOCOL_VERSION, McpError, McpTool,
};

/// Header used by streamable-HTTP servers to correlate a session.
const SESSION_HEADER: &str = "Mcp-Session-Id";

pub struct McpClient {
    server_url: Url,
    token: String,
    session_id: Option<String>,
    request_id: AtomicU64,
    http: reqwest::Client,
}

impl McpClient {
    /// Connects to the MCP server and completes the initialize handshake.
    pub async fn connect(server_url: &str, token: &str) -> Result<Self, McpError> {
        let server_url = Url::parse(server_url)
            .map_err(|e| McpError::Transport(format!("invalid server URL: {e}")))?;

        let mut client = Self {
            server_url,
            token: token.to_string(),
            session_id: None,
            request_id: AtomicU64::new(1),
            http: reqwest::Client::new(),
        };

        info!("Connecting to MCP server at {}", client.server_url);

        let params = InitializeParams {
            protocol_version: MCP_PROTOCOL_VERSION.to_string(),
            capabilities: ClientCapabilities::default(),
            client_info: ClientInfo {
                name: "parley".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
        };

        let response = client.post_rpc("initialize", Some(json!(params))).await?;

        if let Some(session) = response
            .headers()
            .get(SESSION_HEADER)
            .and_then(|v| v.to_str().ok())
        {
            debug!("MCP session id: {session}");
            client.session_id = Some(session.to_string());
        }

        let body = response
            .text()
            .await
            .map_err(|e| McpError::Transport(e.to_string()))?;
        let result = unwrap_rpc_result(&body)?;
        let init: InitializeResult = serde_json::from_value(result)
            .map_err(|e| McpError::Protocol(format!("invalid initialize result: {e}")))?;

        client.notify("notifications/initialized").await?;

        info!(
            "MCP server connected: {} {}",
            init.server_info.as_ref().map(|s| s.name.as_str()).unwrap_or("unknown"),
            init.server_info.as_ref().map(|s| s.version.as_str()).unwrap_or(""),
        );

        Ok(client)
    }

    /// Lists every tool the server offers, following `nextCursor` pagination.
    pub async fn list_tools(&self) -> Result<Vec<McpTool>, McpError> {
        let mut all_tools = Vec::new();
        let mut cursor: Option<String> = None;

        loop {
            let params = ListToolsParams { cursor };
            let result = self.send_request("tools/list", Some(json!(params))).await?;
            let page: ListToolsResult = serde_json::from_value(result)
                .map_err(|e| McpError::Protocol(format!("invalid tools/list result: {e}")))?;

            all_tools.extend(page.tools);

            if page.next_cursor.is_none() {
                break;
            }
            cursor = page.next_cursor;
        }

        debug!("Listed {} MCP tools", all_tools.len());
        Ok(all_tools)
    }

    /// Sends a request and returns the JSON-RPC `result` payload.
    async fn send_request(
        &self,
        method: &str,
        params: Option<serde_json::Value>,
    ) -> Result<serde_json::Value, McpError> {
        let response = self.post_rpc(method, params).await?;
        let body = response
            .text()
            .await
            .map_err(|e| McpError::Transport(e.to_string()))?;
        unwrap_rpc_result(&body)
    }

    /// POSTs a JSON-RPC request, returning the raw HTTP response.
    async fn post_rpc(
        &self,
        method: &str,
        params: Option<serde_json::Value>,
    ) -> Result<reqwest::Response, McpError> {
        let id = self.request_id.fetch_add(1, Ordering::SeqCst);
        let request = JsonRpcRequest {
            jsonrpc: JSONRPC_VERSION,
            id,
            method: method.to_string(),
            params,
        };

        debug!("MCP request: method={method}, id={id}");

        let mut builder = self
            .http
            .post(self.server_url.clone())
            .header("Authorization", format!("Bearer {}", self.token))
            .header("Accept", "application/json, text/event-stream")
            .json(&request);
        if let Some(ref session) = self.session_id {
            builder = builder.header(SESSION_HEADER, session);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| McpError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let err_body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!("MCP HTTP error: {} - {}", status, err_body);
            return Err(McpError::Transport(format!("HTTP {status}: {err_body}")));
        }

        Ok(response)
    }

    /// Fire-and-forget notification. Non-2xx is tolerated with a warning.
    async fn notify(&self, method: &str) -> Result<(), McpError> {
        let notification = JsonRpcNotification {
            jsonrpc: JSONRPC_VERSION,
            method: method.to_string(),
            params: None,
        };

        let mut builder = self
            .http
            .post(self.server_url.clone())
            .header("Authorization", format!("Bearer {}", self.token))
            .header("Accept", "application/json, text/event-stream")
            .json(&notification);
        if let Some(ref session) = self.session_id {
            builder = builder.header(SESSION_HEADER, session);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| McpError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            warn!(
                "MCP notification {method} rejected with HTTP {}",
                response.status()
            );
        }
        Ok(())
    }
}

/// Parses a response body that is either plain JSON or a single SSE-framed
/// message, and unwraps the JSON-RPC result.
fn unwrap_rpc_result(body: &str) -> Result<serde_json::Value, McpError> {
    let payload = extract_json_payload(body)?;
    let response: JsonRpcResponse = serde_json::from_str(payload)
        .map_err(|e| McpError::Protocol(format!("invalid JSON-RPC response: {e}")))?;

    if let Some(error) = response.error {
        return Err(McpError::Server {
            code: error.code,
            message: error.message,
        });
    }

    response
        .result
        .ok_or_else(|| McpError::Protocol("missing result in response".to_string()))
}

/// Streamable-HTTP servers may wrap the JSON-RPC message in SSE framing.
/// Returns the first `data:` line in that case, the whole body otherwise.
fn extract_json_payload(body: &str) -> Result<&str, McpError> {
    let trimmed = body.trim_start();
    if trimmed.starts_with('{') {
        return Ok(trimmed);
    }
    for line in body.lines() {
        if let Some(data) = line.strip_prefix("data: ") {
            return Ok(data);
        }
        if let Some(data) = line.strip_prefix("data:") {
            return Ok(data);
        }
    }
    Err(McpError::Protocol("response carried no JSON payload".to_string()))
}

//! # Tool Discovery
//!
//! Lazily connects to the configured MCP server and lists its tools.
//!
//! The connected handle is process-wide state: the first successful connect
//! is cached and reused for every later call (single-flight via
//! [`OnceCell::get_or_try_init`], so concurrent first-callers produce one
//! handle). A failed attempt is never cached — the next call re-attempts.
//!
//! `list_tools` never fails: missing credentials, connect failures, and
//! transport failures all degrade to an empty tool list.

use log::{debug, warn};
use tokio::sync::OnceCell;

use crate::core::config::AiConfig;
use crate::inference::ToolDescriptor;
use crate::mcp::client::McpClient;

#[derive(Default)]
pub struct ToolDiscovery {
    handle: OnceCell<McpClient>,
}

impl ToolDiscovery {
    pub fn new() -> Self {
        Self {
            handle: OnceCell::new(),
        }
    }

    /// Lists the tools available from the configured MCP server.
    ///
    /// Returns an empty list when the tool-server token or URL is missing
    /// (no connection is attempted) and on any connection or listing
    /// failure.
    pub async fn list_tools(&self, config: &AiConfig) -> Vec<ToolDescriptor> {
        if config.hugging_face_token.is_empty() || config.hugging_face_mcp_server.is_empty() {
            debug!("Tool discovery skipped: MCP credentials not configured");
            return Vec::new();
        }

        let client = match self
            .handle
            .get_or_try_init(|| {
                McpClient::connect(&config.hugging_face_mcp_server, &config.hugging_face_token)
            })
            .await
        {
            Ok(client) => client,
            Err(e) => {
                warn!("Error connecting to MCP server: {e}");
                return Vec::new();
            }
        };

        match client.list_tools().await {
            Ok(tools) => tools
                .into_iter()
                .map(|t| ToolDescriptor {
                    name: t.name,
                    description: t.description.unwrap_or_default(),
                })
                .collect(),
            Err(e) => {
                warn!("Error listing MCP tools: {e}");
                Vec::new()
            }
        }
    }

    /// True once a connection has been established and cached.
    pub fn is_connected(&self) -> bool {
        self.handle.initialized()
    }

    /// Drops the cached handle. The next call reconnects from scratch.
    pub fn shutdown(&mut self) {
        if self.handle.take().is_some() {
            debug!("MCP handle dropped");
        }
    }
}

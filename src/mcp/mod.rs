//! # MCP (Model Context Protocol)
//!
//! Client side of the tool-server protocol: a streamable-HTTP transport
//! speaking JSON-RPC 2.0, plus the lazily cached discovery handle the
//! gateway uses to list tools.

pub mod client;
pub mod discovery;
pub mod types;

pub use client::McpClient;
pub use discovery::ToolDiscovery;
pub use types::{McpError, McpTool};

//! # Gateway
//!
//! The orchestrator behind the chat surface. One call does the whole trip:
//!
//! ```text
//! send_message(text)
//!   ├── load config snapshot          (never fails)
//!   ├── resolve provider              (None → error result, no network)
//!   ├── discover tools                (failure → empty list, send anyway)
//!   ├── complete, racing cancellation (cancel → SendOutcome::Cancelled)
//!   └── normalize + extract images    (canonical ChatResult)
//! ```
//!
//! Every failure is caught, logged, and folded into a well-formed error
//! result — the gateway is stateless across calls and never panics the
//! caller. Cancellation is the one outcome that is not a `ChatResult`:
//! it surfaces as its own variant, never as a partial result.

use std::sync::Arc;

use log::{error, info};
use tokio_util::sync::CancellationToken;

use crate::core::config::ConfigStore;
use crate::core::response::{ChatResult, normalize};
use crate::inference::{CompletionRequest, ToolDescriptor, resolver};
use crate::mcp::ToolDiscovery;

/// Error result message when resolution finds no usable provider. Covers
/// both "nothing configured" and "every configured provider failed to
/// construct" — the resolver logs which one it was.
pub const NO_PROVIDER_MESSAGE: &str = "No configured AI provider available for chat";

/// Outcome of a send: a canonical result, or an externally requested
/// cancellation (distinguishable from a provider error).
#[derive(Debug, PartialEq)]
pub enum SendOutcome {
    Completed(ChatResult),
    Cancelled,
}

impl SendOutcome {
    /// Unwraps the completed result, panicking on cancellation. Test helper.
    #[cfg(test)]
    pub fn unwrap_completed(self) -> ChatResult {
        match self {
            SendOutcome::Completed(result) => result,
            SendOutcome::Cancelled => panic!("send was cancelled"),
        }
    }
}

pub struct Gateway {
    store: Arc<dyn ConfigStore>,
    discovery: ToolDiscovery,
}

impl Gateway {
    pub fn new(store: Arc<dyn ConfigStore>) -> Self {
        Self {
            store,
            discovery: ToolDiscovery::new(),
        }
    }

    /// Sends one user message through the configured provider and returns
    /// the canonical result.
    ///
    /// `cancel` aborts the in-flight completion; a token cancelled before
    /// the provider answers yields [`SendOutcome::Cancelled`].
    pub async fn send_message(&self, text: &str, cancel: &CancellationToken) -> SendOutcome {
        let config = self.store.load();

        let client = match resolver::resolve(&config) {
            Some(client) => client,
            None => {
                info!("send_message: no provider available, skipping network call");
                return SendOutcome::Completed(ChatResult::error(NO_PROVIDER_MESSAGE));
            }
        };

        // Tool discovery never blocks a send: no tools means the request
        // simply goes out without tool augmentation.
        let tools = self.discovery.list_tools(&config).await;
        info!(
            "send_message: provider={}, tools={}",
            client.name(),
            tools.len()
        );

        let request = CompletionRequest {
            message: text,
            tools: &tools,
        };

        let raw_text = tokio::select! {
            _ = cancel.cancelled() => {
                info!("send_message: cancelled before completion");
                return SendOutcome::Cancelled;
            }
            result = client.complete(request) => match result {
                Ok(text) => text,
                Err(e) => {
                    error!("Error sending message via {}: {e}", client.name());
                    return SendOutcome::Completed(ChatResult::error(format!("Error: {e}")));
                }
            },
        };

        SendOutcome::Completed(normalize(&raw_text))
    }

    /// Lists the tools currently available from the tool server.
    /// Never fails; independent of any in-flight send.
    pub async fn available_tools(&self) -> Vec<ToolDescriptor> {
        let config = self.store.load();
        self.discovery.list_tools(&config).await
    }

    /// Tears down the cached tool-server handle.
    pub fn shutdown(&mut self) {
        self.discovery.shutdown();
    }
}

//! # Core Gateway Logic
//!
//! Everything between the chat surface and the upstream services.
//!
//! ```text
//!                 ┌──────────────────────────────┐
//!                 │           GATEWAY            │
//!                 │   send_message / tools       │
//!                 └──────┬───────────┬───────────┘
//!                        │           │
//!          ┌─────────────▼──┐   ┌────▼────────────┐
//!          │    resolver    │   │  ToolDiscovery  │
//!          │ (inference::)  │   │     (mcp::)     │
//!          └─────────────┬──┘   └────┬────────────┘
//!                        │           │
//!                 ┌──────▼───────────▼───────────┐
//!                 │       ConfigStore (here)     │
//!                 └──────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`config`]: configuration snapshot, file store, validation
//! - [`gateway`]: the orchestrator — one call per user message
//! - [`response`]: canonical result + image reference extraction

pub mod config;
pub mod gateway;
pub mod response;

pub use config::{AiConfig, ConfigStore, FileConfigStore};
pub use gateway::{Gateway, SendOutcome};
pub use response::ChatResult;

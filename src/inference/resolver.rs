//! # Provider Resolver
//!
//! Picks exactly one upstream backend for a configuration snapshot.
//!
//! Strict priority, first match wins: Azure OpenAI (endpoint + key) beats
//! GitHub Models (token). A backend that fails to construct (malformed
//! endpoint) is logged and skipped, falling through to the next one —
//! "unavailable" is a normal `None` return, never an error.
//!
//! Every call re-resolves from the snapshot it is given. There is no
//! caching, no round-robin, no health check, and no retry here.

use log::{debug, error};

use crate::core::config::AiConfig;
use crate::inference::provider::ChatClient;
use crate::inference::providers::{AzureOpenAiClient, GitHubModelsClient};

/// Resolves a chat backend from the configuration snapshot.
///
/// Returns `None` when no provider is configured, or when every configured
/// provider failed to construct.
pub fn resolve(config: &AiConfig) -> Option<Box<dyn ChatClient>> {
    // Azure OpenAI has priority when fully configured.
    if config.has_azure_config() {
        match AzureOpenAiClient::new(
            &config.azure_openai_endpoint,
            &config.azure_openai_api_key,
            &config.model_name,
        ) {
            Ok(client) => {
                debug!("Resolved provider: azure-openai");
                return Some(Box::new(client));
            }
            Err(e) => {
                // Fall through to GitHub Models.
                error!("Error creating Azure OpenAI client: {e}");
            }
        }
    }

    // Fallback to GitHub Models.
    if config.has_github_config() {
        debug!("Resolved provider: github-models");
        return Some(Box::new(GitHubModelsClient::new(
            &config.github_models_token,
            &config.model_name,
            None,
        )));
    }

    None
}

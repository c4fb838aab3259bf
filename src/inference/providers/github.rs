//! GitHub Models chat-completions client.
//!
//! GitHub Models is served from a fixed, well-known inference endpoint and
//! authenticates with a bearer-style personal access token. The model is
//! selected by the `model` field in the request body.

use async_trait::async_trait;
use log::{debug, info, warn};

use crate::inference::{
    ChatClient, ChatCompletionRequest, ChatCompletionResponse, ChatMessage, CompletionRequest,
    ProviderError, tools_to_api,
};

/// The well-known GitHub Models inference endpoint.
pub const GITHUB_MODELS_ENDPOINT: &str = "https://models.inference.ai.azure.com";

/// GitHub Models backend. One instance per resolution; never cached.
pub struct GitHubModelsClient {
    token: String,
    model: String,
    base_url: String,
    client: reqwest::Client,
}

impl GitHubModelsClient {
    /// Creates a new GitHub Models client.
    ///
    /// # Arguments
    /// * `token` - GitHub personal access token with models access
    /// * `model` - model name sent in the request body
    /// * `base_url` - Optional custom base URL (defaults to the well-known endpoint)
    pub fn new(
        token: impl Into<String>,
        model: impl Into<String>,
        base_url: Option<String>,
    ) -> Self {
        Self {
            token: token.into(),
            model: model.into(),
            base_url: base_url.unwrap_or_else(|| GITHUB_MODELS_ENDPOINT.to_string()),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl ChatClient for GitHubModelsClient {
    fn name(&self) -> &str {
        "github-models"
    }

    async fn complete(&self, request: CompletionRequest<'_>) -> Result<String, ProviderError> {
        let body = ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage::user(request.message)],
            tools: tools_to_api(request.tools),
        };

        info!(
            "GitHub Models request: model={}, tools={}",
            self.model,
            request.tools.len()
        );

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.token))
            .json(&body)
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        debug!("GitHub Models response status: {}", response.status());

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let err_body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!("GitHub Models API error: {} - {}", status, err_body);
            return Err(ProviderError::Api {
                status,
                message: err_body,
            });
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::Parse(e.to_string()))?;

        let text = completion
            .choices
            .first()
            .and_then(|c| c.message.content.clone())
            .ok_or_else(|| ProviderError::Parse("completion had no message content".to_string()))?;

        Ok(text)
    }
}

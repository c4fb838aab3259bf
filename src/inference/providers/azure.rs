//! Azure OpenAI chat-completions client.
//!
//! Azure routes by deployment name rather than a `model` body field:
//! `{endpoint}/openai/deployments/{deployment}/chat/completions?api-version=...`
//! and authenticates with an `api-key` header instead of a bearer token.

use async_trait::async_trait;
use log::{debug, info, warn};
use url::Url;

use crate::inference::{
    ChatClient, ChatCompletionRequest, ChatCompletionResponse, ChatMessage, CompletionRequest,
    ProviderError, tools_to_api,
};

/// API version pinned to a stable chat-completions release.
const API_VERSION: &str = "2024-02-01";

/// Azure OpenAI backend. One instance per resolution; never cached.
pub struct AzureOpenAiClient {
    endpoint: Url,
    api_key: String,
    deployment: String,
    client: reqwest::Client,
}

impl AzureOpenAiClient {
    /// Creates a client against the given endpoint.
    ///
    /// Fails with `ProviderError::Config` if the endpoint is not an
    /// absolute URL — the resolver treats that as "provider unavailable".
    pub fn new(
        endpoint: &str,
        api_key: impl Into<String>,
        deployment: impl Into<String>,
    ) -> Result<Self, ProviderError> {
        let endpoint = Url::parse(endpoint)
            .map_err(|e| ProviderError::Config(format!("invalid Azure endpoint: {e}")))?;
        Ok(Self {
            endpoint,
            api_key: api_key.into(),
            deployment: deployment.into(),
            client: reqwest::Client::new(),
        })
    }

    fn completions_url(&self) -> String {
        format!(
            "{}openai/deployments/{}/chat/completions?api-version={}",
            self.endpoint, self.deployment, API_VERSION
        )
    }
}

#[async_trait]
impl ChatClient for AzureOpenAiClient {
    fn name(&self) -> &str {
        "azure-openai"
    }

    async fn complete(&self, request: CompletionRequest<'_>) -> Result<String, ProviderError> {
        let body = ChatCompletionRequest {
            model: self.deployment.clone(),
            messages: vec![ChatMessage::user(request.message)],
            tools: tools_to_api(request.tools),
        };

        info!(
            "Azure OpenAI request: deployment={}, tools={}",
            self.deployment,
            request.tools.len()
        );

        let response = self
            .client
            .post(self.completions_url())
            .header("api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        debug!("Azure OpenAI response status: {}", response.status());

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let err_body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!("Azure OpenAI API error: {} - {}", status, err_body);
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

pub mod provider;
pub mod providers;
pub mod resolver;
pub mod types;

pub use provider::{ChatClient, CompletionRequest, ProviderError};
pub use providers::{AzureOpenAiClient, GITHUB_MODELS_ENDPOINT, GitHubModelsClient};
pub use types::{
    ApiToolDefinition, ChatCompletionRequest, ChatCompletionResponse, ChatMessage, Role,
    ToolDescriptor, tools_to_api,
};

pub mod azure;
pub mod github;

pub use azure::AzureOpenAiClient;
pub use github::{GITHUB_MODELS_ENDPOINT, GitHubModelsClient};

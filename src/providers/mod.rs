mod anthropic;
mod factory;
mod fallback;
mod open_ai;
mod prompt;

pub use anthropic::AnthropicProvider;
pub use factory::ProviderFactory;
pub use fallback::FallbackProvider;
pub use open_ai::OpenAIProvider;
pub use prompt::{build_analysis_prompt, build_user_message, ANALYSIS_PROMPT};

use crate::images::EncodedImage;
use crate::ScanError;
use async_trait::async_trait;
use reqwest::Response;
use serde::de::DeserializeOwned;

/// Unified trait for all vision-capable LLM providers
#[async_trait]
pub trait VisionProvider: Send + Sync {
    /// Get the provider name (e.g., "openai", "anthropic")
    fn provider_name(&self) -> &str;

    /// Send the photo with the analysis prompt and return the model's text reply
    async fn analyze(&self, image: &EncodedImage, location: &str) -> Result<String, ScanError>;
}

/// Check the status and deserialize the body into the provider's response type.
async fn read_response<T: DeserializeOwned>(
    provider: &str,
    response: Response,
) -> Result<T, ScanError> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        return Err(ScanError::UpstreamError {
            provider: provider.to_string(),
            status: status.as_u16(),
            body,
        });
    }

    serde_json::from_str(&body).map_err(|e| ScanError::MalformedResponse {
        provider: provider.to_string(),
        reason: e.to_string(),
    })
}

fn non_empty_reply(reply: String) -> Result<String, ScanError> {
    if reply.trim().is_empty() {
        Err(ScanError::EmptyReply)
    } else {
        Ok(reply)
    }
}

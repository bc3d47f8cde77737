use crate::config::ProviderConfig;
use crate::images::EncodedImage;
use crate::providers::{
    build_analysis_prompt, build_user_message, non_empty_reply, read_response, VisionProvider,
};
use crate::ScanError;
use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";
const API_VERSION: &str = "2023-06-01";

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    text: Option<String>,
}

pub struct AnthropicProvider {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

impl AnthropicProvider {
    /// Provider for a `[providers.anthropic]` section
    pub fn new(config: &ProviderConfig, timeout: Duration) -> Result<Self, ScanError> {
        // An explicit key wins over the environment
        let api_key = config
            .api_key
            .clone()
            .or_else(|| std::env::var("ANTHROPIC_API_KEY").ok())
            .ok_or_else(|| ScanError::MissingApiKey("ANTHROPIC_API_KEY".to_string()))?;

        Ok(AnthropicProvider {
            client: Client::builder().timeout(timeout).build()?,
            api_key,
            base_url: config
                .base_url
                .clone()
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        })
    }

    #[doc(hidden)]
    pub fn with_base_url(api_key: String, base_url: String, model: String) -> Self {
        AnthropicProvider {
            client: Client::new(),
            api_key,
            base_url,
            model,
            temperature: 0.7,
            max_tokens: 1500,
        }
    }
}

#[async_trait]
impl VisionProvider for AnthropicProvider {
    fn provider_name(&self) -> &str {
        "anthropic"
    }

    async fn analyze(&self, image: &EncodedImage, location: &str) -> Result<String, ScanError> {
        debug!("Sending {} photo to Anthropic model {}", location, self.model);

        let response = self
            .client
            .post(format!("{}/v1/messages", self.base_url))
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .json(&json!({
                "model": self.model,
                "max_tokens": self.max_tokens,
                "temperature": self.temperature,
                "system": build_analysis_prompt(location),
                "messages": [
                    {
                        "role": "user",
                        "content": [
                            {
                                "type": "image",
                                "source": {
                                    "type": "base64",
                                    "media_type": image.media_type,
                                    "data": image.data
                                }
                            },
                            {"type": "text", "text": build_user_message(location)}
                        ]
                    }
                ]
            }))
            .send()
            .await?;

        let message: MessagesResponse = read_response(self.provider_name(), response).await?;
        debug!("{:?}", message);

        let texts: Vec<String> = message
            .content
            .into_iter()
            .filter(|block| block.kind == "text")
            .filter_map(|block| block.text)
            .collect();

        if texts.is_empty() {
            return Err(ScanError::MalformedResponse {
                provider: self.provider_name().to_string(),
                reason: "no text block in content".to_string(),
            });
        }

        non_empty_reply(texts.join("\n"))
    }
}

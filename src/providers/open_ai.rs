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

const DEFAULT_BASE_URL: &str = "https://api.openai.com";

#[derive(Debug, Deserialize)]
struct ChatCompletion {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

pub struct OpenAIProvider {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

impl OpenAIProvider {
    /// Provider for a `[providers.openai]` section
    pub fn new(config: &ProviderConfig, timeout: Duration) -> Result<Self, ScanError> {
        // An explicit key wins over the environment
        let api_key = config
            .api_key
            .clone()
            .or_else(|| std::env::var("OPENAI_API_KEY").ok())
            .ok_or_else(|| ScanError::MissingApiKey("OPENAI_API_KEY".to_string()))?;

        let base_url = config
            .base_url
            .clone()
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Ok(OpenAIProvider {
            client: Client::builder().timeout(timeout).build()?,
            api_key,
            base_url,
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        })
    }

    #[doc(hidden)]
    pub fn with_base_url(api_key: String, base_url: String, model: String) -> Self {
        OpenAIProvider {
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
impl VisionProvider for OpenAIProvider {
    fn provider_name(&self) -> &str {
        "openai"
    }

    async fn analyze(&self, image: &EncodedImage, location: &str) -> Result<String, ScanError> {
        debug!("Sending {} photo to OpenAI model {}", location, self.model);

        let response = self
            .client
            .post(format!("{}/v1/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&json!({
                "model": self.model,
                "messages": [
                    {"role": "system", "content": build_analysis_prompt(location)},
                    {"role": "user", "content": [
                        {"type": "text", "text": build_user_message(location)},
                        {"type": "image_url", "image_url": {"url": image.data_url()}}
                    ]}
                ],
                "temperature": self.temperature,
                "max_tokens": self.max_tokens
            }))
            .send()
            .await?;

        let completion: ChatCompletion = read_response(self.provider_name(), response).await?;
        debug!("{:?}", completion);

        let reply = completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| ScanError::MalformedResponse {
                provider: self.provider_name().to_string(),
                reason: "missing choices[0].message.content".to_string(),
            })?;

        non_empty_reply(reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};

    fn test_image() -> EncodedImage {
        EncodedImage {
            data: "aGVsbG8=".to_string(),
            media_type: "image/jpeg".to_string(),
        }
    }

    #[tokio::test]
    async fn test_analyze() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/chat/completions")
            .match_header("authorization", "Bearer fake_api_key")
            .match_body(Matcher::AllOf(vec![
                Matcher::PartialJson(json!({"model": "gpt-4o"})),
                Matcher::Regex("data:image/jpeg;base64,aGVsbG8=".to_string()),
                Matcher::Regex("analyzing fridge contents".to_string()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{
                    "choices": [{
                        "message": {
                            "content": "INGREDIENTS FOUND:\n• Milk\n\nRECIPES:\n• Hot Chocolate"
                        }
                    }]
                }"#,
            )
            .create_async()
            .await;

        let provider = OpenAIProvider::with_base_url(
            "fake_api_key".to_string(),
            server.url(),
            "gpt-4o".to_string(),
        );

        let reply = provider.analyze(&test_image(), "fridge").await.unwrap();
        assert!(reply.contains("INGREDIENTS FOUND:"));
        assert!(reply.contains("Hot Chocolate"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_analyze_api_error() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/chat/completions")
            .with_status(400)
            .with_header("content-type", "application/json")
            .with_body(r#"{"error": "Invalid request"}"#)
            .create_async()
            .await;

        let provider = OpenAIProvider::with_base_url(
            "fake_api_key".to_string(),
            server.url(),
            "gpt-4o".to_string(),
        );

        let result = provider.analyze(&test_image(), "fridge").await;
        match result {
            Err(ScanError::UpstreamError { status, body, .. }) => {
                assert_eq!(status, 400);
                assert!(body.contains("Invalid request"));
            }
            other => panic!("Expected upstream error, got {:?}", other),
        }
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_analyze_malformed_response() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/v1/chat/completions")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"choices": []}"#)
            .create_async()
            .await;

        let provider = OpenAIProvider::with_base_url(
            "fake_api_key".to_string(),
            server.url(),
            "gpt-4o".to_string(),
        );

        let result = provider.analyze(&test_image(), "fridge").await;
        assert!(matches!(result, Err(ScanError::MalformedResponse { .. })));
    }

    #[tokio::test]
    async fn test_analyze_empty_reply() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/v1/chat/completions")
            .with_status(200)
            .with_body(r#"{"choices": [{"message": {"content": "  "}}]}"#)
            .create_async()
            .await;

        let provider = OpenAIProvider::with_base_url(
            "fake_api_key".to_string(),
            server.url(),
            "gpt-4o".to_string(),
        );

        let result = provider.analyze(&test_image(), "fridge").await;
        assert!(matches!(result, Err(ScanError::EmptyReply)));
    }

    #[test]
    fn test_provider_name() {
        let provider = OpenAIProvider::with_base_url(
            "fake_api_key".to_string(),
            DEFAULT_BASE_URL.to_string(),
            "gpt-4o".to_string(),
        );
        assert_eq!(provider.provider_name(), "openai");
    }

    #[test]
    fn test_new_uses_config_key() {
        let mut config = ProviderConfig::for_model("gpt-4o");
        config.api_key = Some("config-key".to_string());
        let provider = OpenAIProvider::new(&config, Duration::from_secs(5)).unwrap();
        assert_eq!(provider.api_key, "config-key");
        assert_eq!(provider.base_url, DEFAULT_BASE_URL);
    }
}

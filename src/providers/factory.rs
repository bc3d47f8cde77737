use crate::config::{ProviderConfig, ScanConfig};
use crate::providers::{AnthropicProvider, OpenAIProvider, VisionProvider};
use crate::ScanError;
use std::time::Duration;

/// Maps provider names to [`VisionProvider`] implementations.
pub struct ProviderFactory;

impl ProviderFactory {
    /// Instantiate `provider_name` from its config section.
    pub fn create(
        provider_name: &str,
        config: &ProviderConfig,
        timeout: Duration,
    ) -> Result<Box<dyn VisionProvider>, ScanError> {
        if !config.enabled {
            return Err(ScanError::ProviderDisabled(provider_name.to_string()));
        }

        match provider_name {
            "openai" => Ok(Box::new(OpenAIProvider::new(config, timeout)?)),
            "anthropic" => Ok(Box::new(AnthropicProvider::new(config, timeout)?)),
            _ => Err(Self::unknown(provider_name)),
        }
    }

    /// The provider named by `default_provider`.
    ///
    /// A provider without a config section still works with its default
    /// model, as long as its API key is in the environment.
    pub fn get_default_provider(config: &ScanConfig) -> Result<Box<dyn VisionProvider>, ScanError> {
        let provider_name = &config.default_provider;
        let provider_config = Self::provider_config(config, provider_name)?;

        Self::create(
            provider_name,
            &provider_config,
            Duration::from_secs(config.timeout),
        )
    }

    /// The configured section for `provider_name`, or a default one.
    pub fn provider_config(
        config: &ScanConfig,
        provider_name: &str,
    ) -> Result<ProviderConfig, ScanError> {
        match config.providers.get(provider_name) {
            Some(provider_config) => Ok(provider_config.clone()),
            None => Self::default_model(provider_name)
                .map(ProviderConfig::for_model)
                .ok_or_else(|| Self::unknown(provider_name)),
        }
    }

    /// Vision-capable model used when none is configured
    pub fn default_model(provider_name: &str) -> Option<&'static str> {
        match provider_name {
            "openai" => Some("gpt-4o"),
            "anthropic" => Some("claude-sonnet-4-5"),
            _ => None,
        }
    }

    /// Names accepted by [`ProviderFactory::create`]
    pub fn available_providers() -> Vec<&'static str> {
        vec!["openai", "anthropic"]
    }

    fn unknown(provider_name: &str) -> ScanError {
        ScanError::UnknownProvider(format!(
            "{} (expected one of: {})",
            provider_name,
            Self::available_providers().join(", ")
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn keyed_section() -> ProviderConfig {
        let mut config = ProviderConfig::for_model("test-model");
        config.api_key = Some("test-key".to_string());
        config
    }

    fn timeout() -> Duration {
        Duration::from_secs(5)
    }

    #[test]
    fn test_create_openai_provider() {
        let config = keyed_section();
        let provider = ProviderFactory::create("openai", &config, timeout()).unwrap();
        assert_eq!(provider.provider_name(), "openai");
    }

    #[test]
    fn test_create_anthropic_provider() {
        let config = keyed_section();
        let provider = ProviderFactory::create("anthropic", &config, timeout()).unwrap();
        assert_eq!(provider.provider_name(), "anthropic");
    }

    #[test]
    fn test_create_unknown_provider() {
        let config = keyed_section();
        let result = ProviderFactory::create("unknown", &config, timeout());
        assert!(matches!(result, Err(ScanError::UnknownProvider(_))));
    }

    #[test]
    fn test_create_disabled_provider() {
        let mut config = keyed_section();
        config.enabled = false;

        let result = ProviderFactory::create("openai", &config, timeout());
        match result {
            Err(e) => assert!(e.to_string().contains("not enabled in configuration")),
            Ok(_) => panic!("Expected disabled provider error"),
        }
    }

    #[test]
    fn test_get_default_provider() {
        let mut providers = HashMap::new();
        providers.insert("anthropic".to_string(), keyed_section());

        let scan_config = ScanConfig {
            default_provider: "anthropic".to_string(),
            providers,
            ..Default::default()
        };

        let provider = ProviderFactory::get_default_provider(&scan_config).unwrap();
        assert_eq!(provider.provider_name(), "anthropic");
    }

    #[test]
    fn test_provider_config_defaults_when_missing() {
        let scan_config = ScanConfig::default();

        let config = ProviderFactory::provider_config(&scan_config, "openai").unwrap();
        assert_eq!(config.model, "gpt-4o");
        assert!(config.enabled);

        match ProviderFactory::provider_config(&scan_config, "mistral") {
            Err(ScanError::UnknownProvider(message)) => {
                assert_eq!(message, "mistral (expected one of: openai, anthropic)");
            }
            other => panic!("Expected unknown provider error, got {:?}", other),
        }
    }

    #[test]
    fn test_available_providers() {
        let providers = ProviderFactory::available_providers();
        assert_eq!(providers.len(), 2);
        for name in providers {
            assert!(ProviderFactory::default_model(name).is_some());
        }
    }
}

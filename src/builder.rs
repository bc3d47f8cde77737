use log::{info, warn};
use serde::Serialize;
use std::path::PathBuf;
use std::time::Duration;

use crate::config::ScanConfig;
use crate::images::ImageSource;
use crate::parser::{parse_ai_response, ParsedResponse};
use crate::providers::{FallbackProvider, ProviderFactory, VisionProvider};
use crate::ScanError;

/// Represents the input source for a scan
#[derive(Debug, Clone)]
enum InputSource {
    /// Photo that still has to be sent to a vision model
    Image(ImageSource),
    /// A model reply obtained elsewhere; only parsed
    Reply(String),
}

/// Vision provider to use instead of the configured default
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    OpenAI,
    Anthropic,
}

impl Provider {
    /// Provider name string used by the factory
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::OpenAI => "openai",
            Provider::Anthropic => "anthropic",
        }
    }
}

/// Result of a scan: the model's raw text and its parsed form
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanResult {
    pub raw_reply: String,
    pub parsed: ParsedResponse,
}

/// Builder for configuring and executing a fridge scan
#[derive(Debug, Default)]
pub struct FridgeScannerBuilder {
    source: Option<InputSource>,
    config: Option<ScanConfig>,
    location: Option<String>,
    provider: Option<Provider>,
    api_key: Option<String>,
    model: Option<String>,
    base_url: Option<String>,
    timeout: Option<Duration>,
}

impl FridgeScannerBuilder {
    /// Analyse the photo at `path`
    ///
    /// # Example
    /// ```
    /// use fridge_scan::FridgeScanner;
    ///
    /// let builder = FridgeScanner::builder().image("/path/to/fridge.jpg");
    /// ```
    pub fn image(mut self, path: impl Into<PathBuf>) -> Self {
        self.source = Some(InputSource::Image(ImageSource::Path(path.into())));
        self
    }

    /// Analyse a base64-encoded photo (a `data:` URL is accepted too)
    pub fn image_base64(mut self, data: impl Into<String>) -> Self {
        self.source = Some(InputSource::Image(ImageSource::Base64(data.into())));
        self
    }

    /// Analyse raw image bytes, e.g. straight from a camera buffer
    pub fn image_bytes(mut self, bytes: Vec<u8>) -> Self {
        self.source = Some(InputSource::Image(ImageSource::Bytes(bytes)));
        self
    }

    /// Skip the vision call and parse a reply that was already obtained
    ///
    /// # Example
    /// ```
    /// # use fridge_scan::FridgeScanner;
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), fridge_scan::ScanError> {
    /// let result = FridgeScanner::builder()
    ///     .reply("INGREDIENTS FOUND:\n• Eggs\n\nRECIPES:\n• Scrambled Eggs")
    ///     .build()
    ///     .await?;
    /// assert_eq!(result.parsed.recipes, vec!["Scrambled Eggs"]);
    /// # Ok(())
    /// # }
    /// ```
    pub fn reply(mut self, text: impl Into<String>) -> Self {
        self.source = Some(InputSource::Reply(text.into()));
        self
    }

    /// Use this configuration instead of loading `config.toml` and the environment
    pub fn config(mut self, config: ScanConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Where the photo was taken ("fridge", "pantry", ...)
    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Use a specific provider instead of the configured default or fallback chain
    ///
    /// # Example
    /// ```
    /// use fridge_scan::{FridgeScanner, Provider};
    ///
    /// let builder = FridgeScanner::builder()
    ///     .image("/path/to/fridge.jpg")
    ///     .provider(Provider::Anthropic);
    /// ```
    pub fn provider(mut self, provider: Provider) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Set the API key for the provider
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the model name for the provider
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Send requests to a custom or proxy endpoint
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set a timeout for provider requests
    pub fn timeout(mut self, duration: Duration) -> Self {
        self.timeout = Some(duration);
        self
    }

    /// Build and execute the scan
    ///
    /// # Errors
    /// Returns `ScanError` if:
    /// - No input source was specified
    /// - The image cannot be read
    /// - No provider can be set up or every provider fails
    /// - The model returns an empty or malformed reply
    pub async fn build(self) -> Result<ScanResult, ScanError> {
        let source = self.source.clone().ok_or_else(|| {
            ScanError::BuilderError(
                "No input source specified. Use .image(), .image_base64() or .reply()"
                    .to_string(),
            )
        })?;

        let image = match source {
            InputSource::Reply(text) => {
                let parsed = parse_ai_response(&text);
                return Ok(ScanResult {
                    raw_reply: text,
                    parsed,
                });
            }
            InputSource::Image(image) => image,
        };

        let config = match self.config.clone() {
            Some(config) => config,
            None => ScanConfig::load()?,
        };
        let location = self
            .location
            .clone()
            .unwrap_or_else(|| config.location.clone());

        let encoded = image.encode().await?;
        let provider = self.resolve_provider(&config)?;
        info!(
            "Analyzing {} photo with {}",
            location,
            provider.provider_name()
        );

        let raw_reply = provider.analyze(&encoded, &location).await?;
        let parsed = parse_ai_response(&raw_reply);
        if parsed.is_empty() {
            warn!("No ingredients or recipes recognised in the {} reply", location);
        }

        Ok(ScanResult { raw_reply, parsed })
    }

    /// Explicit provider options win over the configured fallback chain
    fn resolve_provider(&self, config: &ScanConfig) -> Result<Box<dyn VisionProvider>, ScanError> {
        let overridden = self.provider.is_some()
            || self.api_key.is_some()
            || self.model.is_some()
            || self.base_url.is_some()
            || self.timeout.is_some();

        if !overridden {
            return Ok(Box::new(FallbackProvider::new(config)?));
        }

        let name = self
            .provider
            .map_or(config.default_provider.as_str(), |provider| provider.as_str());
        let mut provider_config = ProviderFactory::provider_config(config, name)?;

        if let Some(api_key) = &self.api_key {
            provider_config.api_key = Some(api_key.clone());
        }
        if let Some(model) = &self.model {
            provider_config.model = model.clone();
        }
        if let Some(base_url) = &self.base_url {
            provider_config.base_url = Some(base_url.clone());
        }

        let timeout = self
            .timeout
            .unwrap_or_else(|| Duration::from_secs(config.timeout));

        ProviderFactory::create(name, &provider_config, timeout)
    }
}

/// Main entry point for the builder API
pub struct FridgeScanner;

impl FridgeScanner {
    /// Creates a new builder for scanning a photo
    ///
    /// # Example
    /// ```
    /// use fridge_scan::FridgeScanner;
    ///
    /// let builder = FridgeScanner::builder();
    /// ```
    pub fn builder() -> FridgeScannerBuilder {
        FridgeScannerBuilder::default()
    }
}

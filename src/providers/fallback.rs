use crate::config::ScanConfig;
use crate::images::EncodedImage;
use crate::providers::{ProviderFactory, VisionProvider};
use crate::ScanError;
use async_trait::async_trait;
use log::{debug, info, warn};
use std::time::Duration;
use tokio::time::sleep;

/// Tries each provider in turn, retrying a failing one before moving on.
pub struct FallbackProvider {
    providers: Vec<Box<dyn VisionProvider>>,
    retry_attempts: u32,
    retry_delay_ms: u64,
}

impl FallbackProvider {
    /// Chain built from `config.fallback.order`. Names without an enabled
    /// section, or whose provider cannot be set up, are skipped with a warning.
    ///
    /// With fallback off the chain is just the default provider, tried once.
    pub fn new(config: &ScanConfig) -> Result<Self, ScanError> {
        if !config.fallback.enabled {
            let provider = ProviderFactory::get_default_provider(config)?;
            return Ok(Self::with_providers(vec![provider], 1, 0));
        }

        let timeout = Duration::from_secs(config.timeout);
        let providers: Vec<Box<dyn VisionProvider>> = config
            .fallback
            .order
            .iter()
            .filter_map(|name| {
                let Some(section) = config.providers.get(name) else {
                    warn!("Fallback entry '{}' has no [providers.{}] section", name, name);
                    return None;
                };
                if !section.enabled {
                    debug!("Skipping disabled provider '{}'", name);
                    return None;
                }
                ProviderFactory::create(name, section, timeout)
                    .inspect(|_| info!("Fallback chain: added '{}'", name))
                    .map_err(|e| warn!("Cannot set up provider '{}': {}", name, e))
                    .ok()
            })
            .collect();

        if providers.is_empty() {
            return Err(ScanError::AllProvidersFailed(
                "No providers available in fallback configuration".to_string(),
            ));
        }

        Ok(Self::with_providers(
            providers,
            config.fallback.retry_attempts,
            config.fallback.retry_delay_ms,
        ))
    }

    /// Build a chain from already constructed providers, tried in order
    pub fn with_providers(
        providers: Vec<Box<dyn VisionProvider>>,
        retry_attempts: u32,
        retry_delay_ms: u64,
    ) -> Self {
        FallbackProvider {
            providers,
            retry_attempts: retry_attempts.max(1),
            retry_delay_ms,
        }
    }

    /// Pause after failed attempt `attempt`, capped at `u64::MAX` milliseconds
    fn backoff(&self, attempt: u32) -> Duration {
        Duration::from_millis(self.retry_delay_ms.saturating_mul(u64::from(attempt)))
    }

    /// Up to `retry_attempts` calls with a linearly growing pause between them.
    async fn analyze_with_retry(
        &self,
        provider: &dyn VisionProvider,
        image: &EncodedImage,
        location: &str,
    ) -> Result<String, ScanError> {
        let name = provider.provider_name();
        let mut attempt = 1;

        loop {
            debug!("{}: attempt {} of {}", name, attempt, self.retry_attempts);

            match provider.analyze(image, location).await {
                Ok(reply) => {
                    info!("Photo analyzed by {}", name);
                    return Ok(reply);
                }
                Err(e) if attempt >= self.retry_attempts => return Err(e),
                Err(e) => {
                    let pause = self.backoff(attempt);
                    warn!("{} failed ({}), retrying in {:?}", name, e, pause);
                    sleep(pause).await;
                    attempt += 1;
                }
            }
        }
    }
}

#[async_trait]
impl VisionProvider for FallbackProvider {
    fn provider_name(&self) -> &str {
        "fallback"
    }

    async fn analyze(&self, image: &EncodedImage, location: &str) -> Result<String, ScanError> {
        // A lone provider keeps its own error type
        if let [provider] = self.providers.as_slice() {
            return self
                .analyze_with_retry(provider.as_ref(), image, location)
                .await;
        }

        let mut failures = Vec::with_capacity(self.providers.len());

        for provider in &self.providers {
            match self
                .analyze_with_retry(provider.as_ref(), image, location)
                .await
            {
                Ok(reply) => return Ok(reply),
                Err(e) => failures.push(format!("{}: {}", provider.provider_name(), e)),
            }
        }

        Err(ScanError::AllProvidersFailed(failures.join("\n")))
    }
}

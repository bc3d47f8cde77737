use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::collections::HashMap;

const ENV_PREFIX: &str = "FRIDGE_SCAN";
const DEFAULT_TEMPERATURE: f32 = 0.7;
const DEFAULT_MAX_TOKENS: u32 = 1500;

/// Settings for a scan, read from `config.toml` and `FRIDGE_SCAN__*` variables.
///
/// ```toml
/// default_provider = "anthropic"
/// location = "pantry"
///
/// [providers.anthropic]
/// model = "claude-sonnet-4-5"
///
/// [fallback]
/// enabled = true
/// order = ["anthropic", "openai"]
/// ```
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ScanConfig {
    /// Provider used when the fallback chain is off
    pub default_provider: String,
    /// Per-provider sections, keyed by provider name
    pub providers: HashMap<String, ProviderConfig>,
    pub fallback: FallbackConfig,
    /// Woven into the analysis prompt ("fridge", "pantry", ...)
    pub location: String,
    /// Seconds before a provider request is abandoned
    pub timeout: u64,
}

impl Default for ScanConfig {
    fn default() -> Self {
        ScanConfig {
            default_provider: "openai".to_string(),
            providers: HashMap::new(),
            fallback: FallbackConfig::default(),
            location: "fridge".to_string(),
            timeout: 60,
        }
    }
}

/// One `[providers.<name>]` section. Only `model` is mandatory.
#[derive(Debug, Deserialize, Clone)]
pub struct ProviderConfig {
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
    /// A vision-capable model, e.g. "gpt-4o"
    pub model: String,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Upper bound on the reply length
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// Falls back to the provider's usual environment variable when unset
    pub api_key: Option<String>,
    /// Proxy or self-hosted endpoint replacing the public API host
    pub base_url: Option<String>,
}

impl ProviderConfig {
    /// Enabled section for `model` with every other field at its default.
    pub fn for_model(model: impl Into<String>) -> Self {
        ProviderConfig {
            enabled: enabled_by_default(),
            model: model.into(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
            api_key: None,
            base_url: None,
        }
    }
}

/// Which providers to try, in what order, and how hard to retry each one.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct FallbackConfig {
    pub enabled: bool,
    /// Provider names, first tried first
    pub order: Vec<String>,
    /// Attempts per provider before moving down the chain
    pub retry_attempts: u32,
    /// Wait before retry `n` is `n * retry_delay_ms`
    pub retry_delay_ms: u64,
}

impl Default for FallbackConfig {
    fn default() -> Self {
        FallbackConfig {
            enabled: false,
            order: Vec::new(),
            retry_attempts: 3,
            retry_delay_ms: 1000,
        }
    }
}

fn enabled_by_default() -> bool {
    true
}

fn default_temperature() -> f32 {
    DEFAULT_TEMPERATURE
}

fn default_max_tokens() -> u32 {
    DEFAULT_MAX_TOKENS
}

impl ScanConfig {
    /// Shorthand for [`load_config`].
    pub fn load() -> Result<Self, ConfigError> {
        load_config()
    }
}

/// Merge, lowest precedence first: built-in defaults, an optional `config.toml`
/// in the working directory, then environment variables.
///
/// Nesting in variable names uses `__`, so the OpenAI key can be given as
/// `FRIDGE_SCAN__PROVIDERS__OPENAI__API_KEY`.
pub fn load_config() -> Result<ScanConfig, ConfigError> {
    Config::builder()
        .add_source(File::with_name("config").required(false))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?
        .try_deserialize()
}

use thiserror::Error;

/// Errors that can occur while analysing a fridge photo
///
/// Parsing a model reply never fails; these only come from the
/// vision-provider layer, configuration and the scan builder.
#[derive(Error, Debug)]
pub enum ScanError {
    /// HTTP request to the provider failed
    #[error("Request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    /// Provider answered with a non-success status
    #[error("{provider} returned {status}: {body}")]
    UpstreamError {
        provider: String,
        status: u16,
        body: String,
    },

    /// Provider answered 2xx but the payload did not have the expected shape
    #[error("Malformed response from {provider}: {reason}")]
    MalformedResponse { provider: String, reason: String },

    /// The model answered with an empty message
    #[error("The model returned an empty reply")]
    EmptyReply,

    /// Failed to read an image from disk
    #[error("Failed to read image: {0}")]
    ImageError(#[from] std::io::Error),

    /// No API key in config or environment
    #[error("{0} not found in config or environment")]
    MissingApiKey(String),

    /// Provider name is not one we know about
    #[error("Unknown provider: {0}")]
    UnknownProvider(String),

    /// Provider is configured but switched off
    #[error("Provider '{0}' is not enabled in configuration")]
    ProviderDisabled(String),

    /// Every provider in the fallback chain failed
    #[error("All providers failed:\n{0}")]
    AllProvidersFailed(String),

    /// Builder configuration error
    #[error("Builder error: {0}")]
    BuilderError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),
}

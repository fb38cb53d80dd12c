//! Error types for the verb trainer.

/// Top-level error type.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Mail error: {0}")]
    Channel(#[from] ChannelError),

    #[error("Evaluator error: {0}")]
    Llm(#[from] LlmError),

    #[error("State error: {0}")]
    State(#[from] StateError),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Mail transport errors.
#[derive(Debug, thiserror::Error)]
pub enum ChannelError {
    #[error("Failed to fetch from {name}: {reason}")]
    FetchFailed { name: String, reason: String },

    #[error("Failed to send via {name}: {reason}")]
    SendFailed { name: String, reason: String },

    #[error("Authentication failed for {name}: {reason}")]
    AuthFailed { name: String, reason: String },
}

/// Evaluator (LLM) errors.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("Provider {provider} request failed: {reason}")]
    RequestFailed { provider: String, reason: String },

    #[error("Invalid response from {provider}: {reason}")]
    InvalidResponse { provider: String, reason: String },
}

/// Exercise state persistence errors.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for the trainer.
pub type Result<T> = std::result::Result<T, Error>;

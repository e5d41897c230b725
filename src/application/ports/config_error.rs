/// Configuration problems fail fast, before any network call is attempted,
/// and are never retried.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing API key: set the {env} environment variable")]
    MissingApiKey { env: String },
    #[error("unknown provider in model '{model}'. Known providers: {known}")]
    UnknownProvider { model: String, known: String },
    #[error("failed to load config from {path}: {reason}")]
    ConfigFile { path: String, reason: String },
}

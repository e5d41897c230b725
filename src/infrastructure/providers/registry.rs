use crate::application::ports::ConfigError;

/// Static dispatch data for one provider: where to send requests and which
/// environment variable carries the credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProviderConfig {
    pub name: &'static str,
    pub base_url: &'static str,
    pub api_key_env: &'static str,
}

pub const PROVIDERS: &[ProviderConfig] = &[
    ProviderConfig {
        name: "groq",
        base_url: "https://api.groq.com/openai/v1",
        api_key_env: "GROQ_API_KEY",
    },
    ProviderConfig {
        name: "openai",
        base_url: "https://api.openai.com/v1",
        api_key_env: "OPENAI_API_KEY",
    },
    ProviderConfig {
        name: "sarvam",
        base_url: "https://api.sarvam.ai",
        api_key_env: "SARVAM_API_KEY",
    },
];

/// Split `"groq/whisper-large-v3-turbo"` into its provider entry and the bare
/// model name. An unknown prefix is a hard error enumerating known providers.
pub fn parse_model(model: &str) -> Result<(&'static ProviderConfig, &str), ConfigError> {
    let Some((prefix, model_name)) = model.split_once('/') else {
        return Err(unknown_provider(model));
    };
    PROVIDERS
        .iter()
        .find(|p| p.name == prefix)
        .map(|p| (p, model_name))
        .ok_or_else(|| unknown_provider(model))
}

fn unknown_provider(model: &str) -> ConfigError {
    let known = PROVIDERS
        .iter()
        .map(|p| p.name)
        .collect::<Vec<_>>()
        .join(", ");
    ConfigError::UnknownProvider {
        model: model.to_string(),
        known,
    }
}

/// Read a credential from the environment; unset and empty both fail.
pub fn require_api_key(env: &str) -> Result<String, ConfigError> {
    match std::env::var(env) {
        Ok(value) if !value.is_empty() => Ok(value),
        _ => Err(ConfigError::MissingApiKey {
            env: env.to_string(),
        }),
    }
}

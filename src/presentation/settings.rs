use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::application::ports::ConfigError;

pub const DEFAULT_TARGET_LANGUAGE: &str = "en";
pub const DEFAULT_CONCURRENCY: usize = 5;
pub const DEFAULT_JOB_TIMEOUT_SECS: u64 = 1800;
pub const DEFAULT_TRANSCRIPTION_MODEL: &str = "groq/whisper-large-v3-turbo";
pub const DEFAULT_TRANSLATION_MODEL: &str = "groq/llama-3.3-70b-versatile";
pub const DEFAULT_REGIONAL_TRANSCRIPTION_MODEL: &str = "sarvam/saarika:v2.5";
pub const DEFAULT_REGIONAL_TRANSLATION_MODEL: &str = "sarvam/mayura:v1";

/// Fully resolved defaults for the pipeline. The core never reads these
/// implicitly; call sites pass the resolved values down.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub target_language: String,
    pub concurrency: usize,
    pub job_timeout_secs: u64,
    pub transcription_model: String,
    pub translation_model: String,
    pub regional_transcription_model: String,
    pub regional_translation_model: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            target_language: DEFAULT_TARGET_LANGUAGE.to_string(),
            concurrency: DEFAULT_CONCURRENCY,
            job_timeout_secs: DEFAULT_JOB_TIMEOUT_SECS,
            transcription_model: DEFAULT_TRANSCRIPTION_MODEL.to_string(),
            translation_model: DEFAULT_TRANSLATION_MODEL.to_string(),
            regional_transcription_model: DEFAULT_REGIONAL_TRANSCRIPTION_MODEL.to_string(),
            regional_translation_model: DEFAULT_REGIONAL_TRANSLATION_MODEL.to_string(),
        }
    }
}

impl Settings {
    /// Load from `~/.polyscribe/config.toml`, falling back to defaults when
    /// the file is absent. A file that exists but does not parse is an error.
    pub fn load() -> Result<Self, ConfigError> {
        match config_file_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::ConfigFile {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        let file: ConfigFile = toml::from_str(&raw).map_err(|e| ConfigError::ConfigFile {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        let defaults = Self::default();
        Ok(Self {
            target_language: file
                .defaults
                .target_language
                .unwrap_or(defaults.target_language),
            concurrency: file.defaults.concurrency.unwrap_or(defaults.concurrency),
            job_timeout_secs: file
                .defaults
                .job_timeout
                .unwrap_or(defaults.job_timeout_secs),
            transcription_model: file
                .models
                .transcription
                .unwrap_or(defaults.transcription_model),
            translation_model: file
                .models
                .translation
                .unwrap_or(defaults.translation_model),
            regional_transcription_model: file
                .models
                .regional_transcription
                .unwrap_or(defaults.regional_transcription_model),
            regional_translation_model: file
                .models
                .regional_translation
                .unwrap_or(defaults.regional_translation_model),
        })
    }
}

fn config_file_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".polyscribe").join("config.toml"))
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    defaults: DefaultsSection,
    models: ModelsSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct DefaultsSection {
    target_language: Option<String>,
    concurrency: Option<usize>,
    job_timeout: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ModelsSection {
    transcription: Option<String>,
    translation: Option<String>,
    regional_transcription: Option<String>,
    regional_translation: Option<String>,
}

use audia_core::builtin::GENERIC_ASSISTANT;
use audia_core::prompt::DEFAULT_LANGUAGE;
use std::path::PathBuf;
use tracing::Level;

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    /// Language the assistant speaks; rendered into persona prompts.
    pub language: String,
    /// Persona that is active when a session starts.
    pub initial_persona: String,
    pub log_level: Level,
    /// Optional directory of `<PersonaName>.md` prompt overrides.
    pub prompts_path: Option<PathBuf>,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Only load from .env in non-test mode to avoid contamination
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }

        let language = non_blank_var("ASSISTANT_LANGUAGE", DEFAULT_LANGUAGE)?;
        let initial_persona = non_blank_var("INITIAL_PERSONA", GENERIC_ASSISTANT)?;

        let log_level_str = std::env::var("RUST_LOG").unwrap_or_else(|_| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        let prompts_path = std::env::var("PROMPTS_PATH").ok().map(PathBuf::from);

        Ok(Self {
            language,
            initial_persona,
            log_level,
            prompts_path,
        })
    }

    /// Applies a `--language` flag on top of the environment, under the same
    /// non-blank rule as `ASSISTANT_LANGUAGE`.
    pub fn override_language(&mut self, language: Option<&str>) -> Result<(), ConfigError> {
        if let Some(language) = language {
            self.language = non_blank("--language", language)?;
        }
        Ok(())
    }
}

fn non_blank_var(name: &str, default: &str) -> Result<String, ConfigError> {
    match std::env::var(name) {
        Ok(value) => non_blank(name, &value),
        Err(_) => Ok(default.to_string()),
    }
}

fn non_blank(name: &str, value: &str) -> Result<String, ConfigError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ConfigError::InvalidValue(
            name.to_string(),
            "must not be blank".to_string(),
        ));
    }
    Ok(value.to_string())
}

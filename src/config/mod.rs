//! Configuration system (layered: defaults < TOML file < env < explicit setters).

pub mod credential;

pub use credential::{
    ChainedCredential, CredentialSupplier, EnvCredential, PropertiesFileCredential,
    StaticCredential, DEFAULT_CREDENTIAL_KEY,
};

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::error::{RecetteError, Result};
use crate::models::ChatModel;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_TEMPERATURE: f64 = 0.7;
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;
pub const DEFAULT_IMAGE_BASE_URL: &str = "https://source.unsplash.com";
pub const DEFAULT_IMAGE_WIDTH: u32 = 600;
pub const DEFAULT_IMAGE_HEIGHT: u32 = 400;

/// File name looked up in the user config directory.
pub const CONFIG_FILE_NAME: &str = "recette.toml";

const ENV_MODEL: &str = "RECETTE_MODEL";
const ENV_TEMPERATURE: &str = "RECETTE_TEMPERATURE";
const ENV_BASE_URL: &str = "OPENAI_BASE_URL";
const ENV_TIMEOUT: &str = "RECETTE_TIMEOUT_SECS";
const ENV_IMAGE_BASE_URL: &str = "RECETTE_IMAGE_BASE_URL";

/// What to do when the service returns an empty recipe body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyContentPolicy {
    /// An empty body is still a recipe.
    #[default]
    Accept,
    /// An empty body is a malformed response.
    Reject,
}

/// Where the representative image comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageSettings {
    pub base_url: String,
    pub width: u32,
    pub height: u32,
}

impl Default for ImageSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_IMAGE_BASE_URL.to_string(),
            width: DEFAULT_IMAGE_WIDTH,
            height: DEFAULT_IMAGE_HEIGHT,
        }
    }
}

/// Settings that shape each generation request.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationSettings {
    pub model: ChatModel,
    pub temperature: f64,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            model: ChatModel::default(),
            temperature: DEFAULT_TEMPERATURE,
        }
    }
}

/// Layered configuration for recette.
#[derive(Debug, Clone, PartialEq)]
pub struct RecipeConfig {
    pub generation: GenerationSettings,
    pub base_url: String,
    pub timeout: Duration,
    pub empty_content: EmptyContentPolicy,
    pub image: ImageSettings,
}

impl Default for RecipeConfig {
    fn default() -> Self {
        Self {
            generation: GenerationSettings::default(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            empty_content: EmptyContentPolicy::default(),
            image: ImageSettings::default(),
        }
    }
}

/// On-disk shape of `recette.toml`. Every field is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    model: Option<String>,
    temperature: Option<f64>,
    base_url: Option<String>,
    timeout_secs: Option<u64>,
    empty_content: Option<EmptyContentPolicy>,
    #[serde(default)]
    image: ImageFile,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ImageFile {
    base_url: Option<String>,
    width: Option<u32>,
    height: Option<u32>,
}

impl RecipeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Default config file location (`<config dir>/recette/recette.toml`).
    pub fn default_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "recette")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    /// Load defaults, then the file at `path` (if given, or the default path
    /// if it exists), then environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let _ = dotenvy::dotenv(); // load .env if present, ignore error
        let mut config = Self::new();

        match path {
            Some(path) => config.merge_file(path)?,
            None => {
                if let Some(default) = Self::default_path().filter(|p| p.exists()) {
                    config.merge_file(&default)?;
                }
            }
        }

        config.merge_env()?;
        config.validate()?;
        Ok(config)
    }

    /// Defaults plus environment overrides only.
    pub fn from_env() -> Result<Self> {
        let _ = dotenvy::dotenv();
        let mut config = Self::new();
        config.merge_env()?;
        config.validate()?;
        Ok(config)
    }

    /// Parse TOML text and apply it on top of the current values.
    pub fn merge_toml(&mut self, raw: &str) -> Result<()> {
        let file: ConfigFile = toml::from_str(raw)
            .map_err(|e| RecetteError::Configuration(format!("invalid config: {e}")))?;

        if let Some(model) = file.model {
            self.set_model(&model)?;
        }
        if let Some(t) = file.temperature {
            self.generation.temperature = t;
        }
        if let Some(url) = file.base_url {
            self.base_url = url;
        }
        if let Some(secs) = file.timeout_secs {
            self.timeout = Duration::from_secs(secs);
        }
        if let Some(policy) = file.empty_content {
            self.empty_content = policy;
        }
        if let Some(url) = file.image.base_url {
            self.image.base_url = url;
        }
        if let Some(w) = file.image.width {
            self.image.width = w;
        }
        if let Some(h) = file.image.height {
            self.image.height = h;
        }
        Ok(())
    }

    fn merge_file(&mut self, path: &Path) -> Result<()> {
        let raw = fs::read_to_string(path).map_err(|e| {
            RecetteError::Configuration(format!("cannot read {}: {e}", path.display()))
        })?;
        tracing::debug!(path = %path.display(), "loading config file");
        self.merge_toml(&raw)
    }

    fn merge_env(&mut self) -> Result<()> {
        if let Ok(model) = std::env::var(ENV_MODEL) {
            self.set_model(&model)?;
        }
        if let Ok(raw) = std::env::var(ENV_TEMPERATURE) {
            self.generation.temperature = raw.trim().parse().map_err(|_| {
                RecetteError::Configuration(format!("{ENV_TEMPERATURE} is not a number: {raw}"))
            })?;
        }
        if let Ok(url) = std::env::var(ENV_BASE_URL) {
            self.base_url = url;
        }
        if let Ok(raw) = std::env::var(ENV_TIMEOUT) {
            let secs: u64 = raw.trim().parse().map_err(|_| {
                RecetteError::Configuration(format!("{ENV_TIMEOUT} is not a whole number: {raw}"))
            })?;
            self.timeout = Duration::from_secs(secs);
        }
        if let Ok(url) = std::env::var(ENV_IMAGE_BASE_URL) {
            self.image.base_url = url;
        }
        Ok(())
    }

    pub fn set_model(&mut self, model: &str) -> Result<()> {
        let model = model.trim();
        if model.is_empty() {
            return Err(RecetteError::Configuration("model id is empty".into()));
        }
        // ChatModel parsing is infallible; unknown ids become Custom.
        self.generation.model = model
            .parse()
            .unwrap_or_else(|_| ChatModel::Custom(model.to_string()));
        if !self.generation.model.is_recognized() {
            tracing::warn!(model, "model id is not one of the recognized options");
        }
        Ok(())
    }

    pub fn set_temperature(&mut self, temperature: f64) -> Result<()> {
        self.generation.temperature = temperature;
        self.validate()
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<()> {
        let t = self.generation.temperature;
        if !(0.0..=2.0).contains(&t) {
            return Err(RecetteError::Configuration(format!(
                "temperature must be within 0.0..=2.0, got {t}"
            )));
        }
        if self.base_url.trim().is_empty() {
            return Err(RecetteError::Configuration("base_url is empty".into()));
        }
        if self.timeout.is_zero() {
            return Err(RecetteError::Configuration("timeout must be positive".into()));
        }
        if self.image.width == 0 || self.image.height == 0 {
            return Err(RecetteError::Configuration(
                "image width and height must be positive".into(),
            ));
        }
        Ok(())
    }
}

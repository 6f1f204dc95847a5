//! Tests for configuration loading and credential suppliers.

use std::sync::{Mutex, OnceLock};
use std::time::Duration;

use recette::config::{
    ChainedCredential, CredentialSupplier, EnvCredential, PropertiesFileCredential, RecipeConfig,
};
use recette::error::RecetteError;
use recette::models::ChatModel;
use tempfile::TempDir;

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

const CONFIG_ENV_VARS: [&str; 6] = [
    "RECETTE_MODEL",
    "RECETTE_TEMPERATURE",
    "OPENAI_BASE_URL",
    "RECETTE_TIMEOUT_SECS",
    "RECETTE_IMAGE_BASE_URL",
    "OPENAI_API_KEY",
];

struct EnvGuard {
    saved: Vec<(String, Option<String>)>,
}

impl EnvGuard {
    fn capture(keys: &[&str]) -> Self {
        let saved = keys
            .iter()
            .map(|key| ((*key).to_string(), std::env::var(key).ok()))
            .collect();
        Self { saved }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for (key, value) in &self.saved {
            match value {
                Some(v) => std::env::set_var(key, v),
                None => std::env::remove_var(key),
            }
        }
    }
}

fn env_lock_guard() -> std::sync::MutexGuard<'static, ()> {
    ENV_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn clean_env() -> (std::sync::MutexGuard<'static, ()>, EnvGuard) {
    let lock = env_lock_guard();
    let guard = EnvGuard::capture(&CONFIG_ENV_VARS);
    for key in CONFIG_ENV_VARS {
        std::env::remove_var(key);
    }
    (lock, guard)
}

#[test]
fn from_env_without_overrides_is_default() {
    let _env = clean_env();
    let config = RecipeConfig::from_env().unwrap();
    assert_eq!(config, RecipeConfig::default());
}

#[test]
fn from_env_applies_overrides() {
    let _env = clean_env();
    std::env::set_var("RECETTE_MODEL", "gpt-4o");
    std::env::set_var("RECETTE_TEMPERATURE", "1.1");
    std::env::set_var("OPENAI_BASE_URL", "http://localhost:9999/v1");
    std::env::set_var("RECETTE_TIMEOUT_SECS", "15");
    std::env::set_var("RECETTE_IMAGE_BASE_URL", "https://img.local");

    let config = RecipeConfig::from_env().unwrap();

    assert_eq!(config.generation.model, ChatModel::Gpt4o);
    assert_eq!(config.generation.temperature, 1.1);
    assert_eq!(config.base_url, "http://localhost:9999/v1");
    assert_eq!(config.timeout, Duration::from_secs(15));
    assert_eq!(config.image.base_url, "https://img.local");
}

#[test]
fn from_env_rejects_bad_temperature() {
    let _env = clean_env();
    std::env::set_var("RECETTE_TEMPERATURE", "warm");
    assert!(matches!(
        RecipeConfig::from_env(),
        Err(RecetteError::Configuration(_))
    ));

    std::env::set_var("RECETTE_TEMPERATURE", "3.0");
    assert!(matches!(
        RecipeConfig::from_env(),
        Err(RecetteError::Configuration(_))
    ));
}

#[test]
fn env_overrides_file() {
    let _env = clean_env();
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("recette.toml");
    std::fs::write(&path, "model = \"gpt-4.1-mini\"\ntemperature = 0.2\n").unwrap();
    std::env::set_var("RECETTE_TEMPERATURE", "0.9");

    let config = RecipeConfig::load(Some(&path)).unwrap();

    assert_eq!(config.generation.model, ChatModel::Gpt41Mini);
    assert_eq!(config.generation.temperature, 0.9);
}

#[test]
fn env_credential_reads_and_trims() {
    let _env = clean_env();
    let supplier = EnvCredential::default();
    assert_eq!(supplier.credential(), None);

    std::env::set_var("OPENAI_API_KEY", "  sk-env  ");
    assert_eq!(supplier.credential(), Some("sk-env".to_string()));

    std::env::set_var("OPENAI_API_KEY", "   ");
    assert_eq!(supplier.credential(), None);
}

#[test]
fn chain_falls_back_from_env_to_properties_file() {
    let _env = clean_env();
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("local.properties");
    std::fs::write(&path, "sdk.dir=/opt/sdk\nOPENAI_API_KEY=sk-file\n").unwrap();

    let chain = ChainedCredential::new()
        .with(EnvCredential::default())
        .with(PropertiesFileCredential::new(&path));
    assert_eq!(chain.credential(), Some("sk-file".to_string()));

    std::env::set_var("OPENAI_API_KEY", "sk-env");
    assert_eq!(chain.credential(), Some("sk-env".to_string()));
}

//! Credential suppliers for the generation service.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Default environment variable / properties key holding the API key.
pub const DEFAULT_CREDENTIAL_KEY: &str = "OPENAI_API_KEY";

/// Supplies the secret that authorizes calls to the generation service.
///
/// Returning `None` (or an empty string) means no credential is available;
/// the orchestrator then fails the cycle before any network attempt.
pub trait CredentialSupplier: Send + Sync {
    fn credential(&self) -> Option<String>;
}

impl<F> CredentialSupplier for F
where
    F: Fn() -> Option<String> + Send + Sync,
{
    fn credential(&self) -> Option<String> {
        self()
    }
}

/// A fixed credential, typically from a CLI flag or a test.
#[derive(Clone)]
pub struct StaticCredential(Option<String>);

impl StaticCredential {
    pub fn new(key: impl Into<String>) -> Self {
        Self(Some(key.into()))
    }

    /// A supplier that never yields a credential.
    pub fn absent() -> Self {
        Self(None)
    }
}

impl fmt::Debug for StaticCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("StaticCredential")
            .field(&self.0.as_ref().map(|_| ".."))
            .finish()
    }
}

impl CredentialSupplier for StaticCredential {
    fn credential(&self) -> Option<String> {
        self.0.clone()
    }
}

/// Reads the credential from an environment variable on every call.
#[derive(Debug, Clone)]
pub struct EnvCredential {
    var: String,
}

impl EnvCredential {
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }

    pub fn var(&self) -> &str {
        &self.var
    }
}

impl Default for EnvCredential {
    fn default() -> Self {
        Self::new(DEFAULT_CREDENTIAL_KEY)
    }
}

impl CredentialSupplier for EnvCredential {
    fn credential(&self) -> Option<String> {
        std::env::var(&self.var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }
}

/// Reads the credential from a `key=value` properties file
/// (e.g. `local.properties`).
///
/// The file is read on every call so that edits take effect on the next
/// generation. A missing or unreadable file yields `None`.
#[derive(Debug, Clone)]
pub struct PropertiesFileCredential {
    path: PathBuf,
    key: String,
}

impl PropertiesFileCredential {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            key: DEFAULT_CREDENTIAL_KEY.to_string(),
        }
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CredentialSupplier for PropertiesFileCredential {
    fn credential(&self) -> Option<String> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) => {
                tracing::debug!(path = %self.path.display(), error = %err, "credentials file unreadable");
                return None;
            }
        };
        lookup_property(&raw, &self.key)
    }
}

/// Find `key` in properties-formatted text. Later entries win.
pub(crate) fn lookup_property(raw: &str, key: &str) -> Option<String> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#') && !line.starts_with('!'))
        .filter_map(|line| {
            let idx = line.find(['=', ':'])?;
            let (k, v) = line.split_at(idx);
            (k.trim() == key).then(|| v[1..].trim().to_string())
        })
        .last()
        .filter(|v| !v.is_empty())
}

/// Tries each supplier in order and returns the first non-empty credential.
#[derive(Clone, Default)]
pub struct ChainedCredential {
    suppliers: Vec<Arc<dyn CredentialSupplier>>,
}

impl ChainedCredential {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, supplier: impl CredentialSupplier + 'static) -> Self {
        self.suppliers.push(Arc::new(supplier));
        self
    }
}

impl fmt::Debug for ChainedCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChainedCredential")
            .field("suppliers", &self.suppliers.len())
            .finish()
    }
}

impl CredentialSupplier for ChainedCredential {
    fn credential(&self) -> Option<String> {
        self.suppliers
            .iter()
            .filter_map(|s| s.credential())
            .find(|c| !c.trim().is_empty())
    }
}

//! Configuration for the publishing core.
//!
//! Everything the original service pulled from process-wide environment
//! state (articles directory, document extension, cookie secret and
//! retention) lives here as explicit structs, loadable from a TOML
//! file. Every field has a default so an empty config file is valid.
//!
//! | Section      | Purpose                                        |
//! |--------------|------------------------------------------------|
//! | `[store]`    | Articles directory, extension, slug limits     |
//! | `[identity]` | Cookie secret, digest size, retention window   |

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path, path::PathBuf};

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub store: StoreConfig,
    pub identity: IdentityConfig,
}

/// `[store]` section: where and how article documents are kept.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Directory holding one document per article.
    pub dir: PathBuf,
    /// Document filename extension, including the dot.
    pub extension: String,
    /// Maximum slug base length in characters, before the numeric suffix.
    pub max_slug_length: usize,
    /// Bound on slug collision-resolution attempts.
    pub max_slug_attempts: u32,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("articles"),
            extension: ".json".to_string(),
            max_slug_length: crate::slug::MAX_SLUG_LENGTH,
            max_slug_attempts: crate::slug::MAX_SLUG_ATTEMPTS,
        }
    }
}

/// `[identity]` section: caller token minting and cookie signing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IdentityConfig {
    /// Secret the signing key is derived from. The default is a dev
    /// key; deployments should set their own.
    pub secret_key: String,
    /// Token and MAC size in bytes (hex output is twice as long).
    pub digest_size: usize,
    /// Client-side token retention window, in seconds.
    pub retention_secs: u64,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            secret_key: "xk&$%h4788*^&".to_string(),
            digest_size: 16,
            retention_secs: 60 * 60 * 24 * 30,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file `{}`", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("failed to parse config file `{}`", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations that cannot work.
    pub fn validate(&self) -> Result<()> {
        if self.store.max_slug_length == 0 {
            bail!("store.max_slug_length must be at least 1");
        }
        if self.store.max_slug_attempts == 0 {
            bail!("store.max_slug_attempts must be at least 1");
        }
        if self.store.extension.is_empty() || !self.store.extension.starts_with('.') {
            bail!("store.extension must start with a dot, e.g. `.json`");
        }
        if self.identity.secret_key.is_empty() {
            bail!("identity.secret_key must not be empty");
        }
        if self.identity.digest_size == 0 {
            bail!("identity.digest_size must be at least 1");
        }
        Ok(())
    }
}

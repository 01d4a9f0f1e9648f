//! Configuration loaded from `~/.config/ava/config.toml`.
//!
//! Every setting has a default, so a missing file is not an error. The
//! `AVA_*` environment variables override whatever the file says.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::portal::backend::{DOCUMENTS_BUCKET, THUMBNAILS_BUCKET};
use crate::portal::library::MAX_UPLOAD_BYTES;
use crate::portal::User;
use crate::video::VideoSourceResolver;

/// Hosted backend project settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Project base URL, e.g. `https://xyz.example.co`.
    pub url: String,
    /// Public (anon) API key sent with every request.
    pub api_key: String,
    /// Signed-in user's access token; the API key is used when absent.
    pub access_token: Option<String>,
    pub timeout_secs: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            api_key: String::new(),
            access_token: None,
            timeout_secs: 30,
        }
    }
}

impl BackendConfig {
    pub fn is_configured(&self) -> bool {
        !self.url.trim().is_empty() && !self.api_key.trim().is_empty()
    }
}

/// Object storage settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub documents_bucket: String,
    pub thumbnails_bucket: String,
    pub max_upload_bytes: u64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            documents_bucket: DOCUMENTS_BUCKET.to_string(),
            thumbnails_bucket: THUMBNAILS_BUCKET.to_string(),
            max_upload_bytes: MAX_UPLOAD_BYTES,
        }
    }
}

/// The acting user, for permission checks.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct UserConfig {
    pub id: String,
    pub name: String,
    pub role: String,
}

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct AvaConfig {
    /// Origin of the page that embeds players. Appended to YouTube embeds.
    pub origin: String,
    pub backend: BackendConfig,
    pub storage: StorageConfig,
    pub user: UserConfig,
}

impl AvaConfig {
    /// Load from `path`, or from the default location when `None`.
    ///
    /// An explicitly given path must exist; the default one is optional.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => {
                let path = config_path();
                if path.exists() {
                    Self::from_file(&path)?
                } else {
                    Self::default()
                }
            }
        };
        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::from_toml(&content).with_context(|| format!("invalid TOML in {}", path.display()))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Apply `AVA_*` overrides. Empty values are ignored.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(v) = get("AVA_BACKEND_URL") {
            self.backend.url = v;
        }
        if let Some(v) = get("AVA_API_KEY") {
            self.backend.api_key = v;
        }
        if let Some(v) = get("AVA_ACCESS_TOKEN") {
            self.backend.access_token = Some(v);
        }
        if let Some(v) = get("AVA_ORIGIN") {
            self.origin = v;
        }
        if let Some(v) = get("AVA_USER_ID") {
            self.user.id = v;
        }
        if let Some(v) = get("AVA_USER_ROLE") {
            self.user.role = v;
        }
    }

    /// Scheme, host and port of the configured origin (paths are dropped).
    ///
    /// Returns an empty string when no origin is configured.
    pub fn normalized_origin(&self) -> Result<String> {
        let raw = self.origin.trim();
        if raw.is_empty() {
            return Ok(String::new());
        }
        let parsed = url::Url::parse(raw).with_context(|| format!("invalid origin {raw:?}"))?;
        Ok(parsed.origin().ascii_serialization())
    }

    pub fn resolver(&self) -> Result<VideoSourceResolver> {
        Ok(VideoSourceResolver::with_origin(self.normalized_origin()?))
    }

    pub fn user(&self) -> User {
        User {
            id: self.user.id.clone(),
            name: self.user.name.clone(),
            role: self.user.role.as_str().into(),
        }
    }
}

/// Default config file location.
pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("ava")
        .join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_empty_config() {
        let config = AvaConfig::from_toml("").unwrap();
        assert_eq!(config, AvaConfig::default());
        assert_eq!(config.storage.max_upload_bytes, 10 * 1024 * 1024);
        assert_eq!(config.storage.documents_bucket, "formation-documents");
        assert_eq!(config.backend.timeout_secs, 30);
        assert!(!config.backend.is_configured());
    }

    #[test]
    fn parse_full_config() {
        let toml_str = r#"
origin = "https://portal.example.org"

[backend]
url = "https://xyz.example.co"
api_key = "anon-key"
timeout_secs = 5

[storage]
documents_bucket = "docs"

[user]
id = "u1"
role = "Coordenador"
"#;
        let config = AvaConfig::from_toml(toml_str).unwrap();
        assert!(config.backend.is_configured());
        assert_eq!(config.backend.timeout_secs, 5);
        assert_eq!(config.backend.access_token, None);
        assert_eq!(config.storage.documents_bucket, "docs");
        assert_eq!(config.storage.thumbnails_bucket, "course-thumbnails");
        assert!(crate::portal::is_admin(&config.user()));
    }

    #[test]
    fn invalid_toml_is_an_error() {
        assert!(AvaConfig::from_toml("[backend\nurl = 1").is_err());
    }

    #[test]
    fn env_overrides_file_values() {
        let mut config = AvaConfig::from_toml(
            r#"
origin = "https://old.example"
[backend]
url = "https://old.example.co"
"#,
        )
        .unwrap();
        config.apply_overrides(|key| match key {
            "AVA_BACKEND_URL" => Some("https://new.example.co".into()),
            "AVA_ACCESS_TOKEN" => Some("jwt".into()),
            "AVA_ORIGIN" => Some("   ".into()),
            "AVA_USER_ROLE" => Some("admin".into()),
            _ => None,
        });
        assert_eq!(config.backend.url, "https://new.example.co");
        assert_eq!(config.backend.access_token.as_deref(), Some("jwt"));
        assert_eq!(config.origin, "https://old.example");
        assert_eq!(config.user.role, "admin");
    }

    #[test]
    fn origin_is_normalized() {
        let config = AvaConfig {
            origin: "https://portal.example.org:8443/ava/index.html".into(),
            ..AvaConfig::default()
        };
        assert_eq!(
            config.normalized_origin().unwrap(),
            "https://portal.example.org:8443"
        );
        assert_eq!(AvaConfig::default().normalized_origin().unwrap(), "");

        let bad = AvaConfig {
            origin: "not an origin".into(),
            ..AvaConfig::default()
        };
        assert!(bad.resolver().is_err());
    }

    #[test]
    fn missing_explicit_path_is_an_error() {
        let err = AvaConfig::load(Some(Path::new("/nonexistent/ava/config.toml"))).unwrap_err();
        assert!(err.to_string().contains("failed to read"));
    }
}

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

/// Environment variable consulted for the base URL when no config file exists.
pub const BASE_URL_ENV: &str = "DOCSEEK_API_URL";

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub api: ApiConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiConfig {
    /// Base URL of the search service, e.g. `https://api.example.com/prod`.
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    30
}

impl Config {
    /// Build a config directly from a base URL with default settings.
    pub fn from_base_url(base_url: impl Into<String>) -> Self {
        Self {
            api: ApiConfig {
                base_url: base_url.into(),
                timeout_secs: default_timeout_secs(),
            },
        }
    }
}

pub fn load_config(path: &Path) -> Result<Config> {
    let config = if path.exists() {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&content).with_context(|| "Failed to parse config file")?
    } else if let Ok(base_url) = std::env::var(BASE_URL_ENV) {
        Config::from_base_url(base_url)
    } else {
        anyhow::bail!(
            "Config file not found: {} (or set {} to configure the service URL)",
            path.display(),
            BASE_URL_ENV
        );
    };

    validate(config)
}

fn validate(mut config: Config) -> Result<Config> {
    let base_url = config.api.base_url.trim().trim_end_matches('/');
    if base_url.is_empty() {
        anyhow::bail!("api.base_url must not be empty");
    }
    if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
        anyhow::bail!("api.base_url must start with http:// or https://");
    }
    if config.api.timeout_secs == 0 {
        anyhow::bail!("api.timeout_secs must be > 0");
    }
    config.api.base_url = base_url.to_string();
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_with_defaults() {
        let file = write_config(
            r#"
[api]
base_url = "https://api.example.com/prod"
"#,
        );
        let config = load_config(file.path()).unwrap();
        assert_eq!(config.api.base_url, "https://api.example.com/prod");
        assert_eq!(config.api.timeout_secs, 30);
    }

    #[test]
    fn test_trailing_slash_is_normalized() {
        let file = write_config(
            r#"
[api]
base_url = "https://api.example.com/prod/"
timeout_secs = 10
"#,
        );
        let config = load_config(file.path()).unwrap();
        assert_eq!(config.api.base_url, "https://api.example.com/prod");
        assert_eq!(config.api.timeout_secs, 10);
    }

    #[test]
    fn test_rejects_non_http_url() {
        let file = write_config(
            r#"
[api]
base_url = "ftp://api.example.com"
"#,
        );
        assert!(load_config(file.path()).is_err());
    }

    #[test]
    fn test_rejects_zero_timeout() {
        let file = write_config(
            r#"
[api]
base_url = "https://api.example.com"
timeout_secs = 0
"#,
        );
        assert!(load_config(file.path()).is_err());
    }

    #[test]
    fn test_missing_file_without_env_fails() {
        let dir = tempfile::TempDir::new().unwrap();
        let missing = dir.path().join("docseek.toml");
        std::env::remove_var(BASE_URL_ENV);
        assert!(load_config(&missing).is_err());
    }
}

use anyhow::Context;
use relay_core::HttpSettings;
use serde::Deserialize;
use std::path::Path;

/// Config file read when `--config` is not given and the file exists.
pub const DEFAULT_CONFIG_PATH: &str = "relay.toml";

/// Contents of `relay.toml`. Credentials never live here; they come from
/// the environment (or `.env`).
#[derive(Debug, Default, Deserialize)]
pub struct RelayConfig {
    /// `[http]` section.
    #[serde(default)]
    pub http: HttpSettings,
}

impl RelayConfig {
    /// Load the config file.
    ///
    /// An explicit path must exist. Without one, `relay.toml` in the working
    /// directory is used if present, otherwise defaults apply.
    pub async fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let path = match path {
            Some(path) => path,
            None => {
                let default = Path::new(DEFAULT_CONFIG_PATH);
                if !tokio::fs::try_exists(default).await.unwrap_or(false) {
                    return Ok(Self::default());
                }
                default
            }
        };

        let raw = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read config file '{}'", path.display()))?;
        Self::parse(&raw).with_context(|| format!("Invalid config file '{}'", path.display()))
    }

    /// Parse TOML text.
    pub fn parse(raw: &str) -> anyhow::Result<Self> {
        let config: Self = toml::from_str(raw)?;
        config.http.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use relay_core::config::{DEFAULT_SLACK_API_BASE, DEFAULT_TIMEOUT_SECS};
    use std::io::Write;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = RelayConfig::parse("").unwrap();
        assert_eq!(config.http.timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert_eq!(config.http.slack_api_base, DEFAULT_SLACK_API_BASE);
    }

    #[test]
    fn test_partial_http_section() {
        let config = RelayConfig::parse("[http]\ntimeout_secs = 5\n").unwrap();
        assert_eq!(config.http.timeout_secs, 5);
        assert_eq!(config.http.slack_api_base, DEFAULT_SLACK_API_BASE);
    }

    #[test]
    fn test_bad_type_is_rejected() {
        assert!(RelayConfig::parse("[http]\ntimeout_secs = \"soon\"\n").is_err());
    }

    #[test]
    fn test_zero_timeout_is_rejected() {
        let err = RelayConfig::parse("[http]\ntimeout_secs = 0\n").unwrap_err();
        assert!(err.to_string().contains("timeout_secs must be at least 1"));
    }

    #[tokio::test]
    async fn test_load_explicit_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[http]\nslack_api_base = \"http://localhost:3000/api\"").unwrap();

        let config = RelayConfig::load(Some(file.path())).await.unwrap();
        assert_eq!(config.http.slack_api_base, "http://localhost:3000/api");
    }

    #[tokio::test]
    async fn test_load_missing_explicit_path_fails() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        let err = RelayConfig::load(Some(missing.as_path())).await.unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}

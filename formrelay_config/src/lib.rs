use std::path::{Path, PathBuf};

use anyhow::Context;
use config::{Environment, File, FileFormat};
use formrelay_models::submission::AccessKey;
use serde::Deserialize;
use url::Url;

pub use duration::Duration;

mod duration;

pub const DEFAULT_CONFIG_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../config.toml");

/// Colon separated list of config files, loaded in order.
pub const CONFIG_PATHS_ENV: &str = "FORMRELAY_CONFIG";

/// Prefix of environment variables overriding config values, e.g.
/// `FORMRELAY_RELAY__ACCESS_KEY` for `relay.access_key`.
pub const ENV_PREFIX: &str = "FORMRELAY";

pub fn load() -> anyhow::Result<Config> {
    let paths = match std::env::var_os(CONFIG_PATHS_ENV) {
        Some(paths) => std::env::split_paths(&paths).collect(),
        None => vec![PathBuf::from(DEFAULT_CONFIG_PATH)],
    };

    load_with_overrides(&paths, &[])
}

/// Loads the given config files, environment overrides and finally the inline
/// TOML `overrides`.
pub fn load_with_overrides(
    paths: &[impl AsRef<Path>],
    overrides: &[&str],
) -> anyhow::Result<Config> {
    let builder = paths
        .iter()
        .try_fold(config::Config::builder(), |builder, path| {
            let path = path.as_ref();
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file at {}", path.display()))?;
            let source = File::from_str(&content, FileFormat::Toml);
            anyhow::Ok(builder.add_source(source))
        })?
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__"),
        );

    overrides
        .iter()
        .fold(builder, |builder, content| {
            builder.add_source(File::from_str(content, FileFormat::Toml))
        })
        .build()?
        .try_deserialize()
        .context("Failed to load config")
}

#[derive(Debug, Deserialize)]
pub struct Config {
    pub relay: RelayConfig,
    #[serde(default)]
    pub http: HttpConfig,
}

#[derive(Debug, Deserialize)]
pub struct RelayConfig {
    pub endpoint_override: Option<Url>,
    pub access_key: AccessKey,
}

#[derive(Debug, Default, Deserialize)]
pub struct HttpConfig {
    pub timeout: Option<Duration>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_default_config() {
        let config = load_with_overrides(&[Path::new(DEFAULT_CONFIG_PATH)], &[]).unwrap();
        assert_eq!(config.relay.endpoint_override, None);
        assert_eq!(config.http.timeout, None);
    }

    #[test]
    fn overrides_take_precedence() {
        let config = load_with_overrides(
            &[Path::new(DEFAULT_CONFIG_PATH)],
            &[
                "relay.endpoint_override = \"http://127.0.0.1:8003/submit\"",
                "relay.access_key = \"test-access-key\"\nhttp.timeout = \"1m 30s\"",
            ],
        )
        .unwrap();

        assert_eq!(
            config.relay.endpoint_override.unwrap().as_str(),
            "http://127.0.0.1:8003/submit"
        );
        assert_eq!(config.relay.access_key, AccessKey::new("test-access-key"));
        assert_eq!(
            config.http.timeout.map(|x| x.0),
            Some(std::time::Duration::from_secs(90))
        );
    }

    #[test]
    fn missing_config_file() {
        let err = load_with_overrides(&[Path::new("/does/not/exist.toml")], &[]).unwrap_err();
        assert!(err.to_string().contains("/does/not/exist.toml"));
    }
}

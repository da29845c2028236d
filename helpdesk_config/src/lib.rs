use std::{
    net::IpAddr,
    path::{Path, PathBuf},
};

use anyhow::Context;
use config::{Environment, File, FileFormat};
use helpdesk_models::email_address::{EmailAddress, EmailAddressWithName};
use serde::Deserialize;
use url::Url;

pub use duration::Duration;

mod duration;

pub const DEFAULT_CONFIG_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../config.toml");
pub const DEV_CONFIG_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../config.dev.toml");

/// Environment variable containing a colon separated list of config files.
pub const CONFIG_PATHS_VAR: &str = "HELPDESK_CONFIG";
/// Prefix of environment variables that override individual settings, e.g.
/// `HELPDESK__EMAIL__API_KEY`.
pub const ENV_PREFIX: &str = "HELPDESK";

/// Load the config files listed in `HELPDESK_CONFIG` (or the default config)
/// and apply the environment overrides.
pub fn load() -> anyhow::Result<Config> {
    let paths = match std::env::var_os(CONFIG_PATHS_VAR) {
        Some(paths) => std::env::split_paths(&paths).collect(),
        None => vec![PathBuf::from(DEFAULT_CONFIG_PATH)],
    };

    load_with_overrides(&paths, &[])
}

pub fn load_dev_config() -> anyhow::Result<Config> {
    load_with_overrides(&[DEFAULT_CONFIG_PATH, DEV_CONFIG_PATH], &[])
}

/// Load the given config files in order, followed by the environment and the
/// inline toml `overrides`.
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
        .add_source(Environment::with_prefix(ENV_PREFIX).separator("__"));

    overrides
        .iter()
        .fold(builder, |builder, &content| {
            builder.add_source(File::from_str(content, FileFormat::Toml))
        })
        .build()?
        .try_deserialize()
        .context("Failed to load config")
}

#[derive(Debug, Deserialize)]
pub struct Config {
    pub http: HttpConfig,
    pub email: EmailConfig,
    pub contact: ContactConfig,
    pub sentry: Option<SentryConfig>,
}

#[derive(Debug, Deserialize)]
pub struct HttpConfig {
    pub host: IpAddr,
    pub port: u16,
}

#[derive(Debug, Deserialize)]
pub struct EmailConfig {
    pub api_key: String,
    pub from: EmailAddressWithName,
    pub timeout: Duration,
    pub api_endpoint_override: Option<Url>,
}

#[derive(Debug, Deserialize)]
pub struct ContactConfig {
    pub email: EmailAddress,
}

#[derive(Debug, Deserialize)]
pub struct SentryConfig {
    pub dsn: Url,
}

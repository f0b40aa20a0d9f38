//! Settings loaded from the environment (and a `.env` file, if there is one).

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use log::LevelFilter;

/// Default values used when a variable isn't set
pub mod defaults {
    pub const ENDPOINT: &str = "http://fritz.box";
    pub const USERNAME: &str = "";
    pub const LANGUAGE: &str = "de";
}

/// Names of the environment variables
pub mod env_vars {
    pub const ENDPOINT: &str = "FRITZBOX_ENDPOINT";
    pub const USERNAME: &str = "FRITZBOX_USERNAME";
    pub const PASSWORD: &str = "FRITZBOX_PASSWORD";
    pub const LANGUAGE: &str = "FRITZBOX_LANG";
    pub const ROOT_CERT_PATH: &str = "FRITZBOX_ROOT_CERT_PATH";
    pub const TIMEOUT_SECONDS: &str = "FRITZBOX_TIMEOUT_SECONDS";
    pub const LOG_LEVEL: &str = "FRITZBOX_LOG_LEVEL";
}

#[derive(Clone)]
pub struct Config {
    /// Example: `http://fritz.box` or `https://192.168.178.1`
    pub endpoint: String,
    /// Empty for boxes without user accounts
    pub username: String,
    pub password: String,
    /// `lang` parameter of the requests
    pub language: String,
    /// Root certificate of the FRITZ!Box (PEM), invalid certs are accepted without one
    pub root_cert_path: Option<PathBuf>,
    pub timeout: Option<Duration>,
    pub log_level: LevelFilter,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("endpoint", &self.endpoint)
            .field("username", &self.username)
            .field("password", &"***")
            .field("language", &self.language)
            .field("root_cert_path", &self.root_cert_path)
            .field("timeout", &self.timeout)
            .field("log_level", &self.log_level)
            .finish()
    }
}

impl Config {
    pub fn new(
        endpoint: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Config {
        Config {
            endpoint: endpoint.into(),
            username: username.into(),
            password: password.into(),
            language: defaults::LANGUAGE.to_string(),
            root_cert_path: None,
            timeout: None,
            log_level: LevelFilter::Info,
        }
    }

    /// Load the config from the environment, a `.env` file is loaded first if present.
    pub fn from_env() -> anyhow::Result<Config> {
        Self::from_lookup(|key| dotenv::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> anyhow::Result<Config>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var_or =
            |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let password = lookup(env_vars::PASSWORD)
            .with_context(|| format!("couldn't find env var {}", env_vars::PASSWORD))?;

        let timeout = lookup(env_vars::TIMEOUT_SECONDS)
            .map(|secs| {
                secs.parse::<u64>()
                    .with_context(|| format!("couldn't parse {}", env_vars::TIMEOUT_SECONDS))
            })
            .transpose()?
            .map(Duration::from_secs);

        let log_level = lookup(env_vars::LOG_LEVEL)
            .map(|level| {
                level
                    .parse::<LevelFilter>()
                    .with_context(|| format!("couldn't parse {}", env_vars::LOG_LEVEL))
            })
            .transpose()?
            .unwrap_or(LevelFilter::Info);

        Ok(Config {
            endpoint: var_or(env_vars::ENDPOINT, defaults::ENDPOINT),
            username: var_or(env_vars::USERNAME, defaults::USERNAME),
            password,
            language: var_or(env_vars::LANGUAGE, defaults::LANGUAGE),
            root_cert_path: lookup(env_vars::ROOT_CERT_PATH).map(PathBuf::from),
            timeout,
            log_level,
        })
    }
}

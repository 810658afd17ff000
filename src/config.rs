//! Comparison configuration.
//!
//! [`CompareConfig`] is read from `config/config.toml` (section `[compare]`)
//! and `SCHEMAGUARD__COMPARE__*` environment variables using
//! `CompareConfig::load()`.

use crate::script::Dialect;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

/// Default location of the configuration file, relative to the working directory
pub const DEFAULT_CONFIG_PATH: &str = "config/config.toml";

const ENV_PREFIX: &str = "SCHEMAGUARD";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CompareConfig {
    /// Dialect the default script writer renders for
    #[serde(default)]
    pub dialect: Dialect,
    /// Separator placed between the drop and add halves of a change script
    #[serde(default = "default_line_separator")]
    pub line_separator: String,
    /// Emit `IF EXISTS` / `IF NOT EXISTS` guards where the dialect supports them
    #[serde(default)]
    pub guard_statements: bool,
}

fn default_line_separator() -> String {
    "\n".to_string()
}

impl Default for CompareConfig {
    fn default() -> Self {
        Self {
            dialect: Dialect::default(),
            line_separator: default_line_separator(),
            guard_statements: false,
        }
    }
}

impl CompareConfig {
    /// Load the comparison configuration from `config/config.toml`, falling back to env vars.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(Path::new(DEFAULT_CONFIG_PATH))
    }

    /// Load the comparison configuration from `path`, overlaid with env vars.
    ///
    /// A missing file is not an error. An unreadable file is logged and the
    /// configuration is rebuilt from the environment alone.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        Self::load_with_env(path, Environment::with_prefix(ENV_PREFIX))
    }

    fn load_with_env(path: &Path, env: Environment) -> Result<Self, ConfigError> {
        let env = env.separator("__").try_parsing(true);
        let builder = Config::builder()
            .add_source(File::from(path).required(false))
            .add_source(env.clone());

        let settings = match builder.build() {
            Ok(cfg) => cfg,
            Err(err) => {
                if path.exists() {
                    log::warn!(
                        "failed to load config file {}, falling back to env: {}",
                        path.display(),
                        err
                    );
                }
                Config::builder().add_source(env).build().map_err(|env_err| {
                    ConfigError::Message(format!(
                        "Failed to load configuration from file and env: {}, then env-only error: {}",
                        err, env_err
                    ))
                })?
            }
        };

        match settings.get::<CompareConfig>("compare") {
            Ok(cfg) => Ok(cfg),
            Err(ConfigError::NotFound(_)) => Ok(CompareConfig::default()),
            Err(e) => Err(ConfigError::Message(format!(
                "Compare configuration could not be loaded from file or environment: {}",
                e
            ))),
        }
    }
}

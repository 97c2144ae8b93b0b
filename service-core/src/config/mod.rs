use crate::error::AppError;
use config::{Config as Cfg, File};
use serde::Deserialize;

/// Settings shared by every service: listener port.
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_port() -> u16 {
    8080
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: default_port(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        Ok(builder().build()?.try_deserialize()?)
    }
}

/// Layered source: optional `configuration.{toml,yaml,json}` file, then
/// `APP__`-prefixed environment variables (`APP__PORT`, `APP__LOOKUP__...`).
pub fn builder() -> config::ConfigBuilder<config::builder::DefaultState> {
    Cfg::builder()
        .add_source(File::with_name("configuration").required(false))
        .add_source(config::Environment::with_prefix("APP").separator("__"))
}

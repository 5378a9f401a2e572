//! Configuration for Products API

use core_config::{AppInfo, FromEnv, app_info, cors::CorsConfig, env_parse_or, server::ServerConfig};
use std::time::Duration;

pub use core_config::Environment;

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub server: ServerConfig,
    pub cors: CorsConfig,
    pub environment: Environment,
    /// Load the demo catalog into the store at startup
    pub seed_data: bool,
    pub shutdown_timeout: Duration,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let server = ServerConfig::from_env()?;
        let cors = CorsConfig::from_env()?;
        let seed_data = env_parse_or("SEED_DATA", true)?;
        let shutdown_timeout = Duration::from_secs(env_parse_or("SHUTDOWN_TIMEOUT_SECS", 30u64)?);

        Ok(Self {
            app: app_info!(),
            server,
            cors,
            environment,
            seed_data,
            shutdown_timeout,
        })
    }
}

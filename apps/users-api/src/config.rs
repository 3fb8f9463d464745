use core_config::{AppInfo, FromEnv, app_info, cors::CorsConfig, server::ServerConfig};

pub use core_config::Environment;

/// Application-specific configuration
/// Composes shared config components from the `config` library
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub server: ServerConfig,
    pub cors: CorsConfig,
    pub environment: Environment,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let server = ServerConfig::from_env()?; // HOST=0.0.0.0, PORT=3000 when unset
        let cors = CorsConfig::from_env()?;

        Ok(Self {
            app: app_info!(),
            server,
            cors,
            environment,
        })
    }
}

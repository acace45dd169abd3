// Configuration module entry point
// Loads layered configuration and holds the shared runtime state

mod state;
mod types;

use std::net::SocketAddr;

pub use state::{AppState, JsonStyle};
pub use types::{
    parse_debug_flag, AppConfig, Config, EnvOverrides, HttpConfig, LoggingConfig,
    PerformanceConfig, ServerConfig,
};

/// Default secret used when `SECRET_KEY` is not provided
pub const DEFAULT_SECRET_KEY: &str = "dev-key-for-development-only";

/// Default config file name (extension resolved by the `config` crate)
pub const DEFAULT_CONFIG_PATH: &str = "config";

/// `DASHBOARD_SERVER__WORKERS=4` sets `server.workers`
pub fn env_source() -> config::Environment {
    config::Environment::with_prefix("DASHBOARD")
        .prefix_separator("_")
        .separator("__")
}

impl Config {
    /// Load configuration from `config.toml` and the process environment
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from(DEFAULT_CONFIG_PATH, &EnvOverrides::from_env())
    }

    /// Load configuration from specified file path (without extension)
    ///
    /// Sources, lowest priority first: built-in defaults, the optional file,
    /// `DASHBOARD_`-prefixed environment variables, then `overrides`.
    pub fn load_from(
        config_path: &str,
        overrides: &EnvOverrides,
    ) -> Result<Self, config::ConfigError> {
        Self::load_from_sources(Some(config_path), Some(env_source()), overrides)
    }

    /// Built-in defaults only, ignoring config files and the environment
    pub fn builtin() -> Result<Self, config::ConfigError> {
        Self::load_from_sources(None, None, &EnvOverrides::default())
    }

    /// Load with explicit sources; a `None` source is skipped
    pub fn load_from_sources(
        config_path: Option<&str>,
        env: Option<config::Environment>,
        overrides: &EnvOverrides,
    ) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder();
        if let Some(path) = config_path {
            builder = builder.add_source(config::File::with_name(path).required(false));
        }
        if let Some(env) = env {
            builder = builder.add_source(env);
        }

        let settings = builder
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 5000)?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("logging.show_headers", false)?
            .set_default("performance.keep_alive_timeout", 75)?
            .set_default("performance.read_timeout", 30)?
            .set_default("performance.write_timeout", 30)?
            .set_default("performance.shutdown_grace", 10)?
            .set_default("http.server_name", "seo-dashboard")?
            .set_default("http.enable_cors", false)?
            .set_default("http.max_body_size", 1_048_576)? // 1MB
            .set_default("app.secret_key", DEFAULT_SECRET_KEY)?
            .set_default("app.debug", false)?
            .set_default("app.static_dir", "static")?
            .set_override_option("server.port", overrides.port.clone())?
            .set_override_option("app.secret_key", overrides.secret_key.clone())?
            .set_override_option("app.debug", overrides.debug)?
            .build()?;

        settings.try_deserialize()
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, crate::Error> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| crate::Error::InvalidAddress(format!("{}:{} ({e})", self.server.host, self.server.port)))
    }

    /// True when the built-in development secret is still in use
    pub fn uses_default_secret(&self) -> bool {
        self.app.secret_key == DEFAULT_SECRET_KEY
    }
}

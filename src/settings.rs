use std::num::NonZeroUsize;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub database_path: String,
    pub host: String,
    pub port: u16,
    /// Questions per page on every paginated endpoint.
    pub page_size: NonZeroUsize,
    /// Allowed CORS origins, any origin when empty.
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

impl Settings {
    /// Defaults, then the optional `config_file` (any format `config`
    /// understands, extension may be omitted), then `TRIVIA_*` variables.
    pub fn load(config_file: &str) -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Config::builder()
            .set_default("database_path", "trivia.db")?
            .set_default("host", "0.0.0.0")?
            .set_default("port", 8080)?
            .set_default("page_size", 10)?
            .add_source(File::with_name(config_file).required(false))
            .add_source(
                Environment::with_prefix("TRIVIA")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("cors_origins"),
            )
            .build()?
            .try_deserialize()
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

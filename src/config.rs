use clap::Parser;
use once_cell::sync::Lazy;

/// Label written in the footer of every exported spreadsheet.
pub const SYSTEM_LABEL: &str = "Academic Management Platform";

pub static APP_CONFIG: Lazy<Config> = Lazy::new(Config::parse);

#[derive(Debug, Parser, Clone)]
pub struct Config {
    #[clap(long, env, default_value_t = 8080)]
    pub port: u16,

    #[clap(long, env, default_value_t = true)]
    pub swagger_enabled: bool,

    #[clap(long, env, default_value = "info")]
    pub log_level: String,

    #[clap(long, env)]
    pub database_url: String,

    /// Serialized regression model, produced offline by the train_model binary.
    #[clap(long, env, default_value = "modelo_prediccion.bin")]
    pub model_path: String,

    #[clap(long, env, default_value = "*")]
    pub cors_allowed_origins: String,

    #[clap(long, env, default_value = "local")]
    pub app_env: String,
}

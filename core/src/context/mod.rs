mod app_config;
mod error;

pub use app_config::{APP_NAME, AppConfig};
pub use error::ConfigError;

use super::config::ConfigError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid configuration: {source}")]
    Config {
        #[from]
        source: ConfigError,
    },

    #[error("Data quality error: {0}")]
    DataQuality(String),

    #[error("Internal logic error: {0}")]
    Internal(String),
}

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SherpaError {
    #[error("Invalid config: {0}")]
    Config(String),

    #[error("Invalid seed data: {0}")]
    SeedData(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, SherpaError>;

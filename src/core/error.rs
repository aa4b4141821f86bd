use thiserror::Error;

#[derive(Error, Debug)]
pub enum RosterError {
    #[error("Unknown faction: {0}")]
    UnknownFaction(String),

    #[error("Invalid faction data: {0}")]
    InvalidFaction(String),

    #[error("Operative not found: {0}")]
    OperativeNotFound(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("Config parse error: {0}")]
    TomlError(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, RosterError>;

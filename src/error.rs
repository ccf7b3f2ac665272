//! Error types for skywars-arena

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ArenaError {
    #[error("Invalid arena configuration: {0}")]
    ConfigurationInvalid(String),

    #[error("World unavailable: {0}")]
    WorldUnavailable(String),

    #[error("Join sign unresolvable: {0}")]
    SignUnresolvable(String),

    #[error("Arena is full")]
    CapacityExceeded,

    #[error("Arena is under setup")]
    SetupInProgress,

    #[error("Invalid position: {0}")]
    InvalidPosition(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ArenaError>;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CorsairError {
    #[error("Pilot not found: {0:?}")]
    PilotNotFound(crate::core::types::PilotId),

    #[error("Expected two distinct pilots, got {0:?} twice")]
    SamePilot(crate::core::types::PilotId),

    #[error("Boarding refused: {0}")]
    Ineligible(#[from] crate::board::eligibility::IneligibleReason),

    #[error("Boarding session is already closed")]
    SessionClosed,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CorsairError>;

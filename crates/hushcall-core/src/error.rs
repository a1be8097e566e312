use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("display name is required")]
    EmptyDisplayName,
    #[error("phone number is required")]
    EmptyPhoneNumber,
    #[error("invalid repeated_minutes value: {0}")]
    InvalidRepeatedMinutes(u32),
    #[error("invalid repeated_count value: {0}")]
    InvalidRepeatedCount(u32),
    #[error("invalid call kind: {0}")]
    InvalidCallKind(String),
    #[error("invalid message folder: {0}")]
    InvalidMessageFolder(String),
}

#[derive(Debug, thiserror::Error)]
pub enum TriageError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("invalid text: {0}")]
    Text(#[from] triage_types::TextError),
    #[error("failed to create storage directory: {0}")]
    StorageDirCreation(std::io::Error),
    #[error("failed to read storage slot: {0}")]
    StorageRead(std::io::Error),
    #[error("failed to write storage slot: {0}")]
    StorageWrite(std::io::Error),
    #[error("failed to remove storage slot: {0}")]
    StorageRemove(std::io::Error),
    #[error("failed to serialize history: {0}")]
    Serialization(serde_json::Error),
}

pub type TriageResult<T> = std::result::Result<T, TriageError>;

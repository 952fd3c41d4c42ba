#[derive(Debug, thiserror::Error)]
pub enum IntakeError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("failed to read intake record file: {0}")]
    FileRead(std::io::Error),
    #[error("failed to deserialize intake record: {0}")]
    Deserialization(serde_json::Error),
    #[error("failed to serialize intake payload: {0}")]
    Serialization(serde_json::Error),
    #[error("failed to serialize YAML: {0}")]
    YamlSerialization(serde_yaml::Error),
    #[error("invalid record id: {0}")]
    RecordId(#[from] intake_uuid::UuidError),
}

pub type IntakeResult<T> = std::result::Result<T, IntakeError>;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ArmError {
    #[error("Pose store error: {0}")]
    Config(String),

    #[error("Translation error: {0}")]
    Translation(String),

    #[error("Unknown entity: {0}")]
    UnknownEntity(String),

    #[error("Unknown pose: {0}")]
    UnknownPose(String),

    #[error("Joint index {0} out of range (expected 0-5)")]
    Range(usize),

    #[error("Actuator error: {0}")]
    Actuator(String),

    #[error("LLM error: {0}")]
    Llm(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ArmError>;

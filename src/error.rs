use thiserror::Error;

#[derive(Error, Debug)]
pub enum AttestationError {
    #[error("Invalid request: {0}")]
    InputInvalid(String),

    #[error("Template unavailable: {0}")]
    TemplateUnavailable(String),

    #[error("QR payload does not fit: {0}")]
    EncodingOverflow(String),

    #[error("Failed to draw page: {0}")]
    Render(String),

    #[error("Failed to serialize document: {0}")]
    SerializationFailure(String),

    #[error("Rendering task failed: {0}")]
    WorkerFailed(String),
}

pub type Result<T> = std::result::Result<T, AttestationError>;

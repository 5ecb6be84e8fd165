use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Failed to serialize PDF: {0}")]
    SerializationError(String),
}

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Imagen no disponible: {0}")]
    ImageUnavailable(String),
    #[error("Error de operación: {0}")]
    OperationFailed(String),
}

pub type DomainResult<T> = Result<T, DomainError>;

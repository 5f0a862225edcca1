use thiserror::Error;

use crate::namespace::Namespace;

#[derive(Error, Debug)]
pub enum BridgeError {
    #[error("Bridge capability not available: {0}")]
    NotAvailable(String),

    #[error("Bridge operation failed: {0}")]
    OperationFailed(String),

    #[error("Unknown namespace: {0}")]
    UnknownNamespace(String),

    #[error("No provider registered for namespace: {0}")]
    MissingProvider(Namespace),
}

pub type Result<T> = std::result::Result<T, BridgeError>;

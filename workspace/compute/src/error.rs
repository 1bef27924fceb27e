use thiserror::Error;

/// Error types for the compute module
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ComputeError {
    /// The chatbot was given nothing to answer
    #[error("Message is required and must be a non-empty string")]
    EmptyMessage,

    /// A decimal sum left the representable range
    #[error("Decimal overflow while summing {0}")]
    Overflow(String),
}

/// Type alias for Result with ComputeError
pub type Result<T> = std::result::Result<T, ComputeError>;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DocumentError {
    /// The bytes are not a parseable document at all.
    #[error("document could not be read: {0}")]
    Read(String),

    /// The candidate did not remove the restriction.
    #[error("password rejected: {0}")]
    Decrypt(String),

    /// The restriction uses a scheme that cannot be handled, independent of
    /// the candidate. Stops the candidate loop.
    #[error("unsupported document encryption: {0}")]
    Unsupported(String),

    #[error("document is still password restricted")]
    StillRestricted,

    #[error("text extraction failed: {0}")]
    Extract(String),

    #[error("document could not be serialized: {0}")]
    Save(String),
}

pub type Result<T> = std::result::Result<T, DocumentError>;

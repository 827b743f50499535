use crate::error::Result;

/// An opened document handle.
///
/// A handle on which `decrypt` failed must not be reused for another
/// candidate; callers open a fresh one instead.
pub trait StatementDocument {
    fn is_restricted(&self) -> bool;

    fn page_count(&self) -> usize;

    /// Remove the restriction in place. `Err(DocumentError::Decrypt)` when the
    /// password does not match, `Err(DocumentError::Unsupported)` when no
    /// password could.
    fn decrypt(&mut self, password: &str) -> Result<()>;

    /// Text of every page in page order, each page followed by a newline.
    fn extract_text(&self) -> Result<String>;

    /// Serialize the (unrestricted) document.
    fn save(&mut self) -> Result<Vec<u8>>;
}

pub trait DocumentOpener {
    type Document: StatementDocument;

    /// Parse `bytes` into a fresh handle; `DocumentError::Read` if they are
    /// not a document.
    fn open(&self, bytes: &[u8]) -> Result<Self::Document>;
}

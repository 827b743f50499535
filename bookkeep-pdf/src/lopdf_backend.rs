//! `lopdf`-backed documents.
//!
//! lopdf only parses the objects of a restricted document once the password
//! is known, so a handle keeps its source bytes and reloads them after the
//! candidate authenticates.

use lopdf::encryption::DecryptionError;
use lopdf::{Document, Error as PdfError};

use crate::document::{DocumentOpener, StatementDocument};
use crate::error::{DocumentError, Result};

#[derive(Debug, Clone, Copy, Default)]
pub struct LopdfOpener;

impl DocumentOpener for LopdfOpener {
    type Document = LopdfDocument;

    fn open(&self, bytes: &[u8]) -> Result<LopdfDocument> {
        let doc = Document::load_mem(bytes).map_err(|e| DocumentError::Read(e.to_string()))?;
        Ok(LopdfDocument {
            source: bytes.to_vec(),
            doc,
        })
    }
}

pub struct LopdfDocument {
    source: Vec<u8>,
    doc: Document,
}

impl LopdfDocument {
    pub fn inner(&self) -> &Document {
        &self.doc
    }
}

impl StatementDocument for LopdfDocument {
    fn is_restricted(&self) -> bool {
        self.doc.is_encrypted()
    }

    fn page_count(&self) -> usize {
        self.doc.get_pages().len()
    }

    fn decrypt(&mut self, password: &str) -> Result<()> {
        if !self.doc.is_encrypted() {
            return Ok(());
        }
        self.doc.authenticate_password(password).map_err(password_error)?;
        let doc = Document::load_mem_with_password(&self.source, password).map_err(password_error)?;
        if doc.is_encrypted() {
            return Err(DocumentError::StillRestricted);
        }
        self.doc = doc;
        Ok(())
    }

    fn extract_text(&self) -> Result<String> {
        if self.is_restricted() {
            return Err(DocumentError::StillRestricted);
        }
        let mut text = String::new();
        for page in self.doc.get_pages().keys() {
            let page_text = self
                .doc
                .extract_text(&[*page])
                .map_err(|e| DocumentError::Extract(format!("page {page}: {e}")))?;
            text.push_str(&page_text);
            text.push('\n');
        }
        Ok(text)
    }

    fn save(&mut self) -> Result<Vec<u8>> {
        if self.is_restricted() {
            return Err(DocumentError::StillRestricted);
        }
        let mut buf = Vec::new();
        self.doc
            .save_to(&mut buf)
            .map_err(|e| DocumentError::Save(e.to_string()))?;
        Ok(buf)
    }
}

/// Only a rejected password is a `Decrypt`; every other failure means no
/// candidate can succeed.
fn password_error(err: PdfError) -> DocumentError {
    match &err {
        PdfError::Decryption(DecryptionError::IncorrectPassword) | PdfError::InvalidPassword => {
            DocumentError::Decrypt(err.to_string())
        }
        _ => DocumentError::Unsupported(err.to_string()),
    }
}

//! Orchestrates one document at a time: unlock, extract text, reconstruct
//! blocks, resolve records. Failures stay local to their document.

use bookkeep_core::PasswordList;
use bookkeep_ingest::parsers::tng_ewallet::tng_ewallet_layout;
use bookkeep_ingest::{parse_statement_text, StatementLayout};
use bookkeep_pdf::{DocumentOpener, DocumentUnlocker, LopdfOpener, UnlockOutcome};
use tracing::{info, warn};

use crate::report::{DocumentOutcome, DocumentReport, ExtractionReport};
use crate::source::SourceDocument;

pub struct ExtractionEngine<O = LopdfOpener> {
    unlocker: DocumentUnlocker<O>,
    layout: StatementLayout,
    passwords: PasswordList,
}

impl ExtractionEngine<LopdfOpener> {
    /// lopdf documents, TNG eWallet layout.
    pub fn tng_ewallet(passwords: PasswordList) -> anyhow::Result<Self> {
        Ok(Self::new(DocumentUnlocker::lopdf(), tng_ewallet_layout()?, passwords))
    }
}

impl<O: DocumentOpener> ExtractionEngine<O> {
    pub fn new(unlocker: DocumentUnlocker<O>, layout: StatementLayout, passwords: PasswordList) -> Self {
        Self {
            unlocker,
            layout,
            passwords,
        }
    }

    pub fn unlocker(&self) -> &DocumentUnlocker<O> {
        &self.unlocker
    }

    pub fn passwords(&self) -> &PasswordList {
        &self.passwords
    }

    pub fn extract_document(&self, doc: &SourceDocument) -> DocumentOutcome {
        let matched_password = match self.unlocker.attempt_unlock(&doc.bytes, self.passwords.as_slice()) {
            Ok(UnlockOutcome::Exhausted { attempts }) => {
                warn!(document = %doc.id, attempts, "no candidate password unlocked the document");
                return DocumentOutcome::Locked { attempts };
            }
            Ok(outcome) => outcome.matched_password().map(str::to_string),
            Err(e) => {
                warn!(document = %doc.id, error = %e, "skipping unreadable document");
                return DocumentOutcome::Unreadable { reason: e.to_string() };
            }
        };

        let text = match self.unlocker.extract_text(&doc.bytes, matched_password.as_deref()) {
            Ok(text) => text,
            Err(e) => {
                warn!(document = %doc.id, error = %e, "skipping document without extractable text");
                return DocumentOutcome::Unreadable { reason: e.to_string() };
            }
        };

        let transactions = parse_statement_text(&self.layout, &text);
        if transactions.is_empty() {
            warn!(document = %doc.id, "no transactions found");
            return DocumentOutcome::Empty { matched_password };
        }

        info!(document = %doc.id, count = transactions.len(), "extracted transactions");
        DocumentOutcome::Extracted {
            matched_password,
            transactions,
        }
    }

    /// Every document is processed to completion before the next; results
    /// keep input order.
    pub fn extract_all<'a, I>(&self, documents: I) -> ExtractionReport
    where
        I: IntoIterator<Item = &'a SourceDocument>,
    {
        let documents = documents
            .into_iter()
            .map(|doc| DocumentReport {
                id: doc.id.clone(),
                outcome: self.extract_document(doc),
            })
            .collect();
        ExtractionReport { documents }
    }
}

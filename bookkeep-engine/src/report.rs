use bookkeep_core::Transaction;
use std::fmt;

/// What happened to one document.
///
/// `Empty` (opened fine, nothing resolved) and the failure variants are
/// deliberately distinct outcomes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentOutcome {
    Extracted {
        matched_password: Option<String>,
        transactions: Vec<Transaction>,
    },
    Empty {
        matched_password: Option<String>,
    },
    /// No candidate password removed the restriction.
    Locked { attempts: usize },
    /// The bytes could not be read as a document, or its text could not be
    /// extracted.
    Unreadable { reason: String },
}

impl DocumentOutcome {
    pub fn transactions(&self) -> &[Transaction] {
        match self {
            DocumentOutcome::Extracted { transactions, .. } => transactions,
            _ => &[],
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, DocumentOutcome::Locked { .. } | DocumentOutcome::Unreadable { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentReport {
    pub id: String,
    pub outcome: DocumentOutcome,
}

/// Per-document results in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractionReport {
    pub documents: Vec<DocumentReport>,
}

impl ExtractionReport {
    pub fn get(&self, id: &str) -> Option<&DocumentOutcome> {
        self.documents.iter().find(|d| d.id == id).map(|d| &d.outcome)
    }

    pub fn summary(&self) -> ExtractionSummary {
        let mut summary = ExtractionSummary {
            documents: self.documents.len(),
            ..Default::default()
        };
        for doc in &self.documents {
            match &doc.outcome {
                DocumentOutcome::Extracted { transactions, .. } => {
                    summary.extracted += 1;
                    summary.transactions += transactions.len();
                }
                DocumentOutcome::Empty { .. } => summary.empty += 1,
                DocumentOutcome::Locked { .. } => summary.locked += 1,
                DocumentOutcome::Unreadable { .. } => summary.unreadable += 1,
            }
        }
        summary
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractionSummary {
    pub documents: usize,
    pub extracted: usize,
    pub empty: usize,
    pub locked: usize,
    pub unreadable: usize,
    pub transactions: usize,
}

impl ExtractionSummary {
    /// Documents that opened, whether or not they yielded transactions.
    pub fn succeeded(&self) -> usize {
        self.extracted + self.empty
    }
}

impl fmt::Display for ExtractionSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{} documents processed ({} transactions; {} empty, {} locked, {} unreadable)",
            self.succeeded(),
            self.documents,
            self.transactions,
            self.empty,
            self.locked,
            self.unreadable
        )
    }
}

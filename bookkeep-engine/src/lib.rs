//! bookkeep-engine: unlock -> extract text -> reconstruct -> resolve, across a
//! working set of statement documents, plus the output sinks.

pub mod engine;
pub mod report;
pub mod sink;
pub mod source;

pub use engine::ExtractionEngine;
pub use report::{DocumentOutcome, DocumentReport, ExtractionReport, ExtractionSummary};
pub use sink::{write_transactions, write_unlocked, OutputFormat};
pub use source::{document_stem, scan_pdf_dir, SourceDocument};

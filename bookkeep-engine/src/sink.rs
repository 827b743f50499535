//! Output sinks. One file per input document; an existing file is never
//! overwritten, the next free `_N` suffix is used instead.

use anyhow::{Context, Result};
use bookkeep_core::{next_available_path, Transaction};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::report::{DocumentOutcome, ExtractionReport};
use crate::source::document_stem;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Csv,
    Json,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
        }
    }
}

/// Write `txns` to `dir/<stem>.<ext>` (or the next free suffixed name).
pub fn write_transactions(
    dir: impl AsRef<Path>,
    stem: &str,
    txns: &[Transaction],
    format: OutputFormat,
) -> Result<PathBuf> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;
    let path = next_available_path(dir, stem, format.extension());

    match format {
        OutputFormat::Csv => {
            let mut wtr = csv::Writer::from_path(&path)
                .with_context(|| format!("create {}", path.display()))?;
            for txn in txns {
                wtr.serialize(txn)?;
            }
            wtr.flush().with_context(|| format!("write {}", path.display()))?;
        }
        OutputFormat::Json => {
            let file = File::create(&path).with_context(|| format!("create {}", path.display()))?;
            let mut out = BufWriter::new(file);
            serde_json::to_writer_pretty(&mut out, txns)
                .with_context(|| format!("write {}", path.display()))?;
            out.flush().with_context(|| format!("write {}", path.display()))?;
        }
    }

    Ok(path)
}

/// Persist unlocked document bytes as `dir/<stem>.pdf` (or the next free
/// suffixed name).
pub fn write_unlocked(dir: impl AsRef<Path>, stem: &str, bytes: &[u8]) -> Result<PathBuf> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;
    let path = next_available_path(dir, stem, "pdf");
    fs::write(&path, bytes).with_context(|| format!("write {}", path.display()))?;
    Ok(path)
}

impl ExtractionReport {
    /// One `<document stem>_transactions` file per document that yielded
    /// transactions. Documents without transactions produce no file.
    ///
    /// Returns one write result per written document, in report order. A
    /// failed write does not stop the remaining documents.
    pub fn write_outputs(&self, dir: impl AsRef<Path>, format: OutputFormat) -> Vec<(String, Result<PathBuf>)> {
        let dir = dir.as_ref();
        let mut written = Vec::new();
        for doc in &self.documents {
            if let DocumentOutcome::Extracted { transactions, .. } = &doc.outcome {
                let stem = format!("{}_transactions", document_stem(&doc.id));
                let result = write_transactions(dir, &stem, transactions, format);
                if let Err(e) = &result {
                    warn!(document = %doc.id, error = %e, "failed to write transactions");
                }
                written.push((doc.id.clone(), result));
            }
        }
        written
    }
}

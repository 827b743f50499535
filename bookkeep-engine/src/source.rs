use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// A statement document in the working set. `id` is what outputs are keyed
/// by (the file name for documents read from disk).
#[derive(Debug, Clone)]
pub struct SourceDocument {
    pub id: String,
    pub bytes: Vec<u8>,
}

impl SourceDocument {
    pub fn new(id: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            id: id.into(),
            bytes,
        }
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path).with_context(|| format!("read {}", path.display()))?;
        let id = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self { id, bytes })
    }

    pub fn stem(&self) -> String {
        document_stem(&self.id)
    }
}

/// File stem of a document id, used to derive output names.
pub fn document_stem(id: &str) -> String {
    Path::new(id)
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| id.to_string())
}

/// `*.pdf` files directly under `dir` (extension matched case-insensitively),
/// sorted by file name.
pub fn scan_pdf_dir(dir: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    let mut out = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("list {}", dir.display()))? {
        let path = entry?.path();
        let is_pdf = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));
        if is_pdf && path.is_file() {
            out.push(path);
        }
    }
    out.sort();
    Ok(out)
}

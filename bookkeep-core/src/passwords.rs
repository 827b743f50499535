//! Ordered candidate passwords for restricted statements.
//!
//! Candidates are opaque: no trimming, no case folding. Source order is the
//! order in which they are tried.

use anyhow::{Context, Result};
use std::fmt;
use std::fs;
use std::path::Path;

#[derive(Clone, Default, PartialEq, Eq)]
pub struct PasswordList {
    candidates: Vec<String>,
}

impl PasswordList {
    pub fn new<I, S>(candidates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            candidates: candidates.into_iter().map(Into::into).collect(),
        }
    }

    /// One candidate per line. Only the line terminator is stripped; empty
    /// lines are skipped.
    pub fn parse_lines(text: &str) -> Self {
        let candidates = text
            .split('\n')
            .map(|line| line.strip_suffix('\r').unwrap_or(line))
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect();
        Self { candidates }
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("read password list {}", path.display()))?;
        Ok(Self::parse_lines(&text))
    }

    /// Append `other` after this list, keeping both orders.
    pub fn chain(mut self, other: PasswordList) -> Self {
        self.candidates.extend(other.candidates);
        self
    }

    pub fn as_slice(&self) -> &[String] {
        &self.candidates
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}

impl fmt::Debug for PasswordList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PasswordList")
            .field("len", &self.candidates.len())
            .finish()
    }
}

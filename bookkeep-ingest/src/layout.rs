//! Statement layout: the patterns that identify blocks and fields.
//!
//! A layout fixes the currency marker that tags monetary values and the
//! vocabulary of transaction-type labels. New statement families are added by
//! building another layout rather than by changing the reconstruction or
//! resolution code.

use anyhow::{bail, Result};
use regex::Regex;

#[derive(Debug, Clone)]
pub struct StatementLayout {
    currency_marker: String,
    vocabulary: Vec<Vec<String>>,
    pub(crate) block_start_re: Regex,
    pub(crate) date_token_re: Regex,
    pub(crate) terminator_re: Regex,
    pub(crate) amount_re: Regex,
}

impl StatementLayout {
    /// `vocabulary` is searched longest-label first; labels with the same
    /// number of words keep the given order.
    pub fn new<I, S>(currency_marker: &str, vocabulary: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        if currency_marker.trim().is_empty() {
            bail!("currency marker must not be empty");
        }

        let vocabulary: Vec<Vec<String>> = vocabulary
            .into_iter()
            .map(|label| {
                label
                    .as_ref()
                    .split_whitespace()
                    .map(str::to_string)
                    .collect::<Vec<_>>()
            })
            .filter(|words| !words.is_empty())
            .collect();

        let marker = regex::escape(currency_marker);
        let money = r"\d[\d,]*(?:\.\d+)?";

        Ok(Self {
            currency_marker: currency_marker.to_string(),
            vocabulary,
            // d/m/yyyy, no zero padding and no calendar validation
            block_start_re: Regex::new(r"^\d{1,2}/\d{1,2}/\d{4}")?,
            date_token_re: Regex::new(r"^\d{1,2}/\d{1,2}/\d{4}$")?,
            // <marker>amount <marker>balance at end of line
            terminator_re: Regex::new(&format!(r"{marker}{money}\s+{marker}{money}$"))?,
            amount_re: Regex::new(&format!(r"{marker}(?P<value>{money})"))?,
        })
    }

    pub fn currency_marker(&self) -> &str {
        &self.currency_marker
    }

    /// Vocabulary labels as word runs, in configured order.
    pub fn vocabulary(&self) -> impl Iterator<Item = &[String]> {
        self.vocabulary.iter().map(Vec::as_slice)
    }

    pub fn is_block_start(&self, line: &str) -> bool {
        self.block_start_re.is_match(line.trim())
    }

    pub fn is_block_terminator(&self, line: &str) -> bool {
        self.terminator_re.is_match(line.trim())
    }
}

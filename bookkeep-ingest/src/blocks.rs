//! Regroup physically wrapped lines into transaction blocks.
//!
//! A block opens on a line that starts with a date and closes on the first
//! line (the opening line included) that ends in two currency-tagged values.
//! Everything in between is appended in order; blank lines are skipped.
//! A block still open when the text ends is discarded.

use tracing::debug;

use crate::layout::StatementLayout;
use crate::types::{RawLine, TransactionBlock};

/// Lazy block sequence over one document's text. Call
/// [`reconstruct_blocks`] again to restart from the top.
#[derive(Clone)]
pub struct Blocks<'a> {
    layout: &'a StatementLayout,
    lines: std::iter::Enumerate<std::str::Lines<'a>>,
}

pub fn reconstruct_blocks<'a>(layout: &'a StatementLayout, text: &'a str) -> Blocks<'a> {
    Blocks {
        layout,
        lines: text.lines().enumerate(),
    }
}

impl<'a> Blocks<'a> {
    fn next_line(&mut self) -> Option<RawLine<'a>> {
        self.lines.next().map(|(i, content)| RawLine {
            index: i + 1,
            content: content.trim(),
        })
    }
}

impl Iterator for Blocks<'_> {
    type Item = TransactionBlock;

    fn next(&mut self) -> Option<TransactionBlock> {
        // Skip preamble/header/footer text until a date-led line.
        let start = loop {
            let line = self.next_line()?;
            if self.layout.is_block_start(line.content) {
                break line;
            }
        };

        if self.layout.is_block_terminator(start.content) {
            return Some(TransactionBlock {
                first_line: start.index,
                last_line: start.index,
                text: start.content.to_string(),
            });
        }

        let mut parts = vec![start.content];

        while let Some(line) = self.next_line() {
            if line.content.is_empty() {
                continue;
            }
            parts.push(line.content);
            if self.layout.is_block_terminator(line.content) {
                return Some(TransactionBlock {
                    first_line: start.index,
                    last_line: line.index,
                    text: parts.join(" "),
                });
            }
        }

        debug!(line = start.index, "dropping unterminated block");
        None
    }
}

//! bookkeep-ingest: statement text -> transaction records.
//!
//! Extracted statement text is regrouped into transaction blocks
//! (`blocks`), then each block is resolved into a record (`resolver`).
//! Bank-specific layouts live under `parsers`.

pub mod blocks;
pub mod layout;
pub mod parsers;
pub mod resolver;
pub mod types;

pub use blocks::{reconstruct_blocks, Blocks};
pub use layout::StatementLayout;
pub use parsers::tng_ewallet::parse_tng_ewallet_text;
pub use resolver::{resolve_block, resolve_text};
pub use types::{RawLine, TransactionBlock};

use bookkeep_core::Transaction;

/// Reconstruct and resolve every block of `text`, dropping blocks that do not
/// resolve. Block order is preserved.
pub fn parse_statement_text(layout: &StatementLayout, text: &str) -> Vec<Transaction> {
    reconstruct_blocks(layout, text)
        .filter_map(|block| resolve_block(layout, &block))
        .collect()
}

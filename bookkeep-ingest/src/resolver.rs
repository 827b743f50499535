//! Resolve one transaction block into a record by token elimination.
//!
//! Fields are taken out of the token sequence in a fixed order: date,
//! status, transaction type, then amount and balance from what is left.
//! Leftover tokens (reference numbers, merchant text) are discarded.

use bookkeep_core::{Transaction, TransactionStatus};

use crate::layout::StatementLayout;
use crate::types::TransactionBlock;

pub fn resolve_block(layout: &StatementLayout, block: &TransactionBlock) -> Option<Transaction> {
    resolve_text(layout, &block.text)
}

/// Pure function of `text`: `None` whenever any of the five fields cannot be
/// recovered.
pub fn resolve_text(layout: &StatementLayout, text: &str) -> Option<Transaction> {
    let mut tokens: Vec<&str> = text.split_whitespace().collect();

    let date_idx = tokens.iter().position(|t| layout.date_token_re.is_match(t))?;
    let date = tokens.remove(date_idx).to_string();

    let (status_idx, status) = tokens
        .iter()
        .enumerate()
        .find_map(|(i, t)| t.parse::<TransactionStatus>().ok().map(|s| (i, s)))?;
    tokens.remove(status_idx);

    let transaction_type = match find_vocabulary_label(layout, &tokens) {
        Some((start, len)) => {
            let label = tokens[start..start + len].join(" ");
            tokens.drain(start..start + len);
            label
        }
        // Best effort for labels outside the vocabulary; tokens stay in
        // place so a short block can still yield its amounts.
        None => tokens.iter().take(3).copied().collect::<Vec<_>>().join(" "),
    };

    let mut money = tokens.iter().filter_map(|t| {
        layout
            .amount_re
            .captures(t)
            .map(|caps| caps["value"].replace(',', ""))
    });
    let amount = money.next()?;
    let wallet_balance = money.next()?;

    Some(Transaction {
        date,
        status,
        transaction_type,
        amount,
        wallet_balance,
    })
}

/// Longest vocabulary label present as a contiguous word run; ties go to the
/// label listed first. Returns the run's start and length in `tokens`.
fn find_vocabulary_label(layout: &StatementLayout, tokens: &[&str]) -> Option<(usize, usize)> {
    let mut best: Option<(usize, usize)> = None;
    for words in layout.vocabulary() {
        if best.is_some_and(|(_, len)| len >= words.len()) {
            continue;
        }
        let hit = tokens
            .windows(words.len())
            .position(|run| run.iter().zip(words).all(|(t, w)| *t == w.as_str()));
        if let Some(start) = hit {
            best = Some((start, words.len()));
        }
    }
    best
}
